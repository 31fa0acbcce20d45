//! Top-level CLI definition and dispatch.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::{Shell as CompletionShell, generate};
use colored::Colorize;

use poolscope::core::config::Config;
use poolscope::core::errors::{PoolscopeError, Result};
use poolscope::pool::source::{JsonPoolSource, MockPoolSource, PoolSource};
use poolscope::pool::status::{pool_worst_status, vdev_worst_status};
use poolscope::pool::types::{Pool, Severity};
use poolscope::tui::theme::Theme;
use poolscope::tui::{RuntimeConfig, run_dashboard};

/// poolscope — storage pool topology health at a glance.
#[derive(Debug, Parser)]
#[command(
    name = "poolscope",
    author,
    version,
    about = "Terminal dashboard for storage pool topology health",
    long_about = None
)]
pub struct Cli {
    /// Override config file path.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Force JSON output mode.
    #[arg(long, global = true)]
    json: bool,
    /// Disable colored output.
    #[arg(long, global = true)]
    no_color: bool,
    /// Subcommand to execute; defaults to the dashboard.
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand)]
enum Command {
    /// Run the interactive dashboard.
    Dashboard(DashboardArgs),
    /// Print a one-shot pool health report.
    Status(StatusArgs),
    /// Generate shell completions.
    Completions(CompletionsArgs),
}

#[derive(Debug, Clone, Args, Default)]
struct DashboardArgs {
    /// Refresh interval override in milliseconds.
    #[arg(long, value_name = "MS")]
    refresh_ms: Option<u64>,
    /// Read pool topology from a JSON file instead of mock data.
    #[arg(long, value_name = "PATH")]
    source_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Args, Default)]
struct StatusArgs {
    /// Read pool topology from a JSON file instead of mock data.
    #[arg(long, value_name = "PATH")]
    source_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Args)]
struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum)]
    shell: CompletionShell,
}

/// Dispatch the parsed CLI.
pub fn run(cli: &Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;
    let no_color = cli.no_color || config.no_color;
    if no_color {
        colored::control::set_override(false);
    }

    match &cli.command {
        None => run_dashboard_command(&DashboardArgs::default(), &config, no_color),
        Some(Command::Dashboard(args)) => run_dashboard_command(args, &config, no_color),
        Some(Command::Status(args)) => run_status(args, &config, cli.json),
        Some(Command::Completions(args)) => {
            generate(
                args.shell,
                &mut Cli::command(),
                "poolscope",
                &mut io::stdout(),
            );
            Ok(())
        }
    }
}

fn select_source(file: Option<&PathBuf>) -> Arc<dyn PoolSource> {
    match file {
        Some(path) => Arc::new(JsonPoolSource::new(path)),
        None => Arc::new(MockPoolSource),
    }
}

fn run_dashboard_command(args: &DashboardArgs, config: &Config, no_color: bool) -> Result<()> {
    let refresh = match args.refresh_ms {
        Some(0) => {
            return Err(PoolscopeError::InvalidConfig {
                details: "--refresh-ms must be greater than zero".to_string(),
            });
        }
        Some(ms) => Duration::from_millis(ms),
        None => config.refresh(),
    };
    let source = select_source(args.source_file.as_ref().or(config.source_file.as_ref()));
    let theme = if no_color {
        Theme::plain()
    } else {
        Theme::from_environment()
    };
    run_dashboard(source, &RuntimeConfig { refresh, theme })
}

fn run_status(args: &StatusArgs, config: &Config, json: bool) -> Result<()> {
    let source = select_source(args.source_file.as_ref().or(config.source_file.as_ref()));
    let pools = source.fetch()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&pools)?);
        return Ok(());
    }
    if pools.is_empty() {
        println!("No pools found");
        return Ok(());
    }
    for pool in &pools {
        println!("{}", status_line(pool));
    }
    Ok(())
}

fn status_line(pool: &Pool) -> String {
    let worst = pool_worst_status(pool);
    let mut parts = vec![format!(
        "root {}",
        vdev_worst_status(&pool.root).as_label()
    )];
    if let Some(cache) = &pool.cache {
        parts.push(format!("cache {}", vdev_worst_status(cache).as_label()));
    }
    if let Some(slog) = &pool.slog {
        parts.push(format!("slog {}", vdev_worst_status(slog).as_label()));
    }
    format!(
        "{} {}  ({})",
        format!("{:<12}", pool.name).bold(),
        severity_colored(worst),
        parts.join(", "),
    )
}

fn severity_colored(severity: Severity) -> colored::ColoredString {
    match severity {
        Severity::Online => severity.as_label().green(),
        Severity::Degraded => severity.as_label().yellow(),
        Severity::Faulted => severity.as_label().red(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use poolscope::pool::source::mock_pools;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_default_invocation() {
        let cli = Cli::try_parse_from(["poolscope"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.json);
    }

    #[test]
    fn parses_dashboard_flags() {
        let cli = Cli::try_parse_from([
            "poolscope",
            "dashboard",
            "--refresh-ms",
            "250",
            "--source-file",
            "/tmp/pools.json",
        ])
        .unwrap();
        match cli.command {
            Some(Command::Dashboard(args)) => {
                assert_eq!(args.refresh_ms, Some(250));
                assert_eq!(args.source_file, Some(PathBuf::from("/tmp/pools.json")));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["poolscope", "status", "--json", "--no-color"]).unwrap();
        assert!(cli.json);
        assert!(cli.no_color);
    }

    #[test]
    fn zero_refresh_override_is_rejected() {
        let args = DashboardArgs {
            refresh_ms: Some(0),
            source_file: None,
        };
        let err = run_dashboard_command(&args, &Config::default(), true).unwrap_err();
        assert_eq!(err.code(), "PSC-1001");
    }

    #[test]
    fn status_line_reports_rollup_and_parts() {
        colored::control::set_override(false);
        let pools = mock_pools();

        let line = status_line(&pools[0]);
        assert!(line.contains("testpool"));
        assert!(line.contains("DEGRADED"));
        assert!(line.contains("root DEGRADED"));

        let line = status_line(&pools[1]);
        assert!(line.contains("FAULTED"));
        assert!(line.contains("cache ONLINE"));
        assert!(line.contains("slog FAULTED"));
    }

    #[test]
    fn mock_source_selected_without_file() {
        let source = select_source(None);
        assert_eq!(source.describe(), "mock data");

        let path = PathBuf::from("/tmp/pools.json");
        let source = select_source(Some(&path));
        assert_eq!(source.describe(), "/tmp/pools.json");
    }
}
