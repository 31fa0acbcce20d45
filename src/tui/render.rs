//! Pure rendering: (topology, aggregated severities, selection state) to
//! display text.
//!
//! Every vdev and disk line is annotated with its *aggregated* severity,
//! in both compact and detailed modes; box borders are keyed to the
//! aggregated severity of the node they enclose, so a degraded subtree is
//! visually distinguishable at every depth. The function writes nothing
//! to the terminal; the runtime owns the viewport.

use crate::pool::status::{pool_worst_status, vdev_worst_status};
use crate::pool::types::{Disk, Pool, Severity, VDev};
use crate::tui::input::help_line;
use crate::tui::model::DashboardModel;
use crate::tui::theme::Theme;

/// Fixed output for an empty pool collection.
pub const NO_POOLS_MESSAGE: &str = "No pools found";

/// Render one frame of the dashboard.
#[must_use]
pub fn render(model: &DashboardModel, theme: &Theme) -> String {
    if model.pools.is_empty() {
        // An empty collection is a defined, renderable state; a source
        // failure is not the same thing and is reported as such.
        return model.source_error.as_ref().map_or_else(
            || format!("{NO_POOLS_MESSAGE}\n"),
            |err| format!("data source error: {err}\n"),
        );
    }

    let mut lines: Vec<String> = Vec::new();
    lines.push(render_tabs(model, theme));
    lines.push(String::new());

    if let Some(pool) = model.current_pool() {
        lines.extend(render_pool(
            pool,
            model.selected_vdev.as_deref(),
            model.expanded,
            theme,
        ));
    }

    lines.push(String::new());
    if let Some(status) = render_status_line(model, theme) {
        lines.push(status);
    }
    lines.push(help_line().to_string());

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

// ──────────────────── tab bar ────────────────────

fn render_tabs(model: &DashboardModel, theme: &Theme) -> String {
    let tabs: Vec<String> = model
        .pools
        .iter()
        .enumerate()
        .map(|(i, pool)| {
            if i == model.selected_pool {
                theme.paint(
                    crossterm::style::Color::Cyan,
                    &format!("[ {} ]", pool.name),
                )
            } else {
                format!("  {}  ", pool.name)
            }
        })
        .collect();
    tabs.join(" ")
}

// ──────────────────── pool rendering ────────────────────

fn render_pool(
    pool: &Pool,
    selected: Option<&str>,
    expanded: bool,
    theme: &Theme,
) -> Vec<String> {
    let worst = pool_worst_status(pool);
    let title = format!("Pool: {} [{}]", pool.name, theme.severity_label(worst));

    let mut body: Vec<String> = Vec::new();
    if expanded {
        body.extend(detailed_block(&pool.root, selected, theme));
        if let Some(cache) = &pool.cache {
            body.extend(detailed_block(cache, selected, theme));
        }
        if let Some(slog) = &pool.slog {
            body.extend(detailed_block(slog, selected, theme));
        }
    } else {
        compact_subtree(&pool.root, selected, theme, &mut body);
        if let Some(cache) = &pool.cache {
            compact_subtree(cache, selected, theme, &mut body);
        }
        if let Some(slog) = &pool.slog {
            compact_subtree(slog, selected, theme, &mut body);
        }
    }

    boxed(&title, &body, worst, theme)
}

// ──────────────────── compact mode ────────────────────

/// One line per vdev and disk, with tree glyphs and aggregated severity.
fn compact_subtree(root: &VDev, selected: Option<&str>, theme: &Theme, out: &mut Vec<String>) {
    out.push(format!(
        "{}{} ({}) [{}]",
        selection_marker(root.name.as_str(), selected),
        root.name,
        root.kind.as_label(),
        theme.severity_label(vdev_worst_status(root)),
    ));
    compact_children(root, "", selected, theme, out);
}

fn compact_children(
    vdev: &VDev,
    prefix: &str,
    selected: Option<&str>,
    theme: &Theme,
    out: &mut Vec<String>,
) {
    let total = vdev.children.len()
        + if vdev.children.is_empty() {
            vdev.disks.len()
        } else {
            0
        };

    for (i, child) in vdev.children.iter().enumerate() {
        let last = i + 1 == total;
        out.push(format!(
            "{}{prefix}{}{} ({}) [{}]",
            selection_marker(child.name.as_str(), selected),
            glyph(last),
            child.name,
            child.kind.as_label(),
            theme.severity_label(vdev_worst_status(child)),
        ));
        let extended = format!("{prefix}{}", continuation(last));
        compact_children(child, &extended, selected, theme, out);
    }

    if vdev.children.is_empty() {
        for (i, disk) in vdev.disks.iter().enumerate() {
            let last = i + 1 == total;
            out.push(format!(
                "  {prefix}{}{} [{}]",
                glyph(last),
                disk.name,
                theme.severity_label(disk.status),
            ));
        }
    }
}

const fn glyph(last: bool) -> &'static str {
    if last { "└─ " } else { "├─ " }
}

const fn continuation(last: bool) -> &'static str {
    if last { "   " } else { "│  " }
}

fn selection_marker(name: &str, selected: Option<&str>) -> &'static str {
    if selected == Some(name) { "▶ " } else { "  " }
}

// ──────────────────── detailed mode ────────────────────

/// Nested severity-keyed boxes: every vdev with descendants becomes a box
/// around its children; leaves and disks become annotated lines with
/// their live attributes.
fn detailed_block(vdev: &VDev, selected: Option<&str>, theme: &Theme) -> Vec<String> {
    let worst = vdev_worst_status(vdev);
    let head = format!(
        "{}{} ({}) [{}]",
        selection_marker(vdev.name.as_str(), selected),
        vdev.name,
        vdev.kind.as_label(),
        theme.severity_label(worst),
    );

    if vdev.is_leaf() {
        return vec![head];
    }

    let mut body: Vec<String> = Vec::new();
    for child in &vdev.children {
        body.extend(detailed_block(child, selected, theme));
    }
    if vdev.children.is_empty() {
        for disk in &vdev.disks {
            body.extend(disk_lines(disk, theme));
        }
    }
    boxed(&head, &body, worst, theme)
}

fn disk_lines(disk: &Disk, theme: &Theme) -> Vec<String> {
    let mut line = format!("{} [{}]", disk.name, theme.severity_label(disk.status));
    if let Some(path) = &disk.path {
        line.push_str(&format!(" {path}"));
    }
    let mut out = vec![line];
    if disk.resilvering {
        out.push(format!("  resilvering {:.1}%", disk.progress));
    }
    out
}

// ──────────────────── status line ────────────────────

fn render_status_line(model: &DashboardModel, theme: &Theme) -> Option<String> {
    let mut parts: Vec<String> = Vec::new();
    if let Some(err) = &model.source_error {
        parts.push(theme.paint(
            crossterm::style::Color::Red,
            &format!("data source error: {err}"),
        ));
    }
    if let Some(at) = &model.refreshed_at {
        parts.push(format!("refreshed {at}"));
    }
    if model.fetch_in_flight {
        parts.push("fetching...".to_string());
    }
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" • "))
    }
}

// ──────────────────── box drawing ────────────────────

/// Wrap body lines in a border whose characters carry the severity color
/// of the enclosed node. The title is embedded in the top edge.
fn boxed(title: &str, body: &[String], severity: Severity, theme: &Theme) -> Vec<String> {
    let title_width = visible_width(title);
    let body_width = body.iter().map(|l| visible_width(l)).max().unwrap_or(0);
    let inner = body_width.max(title_width + 1);

    let mut out = Vec::with_capacity(body.len() + 2);

    let fill = "─".repeat(inner - title_width - 1);
    out.push(format!(
        "{}{title}{}",
        theme.border(severity, "┌─ "),
        theme.border(severity, &format!(" {fill}┐")),
    ));

    for line in body {
        let pad = " ".repeat(inner - visible_width(line));
        out.push(format!(
            "{}{line}{pad}{}",
            theme.border(severity, "│ "),
            theme.border(severity, " │"),
        ));
    }

    out.push(theme.border(severity, &format!("└{}┘", "─".repeat(inner + 2))));
    out
}

/// Display width of a line, skipping ANSI CSI sequences.
///
/// Box geometry must line up whether or not the theme paints, so width is
/// counted over visible characters only.
fn visible_width(s: &str) -> usize {
    let mut width = 0;
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\u{1b}' {
            if chars.next() == Some('[') {
                for follow in chars.by_ref() {
                    if ('\u{40}'..='\u{7e}').contains(&follow) {
                        break;
                    }
                }
            }
        } else {
            width += 1;
        }
    }
    width
}
