//! Configuration system: TOML file + env var overrides + smart defaults.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::errors::{PoolscopeError, Result};

/// Default refresh interval for the dashboard, in milliseconds.
const DEFAULT_REFRESH_MS: u64 = 1000;

/// Full poolscope configuration model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Dashboard refresh interval in milliseconds. Must be non-zero.
    pub refresh_ms: u64,
    /// Optional JSON topology file to read pools from instead of mock data.
    pub source_file: Option<PathBuf>,
    /// Disable colored output everywhere.
    pub no_color: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            refresh_ms: DEFAULT_REFRESH_MS,
            source_file: None,
            no_color: false,
        }
    }
}

impl Config {
    /// Load configuration with the standard precedence:
    /// explicit path > default path (if it exists) > built-in defaults,
    /// then env var overrides, then validation.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(p) => Self::from_file(p)?,
            None => match Self::default_path() {
                Some(p) if p.exists() => Self::from_file(&p)?,
                _ => Self::default(),
            },
        };
        config.apply_env_overrides(|key| env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(PoolscopeError::MissingConfig {
                path: path.to_path_buf(),
            });
        }
        let raw = fs::read_to_string(path).map_err(|e| PoolscopeError::io(path, e))?;
        let config: Self = toml::from_str(&raw)?;
        Ok(config)
    }

    /// Default config location: `$POOLSCOPE_CONFIG`, else
    /// `~/.config/poolscope/config.toml`.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        if let Some(p) = env::var_os("POOLSCOPE_CONFIG") {
            return Some(PathBuf::from(p));
        }
        env::var_os("HOME").map(|home| {
            PathBuf::from(home)
                .join(".config")
                .join("poolscope")
                .join("config.toml")
        })
    }

    /// Apply `POOLSCOPE_*` env var overrides through an injectable lookup,
    /// keeping the override logic deterministic under test.
    pub fn apply_env_overrides(&mut self, get: impl Fn(&str) -> Option<String>) {
        if let Some(raw) = get("POOLSCOPE_REFRESH_MS") {
            match raw.parse::<u64>() {
                Ok(ms) => self.refresh_ms = ms,
                Err(_) => log::warn!("ignoring unparseable POOLSCOPE_REFRESH_MS={raw:?}"),
            }
        }
        if let Some(raw) = get("POOLSCOPE_SOURCE_FILE") {
            self.source_file = Some(PathBuf::from(raw));
        }
        if let Some(raw) = get("POOLSCOPE_NO_COLOR") {
            self.no_color = raw != "0" && !raw.eq_ignore_ascii_case("false");
        }
    }

    /// Reject configurations that cannot drive the event loop.
    pub fn validate(&self) -> Result<()> {
        if self.refresh_ms == 0 {
            return Err(PoolscopeError::InvalidConfig {
                details: "refresh_ms must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    /// Refresh interval as a [`Duration`].
    #[must_use]
    pub const fn refresh(&self) -> Duration {
        Duration::from_millis(self.refresh_ms)
    }
}
