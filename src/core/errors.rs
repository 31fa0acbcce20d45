//! PSC-prefixed error types with structured error codes.

#![allow(missing_docs)]

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Shared `Result` alias for the project.
pub type Result<T> = std::result::Result<T, PoolscopeError>;

/// Top-level error type for poolscope.
#[derive(Debug, Error)]
pub enum PoolscopeError {
    #[error("[PSC-1001] invalid configuration: {details}")]
    InvalidConfig { details: String },

    #[error("[PSC-1002] missing configuration file: {path}")]
    MissingConfig { path: PathBuf },

    #[error("[PSC-1003] configuration parse failure in {context}: {details}")]
    ConfigParse {
        context: &'static str,
        details: String,
    },

    #[error("[PSC-2001] serialization failure in {context}: {details}")]
    Serialization {
        context: &'static str,
        details: String,
    },

    #[error("[PSC-2002] pool data source failure: {details}")]
    Source { details: String },

    #[error("[PSC-3001] IO failure at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("[PSC-3002] channel closed in component {component}")]
    ChannelClosed { component: &'static str },

    #[error("[PSC-3900] runtime failure: {details}")]
    Runtime { details: String },
}

impl PoolscopeError {
    /// Stable machine-parseable error code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidConfig { .. } => "PSC-1001",
            Self::MissingConfig { .. } => "PSC-1002",
            Self::ConfigParse { .. } => "PSC-1003",
            Self::Serialization { .. } => "PSC-2001",
            Self::Source { .. } => "PSC-2002",
            Self::Io { .. } => "PSC-3001",
            Self::ChannelClosed { .. } => "PSC-3002",
            Self::Runtime { .. } => "PSC-3900",
        }
    }

    /// Whether retrying might resolve the failure.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Source { .. }
                | Self::Io { .. }
                | Self::ChannelClosed { .. }
                | Self::Runtime { .. }
        )
    }

    /// Convenience constructor for IO errors with a known path.
    #[must_use]
    pub fn io(path: impl AsRef<Path>, source: io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

impl From<serde_json::Error> for PoolscopeError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization {
            context: "serde_json",
            details: value.to_string(),
        }
    }
}

impl From<toml::de::Error> for PoolscopeError {
    fn from(value: toml::de::Error) -> Self {
        Self::ConfigParse {
            context: "toml",
            details: value.to_string(),
        }
    }
}
