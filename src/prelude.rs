//! Convenience re-exports for library consumers.
//!
//! ```rust,no_run
//! use poolscope::prelude::*;
//! ```

// Core
pub use crate::core::config::Config;
pub use crate::core::errors::{PoolscopeError, Result};

// Pool topology
pub use crate::pool::source::{JsonPoolSource, MockPoolSource, PoolSource, mock_pools};
pub use crate::pool::status::{pool_worst_status, vdev_worst_status};
pub use crate::pool::types::{DeviceKind, Disk, Pool, Severity, VDev};

// Dashboard
#[cfg(feature = "tui")]
pub use crate::tui::flatten::{flatten, locate};
#[cfg(feature = "tui")]
pub use crate::tui::model::{DashboardCmd, DashboardModel, DashboardMsg};
#[cfg(feature = "tui")]
pub use crate::tui::render::render;
#[cfg(feature = "tui")]
pub use crate::tui::theme::Theme;
#[cfg(feature = "tui")]
pub use crate::tui::update::update;
#[cfg(feature = "tui")]
pub use crate::tui::{RuntimeConfig, run_dashboard};
