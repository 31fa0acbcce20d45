//! Pool data acquisition seam.
//!
//! The dashboard core never talks to a real system; it consumes a
//! [`PoolSource`] that yields the §3 data shape. [`MockPoolSource`]
//! provides a fixed two-pool topology for development, and
//! [`JsonPoolSource`] reads the same shape from a JSON file, so a real
//! collection subsystem can be swapped in without touching the core.

use std::fs;
use std::path::PathBuf;

use crate::core::errors::{PoolscopeError, Result};
use crate::pool::types::{DeviceKind, Pool, Severity, VDev};

/// Synchronous provider of the current pool topology.
///
/// A fetch failure is a distinct, reportable condition; callers must not
/// collapse it into an empty pool collection.
pub trait PoolSource: Send + Sync {
    /// Return the current set of pools.
    fn fetch(&self) -> Result<Vec<Pool>>;

    /// Short human-readable description for the status line.
    fn describe(&self) -> String;
}

/// Fixed development topology: a degraded mirror pool and a pool with
/// cache and a faulted slog mirror.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockPoolSource;

impl PoolSource for MockPoolSource {
    fn fetch(&self) -> Result<Vec<Pool>> {
        Ok(mock_pools())
    }

    fn describe(&self) -> String {
        "mock data".to_string()
    }
}

/// Reads a pool topology from a JSON file on every fetch.
#[derive(Debug, Clone)]
pub struct JsonPoolSource {
    path: PathBuf,
}

impl JsonPoolSource {
    /// Create a source backed by the given file.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PoolSource for JsonPoolSource {
    fn fetch(&self) -> Result<Vec<Pool>> {
        let raw = fs::read_to_string(&self.path).map_err(|e| {
            log::warn!("pool topology read failed at {}: {e}", self.path.display());
            PoolscopeError::io(&self.path, e)
        })?;
        let pools: Vec<Pool> = serde_json::from_str(&raw).map_err(|e| {
            log::warn!("pool topology parse failed at {}: {e}", self.path.display());
            PoolscopeError::Source {
                details: format!("{}: {e}", self.path.display()),
            }
        })?;
        log::debug!(
            "loaded {} pool(s) from {}",
            pools.len(),
            self.path.display()
        );
        Ok(pools)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// The fixed development topology served by [`MockPoolSource`].
#[must_use]
pub fn mock_pools() -> Vec<Pool> {
    vec![
        Pool {
            name: "testpool".to_string(),
            status: Severity::Online,
            root: VDev::group(
                "testpool",
                DeviceKind::Mirror,
                Severity::Online,
                vec![
                    VDev::leaf("sda", DeviceKind::Disk, Severity::Degraded),
                    VDev::leaf("sdb", DeviceKind::Disk, Severity::Online),
                ],
            ),
            cache: None,
            slog: None,
        },
        Pool {
            name: "fastpool".to_string(),
            status: Severity::Online,
            root: VDev::group(
                "fastpool",
                DeviceKind::Mirror,
                Severity::Online,
                vec![
                    VDev::leaf("sda1", DeviceKind::Disk, Severity::Online),
                    VDev::leaf("sdb1", DeviceKind::Disk, Severity::Online),
                ],
            ),
            cache: Some(VDev::group(
                "cache",
                DeviceKind::Cache,
                Severity::Online,
                vec![VDev::leaf("nvme0n1p1", DeviceKind::Disk, Severity::Online)],
            )),
            // Faulted mirror over healthy legs: the composite's own state
            // dominates the rollup.
            slog: Some(VDev::group(
                "log",
                DeviceKind::Mirror,
                Severity::Faulted,
                vec![
                    VDev::leaf("nvme1n1p1", DeviceKind::Disk, Severity::Online),
                    VDev::leaf("nvme1n2p1", DeviceKind::Disk, Severity::Online),
                ],
            )),
        },
    ]
}
