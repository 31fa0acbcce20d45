#![forbid(unsafe_code)]

//! poolscope — terminal dashboard for hierarchical storage pool health.
//!
//! Pools own a tree of virtual devices (mirrors, RAID groups, caches,
//! logs) which in turn contain physical disks. The engine here:
//! 1. **Aggregation** — computes, for any node, the worst health state
//!    found anywhere beneath it
//! 2. **Navigation** — maintains a flattened, order-stable traversal with
//!    selection and expansion state
//! 3. **Rendering** — produces severity-keyed display text, one frame per
//!    input event
//!
//! # Library usage
//!
//! Use the [`prelude`] for convenient access to the most common types:
//!
//! ```rust,no_run
//! use poolscope::prelude::*;
//! ```
//!
//! Individual modules can also be imported directly:
//!
//! ```rust,no_run
//! use poolscope::pool::status::pool_worst_status;
//! use poolscope::pool::source::{MockPoolSource, PoolSource};
//! ```

pub mod prelude;

pub mod core;
pub mod pool;
#[cfg(feature = "tui")]
pub mod tui;
