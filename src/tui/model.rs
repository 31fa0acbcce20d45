//! Elm-style state model for the pool dashboard.
//!
//! All display state lives in [`DashboardModel`]. Input and data events
//! arrive as [`DashboardMsg`] values; side-effects are represented as
//! [`DashboardCmd`] values returned from the update function.
//!
//! **Design invariant:** the model is deterministic and testable — no I/O
//! happens here.

use std::time::{Duration, Instant};

use crossterm::event::KeyEvent;

use crate::pool::types::Pool;
use crate::tui::flatten::{flatten, locate};

// ──────────────────── model ────────────────────

/// Complete display state for the dashboard.
///
/// The update function mutates it; the render function reads it
/// immutably. Selection bounds hold structurally: every transition goes
/// through the modulo/clamp paths below, so `selected_pool` can never
/// leave `0..pools.len()` while pools exist.
#[derive(Debug)]
pub struct DashboardModel {
    /// Current pool topology, replaced wholesale on every refresh.
    pub pools: Vec<Pool>,
    /// Index of the pool shown in the detail box. Meaningless at n == 0.
    pub selected_pool: usize,
    /// Name of the selected vdev within the current pool, if any.
    ///
    /// Selection is by name rather than index so it survives tree
    /// reshuffles across refreshes; navigation falls back to index 0 when
    /// the name has disappeared.
    pub selected_vdev: Option<String>,
    /// Detailed rendering (nested severity boxes, disk attributes) when
    /// true; compact tree lines when false.
    pub expanded: bool,
    /// Last data-source failure, shown distinctly from "no pools found".
    pub source_error: Option<String>,
    /// Whether a fetch has been dispatched and not yet answered. At most
    /// one fetch is in flight at a time.
    pub fetch_in_flight: bool,
    /// Instant of the last completed fetch (success or failure).
    pub last_fetch: Option<Instant>,
    /// Wall-clock label of the last successful refresh, e.g. `14:02:51`.
    pub refreshed_at: Option<String>,
    /// Terminal dimensions (columns, rows).
    pub terminal_size: (u16, u16),
    /// Configured refresh interval.
    pub refresh: Duration,
    /// Monotonic tick counter.
    pub tick: u64,
    /// Whether the user has requested quit.
    pub quit: bool,
}

impl DashboardModel {
    /// Create an empty model: no pools, no selection, nothing in flight.
    #[must_use]
    pub fn new(refresh: Duration, terminal_size: (u16, u16)) -> Self {
        Self {
            pools: Vec::new(),
            selected_pool: 0,
            selected_vdev: None,
            expanded: false,
            source_error: None,
            fetch_in_flight: false,
            last_fetch: None,
            refreshed_at: None,
            terminal_size,
            refresh,
            tick: 0,
            quit: false,
        }
    }

    /// Number of pools currently held.
    #[must_use]
    pub fn pool_count(&self) -> usize {
        self.pools.len()
    }

    /// The currently selected pool, if any pools exist.
    #[must_use]
    pub fn current_pool(&self) -> Option<&Pool> {
        self.pools.get(self.selected_pool)
    }

    // ── Pool selection ──

    /// Advance to the next pool, wrapping at the end. No-op when empty.
    ///
    /// VDev selection does not carry across pools: names are only
    /// guaranteed unique within one pool.
    pub fn select_next_pool(&mut self) {
        let n = self.pools.len();
        if n == 0 {
            return;
        }
        self.selected_pool = (self.selected_pool + 1) % n;
        self.selected_vdev = None;
    }

    /// Step back to the previous pool, wrapping at the front. No-op when
    /// empty. Resets the vdev selection like [`Self::select_next_pool`].
    pub fn select_prev_pool(&mut self) {
        let n = self.pools.len();
        if n == 0 {
            return;
        }
        self.selected_pool = (self.selected_pool + n - 1) % n;
        self.selected_vdev = None;
    }

    // ── VDev navigation ──

    /// Move the vdev selection through the flattened traversal of the
    /// current pool.
    ///
    /// The list is re-derived from the live tree on every call. A missing
    /// or vanished selection resets to index 0 (the explicit fallback
    /// transition); otherwise the cursor moves by `direction` with
    /// wraparound. Empty list: no-op.
    #[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
    pub fn navigate_vdev(&mut self, direction: isize) {
        let Some(pool) = self.pools.get(self.selected_pool) else {
            return;
        };
        let flat = flatten(pool);
        if flat.is_empty() {
            return;
        }
        let next = match self.selected_vdev.as_deref().and_then(|name| locate(&flat, name)) {
            Some(index) => {
                let len = flat.len() as isize;
                ((index as isize + direction).rem_euclid(len)) as usize
            }
            None => 0,
        };
        self.selected_vdev = Some(flat[next].name.clone());
    }

    /// Flip compact/detailed rendering. Never changes which vdev is
    /// selected.
    pub fn toggle_expanded(&mut self) {
        self.expanded = !self.expanded;
    }

    // ── Data lifecycle ──

    /// Replace the pool topology wholesale after a refresh.
    ///
    /// The pool selection index is preserved but clamped to the new
    /// bounds. The vdev selection name is kept as-is; navigation resolves
    /// a vanished name to index 0 on its next step.
    pub fn apply_pools(&mut self, pools: Vec<Pool>) {
        self.pools = pools;
        if self.pools.is_empty() {
            self.selected_pool = 0;
        } else if self.selected_pool >= self.pools.len() {
            self.selected_pool = self.pools.len() - 1;
        }
    }
}

// ──────────────────── messages ────────────────────

/// Events that drive state transitions in the dashboard model.
///
/// All inputs, including data-fetch completions, arrive through one
/// serial stream; no two messages are ever handled concurrently.
#[derive(Debug, Clone)]
pub enum DashboardMsg {
    /// Periodic timer tick: triggers a data refresh and re-render.
    Tick,
    /// Terminal key press event.
    Key(KeyEvent),
    /// Terminal was resized.
    Resize {
        /// New width in columns.
        cols: u16,
        /// New height in rows.
        rows: u16,
    },
    /// A fetch completed: the new topology, or a failure message that the
    /// renderer must surface distinctly from an empty collection.
    PoolsLoaded(Result<Vec<Pool>, String>),
}

// ──────────────────── commands ────────────────────

/// Side-effects returned by the update function for the runtime to
/// execute. The update function never performs I/O directly.
#[derive(Debug, PartialEq, Eq)]
pub enum DashboardCmd {
    /// No side-effect.
    None,
    /// Dispatch a pool fetch and deliver a `PoolsLoaded` message.
    FetchPools,
    /// Schedule the next tick after the given duration.
    ScheduleTick(Duration),
    /// Terminate the dashboard event loop.
    Quit,
    /// Execute multiple commands.
    Batch(Vec<Self>),
}

// ──────────────────── tests ────────────────────
