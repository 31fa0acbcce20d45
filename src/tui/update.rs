//! Pure update function for the dashboard.
//!
//! `update()` takes the current model and a message, mutates the model,
//! and returns a command describing any side-effects the runtime should
//! execute. Every state transition goes through this function, keeping
//! the dashboard deterministic and testable.

use std::time::Instant;

use crate::tui::input::{self, InputAction};
use crate::tui::model::{DashboardCmd, DashboardModel, DashboardMsg};

/// Apply a message to the model and return the next command for the
/// runtime.
pub fn update(model: &mut DashboardModel, msg: DashboardMsg) -> DashboardCmd {
    match msg {
        DashboardMsg::Tick => {
            model.tick = model.tick.wrapping_add(1);
            let schedule = DashboardCmd::ScheduleTick(model.refresh);
            if model.fetch_in_flight {
                // One request in flight at a time; the tick only re-arms
                // the timer until the outstanding fetch answers.
                schedule
            } else {
                model.fetch_in_flight = true;
                DashboardCmd::Batch(vec![DashboardCmd::FetchPools, schedule])
            }
        }

        DashboardMsg::Key(key) => match input::resolve_key(&key) {
            Some(action) => apply_input_action(model, action),
            None => DashboardCmd::None,
        },

        DashboardMsg::Resize { cols, rows } => {
            model.terminal_size = (cols, rows);
            DashboardCmd::None
        }

        DashboardMsg::PoolsLoaded(result) => {
            model.fetch_in_flight = false;
            model.last_fetch = Some(Instant::now());
            match result {
                Ok(pools) => {
                    model.source_error = None;
                    model.refreshed_at =
                        Some(chrono::Local::now().format("%H:%M:%S").to_string());
                    model.apply_pools(pools);
                }
                Err(message) => {
                    // A failed fetch is reported, not collapsed into the
                    // empty-collection state; the last good topology stays
                    // on screen.
                    model.source_error = Some(message);
                }
            }
            DashboardCmd::None
        }
    }
}

fn apply_input_action(model: &mut DashboardModel, action: InputAction) -> DashboardCmd {
    match action {
        InputAction::Quit => {
            model.quit = true;
            DashboardCmd::Quit
        }
        InputAction::NextPool => {
            model.select_next_pool();
            DashboardCmd::None
        }
        InputAction::PrevPool => {
            model.select_prev_pool();
            DashboardCmd::None
        }
        InputAction::VDevDown => {
            model.navigate_vdev(1);
            DashboardCmd::None
        }
        InputAction::VDevUp => {
            model.navigate_vdev(-1);
            DashboardCmd::None
        }
        InputAction::ToggleExpanded => {
            model.toggle_expanded();
            DashboardCmd::None
        }
        InputAction::ForceRefresh => {
            if model.fetch_in_flight {
                DashboardCmd::None
            } else {
                model.fetch_in_flight = true;
                DashboardCmd::FetchPools
            }
        }
    }
}
