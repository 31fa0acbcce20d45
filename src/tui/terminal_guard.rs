//! RAII terminal lifecycle guard backed by crossterm.
//!
//! [`TerminalGuard`] enters raw mode and the alternate screen on
//! construction, and restores the terminal on [`Drop`], even during
//! panics or early error returns. A custom panic hook restores the
//! terminal *before* the default panic message is printed, so the
//! backtrace is readable on a normal terminal.

use std::io::{self, Write};
use std::panic;
use std::sync::atomic::{AtomicBool, Ordering};

use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};

/// Global flag indicating raw mode is active. Checked by the panic hook
/// to decide whether terminal restoration is needed.
static RAW_MODE_ACTIVE: AtomicBool = AtomicBool::new(false);

/// RAII guard that manages the terminal lifecycle.
pub struct TerminalGuard {
    hook_installed: bool,
}

impl TerminalGuard {
    /// Enter raw mode and the alternate screen, installing a panic-safe
    /// cleanup hook.
    ///
    /// # Errors
    /// Returns I/O errors if terminal setup fails; raw mode is rolled
    /// back on partial failure.
    pub fn new() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen, Hide) {
            let _ = terminal::disable_raw_mode();
            return Err(e);
        }
        RAW_MODE_ACTIVE.store(true, Ordering::SeqCst);

        let prev = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            restore_terminal_best_effort();
            prev(info);
        }));

        Ok(Self {
            hook_installed: true,
        })
    }

    /// Terminal dimensions (columns, rows), falling back to 80x24 when no
    /// tty is attached.
    #[must_use]
    pub fn terminal_size() -> (u16, u16) {
        terminal::size().unwrap_or((80, 24))
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        restore_terminal_best_effort();

        if self.hook_installed {
            // The previous hook was moved into the closure; reset to the
            // default. The guard's lifetime brackets all TUI usage.
            let _ = panic::take_hook();
        }
    }
}

/// Best-effort terminal restoration. Safe to call multiple times; the
/// atomic flag avoids redundant work.
fn restore_terminal_best_effort() {
    if RAW_MODE_ACTIVE.swap(false, Ordering::SeqCst) {
        let mut stdout = io::stdout();
        let _ = execute!(stdout, LeaveAlternateScreen, Show);
        let _ = terminal::disable_raw_mode();
        let _ = stdout.flush();
    }
}
