//! Serial event-loop runtime for the dashboard.
//!
//! One `crossbeam-channel` stream carries every input: key presses and
//! resizes from the input thread, timer ticks, and fetch completions.
//! Messages are handled strictly one at a time; a new immutable frame is
//! produced before the next message is processed. Fetches run on a worker
//! thread but there is never more than one in flight, and a fetch that
//! never answers simply leaves the last frame (or "no pools found") on
//! screen — there is no cancellation and no timeout.

use std::io::{self, Write};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, unbounded};
use crossterm::cursor::MoveTo;
use crossterm::event::{self, Event};
use crossterm::queue;
use crossterm::terminal::{Clear, ClearType};

use crate::core::errors::{PoolscopeError, Result};
use crate::pool::source::PoolSource;
use crate::tui::model::{DashboardCmd, DashboardModel, DashboardMsg};
use crate::tui::render::render;
use crate::tui::terminal_guard::TerminalGuard;
use crate::tui::theme::Theme;
use crate::tui::update::update;

/// How long the input thread waits for a terminal event per poll.
const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Runtime configuration for a dashboard session.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Interval between automatic refreshes.
    pub refresh: Duration,
    /// Color theme for rendered frames.
    pub theme: Theme,
}

/// Run the dashboard until the user quits.
pub fn run_dashboard(source: Arc<dyn PoolSource>, config: &RuntimeConfig) -> Result<()> {
    let _guard = TerminalGuard::new().map_err(|e| PoolscopeError::Runtime {
        details: format!("terminal setup failed: {e}"),
    })?;

    let mut model = DashboardModel::new(config.refresh, TerminalGuard::terminal_size());

    let (tx, rx) = unbounded::<DashboardMsg>();
    let shutdown = Arc::new(AtomicBool::new(false));
    let input_handle = spawn_input_thread(tx.clone(), Arc::clone(&shutdown));

    let mut stdout = io::stdout();
    let mut next_tick = Instant::now();

    log::debug!("dashboard started, refresh {:?}", config.refresh);
    while !model.quit {
        let msg = next_message(&rx, next_tick)?;
        let cmd = update(&mut model, msg);
        execute_cmd(cmd, &source, &tx, &mut next_tick);
        draw(&mut stdout, &model, &config.theme).map_err(|e| PoolscopeError::Runtime {
            details: format!("frame write failed: {e}"),
        })?;
    }

    shutdown.store(true, Ordering::SeqCst);
    let _ = input_handle.join();
    log::debug!("dashboard stopped");
    Ok(())
}

/// Block until the next message: whatever arrives on the stream first, or
/// a timer tick once the deadline passes.
fn next_message(rx: &Receiver<DashboardMsg>, next_tick: Instant) -> Result<DashboardMsg> {
    let now = Instant::now();
    if now >= next_tick {
        return Ok(DashboardMsg::Tick);
    }
    match rx.recv_timeout(next_tick - now) {
        Ok(msg) => Ok(msg),
        Err(RecvTimeoutError::Timeout) => Ok(DashboardMsg::Tick),
        Err(RecvTimeoutError::Disconnected) => Err(PoolscopeError::ChannelClosed {
            component: "event stream",
        }),
    }
}

/// Execute a command returned by the update function.
fn execute_cmd(
    cmd: DashboardCmd,
    source: &Arc<dyn PoolSource>,
    tx: &Sender<DashboardMsg>,
    next_tick: &mut Instant,
) {
    match cmd {
        DashboardCmd::None | DashboardCmd::Quit => {}
        DashboardCmd::FetchPools => spawn_fetch(Arc::clone(source), tx.clone()),
        DashboardCmd::ScheduleTick(after) => *next_tick = Instant::now() + after,
        DashboardCmd::Batch(cmds) => {
            for inner in cmds {
                execute_cmd(inner, source, tx, next_tick);
            }
        }
    }
}

/// Dispatch a fetch on a worker thread; the completion re-enters the
/// serial stream as a `PoolsLoaded` message.
fn spawn_fetch(source: Arc<dyn PoolSource>, tx: Sender<DashboardMsg>) {
    thread::spawn(move || {
        let result = source.fetch().map_err(|e| {
            log::warn!("pool fetch failed: {e}");
            e.to_string()
        });
        // The receiver is gone only during shutdown; nothing to report.
        let _ = tx.send(DashboardMsg::PoolsLoaded(result));
    });
}

fn spawn_input_thread(
    tx: Sender<DashboardMsg>,
    shutdown: Arc<AtomicBool>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        while !shutdown.load(Ordering::SeqCst) {
            match event::poll(INPUT_POLL_INTERVAL) {
                Ok(false) => {}
                Ok(true) => match event::read() {
                    Ok(Event::Key(key)) => {
                        if tx.send(DashboardMsg::Key(key)).is_err() {
                            break;
                        }
                    }
                    Ok(Event::Resize(cols, rows)) => {
                        if tx.send(DashboardMsg::Resize { cols, rows }).is_err() {
                            break;
                        }
                    }
                    Ok(_) => {}
                    Err(_) => break,
                },
                Err(_) => break,
            }
        }
    })
}

/// Write one frame to the viewport. Raw mode requires explicit `\r\n`
/// line endings.
fn draw(stdout: &mut io::Stdout, model: &DashboardModel, theme: &Theme) -> io::Result<()> {
    queue!(stdout, MoveTo(0, 0), Clear(ClearType::All))?;
    for line in render(model, theme).lines() {
        write!(stdout, "{line}\r\n")?;
    }
    stdout.flush()
}
