//! Application state shared between the control functions and the clock thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use dogbird_core::commands::FieldCommand;
use dogbird_core::state::FieldSnapshot;

use crate::journal::Journal;

/// Commands sent from the control layer to the clock thread.
#[derive(Debug)]
pub enum ClockCommand {
    /// A command to forward to the simulation engine.
    Field(FieldCommand),
    /// Stop the clock; the thread returns the final journal.
    Shutdown,
}

/// Shared application state.
///
/// - `mpsc::Sender` is wrapped in `Mutex` (Sender is Send but not Sync)
/// - `Mutex<Option<...>>` holds state that does not exist before start
/// - `Arc<Mutex<...>>` shares the latest snapshot with the clock thread
pub struct AppState {
    /// Channel sender to forward commands to the clock thread.
    /// `None` before `start_simulation` is called.
    pub command_tx: Mutex<Option<mpsc::Sender<ClockCommand>>>,
    /// Latest snapshot for synchronous `get_snapshot` queries.
    /// Updated by the clock thread after each tick.
    pub latest_snapshot: Arc<Mutex<Option<FieldSnapshot>>>,
    /// Join handle of the clock thread, taken on stop.
    pub clock_thread: Mutex<Option<JoinHandle<Journal>>>,
    /// Whether the clock is currently running.
    pub running: Mutex<bool>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            command_tx: Mutex::new(None),
            latest_snapshot: Arc::new(Mutex::new(None)),
            clock_thread: Mutex::new(None),
            running: Mutex::new(false),
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}
