//! Control surface for the simulation clock.
//!
//! Callers (the CLI, or an embedding UI) go through these functions rather
//! than touching the channel directly. They bridge requests to the clock
//! thread and read back the latest snapshot.

use std::sync::Arc;

use log::info;

use dogbird_core::commands::FieldCommand;
use dogbird_core::state::FieldSnapshot;

use crate::config::AppConfig;
use crate::error::AppError;
use crate::game_loop;
use crate::journal::Journal;
use crate::loudness::LoudnessSource;
use crate::state::{AppState, ClockCommand};

/// Start the simulation. Spawns the clock thread if not already running.
pub fn start_simulation(
    state: &AppState,
    config: &AppConfig,
    journal: Journal,
    loudness: Arc<dyn LoudnessSource>,
) -> Result<(), AppError> {
    let mut running = state.running.lock()?;
    if *running {
        return Err(AppError::AlreadyRunning);
    }

    let handle = game_loop::spawn_simulation_clock(
        config,
        journal,
        loudness,
        state.latest_snapshot.clone(),
    )?;

    *state.command_tx.lock()? = Some(handle.commands);
    *state.clock_thread.lock()? = Some(handle.thread);
    *running = true;
    Ok(())
}

/// Send a command to the simulation. It takes effect at the next tick.
pub fn send_command(state: &AppState, command: FieldCommand) -> Result<(), AppError> {
    let tx_lock = state.command_tx.lock()?;
    match tx_lock.as_ref() {
        Some(tx) => tx
            .send(ClockCommand::Field(command))
            .map_err(|_| AppError::ClockStopped),
        None => Err(AppError::NotStarted),
    }
}

/// Get the latest snapshot, if the clock has ticked at least once.
pub fn get_snapshot(state: &AppState) -> Result<Option<FieldSnapshot>, AppError> {
    let lock = state.latest_snapshot.lock()?;
    Ok(lock.clone())
}

/// Stop the clock and hand back the journal it was holding.
pub fn stop_simulation(state: &AppState) -> Result<Journal, AppError> {
    let mut running = state.running.lock()?;
    if !*running {
        return Err(AppError::NotStarted);
    }

    if let Some(tx) = state.command_tx.lock()?.take() {
        // A send error means the thread is already gone; join still reports it.
        let _ = tx.send(ClockCommand::Shutdown);
    }
    let thread = state.clock_thread.lock()?.take().ok_or(AppError::NotStarted)?;
    *running = false;

    let journal = thread.join().map_err(|_| AppError::ClockStopped)?;
    info!("clock joined with {} dog-bird(s)", journal.dog_birds.len());
    Ok(journal)
}
