//! Simulation clock: runs the engine at a fixed rate on its own thread.
//!
//! This is the only place wall-clock time touches the simulation. The engine
//! is created inside the thread. Commands arrive via an `mpsc` channel and are
//! drained at the start of every tick; the loudness source is sampled once per
//! tick right after. Snapshots are stored in shared state for polling.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use log::{info, warn};

use dogbird_core::commands::FieldCommand;
use dogbird_core::state::FieldSnapshot;
use dogbird_sim::engine::{SimConfig, SimulationEngine};

use crate::config::AppConfig;
use crate::error::AppError;
use crate::journal::Journal;
use crate::loudness::LoudnessSource;
use crate::state::ClockCommand;

/// Duration of one tick at the given rate. A zero rate is treated as 1 Hz.
pub fn tick_interval(tick_rate: u32) -> Duration {
    Duration::from_nanos(1_000_000_000 / u64::from(tick_rate.max(1)))
}

/// Handle to a running clock thread.
pub struct ClockHandle {
    pub commands: mpsc::Sender<ClockCommand>,
    pub thread: JoinHandle<Journal>,
}

/// Spawns the simulation clock in a new thread, seeded with `journal`.
pub fn spawn_simulation_clock(
    config: &AppConfig,
    journal: Journal,
    loudness: Arc<dyn LoudnessSource>,
    latest_snapshot: Arc<Mutex<Option<FieldSnapshot>>>,
) -> Result<ClockHandle, AppError> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<ClockCommand>();
    let sim_config = SimConfig {
        tick_rate: config.tick_rate,
        ..config.sim.clone()
    };
    let interval = tick_interval(config.tick_rate);

    let thread = std::thread::Builder::new()
        .name("dogbird-clock".into())
        .spawn(move || {
            let mut engine = SimulationEngine::new(sim_config);
            engine.restore(journal.goal, journal.dog_birds);
            run_clock(&mut engine, cmd_rx, loudness.as_ref(), &latest_snapshot, interval);
            Journal::new(engine.goal().map(str::to_owned), engine.records())
        })
        .map_err(AppError::Spawn)?;

    Ok(ClockHandle {
        commands: cmd_tx,
        thread,
    })
}

/// Sample the loudness source and advance the engine by one tick.
pub fn advance(engine: &mut SimulationEngine, loudness: &dyn LoudnessSource) -> FieldSnapshot {
    engine.queue_command(FieldCommand::SetLoudness {
        level: loudness.current_loudness(),
    });
    engine.tick()
}

/// The clock loop. Runs until a Shutdown command or channel disconnect.
fn run_clock(
    engine: &mut SimulationEngine,
    cmd_rx: mpsc::Receiver<ClockCommand>,
    loudness: &dyn LoudnessSource,
    latest_snapshot: &Mutex<Option<FieldSnapshot>>,
    interval: Duration,
) {
    info!("simulation clock started ({interval:?} per tick)");
    let mut next_tick_time = Instant::now();

    loop {
        // 1. Drain all pending commands
        let mut queued = false;
        loop {
            match cmd_rx.try_recv() {
                Ok(ClockCommand::Field(cmd)) => {
                    engine.queue_command(cmd);
                    queued = true;
                }
                Ok(ClockCommand::Shutdown) | Err(mpsc::TryRecvError::Disconnected) => {
                    // Commands sent ahead of the shutdown still land in the journal
                    if queued {
                        publish(latest_snapshot, engine.tick());
                    }
                    info!("simulation clock stopped at tick {}", engine.time().tick);
                    return;
                }
                Err(mpsc::TryRecvError::Empty) => break,
            }
        }

        // 2. Sample loudness and advance one tick
        let snapshot = advance(engine, loudness);

        // 3. Store latest snapshot for polling
        publish(latest_snapshot, snapshot);

        // 4. Sleep until next tick
        next_tick_time += interval;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > interval * 2 {
            // Too far behind: reset instead of bursting to catch up
            warn!(
                "simulation clock fell {:?} behind, resetting",
                now - next_tick_time
            );
            next_tick_time = now;
        }
    }
}

fn publish(latest_snapshot: &Mutex<Option<FieldSnapshot>>, snapshot: FieldSnapshot) {
    if let Ok(mut lock) = latest_snapshot.lock() {
        *lock = Some(snapshot);
    }
}
