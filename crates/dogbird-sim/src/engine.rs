//! Simulation engine: the core of the field.
//!
//! `SimulationEngine` owns the entity store, processes queued commands,
//! runs all systems, and produces `FieldSnapshot`s. Completely headless and
//! clock-free, enabling deterministic testing.

use std::collections::VecDeque;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use dogbird_core::commands::FieldCommand;
use dogbird_core::components::DogBirdId;
use dogbird_core::constants::{SHOUT_TEST_LOUDNESS, TICK_RATE};
use dogbird_core::enums::{Mode, SimPhase};
use dogbird_core::events::FieldEvent;
use dogbird_core::record::DogBirdRecord;
use dogbird_core::state::FieldSnapshot;
use dogbird_core::types::{DropTarget, FieldBounds, SimTime};

use crate::context::{sanitize_loudness, TickContext};
use crate::random::{RandomSource, SeededRandom};
use crate::store::{EntityStore, WorldStore};
use crate::systems;
use crate::systems::interaction::InteractionController;
use crate::systems::motion::MotionTuning;
use crate::world_setup::{self, HatchTuning};

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Ticks per simulated second; sets how far `elapsed_secs` moves per tick.
    pub tick_rate: u32,
    /// Field size until the first `SetBounds`.
    pub bounds: FieldBounds,
    pub drop_target: DropTarget,
    pub motion: MotionTuning,
    pub hatch: HatchTuning,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            tick_rate: TICK_RATE,
            bounds: FieldBounds::default(),
            drop_target: DropTarget::default(),
            motion: MotionTuning::default(),
            hatch: HatchTuning::default(),
        }
    }
}

/// The simulation engine. Owns the entity store and all sim state.
pub struct SimulationEngine<S: EntityStore = WorldStore, R: RandomSource = SeededRandom> {
    store: S,
    rng: R,
    time: SimTime,
    dt: f64,
    phase: SimPhase,
    motion: MotionTuning,
    hatch: HatchTuning,
    bounds: FieldBounds,
    loudness: f64,
    shout_ticks: u32,
    mode: Mode,
    goal: Option<String>,
    next_id: u64,
    interaction: InteractionController,
    command_queue: VecDeque<FieldCommand>,
    expired_buffer: Vec<DogBirdId>,
    events: Vec<FieldEvent>,
}

impl SimulationEngine {
    /// Create a new engine with an empty hecs-backed store and a seeded RNG.
    pub fn new(config: SimConfig) -> Self {
        let rng = SeededRandom::new(config.seed);
        Self::with_parts(config, WorldStore::new(), rng)
    }
}

impl<S: EntityStore, R: RandomSource> SimulationEngine<S, R> {
    /// Create an engine over a caller-supplied store and random source.
    pub fn with_parts(config: SimConfig, store: S, rng: R) -> Self {
        Self {
            store,
            rng,
            time: SimTime::default(),
            dt: SimTime::dt(config.tick_rate),
            phase: SimPhase::default(),
            motion: config.motion,
            hatch: config.hatch,
            bounds: FieldBounds::new(config.bounds.width, config.bounds.height),
            loudness: 0.0,
            shout_ticks: 0,
            mode: Mode::default(),
            goal: None,
            next_id: 0,
            interaction: InteractionController::new(DropTarget::new(
                config.drop_target.center,
                config.drop_target.radius,
            )),
            command_queue: VecDeque::new(),
            expired_buffer: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Queue a command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: FieldCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = FieldCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> FieldSnapshot {
        self.process_commands();

        let ctx = TickContext::sample(
            self.time.tick,
            self.effective_loudness(),
            self.bounds,
            self.motion.loudness_dead_zone,
        );

        if self.phase == SimPhase::Active {
            self.run_systems(&ctx);
            self.shout_ticks = self.shout_ticks.saturating_sub(1);
            self.time.advance(self.dt);
        }

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            &self.store,
            &self.time,
            self.phase,
            &ctx,
            self.goal.as_deref(),
            &self.interaction,
            events,
        )
    }

    /// Put saved dog-birds and the goal back into an engine.
    /// Returns how many dog-birds were restored.
    pub fn restore(
        &mut self,
        goal: Option<String>,
        records: impl IntoIterator<Item = DogBirdRecord>,
    ) -> usize {
        if let Some(goal) = goal.filter(|g| !g.trim().is_empty()) {
            self.goal = Some(goal);
        }
        let restored = world_setup::restore(&mut self.store, &mut self.next_id, records);
        info!("restored {restored} dog-bird(s)");
        restored
    }

    /// Get the current simulation phase.
    pub fn phase(&self) -> SimPhase {
        self.phase
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Field-wide mode as of the last active tick.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn goal(&self) -> Option<&str> {
        self.goal.as_deref()
    }

    pub fn bounds(&self) -> FieldBounds {
        self.bounds
    }

    /// Dog-bird currently following the pointer.
    pub fn drag_owner(&self) -> Option<DogBirdId> {
        self.interaction.owner()
    }

    /// Get a read-only reference to the entity store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Every live dog-bird, ordered by id.
    pub fn records(&self) -> Vec<DogBirdRecord> {
        self.store.all()
    }

    /// Process all queued commands in arrival order.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single command.
    fn handle_command(&mut self, command: FieldCommand) {
        match command {
            FieldCommand::SubmitNote { text } => {
                match world_setup::hatch(
                    &mut self.store,
                    &mut self.rng,
                    &mut self.next_id,
                    self.bounds,
                    &self.hatch,
                    &text,
                ) {
                    Some(id) => {
                        debug!("{id} hatched");
                        self.events.push(FieldEvent::Hatched { id });
                    }
                    None => debug!("blank note ignored"),
                }
            }
            FieldCommand::EditNote { id, text } => {
                if self.store.set_note(id, text) {
                    self.events.push(FieldEvent::NoteEdited { id });
                }
            }
            FieldCommand::Rename { id, name } => {
                if self.store.set_name(id, name) {
                    self.events.push(FieldEvent::Renamed { id });
                }
            }
            FieldCommand::SetGoal { text } => {
                if !text.trim().is_empty() {
                    self.goal = Some(text);
                }
            }
            FieldCommand::Gesture { gesture } => {
                self.interaction
                    .handle(gesture, &mut self.store, &mut self.events);
            }
            FieldCommand::SetLoudness { level } => {
                self.loudness = sanitize_loudness(level);
            }
            FieldCommand::Shout { ticks } => {
                self.shout_ticks = ticks;
            }
            FieldCommand::SetBounds { bounds } => {
                self.bounds = FieldBounds::new(bounds.width, bounds.height);
            }
            FieldCommand::SetDropTarget { center, radius } => {
                self.interaction
                    .set_drop_target(DropTarget::new(center, radius));
            }
            FieldCommand::Pause => {
                if self.phase == SimPhase::Active {
                    self.phase = SimPhase::Paused;
                }
            }
            FieldCommand::Resume => {
                if self.phase == SimPhase::Paused {
                    self.phase = SimPhase::Active;
                }
            }
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self, ctx: &TickContext) {
        if ctx.mode != self.mode {
            info!("field is now {:?} (loudness {:.3})", ctx.mode, ctx.loudness);
            self.mode = ctx.mode;
            self.events.push(FieldEvent::ModeChanged { mode: ctx.mode });
        }

        // 1. Motion (skips the drag owner)
        systems::motion::run(
            &mut self.store,
            ctx,
            &self.motion,
            &mut self.rng,
            self.interaction.owner(),
            &mut self.expired_buffer,
        );
        // 2. Cleanup (flown away)
        systems::cleanup::run(&mut self.store, &mut self.expired_buffer, &mut self.events);
    }

    fn effective_loudness(&self) -> f64 {
        if self.shout_ticks > 0 {
            self.loudness.max(SHOUT_TEST_LOUDNESS)
        } else {
            self.loudness
        }
    }
}
