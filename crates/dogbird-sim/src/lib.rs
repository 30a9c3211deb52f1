//! Simulation engine for the dog-bird field.
//!
//! Owns the entity store, runs systems once per tick, and produces
//! `FieldSnapshot`s for the renderer. Wall-clock time never enters here;
//! the caller decides when to tick.

pub mod context;
pub mod engine;
pub mod random;
pub mod store;
pub mod systems;
pub mod world_setup;

pub use dogbird_core as core;
pub use engine::{SimConfig, SimulationEngine};

#[cfg(test)]
mod tests;
