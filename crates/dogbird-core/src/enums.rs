//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Locomotion mode of a dog-bird.
///
/// Derived from ambient loudness every tick; the stored value is a cache
/// for rendering, not a source of truth.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    /// Roams inside the field, bouncing off the walls.
    #[default]
    Wandering,
    /// Climbs off the top of the field.
    Fleeing,
}

/// Per-entity drag state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DragPhase {
    #[default]
    Idle,
    /// Position follows the pointer instead of the motion engine.
    Dragging,
}

/// Simulation phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimPhase {
    #[default]
    Active,
    /// Time and motion are frozen; gestures are still handled.
    Paused,
}
