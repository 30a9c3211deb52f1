//! Commands sent from the outside world to the simulation.
//!
//! Commands are queued and processed in arrival order at the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::components::DogBirdId;
use crate::types::{FieldBounds, Point};

/// All possible inputs to the field.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum FieldCommand {
    // --- Journal ---
    /// Hatch a dog-bird from a failure note. Blank notes are ignored.
    SubmitNote { text: String },
    /// Replace the note text of a live dog-bird.
    EditNote { id: DogBirdId, text: String },
    /// Rename a live dog-bird.
    Rename { id: DogBirdId, name: String },
    /// Set the goal shown above the field. Blank text keeps the old goal.
    SetGoal { text: String },

    // --- Pointer ---
    /// A pointer gesture from the gesture layer.
    Gesture { gesture: Gesture },

    // --- Environment ---
    /// Latest normalized ambient loudness reading.
    SetLoudness { level: f64 },
    /// Pretend the room is loud for the given number of ticks.
    Shout { ticks: u32 },
    /// The field was resized (rotation, window resize).
    SetBounds { bounds: FieldBounds },
    /// Move or resize the drop target.
    SetDropTarget { center: Point, radius: f64 },

    // --- Simulation control ---
    /// Freeze time and motion.
    Pause,
    /// Unfreeze time and motion.
    Resume,
}

/// Pointer gestures. At most one gesture stream is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Gesture {
    /// Pointer went down on a dog-bird and started dragging.
    Start { id: DogBirdId, point: Point },
    /// Pointer moved while dragging.
    Move { point: Point },
    /// Pointer lifted.
    End { point: Point },
    /// Short press with negligible movement on a dog-bird.
    Tap { id: DogBirdId },
}
