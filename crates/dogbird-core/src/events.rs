//! Events emitted by the simulation for UI feedback.

use serde::{Deserialize, Serialize};

use crate::components::DogBirdId;
use crate::enums::Mode;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum FieldEvent {
    /// A note was submitted and a dog-bird hatched.
    Hatched { id: DogBirdId },
    /// Note text was replaced.
    NoteEdited { id: DogBirdId },
    /// Display name was replaced.
    Renamed { id: DogBirdId },
    /// The field-wide mode flipped.
    ModeChanged { mode: Mode },
    /// A fleeing dog-bird left the field and was removed.
    FlewAway { id: DogBirdId },
    /// A dog-bird was dropped on the drop target and removed.
    Trashed { id: DogBirdId },
    /// A dog-bird was tapped; open its note for editing.
    Selected { id: DogBirdId },
    DragStarted { id: DogBirdId },
    /// Drag ended away from the drop target.
    DragReleased { id: DogBirdId },
}
