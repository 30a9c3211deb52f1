//! Field snapshot: the complete visible state handed to the renderer each tick.

use serde::{Deserialize, Serialize};

use crate::components::DogBirdId;
use crate::enums::{Mode, SimPhase};
use crate::events::FieldEvent;
use crate::types::{FieldBounds, Point, SimTime};

/// Complete field state produced after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FieldSnapshot {
    pub time: SimTime,
    pub phase: SimPhase,
    /// Field-wide mode for this tick.
    pub mode: Mode,
    /// Loudness the tick ran with (after any test shout override).
    pub loudness: f64,
    pub bounds: FieldBounds,
    pub goal: Option<String>,
    pub dog_birds: Vec<DogBirdView>,
    pub drop_target: DropTargetView,
    /// Dog-bird currently following the pointer, if any.
    pub dragging: Option<DogBirdId>,
    pub events: Vec<FieldEvent>,
}

/// A dog-bird as the renderer sees it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DogBirdView {
    pub id: DogBirdId,
    pub name: String,
    pub position: Point,
    pub heading: f64,
    pub speed: f64,
    pub size: f64,
    pub mode: Mode,
    pub dragged: bool,
    pub note: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DropTargetView {
    pub center: Point,
    pub radius: f64,
    /// The dragged dog-bird is hovering over the target.
    pub highlighted: bool,
}
