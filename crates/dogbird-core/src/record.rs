//! Flat record of a single dog-bird, as held by an entity store and persisted
//! by the journal.

use serde::{Deserialize, Serialize};

use crate::components::DogBirdId;
use crate::constants::DEFAULT_NAME;
use crate::enums::Mode;
use crate::types::Point;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DogBirdRecord {
    pub id: DogBirdId,
    #[serde(default = "default_name")]
    pub name: String,
    pub position: Point,
    /// Degrees, `[0, 360)`.
    pub heading: f64,
    pub speed: f64,
    pub size: f64,
    #[serde(default)]
    pub mode: Mode,
    pub note: String,
}

fn default_name() -> String {
    DEFAULT_NAME.to_string()
}
