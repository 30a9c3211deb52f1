//! ECS components for hecs entities.
//!
//! Components are plain data structs with no behaviour beyond accessors.
//! Game logic lives in systems, not components. Position is stored as a
//! bare [`Point`](crate::types::Point) and mode as [`Mode`](crate::enums::Mode).

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identifier of a dog-bird, assigned at hatch and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DogBirdId(pub u64);

/// Direction of travel in degrees, `[0, 360)`. 0 points along +x, 90 along +y.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Heading(pub f64);

/// Wandering speed in points per tick. Fixed at hatch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Speed(pub f64);

/// Sprite size in points. Fixed at hatch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size(pub f64);

/// Display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Name(pub String);

/// The failure note this dog-bird hatched from. The simulation never reads it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureNote {
    pub text: String,
}

impl fmt::Display for DogBirdId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "dog-bird #{}", self.0)
    }
}
