//! Per-tick snapshot of the external inputs.
//!
//! Loudness and field bounds may change at any time between ticks. They are
//! read exactly once at the start of a tick into a [`TickContext`] that every
//! system receives, so no system sees a torn mix of old and new values.

use dogbird_core::enums::Mode;
use dogbird_core::types::FieldBounds;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickContext {
    pub tick: u64,
    /// Normalized loudness, already sanitized to `>= 0`.
    pub loudness: f64,
    pub bounds: FieldBounds,
    /// Field-wide mode derived from `loudness`.
    pub mode: Mode,
}

impl TickContext {
    pub fn sample(tick: u64, loudness: f64, bounds: FieldBounds, dead_zone: f64) -> Self {
        let loudness = sanitize_loudness(loudness);
        Self {
            tick,
            loudness,
            bounds,
            mode: select_mode(loudness, dead_zone),
        }
    }
}

/// Loud means strictly above the dead zone. Not sticky: silence brings
/// every dog-bird back to wandering on the next tick.
pub fn select_mode(loudness: f64, dead_zone: f64) -> Mode {
    if loudness > dead_zone {
        Mode::Fleeing
    } else {
        Mode::Wandering
    }
}

/// Negative and non-finite readings are treated as silence.
pub fn sanitize_loudness(level: f64) -> f64 {
    if level.is_finite() && level > 0.0 {
        level
    } else {
        0.0
    }
}
