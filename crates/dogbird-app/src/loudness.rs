//! Ambient loudness feed.
//!
//! The microphone side lives outside this crate; it publishes readings into
//! a [`LoudnessSource`] and the clock samples the latest one once per tick.
//! Readings are last-value-wins: nothing is queued between ticks.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Average power above this (dBFS) counts as shouting.
pub const SHOUT_POWER_THRESHOLD_DB: f64 = -8.0;

/// Floor of the meter's range (dBFS).
pub const METER_FLOOR_DB: f64 = -160.0;

pub trait LoudnessSource: Send + Sync {
    /// Latest normalized loudness, `>= 0`.
    fn current_loudness(&self) -> f64;
}

/// A room that is always quiet.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silence;

impl LoudnessSource for Silence {
    fn current_loudness(&self) -> f64 {
        0.0
    }
}

/// Lock-free latest-reading cell shared between the audio side and the clock.
#[derive(Debug, Clone, Default)]
pub struct SharedLoudness {
    bits: Arc<AtomicU64>,
}

impl SharedLoudness {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish a normalized reading. Negative and non-finite values store 0.
    pub fn publish(&self, level: f64) {
        let level = if level.is_finite() && level > 0.0 {
            level
        } else {
            0.0
        };
        self.bits.store(level.to_bits(), Ordering::Relaxed);
    }

    /// Publish a raw average-power meter reading in dBFS.
    pub fn publish_power(&self, power_db: f64) {
        self.publish(normalize_power(power_db));
    }
}

impl LoudnessSource for SharedLoudness {
    fn current_loudness(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::Relaxed))
    }
}

/// Map an average power reading (dBFS) to normalized loudness.
///
/// Anything at or below the shout threshold is silence; louder readings map
/// linearly from the meter floor, so a shout lands just under 1.0.
pub fn normalize_power(power_db: f64) -> f64 {
    if !power_db.is_finite() || power_db <= SHOUT_POWER_THRESHOLD_DB {
        return 0.0;
    }
    ((power_db - METER_FLOOR_DB) / -METER_FLOOR_DB).max(0.0)
}
