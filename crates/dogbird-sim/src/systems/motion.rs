//! Motion engine: wander and flee kinematics.
//!
//! Each dog-bird's new state depends only on its own previous state and the
//! shared [`TickContext`], so records are processed independently and update
//! order does not matter. The pure step is separate from the store plumbing
//! so it can be tested without a world.

use log::debug;
use serde::{Deserialize, Serialize};

use dogbird_core::components::DogBirdId;
use dogbird_core::constants::*;
use dogbird_core::enums::Mode;
use dogbird_core::record::DogBirdRecord;
use dogbird_core::types::{normalize_degrees, Point};

use crate::context::TickContext;
use crate::random::RandomSource;
use crate::store::EntityStore;

/// Kinematic tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionTuning {
    /// Inset from each edge that wandering dog-birds bounce off.
    pub wall_margin: f64,
    /// Probability per tick of a random heading change while wandering.
    pub random_turn_chance: f64,
    /// Climb rate at any audible level (points per tick).
    pub flee_base_speed: f64,
    /// Extra climb per unit of loudness (points per tick).
    pub flee_loudness_gain: f64,
    /// Maximum sideways wobble per tick while fleeing.
    pub flee_jitter: f64,
    /// y below which a fleeing dog-bird has left the field.
    pub exit_threshold_y: f64,
    /// Loudness at or below this counts as silence.
    pub loudness_dead_zone: f64,
}

impl Default for MotionTuning {
    fn default() -> Self {
        Self {
            wall_margin: WALL_MARGIN,
            random_turn_chance: RANDOM_TURN_CHANCE,
            flee_base_speed: FLEE_BASE_SPEED,
            flee_loudness_gain: FLEE_LOUDNESS_GAIN,
            flee_jitter: FLEE_JITTER,
            exit_threshold_y: EXIT_THRESHOLD_Y,
            loudness_dead_zone: LOUDNESS_DEAD_ZONE,
        }
    }
}

/// Result of stepping one dog-bird by one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionOutcome {
    pub position: Point,
    pub heading: f64,
    pub mode: Mode,
    /// Flew past the exit threshold; remove it.
    pub expired: bool,
}

/// Advance every dog-bird except the drag owner by one tick.
///
/// Reads all records first, then writes each result back. A record removed
/// between the read and the write is skipped. Expired ids are appended to
/// `expired` for the cleanup system.
pub fn run<S: EntityStore, R: RandomSource>(
    store: &mut S,
    ctx: &TickContext,
    tuning: &MotionTuning,
    rng: &mut R,
    drag_owner: Option<DogBirdId>,
    expired: &mut Vec<DogBirdId>,
) {
    for record in store.all() {
        if drag_owner == Some(record.id) {
            continue;
        }

        let outcome = step(&record, ctx, tuning, rng);

        if !store.update(record.id, outcome.position, outcome.heading, outcome.mode) {
            debug!("{} vanished mid-tick, skipping write", record.id);
            continue;
        }
        if outcome.expired {
            expired.push(record.id);
        }
    }
}

/// Step one dog-bird according to the tick's mode.
pub fn step<R: RandomSource>(
    record: &DogBirdRecord,
    ctx: &TickContext,
    tuning: &MotionTuning,
    rng: &mut R,
) -> MotionOutcome {
    match ctx.mode {
        Mode::Wandering => wander(record, ctx, tuning, rng),
        Mode::Fleeing => flee(record, ctx, tuning, rng),
    }
}

/// Walk along the heading, bouncing off the inset walls.
///
/// The wall test uses the projected position; on a hit the heading is
/// reflected (x wall first, then y wall, each applied to the result of the
/// previous) and the displacement recomputed from the new heading within the
/// same tick. The random turn happens after the move and only affects the
/// next tick. A final clamp keeps float drift inside the walls.
fn wander<R: RandomSource>(
    record: &DogBirdRecord,
    ctx: &TickContext,
    tuning: &MotionTuning,
    rng: &mut R,
) -> MotionOutcome {
    let margin = tuning.wall_margin;
    let (x_lo, x_hi) = ctx.bounds.x_span(margin);
    let (y_lo, y_hi) = ctx.bounds.y_span(margin);

    let mut heading = record.heading;
    let projected = record.position + displacement(heading, record.speed);

    if projected.x < x_lo || projected.x > x_hi {
        heading = normalize_degrees(180.0 - heading);
    }
    if projected.y < y_lo || projected.y > y_hi {
        heading = normalize_degrees(360.0 - heading);
    }

    let moved = record.position + displacement(heading, record.speed);

    if rng.chance(tuning.random_turn_chance) {
        heading = normalize_degrees(rng.range(0.0, 360.0));
    }

    MotionOutcome {
        position: ctx.bounds.clamp(moved, margin),
        heading,
        mode: Mode::Wandering,
        expired: false,
    }
}

/// Climb faster the louder it is, wobbling sideways.
///
/// x stays inside the walls; y is only held off the bottom wall and may run
/// past the top of the field, which is how a dog-bird leaves.
fn flee<R: RandomSource>(
    record: &DogBirdRecord,
    ctx: &TickContext,
    tuning: &MotionTuning,
    rng: &mut R,
) -> MotionOutcome {
    let margin = tuning.wall_margin;
    let climb = tuning.flee_base_speed + ctx.loudness * tuning.flee_loudness_gain;
    let jitter = rng.range(-tuning.flee_jitter, tuning.flee_jitter);

    let (_, y_hi) = ctx.bounds.y_span(margin);
    let x = ctx.bounds.clamp_x(record.position.x + jitter, margin);
    let y = (record.position.y - climb).min(y_hi);

    MotionOutcome {
        position: Point::new(x, y),
        heading: record.heading,
        mode: Mode::Fleeing,
        expired: y < tuning.exit_threshold_y,
    }
}

/// Per-tick displacement for a heading in degrees.
fn displacement(heading: f64, speed: f64) -> Point {
    let radians = heading.to_radians();
    Point::new(radians.cos() * speed, radians.sin() * speed)
}
