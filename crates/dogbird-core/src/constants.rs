//! Simulation constants and tuning parameters.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 30;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- Field ---

/// Default field width in points.
pub const DEFAULT_FIELD_WIDTH: f64 = 400.0;

/// Default field height in points.
pub const DEFAULT_FIELD_HEIGHT: f64 = 800.0;

/// Inset from each edge that wandering dog-birds bounce off.
pub const WALL_MARGIN: f64 = 20.0;

/// Inset from each edge used when picking a hatch point.
pub const SPAWN_MARGIN: f64 = 50.0;

// --- Dog-bird traits (drawn once at hatch) ---

/// Slowest wandering speed (points per tick).
pub const SPEED_MIN: f64 = 1.0;

/// Fastest wandering speed (points per tick).
pub const SPEED_MAX: f64 = 3.0;

/// Smallest sprite size (points).
pub const SIZE_MIN: f64 = 100.0;

/// Largest sprite size (points).
pub const SIZE_MAX: f64 = 160.0;

/// Name given to a freshly hatched dog-bird.
pub const DEFAULT_NAME: &str = "Nameless dog-bird";

// --- Wandering ---

/// Probability per tick that a wandering dog-bird picks a new heading.
pub const RANDOM_TURN_CHANCE: f64 = 0.03;

// --- Fleeing ---

/// Climb rate at the quietest audible level (points per tick).
pub const FLEE_BASE_SPEED: f64 = 2.0;

/// Extra climb per unit of loudness (points per tick).
/// At loudness 0.5 a fleeing dog-bird climbs 10 points per tick.
pub const FLEE_LOUDNESS_GAIN: f64 = 16.0;

/// Maximum sideways wobble per tick while fleeing (points).
pub const FLEE_JITTER: f64 = 3.0;

/// A fleeing dog-bird whose y drops below this is gone for good.
pub const EXIT_THRESHOLD_Y: f64 = -100.0;

// --- Loudness ---

/// Readings at or below this are treated as silence.
pub const LOUDNESS_DEAD_ZONE: f64 = 0.0;

/// Loudness injected by the test shout.
pub const SHOUT_TEST_LOUDNESS: f64 = 1.0;

/// Duration of the test shout (2 seconds).
pub const SHOUT_TEST_TICKS: u32 = 2 * TICK_RATE;

// --- Drop target ---

/// Default drop target centre x (middle of the default field).
pub const DROP_TARGET_X: f64 = DEFAULT_FIELD_WIDTH / 2.0;

/// Default drop target centre y (near the bottom of the default field).
pub const DROP_TARGET_Y: f64 = DEFAULT_FIELD_HEIGHT - 60.0;

/// Default drop target radius.
pub const DROP_TARGET_RADIUS: f64 = 60.0;
