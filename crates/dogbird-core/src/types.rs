//! Fundamental geometric and simulation types.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_FIELD_HEIGHT, DEFAULT_FIELD_WIDTH, DROP_TARGET_RADIUS, DROP_TARGET_X, DROP_TARGET_Y,
};

/// 2D point in field coordinates (points).
/// x grows to the right, y grows downward; "up" means decreasing y.
pub type Point = DVec2;

/// Size of the field the dog-birds live in. The origin is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldBounds {
    pub width: f64,
    pub height: f64,
}

/// Drop target: releasing a dragged dog-bird inside it trashes the dog-bird.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DropTarget {
    pub center: Point,
    pub radius: f64,
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl FieldBounds {
    /// Negative or non-finite extents collapse to zero.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width: sanitize_extent(width),
            height: sanitize_extent(height),
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    /// Allowed x range once `margin` is inset from both side edges.
    pub fn x_span(&self, margin: f64) -> (f64, f64) {
        inset_span(self.width, margin)
    }

    /// Allowed y range once `margin` is inset from the top and bottom edges.
    pub fn y_span(&self, margin: f64) -> (f64, f64) {
        inset_span(self.height, margin)
    }

    pub fn clamp_x(&self, x: f64, margin: f64) -> f64 {
        let (lo, hi) = self.x_span(margin);
        x.clamp(lo, hi)
    }

    pub fn clamp_y(&self, y: f64, margin: f64) -> f64 {
        let (lo, hi) = self.y_span(margin);
        y.clamp(lo, hi)
    }

    /// Clamp a point into the inset rectangle. On a field too small for the
    /// inset, the rectangle collapses to the field centre.
    pub fn clamp(&self, point: Point, margin: f64) -> Point {
        Point::new(self.clamp_x(point.x, margin), self.clamp_y(point.y, margin))
    }

    pub fn contains_inset(&self, point: Point, margin: f64) -> bool {
        let (x_lo, x_hi) = self.x_span(margin);
        let (y_lo, y_hi) = self.y_span(margin);
        (x_lo..=x_hi).contains(&point.x) && (y_lo..=y_hi).contains(&point.y)
    }
}

impl Default for FieldBounds {
    fn default() -> Self {
        Self::new(DEFAULT_FIELD_WIDTH, DEFAULT_FIELD_HEIGHT)
    }
}

impl DropTarget {
    pub fn new(center: Point, radius: f64) -> Self {
        Self {
            center,
            radius: sanitize_extent(radius),
        }
    }

    /// Strictly inside: a pointer exactly `radius` away is outside.
    pub fn contains(&self, point: Point) -> bool {
        self.center.distance(point) < self.radius
    }
}

impl Default for DropTarget {
    fn default() -> Self {
        Self::new(Point::new(DROP_TARGET_X, DROP_TARGET_Y), DROP_TARGET_RADIUS)
    }
}

impl SimTime {
    /// Seconds per tick at `tick_rate` Hz. A zero rate counts as 1 Hz.
    pub fn dt(tick_rate: u32) -> f64 {
        1.0 / f64::from(tick_rate.max(1))
    }

    /// Advance by one tick of `dt` seconds.
    pub fn advance(&mut self, dt: f64) {
        self.tick += 1;
        self.elapsed_secs += dt;
    }
}

/// Wrap an angle in degrees into `[0, 360)`.
pub fn normalize_degrees(degrees: f64) -> f64 {
    if !degrees.is_finite() {
        return 0.0;
    }
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid rounds tiny negatives up to exactly 360.0
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

fn sanitize_extent(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

fn inset_span(extent: f64, margin: f64) -> (f64, f64) {
    let margin = margin.max(0.0);
    if extent >= 2.0 * margin {
        (margin, extent - margin)
    } else {
        (extent / 2.0, extent / 2.0)
    }
}
