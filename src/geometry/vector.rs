//! Plane vectors and rectangles
//!
//! `Point` doubles as a free vector: the helpers below (direction,
//! perpendicular, unit, set_magnitude) are the building blocks for curve
//! anchors and overshoot displacement.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

/// A 2D point (or vector) with real-valued coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
}

/// The surface origin
pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

impl Point {
    /// Create a new point
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Length of this point treated as a vector from the origin
    pub fn magnitude(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Unit vector in the same direction
    ///
    /// The zero vector has no direction and stays zero.
    pub fn unit(self) -> Point {
        let mag = self.magnitude();
        if mag > 0.0 {
            self / mag
        } else {
            ORIGIN
        }
    }

    /// Same direction, given length
    pub fn set_magnitude(self, amount: f64) -> Point {
        self.unit() * amount
    }

    /// Perpendicular vector, rotated a quarter turn clockwise in screen space
    pub fn perpendicular(self) -> Point {
        Point::new(self.y, -self.x)
    }

    /// Euclidean distance to another point
    pub fn distance_to(self, other: Point) -> f64 {
        direction(self, other).magnitude()
    }

    /// Clamp both coordinates to be non-negative
    pub fn clamp_positive(self) -> Point {
        Point::new(self.x.max(0.0), self.y.max(0.0))
    }

    /// Angle of the vector in radians
    pub fn angle(self) -> f64 {
        self.y.atan2(self.x)
    }
}

/// Vector from `a` to `b`
pub fn direction(a: Point, b: Point) -> Point {
    b - a
}

impl Add for Point {
    type Output = Point;

    fn add(self, other: Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, scalar: f64) -> Point {
        Point::new(self.x * scalar, self.y * scalar)
    }
}

impl Div<f64> for Point {
    type Output = Point;

    fn div(self, scalar: f64) -> Point {
        Point::new(self.x / scalar, self.y / scalar)
    }
}

/// A point stamped with the wall-clock time (ms since the Unix epoch)
/// at which it should be dispatched
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimedPoint {
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
    /// Dispatch time in milliseconds
    pub timestamp: i64,
}

impl TimedPoint {
    /// Stamp a point
    pub fn new(point: Point, timestamp: i64) -> Self {
        Self {
            x: point.x,
            y: point.y,
            timestamp,
        }
    }

    /// Drop the timestamp
    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Axis-aligned rectangle
///
/// Extents are never negative. Build rectangles with [`Rect::new`] or
/// [`Rect::at`]; deserialization goes through the same clamp.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "RectFields")]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Wire form of [`Rect`], before clamping
#[derive(Deserialize)]
struct RectFields {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

impl From<RectFields> for Rect {
    fn from(raw: RectFields) -> Self {
        Rect::new(raw.x, raw.y, raw.width, raw.height)
    }
}

impl Rect {
    /// Create a rectangle; negative extents collapse to zero
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// Rectangle with its top-left corner at `origin`
    pub fn at(origin: Point, width: f64, height: f64) -> Self {
        Self::new(origin.x, origin.y, width, height)
    }

    /// Top-left corner
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Inclusive containment
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.x + self.width && p.y >= self.y && p.y <= self.y + self.height
    }

    /// Containment excluding the border
    pub fn contains_strictly(&self, p: Point) -> bool {
        p.x > self.x && p.x < self.x + self.width && p.y > self.y && p.y < self.y + self.height
    }
}
