//! Pointer path synthesis
//!
//! Turns a start point and a destination into an ordered sequence of points
//! along a randomized cubic curve. The sampling density follows a
//! Fitts's-law index of difficulty: long moves onto narrow targets get more
//! points than short hops onto wide ones.
//!
//! ```
//! use ghost_pointer::config::PathOptions;
//! use ghost_pointer::geometry::Point;
//! use ghost_pointer::path::path;
//!
//! let route = path(Point::new(10.0, 10.0), Point::new(400.0, 250.0), &PathOptions::default());
//! assert_eq!(route.last(), Some(Point::new(400.0, 250.0)));
//! ```

pub mod overshoot;
pub mod timing;

use rand::Rng;
use serde::Serialize;

use crate::config::PathOptions;
use crate::geometry::{CubicBezier, Point, Rect, TimedPoint};

pub use overshoot::{plan_approach, should_overshoot, Approach};

/// Target width assumed when the destination has no usable width
pub const DEFAULT_TARGET_WIDTH: f64 = 100.0;

/// Lateral spread bounds when no override is given
const MIN_SPREAD: f64 = 2.0;
const MAX_SPREAD: f64 = 200.0;

/// Arclength over-estimates perceived travel; scale it down
const LENGTH_SCALE: f64 = 0.8;

/// Steps contributed by the speed factor
const BASE_STEPS: f64 = 25.0;

/// Upper bound on sampled segments; tiny move speeds would otherwise ask for
/// more points than can be allocated
pub const MAX_STEPS: usize = 10_000;

/// Where a path ends
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathEnd {
    /// An exact point
    Point(Point),
    /// A target box; the path ends at its origin corner and the box width
    /// feeds the difficulty estimate
    Box(Rect),
}

impl PathEnd {
    /// The point the curve terminates on
    pub fn anchor(&self) -> Point {
        match self {
            PathEnd::Point(p) => *p,
            PathEnd::Box(rect) => rect.origin(),
        }
    }

    /// Width used for the difficulty estimate
    pub fn target_width(&self) -> f64 {
        match self {
            PathEnd::Box(rect) if rect.width != 0.0 => rect.width,
            _ => DEFAULT_TARGET_WIDTH,
        }
    }
}

impl From<Point> for PathEnd {
    fn from(p: Point) -> Self {
        PathEnd::Point(p)
    }
}

impl From<Rect> for PathEnd {
    fn from(rect: Rect) -> Self {
        PathEnd::Box(rect)
    }
}

/// A synthesized path, with or without dispatch timestamps
///
/// Serializes as a bare array of points.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Trajectory {
    Plain(Vec<Point>),
    Timed(Vec<TimedPoint>),
}

impl Trajectory {
    /// Number of points
    pub fn len(&self) -> usize {
        match self {
            Trajectory::Plain(points) => points.len(),
            Trajectory::Timed(points) => points.len(),
        }
    }

    /// Whether the path has no points
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Each point paired with its timestamp, if any
    pub fn steps(&self) -> Vec<(Point, Option<i64>)> {
        match self {
            Trajectory::Plain(points) => points.iter().map(|p| (*p, None)).collect(),
            Trajectory::Timed(points) => points
                .iter()
                .map(|p| (p.point(), Some(p.timestamp)))
                .collect(),
        }
    }

    /// The points without timestamps
    pub fn points(&self) -> Vec<Point> {
        self.steps().into_iter().map(|(p, _)| p).collect()
    }

    /// First point
    pub fn first(&self) -> Option<Point> {
        match self {
            Trajectory::Plain(points) => points.first().copied(),
            Trajectory::Timed(points) => points.first().map(TimedPoint::point),
        }
    }

    /// Last point
    pub fn last(&self) -> Option<Point> {
        match self {
            Trajectory::Plain(points) => points.last().copied(),
            Trajectory::Timed(points) => points.last().map(TimedPoint::point),
        }
    }
}

/// Fitts's-law index of difficulty with a = 0, b = 2
pub fn fitts(distance: f64, width: f64) -> f64 {
    2.0 * (distance / width + 1.0).log2()
}

/// Number of curve segments to sample for a move of `length` onto a target
/// of `width`, given the speed factor. Always in `1..=MAX_STEPS`.
pub fn step_count(length: f64, width: f64, speed: f64) -> usize {
    let steps = ((fitts(length, width) + 1.0).log2() + speed * BASE_STEPS) * 3.0;
    (steps.ceil() as usize).clamp(1, MAX_STEPS)
}

/// Synthesize a path from `start` to `end` using the thread-local generator
pub fn path(start: Point, end: impl Into<PathEnd>, options: &PathOptions) -> Trajectory {
    path_with_rng(&mut rand::thread_rng(), start, end, options)
}

/// Synthesize a path with a caller-supplied generator
pub fn path_with_rng<R: Rng + ?Sized>(
    rng: &mut R,
    start: Point,
    end: impl Into<PathEnd>,
    options: &PathOptions,
) -> Trajectory {
    let end = end.into();
    let finish = end.anchor();

    let spread = options
        .spread_override
        .unwrap_or_else(|| start.distance_to(finish).clamp(MIN_SPREAD, MAX_SPREAD));
    let curve = CubicBezier::with_random_anchors(rng, start, finish, spread);
    let length = curve.arc_length() * LENGTH_SCALE;

    let speed = match options.move_speed {
        Some(s) if s > 0.0 => BASE_STEPS / s,
        _ => rng.gen::<f64>(),
    };
    let steps = step_count(length, end.target_width(), speed);

    let points: Vec<Point> = curve
        .lut(steps)
        .into_iter()
        .map(Point::clamp_positive)
        .collect();

    if options.use_timestamps == Some(true) {
        Trajectory::Timed(timing::stamp(rng, &points, options.move_speed, timing::now_ms()))
    } else {
        Trajectory::Plain(points)
    }
}
