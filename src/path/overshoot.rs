//! Overshoot and correction
//!
//! Fast, long moves sail past the target and come back, the way a hand does
//! when it commits to a distant target. The approach is split into a primary
//! leg toward a point beyond the destination and a short, tight correction
//! leg back onto it.

use std::f64::consts::FRAC_PI_4;

use rand::Rng;

use crate::config::PathOptions;
use crate::geometry::{direction, Point, Rect};

use super::{path_with_rng, Trajectory};

/// Maximum distance past the destination
pub const OVERSHOOT_RADIUS: f64 = 120.0;

/// Lateral spread of the correction leg
pub const OVERSHOOT_SPREAD: f64 = 10.0;

/// Distance beyond which moves overshoot by default
pub const DEFAULT_OVERSHOOT_THRESHOLD: f64 = 500.0;

/// Whether a move from `a` to `b` should overshoot
///
/// Strictly greater: a move of exactly `threshold` lands directly.
pub fn should_overshoot(a: Point, b: Point, threshold: f64) -> bool {
    direction(a, b).magnitude() > threshold
}

/// A point past `destination`, continuing the approach from `from`
///
/// The displacement is at most `radius` long and leans within 45° of the
/// approach direction.
pub fn overshoot_point<R: Rng + ?Sized>(
    rng: &mut R,
    from: Point,
    destination: Point,
    radius: f64,
) -> Point {
    let heading = direction(from, destination).angle() + rng.gen_range(-FRAC_PI_4..FRAC_PI_4);
    let reach = radius * rng.gen::<f64>().sqrt();
    destination + Point::new(heading.cos(), heading.sin()) * reach
}

/// The legs of a directed approach
#[derive(Debug, Clone)]
pub struct Approach {
    /// Leg from the current position, toward either the destination or the
    /// overshoot point
    pub primary: Trajectory,
    /// Correction back onto the destination, when overshooting
    pub correction: Option<Trajectory>,
    /// Where the approach comes to rest
    pub destination: Point,
}

impl Approach {
    /// Primary leg followed by the correction, if any
    pub fn legs(&self) -> impl Iterator<Item = &Trajectory> {
        std::iter::once(&self.primary).chain(self.correction.as_ref())
    }
}

/// Plan the move from `from` onto `destination`, a point inside `target`
pub fn plan_approach<R: Rng + ?Sized>(
    rng: &mut R,
    from: Point,
    destination: Point,
    target: &Rect,
    threshold: f64,
    options: &PathOptions,
) -> Approach {
    if !should_overshoot(from, destination, threshold) {
        return Approach {
            primary: path_with_rng(rng, from, destination, options),
            correction: None,
            destination,
        };
    }

    let beyond = overshoot_point(rng, from, destination, OVERSHOOT_RADIUS);
    let primary = path_with_rng(rng, from, beyond, options);

    let landing = Rect::at(destination, target.width, target.height);
    let tight = PathOptions {
        spread_override: Some(OVERSHOOT_SPREAD),
        ..*options
    };
    let correction = path_with_rng(rng, beyond, landing, &tight);

    Approach {
        primary,
        correction: Some(correction),
        destination,
    }
}
