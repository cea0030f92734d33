//! Dispatch timing for sampled paths
//!
//! Each hop between consecutive points is treated as a tiny cubic curve built
//! from its neighbourhood, and its travel time is estimated from the curve's
//! derivative magnitude using a rough two-sample rule, not an exact
//! arclength integral.

use rand::Rng;

use crate::geometry::{CubicBezier, Point, TimedPoint};

/// Current wall-clock time in milliseconds since the Unix epoch
pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Stamp `points` with non-decreasing dispatch times starting at `now`
///
/// `move_speed` divides every hop time; when absent (or not positive) a speed
/// is drawn uniformly from [0.5, 1.0).
pub fn stamp<R: Rng + ?Sized>(
    rng: &mut R,
    points: &[Point],
    move_speed: Option<f64>,
    now: i64,
) -> Vec<TimedPoint> {
    let speed = match move_speed {
        Some(s) if s > 0.0 => s,
        _ => rng.gen::<f64>() * 0.5 + 0.5,
    };

    let mut stamped: Vec<TimedPoint> = Vec::with_capacity(points.len());
    for (i, point) in points.iter().enumerate() {
        let timestamp = match stamped.last() {
            None => now,
            Some(prev) => {
                let next = points.get(i + 1).unwrap_or(point);
                let local = CubicBezier::new(points[i - 1], *point, *next, *next);
                let hop = hop_time(&local, points.len(), speed);
                prev.timestamp.saturating_add(hop)
            }
        };
        stamped.push(TimedPoint::new(*point, timestamp));
    }

    stamped
}

/// Travel time in whole milliseconds across `curve`
///
/// Trapezoids over `samples` slices, pairing the speed at `t` with the speed
/// at `t * dt`.
fn hop_time(curve: &CubicBezier, samples: usize, speed: f64) -> i64 {
    let dt = 1.0 / samples as f64;
    let mut total = 0.0;
    let mut t = 0.0;

    while t < 1.0 {
        let v1 = curve.speed(t * dt);
        let v2 = curve.speed(t);
        total += (v1 + v2) * dt / 2.0;
        t += dt;
    }

    (total / speed).round() as i64
}
