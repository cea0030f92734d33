//! Cubic Bézier curves
//!
//! Provides evaluation, the first derivative, arclength estimation and
//! lookup-table sampling over four control points, plus the randomized
//! anchor placement that bends a pointer path away from a straight line.

use rand::Rng;

use super::vector::{direction, Point};

/// Number of polyline segments used to estimate arclength
const ARC_LENGTH_SAMPLES: usize = 100;

/// Cubic Bézier curve defined by four control points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    /// Start point
    pub p0: Point,
    /// First control point
    pub p1: Point,
    /// Second control point
    pub p2: Point,
    /// End point
    pub p3: Point,
}

impl CubicBezier {
    /// Create a curve from its control points
    pub fn new(p0: Point, p1: Point, p2: Point, p3: Point) -> Self {
        Self { p0, p1, p2, p3 }
    }

    /// Build a curve from `start` to `end` with two random anchors offset
    /// laterally by up to `spread`
    ///
    /// Both anchors bulge to the same side of the chord. They are ordered by
    /// ascending x so the curve does not loop back on itself.
    pub fn with_random_anchors<R: Rng + ?Sized>(
        rng: &mut R,
        start: Point,
        end: Point,
        spread: f64,
    ) -> Self {
        let side = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };

        let mut anchor = || {
            let mid = random_point_on_line(&mut *rng, start, end);
            let normal = direction(start, mid).perpendicular().set_magnitude(spread) * side;
            random_point_on_line(&mut *rng, mid, mid + normal)
        };
        let mut anchors = [anchor(), anchor()];
        anchors.sort_by(|a, b| a.x.total_cmp(&b.x));

        Self::new(start, anchors[0], anchors[1], end)
    }

    /// Evaluate the curve at parameter `t` in [0, 1]
    pub fn evaluate(&self, t: f64) -> Point {
        let t = t.clamp(0.0, 1.0);
        let mt = 1.0 - t;
        let a = mt * mt * mt;
        let b = 3.0 * mt * mt * t;
        let c = 3.0 * mt * t * t;
        let d = t * t * t;

        Point::new(
            a * self.p0.x + b * self.p1.x + c * self.p2.x + d * self.p3.x,
            a * self.p0.y + b * self.p1.y + c * self.p2.y + d * self.p3.y,
        )
    }

    /// First derivative (tangent) at parameter `t`
    ///
    /// Not clamped: the timing model samples slightly outside the usual range.
    pub fn derivative(&self, t: f64) -> Point {
        let mt = 1.0 - t;
        let a = 3.0 * mt * mt;
        let b = 6.0 * mt * t;
        let c = 3.0 * t * t;

        Point::new(
            a * (self.p1.x - self.p0.x) + b * (self.p2.x - self.p1.x) + c * (self.p3.x - self.p2.x),
            a * (self.p1.y - self.p0.y) + b * (self.p2.y - self.p1.y) + c * (self.p3.y - self.p2.y),
        )
    }

    /// Magnitude of the derivative at `t`
    pub fn speed(&self, t: f64) -> f64 {
        self.derivative(t).magnitude()
    }

    /// Approximate arclength as the length of a fine polyline
    pub fn arc_length(&self) -> f64 {
        let mut length = 0.0;
        let mut prev = self.p0;

        for i in 1..=ARC_LENGTH_SAMPLES {
            let point = self.evaluate(i as f64 / ARC_LENGTH_SAMPLES as f64);
            length += prev.distance_to(point);
            prev = point;
        }

        length
    }

    /// Lookup table: the curve evaluated at `steps + 1` uniformly spaced
    /// parameter values, start and end included
    pub fn lut(&self, steps: usize) -> Vec<Point> {
        let steps = steps.max(1);
        (0..=steps)
            .map(|i| self.evaluate(i as f64 / steps as f64))
            .collect()
    }
}

/// Uniformly random point on the segment from `a` to `b`
pub fn random_point_on_line<R: Rng + ?Sized>(rng: &mut R, a: Point, b: Point) -> Point {
    a + direction(a, b) * rng.gen::<f64>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn arch() -> CubicBezier {
        CubicBezier::new(
            Point::new(0.0, 0.0),
            Point::new(25.0, 50.0),
            Point::new(75.0, 50.0),
            Point::new(100.0, 0.0),
        )
    }

    #[test]
    fn test_endpoints_exact() {
        let curve = arch();
        assert_eq!(curve.evaluate(0.0), curve.p0);
        assert_eq!(curve.evaluate(1.0), curve.p3);
    }

    #[test]
    fn test_lut_spacing() {
        let curve = arch();
        let lut = curve.lut(10);

        assert_eq!(lut.len(), 11);
        assert_eq!(lut[0], curve.p0);
        assert_eq!(lut[10], curve.p3);
        assert_eq!(lut[5], curve.evaluate(0.5));
    }

    #[test]
    fn test_straight_line_length() {
        let line = CubicBezier::new(
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(20.0, 0.0),
            Point::new(30.0, 0.0),
        );
        assert!((line.arc_length() - 30.0).abs() < 1e-9);
        // Evenly spaced controls: constant speed of 3 * 10
        assert!((line.speed(0.3) - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_arch_longer_than_chord() {
        assert!(arch().arc_length() > 100.0);
    }

    #[test]
    fn test_random_anchors_sorted_and_bounded() {
        let mut rng = StdRng::seed_from_u64(7);
        let start = Point::new(100.0, 100.0);
        let end = Point::new(500.0, 300.0);

        for _ in 0..200 {
            let curve = CubicBezier::with_random_anchors(&mut rng, start, end, 50.0);
            assert_eq!(curve.p0, start);
            assert_eq!(curve.p3, end);
            assert!(curve.p1.x <= curve.p2.x);

            // Anchors sit within `spread` of the chord's bounding box
            for anchor in [curve.p1, curve.p2] {
                assert!(anchor.x >= 50.0 && anchor.x <= 550.0);
                assert!(anchor.y >= 50.0 && anchor.y <= 350.0);
            }
        }
    }

    #[test]
    fn test_degenerate_curve_stays_put() {
        let mut rng = StdRng::seed_from_u64(1);
        let p = Point::new(42.0, 42.0);
        let curve = CubicBezier::with_random_anchors(&mut rng, p, p, 10.0);

        assert_eq!(curve.p1, p);
        assert_eq!(curve.p2, p);
        // Weighted sums of one point round to within a few ulps of it
        assert!(curve.arc_length() < 1e-9);
    }
}
