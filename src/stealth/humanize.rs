//! Human behavior simulation for anti-detection
//!
//! Randomizes where inside a target the pointer lands and how long it rests
//! between actions, so that repeated interactions never share a signature.

use std::time::Duration;

use rand::rngs::ThreadRng;
use rand::Rng;

use crate::geometry::{Point, Rect};

/// Humanizer for generating realistic landing points and pauses
pub struct Humanizer<R = ThreadRng> {
    rng: R,
}

impl Default for Humanizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Humanizer {
    /// Create a humanizer backed by the thread-local generator
    pub fn new() -> Self {
        Self {
            rng: rand::thread_rng(),
        }
    }
}

impl<R: Rng> Humanizer<R> {
    /// Create a humanizer over a caller-supplied generator (seeded in tests)
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Random point inside `rect`
    ///
    /// `padding_percentage` (0-100) shrinks each axis by that share of its
    /// extent, keeping the remaining area centered. Values outside (0, 100]
    /// leave the box unpadded.
    pub fn box_point(&mut self, rect: &Rect, padding_percentage: Option<f64>) -> Point {
        let (pad_w, pad_h) = match padding_percentage {
            Some(p) if p > 0.0 && p <= 100.0 => (rect.width * p / 100.0, rect.height * p / 100.0),
            _ => (0.0, 0.0),
        };

        Point::new(
            rect.x + pad_w / 2.0 + self.rng.gen::<f64>() * (rect.width - pad_w),
            rect.y + pad_h / 2.0 + self.rng.gen::<f64>() * (rect.height - pad_h),
        )
    }

    /// Random point anywhere in the viewport
    pub fn viewport_point(&mut self, viewport: &Rect) -> Point {
        self.box_point(viewport, None)
    }

    /// Pause after an action: `base_ms`, scaled by a factor in [0, 1) when
    /// `randomize` is set
    pub fn rest(&mut self, base_ms: u64, randomize: bool) -> Duration {
        if base_ms == 0 {
            return Duration::ZERO;
        }
        let factor = if randomize { self.rng.gen::<f64>() } else { 1.0 };
        Duration::from_secs_f64(base_ms as f64 * factor / 1000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_padded_box_point_stays_centered() {
        let mut humanizer = Humanizer::new();
        let rect = Rect::new(0.0, 0.0, 100.0, 100.0);

        for _ in 0..1000 {
            let p = humanizer.box_point(&rect, Some(50.0));
            assert!((25.0..=75.0).contains(&p.x));
            assert!((25.0..=75.0).contains(&p.y));
        }
    }

    #[test]
    fn test_out_of_range_padding_ignored() {
        let mut humanizer = Humanizer::with_rng(StdRng::seed_from_u64(3));
        let rect = Rect::new(10.0, 20.0, 40.0, 40.0);

        let mut min_x = f64::MAX;
        for _ in 0..500 {
            let p = humanizer.box_point(&rect, Some(150.0));
            assert!(rect.contains(p));
            min_x = min_x.min(p.x);
        }

        // Without padding the left strip gets visited
        assert!(min_x < 20.0);
    }

    #[test]
    fn test_full_padding_pins_center() {
        let mut humanizer = Humanizer::new();
        let p = humanizer.box_point(&Rect::new(0.0, 0.0, 80.0, 60.0), Some(100.0));
        assert_eq!(p, Point::new(40.0, 30.0));
    }

    #[test]
    fn test_rest_bounds() {
        let mut humanizer = Humanizer::with_rng(StdRng::seed_from_u64(11));

        assert_eq!(humanizer.rest(0, true), Duration::ZERO);
        assert_eq!(humanizer.rest(250, false), Duration::from_millis(250));

        for _ in 0..100 {
            assert!(humanizer.rest(2000, true) < Duration::from_millis(2000));
        }
    }
}
