//! Geometry primitives
//!
//! Plane vectors, rectangles and the cubic curves that pointer paths are
//! sampled from.

pub mod bezier;
pub mod vector;

pub use bezier::CubicBezier;
pub use vector::{direction, Point, Rect, TimedPoint, ORIGIN};
