//! Ghost Pointer - human-like pointer movement for automated surfaces
//!
//! This library synthesizes pointer trajectories that look like a person
//! moved the mouse: curved Bezier paths whose density follows Fitts's law,
//! optional per-point timestamps, and overshoot-and-correct approaches on
//! long moves. A [`Cursor`] drives any [`Surface`] with these paths,
//! verifies that moving targets are still under the pointer on arrival, and
//! wanders idly in the background between operations.
//!
//! ## Anti-Detection
//!
//! The `stealth` module randomizes landing points inside targets and the
//! rests between actions so repeated interactions never share a signature.

pub mod config;
pub mod cursor;
pub mod error;
pub mod geometry;
pub mod path;
pub mod stealth;

pub use config::{ClickOptions, CursorDefaults, IdleOptions, MoveOptions, PathOptions};
pub use cursor::{Cursor, MouseButton, PointerEvent, Selector, Surface, SurfaceError, Target};
pub use error::{CursorError, Result};
pub use geometry::{Point, Rect, TimedPoint};
pub use path::{path, Trajectory};
