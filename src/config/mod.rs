//! Configuration module
//!
//! Handles per-call option records, per-engine defaults and their
//! resolution into concrete parameters.

pub mod options;
pub mod settings;

pub use options::{BoxOptions, ClickOptions, IdleOptions, MoveOptions, PathOptions};
pub use settings::{ClickConfig, CursorDefaults, IdleConfig, MoveConfig};
