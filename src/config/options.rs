//! Per-call option records
//!
//! Every field is optional. A missing field falls through to the engine's
//! defaults and then to the built-in value for the operation (see
//! [`super::settings`]).

use serde::{Deserialize, Serialize};

use crate::cursor::surface::MouseButton;

/// Shape of a synthesized path
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathOptions {
    /// Fixed lateral spread of the curve, in pixels
    pub spread_override: Option<f64>,
    /// Deterministic speed multiplier; ignored unless positive
    pub move_speed: Option<f64>,
    /// Emit dispatch timestamps with each point
    pub use_timestamps: Option<bool>,
}

impl PathOptions {
    /// Fields of `over` win where set
    pub fn overlay(&self, over: &PathOptions) -> PathOptions {
        PathOptions {
            spread_override: over.spread_override.or(self.spread_override),
            move_speed: over.move_speed.or(self.move_speed),
            use_timestamps: over.use_timestamps.or(self.use_timestamps),
        }
    }
}

/// Where inside a target box the pointer may land
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoxOptions {
    /// Share of each axis (0-100) excluded around the border, split evenly
    pub padding_percentage: Option<f64>,
}

/// Options for moving onto a target or a point
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MoveOptions {
    #[serde(flatten)]
    pub landing: BoxOptions,
    #[serde(flatten)]
    pub path: PathOptions,
    /// Wait up to this many ms for a selector to appear
    pub wait_for_selector: Option<u64>,
    /// Rest after the move (ms)
    pub move_delay: Option<u64>,
    /// Scale the rest by a random factor in [0, 1)
    pub randomize_move_delay: Option<bool>,
    /// Attempts before giving up on a drifting target
    pub max_tries: Option<u32>,
    /// Distance beyond which the move overshoots
    pub overshoot_threshold: Option<f64>,
}

impl MoveOptions {
    /// Fields of `over` win where set
    pub fn overlay(&self, over: &MoveOptions) -> MoveOptions {
        MoveOptions {
            landing: BoxOptions {
                padding_percentage: over
                    .landing
                    .padding_percentage
                    .or(self.landing.padding_percentage),
            },
            path: self.path.overlay(&over.path),
            wait_for_selector: over.wait_for_selector.or(self.wait_for_selector),
            move_delay: over.move_delay.or(self.move_delay),
            randomize_move_delay: over.randomize_move_delay.or(self.randomize_move_delay),
            max_tries: over.max_tries.or(self.max_tries),
            overshoot_threshold: over.overshoot_threshold.or(self.overshoot_threshold),
        }
    }
}

/// Options for clicking
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClickOptions {
    #[serde(flatten)]
    pub movement: MoveOptions,
    /// Pause between arriving and pressing (ms)
    pub hesitate: Option<u64>,
    /// How long the button stays down (ms)
    pub wait_for_click: Option<u64>,
    /// Which button to press
    pub button: Option<MouseButton>,
    /// Click count reported with the press (2 for a double click)
    pub click_count: Option<u32>,
}

impl ClickOptions {
    /// Fields of `over` win where set
    pub fn overlay(&self, over: &ClickOptions) -> ClickOptions {
        ClickOptions {
            movement: self.movement.overlay(&over.movement),
            hesitate: over.hesitate.or(self.hesitate),
            wait_for_click: over.wait_for_click.or(self.wait_for_click),
            button: over.button.or(self.button),
            click_count: over.click_count.or(self.click_count),
        }
    }
}

/// Options for background idle motion
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdleOptions {
    #[serde(flatten)]
    pub path: PathOptions,
    /// Rest between idle paths (ms)
    pub move_delay: Option<u64>,
    /// Scale the rest by a random factor in [0, 1)
    pub randomize_move_delay: Option<bool>,
}

impl IdleOptions {
    /// Fields of `over` win where set
    pub fn overlay(&self, over: &IdleOptions) -> IdleOptions {
        IdleOptions {
            path: self.path.overlay(&over.path),
            move_delay: over.move_delay.or(self.move_delay),
            randomize_move_delay: over.randomize_move_delay.or(self.randomize_move_delay),
        }
    }
}
