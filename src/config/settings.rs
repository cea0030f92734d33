//! Engine defaults and option resolution
//!
//! Options are layered in three tiers: built-in values per operation, the
//! defaults an engine was created with, and the overrides passed to a single
//! call. Resolution always yields a fully populated config record.

use serde::{Deserialize, Serialize};

use crate::config::options::{ClickOptions, IdleOptions, MoveOptions, PathOptions};
use crate::cursor::surface::MouseButton;
use crate::path::overshoot::DEFAULT_OVERSHOOT_THRESHOLD;

/// Default attempts for a drifting target
pub const DEFAULT_MAX_TRIES: u32 = 10;

/// Default rest after a click and between idle paths (ms)
pub const DEFAULT_REST_MS: u64 = 2000;

/// Per-engine defaults, one record per operation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CursorDefaults {
    /// Background idle motion
    pub idle: IdleOptions,
    /// Moves onto a target
    pub move_to_target: MoveOptions,
    /// Moves onto an absolute point
    pub move_to: MoveOptions,
    /// Clicks
    pub click: ClickOptions,
}

impl CursorDefaults {
    /// Parse defaults from JSON; missing fields stay unset
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Quick, decisive movement with short rests
    pub fn brisk() -> Self {
        let quick = MoveOptions {
            path: PathOptions {
                move_speed: Some(5.0),
                ..Default::default()
            },
            ..Default::default()
        };

        Self {
            idle: IdleOptions {
                move_delay: Some(800),
                ..Default::default()
            },
            move_to_target: quick,
            move_to: quick,
            click: ClickOptions {
                movement: MoveOptions {
                    move_delay: Some(300),
                    ..quick
                },
                wait_for_click: Some(40),
                ..Default::default()
            },
        }
    }

    /// Slow, deliberate movement: lands near target centers, pauses before
    /// pressing and holds buttons longer
    pub fn leisurely() -> Self {
        let careful = MoveOptions {
            landing: crate::config::BoxOptions {
                padding_percentage: Some(40.0),
            },
            path: PathOptions {
                move_speed: Some(0.5),
                use_timestamps: Some(true),
                ..Default::default()
            },
            move_delay: Some(400),
            ..Default::default()
        };

        Self {
            idle: IdleOptions {
                move_delay: Some(4000),
                ..Default::default()
            },
            move_to_target: careful,
            move_to: careful,
            click: ClickOptions {
                movement: careful,
                hesitate: Some(120),
                wait_for_click: Some(110),
                ..Default::default()
            },
        }
    }
}

/// Fully resolved move parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveConfig {
    pub path: PathOptions,
    pub padding_percentage: Option<f64>,
    pub wait_for_selector: Option<u64>,
    pub move_delay: u64,
    pub randomize_move_delay: bool,
    pub max_tries: u32,
    pub overshoot_threshold: f64,
}

impl MoveConfig {
    /// Built-in values for directed moves
    pub fn builtin() -> Self {
        Self {
            path: PathOptions::default(),
            padding_percentage: None,
            wait_for_selector: None,
            move_delay: 0,
            randomize_move_delay: true,
            max_tries: DEFAULT_MAX_TRIES,
            overshoot_threshold: DEFAULT_OVERSHOOT_THRESHOLD,
        }
    }

    fn apply(mut self, options: &MoveOptions) -> Self {
        self.path = self.path.overlay(&options.path);
        self.padding_percentage = options.landing.padding_percentage.or(self.padding_percentage);
        self.wait_for_selector = options.wait_for_selector.or(self.wait_for_selector);
        self.move_delay = options.move_delay.unwrap_or(self.move_delay);
        self.randomize_move_delay = options
            .randomize_move_delay
            .unwrap_or(self.randomize_move_delay);
        self.max_tries = options.max_tries.unwrap_or(self.max_tries);
        self.overshoot_threshold = options.overshoot_threshold.unwrap_or(self.overshoot_threshold);
        self
    }
}

/// Fully resolved click parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClickConfig {
    pub movement: MoveConfig,
    pub hesitate: u64,
    pub wait_for_click: u64,
    pub button: MouseButton,
    pub click_count: u32,
}

impl ClickConfig {
    /// Built-in values for clicks
    pub fn builtin() -> Self {
        Self {
            movement: MoveConfig {
                move_delay: DEFAULT_REST_MS,
                ..MoveConfig::builtin()
            },
            hesitate: 0,
            wait_for_click: 0,
            button: MouseButton::Left,
            click_count: 1,
        }
    }

    fn apply(mut self, options: &ClickOptions) -> Self {
        self.movement = self.movement.apply(&options.movement);
        self.hesitate = options.hesitate.unwrap_or(self.hesitate);
        self.wait_for_click = options.wait_for_click.unwrap_or(self.wait_for_click);
        self.button = options.button.unwrap_or(self.button);
        self.click_count = options.click_count.unwrap_or(self.click_count);
        self
    }
}

/// Fully resolved idle motion parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IdleConfig {
    pub path: PathOptions,
    pub move_delay: u64,
    pub randomize_move_delay: bool,
}

impl IdleConfig {
    /// Built-in values for idle motion
    pub fn builtin() -> Self {
        Self {
            path: PathOptions::default(),
            move_delay: DEFAULT_REST_MS,
            randomize_move_delay: true,
        }
    }

    fn apply(mut self, options: &IdleOptions) -> Self {
        self.path = self.path.overlay(&options.path);
        self.move_delay = options.move_delay.unwrap_or(self.move_delay);
        self.randomize_move_delay = options
            .randomize_move_delay
            .unwrap_or(self.randomize_move_delay);
        self
    }
}

/// Resolve a move onto a target: built-in, then engine, then call
pub fn resolve_move_to_target(defaults: &CursorDefaults, call: &MoveOptions) -> MoveConfig {
    MoveConfig::builtin()
        .apply(&defaults.move_to_target)
        .apply(call)
}

/// Resolve a move onto an absolute point
pub fn resolve_move_to(defaults: &CursorDefaults, call: &MoveOptions) -> MoveConfig {
    MoveConfig::builtin().apply(&defaults.move_to).apply(call)
}

/// Resolve a click
pub fn resolve_click(defaults: &CursorDefaults, call: &ClickOptions) -> ClickConfig {
    ClickConfig::builtin().apply(&defaults.click).apply(call)
}

/// Resolve idle motion
pub fn resolve_idle(defaults: &CursorDefaults, call: &IdleOptions) -> IdleConfig {
    IdleConfig::builtin().apply(&defaults.idle).apply(call)
}
