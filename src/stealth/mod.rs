//! Stealth and anti-detection module
//!
//! This module provides the randomness that makes pointer automation less
//! detectable:
//! - Random landing points inside targets, with optional centered padding
//! - Randomized rests between actions

pub mod humanize;

pub use humanize::*;
