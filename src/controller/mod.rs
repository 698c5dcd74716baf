//! Per-turn decision pipeline
//!
//! Scores actions with the fuzzy engine, leans into counters for a
//! predicted opponent move, applies the difficulty preset, masks out what
//! the combat rules forbid and samples the result.

mod controller;
mod diagnostics;
mod difficulty;

pub use controller::{cooldown_ratio, pattern_boosts, DecisionController};
pub use diagnostics::{DebugInfo, DecisionRecord};
pub use difficulty::{mode_multipliers, multipliers};
