//! Duel AI - opponent decision engine for turn-based duels
//!
//! Each turn the controller reads snapshots of both combatants, scores the
//! six actions with a fuzzy rule base, adjusts for the opponent's habits
//! and the difficulty preset, and samples one action the combat rules
//! allow. A strategic mode machine with hysteresis sits on top.

pub mod combatant;
pub mod controller;
pub mod core;
pub mod fuzzy;
pub mod pattern;
pub mod strategy;

pub use combatant::{CombatRules, CombatantSnapshot, Feasibility, StandardRules};
pub use controller::{DebugInfo, DecisionController, DecisionRecord};
pub use crate::core::{ActionKind, ActionScores, ActionTable, AiConfig, Difficulty, DuelError, Result};
pub use fuzzy::{DefuzzMethod, FuzzyEngine};
pub use pattern::{PatternRecognizer, PatternSnapshot};
pub use strategy::StrategicMode;
