use serde::Serialize;

use crate::core::types::{ActionKind, ActionScores, ActionTable, Difficulty};
use crate::pattern::PatternSnapshot;
use crate::strategy::StrategicMode;

/// How one `select_action` call reached its answer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecisionRecord {
    pub turn: u32,
    pub threat: f64,
    pub cooldown_ratio: f64,
    pub pattern_strength: f64,
    pub predicted_next: Option<ActionKind>,
    /// Normalized fuzzy engine output
    pub raw_scores: ActionScores,
    /// After pattern boosts and difficulty multipliers
    pub adjusted_scores: ActionScores,
    pub feasible: ActionTable<bool>,
    /// Distribution actually sampled from (zero for infeasible actions)
    pub final_distribution: ActionScores,
    pub chosen: ActionKind,
    /// True when the sampled action failed re-validation and became recover
    pub recover_substituted: bool,
    /// Mode the scores were adjusted for
    pub mode: StrategicMode,
    pub mode_after: StrategicMode,
}

/// Snapshot of the controller for the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DebugInfo {
    pub mode: StrategicMode,
    pub mode_description: &'static str,
    /// AI health fraction from the latest snapshot seen
    pub health_pct: f64,
    pub stamina_pct: f64,
    pub turn_count: u32,
    pub difficulty: Difficulty,
    /// Threat used by the latest decision (0 before the first one)
    pub threat: f64,
    pub raw_scores: ActionScores,
    pub opponent_history: Vec<ActionKind>,
    pub consecutive_heavy: u32,
    pub last_opponent_action: Option<ActionKind>,
    pub pattern: PatternSnapshot,
    pub last_decision: Option<DecisionRecord>,
}
