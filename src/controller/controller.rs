//! Per-match decision controller
//!
//! Owns the match-local state (mode, opponent window, counters) and the
//! sampling RNG. The fuzzy engine and combat rules are shared handles.

use std::sync::Arc;

use rand::distributions::{Distribution, WeightedIndex};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::combatant::{CombatRules, CombatantSnapshot};
use crate::controller::diagnostics::{DebugInfo, DecisionRecord};
use crate::controller::difficulty::{mode_multipliers, multipliers};
use crate::core::config::AiConfig;
use crate::core::error::Result;
use crate::core::types::{unit_clamp, ActionKind, ActionScores, ActionTable, Difficulty};
use crate::fuzzy::FuzzyEngine;
use crate::pattern::{PatternRecognizer, PatternSnapshot};
use crate::strategy::signals::NEUTRAL_THREAT;
use crate::strategy::{next_mode, threat_level, ModeInputs, StrategicMode};

/// Mutable state for one match, discarded when the match ends
#[derive(Debug, Clone)]
struct ControllerState {
    mode: StrategicMode,
    pattern: PatternRecognizer,
    last_opponent_action: Option<ActionKind>,
    consecutive_heavy: u32,
    turn_count: u32,
    damage_dealt: u32,
    damage_taken: u32,
    ai_health_pct: f64,
    ai_stamina_pct: f64,
    last_decision: Option<DecisionRecord>,
}

impl ControllerState {
    fn new(window: usize) -> Self {
        Self {
            mode: StrategicMode::default(),
            pattern: PatternRecognizer::with_capacity(window),
            last_opponent_action: None,
            consecutive_heavy: 0,
            turn_count: 0,
            damage_dealt: 0,
            damage_taken: 0,
            ai_health_pct: 1.0,
            ai_stamina_pct: 1.0,
            last_decision: None,
        }
    }
}

/// Picks one action per turn for an AI-controlled combatant
///
/// Not meant to be shared between matches; give each match its own
/// controller and clone the `Arc` handles into it.
pub struct DecisionController<R = ChaCha8Rng> {
    engine: Arc<FuzzyEngine>,
    rules: Arc<dyn CombatRules>,
    config: AiConfig,
    state: ControllerState,
    rng: R,
}

impl DecisionController<ChaCha8Rng> {
    /// Seeded from `config.controller.seed`, or from OS entropy when unset
    pub fn new(engine: Arc<FuzzyEngine>, rules: Arc<dyn CombatRules>, config: AiConfig) -> Self {
        let rng = match config.controller.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self::with_rng(engine, rules, config, rng)
    }

    /// Create with specific RNG seed for reproducible decisions
    pub fn with_seed(engine: Arc<FuzzyEngine>, rules: Arc<dyn CombatRules>, config: AiConfig, seed: u64) -> Self {
        Self::with_rng(engine, rules, config, ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> DecisionController<R> {
    pub fn with_rng(engine: Arc<FuzzyEngine>, rules: Arc<dyn CombatRules>, config: AiConfig, rng: R) -> Self {
        let state = ControllerState::new(config.pattern.window_capacity);
        Self {
            engine,
            rules,
            config,
            state,
            rng,
        }
    }

    pub fn mode(&self) -> StrategicMode {
        self.state.mode
    }

    pub fn turn_count(&self) -> u32 {
        self.state.turn_count
    }

    pub fn pattern(&self) -> &PatternRecognizer {
        &self.state.pattern
    }

    pub fn difficulty(&self) -> Difficulty {
        self.config.controller.difficulty
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.config.controller.difficulty = difficulty;
    }

    pub fn config(&self) -> &AiConfig {
        &self.config
    }

    pub fn last_decision(&self) -> Option<&DecisionRecord> {
        self.state.last_decision.as_ref()
    }

    /// Note the opponent's move; call after every opponent turn
    pub fn record_opponent_action(&mut self, action: ActionKind) {
        self.state.last_opponent_action = Some(action);
        self.state.pattern.record(action);
        if action.is_heavy() {
            self.state.consecutive_heavy = self.state.consecutive_heavy.saturating_add(1);
        } else {
            self.state.consecutive_heavy = 0;
        }
    }

    /// Parse a move label (legacy names accepted) and record it
    pub fn record_opponent_move(&mut self, label: &str) -> Result<ActionKind> {
        let action: ActionKind = label.parse()?;
        self.record_opponent_action(action);
        Ok(action)
    }

    /// Damage the AI dealt this turn; zero decays the tracker
    pub fn record_damage_dealt(&mut self, amount: u32) {
        let decay = self.config.controller.damage_decay;
        self.state.damage_dealt = track_damage(self.state.damage_dealt, amount, decay);
    }

    /// Damage the AI took this turn; zero decays the tracker
    pub fn record_damage_taken(&mut self, amount: u32) {
        let decay = self.config.controller.damage_decay;
        self.state.damage_taken = track_damage(self.state.damage_taken, amount, decay);
    }

    /// Back to the start-of-match state; the engine and RNG are kept
    pub fn reset(&mut self) {
        self.state = ControllerState::new(self.config.pattern.window_capacity);
    }

    /// Choose this turn's action
    ///
    /// Always returns a label; when nothing but resting is affordable the
    /// answer is `Recover`. The mode is refreshed before scoring so
    /// mode-aware multipliers see this turn's snapshots, refreshed again on
    /// the way out, and once more by the match loop after the move executes.
    pub fn select_action(&mut self, ai: &CombatantSnapshot, opponent: &CombatantSnapshot) -> ActionKind {
        self.state.turn_count = self.state.turn_count.saturating_add(1);
        let mode = self.refresh_mode(ai, opponent);

        let settings = &self.config.controller;
        let difficulty = settings.difficulty;
        let mode_aware = settings.mode_aware_difficulty;
        let cooldown_turns = settings.special_cooldown_turns;
        let strong = settings.strong_pattern_threshold;
        let counter = settings.counter_boost_threshold;

        let threat = self.decision_threat(ai, opponent);
        let pattern = self.state.pattern.snapshot();
        let cooldown_ratio = cooldown_ratio(ai.special_cooldown, cooldown_turns);

        let raw_scores = self
            .engine
            .score_actions(ai, opponent, threat, pattern.pattern_strength, cooldown_ratio);
        let table = if mode_aware {
            mode_multipliers(difficulty, mode)
        } else {
            multipliers(difficulty)
        };
        let adjusted_scores = pattern_boosts(&raw_scores, &pattern, strong, counter)
            .scaled_by(&table)
            .sanitized();
        tracing::trace!(raw = ?raw_scores, adjusted = ?adjusted_scores, "Action scores");

        let feasible = ActionTable::from_fn(|action| self.is_feasible(ai, action));
        let offense_possible = ActionKind::ALL
            .into_iter()
            .any(|action| action != ActionKind::Recover && feasible[action]);

        let (chosen, final_distribution, recover_substituted) = if offense_possible {
            let distribution = feasible_distribution(&adjusted_scores, &feasible);
            let sampled = self.sample(&distribution);
            if sampled != ActionKind::Recover && !self.is_feasible(ai, sampled) {
                tracing::warn!(action = %sampled, "Sampled action no longer feasible, resting instead");
                (ActionKind::Recover, distribution, true)
            } else {
                (sampled, distribution, false)
            }
        } else {
            let mut rest = ActionScores::zeros();
            rest[ActionKind::Recover] = 1.0;
            (ActionKind::Recover, rest, false)
        };

        let mode_after = self.refresh_mode(ai, opponent);
        tracing::debug!(
            turn = self.state.turn_count,
            mode = %mode_after,
            threat,
            action = %chosen,
            "Action selected"
        );

        self.state.last_decision = Some(DecisionRecord {
            turn: self.state.turn_count,
            threat,
            cooldown_ratio,
            pattern_strength: pattern.pattern_strength,
            predicted_next: pattern.predicted_next,
            raw_scores,
            adjusted_scores,
            feasible,
            final_distribution,
            chosen,
            recover_substituted,
            mode,
            mode_after,
        });
        chosen
    }

    /// Re-evaluate the strategic mode from fresh snapshots
    ///
    /// A snapshot that can't be evaluated leaves the mode unchanged.
    pub fn refresh_mode(&mut self, ai: &CombatantSnapshot, opponent: &CombatantSnapshot) -> StrategicMode {
        self.observe(ai);
        let history = self.state.pattern.recent_moves();
        let mut inputs = ModeInputs::new(ai, opponent)
            .with_history(&history)
            .with_consecutive_heavy(self.state.consecutive_heavy)
            .with_damage(self.state.damage_dealt, self.state.damage_taken)
            .with_special_ready(self.rules.can_use_special(ai));
        inputs.last_opponent_action = self.state.last_opponent_action;

        match next_mode(self.state.mode, &inputs, &self.config.strategy) {
            Ok(mode) => {
                if mode != self.state.mode {
                    tracing::debug!(from = %self.state.mode, to = %mode, "Mode changed");
                }
                self.state.mode = mode;
            }
            Err(err) => {
                tracing::warn!(error = %err, mode = %self.state.mode, "Mode evaluation failed, keeping current mode");
            }
        }
        self.state.mode
    }

    /// Current state for display; never mutates the controller
    pub fn diagnostics(&self) -> DebugInfo {
        let last = self.state.last_decision.as_ref();
        DebugInfo {
            mode: self.state.mode,
            mode_description: self.state.mode.description(),
            health_pct: self.state.ai_health_pct,
            stamina_pct: self.state.ai_stamina_pct,
            turn_count: self.state.turn_count,
            difficulty: self.config.controller.difficulty,
            threat: last.map_or(0.0, |record| record.threat),
            raw_scores: last.map_or_else(ActionScores::zeros, |record| record.raw_scores),
            opponent_history: self.state.pattern.recent_moves(),
            consecutive_heavy: self.state.consecutive_heavy,
            last_opponent_action: self.state.last_opponent_action,
            pattern: self.state.pattern.snapshot(),
            last_decision: self.state.last_decision.clone(),
        }
    }

    fn observe(&mut self, ai: &CombatantSnapshot) {
        self.state.ai_health_pct = ai.health_pct();
        self.state.ai_stamina_pct = ai.stamina_pct();
    }

    /// Mode threat nudged by the opponent's last move; neutral for bad snapshots
    fn decision_threat(&self, ai: &CombatantSnapshot, opponent: &CombatantSnapshot) -> f64 {
        if let Err(err) = ai.validate().and_then(|_| opponent.validate()) {
            tracing::warn!(error = %err, "Using neutral threat");
            return NEUTRAL_THREAT;
        }

        let last = self.state.last_opponent_action;
        let nudge = match last {
            Some(ActionKind::Special) => 0.3,
            Some(ActionKind::StrikeLight) => 0.1,
            Some(ActionKind::Recover) => -0.2,
            _ => 0.0,
        };
        unit_clamp(threat_level(ai, opponent, last) + nudge)
    }

    fn is_feasible(&self, ai: &CombatantSnapshot, action: ActionKind) -> bool {
        match action {
            ActionKind::Recover => true,
            ActionKind::Special => {
                self.rules.can_use_special(ai) && ai.stamina >= self.rules.special_stamina_cost(ai)
            }
            _ => self.rules.can_perform(ai, action).allowed,
        }
    }

    fn sample(&mut self, distribution: &ActionScores) -> ActionKind {
        match WeightedIndex::new(distribution.values()) {
            Ok(index) => ActionKind::ALL[index.sample(&mut self.rng)],
            Err(err) => {
                tracing::warn!(error = %err, "Weighted sampling failed, resting instead");
                ActionKind::Recover
            }
        }
    }
}

/// 1.0 when the special is ready, falling toward 0.0 right after use
pub fn cooldown_ratio(remaining: u32, max_turns: u32) -> f64 {
    if max_turns == 0 {
        return 1.0;
    }
    unit_clamp(1.0 - f64::from(remaining) / f64::from(max_turns))
}

fn track_damage(current: u32, amount: u32, decay: u32) -> u32 {
    if amount > 0 {
        amount
    } else {
        current.saturating_sub(decay)
    }
}

/// Lean into the counter for a confidently predicted opponent move
///
/// Nothing changes unless the pattern is stronger than `strong`; strike and
/// special predictions additionally need `counter`.
pub fn pattern_boosts(
    scores: &ActionScores,
    pattern: &PatternSnapshot,
    strong: f64,
    counter: f64,
) -> ActionScores {
    let mut boosted = *scores;
    let strength = pattern.pattern_strength;
    let Some(predicted) = pattern.predicted_next else {
        return boosted;
    };
    if strength <= strong {
        return boosted;
    }

    let (target, factor) = match predicted {
        strike if strike.is_strike() && strength > counter => (ActionKind::Guard, 1.5),
        ActionKind::Special if strength > counter => (ActionKind::Dodge, 1.4),
        // Specials go through a guard
        ActionKind::Guard => (ActionKind::Special, 1.3),
        _ => return boosted,
    };
    boosted[target] = (boosted[target] * factor).min(1.0);
    boosted
}

/// Mask infeasible actions and renormalize; uniform when nothing scores
fn feasible_distribution(scores: &ActionScores, feasible: &ActionTable<bool>) -> ActionScores {
    let masked = ActionTable::from_fn(|action| if feasible[action] { scores[action] } else { 0.0 });
    if masked.sum() > 0.0 {
        return masked.normalized();
    }

    let count = feasible.values().iter().filter(|&&ok| ok).count();
    if count == 0 {
        return masked;
    }
    ActionTable::from_fn(|action| if feasible[action] { 1.0 / count as f64 } else { 0.0 })
}
