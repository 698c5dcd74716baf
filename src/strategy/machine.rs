use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::combatant::CombatantSnapshot;
use crate::core::config::StrategyConfig;
use crate::core::error::Result;
use crate::core::types::ActionKind;
use crate::strategy::signals::Signals;
use crate::strategy::transitions::{self, Check, GuardedFactors};
use crate::strategy::StrategicMode;

/// Everything the machine reads for one evaluation
#[derive(Debug, Clone, Copy)]
pub struct ModeInputs<'a> {
    pub ai: &'a CombatantSnapshot,
    pub opponent: &'a CombatantSnapshot,
    pub last_opponent_action: Option<ActionKind>,
    /// Oldest first
    pub opponent_history: &'a [ActionKind],
    pub consecutive_heavy: u32,
    pub damage_dealt: u32,
    pub damage_taken: u32,
    /// Whether the AI's special is usable this turn
    pub special_ready: bool,
    /// Turns already spent in the current mode, feeds the persistence bonus
    pub turns_in_mode: u32,
}

impl<'a> ModeInputs<'a> {
    pub fn new(ai: &'a CombatantSnapshot, opponent: &'a CombatantSnapshot) -> Self {
        Self {
            ai,
            opponent,
            last_opponent_action: None,
            opponent_history: &[],
            consecutive_heavy: 0,
            damage_dealt: 0,
            damage_taken: 0,
            special_ready: ai.special_ready(),
            turns_in_mode: 0,
        }
    }

    pub fn with_history(mut self, history: &'a [ActionKind]) -> Self {
        self.opponent_history = history;
        self.last_opponent_action = history.last().copied();
        self
    }

    pub fn with_consecutive_heavy(mut self, count: u32) -> Self {
        self.consecutive_heavy = count;
        self
    }

    pub fn with_damage(mut self, dealt: u32, taken: u32) -> Self {
        self.damage_dealt = dealt;
        self.damage_taken = taken;
        self
    }

    pub fn with_special_ready(mut self, ready: bool) -> Self {
        self.special_ready = ready;
        self
    }

    pub fn with_turns_in_mode(mut self, turns: u32) -> Self {
        self.turns_in_mode = turns;
        self
    }
}

/// Priority-weighted score per mode; `None` when the mode didn't trigger
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ModeScores([Option<f64>; 7]);

impl ModeScores {
    pub fn get(&self, mode: StrategicMode) -> Option<f64> {
        self.0[mode.index()]
    }

    pub fn set(&mut self, mode: StrategicMode, score: f64) {
        self.0[mode.index()] = Some(score);
    }

    /// Scored modes, most urgent first
    pub fn iter(&self) -> impl Iterator<Item = (StrategicMode, f64)> + '_ {
        StrategicMode::ALL
            .into_iter()
            .filter_map(move |mode| self.get(mode).map(|score| (mode, score)))
    }

    /// Highest score; the more urgent mode wins ties
    pub fn best(&self) -> Option<(StrategicMode, f64)> {
        self.iter().fold(None, |best, (mode, score)| match best {
            Some((_, top)) if score <= top => best,
            _ => Some((mode, score)),
        })
    }
}

impl Serialize for ModeScores {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        for (mode, score) in self.iter() {
            map.serialize_entry(mode.name(), &score)?;
        }
        map.end()
    }
}

/// One full evaluation of the mode checks
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModeAssessment {
    pub signals: Signals,
    pub scores: ModeScores,
    #[serde(skip)]
    triggered: [bool; 7],
}

impl ModeAssessment {
    /// Whether the mode's own trigger fired, ignoring eligibility gates
    pub fn triggered(&self, mode: StrategicMode) -> bool {
        self.triggered[mode.index()]
    }

    /// Pick the next mode from `current`
    pub fn select(&self, current: StrategicMode, turns_in_mode: u32, config: &StrategyConfig) -> StrategicMode {
        hysteresis_pick(current, self.scores, turns_in_mode, config)
            .unwrap_or_else(|| self.fallback(current, config))
    }

    /// Stay in `current` or step to its successor once its condition clears
    fn fallback(&self, current: StrategicMode, config: &StrategyConfig) -> StrategicMode {
        let s = &self.signals;
        let cleared = !self.triggered(current);
        match current {
            StrategicMode::Winded if cleared && s.ai_stamina > config.winded_recovery => StrategicMode::Pressing,
            StrategicMode::Critical if cleared && s.ai_health > config.critical_threshold * 1.5 => {
                StrategicMode::Hurt
            }
            StrategicMode::Hurt if cleared && s.ai_health > config.hurt_threshold * 1.2 => StrategicMode::Pressing,
            StrategicMode::Closing if cleared || s.opponent_health > config.closing_threshold * 1.2 => {
                StrategicMode::Pressing
            }
            StrategicMode::Guarded if cleared && s.threat < 0.3 => StrategicMode::Pressing,
            StrategicMode::Reactive if cleared => StrategicMode::Pressing,
            held => held,
        }
    }
}

/// Adopt the best-scoring mode only if it clearly beats the current one
///
/// The current mode's score is first scaled by the persistence bonus.
/// Returns `None` when the current mode should be re-checked instead.
fn hysteresis_pick(
    current: StrategicMode,
    mut scores: ModeScores,
    turns_in_mode: u32,
    config: &StrategyConfig,
) -> Option<StrategicMode> {
    if turns_in_mode > 0 {
        if let Some(score) = scores.get(current) {
            let persistence = 1.0 + f64::from(turns_in_mode) * config.persistence_step;
            scores.set(current, score * persistence);
        }
    }

    let (best, best_score) = scores.best()?;
    match scores.get(current) {
        None => Some(best),
        Some(current_score) if best_score > current_score * (1.0 + config.hysteresis_margin) => Some(best),
        Some(_) => None,
    }
}

/// Run every trigger check and weight the results
///
/// Fails with `MalformedSnapshot` when either snapshot reports more than
/// its maximum.
pub fn assess(inputs: &ModeInputs<'_>, config: &StrategyConfig) -> Result<ModeAssessment> {
    inputs.ai.validate()?;
    inputs.opponent.validate()?;

    let s = Signals::derive(
        inputs.ai,
        inputs.opponent,
        inputs.last_opponent_action,
        inputs.damage_dealt,
        inputs.damage_taken,
    );

    let winded = transitions::winded(s.ai_stamina, s.threat, config);
    let critical = transitions::critical(s.ai_health, s.threat, s.momentum, config);
    let closing = transitions::closing(s.opponent_health, s.ai_stamina, config);
    let hurt = transitions::hurt(s.ai_health, s.threat, s.momentum, config);
    let reactive = transitions::reactive(inputs.opponent_history);
    let guarded = transitions::guarded(&GuardedFactors {
        threat: s.threat,
        last_opponent_action: inputs.last_opponent_action,
        consecutive_heavy: inputs.consecutive_heavy,
        ai_health: s.ai_health,
        history: inputs.opponent_history,
    });
    let pressing = transitions::pressing(s.ai_health, s.ai_stamina, s.health_differential, s.momentum);

    let mut scores = ModeScores::default();
    let weighted = |mode: StrategicMode, check: Check| check.magnitude * mode.score_multiplier();

    if winded.triggered {
        scores.set(StrategicMode::Winded, weighted(StrategicMode::Winded, winded));
    }
    if critical.triggered {
        scores.set(StrategicMode::Critical, weighted(StrategicMode::Critical, critical));
    }
    if closing.triggered && s.ai_stamina > 0.3 && inputs.special_ready {
        let mut score = weighted(StrategicMode::Closing, closing);
        if s.ai_health > 0.5 {
            score *= 1.3;
        }
        scores.set(StrategicMode::Closing, score);
    }
    if hurt.triggered {
        scores.set(StrategicMode::Hurt, weighted(StrategicMode::Hurt, hurt));
    }
    if reactive.triggered && s.ai_health > 0.4 && s.ai_stamina > 0.3 {
        let mut score = weighted(StrategicMode::Reactive, reactive);
        if matches!(
            inputs.last_opponent_action,
            Some(ActionKind::StrikeLight | ActionKind::Special)
        ) {
            score *= 1.2;
        }
        scores.set(StrategicMode::Reactive, score);
    }
    if guarded.triggered {
        let mut score = weighted(StrategicMode::Guarded, guarded);
        if s.ai_health < 0.4 {
            score *= 1.4;
        }
        if s.opponent_stamina > 0.6 {
            score *= 1.2;
        }
        scores.set(StrategicMode::Guarded, score);
    }
    if pressing.triggered {
        let mut score = weighted(StrategicMode::Pressing, pressing);
        if s.health_differential > 0.1 {
            score *= 1.3;
        }
        if s.opponent_stamina < 0.3 {
            score *= 1.2;
        }
        scores.set(StrategicMode::Pressing, score);
    }

    let mut triggered = [false; 7];
    for (mode, check) in [
        (StrategicMode::Winded, winded),
        (StrategicMode::Critical, critical),
        (StrategicMode::Closing, closing),
        (StrategicMode::Hurt, hurt),
        (StrategicMode::Reactive, reactive),
        (StrategicMode::Guarded, guarded),
        (StrategicMode::Pressing, pressing),
    ] {
        triggered[mode.index()] = check.triggered;
    }

    Ok(ModeAssessment {
        signals: s,
        scores,
        triggered,
    })
}

/// Next strategic mode given the current one
///
/// Deterministic for identical inputs. An error means the inputs could not
/// be evaluated and the caller should keep `current`.
pub fn next_mode(
    current: StrategicMode,
    inputs: &ModeInputs<'_>,
    config: &StrategyConfig,
) -> Result<StrategicMode> {
    let assessment = assess(inputs, config)?;
    let next = assessment.select(current, inputs.turns_in_mode, config);
    tracing::trace!(
        from = %current,
        to = %next,
        threat = assessment.signals.threat,
        momentum = assessment.signals.momentum,
        "Mode evaluated"
    );
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::DuelError;

    fn fighter(hp: u32, stamina: u32) -> CombatantSnapshot {
        CombatantSnapshot::new("warrior", 100, 100)
            .with_hp(hp)
            .with_stamina(stamina)
    }

    fn config() -> StrategyConfig {
        StrategyConfig::default()
    }

    fn scores(entries: &[(StrategicMode, f64)]) -> ModeScores {
        let mut scores = ModeScores::default();
        for &(mode, score) in entries {
            scores.set(mode, score);
        }
        scores
    }

    #[test]
    fn test_healthy_even_fight_presses() {
        let (ai, opponent) = (fighter(90, 90), fighter(90, 90));
        let mode = next_mode(StrategicMode::Pressing, &ModeInputs::new(&ai, &opponent), &config()).unwrap();
        assert_eq!(mode, StrategicMode::Pressing);
    }

    #[test]
    fn test_low_stamina_winds() {
        let (ai, opponent) = (fighter(90, 10), fighter(90, 90));
        for current in StrategicMode::ALL {
            let mode = next_mode(current, &ModeInputs::new(&ai, &opponent), &config()).unwrap();
            assert_eq!(mode, StrategicMode::Winded, "from {}", current);
        }
    }

    #[test]
    fn test_low_health_is_critical() {
        let (ai, opponent) = (fighter(5, 80), fighter(90, 50));
        let mode = next_mode(StrategicMode::Pressing, &ModeInputs::new(&ai, &opponent), &config()).unwrap();
        assert_eq!(mode, StrategicMode::Critical);
    }

    #[test]
    fn test_finisher_needs_special() {
        let (ai, opponent) = (fighter(80, 80), fighter(5, 50));
        let ready = ModeInputs::new(&ai, &opponent);
        assert_eq!(next_mode(StrategicMode::Pressing, &ready, &config()).unwrap(), StrategicMode::Closing);

        let cooling = ModeInputs::new(&ai, &opponent).with_special_ready(false);
        assert_eq!(next_mode(StrategicMode::Pressing, &cooling, &config()).unwrap(), StrategicMode::Pressing);
    }

    #[test]
    fn test_repeating_opponent_triggers_reactive() {
        let (ai, opponent) = (fighter(60, 60), fighter(60, 40));
        let history = [ActionKind::Guard, ActionKind::Guard, ActionKind::Guard];
        let inputs = ModeInputs::new(&ai, &opponent).with_history(&history);
        assert_eq!(next_mode(StrategicMode::Pressing, &inputs, &config()).unwrap(), StrategicMode::Reactive);
    }

    #[test]
    fn test_special_barrage_triggers_guarded() {
        let (ai, opponent) = (fighter(58, 50), fighter(58, 80));
        let history = [ActionKind::StrikeLight, ActionKind::StrikeLight, ActionKind::Special];
        let inputs = ModeInputs::new(&ai, &opponent)
            .with_history(&history)
            .with_consecutive_heavy(1);
        let assessment = assess(&inputs, &config()).unwrap();
        assert!(assessment.triggered(StrategicMode::Guarded));
        assert_eq!(assessment.scores.best().map(|(m, _)| m), Some(StrategicMode::Guarded));
    }

    #[test]
    fn test_malformed_snapshot_is_error() {
        let ai = fighter(90, 90).with_hp(150);
        let opponent = fighter(90, 90);
        let result = next_mode(StrategicMode::Hurt, &ModeInputs::new(&ai, &opponent), &config());
        assert!(matches!(result, Err(DuelError::MalformedSnapshot(_))));
    }

    #[test]
    fn test_hysteresis_keeps_current_within_margin() {
        let s = scores(&[(StrategicMode::Guarded, 5.0), (StrategicMode::Pressing, 5.5)]);
        assert_eq!(hysteresis_pick(StrategicMode::Guarded, s, 0, &config()), None);

        let s = scores(&[(StrategicMode::Guarded, 5.0), (StrategicMode::Pressing, 6.5)]);
        assert_eq!(
            hysteresis_pick(StrategicMode::Guarded, s, 0, &config()),
            Some(StrategicMode::Pressing)
        );
    }

    #[test]
    fn test_unscored_current_adopts_best() {
        let s = scores(&[(StrategicMode::Hurt, 0.5)]);
        assert_eq!(hysteresis_pick(StrategicMode::Pressing, s, 0, &config()), Some(StrategicMode::Hurt));
        assert_eq!(hysteresis_pick(StrategicMode::Pressing, ModeScores::default(), 0, &config()), None);
    }

    #[test]
    fn test_persistence_favors_current() {
        let s = scores(&[(StrategicMode::Guarded, 5.0), (StrategicMode::Pressing, 7.0)]);
        assert_eq!(
            hysteresis_pick(StrategicMode::Guarded, s, 0, &config()),
            Some(StrategicMode::Pressing)
        );
        assert_eq!(hysteresis_pick(StrategicMode::Guarded, s, 3, &config()), None);
    }

    #[test]
    fn test_ties_go_to_more_urgent_mode() {
        let s = scores(&[(StrategicMode::Pressing, 4.0), (StrategicMode::Hurt, 4.0)]);
        assert_eq!(s.best(), Some((StrategicMode::Hurt, 4.0)));
    }

    #[test]
    fn test_winded_recovers_to_pressing() {
        // Stamina 0.30 clears the trigger but not the recovery level
        let (ai, opponent) = (fighter(60, 30), fighter(60, 40));
        let held = next_mode(StrategicMode::Winded, &ModeInputs::new(&ai, &opponent), &config()).unwrap();
        assert_eq!(held, StrategicMode::Winded);

        let ai = fighter(60, 45);
        let recovered = next_mode(StrategicMode::Winded, &ModeInputs::new(&ai, &opponent), &config()).unwrap();
        assert_eq!(recovered, StrategicMode::Pressing);
    }

    #[test]
    fn test_critical_steps_down_to_hurt() {
        let (ai, opponent) = (fighter(35, 25), fighter(35, 25));
        let assessment = assess(&ModeInputs::new(&ai, &opponent), &config()).unwrap();
        assert!(!assessment.triggered(StrategicMode::Critical));
        assert_eq!(assessment.fallback(StrategicMode::Critical, &config()), StrategicMode::Hurt);
    }

    #[test]
    fn test_scores_serialize_by_name() {
        let s = scores(&[(StrategicMode::Winded, 6.0)]);
        let json = serde_json::to_value(s).unwrap();
        assert_eq!(json["Winded"], 6.0);
        assert!(json.get("Pressing").is_none());
    }
}
