//! The tuned partitions and rule base the duel opponent ships with

use crate::core::error::Result;
use crate::core::types::ActionKind;
use crate::fuzzy::MembershipFunction as Mf;
use crate::fuzzy::{DefuzzMethod, FuzzyEngine, FuzzyRule, FuzzyVariable};

fn health_partition(name: &str) -> FuzzyVariable {
    FuzzyVariable::new(name, 0.0, 1.0)
        .with_term("very_low", Mf::triangular(0.0, 0.0, 0.2))
        .with_term("low", Mf::triangular(0.1, 0.3, 0.5))
        .with_term("medium", Mf::triangular(0.4, 0.6, 0.8))
        .with_term("high", Mf::triangular(0.7, 0.9, 1.0))
        .with_term("very_high", Mf::triangular(0.8, 1.0, 1.0))
}

/// Shared by the stamina inputs and every action output
fn stamina_partition(name: &str) -> FuzzyVariable {
    FuzzyVariable::new(name, 0.0, 1.0)
        .with_term("very_low", Mf::triangular(0.0, 0.0, 0.25))
        .with_term("low", Mf::triangular(0.15, 0.35, 0.55))
        .with_term("medium", Mf::triangular(0.45, 0.65, 0.85))
        .with_term("high", Mf::triangular(0.75, 0.9, 1.0))
        .with_term("very_high", Mf::triangular(0.9, 1.0, 1.0))
}

fn health_differential() -> FuzzyVariable {
    FuzzyVariable::new("health_differential", -1.0, 1.0)
        .with_term("large_disadvantage", Mf::triangular(-1.0, -0.5, 0.0))
        .with_term("disadvantage", Mf::triangular(-0.3, -0.1, 0.1))
        .with_term("even", Mf::triangular(-0.1, 0.0, 0.1))
        .with_term("advantage", Mf::triangular(-0.1, 0.1, 0.3))
        .with_term("large_advantage", Mf::triangular(0.0, 0.5, 1.0))
}

fn threat() -> FuzzyVariable {
    FuzzyVariable::new("threat", 0.0, 1.0)
        .with_term("very_low", Mf::triangular(0.0, 0.0, 0.3))
        .with_term("low", Mf::triangular(0.2, 0.4, 0.6))
        .with_term("medium", Mf::triangular(0.5, 0.7, 0.9))
        .with_term("high", Mf::triangular(0.8, 1.0, 1.0))
}

fn pattern_strength() -> FuzzyVariable {
    FuzzyVariable::new("pattern_strength", 0.0, 1.0)
        .with_term("none", Mf::triangular(0.0, 0.0, 0.3))
        .with_term("weak", Mf::triangular(0.2, 0.4, 0.6))
        .with_term("strong", Mf::triangular(0.5, 0.8, 1.0))
        .with_term("very_strong", Mf::triangular(0.7, 1.0, 1.0))
}

fn cooldown_status() -> FuzzyVariable {
    FuzzyVariable::new("cooldown_status", 0.0, 1.0)
        .with_term("not_ready", Mf::triangular(0.0, 0.0, 0.5))
        .with_term("almost_ready", Mf::triangular(0.3, 0.6, 0.9))
        .with_term("ready", Mf::triangular(0.7, 1.0, 1.0))
}

type RuleRow = (&'static [(&'static str, &'static str)], (&'static str, &'static str), f64);

#[rustfmt::skip]
const STANDARD_RULES: &[RuleRow] = &[
    // Survival
    (&[("ai_health", "very_low"), ("ai_stamina", "high")], ("recover", "very_high"), 1.0),
    (&[("ai_stamina", "very_low")], ("recover", "very_high"), 1.0),
    // Pressing an advantage
    (&[("ai_health", "high"), ("ai_stamina", "high"), ("opponent_health", "low")], ("special", "very_high"), 1.0),
    (&[("ai_health", "high"), ("ai_stamina", "medium"), ("health_differential", "advantage")], ("strike_light", "high"), 0.9),
    (&[("ai_health", "high"), ("ai_stamina", "high"), ("opponent_health", "medium")], ("strike_heavy", "high"), 0.8),
    // Threat response
    (&[("threat", "high"), ("ai_health", "medium")], ("guard", "high"), 0.9),
    (&[("threat", "high"), ("ai_health", "low")], ("dodge", "high"), 0.9),
    (&[("health_differential", "large_advantage"), ("ai_stamina", "high")], ("special", "high"), 0.85),
    (&[("health_differential", "large_disadvantage"), ("ai_stamina", "medium")], ("guard", "very_high"), 0.9),
    (&[("opponent_health", "very_low"), ("ai_stamina", "high")], ("special", "very_high"), 1.0),
    (&[("ai_health", "medium"), ("ai_stamina", "medium"), ("threat", "low")], ("strike_light", "medium"), 0.8),
    (&[("ai_stamina", "low"), ("ai_health", "high")], ("recover", "medium"), 0.7),
    (&[("health_differential", "even"), ("ai_stamina", "high")], ("special", "medium"), 0.75),
    (&[("threat", "medium"), ("ai_health", "high")], ("strike_light", "high"), 0.85),
    (&[("ai_health", "very_low"), ("opponent_health", "high")], ("dodge", "very_high"), 0.9),
    (&[("ai_stamina", "very_high"), ("opponent_health", "medium")], ("strike_light", "high"), 0.8),
    // Opponent patterns
    (&[("pattern_strength", "strong")], ("guard", "high"), 0.85),
    (&[("pattern_strength", "very_strong"), ("threat", "high")], ("dodge", "very_high"), 0.9),
    // Special readiness
    (&[("cooldown_status", "ready"), ("opponent_health", "low")], ("special", "very_high"), 1.0),
    (&[("cooldown_status", "not_ready"), ("ai_stamina", "high")], ("strike_light", "high"), 0.75),
    (&[("pattern_strength", "strong"), ("health_differential", "disadvantage")], ("guard", "very_high"), 0.9),
    // Finishing
    (&[("opponent_health", "very_low"), ("ai_stamina", "medium")], ("strike_light", "very_high"), 1.0),
    (&[("opponent_health", "very_low"), ("ai_stamina", "high")], ("strike_light", "very_high"), 1.0),
    (&[("opponent_health", "very_low"), ("ai_stamina", "very_high")], ("strike_light", "very_high"), 1.0),
    (&[("opponent_health", "low"), ("ai_stamina", "high"), ("cooldown_status", "not_ready")], ("strike_light", "high"), 0.9),
    (&[("opponent_health", "low"), ("ai_stamina", "very_high"), ("cooldown_status", "not_ready")], ("strike_heavy", "high"), 0.85),
    (&[("opponent_health", "low"), ("health_differential", "advantage"), ("ai_stamina", "medium")], ("strike_light", "high"), 0.9),
    (&[("opponent_health", "low"), ("health_differential", "large_advantage"), ("ai_stamina", "high")], ("strike_heavy", "high"), 0.9),
];

/// The shipped rule base as `FuzzyRule` values
pub fn standard_rules() -> Vec<FuzzyRule> {
    STANDARD_RULES
        .iter()
        .map(|(conditions, (variable, label), weight)| {
            conditions
                .iter()
                .fold(FuzzyRule::concluding(*variable, *label), |rule, (var, lbl)| {
                    rule.when(*var, *lbl)
                })
                .weighted(*weight)
        })
        .collect()
}

impl FuzzyEngine {
    /// Engine with the tuned partitions and rule base
    pub fn standard(method: DefuzzMethod) -> Result<FuzzyEngine> {
        let mut builder = FuzzyEngine::builder()
            .input(health_partition("ai_health"))
            .input(stamina_partition("ai_stamina"))
            .input(health_partition("opponent_health"))
            .input(stamina_partition("opponent_stamina"))
            .input(health_differential())
            .input(threat())
            .input(pattern_strength())
            .input(cooldown_status());

        let action_output = stamina_partition("action");
        for action in ActionKind::ALL {
            builder = builder.output(action_output.renamed(action.label()));
        }

        builder
            .rules(standard_rules())
            .defuzzification(method)
            .build()
    }
}
