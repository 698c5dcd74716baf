//! Mamdani-style inference over the duel's crisp signals
//!
//! Fuzzify every input, fire each rule at `weight * min(conditions)`,
//! aggregate per output label with `max`, then defuzzify one crisp score
//! per action. The engine is immutable once built and can be shared
//! across any number of matches.

use serde::Serialize;

use crate::combatant::CombatantSnapshot;
use crate::core::error::{DuelError, Result};
use crate::core::types::{unit_clamp, ActionKind, ActionScores, ActionTable};
use crate::fuzzy::rule::CompiledRule;
use crate::fuzzy::{DefuzzMethod, FuzzyRule, FuzzyVariable};

/// The crisp signals the engine reasons over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InputSignal {
    AiHealth,
    AiStamina,
    OpponentHealth,
    OpponentStamina,
    HealthDifferential,
    Threat,
    PatternStrength,
    CooldownStatus,
}

impl InputSignal {
    pub const ALL: [InputSignal; 8] = [
        InputSignal::AiHealth,
        InputSignal::AiStamina,
        InputSignal::OpponentHealth,
        InputSignal::OpponentStamina,
        InputSignal::HealthDifferential,
        InputSignal::Threat,
        InputSignal::PatternStrength,
        InputSignal::CooldownStatus,
    ];

    /// Variable name the signal is bound to
    pub fn name(self) -> &'static str {
        match self {
            InputSignal::AiHealth => "ai_health",
            InputSignal::AiStamina => "ai_stamina",
            InputSignal::OpponentHealth => "opponent_health",
            InputSignal::OpponentStamina => "opponent_stamina",
            InputSignal::HealthDifferential => "health_differential",
            InputSignal::Threat => "threat",
            InputSignal::PatternStrength => "pattern_strength",
            InputSignal::CooldownStatus => "cooldown_status",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|signal| signal.name() == name)
    }
}

/// Crisp values for one inference pass
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FuzzyInputs {
    pub ai_health: f64,
    pub ai_stamina: f64,
    pub opponent_health: f64,
    pub opponent_stamina: f64,
    /// AI health fraction minus opponent health fraction, in `[-1, 1]`
    pub health_differential: f64,
    pub threat: f64,
    pub pattern_strength: f64,
    /// 1.0 when the special is ready
    pub cooldown_ratio: f64,
}

impl FuzzyInputs {
    pub fn from_snapshots(
        ai: &CombatantSnapshot,
        opponent: &CombatantSnapshot,
        threat: f64,
        pattern_strength: f64,
        cooldown_ratio: f64,
    ) -> Self {
        let ai_health = ai.health_pct();
        let opponent_health = opponent.health_pct();
        Self {
            ai_health,
            ai_stamina: ai.stamina_pct(),
            opponent_health,
            opponent_stamina: opponent.stamina_pct(),
            health_differential: ai_health - opponent_health,
            threat: unit_clamp(threat),
            pattern_strength: unit_clamp(pattern_strength),
            cooldown_ratio: unit_clamp(cooldown_ratio),
        }
    }

    pub fn value(&self, signal: InputSignal) -> f64 {
        match signal {
            InputSignal::AiHealth => self.ai_health,
            InputSignal::AiStamina => self.ai_stamina,
            InputSignal::OpponentHealth => self.opponent_health,
            InputSignal::OpponentStamina => self.opponent_stamina,
            InputSignal::HealthDifferential => self.health_differential,
            InputSignal::Threat => self.threat,
            InputSignal::PatternStrength => self.pattern_strength,
            InputSignal::CooldownStatus => self.cooldown_ratio,
        }
    }
}

/// Collects variables and rules, then validates everything in `build`
#[derive(Debug, Clone, Default)]
pub struct EngineBuilder {
    inputs: Vec<FuzzyVariable>,
    outputs: Vec<FuzzyVariable>,
    rules: Vec<FuzzyRule>,
    method: DefuzzMethod,
}

impl EngineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Input variable; its name must be one of the `InputSignal` names
    pub fn input(mut self, variable: FuzzyVariable) -> Self {
        self.inputs.push(variable);
        self
    }

    /// Output variable; its name must be an action label
    pub fn output(mut self, variable: FuzzyVariable) -> Self {
        self.outputs.push(variable);
        self
    }

    pub fn rule(mut self, rule: FuzzyRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn rules(mut self, rules: impl IntoIterator<Item = FuzzyRule>) -> Self {
        self.rules.extend(rules);
        self
    }

    pub fn defuzzification(mut self, method: DefuzzMethod) -> Self {
        self.method = method;
        self
    }

    /// Validate every table and resolve rule names to slots
    ///
    /// Rule numbers in errors are 1-based positions in insertion order.
    pub fn build(self) -> Result<FuzzyEngine> {
        let all_vars = self.inputs.iter().chain(self.outputs.iter());
        for (i, variable) in all_vars.clone().enumerate() {
            variable.validate()?;
            if all_vars.clone().take(i).any(|other| other.name() == variable.name()) {
                return Err(DuelError::DuplicateVariable(variable.name().to_string()));
            }
        }

        let mut input_signals = Vec::with_capacity(self.inputs.len());
        for variable in &self.inputs {
            let signal = InputSignal::from_name(variable.name())
                .ok_or_else(|| DuelError::UnknownSignal(variable.name().to_string()))?;
            input_signals.push(signal);
        }
        for signal in InputSignal::ALL {
            if !input_signals.contains(&signal) {
                return Err(DuelError::MissingVariable(signal.name().to_string()));
            }
        }

        let mut action_slots = ActionTable::splat(0usize);
        for variable in &self.outputs {
            if !ActionKind::ALL.iter().any(|a| a.label() == variable.name()) {
                return Err(DuelError::UnknownAction(variable.name().to_string()));
            }
        }
        for action in ActionKind::ALL {
            let slot = self
                .outputs
                .iter()
                .position(|variable| variable.name() == action.label())
                .ok_or_else(|| DuelError::MissingVariable(action.label().to_string()))?;
            action_slots[action] = slot;
        }

        let compiled = self
            .rules
            .iter()
            .enumerate()
            .map(|(i, rule)| self.compile(i + 1, rule))
            .collect::<Result<Vec<_>>>()?;

        tracing::info!(
            inputs = self.inputs.len(),
            outputs = self.outputs.len(),
            rules = compiled.len(),
            method = %self.method,
            "Fuzzy engine built"
        );

        Ok(FuzzyEngine {
            inputs: self.inputs,
            input_signals,
            outputs: self.outputs,
            rules: self.rules,
            compiled,
            method: self.method,
            action_slots,
        })
    }

    fn compile(&self, number: usize, rule: &FuzzyRule) -> Result<CompiledRule> {
        if !(rule.weight.is_finite() && (0.0..=1.0).contains(&rule.weight)) {
            return Err(DuelError::InvalidRuleWeight {
                rule: number,
                weight: rule.weight,
            });
        }

        let mut conditions = Vec::with_capacity(rule.conditions.len());
        for clause in &rule.conditions {
            let var = self
                .inputs
                .iter()
                .position(|v| v.name() == clause.variable)
                .ok_or_else(|| DuelError::UndefinedVariable {
                    rule: number,
                    variable: clause.variable.clone(),
                })?;
            let label = label_slot(number, &self.inputs[var], &clause.label)?;
            conditions.push((var, label));
        }

        let conclusion = &rule.conclusion;
        let output = match self.outputs.iter().position(|v| v.name() == conclusion.variable) {
            Some(output) => output,
            None if self.inputs.iter().any(|v| v.name() == conclusion.variable) => {
                return Err(DuelError::ConclusionNotOutput {
                    rule: number,
                    variable: conclusion.variable.clone(),
                });
            }
            None => {
                return Err(DuelError::UndefinedVariable {
                    rule: number,
                    variable: conclusion.variable.clone(),
                });
            }
        };
        let output_label = label_slot(number, &self.outputs[output], &conclusion.label)?;

        Ok(CompiledRule {
            conditions,
            output,
            output_label,
            weight: rule.weight,
        })
    }
}

fn label_slot(rule: usize, variable: &FuzzyVariable, label: &str) -> Result<usize> {
    variable
        .label_index(label)
        .ok_or_else(|| DuelError::UndefinedLabel {
            rule,
            variable: variable.name().to_string(),
            label: label.to_string(),
        })
}

/// Validated, immutable inference tables
#[derive(Debug, Clone)]
pub struct FuzzyEngine {
    inputs: Vec<FuzzyVariable>,
    input_signals: Vec<InputSignal>,
    outputs: Vec<FuzzyVariable>,
    rules: Vec<FuzzyRule>,
    compiled: Vec<CompiledRule>,
    method: DefuzzMethod,
    action_slots: ActionTable<usize>,
}

impl FuzzyEngine {
    pub fn builder() -> EngineBuilder {
        EngineBuilder::new()
    }

    pub fn method(&self) -> DefuzzMethod {
        self.method
    }

    pub fn inputs(&self) -> &[FuzzyVariable] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[FuzzyVariable] {
        &self.outputs
    }

    pub fn rules(&self) -> &[FuzzyRule] {
        &self.rules
    }

    /// Membership degrees per input variable, in declaration order
    pub fn fuzzify(&self, inputs: &FuzzyInputs) -> Vec<Vec<f64>> {
        self.inputs
            .iter()
            .zip(&self.input_signals)
            .map(|(variable, &signal)| variable.fuzzify(inputs.value(signal)))
            .collect()
    }

    /// Firing strength of every rule, in rule order
    pub fn firing_strengths(&self, inputs: &FuzzyInputs) -> Vec<f64> {
        let degrees = self.fuzzify(inputs);
        self.compiled
            .iter()
            .map(|rule| rule.firing_strength(&degrees))
            .collect()
    }

    /// Max-aggregated degree per output label
    fn aggregate(&self, degrees: &[Vec<f64>]) -> Vec<Vec<f64>> {
        let mut aggregated: Vec<Vec<f64>> = self
            .outputs
            .iter()
            .map(|variable| vec![0.0; variable.terms().len()])
            .collect();

        for rule in &self.compiled {
            let strength = rule.firing_strength(degrees);
            let slot = &mut aggregated[rule.output][rule.output_label];
            if strength > *slot {
                *slot = strength;
            }
        }
        aggregated
    }

    /// Defuzzified score per action, before normalization
    pub fn evaluate(&self, inputs: &FuzzyInputs) -> ActionScores {
        let aggregated = self.aggregate(&self.fuzzify(inputs));
        let scores = ActionTable::from_fn(|action| {
            let slot = self.action_slots[action];
            self.method.defuzzify(&self.outputs[slot], &aggregated[slot])
        });
        scores.sanitized()
    }

    /// Per-action preference for this turn, normalized when any action scores
    pub fn score_actions(
        &self,
        ai: &CombatantSnapshot,
        opponent: &CombatantSnapshot,
        threat: f64,
        pattern_strength: f64,
        cooldown_ratio: f64,
    ) -> ActionScores {
        let inputs = FuzzyInputs::from_snapshots(ai, opponent, threat, pattern_strength, cooldown_ratio);
        self.evaluate(&inputs).normalized()
    }
}
