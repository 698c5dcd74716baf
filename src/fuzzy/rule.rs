use serde::{Deserialize, Serialize};

/// One `variable is label` clause
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clause {
    pub variable: String,
    pub label: String,
}

impl Clause {
    pub fn new(variable: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            variable: variable.into(),
            label: label.into(),
        }
    }
}

/// `IF c1 AND c2 ... THEN conclusion`, scaled by a weight in `[0, 1]`
///
/// Rules only support conjunction. A rule with no conditions always fires
/// at its full weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuzzyRule {
    pub conditions: Vec<Clause>,
    pub conclusion: Clause,
    pub weight: f64,
}

impl FuzzyRule {
    /// Start a rule concluding `variable is label` at full weight
    pub fn concluding(variable: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            conditions: Vec::new(),
            conclusion: Clause::new(variable, label),
            weight: 1.0,
        }
    }

    pub fn when(mut self, variable: impl Into<String>, label: impl Into<String>) -> Self {
        self.conditions.push(Clause::new(variable, label));
        self
    }

    pub fn weighted(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    /// Weight times the weakest condition degree
    ///
    /// `degree` resolves a clause to its membership degree for the current
    /// inputs.
    pub fn firing_strength(&self, mut degree: impl FnMut(&Clause) -> f64) -> f64 {
        let weakest = self
            .conditions
            .iter()
            .map(|clause| degree(clause))
            .fold(1.0_f64, f64::min);
        self.weight * weakest
    }
}

/// A rule with names resolved to engine slots
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CompiledRule {
    /// `(input index, label index)` pairs
    pub conditions: Vec<(usize, usize)>,
    pub output: usize,
    pub output_label: usize,
    pub weight: f64,
}

impl CompiledRule {
    pub fn firing_strength(&self, degrees: &[Vec<f64>]) -> f64 {
        let weakest = self
            .conditions
            .iter()
            .map(|&(var, label)| degrees[var][label])
            .fold(1.0_f64, f64::min);
        self.weight * weakest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_collects_clauses() {
        let rule = FuzzyRule::concluding("recover", "very_high")
            .when("ai_health", "very_low")
            .when("ai_stamina", "high")
            .weighted(0.9);

        assert_eq!(rule.conditions.len(), 2);
        assert_eq!(rule.conditions[1], Clause::new("ai_stamina", "high"));
        assert_eq!(rule.conclusion.variable, "recover");
        assert_eq!(rule.weight, 0.9);
    }

    #[test]
    fn test_firing_strength_is_weighted_min() {
        let rule = FuzzyRule::concluding("guard", "high")
            .when("threat", "high")
            .when("ai_health", "medium")
            .weighted(0.5);

        let strength = rule.firing_strength(|clause| match clause.variable.as_str() {
            "threat" => 0.8,
            _ => 0.4,
        });
        assert!((strength - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_unconditional_rule_fires_at_weight() {
        let rule = FuzzyRule::concluding("recover", "low").weighted(0.3);
        assert_eq!(rule.firing_strength(|_| 0.0), 0.3);
    }

    #[test]
    fn test_compiled_rule_matches_named_rule() {
        let compiled = CompiledRule {
            conditions: vec![(0, 1), (1, 0)],
            output: 0,
            output_label: 2,
            weight: 0.75,
        };
        let degrees = vec![vec![0.0, 0.6], vec![0.9, 0.1]];
        assert!((compiled.firing_strength(&degrees) - 0.45).abs() < 1e-12);
    }
}
