use crate::core::error::{DuelError, Result};
use crate::fuzzy::MembershipFunction;

/// A named continuous domain partitioned into labelled membership functions
#[derive(Debug, Clone, PartialEq)]
pub struct FuzzyVariable {
    name: String,
    min: f64,
    max: f64,
    terms: Vec<(String, MembershipFunction)>,
}

impl FuzzyVariable {
    pub fn new(name: impl Into<String>, min: f64, max: f64) -> Self {
        Self {
            name: name.into(),
            min,
            max,
            terms: Vec::new(),
        }
    }

    /// Add a labelled membership function; labels keep insertion order
    pub fn with_term(mut self, label: impl Into<String>, function: MembershipFunction) -> Self {
        self.terms.push((label.into(), function));
        self
    }

    /// Copy of this variable's partition under a different name
    pub fn renamed(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..self.clone()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn domain(&self) -> (f64, f64) {
        (self.min, self.max)
    }

    pub fn terms(&self) -> &[(String, MembershipFunction)] {
        &self.terms
    }

    pub fn label_index(&self, label: &str) -> Option<usize> {
        self.terms.iter().position(|(name, _)| name == label)
    }

    pub fn term(&self, label: &str) -> Option<&MembershipFunction> {
        self.terms.iter().find(|(name, _)| name == label).map(|(_, mf)| mf)
    }

    /// Clamp into the domain; NaN maps to the lower bound
    pub fn clamp(&self, value: f64) -> f64 {
        if value.is_nan() {
            self.min
        } else {
            value.clamp(self.min, self.max)
        }
    }

    /// Degree of `value` for every label, in label order
    pub fn fuzzify(&self, value: f64) -> Vec<f64> {
        let x = self.clamp(value);
        self.terms.iter().map(|(_, mf)| mf.degree(x)).collect()
    }

    /// Degree of `value` for one label (0.0 for unknown labels)
    pub fn degree(&self, label: &str, value: f64) -> f64 {
        self.term(label).map_or(0.0, |mf| mf.degree(self.clamp(value)))
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.min.is_finite() && self.max.is_finite() && self.min < self.max) {
            return Err(DuelError::InvalidDomain {
                variable: self.name.clone(),
                min: self.min,
                max: self.max,
            });
        }
        if self.terms.is_empty() {
            return Err(DuelError::EmptyVariable {
                variable: self.name.clone(),
            });
        }
        for (i, (label, function)) in self.terms.iter().enumerate() {
            if self.terms[..i].iter().any(|(other, _)| other == label) {
                return Err(DuelError::DuplicateLabel {
                    variable: self.name.clone(),
                    label: label.clone(),
                });
            }
            function
                .validate()
                .map_err(|reason| DuelError::InvalidMembership {
                    variable: self.name.clone(),
                    label: label.clone(),
                    reason,
                })?;
        }
        Ok(())
    }
}
