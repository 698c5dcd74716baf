use std::fmt;

use serde::{Deserialize, Serialize};

use crate::fuzzy::FuzzyVariable;

/// Number of evenly spaced points the centroid method samples
pub const CENTROID_SAMPLES: usize = 101;

/// How an aggregated output region becomes one crisp number
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DefuzzMethod {
    /// Weighted mean over the clipped output region
    #[default]
    Centroid,
    /// Peak of the strongest label
    Max,
}

impl DefuzzMethod {
    /// Collapse `aggregated` (one degree per label of `variable`) to a crisp value
    pub fn defuzzify(self, variable: &FuzzyVariable, aggregated: &[f64]) -> f64 {
        match self {
            DefuzzMethod::Centroid => centroid(variable, aggregated),
            DefuzzMethod::Max => max_membership(variable, aggregated),
        }
    }
}

impl fmt::Display for DefuzzMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefuzzMethod::Centroid => f.write_str("centroid"),
            DefuzzMethod::Max => f.write_str("max"),
        }
    }
}

fn centroid(variable: &FuzzyVariable, aggregated: &[f64]) -> f64 {
    let (min, max) = variable.domain();
    let step = (max - min) / (CENTROID_SAMPLES - 1) as f64;

    let mut weighted_sum = 0.0;
    let mut total = 0.0;
    for i in 0..CENTROID_SAMPLES {
        let x = min + i as f64 * step;
        let height = variable
            .terms()
            .iter()
            .zip(aggregated)
            .map(|((_, mf), &clip)| mf.degree(x).min(clip))
            .fold(0.0_f64, f64::max);
        weighted_sum += x * height;
        total += height;
    }

    if total > 0.0 {
        weighted_sum / total
    } else {
        0.0
    }
}

fn max_membership(variable: &FuzzyVariable, aggregated: &[f64]) -> f64 {
    let mut best: Option<(usize, f64)> = None;
    for (i, &degree) in aggregated.iter().enumerate() {
        if degree > best.map_or(0.0, |(_, d)| d) {
            best = Some((i, degree));
        }
    }

    match best {
        Some((i, degree)) => variable
            .terms()
            .get(i)
            .and_then(|(_, mf)| mf.peak())
            .unwrap_or(degree),
        None => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fuzzy::MembershipFunction;

    fn output() -> FuzzyVariable {
        FuzzyVariable::new("guard", 0.0, 1.0)
            .with_term("low", MembershipFunction::triangular(0.0, 0.0, 0.5))
            .with_term("high", MembershipFunction::triangular(0.5, 1.0, 1.0))
    }

    #[test]
    fn test_centroid_empty_region_is_zero() {
        assert_eq!(DefuzzMethod::Centroid.defuzzify(&output(), &[0.0, 0.0]), 0.0);
    }

    #[test]
    fn test_centroid_leans_toward_fired_label() {
        let high = DefuzzMethod::Centroid.defuzzify(&output(), &[0.0, 1.0]);
        let low = DefuzzMethod::Centroid.defuzzify(&output(), &[1.0, 0.0]);
        assert!(high > 0.7, "high centroid was {}", high);
        assert!(low < 0.3, "low centroid was {}", low);
    }

    #[test]
    fn test_centroid_symmetric_region() {
        let var = FuzzyVariable::new("mid", 0.0, 1.0)
            .with_term("mid", MembershipFunction::triangular(0.25, 0.5, 0.75));
        let value = DefuzzMethod::Centroid.defuzzify(&var, &[0.6]);
        assert!((value - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_max_returns_peak_of_strongest() {
        let value = DefuzzMethod::Max.defuzzify(&output(), &[0.3, 0.8]);
        assert_eq!(value, 1.0);
    }

    #[test]
    fn test_max_non_triangular_returns_degree() {
        let var = FuzzyVariable::new("g", 0.0, 1.0)
            .with_term("mid", MembershipFunction::gaussian(0.5, 0.1));
        assert_eq!(DefuzzMethod::Max.defuzzify(&var, &[0.4]), 0.4);
    }

    #[test]
    fn test_max_nothing_fired() {
        assert_eq!(DefuzzMethod::Max.defuzzify(&output(), &[0.0, 0.0]), 0.0);
    }

    #[test]
    fn test_method_parses_lowercase() {
        let method: DefuzzMethod = serde_json::from_str("\"max\"").unwrap();
        assert_eq!(method, DefuzzMethod::Max);
        assert_eq!(DefuzzMethod::default(), DefuzzMethod::Centroid);
    }
}
