//! Fuzzy inference: crisp duel signals in, graded action preferences out

mod defuzz;
mod engine;
mod membership;
mod rule;
mod rulebase;
mod variable;

pub use defuzz::{DefuzzMethod, CENTROID_SAMPLES};
pub use engine::{EngineBuilder, FuzzyEngine, FuzzyInputs, InputSignal};
pub use membership::MembershipFunction;
pub use rule::{Clause, FuzzyRule};
pub use rulebase::standard_rules;
pub use variable::FuzzyVariable;
