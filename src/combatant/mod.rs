//! Read-only combatant view and the combat rules collaborator
//!
//! The decision core never mutates a combatant. It reads a snapshot taken
//! by the match host and asks a `CombatRules` implementation whether an
//! action is affordable right now.

mod rules;
mod snapshot;

pub use rules::{CombatRules, Feasibility, StandardRules};
pub use snapshot::CombatantSnapshot;
