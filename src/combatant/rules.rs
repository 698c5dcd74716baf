use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::combatant::CombatantSnapshot;
use crate::core::types::ActionKind;

/// Outcome of a feasibility query, with a human-readable reason
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Feasibility {
    pub allowed: bool,
    pub reason: String,
}

impl Feasibility {
    pub fn allowed(reason: impl Into<String>) -> Self {
        Self {
            allowed: true,
            reason: reason.into(),
        }
    }

    pub fn denied(reason: impl Into<String>) -> Self {
        Self {
            allowed: false,
            reason: reason.into(),
        }
    }
}

/// Resource rules owned by the combat layer
///
/// The decision core consults these before committing to an action but
/// never spends stamina or ticks cooldowns itself.
pub trait CombatRules: Send + Sync {
    /// Whether `actor` can afford `action` this turn
    fn can_perform(&self, actor: &CombatantSnapshot, action: ActionKind) -> Feasibility;

    /// Stamina the actor's special move costs
    fn special_stamina_cost(&self, actor: &CombatantSnapshot) -> u32;

    /// Whether the special move is off cooldown
    fn can_use_special(&self, actor: &CombatantSnapshot) -> bool {
        actor.special_ready()
    }
}

/// Flat stamina costs per action, with per-character special costs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StandardRules {
    pub strike_light_cost: u32,
    pub strike_heavy_cost: u32,
    pub guard_cost: u32,
    pub dodge_cost: u32,
    /// Special cost for characters missing from `special_costs`
    pub default_special_cost: u32,
    /// Special cost keyed by lowercase character name
    pub special_costs: BTreeMap<String, u32>,
}

impl Default for StandardRules {
    fn default() -> Self {
        let special_costs = [
            ("warrior", 30),
            ("tank", 35),
            ("assassin", 30),
            ("mage", 35),
            ("samurai", 28),
        ]
        .into_iter()
        .map(|(name, cost)| (name.to_string(), cost))
        .collect();

        Self {
            strike_light_cost: 10,
            strike_heavy_cost: 15,
            guard_cost: 5,
            dodge_cost: 8,
            default_special_cost: 30,
            special_costs,
        }
    }
}

impl StandardRules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Special cost for a character name (case-insensitive)
    pub fn special_cost_for(&self, name: &str) -> u32 {
        self.special_costs
            .get(&name.to_ascii_lowercase())
            .copied()
            .unwrap_or(self.default_special_cost)
    }

    /// Stamina `actor` spends on `action`; specials use the character's cost
    pub fn stamina_cost(&self, actor: &CombatantSnapshot, action: ActionKind) -> u32 {
        match action {
            ActionKind::StrikeLight => self.strike_light_cost,
            ActionKind::StrikeHeavy => self.strike_heavy_cost,
            ActionKind::Guard => self.guard_cost,
            ActionKind::Dodge => self.dodge_cost,
            ActionKind::Recover => 0,
            ActionKind::Special => self.special_cost_for(&actor.name),
        }
    }
}

impl CombatRules for StandardRules {
    fn can_perform(&self, actor: &CombatantSnapshot, action: ActionKind) -> Feasibility {
        match action {
            ActionKind::Recover => Feasibility::allowed("Can rest"),
            ActionKind::Special => {
                if !self.can_use_special(actor) {
                    return Feasibility::denied(format!(
                        "On cooldown ({} turns remaining)",
                        actor.special_cooldown
                    ));
                }
                let cost = self.special_stamina_cost(actor);
                if actor.stamina < cost {
                    return Feasibility::denied(format!(
                        "Not enough stamina (need {}, have {})",
                        cost, actor.stamina
                    ));
                }
                Feasibility::allowed("Special move available")
            }
            _ => {
                let cost = self.stamina_cost(actor, action);
                if actor.stamina < cost {
                    Feasibility::denied(format!(
                        "Not enough stamina (need {}, have {})",
                        cost, actor.stamina
                    ))
                } else {
                    Feasibility::allowed(format!("Can perform {}", action))
                }
            }
        }
    }

    fn special_stamina_cost(&self, actor: &CombatantSnapshot) -> u32 {
        self.special_cost_for(&actor.name)
    }
}
