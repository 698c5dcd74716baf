use serde::{Deserialize, Serialize};

use crate::core::error::{DuelError, Result};
use crate::core::types::unit_clamp;

/// Point-in-time view of one combatant, supplied by the match host each turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatantSnapshot {
    /// Character identity, used to look up the special move's stamina cost
    pub name: String,
    pub hp: u32,
    pub max_hp: u32,
    pub stamina: u32,
    pub max_stamina: u32,
    /// Turns until the special move is usable again (0 = ready)
    pub special_cooldown: u32,
    /// Whether any status effect (poison, burn, ...) is active
    pub has_status_effects: bool,
}

impl CombatantSnapshot {
    /// Fresh combatant at full health and stamina with the special ready
    pub fn new(name: impl Into<String>, max_hp: u32, max_stamina: u32) -> Self {
        Self {
            name: name.into(),
            hp: max_hp,
            max_hp,
            stamina: max_stamina,
            max_stamina,
            special_cooldown: 0,
            has_status_effects: false,
        }
    }

    pub fn with_hp(mut self, hp: u32) -> Self {
        self.hp = hp;
        self
    }

    pub fn with_stamina(mut self, stamina: u32) -> Self {
        self.stamina = stamina;
        self
    }

    pub fn with_cooldown(mut self, turns: u32) -> Self {
        self.special_cooldown = turns;
        self
    }

    pub fn with_status_effects(mut self, active: bool) -> Self {
        self.has_status_effects = active;
        self
    }

    /// Health as a fraction of maximum (0.0 when max is 0)
    pub fn health_pct(&self) -> f64 {
        ratio(self.hp, self.max_hp)
    }

    /// Stamina as a fraction of maximum (0.0 when max is 0)
    pub fn stamina_pct(&self) -> f64 {
        ratio(self.stamina, self.max_stamina)
    }

    pub fn special_ready(&self) -> bool {
        self.special_cooldown == 0
    }

    /// Reject snapshots whose current values exceed their maxima
    pub fn validate(&self) -> Result<()> {
        if self.hp > self.max_hp {
            return Err(DuelError::MalformedSnapshot(format!(
                "{}: hp {} exceeds max_hp {}",
                self.name, self.hp, self.max_hp
            )));
        }
        if self.stamina > self.max_stamina {
            return Err(DuelError::MalformedSnapshot(format!(
                "{}: stamina {} exceeds max_stamina {}",
                self.name, self.stamina, self.max_stamina
            )));
        }
        Ok(())
    }
}

fn ratio(current: u32, max: u32) -> f64 {
    if max == 0 {
        return 0.0;
    }
    unit_clamp(current as f64 / max as f64)
}
