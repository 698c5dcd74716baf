//! Continuous signals derived from the two combatant snapshots

use serde::Serialize;

use crate::combatant::CombatantSnapshot;
use crate::core::types::ActionKind;

/// Threat assumed when the snapshots can't be trusted
pub const NEUTRAL_THREAT: f64 = 0.5;
/// Momentum assumed when the snapshots can't be trusted
pub const NEUTRAL_MOMENTUM: f64 = 0.0;

/// AI health fraction minus opponent health fraction, in `[-1, 1]`
pub fn health_differential(ai: &CombatantSnapshot, opponent: &CombatantSnapshot) -> f64 {
    ai.health_pct() - opponent.health_pct()
}

/// Danger posed by the opponent this turn, in `[0, 1]`
pub fn threat_level(
    ai: &CombatantSnapshot,
    opponent: &CombatantSnapshot,
    last_opponent_action: Option<ActionKind>,
) -> f64 {
    let mut threat = 0.0;

    let hp_diff = health_differential(ai, opponent);
    if hp_diff < -0.2 {
        threat += 0.3;
    } else if hp_diff < -0.1 {
        threat += 0.15;
    }

    let opp_stamina = opponent.stamina_pct();
    if opp_stamina > 0.7 {
        threat += 0.2;
    } else if opp_stamina > 0.5 {
        threat += 0.1;
    }

    if last_opponent_action == Some(ActionKind::Special) {
        threat += 0.25;
    }
    if opponent.has_status_effects {
        threat += 0.1;
    }

    f64::min(threat, 1.0)
}

/// Which side has the advantage, in `[-1, 1]` (positive favors the AI)
///
/// Blends the health gap, the recent damage exchange and the stamina gap.
pub fn momentum(
    ai: &CombatantSnapshot,
    opponent: &CombatantSnapshot,
    damage_dealt: u32,
    damage_taken: u32,
) -> f64 {
    let mut momentum = health_differential(ai, opponent) * 0.4;

    if damage_dealt > 0 || damage_taken > 0 {
        let dealt = f64::from(damage_dealt);
        let ratio = dealt / (f64::from(damage_taken) + dealt + 1.0);
        momentum += (ratio - 0.5) * 0.3;
    }

    momentum += (ai.stamina_pct() - opponent.stamina_pct()) * 0.3;
    momentum.clamp(-1.0, 1.0)
}

/// Everything the mode checks read, computed once per evaluation
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Signals {
    pub ai_health: f64,
    pub ai_stamina: f64,
    pub opponent_health: f64,
    pub opponent_stamina: f64,
    pub health_differential: f64,
    pub threat: f64,
    pub momentum: f64,
}

impl Signals {
    pub fn derive(
        ai: &CombatantSnapshot,
        opponent: &CombatantSnapshot,
        last_opponent_action: Option<ActionKind>,
        damage_dealt: u32,
        damage_taken: u32,
    ) -> Self {
        Self {
            ai_health: ai.health_pct(),
            ai_stamina: ai.stamina_pct(),
            opponent_health: opponent.health_pct(),
            opponent_stamina: opponent.stamina_pct(),
            health_differential: health_differential(ai, opponent),
            threat: threat_level(ai, opponent, last_opponent_action),
            momentum: momentum(ai, opponent, damage_dealt, damage_taken),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fighter(hp: u32, stamina: u32) -> CombatantSnapshot {
        CombatantSnapshot::new("warrior", 100, 100)
            .with_hp(hp)
            .with_stamina(stamina)
    }

    #[test]
    fn test_threat_calm_opponent() {
        let threat = threat_level(&fighter(80, 80), &fighter(80, 40), None);
        assert_eq!(threat, 0.0);
    }

    #[test]
    fn test_threat_accumulates() {
        let opponent = fighter(90, 90).with_status_effects(true);
        let threat = threat_level(&fighter(30, 50), &opponent, Some(ActionKind::Special));
        // 0.3 health gap + 0.2 stamina + 0.25 special + 0.1 status
        assert!((threat - 0.85).abs() < 1e-12);
    }

    #[test]
    fn test_threat_small_gap() {
        let threat = threat_level(&fighter(75, 50), &fighter(90, 50), None);
        assert!((threat - 0.15).abs() < 1e-12);
    }

    #[test]
    fn test_momentum_neutral_when_even() {
        assert_eq!(momentum(&fighter(50, 50), &fighter(50, 50), 0, 0), 0.0);
    }

    #[test]
    fn test_momentum_follows_damage_exchange() {
        let even = fighter(50, 50);
        let winning = momentum(&even, &even, 30, 0);
        let losing = momentum(&even, &even, 0, 30);
        assert!(winning > 0.0);
        assert!(losing < 0.0);
        assert!((losing + 0.15).abs() < 1e-12);
    }

    #[test]
    fn test_momentum_bounded() {
        let value = momentum(&fighter(100, 100), &fighter(0, 0), 500, 0);
        assert!((-1.0..=1.0).contains(&value));
        assert!(value > 0.5);
    }

    #[test]
    fn test_signals_derive() {
        let signals = Signals::derive(&fighter(40, 60), &fighter(80, 20), None, 0, 0);
        assert!((signals.health_differential + 0.4).abs() < 1e-12);
        assert!((signals.threat - 0.3).abs() < 1e-12);
        assert!((signals.momentum - (-0.16 + 0.12)).abs() < 1e-12);
    }
}
