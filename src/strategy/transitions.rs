//! The seven per-mode trigger checks
//!
//! Each check answers "should this mode be considered" plus a magnitude
//! in `[0, 1]` saying how strongly. Eligibility gates and score boosts
//! that depend on other signals are applied by the machine.

use crate::core::config::StrategyConfig;
use crate::core::types::ActionKind;

/// Outcome of one trigger check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Check {
    pub triggered: bool,
    pub magnitude: f64,
}

impl Check {
    pub const IDLE: Check = Check {
        triggered: false,
        magnitude: 0.0,
    };

    fn fired(magnitude: f64) -> Self {
        Self {
            triggered: true,
            magnitude: magnitude.clamp(0.0, 1.0),
        }
    }
}

/// Triggers when `value` sits below `threshold`; magnitude grows with the shortfall
fn below(value: f64, threshold: f64) -> Check {
    if threshold > 0.0 && value < threshold {
        Check::fired(1.0 - value / threshold)
    } else {
        Check::IDLE
    }
}

/// Stamina below a threshold that rises with threat
pub fn winded(stamina: f64, threat: f64, config: &StrategyConfig) -> Check {
    below(stamina, config.winded_threshold + threat * 0.1)
}

/// Health below a strict threshold, raised by threat and lowered by momentum
pub fn critical(health: f64, threat: f64, momentum: f64, config: &StrategyConfig) -> Check {
    let threshold = config.critical_threshold + threat * 0.05 - momentum * 0.05;
    let check = below(health, threshold);
    if check.triggered && momentum < -0.5 {
        Check::fired(check.magnitude + 0.2)
    } else {
        check
    }
}

/// Opponent health below a finisher threshold that shrinks as AI stamina fills
pub fn closing(opponent_health: f64, ai_stamina: f64, config: &StrategyConfig) -> Check {
    let threshold = config.closing_threshold * (1.0 - ai_stamina * 0.3);
    let check = below(opponent_health, threshold);
    if check.triggered && ai_stamina > 0.5 {
        Check::fired(check.magnitude + 0.2)
    } else {
        check
    }
}

/// Health below a moderate threshold adjusted by threat and momentum
pub fn hurt(health: f64, threat: f64, momentum: f64, config: &StrategyConfig) -> Check {
    below(health, config.hurt_threshold + threat * 0.1 - momentum * 0.05)
}

/// Minimum strength for the reactive check to fire
const REACTIVE_TRIGGER: f64 = 0.6;

/// Predictability of the opponent's recent moves
///
/// Two identical moves in a row score 0.8 (1.0 for three), A-B-A-B
/// alternation 0.7, a guard/dodge-only run 0.6, and mixing light strikes
/// with specials 0.65.
pub fn reactive(history: &[ActionKind]) -> Check {
    let n = history.len();
    if n < 2 {
        return Check::IDLE;
    }

    let mut strength: f64 = 0.0;
    if history[n - 1] == history[n - 2] {
        strength = if n >= 3 && history[n - 3] == history[n - 1] {
            1.0
        } else {
            0.8
        };
    }

    if n >= 4 {
        let last4 = &history[n - 4..];
        if last4[0] == last4[2] && last4[1] == last4[3] && last4[0] != last4[1] {
            strength = strength.max(0.7);
        }
    }

    if n >= 3 {
        let last3 = &history[n - 3..];
        let only_evasive = last3
            .iter()
            .all(|a| matches!(a, ActionKind::Guard | ActionKind::Dodge));
        if only_evasive && last3.contains(&ActionKind::Guard) && last3.contains(&ActionKind::Dodge) {
            strength = strength.max(0.6);
        }
        if last3.contains(&ActionKind::StrikeLight) && last3.contains(&ActionKind::Special) {
            strength = strength.max(0.65);
        }
    }

    if strength >= REACTIVE_TRIGGER {
        Check::fired(strength)
    } else {
        Check {
            triggered: false,
            magnitude: strength,
        }
    }
}

/// What the guarded check weighs
#[derive(Debug, Clone, Copy)]
pub struct GuardedFactors<'a> {
    pub threat: f64,
    pub last_opponent_action: Option<ActionKind>,
    pub consecutive_heavy: u32,
    pub ai_health: f64,
    pub history: &'a [ActionKind],
}

/// Weighted danger sum; fires at 0.5
pub fn guarded(factors: &GuardedFactors<'_>) -> Check {
    let mut score = factors.threat * 0.4;

    if factors.last_opponent_action == Some(ActionKind::Special) {
        score += 0.3;
    }

    score += match factors.consecutive_heavy {
        0 => 0.0,
        1 => 0.1,
        _ => 0.2,
    };

    if factors.ai_health < 0.4 {
        score += 0.2;
    } else if factors.ai_health < 0.6 {
        score += 0.1;
    }

    // light, light, special style build-up
    let n = factors.history.len();
    if n >= 3 {
        let last3 = &factors.history[n - 3..];
        let lights = last3.iter().filter(|&&a| a == ActionKind::StrikeLight).count();
        if lights >= 2 && last3.contains(&ActionKind::Special) {
            score += 0.15;
        }
    }

    if score >= 0.5 {
        Check::fired(score)
    } else {
        Check {
            triggered: false,
            magnitude: score,
        }
    }
}

/// Offensive confidence; only eligible while healthy and rested
pub fn pressing(health: f64, stamina: f64, health_differential: f64, momentum: f64) -> Check {
    if health > 0.5 && stamina > 0.3 {
        Check::fired(
            health * 0.3
                + stamina * 0.25
                + health_differential.max(0.0) * 0.25
                + momentum.max(0.0) * 0.2,
        )
    } else {
        Check::IDLE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::ActionKind::*;

    fn config() -> StrategyConfig {
        StrategyConfig::default()
    }

    #[test]
    fn test_winded_threshold_rises_with_threat() {
        assert!(!winded(0.3, 0.0, &config()).triggered);
        assert!(winded(0.3, 1.0, &config()).triggered);

        let check = winded(0.1, 0.0, &config());
        assert!(check.triggered);
        assert!((check.magnitude - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_critical_boost_on_bad_momentum() {
        let calm = critical(0.1, 0.0, 0.0, &config());
        let collapsing = critical(0.1, 0.0, -0.6, &config());
        assert!(calm.triggered);
        assert!(collapsing.magnitude > calm.magnitude);
        assert!(!critical(0.3, 0.0, 0.0, &config()).triggered);
    }

    #[test]
    fn test_critical_threshold_moves_with_threat_and_momentum() {
        // 0.21 sits above the base threshold of 0.2
        assert!(!critical(0.21, 0.0, 0.0, &config()).triggered);
        assert!(critical(0.21, 1.0, 0.0, &config()).triggered);
        assert!(!critical(0.19, 0.0, 1.0, &config()).triggered);
    }

    #[test]
    fn test_closing_scaled_by_stamina() {
        // Full stamina shrinks the window to 0.105
        assert!(closing(0.12, 0.0, &config()).triggered);
        assert!(!closing(0.12, 1.0, &config()).triggered);
        let check = closing(0.0, 0.9, &config());
        assert_eq!(check.magnitude, 1.0);
    }

    #[test]
    fn test_hurt() {
        assert!(hurt(0.4, 0.0, 0.0, &config()).triggered);
        assert!(!hurt(0.6, 0.0, 0.0, &config()).triggered);
        assert!(!hurt(0.48, 0.0, 1.0, &config()).triggered);
    }

    #[test]
    fn test_reactive_repeats() {
        assert!(!reactive(&[StrikeLight]).triggered);
        assert_eq!(reactive(&[Guard, StrikeLight, StrikeLight]).magnitude, 0.8);
        assert_eq!(reactive(&[StrikeLight, StrikeLight, StrikeLight]).magnitude, 1.0);
    }

    #[test]
    fn test_reactive_alternation_and_mixes() {
        assert_eq!(reactive(&[Guard, Dodge, Guard, Dodge]).magnitude, 0.7);
        assert_eq!(reactive(&[Recover, Guard, Dodge]).magnitude, 0.0);
        assert_eq!(reactive(&[Dodge, Guard, Dodge]).magnitude, 0.6);
        let mix = reactive(&[StrikeLight, Recover, Special]);
        assert!(mix.triggered);
        assert_eq!(mix.magnitude, 0.65);
    }

    #[test]
    fn test_guarded_sum() {
        let quiet = GuardedFactors {
            threat: 0.2,
            last_opponent_action: None,
            consecutive_heavy: 0,
            ai_health: 0.9,
            history: &[],
        };
        assert!(!guarded(&quiet).triggered);

        let history = [StrikeLight, StrikeLight, Special];
        let loud = GuardedFactors {
            threat: 0.5,
            last_opponent_action: Some(Special),
            consecutive_heavy: 2,
            ai_health: 0.3,
            history: &history,
        };
        let check = guarded(&loud);
        assert!(check.triggered);
        // 0.2 + 0.3 + 0.2 + 0.2 + 0.15 clamps to 1
        assert_eq!(check.magnitude, 1.0);
    }

    #[test]
    fn test_pressing_gated() {
        assert!(!pressing(0.5, 0.9, 0.0, 0.0).triggered);
        assert!(!pressing(0.9, 0.3, 0.0, 0.0).triggered);
        let check = pressing(0.9, 0.9, 0.0, 0.0);
        assert!(check.triggered);
        assert!((check.magnitude - 0.495).abs() < 1e-12);
    }
}
