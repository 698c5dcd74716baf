//! AI configuration with documented constants
//!
//! Every threshold the decision pipeline consults lives here so a match
//! host can tune an opponent from a TOML file instead of recompiling.
//! All sections default to the tuned values, so partial files are fine.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::combatant::StandardRules;
use crate::core::error::{DuelError, Result};
use crate::core::types::Difficulty;
use crate::fuzzy::DefuzzMethod;

/// Thresholds for the strategic mode machine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyConfig {
    /// Stamina fraction below which the AI becomes Winded
    ///
    /// Rises by up to 0.1 under maximum threat, so a pressured AI
    /// backs off to recover a little earlier.
    pub winded_threshold: f64,

    /// Stamina fraction a Winded AI must exceed before it resumes Pressing
    pub winded_recovery: f64,

    /// Health fraction below which the AI is Hurt
    pub hurt_threshold: f64,

    /// Health fraction below which the AI is Critical
    ///
    /// Must stay below `hurt_threshold`. A Critical AI only steps back to
    /// Hurt once health climbs past 1.5x this value.
    pub critical_threshold: f64,

    /// Opponent health fraction that opens a Closing (finisher) window
    ///
    /// Scaled down by up to 30% as the AI's own stamina fills.
    pub closing_threshold: f64,

    /// Margin a challenger mode must beat the current mode's score by
    ///
    /// At 0.2 a new mode needs a 20% better score. Lower values make the
    /// AI flip modes more readily.
    pub hysteresis_margin: f64,

    /// Score bonus per turn already spent in the current mode
    pub persistence_step: f64,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            winded_threshold: 0.25,
            winded_recovery: 0.4,
            hurt_threshold: 0.5,
            critical_threshold: 0.2,
            closing_threshold: 0.15,
            hysteresis_margin: 0.2,
            persistence_step: 0.1,
        }
    }
}

/// Opponent move tracking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternConfig {
    /// Number of recent opponent moves kept in the sliding window
    pub window_capacity: usize,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self { window_capacity: 5 }
    }
}

/// Per-turn decision pipeline settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Difficulty preset applied as per-action score multipliers
    pub difficulty: Difficulty,

    /// Scale scores with the current mode's row of the difficulty table
    ///
    /// Off by default, in which case every mode uses the Pressing row.
    pub mode_aware_difficulty: bool,

    /// Turns a special move stays on cooldown after use
    ///
    /// Only used to turn the remaining cooldown into a readiness ratio.
    pub special_cooldown_turns: u32,

    /// Amount the recent-damage trackers fall by on a turn without damage
    pub damage_decay: u32,

    /// Pattern strength above which predicted moves start shaping scores
    pub strong_pattern_threshold: f64,

    /// Pattern strength above which strike and special predictions are countered
    pub counter_boost_threshold: f64,

    /// Seed for the action sampler; `None` draws one from the OS
    pub seed: Option<u64>,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Neutral,
            mode_aware_difficulty: false,
            special_cooldown_turns: 4,
            damage_decay: 5,
            strong_pattern_threshold: 0.6,
            counter_boost_threshold: 0.7,
            seed: None,
        }
    }
}

/// Fuzzy engine settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FuzzyConfig {
    pub defuzzification: DefuzzMethod,
}

/// Complete AI configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    pub strategy: StrategyConfig,
    pub pattern: PatternConfig,
    pub controller: ControllerConfig,
    pub fuzzy: FuzzyConfig,
    /// Stamina costs used by the bundled combat rules
    pub combat: StandardRules,
}

impl AiConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: AiConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&contents)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        let s = &self.strategy;

        for (name, value) in [
            ("winded_threshold", s.winded_threshold),
            ("winded_recovery", s.winded_recovery),
            ("hurt_threshold", s.hurt_threshold),
            ("critical_threshold", s.critical_threshold),
            ("closing_threshold", s.closing_threshold),
        ] {
            if !(value > 0.0 && value < 1.0) {
                return Err(DuelError::InvalidConfig(format!(
                    "{} ({}) must be inside (0, 1)",
                    name, value
                )));
            }
        }

        // Critical must trigger before Hurt
        if s.critical_threshold >= s.hurt_threshold {
            return Err(DuelError::InvalidConfig(format!(
                "critical_threshold ({}) should be < hurt_threshold ({})",
                s.critical_threshold, s.hurt_threshold
            )));
        }

        if s.winded_recovery < s.winded_threshold {
            return Err(DuelError::InvalidConfig(format!(
                "winded_recovery ({}) should be >= winded_threshold ({})",
                s.winded_recovery, s.winded_threshold
            )));
        }

        if s.hysteresis_margin < 0.0 || s.persistence_step < 0.0 {
            return Err(DuelError::InvalidConfig(
                "hysteresis_margin and persistence_step must be non-negative".into(),
            ));
        }

        if self.pattern.window_capacity < 2 {
            return Err(DuelError::InvalidConfig(format!(
                "window_capacity ({}) must hold at least 2 moves",
                self.pattern.window_capacity
            )));
        }

        let c = &self.controller;
        for (name, value) in [
            ("strong_pattern_threshold", c.strong_pattern_threshold),
            ("counter_boost_threshold", c.counter_boost_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(DuelError::InvalidConfig(format!(
                    "{} ({}) must be inside [0, 1]",
                    name, value
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(AiConfig::default().validate().is_ok());
    }

    #[test]
    fn test_default_values() {
        let config = AiConfig::new();
        assert_eq!(config.strategy.winded_threshold, 0.25);
        assert_eq!(config.pattern.window_capacity, 5);
        assert_eq!(config.controller.special_cooldown_turns, 4);
        assert_eq!(config.controller.difficulty, Difficulty::Neutral);
        assert_eq!(config.fuzzy.defuzzification, DefuzzMethod::Centroid);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = AiConfig::from_toml_str(
            r#"
            [controller]
            difficulty = "aggressive"
            seed = 7
            "#,
        )
        .expect("Should parse partial config");

        assert_eq!(config.controller.difficulty, Difficulty::Aggressive);
        assert_eq!(config.controller.seed, Some(7));
        assert_eq!(config.strategy, StrategyConfig::default());
    }

    #[test]
    fn test_rejects_inverted_health_thresholds() {
        let mut config = AiConfig::default();
        config.strategy.critical_threshold = 0.6;
        assert!(matches!(config.validate(), Err(DuelError::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_tiny_window() {
        let mut config = AiConfig::default();
        config.pattern.window_capacity = 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_toml() {
        let result = AiConfig::from_toml_str("[strategy]\nhurt_threshold = \"high\"");
        assert!(matches!(result, Err(DuelError::TomlError(_))));
    }

    #[test]
    fn test_load_shipped_config() {
        let config = AiConfig::load("data/ai_config.toml").expect("Should load data/ai_config.toml");
        assert_eq!(config.strategy.hurt_threshold, 0.5);
        assert_eq!(config.combat.special_cost_for("samurai"), 28);
    }
}
