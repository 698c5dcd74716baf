use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::error::DuelError;

/// The AI's behavioral stance, re-evaluated every turn
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategicMode {
    /// Healthy and confident; presses the offense
    #[default]
    Pressing,
    /// Expects a big hit; defends
    Guarded,
    /// Opponent is predictable; counters their habits
    Reactive,
    /// Low health; plays safe
    Hurt,
    /// Very low health; takes big risks
    Critical,
    /// Low stamina; recovers
    Winded,
    /// Opponent nearly down; goes for the finish
    Closing,
}

impl StrategicMode {
    /// All modes, most urgent first
    pub const ALL: [StrategicMode; 7] = [
        StrategicMode::Winded,
        StrategicMode::Critical,
        StrategicMode::Closing,
        StrategicMode::Hurt,
        StrategicMode::Reactive,
        StrategicMode::Guarded,
        StrategicMode::Pressing,
    ];

    pub fn name(self) -> &'static str {
        match self {
            StrategicMode::Pressing => "Pressing",
            StrategicMode::Guarded => "Guarded",
            StrategicMode::Reactive => "Reactive",
            StrategicMode::Hurt => "Hurt",
            StrategicMode::Critical => "Critical",
            StrategicMode::Winded => "Winded",
            StrategicMode::Closing => "Closing",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            StrategicMode::Pressing => "AI confident, healthy, focuses on offense",
            StrategicMode::Guarded => "AI anticipates danger, focuses on defense",
            StrategicMode::Reactive => "AI reacts to opponent patterns",
            StrategicMode::Hurt => "AI low HP, plays safe",
            StrategicMode::Critical => "AI very low HP, high risk moves",
            StrategicMode::Winded => "AI low stamina, focuses on recovery",
            StrategicMode::Closing => "AI attempts finishing move on low HP opponent",
        }
    }

    /// Transition priority, 1 = most urgent
    pub fn priority(self) -> u8 {
        match self {
            StrategicMode::Winded => 1,
            StrategicMode::Critical => 2,
            StrategicMode::Closing => 3,
            StrategicMode::Hurt => 4,
            StrategicMode::Reactive => 5,
            StrategicMode::Guarded => 6,
            StrategicMode::Pressing => 7,
        }
    }

    /// Weight applied to a triggered check's magnitude
    ///
    /// Strictly descending with priority so survival concerns outrank
    /// tactical ones at equal magnitude.
    pub fn score_multiplier(self) -> f64 {
        match self {
            StrategicMode::Winded => 10.0,
            StrategicMode::Critical => 9.0,
            StrategicMode::Closing => 8.0,
            StrategicMode::Hurt => 7.0,
            StrategicMode::Reactive => 6.0,
            StrategicMode::Guarded => 5.0,
            StrategicMode::Pressing => 4.0,
        }
    }

    /// Position in `ALL`
    pub fn index(self) -> usize {
        usize::from(self.priority() - 1)
    }
}

impl fmt::Display for StrategicMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StrategicMode {
    type Err = DuelError;

    /// Accepts mode names and the older state names, case-insensitively
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pressing" | "aggressive" => Ok(StrategicMode::Pressing),
            "guarded" | "defensive" => Ok(StrategicMode::Guarded),
            "reactive" | "counter" => Ok(StrategicMode::Reactive),
            "hurt" | "wounded" => Ok(StrategicMode::Hurt),
            "critical" | "desperation" => Ok(StrategicMode::Critical),
            "winded" | "exhausted" => Ok(StrategicMode::Winded),
            "closing" | "finisher" => Ok(StrategicMode::Closing),
            other => Err(DuelError::UnknownMode(other.to_string())),
        }
    }
}
