//! Core type definitions used throughout the codebase

use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::core::error::DuelError;

/// One of the six things a combatant can do on its turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    StrikeLight,
    StrikeHeavy,
    Special,
    Guard,
    Dodge,
    Recover,
}

impl ActionKind {
    /// All actions, in table order
    pub const ALL: [ActionKind; 6] = [
        ActionKind::StrikeLight,
        ActionKind::StrikeHeavy,
        ActionKind::Special,
        ActionKind::Guard,
        ActionKind::Dodge,
        ActionKind::Recover,
    ];

    /// Position of this action in an `ActionTable`
    pub fn index(self) -> usize {
        match self {
            ActionKind::StrikeLight => 0,
            ActionKind::StrikeHeavy => 1,
            ActionKind::Special => 2,
            ActionKind::Guard => 3,
            ActionKind::Dodge => 4,
            ActionKind::Recover => 5,
        }
    }

    /// Canonical label, also used as the fuzzy output variable name
    pub fn label(self) -> &'static str {
        match self {
            ActionKind::StrikeLight => "strike_light",
            ActionKind::StrikeHeavy => "strike_heavy",
            ActionKind::Special => "special",
            ActionKind::Guard => "guard",
            ActionKind::Dodge => "dodge",
            ActionKind::Recover => "recover",
        }
    }

    /// Heavy actions feed the opponent's consecutive-heavy counter
    pub fn is_heavy(self) -> bool {
        matches!(self, ActionKind::StrikeHeavy | ActionKind::Special)
    }

    pub fn is_strike(self) -> bool {
        matches!(self, ActionKind::StrikeLight | ActionKind::StrikeHeavy)
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ActionKind {
    type Err = DuelError;

    /// Accepts canonical labels plus the legacy move names adapters still send
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strike_light" | "light" | "punch" => Ok(ActionKind::StrikeLight),
            "strike_heavy" | "heavy" | "kick" => Ok(ActionKind::StrikeHeavy),
            "special" => Ok(ActionKind::Special),
            "guard" | "block" => Ok(ActionKind::Guard),
            "dodge" | "evade" => Ok(ActionKind::Dodge),
            "recover" | "rest" => Ok(ActionKind::Recover),
            other => Err(DuelError::UnknownAction(other.to_string())),
        }
    }
}

/// Fixed-size table with one slot per `ActionKind`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActionTable<T>([T; 6]);

/// Per-action preference scores
pub type ActionScores = ActionTable<f64>;

impl<T: Copy> ActionTable<T> {
    pub const fn new(values: [T; 6]) -> Self {
        Self(values)
    }

    pub fn splat(value: T) -> Self {
        Self([value; 6])
    }

    pub fn from_fn(mut f: impl FnMut(ActionKind) -> T) -> Self {
        Self(ActionKind::ALL.map(|action| f(action)))
    }

    pub fn get(&self, action: ActionKind) -> T {
        self.0[action.index()]
    }

    pub fn set(&mut self, action: ActionKind, value: T) {
        self.0[action.index()] = value;
    }

    /// Iterate `(action, value)` pairs in table order
    pub fn iter(&self) -> impl Iterator<Item = (ActionKind, T)> + '_ {
        ActionKind::ALL
            .into_iter()
            .map(move |action| (action, self.get(action)))
    }

    pub fn values(&self) -> &[T; 6] {
        &self.0
    }
}

impl ActionScores {
    pub fn zeros() -> Self {
        Self::splat(0.0)
    }

    pub fn sum(&self) -> f64 {
        self.0.iter().sum()
    }

    /// Scale so the entries sum to 1.0; left unchanged when the sum is not positive
    pub fn normalized(&self) -> Self {
        let total = self.sum();
        if total > 0.0 && total.is_finite() {
            Self(self.0.map(|value| value / total))
        } else {
            *self
        }
    }

    /// Multiply each entry by the matching multiplier
    pub fn scaled_by(&self, multipliers: &ActionScores) -> Self {
        Self::from_fn(|action| self.get(action) * multipliers.get(action))
    }

    /// Replace NaN and negative entries with zero
    pub fn sanitized(&self) -> Self {
        Self(self.0.map(|value| if value.is_finite() && value > 0.0 { value } else { 0.0 }))
    }

    /// Highest-scoring action; earlier table entries win ties
    pub fn best(&self) -> ActionKind {
        let mut best = ActionKind::Recover;
        let mut best_score = f64::NEG_INFINITY;
        for (action, score) in self.iter() {
            if score > best_score {
                best = action;
                best_score = score;
            }
        }
        best
    }
}

impl<T> Index<ActionKind> for ActionTable<T> {
    type Output = T;

    fn index(&self, action: ActionKind) -> &T {
        &self.0[action.index()]
    }
}

impl<T> IndexMut<ActionKind> for ActionTable<T> {
    fn index_mut(&mut self, action: ActionKind) -> &mut T {
        &mut self.0[action.index()]
    }
}

impl<T: Serialize> Serialize for ActionTable<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (action, value) in ActionKind::ALL.iter().zip(self.0.iter()) {
            map.serialize_entry(action.label(), value)?;
        }
        map.end()
    }
}

/// Difficulty preset scaling the AI's appetite for offense
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    /// Favors defense and recovery
    Lenient,
    #[default]
    Neutral,
    /// Favors strikes and specials
    Aggressive,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Lenient, Difficulty::Neutral, Difficulty::Aggressive];

    pub fn name(self) -> &'static str {
        match self {
            Difficulty::Lenient => "lenient",
            Difficulty::Neutral => "neutral",
            Difficulty::Aggressive => "aggressive",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Difficulty {
    type Err = DuelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lenient" | "easy" => Ok(Difficulty::Lenient),
            "neutral" | "medium" => Ok(Difficulty::Neutral),
            "aggressive" | "hard" => Ok(Difficulty::Aggressive),
            other => Err(DuelError::UnknownDifficulty(other.to_string())),
        }
    }
}

/// Clamp a ratio into `[0, 1]`, mapping NaN to 0
pub fn unit_clamp(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}
