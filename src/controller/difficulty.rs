//! Per-action score multipliers for each difficulty preset
//!
//! Columns follow `ActionKind::ALL`: strike_light, strike_heavy, special,
//! guard, dodge, recover.

use crate::core::types::{ActionScores, ActionTable, Difficulty};
use crate::strategy::StrategicMode;

const IDENTITY: ActionScores = ActionTable::new([1.0; 6]);

#[rustfmt::skip]
fn lenient(mode: StrategicMode) -> ActionScores {
    ActionTable::new(match mode {
        StrategicMode::Pressing => [0.5, 0.4, 0.4, 1.6, 1.5, 1.5],
        StrategicMode::Guarded  => [0.3, 0.2, 0.2, 1.8, 1.6, 1.4],
        StrategicMode::Reactive => [0.4, 0.3, 0.3, 1.5, 1.3, 1.3],
        StrategicMode::Hurt     => [0.2, 0.2, 0.2, 1.7, 1.5, 1.4],
        StrategicMode::Critical => [0.3, 0.3, 0.5, 1.3, 1.2, 1.2],
        StrategicMode::Winded   => [0.2, 0.2, 0.1, 1.4, 1.3, 1.6],
        StrategicMode::Closing  => [0.3, 0.3, 0.5, 1.2, 1.1, 1.1],
    })
}

#[rustfmt::skip]
fn aggressive(mode: StrategicMode) -> ActionScores {
    ActionTable::new(match mode {
        StrategicMode::Pressing => [1.8, 1.7, 1.6, 0.4, 0.5, 0.5],
        StrategicMode::Guarded  => [1.5, 1.4, 1.3, 0.5, 0.6, 0.6],
        StrategicMode::Reactive => [1.6, 1.5, 1.5, 0.5, 0.6, 0.5],
        StrategicMode::Hurt     => [1.4, 1.3, 1.3, 0.6, 0.7, 0.6],
        StrategicMode::Critical => [1.5, 1.5, 1.8, 0.4, 0.5, 0.4],
        StrategicMode::Winded   => [1.3, 1.2, 1.2, 0.6, 0.7, 0.5],
        StrategicMode::Closing  => [1.4, 1.4, 1.9, 0.3, 0.4, 0.3],
    })
}

/// Multipliers for `difficulty` tuned for `mode`
pub fn mode_multipliers(difficulty: Difficulty, mode: StrategicMode) -> ActionScores {
    match difficulty {
        Difficulty::Lenient => lenient(mode),
        Difficulty::Neutral => IDENTITY,
        Difficulty::Aggressive => aggressive(mode),
    }
}

/// The preset's baseline multipliers, independent of mode
pub fn multipliers(difficulty: Difficulty) -> ActionScores {
    mode_multipliers(difficulty, StrategicMode::Pressing)
}
