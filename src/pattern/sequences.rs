use serde::Serialize;

use crate::core::types::ActionKind;

use crate::core::types::ActionKind::{Dodge, Guard, Recover, Special, StrikeLight};

/// A canned three-move habit worth recognizing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NamedSequence {
    pub name: &'static str,
    pub moves: [ActionKind; 3],
}

pub const SEQUENCE_LIBRARY: [NamedSequence; 5] = [
    NamedSequence {
        name: "aggressive",
        moves: [StrikeLight, StrikeLight, Special],
    },
    NamedSequence {
        name: "defensive",
        moves: [Guard, Dodge, Guard],
    },
    NamedSequence {
        name: "stamina_conserving",
        moves: [StrikeLight, Recover, StrikeLight],
    },
    NamedSequence {
        name: "special_spam",
        moves: [Special, Recover, Special],
    },
    NamedSequence {
        name: "counter",
        moves: [Guard, StrikeLight, Guard],
    },
];

impl NamedSequence {
    /// Whether the sequence occurs contiguously anywhere in `history`
    pub fn occurs_in(&self, history: &[ActionKind]) -> bool {
        history.windows(self.moves.len()).any(|window| window == self.moves)
    }

    /// Next move while `history` is still shorter than the sequence
    ///
    /// A window as long as the sequence or longer predicts nothing.
    pub fn continuation(&self, history: &[ActionKind]) -> Option<ActionKind> {
        self.moves.get(history.len()).copied()
    }
}

/// The move that answers `action` best
pub fn counter_move(action: ActionKind) -> ActionKind {
    match action {
        ActionKind::StrikeLight | ActionKind::StrikeHeavy => ActionKind::Guard,
        ActionKind::Special => ActionKind::Dodge,
        ActionKind::Guard => ActionKind::Special,
        ActionKind::Dodge => ActionKind::StrikeLight,
        ActionKind::Recover => ActionKind::StrikeHeavy,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_occurs_anywhere() {
        let defensive = SEQUENCE_LIBRARY[1];
        assert!(defensive.occurs_in(&[Recover, Guard, Dodge, Guard, Special]));
        assert!(!defensive.occurs_in(&[Guard, Dodge]));
        assert!(!defensive.occurs_in(&[Guard, Guard, Dodge]));
    }

    #[test]
    fn test_continuation_only_for_short_history() {
        let defensive = SEQUENCE_LIBRARY[1];
        assert_eq!(defensive.continuation(&[]), Some(Guard));
        assert_eq!(defensive.continuation(&[Guard]), Some(Dodge));
        assert_eq!(defensive.continuation(&[Guard, Dodge]), Some(Guard));
        assert_eq!(defensive.continuation(&[Guard, Dodge, Guard]), None);
        assert_eq!(defensive.continuation(&[Guard, Dodge, Guard, Dodge]), None);
    }

    #[test]
    fn test_counter_map() {
        assert_eq!(counter_move(StrikeLight), Guard);
        assert_eq!(counter_move(ActionKind::StrikeHeavy), Guard);
        assert_eq!(counter_move(Special), Dodge);
        assert_eq!(counter_move(Guard), Special);
        assert_eq!(counter_move(Dodge), StrikeLight);
        assert_eq!(counter_move(Recover), ActionKind::StrikeHeavy);
    }
}
