use std::collections::VecDeque;

use serde::Serialize;

use crate::core::types::ActionKind;
use crate::pattern::sequences::{counter_move, SEQUENCE_LIBRARY};

/// Default number of opponent moves remembered
pub const DEFAULT_WINDOW: usize = 5;

/// Minimum strength for `should_counter`
const COUNTER_CONFIDENCE: f64 = 0.5;
const ALTERNATION_STRENGTH: f64 = 0.7;
const SEQUENCE_STRENGTH: f64 = 0.8;

/// What the recognizer currently believes about the opponent
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatternSnapshot {
    pub pattern_strength: f64,
    pub predicted_next: Option<ActionKind>,
    pub recent_moves: Vec<ActionKind>,
    /// Last library sequence found in the window
    pub matched_sequence: Option<&'static str>,
}

/// Sliding window over the opponent's recent moves
#[derive(Debug, Clone)]
pub struct PatternRecognizer {
    capacity: usize,
    history: VecDeque<ActionKind>,
    pattern_strength: f64,
    predicted_next: Option<ActionKind>,
    matched_sequence: Option<&'static str>,
}

impl Default for PatternRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternRecognizer {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_WINDOW)
    }

    /// Window holding the last `capacity` moves (at least one)
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            history: VecDeque::with_capacity(capacity),
            pattern_strength: 0.0,
            predicted_next: None,
            matched_sequence: None,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Append a move, evicting the oldest past capacity, and re-analyze
    pub fn record(&mut self, action: ActionKind) {
        if self.history.len() == self.capacity {
            self.history.pop_front();
        }
        self.history.push_back(action);
        self.analyze();
    }

    pub fn clear(&mut self) {
        self.history.clear();
        self.pattern_strength = 0.0;
        self.predicted_next = None;
        self.matched_sequence = None;
    }

    pub fn pattern_strength(&self) -> f64 {
        self.pattern_strength
    }

    pub fn predicted_next(&self) -> Option<ActionKind> {
        self.predicted_next
    }

    pub fn recent_moves(&self) -> Vec<ActionKind> {
        self.history.iter().copied().collect()
    }

    pub fn snapshot(&self) -> PatternSnapshot {
        PatternSnapshot {
            pattern_strength: self.pattern_strength,
            predicted_next: self.predicted_next,
            recent_moves: self.recent_moves(),
            matched_sequence: self.matched_sequence,
        }
    }

    /// True when `candidate` is the confidently predicted next move
    pub fn should_counter(&self, candidate: ActionKind) -> bool {
        self.predicted_next == Some(candidate) && self.pattern_strength > COUNTER_CONFIDENCE
    }

    /// Answer to the predicted move, if the prediction is confident
    pub fn recommended_counter(&self) -> Option<ActionKind> {
        self.predicted_next
            .filter(|&predicted| self.should_counter(predicted))
            .map(counter_move)
    }

    fn analyze(&mut self) {
        self.pattern_strength = 0.0;
        self.predicted_next = None;
        self.matched_sequence = None;

        let moves: Vec<ActionKind> = self.history.iter().copied().collect();
        if moves.len() < 2 {
            return;
        }

        self.detect_repetition(&moves);

        // A-B-A-B
        let n = moves.len();
        if n >= 4 && moves[n - 4] == moves[n - 2] && moves[n - 1] == moves[n - 3] && moves[n - 1] != moves[n - 2] {
            self.pattern_strength = self.pattern_strength.max(ALTERNATION_STRENGTH);
        }

        for sequence in &SEQUENCE_LIBRARY {
            if sequence.occurs_in(&moves) {
                self.pattern_strength = self.pattern_strength.max(SEQUENCE_STRENGTH);
                self.matched_sequence = Some(sequence.name);
                if let Some(next) = sequence.continuation(&moves) {
                    self.predicted_next = Some(next);
                }
            }
        }
    }

    /// Repeated identical pair, e.g. light-light seen twice
    fn detect_repetition(&mut self, moves: &[ActionKind]) {
        let n = moves.len();
        let last = moves[n - 1];
        if moves[n - 2] != last {
            return;
        }

        let starts: Vec<usize> = moves
            .windows(2)
            .enumerate()
            .filter(|(_, pair)| pair[0] == last && pair[1] == last)
            .map(|(i, _)| i)
            .collect();
        if starts.len() < 2 {
            return;
        }
        self.pattern_strength = (starts.len() as f64 / 3.0).min(1.0);

        let followers: Vec<ActionKind> = starts
            .iter()
            .filter_map(|&i| moves.get(i + 2).copied())
            .collect();
        if followers.is_empty() {
            return;
        }

        // Most frequent follower; the earliest seen wins ties
        let mut best: Option<(ActionKind, usize)> = None;
        for &candidate in &followers {
            let count = followers.iter().filter(|&&f| f == candidate).count();
            if best.map_or(true, |(_, top)| count > top) {
                best = Some((candidate, count));
            }
        }
        if let Some((predicted, count)) = best {
            self.predicted_next = Some(predicted);
            self.pattern_strength = count as f64 / followers.len() as f64;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::ActionKind::*;

    fn fed(moves: &[ActionKind]) -> PatternRecognizer {
        let mut recognizer = PatternRecognizer::new();
        for &action in moves {
            recognizer.record(action);
        }
        recognizer
    }

    #[test]
    fn test_empty_and_single_move() {
        let recognizer = PatternRecognizer::new();
        assert_eq!(recognizer.pattern_strength(), 0.0);
        assert_eq!(recognizer.predicted_next(), None);

        let one = fed(&[Guard]);
        assert_eq!(one.pattern_strength(), 0.0);
        assert_eq!(one.recent_moves(), vec![Guard]);
    }

    #[test]
    fn test_window_evicts_oldest() {
        let recognizer = fed(&[Recover, StrikeLight, Guard, Dodge, Special, StrikeHeavy]);
        assert_eq!(recognizer.recent_moves().len(), DEFAULT_WINDOW);
        assert_eq!(recognizer.recent_moves()[0], StrikeLight);
    }

    #[test]
    fn test_triple_repeat_predicts_same_move() {
        let recognizer = fed(&[StrikeLight, StrikeLight, StrikeLight]);
        assert!(recognizer.pattern_strength() >= 0.8);
        assert_eq!(recognizer.predicted_next(), Some(StrikeLight));
    }

    #[test]
    fn test_single_pair_is_not_a_pattern() {
        let recognizer = fed(&[Dodge, Guard, Guard]);
        assert_eq!(recognizer.pattern_strength(), 0.0);
        assert_eq!(recognizer.predicted_next(), None);
    }

    #[test]
    fn test_alternation() {
        let recognizer = fed(&[Guard, Dodge, Guard, Dodge]);
        assert!(recognizer.pattern_strength() >= 0.7);
    }

    #[test]
    fn test_plain_alternation_without_library_match() {
        let recognizer = fed(&[Special, Dodge, Special, Dodge]);
        assert_eq!(recognizer.pattern_strength(), 0.7);
        assert_eq!(recognizer.predicted_next(), None);
        assert_eq!(recognizer.snapshot().matched_sequence, None);
    }

    #[test]
    fn test_named_sequence_match() {
        let recognizer = fed(&[Special, Recover, Special]);
        let snapshot = recognizer.snapshot();
        assert_eq!(snapshot.pattern_strength, 0.8);
        assert_eq!(snapshot.matched_sequence, Some("special_spam"));
    }

    #[test]
    fn test_full_sequence_match_predicts_nothing() {
        let snapshot = fed(&[Guard, Dodge, Guard, Dodge]).snapshot();
        assert_eq!(snapshot.pattern_strength, 0.8);
        assert_eq!(snapshot.predicted_next, None);
        assert_eq!(snapshot.matched_sequence, Some("defensive"));
    }

    #[test]
    fn test_repeated_pair_followers() {
        // Only the first guard-guard has a follower yet
        let recognizer = fed(&[Guard, Guard, StrikeLight, Guard, Guard]);
        assert_eq!(recognizer.predicted_next(), Some(StrikeLight));
        assert_eq!(recognizer.snapshot().matched_sequence, Some("counter"));

        let recognizer = fed(&[Guard, Guard, Guard, Guard]);
        assert_eq!(recognizer.predicted_next(), Some(Guard));
        assert_eq!(recognizer.pattern_strength(), 1.0);
    }

    #[test]
    fn test_should_counter() {
        let recognizer = fed(&[StrikeLight, StrikeLight, StrikeLight]);
        assert!(recognizer.should_counter(StrikeLight));
        assert!(!recognizer.should_counter(Guard));
        assert_eq!(recognizer.recommended_counter(), Some(Guard));
    }

    #[test]
    fn test_clear_resets() {
        let mut recognizer = fed(&[StrikeLight, StrikeLight, StrikeLight]);
        recognizer.clear();
        assert_eq!(recognizer.snapshot(), PatternRecognizer::new().snapshot());
    }

    #[test]
    fn test_custom_capacity() {
        let recognizer = {
            let mut r = PatternRecognizer::with_capacity(3);
            for action in [Guard, Dodge, Guard, Dodge] {
                r.record(action);
            }
            r
        };
        assert_eq!(recognizer.recent_moves(), vec![Dodge, Guard, Dodge]);
        assert_eq!(recognizer.capacity(), 3);
    }
}
