//! Opponent move tracking and prediction

mod recognizer;
mod sequences;

pub use recognizer::{PatternRecognizer, PatternSnapshot, DEFAULT_WINDOW};
pub use sequences::{counter_move, NamedSequence, SEQUENCE_LIBRARY};
