pub mod config;
pub mod error;
pub mod types;

pub use config::AiConfig;
pub use error::{DuelError, Result};
pub use types::{ActionKind, ActionScores, ActionTable, Difficulty};
