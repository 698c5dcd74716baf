//! Strategic mode machine
//!
//! Seven trigger checks score the candidate modes each turn. The best one
//! is adopted only when it clearly beats the current mode, otherwise the
//! current mode either holds or steps to its fixed successor.

mod machine;
mod mode;
pub mod signals;
pub mod transitions;

pub use machine::{assess, next_mode, ModeAssessment, ModeInputs, ModeScores};
pub use mode::StrategicMode;
pub use signals::{health_differential, momentum, threat_level, Signals};
