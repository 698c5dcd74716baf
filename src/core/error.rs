use thiserror::Error;

#[derive(Error, Debug)]
pub enum DuelError {
    #[error("Rule {rule} references undefined variable '{variable}'")]
    UndefinedVariable { rule: usize, variable: String },

    #[error("Rule {rule} references undefined label '{label}' on variable '{variable}'")]
    UndefinedLabel {
        rule: usize,
        variable: String,
        label: String,
    },

    #[error("Rule {rule} concludes on '{variable}', which is not an output variable")]
    ConclusionNotOutput { rule: usize, variable: String },

    #[error("Rule {rule} has weight {weight}, expected a value in [0, 1]")]
    InvalidRuleWeight { rule: usize, weight: f64 },

    #[error("Variable '{0}' is defined more than once")]
    DuplicateVariable(String),

    #[error("Label '{label}' is defined more than once on variable '{variable}'")]
    DuplicateLabel { variable: String, label: String },

    #[error("Variable '{variable}' has an invalid domain [{min}, {max}]")]
    InvalidDomain { variable: String, min: f64, max: f64 },

    #[error("Variable '{variable}' has no labels")]
    EmptyVariable { variable: String },

    #[error("Membership function '{label}' on '{variable}' is invalid: {reason}")]
    InvalidMembership {
        variable: String,
        label: String,
        reason: String,
    },

    #[error("Required fuzzy variable '{0}' is missing")]
    MissingVariable(String),

    #[error("Input variable '{0}' does not name a known signal")]
    UnknownSignal(String),

    #[error("Malformed snapshot: {0}")]
    MalformedSnapshot(String),

    #[error("Unknown action: {0}")]
    UnknownAction(String),

    #[error("Unknown difficulty: {0}")]
    UnknownDifficulty(String),

    #[error("Unknown strategic mode: {0}")]
    UnknownMode(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, DuelError>;
