use thiserror::Error;

/// Configuration and input validation failures. All variants are raised
/// before any placement work starts; a layout run either fails here or
/// completes.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("minAngle {0} is outside [-90, 90]")]
    MinAngleOutOfRange(f32),

    #[error("maxAngle {0} is outside [-90, 90]")]
    MaxAngleOutOfRange(f32),

    #[error("minAngle {min} must not exceed maxAngle {max}")]
    AngleOrder { min: f32, max: f32 },

    #[error("word record {index} is missing text key \"{key}\"")]
    MissingWordKey { index: usize, key: String },

    #[error("word record {index} is missing weight key \"{key}\"")]
    MissingWeightKey { index: usize, key: String },

    #[error("word record {index} has a non-numeric or negative weight under key \"{key}\"")]
    InvalidWeight { index: usize, key: String },
}
