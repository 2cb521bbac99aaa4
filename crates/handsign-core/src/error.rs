//! Error types for the handsign recognizer
//!
//! "No hand in frame" is not an error and never appears here; it travels as
//! `None` through the normalizer and as a distinct outcome through the runtime.

use thiserror::Error;

/// Core handsign errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HandsignError {
    // Input errors
    #[error("Invalid keypoint count: expected {expected}, got {actual}")]
    InvalidKeypointCount { expected: usize, actual: usize },

    #[error("Invalid feature vector: {0}")]
    InvalidFeatureVector(String),

    #[error("Invalid confidence: {0}")]
    InvalidConfidence(f32),

    #[error("Invalid class distribution: expected {expected} probabilities, got {actual}")]
    InvalidDistribution { expected: usize, actual: usize },

    #[error("Unknown label: {0:?}")]
    UnknownLabel(String),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Cannot read configuration: {0}")]
    ConfigIo(String),

    #[error("Cannot parse configuration: {0}")]
    ConfigParse(String),

    // Collaborator errors
    #[error("Detector error: {0}")]
    Detector(String),

    #[error("Classifier error: {0}")]
    Classifier(String),
}

impl HandsignError {
    /// True for malformed per-frame input (the InvalidInput class).
    ///
    /// Callers skip the frame and log it apart from ordinary empty frames.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            HandsignError::InvalidKeypointCount { .. }
                | HandsignError::InvalidFeatureVector(_)
                | HandsignError::InvalidConfidence(_)
                | HandsignError::InvalidDistribution { .. }
                | HandsignError::UnknownLabel(_)
        )
    }

    /// True for errors raised while building or loading configuration
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            HandsignError::Configuration(_)
                | HandsignError::ConfigIo(_)
                | HandsignError::ConfigParse(_)
        )
    }
}

/// Result type for handsign operations
pub type HandsignResult<T> = Result<T, HandsignError>;
