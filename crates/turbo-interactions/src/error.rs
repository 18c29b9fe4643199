//! Interaction error types.

use thiserror::Error;

/// Errors raised while configuring page behaviors.
///
/// Behaviors themselves never fail at runtime: a missing element is a no-op.
#[derive(Error, Debug)]
pub enum InteractionError {
    /// Selector could not be parsed.
    #[error("Invalid selector {selector:?}: {reason}")]
    InvalidSelector { selector: String, reason: String },

    /// Configuration document could not be read.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Notification severity name not recognized.
    #[error("Unknown notification severity: {0}")]
    UnknownSeverity(String),
}

impl From<serde_json::Error> for InteractionError {
    fn from(e: serde_json::Error) -> Self {
        InteractionError::InvalidConfig(e.to_string())
    }
}

/// Result type for interaction setup.
pub type Result<T> = std::result::Result<T, InteractionError>;
