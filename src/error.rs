//! Error handling module for cupnote
//!
//! Provides centralized error handling with proper error types using thiserror.
//! Constraint rejections in the tasting widgets are not errors: they are
//! silent no-ops. These types cover construction, configuration and I/O.

use thiserror::Error;

/// Main error type for cupnote
#[derive(Error, Debug)]
pub enum CupNoteError {
    /// IO errors (file operations, terminal, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors (loading, parsing, validation)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Validation errors (bounds, scales, catalogs, seeds)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Terminal/UI errors
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// State errors (invalid step position, poisoned listeners)
    #[error("State error: {0}")]
    State(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for cupnote operations
pub type Result<T> = std::result::Result<T, CupNoteError>;

impl CupNoteError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a terminal error
    pub fn terminal(msg: impl Into<String>) -> Self {
        Self::Terminal(msg.into())
    }

    /// Create a state error
    pub fn state(msg: impl Into<String>) -> Self {
        Self::State(msg.into())
    }
}
