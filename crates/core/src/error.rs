//! Error types for the Grounded Q&A system.
//!
//! This module defines a unified error enum that covers all error
//! categories in the application: configuration, I/O, transport, model,
//! and serialization errors.

use thiserror::Error;

/// Unified error type for the Grounded Q&A system.
///
/// All fallible functions in the application return `Result<T, AppError>`.
/// We never panic — errors must be represented and propagated. The answer
/// service additionally guarantees that no `AppError` ever reaches its
/// callers; every failure is folded into a well-formed answer.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Transport-level failures: connection errors, timeouts, and non-2xx
    /// responses from the model endpoint. The only retryable kind.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Model provider errors that are not worth retrying
    #[error("Model error: {0}")]
    Model(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

impl AppError {
    /// Whether a retry has any chance of succeeding.
    ///
    /// Transport failures are transient; a response that arrived but could
    /// not be decoded will not improve on a second attempt.
    pub fn is_transient(&self) -> bool {
        matches!(self, AppError::Transport(_))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;
