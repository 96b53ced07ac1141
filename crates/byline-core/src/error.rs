//! Error types for the byline client.

use thiserror::Error;

/// A shared error type for the byline crates.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait.
#[derive(Error, Debug, Clone)]
pub enum BylineError {
    /// Login exchange failed (non-200 response or network failure).
    /// The session is left untouched when this is returned.
    #[error("Login failed: {message}")]
    AuthExchange { message: String },

    /// An authenticated call was answered with 401. The session must be
    /// torn down exactly once when this surfaces.
    #[error("Unauthorized")]
    Unauthorized,

    /// Any other failure on a remote call. Shown once, never retried
    /// automatically.
    #[error("Service error: {message}")]
    Transient { message: String },

    /// Persisted session entries exist but cannot be parsed. Treated as
    /// an absent session at hydration.
    #[error("Malformed persisted state: {message}")]
    MalformedState { message: String },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl BylineError {
    /// Creates an AuthExchange error
    pub fn auth_exchange(message: impl Into<String>) -> Self {
        Self::AuthExchange {
            message: message.into(),
        }
    }

    /// Creates a Transient error
    pub fn transient(message: impl Into<String>) -> Self {
        Self::Transient {
            message: message.into(),
        }
    }

    /// Creates a MalformedState error
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedState {
            message: message.into(),
        }
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this is the Unauthorized variant
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }

    /// Check if this is a MalformedState error
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedState { .. })
    }
}

impl From<std::io::Error> for BylineError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for BylineError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, BylineError>`.
pub type Result<T> = std::result::Result<T, BylineError>;
