//! Error types for the HisMarketing client.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Client-side precondition failures.
///
/// These never reach the network: they are detected synchronously before a
/// request is issued and reported to the user immediately.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationError {
    /// File extension outside the allowed spreadsheet set
    #[error("Unsupported file type: {file_name}")]
    UnsupportedFileType { file_name: String },

    /// Password and confirmation differ
    #[error("Passwords do not match")]
    PasswordMismatch,

    /// Password shorter than the required minimum
    #[error("Password must be at least {min} characters")]
    PasswordTooShort { min: usize },

    /// A stage was invoked before its predecessor produced a result
    #[error("Missing prerequisite stage: {stage}")]
    MissingStage { stage: String },
}

/// A shared error type for the entire HisMarketing client.
///
/// Typed, structured variants with automatic conversion from common error
/// types via the `From` trait.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum HisError {
    /// Local validation failure (no network call was made)
    #[error("Validation error: {0}")]
    Validation(ValidationError),

    /// No session token is present
    #[error("Not authenticated")]
    Unauthenticated,

    /// The request could not complete (connection, timeout, body read)
    #[error("Network error: {message}")]
    Network { message: String },

    /// The backend answered with a non-2xx status
    #[error("API error ({status}): {}", .message.as_deref().unwrap_or("no message"))]
    Api {
        status: u16,
        /// Backend-supplied `message` field, if any
        message: Option<String>,
    },

    /// The pipeline was abandoned while a stage was in flight
    #[error("Pipeline {pipeline_id} is no longer current")]
    Stale { pipeline_id: String },

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

impl HisError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a Network error
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Creates an Api error
    pub fn api(status: u16, message: Option<String>) -> Self {
        Self::Api { status, message }
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

    /// Creates a MissingStage validation error
    pub fn missing_stage(stage: impl Into<String>) -> Self {
        Self::Validation(ValidationError::MissingStage {
            stage: stage.into(),
        })
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a local validation failure
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this error means the session token is missing
    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, Self::Unauthenticated)
    }

    /// Check if this error came from the network or the backend
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Network { .. } | Self::Api { .. })
    }

    /// Check if the pipeline was abandoned
    pub fn is_stale(&self) -> bool {
        matches!(self, Self::Stale { .. })
    }

    /// Returns the backend-supplied message, if the backend sent one.
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            Self::Api {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => Some(message.as_str()),
            _ => None,
        }
    }

    /// Message to show the user: the backend's own message wins over the
    /// call site's localized fallback.
    pub fn user_message(&self, fallback: &str) -> String {
        self.backend_message()
            .map(str::to_string)
            .unwrap_or_else(|| fallback.to_string())
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<ValidationError> for HisError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err)
    }
}

impl From<std::io::Error> for HisError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for HisError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for HisError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for HisError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, HisError>`.
pub type Result<T> = std::result::Result<T, HisError>;
