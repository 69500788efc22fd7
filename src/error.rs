//! Error handling module
//!
//! Provides centralized error handling with proper error types using thiserror.
//! `TemplateError` covers everything that can go wrong talking to the template
//! service; `AppError` is the crate-wide error for everything else.

use reqwest::StatusCode;
use thiserror::Error;

/// Shown when the service reports a failure without a usable `detail`.
pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to generate engine template";

/// Shown when the service cannot be reached at all.
pub const TRANSPORT_FAILURE_MESSAGE: &str = "Unable to reach the template service";

/// Failures of a single template generation request
#[derive(Error, Debug)]
pub enum TemplateError {
    /// The request could not be sent or the response could not be read
    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// Non-2xx response carrying a `detail` message
    #[error("server returned {status}: {detail}")]
    Server { status: StatusCode, detail: String },

    /// Non-2xx response whose body had no usable `detail`
    #[error("server returned {status} with an unreadable error body")]
    UnparseableError { status: StatusCode },

    /// The request record could not be serialized
    #[error("failed to encode request: {0}")]
    Encode(#[from] serde_json::Error),
}

impl TemplateError {
    /// Text for the form's message region
    pub fn user_message(&self) -> String {
        match self {
            Self::Transport(_) => TRANSPORT_FAILURE_MESSAGE.to_string(),
            Self::Server { detail, .. } if !detail.is_empty() => detail.clone(),
            Self::Server { .. } | Self::UnparseableError { .. } | Self::Encode(_) => {
                GENERIC_FAILURE_MESSAGE.to_string()
            }
        }
    }

    /// HTTP status, when the service answered
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Server { status, .. } | Self::UnparseableError { status } => Some(*status),
            Self::Transport(e) => e.status(),
            Self::Encode(_) => None,
        }
    }
}

/// Main error type for the application
#[derive(Error, Debug)]
pub enum AppError {
    /// IO errors (terminal, request files)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration errors (CLI values, client setup)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Validation errors (user input)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Terminal/UI errors
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// The generated archive could not be written
    #[error("Failed to save {filename}: {source}")]
    Save {
        filename: String,
        #[source]
        source: std::io::Error,
    },

    /// Template service errors
    #[error(transparent)]
    Template(#[from] TemplateError),
}

/// Result type alias for application operations
pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
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

    /// Create a save error for the given file
    pub fn save(filename: impl Into<String>, source: std::io::Error) -> Self {
        Self::Save {
            filename: filename.into(),
            source,
        }
    }
}
