// Error types for the Dify plugin

use thiserror::Error;

/// Result type alias for Dify operations
pub type Result<T> = std::result::Result<T, DifyError>;

/// Errors raised while talking to the Dify API
#[derive(Debug, Error)]
pub enum DifyError {
    /// No API key configured; no request is attempted
    #[error("Dify API key is not configured")]
    MissingCredential,

    /// Dify answered with a non-200 status. The body is kept verbatim.
    #[error("Dify API call failed (status {status}): {body}")]
    Upstream { status: u16, body: String },

    /// Connection, DNS or TLS failure
    #[error("Dify API request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// A 200 response whose body is not JSON
    #[error("Dify API returned an invalid response: {0}")]
    InvalidResponse(#[source] serde_json::Error),

    /// Tool arguments did not match the expected shape
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl DifyError {
    pub fn upstream(status: u16, body: impl Into<String>) -> Self {
        DifyError::Upstream {
            status,
            body: body.into(),
        }
    }

    pub fn invalid_arguments(msg: impl Into<String>) -> Self {
        DifyError::InvalidArguments(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        DifyError::Configuration(msg.into())
    }

    /// HTTP status for upstream errors
    pub fn status(&self) -> Option<u16> {
        match self {
            DifyError::Upstream { status, .. } => Some(*status),
            DifyError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
