//! Error types for the Workflowy client.

use thiserror::Error;

/// A shared error type for every layer of the Workflowy client.
///
/// All failures are returned to the caller as-is; nothing is retried
/// internally, and the caller decides whether an error is fatal.
#[derive(Error, Debug)]
pub enum WorkflowyError {
    /// Login was rejected (no redirect, or no session cookie in the response)
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Network-level failure on any request
    #[error("Transport error: {0}")]
    Transport(String),

    /// The service answered with JSON that lacks an expected field or has the wrong type
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// A lookup path segment matched no child
    #[error("Could not find node '{segment}'")]
    NotFound { segment: String },

    /// The document tree is missing or lacks an expected children array
    #[error("Malformed tree: {0}")]
    MalformedTree(String),

    /// A lookup path that cannot be resolved (e.g. empty)
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// The push-and-poll request failed; no operation was applied
    #[error("Submission failed{}: {message}", .status.map(|s| format!(" (status {s})")).unwrap_or_default())]
    SubmissionFailed {
        status: Option<u16>,
        message: String,
    },

    /// Operations were applied but re-fetching the tree afterwards failed
    #[error("Operations applied but refresh failed: {0}")]
    RefreshAfterSubmit(Box<WorkflowyError>),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error (configuration files)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON"
        message: String,
    },
}

impl WorkflowyError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a NotFound error for the unmatched path segment
    pub fn not_found(segment: impl Into<String>) -> Self {
        Self::NotFound {
            segment: segment.into(),
        }
    }

    /// Creates an AuthenticationFailed error
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::AuthenticationFailed(message.into())
    }

    /// Creates a Transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    /// Creates a MalformedResponse error
    pub fn malformed_response(message: impl Into<String>) -> Self {
        Self::MalformedResponse(message.into())
    }

    /// Creates a MalformedTree error
    pub fn malformed_tree(message: impl Into<String>) -> Self {
        Self::MalformedTree(message.into())
    }

    /// Creates a SubmissionFailed error
    pub fn submission_failed(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::SubmissionFailed {
            status,
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is an authentication error
    pub fn is_authentication(&self) -> bool {
        matches!(self, Self::AuthenticationFailed(_))
    }

    /// Check if this is a transport error
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Check if this is a submission error
    pub fn is_submission_failed(&self) -> bool {
        matches!(self, Self::SubmissionFailed { .. })
    }

    /// Check whether the server state was changed despite the error.
    ///
    /// Only true for `RefreshAfterSubmit`: the batch went through and the
    /// pending list was cleared, but the local tree is stale.
    pub fn operations_applied(&self) -> bool {
        matches!(self, Self::RefreshAfterSubmit(_))
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for WorkflowyError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for WorkflowyError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for WorkflowyError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, WorkflowyError>`.
pub type Result<T> = std::result::Result<T, WorkflowyError>;
