use thiserror::Error;

/// Unified error type for auto-version operations
#[derive(Error, Debug)]
pub enum AutoVersionError {
    #[error("No semver tag found. Please create one, for example: v0.0.1")]
    NoTagFound,

    #[error("Malformed version: {0}")]
    MalformedVersion(String),

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Remote operation failed: {0}")]
    Remote(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in auto-version
pub type Result<T> = std::result::Result<T, AutoVersionError>;

impl AutoVersionError {
    /// Create a malformed version error with context
    pub fn malformed(msg: impl Into<String>) -> Self {
        AutoVersionError::MalformedVersion(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        AutoVersionError::Config(msg.into())
    }

    /// Create a remote error with context
    pub fn remote(msg: impl Into<String>) -> Self {
        AutoVersionError::Remote(msg.into())
    }

    /// True for failures raised by the version-control layer
    pub fn is_external(&self) -> bool {
        matches!(self, AutoVersionError::Git(_) | AutoVersionError::Remote(_))
    }
}
