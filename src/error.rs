//! Error types for vidmaker
//!
//! Every fault raised by an external collaborator (listing client, audio
//! probe, upload service) is caught at the boundary and re-wrapped into one
//! of the variants here, so callers never observe a transport-library error
//! type directly.

use thiserror::Error;

/// Result type alias for vidmaker operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for vidmaker
#[derive(Debug, Error)]
pub enum Error {
    /// Bad caller input, rejected eagerly before any network activity
    #[error("invalid argument `{field}`: {message}")]
    InvalidArgument {
        /// Name of the offending argument
        field: String,
        /// Why the value was rejected
        message: String,
    },

    /// No valid credential is available for the video service
    #[error("not authenticated: no valid credential available")]
    NotAuthenticated,

    /// A listing fetch from the content platform failed
    #[error("reddit API error: {0}")]
    SourceApi(String),

    /// The article has no video that can be scraped
    #[error("no scrapeable video found for article")]
    VideoNotFound,

    /// Known, deliberately unhandled case (e.g. external-embed resolution)
    #[error("not supported: {0}")]
    NotSupported(String),

    /// Terminal upload fault: retries exhausted or a non-retriable cause
    #[error("upload failed: {0}")]
    Upload(String),

    /// I/O error (local file access)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error (credential artifact)
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Build an [`Error::InvalidArgument`] naming the offending field
    pub fn invalid_argument(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            field: field.into(),
            message: message.into(),
        }
    }
}
