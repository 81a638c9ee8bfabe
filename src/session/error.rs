//! Session store error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading or writing the persisted session
#[derive(Error, Debug)]
pub enum SessionError {
    /// I/O operation on the session file failed
    #[error("IO error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The session file exists but could not be decoded
    #[error("Corrupt session file {path:?}: {error}")]
    Corrupt { path: PathBuf, error: String },

    /// The session could not be encoded
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// In-memory lock was poisoned by a panicking writer
    #[error("Lock error: {0}")]
    Lock(String),
}

impl From<toml::ser::Error> for SessionError {
    fn from(err: toml::ser::Error) -> Self {
        SessionError::Serialization(err.to_string())
    }
}

/// Result type alias for session operations
pub type SessionResult<T> = Result<T, SessionError>;
