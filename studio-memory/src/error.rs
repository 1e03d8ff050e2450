//! Error types for the persistence layer.

use serde_json::Error as SerdeError;
use thiserror::Error;

/// Errors emitted by stores.
#[derive(Debug, Error)]
pub enum MemoryError {
    /// Store key is empty or contains characters that cannot name a file.
    #[error("invalid store key `{key}`")]
    InvalidKey {
        /// Rejected key.
        key: String,
    },
    /// Stored bytes under `key` are not valid UTF-8.
    #[error("stored value `{key}` is not valid UTF-8")]
    Encoding {
        /// Key whose value could not be decoded.
        key: String,
    },
    /// Underlying I/O failure while reading or writing store files.
    #[error("i/o error: {source}")]
    Io {
        /// Source [`std::io::Error`].
        #[from]
        source: std::io::Error,
    },
    /// Serialization or deserialization error.
    #[error("serialization error: {source}")]
    Serialization {
        /// Source [`serde_json::Error`].
        #[from]
        source: SerdeError,
    },
}

impl MemoryError {
    /// Helper to construct key validation errors.
    #[must_use]
    pub fn invalid_key(key: impl Into<String>) -> Self {
        Self::InvalidKey { key: key.into() }
    }
}

/// Result type alias for store operations.
pub type MemoryResult<T> = Result<T, MemoryError>;
