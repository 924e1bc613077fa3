//! Error types for agent record operations
//!
//! Two layers:
//! - [`StorageError`]: what a [`Substrate`](crate::Substrate) reports
//! - [`Error`]: what record operations report, carrying the offending id
//!
//! ## Error Codes (Canonical)
//!
//! | Code | Description |
//! |------|-------------|
//! | NotFound | No record exists for the id |
//! | AlreadyExists | A record already exists for the id |
//! | Serialization | A record could not be encoded |
//! | Deserialization | Stored bytes could not be decoded |
//! | StoreRead | The substrate failed a point lookup |
//! | StoreWrite | The substrate failed a put or delete |
//! | StoreScan | The substrate failed to open or advance a range scan |
//!
//! Every error is terminal for the current operation. Nothing is retried.

use thiserror::Error;

/// Failure reported by the key-value substrate
#[derive(Debug, Error)]
pub enum StorageError {
    /// The substrate could not serve the request
    #[error("substrate unavailable: {0}")]
    Unavailable(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// All record store errors
#[derive(Debug, Error)]
pub enum Error {
    /// No record exists for the id
    #[error("the agent {id} does not exist")]
    NotFound {
        /// The missing id
        id: String,
    },

    /// A record already exists for the id
    #[error("the agent {id} already exists")]
    AlreadyExists {
        /// The duplicate id
        id: String,
    },

    /// Encoding a record failed
    #[error("failed to encode agent {id}: {reason}")]
    Serialization {
        /// Id of the record being encoded
        id: String,
        /// Encoder message
        reason: String,
    },

    /// Decoding stored bytes failed
    #[error("failed to decode agent {key}: {reason}")]
    Deserialization {
        /// Key the bytes were stored under
        key: String,
        /// Decoder message
        reason: String,
    },

    /// Point lookup failed
    #[error("failed to read agent {key} from store")]
    StoreRead {
        /// Key being read
        key: String,
        /// Substrate failure
        #[source]
        source: StorageError,
    },

    /// Put or delete failed
    #[error("failed to write agent {key} to store")]
    StoreWrite {
        /// Key being written
        key: String,
        /// Substrate failure
        #[source]
        source: StorageError,
    },

    /// Range scan could not be opened or advanced
    #[error("failed to scan agents in range [{start:?}, {end:?})")]
    StoreScan {
        /// Inclusive start of the range
        start: String,
        /// Exclusive end of the range
        end: String,
        /// Substrate failure
        #[source]
        source: StorageError,
    },
}

/// Result type for record operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Canonical error code, stable for host-side mapping
    pub fn code(&self) -> &'static str {
        match self {
            Error::NotFound { .. } => "NotFound",
            Error::AlreadyExists { .. } => "AlreadyExists",
            Error::Serialization { .. } => "Serialization",
            Error::Deserialization { .. } => "Deserialization",
            Error::StoreRead { .. } => "StoreRead",
            Error::StoreWrite { .. } => "StoreWrite",
            Error::StoreScan { .. } => "StoreScan",
        }
    }

    /// Check if this is a not-found error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }

    /// Check if this is a duplicate-id error.
    pub fn is_already_exists(&self) -> bool {
        matches!(self, Error::AlreadyExists { .. })
    }

    /// Check if the substrate itself failed.
    pub fn is_storage(&self) -> bool {
        matches!(
            self,
            Error::StoreRead { .. } | Error::StoreWrite { .. } | Error::StoreScan { .. }
        )
    }

    /// Record for `id` is missing
    pub fn missing(id: impl Into<String>) -> Self {
        Error::NotFound { id: id.into() }
    }

    /// Record for `id` is already present
    pub fn duplicate(id: impl Into<String>) -> Self {
        Error::AlreadyExists { id: id.into() }
    }

    /// Substrate read failure for `key`
    pub fn read(key: impl Into<String>, source: StorageError) -> Self {
        Error::StoreRead {
            key: key.into(),
            source,
        }
    }

    /// Substrate write failure for `key`
    pub fn write(key: impl Into<String>, source: StorageError) -> Self {
        Error::StoreWrite {
            key: key.into(),
            source,
        }
    }

    /// Substrate scan failure over `[start, end)`
    pub fn scan(start: impl Into<String>, end: impl Into<String>, source: StorageError) -> Self {
        Error::StoreScan {
            start: start.into(),
            end: end.into(),
            source,
        }
    }
}
