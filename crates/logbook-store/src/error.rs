//! Error types for the record store.

use thiserror::Error;

/// Errors that can occur in the record store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A stored partition is not valid JSON.
    #[error("partition '{namespace}' is not valid JSON: {source}")]
    Parse {
        /// The namespace whose partition failed to parse.
        namespace: String,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// Serialization of a partition or record failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The durable backend reported a failure.
    #[error("backend error: {0}")]
    Backend(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A string did not name a known log level.
    #[error("unknown log level: {0}")]
    UnknownLevel(String),
}

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
