//! Error types for reporting.

use thiserror::Error;

/// Errors that can occur while setting up or performing report delivery.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The collector URL scheme is neither HTTP(S) nor WS(S).
    #[error("report server URL not supported: {url}")]
    UnsupportedProtocol {
        /// The offending URL.
        url: String,
    },

    /// No tokio runtime is available to host the delivery task.
    #[error("no async runtime available for reporting")]
    RuntimeUnavailable,

    /// The connection to the collector could not be established or broke.
    #[error("connection error: {0}")]
    Connection(String),

    /// A single report attempt failed.
    #[error("delivery failed: {reason}")]
    Delivery {
        /// HTTP status, when the collector answered with one.
        status: Option<u16>,
        /// Human-readable failure description.
        reason: String,
    },

    /// A record could not be serialized for the wire.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for report operations.
pub type Result<T> = std::result::Result<T, ReportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        let err = ReportError::UnsupportedProtocol {
            url: "ftp://collector".to_string(),
        };
        assert_eq!(err.to_string(), "report server URL not supported: ftp://collector");

        let err = ReportError::Delivery {
            status: Some(500),
            reason: "collector returned 500".to_string(),
        };
        assert_eq!(err.to_string(), "delivery failed: collector returned 500");
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ReportError>();
    }
}
