//! Error types for the facade.

use thiserror::Error;

/// Errors surfaced by the few fallible facade operations.
///
/// Logging itself never returns these; infrastructure failures inside the
/// log path are recovered locally and surfaced as log records.
#[derive(Debug, Error)]
pub enum LogbookError {
    /// The record store failed.
    #[error("store error: {0}")]
    Store(#[from] logbook_store::StoreError),

    /// Reporting setup or delivery failed.
    #[error("report error: {0}")]
    Report(#[from] logbook_report::ReportError),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for facade operations.
pub type Result<T> = std::result::Result<T, LogbookError>;
