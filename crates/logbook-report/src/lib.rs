//! # logbook-report
//!
//! Best-effort delivery of log records to a remote collector.
//!
//! This crate provides:
//!
//! - [`Protocol`] — URL scheme classification (HTTP, WS, or unsupported)
//! - [`Reporter`] — A detached delivery task with a fire-and-forget handle
//! - [`Diagnostics`] — Seam through which transport lifecycle events and
//!   delivery failures flow back into the caller's own log
//!
//! Delivery is best-effort by design: nothing is queued across a broken
//! connection, nothing is retried, and no send outcome is returned to the
//! caller of [`Reporter::send`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
mod http;
pub mod protocol;
pub mod reporter;
#[cfg(any(test, feature = "test-util"))]
#[doc(hidden)]
pub mod test_support;
mod ws;

pub use error::{ReportError, Result};
pub use protocol::Protocol;
pub use reporter::{ReportConfig, Reporter};

/// Sink for transport lifecycle and failure messages.
///
/// Transport events become log records in the facade that owns the reporter.
/// Implementations must not feed these messages back into reporting, or a
/// failing collector would generate its own traffic.
pub trait Diagnostics: Send + Sync {
    /// Reports an informational transport event (connection lifecycle).
    fn info(&self, message: String);

    /// Reports a transport or delivery failure.
    fn error(&self, message: String);
}

#[cfg(test)]
pub(crate) mod testing {
    use super::Diagnostics;
    use std::sync::Mutex;

    /// Diagnostics sink that captures messages for assertions.
    #[derive(Debug, Default)]
    pub(crate) struct CapturedDiagnostics {
        pub(crate) infos: Mutex<Vec<String>>,
        pub(crate) errors: Mutex<Vec<String>>,
    }

    impl Diagnostics for CapturedDiagnostics {
        fn info(&self, message: String) {
            self.infos.lock().expect("lock").push(message);
        }

        fn error(&self, message: String) {
            self.errors.lock().expect("lock").push(message);
        }
    }
}
