//! The delivery task and its fire-and-forget handle.

use std::sync::Arc;

use logbook_store::LogRecord;
use tokio::sync::mpsc;
use tracing::debug;

use crate::error::{ReportError, Result};
use crate::protocol::Protocol;
use crate::{http, ws, Diagnostics};

/// Collector settings snapshot taken when the reporter is spawned.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Collector URL.
    pub url: String,
    /// Auth header name for HTTP delivery; empty disables the header.
    pub token_key: String,
    /// Auth header value for HTTP delivery; empty disables the header.
    pub token_value: String,
}

/// Handle to a detached delivery task.
///
/// Dropping the handle closes the channel, which lets the task shut its
/// connection down and exit.
#[derive(Debug)]
pub struct Reporter {
    tx: mpsc::UnboundedSender<LogRecord>,
}

impl Reporter {
    /// Spawns the delivery task for the detected protocol.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedProtocol` for [`Protocol::None`] and
    /// `RuntimeUnavailable` when no tokio runtime is running; in both cases
    /// nothing is spawned and the caller keeps operating without reporting.
    pub fn spawn(
        protocol: Protocol,
        config: ReportConfig,
        diagnostics: Arc<dyn Diagnostics>,
    ) -> Result<Self> {
        let handle = tokio::runtime::Handle::try_current()
            .map_err(|_| ReportError::RuntimeUnavailable)?;

        let (tx, rx) = mpsc::unbounded_channel();
        match protocol {
            Protocol::None => {
                return Err(ReportError::UnsupportedProtocol { url: config.url });
            }
            Protocol::Ws => {
                debug!(url = %config.url, "spawning websocket reporter");
                handle.spawn(ws::run(config.url, rx, diagnostics));
            }
            Protocol::Http => {
                debug!(url = %config.url, "spawning http reporter");
                handle.spawn(http::run(config, rx, diagnostics));
            }
        }

        Ok(Self { tx })
    }

    /// Hands a record to the delivery task.
    ///
    /// Fire-and-forget: a dead task means the record is silently dropped.
    pub fn send(&self, record: LogRecord) {
        let _ = self.tx.send(record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::CapturedDiagnostics;

    fn config(url: &str) -> ReportConfig {
        ReportConfig {
            url: url.to_string(),
            token_key: String::new(),
            token_value: String::new(),
        }
    }

    #[test]
    fn spawn_without_runtime_fails() {
        let result = Reporter::spawn(
            Protocol::Http,
            config("http://collector"),
            Arc::new(CapturedDiagnostics::default()),
        );
        assert!(matches!(result, Err(ReportError::RuntimeUnavailable)));
    }

    #[tokio::test]
    async fn spawn_rejects_unsupported_protocol() {
        let result = Reporter::spawn(
            Protocol::None,
            config("ftp://collector"),
            Arc::new(CapturedDiagnostics::default()),
        );
        assert!(matches!(
            result,
            Err(ReportError::UnsupportedProtocol { url }) if url == "ftp://collector"
        ));
    }

    #[tokio::test]
    async fn send_after_task_death_is_silent() {
        let diagnostics = Arc::new(CapturedDiagnostics::default());
        // Nothing listens on this port, so the connection fails and the task
        // exits; later sends must drop without panicking.
        let reporter = Reporter::spawn(
            Protocol::Ws,
            config("ws://127.0.0.1:1"),
            Arc::clone(&diagnostics) as Arc<dyn Diagnostics>,
        )
        .expect("spawn");

        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        reporter.send(LogRecord::now(logbook_store::LogLevel::Log, "dropped"));

        assert!(!diagnostics.errors.lock().expect("lock").is_empty());
    }
}
