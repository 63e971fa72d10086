//! The `Logbook` facade.
//!
//! One value owns the configuration, the record store, and (when configured)
//! the reporting task. Per-level calls chain; nothing in the log path ever
//! returns an error to the caller.

use std::path::Path;
use std::sync::{Arc, Weak};

use logbook_report::{Diagnostics, Protocol, ReportConfig, Reporter};
use logbook_store::{
    KvBackend, LogLevel, LogRecord, MemoryBackend, RecordFilter, RecordStore, SledBackend,
};
use parking_lot::{Mutex, RwLock};
use tracing::error;

use crate::config::{Config, ConfigPatch};
use crate::console;
use crate::error::Result;
use crate::export::Export;

struct Inner {
    config: RwLock<Config>,
    store: RecordStore,
    // Reporting topology is fixed at construction; this is only written once.
    reporter: RwLock<Option<Reporter>>,
    // Result of the last query, consumed by the next export.
    view: Mutex<Option<Vec<LogRecord>>>,
}

impl Inner {
    /// The one path every record takes: echo, persist, report.
    ///
    /// Internal records (transport lifecycle, error-channel entries) pass
    /// `report = false` so reporting failures can never generate their own
    /// report traffic.
    fn record(&self, level: LogLevel, message: serde_json::Value, report: bool) {
        let record = LogRecord::now(level, message);
        let config = self.config.read().clone();

        console::echo(&config, &record);

        if !config.persists(level) {
            return;
        }

        match self
            .store
            .append(&config.namespace, record.clone(), config.log_max_length)
        {
            Ok(outcome) => {
                if let Some(reason) = outcome.corruption {
                    // The partition has just been rewritten as valid JSON, so
                    // this nested append cannot find corruption again.
                    self.record(
                        LogLevel::Error,
                        serde_json::Value::String(format!(
                            "log partition '{}' was corrupt and has been reset: {reason}",
                            config.namespace
                        )),
                        false,
                    );
                }
            }
            Err(e) => {
                error!(namespace = %config.namespace, error = %e, "failed to persist log record");
            }
        }

        if report {
            if let Some(reporter) = &*self.reporter.read() {
                reporter.send(record);
            }
        }
    }
}

/// Diagnostics sink that turns transport events into internal records.
///
/// Holds a weak handle so the reporter task never keeps a dropped `Logbook`
/// alive; events after teardown are discarded.
struct InnerDiagnostics {
    inner: Weak<Inner>,
}

impl Diagnostics for InnerDiagnostics {
    fn info(&self, message: String) {
        if let Some(inner) = self.inner.upgrade() {
            inner.record(LogLevel::Info, serde_json::Value::String(message), false);
        }
    }

    fn error(&self, message: String) {
        if let Some(inner) = self.inner.upgrade() {
            inner.record(LogLevel::Error, serde_json::Value::String(message), false);
        }
    }
}

/// The logging facade.
///
/// Cheaply cloneable; clones share configuration, storage, and the reporting
/// connection.
#[derive(Clone)]
pub struct Logbook {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for Logbook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logbook")
            .field("config", &*self.inner.config.read())
            .field("reporting", &self.inner.reporter.read().is_some())
            .finish_non_exhaustive()
    }
}

impl Default for Logbook {
    fn default() -> Self {
        Self::new()
    }
}

impl Logbook {
    /// Creates a facade with default configuration over an in-memory backend.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Creates a facade over an in-memory backend.
    #[must_use]
    pub fn with_config(config: Config) -> Self {
        Self::with_backend(config, Arc::new(MemoryBackend::new()))
    }

    /// Creates a facade over a sled database at `path`, durable across
    /// restarts.
    ///
    /// # Errors
    ///
    /// Returns an error when the database cannot be opened.
    pub fn open(path: impl AsRef<Path>, config: Config) -> Result<Self> {
        let backend = SledBackend::open(path)?;
        Ok(Self::with_backend(config, Arc::new(backend)))
    }

    /// Creates a facade over any [`KvBackend`].
    ///
    /// When `report_server_url` is set, the collector connection is
    /// established here; an unsupported scheme or a missing async runtime
    /// produces one error record and leaves reporting disabled for the
    /// lifetime of the facade.
    #[must_use]
    pub fn with_backend(config: Config, backend: Arc<dyn KvBackend>) -> Self {
        let book = Self {
            inner: Arc::new(Inner {
                config: RwLock::new(config),
                store: RecordStore::new(backend),
                reporter: RwLock::new(None),
                view: Mutex::new(None),
            }),
        };
        book.init_reporting();
        book
    }

    fn init_reporting(&self) {
        let (url, token_key, token_value) = {
            let config = self.inner.config.read();
            (
                config.report_server_url.clone(),
                config.token_key.clone(),
                config.token_value.clone(),
            )
        };
        if url.is_empty() {
            return;
        }

        let protocol = Protocol::detect(&url);
        if protocol == Protocol::None {
            self.inner.record(
                LogLevel::Error,
                serde_json::Value::String(format!("report server URL not supported: {url}")),
                false,
            );
            return;
        }

        let diagnostics = Arc::new(InnerDiagnostics {
            inner: Arc::downgrade(&self.inner),
        });
        let report_config = ReportConfig {
            url,
            token_key,
            token_value,
        };
        match Reporter::spawn(protocol, report_config, diagnostics) {
            Ok(reporter) => *self.inner.reporter.write() = Some(reporter),
            Err(e) => {
                self.inner.record(
                    LogLevel::Error,
                    serde_json::Value::String(format!("reporting disabled: {e}")),
                    false,
                );
            }
        }
    }

    /// Logs at the `log` level.
    pub fn log(&self, message: impl Into<serde_json::Value>) -> &Self {
        self.inner.record(LogLevel::Log, message.into(), true);
        self
    }

    /// Logs at the `info` level.
    pub fn info(&self, message: impl Into<serde_json::Value>) -> &Self {
        self.inner.record(LogLevel::Info, message.into(), true);
        self
    }

    /// Logs at the `warn` level.
    pub fn warn(&self, message: impl Into<serde_json::Value>) -> &Self {
        self.inner.record(LogLevel::Warn, message.into(), true);
        self
    }

    /// Logs at the `error` level.
    pub fn error(&self, message: impl Into<serde_json::Value>) -> &Self {
        self.inner.record(LogLevel::Error, message.into(), true);
        self
    }

    /// Reads a namespace (default: the configured one), applies the filter,
    /// and caches the result as the current view for [`Logbook::records`] and
    /// the next [`Logbook::export`].
    ///
    /// An unreadable partition yields an empty view plus one error record.
    pub fn query(&self, namespace: Option<&str>, filter: &RecordFilter) -> &Self {
        let default_namespace = self.inner.config.read().namespace.clone();
        let namespace = namespace.unwrap_or(&default_namespace);

        let records = match self.inner.store.read_all(namespace) {
            Ok(records) => records,
            Err(e) => {
                self.inner.record(
                    LogLevel::Error,
                    serde_json::Value::String(format!(
                        "failed to read log partition '{namespace}': {e}"
                    )),
                    false,
                );
                Vec::new()
            }
        };

        *self.inner.view.lock() = Some(filter.apply(&records));
        self
    }

    /// Returns a copy of the current view (empty before any query).
    #[must_use]
    pub fn records(&self) -> Vec<LogRecord> {
        self.inner.view.lock().clone().unwrap_or_default()
    }

    /// Builds an export payload from the current view, or from a fresh full
    /// read of the configured namespace when no query ran.
    ///
    /// An unreadable store yields an empty export rather than an error.
    #[must_use]
    pub fn export(&self, filter: &RecordFilter) -> Export {
        let config = self.inner.config.read().clone();

        let base = {
            let view = self.inner.view.lock();
            match view.as_ref() {
                Some(records) => records.clone(),
                None => match self.inner.store.read_all(&config.namespace) {
                    Ok(records) => records,
                    Err(e) => {
                        error!(namespace = %config.namespace, error = %e, "export reading empty record set");
                        Vec::new()
                    }
                },
            }
        };

        let filtered = filter.apply(&base);
        Export::build(&filtered, &config.line_break, &config.log_file_name)
    }

    /// Removes a namespace partition (default: the configured one) and drops
    /// the cached view. Idempotent.
    pub fn clear(&self, namespace: Option<&str>) -> &Self {
        let default_namespace = self.inner.config.read().namespace.clone();
        let namespace = namespace.unwrap_or(&default_namespace);

        if let Err(e) = self.inner.store.clear(namespace) {
            error!(namespace = %namespace, error = %e, "failed to clear log partition");
        }
        *self.inner.view.lock() = None;
        self
    }

    /// Returns a copy of the current configuration.
    #[must_use]
    pub fn config(&self) -> Config {
        self.inner.config.read().clone()
    }

    /// Merges a patch into the configuration, last-write-wins per key.
    ///
    /// Changing `report_server_url` after construction does not re-dial; the
    /// reporting connection is fixed when the facade is built.
    pub fn set_config(&self, patch: ConfigPatch) -> &Self {
        self.inner.config.write().merge(patch);
        self
    }
}
