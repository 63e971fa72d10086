//! Facade configuration and the whitelist merge.

use logbook_store::LogLevel;
use serde::{Deserialize, Serialize};

/// Recognized options and their defaults.
///
/// Mutation after construction goes through [`Config::merge`] with a
/// [`ConfigPatch`]: only recognized keys can ever be set, and a JSON patch
/// with unknown keys deterministically ignores them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// Suppress console echo entirely.
    pub hide_console: bool,
    /// Label shown in the console prefix badge.
    pub console_prefix: String,
    /// Omit the prefix badge, keeping only the level badge.
    pub hide_console_prefix: bool,
    /// Storage partition key.
    pub namespace: String,
    /// Enable persistence (and with it, reporting).
    pub record_logs: bool,
    /// Maximum records retained per namespace.
    pub log_max_length: usize,
    /// Levels eligible for persistence and reporting. Console echo is not
    /// gated by this filter.
    pub log_level: Vec<LogLevel>,
    /// Export filename suffix.
    pub log_file_name: String,
    /// Record separator in exports.
    pub line_break: String,
    /// Remote collector URL; empty disables reporting.
    pub report_server_url: String,
    /// Auth header name for HTTP reporting.
    pub token_key: String,
    /// Auth header value for HTTP reporting; empty disables the header.
    pub token_value: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            hide_console: false,
            console_prefix: "SimpleLog".to_string(),
            hide_console_prefix: false,
            namespace: "__ROOT_LOG__".to_string(),
            record_logs: true,
            log_max_length: 1000,
            log_level: LogLevel::ALL.to_vec(),
            log_file_name: "log.txt".to_string(),
            line_break: "\n".to_string(),
            report_server_url: String::new(),
            token_key: "token".to_string(),
            token_value: String::new(),
        }
    }
}

impl Config {
    /// Applies the set fields of a patch, last-write-wins per key.
    pub fn merge(&mut self, patch: ConfigPatch) {
        if let Some(v) = patch.hide_console {
            self.hide_console = v;
        }
        if let Some(v) = patch.console_prefix {
            self.console_prefix = v;
        }
        if let Some(v) = patch.hide_console_prefix {
            self.hide_console_prefix = v;
        }
        if let Some(v) = patch.namespace {
            self.namespace = v;
        }
        if let Some(v) = patch.record_logs {
            self.record_logs = v;
        }
        if let Some(v) = patch.log_max_length {
            self.log_max_length = v;
        }
        if let Some(v) = patch.log_level {
            self.log_level = v;
        }
        if let Some(v) = patch.log_file_name {
            self.log_file_name = v;
        }
        if let Some(v) = patch.line_break {
            self.line_break = v;
        }
        if let Some(v) = patch.report_server_url {
            self.report_server_url = v;
        }
        if let Some(v) = patch.token_key {
            self.token_key = v;
        }
        if let Some(v) = patch.token_value {
            self.token_value = v;
        }
    }

    /// Whether a record at `level` is persisted (and thus reportable).
    #[must_use]
    pub fn persists(&self, level: LogLevel) -> bool {
        self.record_logs && self.log_level.contains(&level)
    }
}

/// Partial configuration: one optional field per recognized key.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfigPatch {
    /// See [`Config::hide_console`].
    pub hide_console: Option<bool>,
    /// See [`Config::console_prefix`].
    pub console_prefix: Option<String>,
    /// See [`Config::hide_console_prefix`].
    pub hide_console_prefix: Option<bool>,
    /// See [`Config::namespace`].
    pub namespace: Option<String>,
    /// See [`Config::record_logs`].
    pub record_logs: Option<bool>,
    /// See [`Config::log_max_length`].
    pub log_max_length: Option<usize>,
    /// See [`Config::log_level`].
    pub log_level: Option<Vec<LogLevel>>,
    /// See [`Config::log_file_name`].
    pub log_file_name: Option<String>,
    /// See [`Config::line_break`].
    pub line_break: Option<String>,
    /// See [`Config::report_server_url`].
    pub report_server_url: Option<String>,
    /// See [`Config::token_key`].
    pub token_key: Option<String>,
    /// See [`Config::token_value`].
    pub token_value: Option<String>,
}

impl ConfigPatch {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `hide_console`.
    #[must_use]
    pub const fn hide_console(mut self, v: bool) -> Self {
        self.hide_console = Some(v);
        self
    }

    /// Sets `console_prefix`.
    #[must_use]
    pub fn console_prefix(mut self, v: impl Into<String>) -> Self {
        self.console_prefix = Some(v.into());
        self
    }

    /// Sets `hide_console_prefix`.
    #[must_use]
    pub const fn hide_console_prefix(mut self, v: bool) -> Self {
        self.hide_console_prefix = Some(v);
        self
    }

    /// Sets `namespace`.
    #[must_use]
    pub fn namespace(mut self, v: impl Into<String>) -> Self {
        self.namespace = Some(v.into());
        self
    }

    /// Sets `record_logs`.
    #[must_use]
    pub const fn record_logs(mut self, v: bool) -> Self {
        self.record_logs = Some(v);
        self
    }

    /// Sets `log_max_length`.
    #[must_use]
    pub const fn log_max_length(mut self, v: usize) -> Self {
        self.log_max_length = Some(v);
        self
    }

    /// Sets `log_level`.
    #[must_use]
    pub fn log_level(mut self, v: impl Into<Vec<LogLevel>>) -> Self {
        self.log_level = Some(v.into());
        self
    }

    /// Sets `log_file_name`.
    #[must_use]
    pub fn log_file_name(mut self, v: impl Into<String>) -> Self {
        self.log_file_name = Some(v.into());
        self
    }

    /// Sets `line_break`.
    #[must_use]
    pub fn line_break(mut self, v: impl Into<String>) -> Self {
        self.line_break = Some(v.into());
        self
    }

    /// Sets `report_server_url`.
    #[must_use]
    pub fn report_server_url(mut self, v: impl Into<String>) -> Self {
        self.report_server_url = Some(v.into());
        self
    }

    /// Sets `token_key`.
    #[must_use]
    pub fn token_key(mut self, v: impl Into<String>) -> Self {
        self.token_key = Some(v.into());
        self
    }

    /// Sets `token_value`.
    #[must_use]
    pub fn token_value(mut self, v: impl Into<String>) -> Self {
        self.token_value = Some(v.into());
        self
    }
}
