//! Core types for the log store.
//!
//! This module provides:
//! - [`LogLevel`] — The four client log levels
//! - [`LogRecord`] — One timestamped, leveled entry with an opaque message
//! - [`format_timer`] — The single timestamp formatting function

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::StoreError;

/// Client log levels.
///
/// The four levels mirror the console methods they echo to. They carry no
/// severity ranking; filters match on equality only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Plain output
    Log,
    /// General information
    Info,
    /// Warning conditions
    Warn,
    /// Error conditions
    Error,
}

impl LogLevel {
    /// All levels, in declaration order.
    pub const ALL: [Self; 4] = [Self::Log, Self::Info, Self::Warn, Self::Error];

    /// Returns the string representation of this level.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Log => "log",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "log" => Ok(Self::Log),
            "info" => Ok(Self::Info),
            "warn" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            other => Err(StoreError::UnknownLevel(other.to_string())),
        }
    }
}

/// One log entry.
///
/// The `timer` field carries the wire-format timestamp string
/// `YYYY-MM-DD HH:mm:ss.mmm`, which is lexicographically monotonic with real
/// time, so stores and filters compare it as a plain string. The message is
/// an opaque JSON value. Records are immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    /// Creation timestamp, fixed format `YYYY-MM-DD HH:mm:ss.mmm` (UTC).
    pub timer: String,
    /// Level the record was emitted at.
    pub level: LogLevel,
    /// Opaque message payload.
    pub message: serde_json::Value,
}

impl LogRecord {
    /// Creates a record stamped with the current time.
    #[must_use]
    pub fn now(level: LogLevel, message: impl Into<serde_json::Value>) -> Self {
        Self {
            timer: format_timer(Utc::now()),
            level,
            message: message.into(),
        }
    }

    /// Creates a record with an explicit timestamp string.
    #[must_use]
    pub fn at(
        timer: impl Into<String>,
        level: LogLevel,
        message: impl Into<serde_json::Value>,
    ) -> Self {
        Self {
            timer: timer.into(),
            level,
            message: message.into(),
        }
    }

    /// Returns the message as text when it is a JSON string.
    #[must_use]
    pub fn message_text(&self) -> Option<&str> {
        self.message.as_str()
    }
}

/// Formats a timestamp in the fixed `YYYY-MM-DD HH:mm:ss.mmm` wire format.
///
/// Milliseconds are always padded to three digits so string comparison
/// orders records the same way their timestamps do.
#[must_use]
pub fn format_timer(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%d %H:%M:%S%.3f").to_string()
}
