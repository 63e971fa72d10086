//! Line-oriented export payloads.

use std::path::{Path, PathBuf};

use chrono::Utc;
use logbook_store::{format_timer, LogRecord};
use tracing::warn;

use crate::error::Result;

/// A ready-to-save export: one JSON-serialized record per line.
///
/// The file name is `<timestamp>-<log_file_name>` with `:` replaced by `_`
/// so it stays a valid file name, e.g. `2022-11-07 14_35_27.984-log.txt`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Export {
    /// Suggested file name.
    pub file_name: String,
    /// Lines joined by the configured line break.
    pub contents: String,
}

impl Export {
    pub(crate) fn build(records: &[LogRecord], line_break: &str, log_file_name: &str) -> Self {
        let mut contents = String::new();
        for record in records {
            match serde_json::to_string(record) {
                Ok(line) => {
                    contents.push_str(&line);
                    contents.push_str(line_break);
                }
                Err(e) => warn!(error = %e, "skipping unserializable record in export"),
            }
        }

        let stamp = format_timer(Utc::now()).replace(':', "_");
        Self {
            file_name: format!("{stamp}-{log_file_name}"),
            contents,
        }
    }

    /// Writes the payload into `dir` under [`Export::file_name`].
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be written.
    pub fn write_to(&self, dir: impl AsRef<Path>) -> Result<PathBuf> {
        let path = dir.as_ref().join(&self.file_name);
        std::fs::write(&path, &self.contents)?;
        Ok(path)
    }
}
