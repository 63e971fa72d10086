//! # logbook
//!
//! Bounded client-side logging: console echo with level styling, durable
//! namespace-keyed storage with FIFO eviction, filtered retrieval and
//! line-oriented export, and best-effort reporting to a remote collector
//! over WebSocket or HTTP.
//!
//! ## Example
//!
//! ```rust
//! use logbook::{Config, Logbook, RecordFilter};
//! use logbook::LogLevel;
//!
//! let book = Logbook::with_config(Config {
//!     hide_console: true,
//!     ..Config::default()
//! });
//!
//! book.log("started").warn("disk space low").error("disk full");
//!
//! // Before any query, export covers the whole partition.
//! let export = book.export(&RecordFilter::new());
//! assert_eq!(export.contents.lines().count(), 3);
//!
//! book.query(None, &RecordFilter::new().with_level(LogLevel::Error));
//! assert_eq!(book.records().len(), 1);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
mod console;
pub mod error;
pub mod export;
pub mod logger;

pub use config::{Config, ConfigPatch};
pub use error::{LogbookError, Result};
pub use export::Export;
pub use logbook_report::Protocol;
pub use logbook_store::{
    format_timer, KvBackend, LogLevel, LogRecord, MemoryBackend, RecordFilter, SledBackend,
    TimeFilter,
};
pub use logger::Logbook;
