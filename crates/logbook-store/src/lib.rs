//! # logbook-store
//!
//! Record model, filter engine, and durable partition store for logbook.
//!
//! This crate provides:
//!
//! - [`LogLevel`] — The four client log levels (log, info, warn, error)
//! - [`LogRecord`] — One timestamped, leveled entry with an opaque message
//! - [`RecordFilter`] — AND-composed time/level/content predicates
//! - [`KvBackend`] — String-keyed durable store seam, with sled and
//!   in-memory implementations
//! - [`RecordStore`] — Bounded, newest-first partitions keyed by namespace
//!
//! ## Example
//!
//! ```rust
//! use logbook_store::{LogLevel, LogRecord, MemoryBackend, RecordFilter, RecordStore};
//! use std::sync::Arc;
//!
//! let store = RecordStore::new(Arc::new(MemoryBackend::new()));
//! store.append("app", LogRecord::now(LogLevel::Info, "started"), 1000)?;
//!
//! let filter = RecordFilter::new().with_level(LogLevel::Info);
//! let records = filter.apply(&store.read_all("app")?);
//! assert_eq!(records.len(), 1);
//! # Ok::<(), logbook_store::StoreError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod backend;
pub mod error;
pub mod filter;
pub mod store;
pub mod types;

pub use backend::{KvBackend, MemoryBackend, SledBackend};
pub use error::{Result, StoreError};
pub use filter::{RecordFilter, TimeFilter};
pub use store::{AppendOutcome, RecordStore};
pub use types::{format_timer, LogLevel, LogRecord};
