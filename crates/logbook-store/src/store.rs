//! Bounded, namespace-keyed record partitions.
//!
//! Each namespace maps to one JSON array of records stored newest-first in a
//! [`KvBackend`]. Appends are read-modify-write cycles serialized by an
//! internal mutex; concurrent writers from separate processes are outside
//! this store's guarantees.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::backend::KvBackend;
use crate::error::{Result, StoreError};
use crate::types::LogRecord;

/// What happened during an append.
#[derive(Debug, Clone, Default)]
pub struct AppendOutcome {
    /// The record evicted to make room, when the partition was at capacity.
    pub evicted: Option<LogRecord>,
    /// Description of a parse failure, when the stored partition was corrupt
    /// and has been replaced. The append itself still succeeded.
    pub corruption: Option<String>,
}

/// Record store over a durable key-value backend.
pub struct RecordStore {
    backend: Arc<dyn KvBackend>,
    // Serializes the read-modify-write cycle in append().
    write_lock: Mutex<()>,
}

impl RecordStore {
    /// Creates a store over the given backend.
    #[must_use]
    pub fn new(backend: Arc<dyn KvBackend>) -> Self {
        Self {
            backend,
            write_lock: Mutex::new(()),
        }
    }

    /// Appends a record at the front of the namespace partition.
    ///
    /// A missing or corrupt stored value degrades to the empty partition;
    /// the parse failure is carried in [`AppendOutcome::corruption`] instead
    /// of being propagated. When the partition already holds `max_len` or
    /// more records, the oldest are evicted before insertion so the partition
    /// never exceeds `max_len` afterwards. A `max_len` of zero behaves like
    /// one: each append replaces the previous sole record.
    ///
    /// # Errors
    ///
    /// Returns an error only when the backend itself fails.
    pub fn append(
        &self,
        namespace: &str,
        record: LogRecord,
        max_len: usize,
    ) -> Result<AppendOutcome> {
        let _guard = self.write_lock.lock();

        let (mut records, corruption) = match self.backend.get(namespace)? {
            None => (Vec::new(), None),
            Some(raw) => match serde_json::from_str::<Vec<LogRecord>>(&raw) {
                Ok(records) => (records, None),
                Err(e) => {
                    warn!(namespace, error = %e, "discarding corrupt partition");
                    (Vec::new(), Some(e.to_string()))
                }
            },
        };

        // Evict-then-insert keeps the partition bounded for every max_len,
        // including zero, which caps the partition at the single newest record.
        let mut evicted = None;
        while records.len() >= max_len.max(1) {
            evicted = records.pop();
        }
        records.insert(0, record);

        let raw = serde_json::to_string(&records)?;
        self.backend.set(namespace, &raw)?;
        debug!(namespace, len = records.len(), "appended record");

        Ok(AppendOutcome {
            evicted,
            corruption,
        })
    }

    /// Reads the full partition, newest-first.
    ///
    /// An absent namespace yields an empty vec.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Parse` when the stored value is not a valid
    /// record array, and `StoreError::Backend` on backend failure.
    pub fn read_all(&self, namespace: &str) -> Result<Vec<LogRecord>> {
        match self.backend.get(namespace)? {
            None => Ok(Vec::new()),
            Some(raw) => {
                serde_json::from_str(&raw).map_err(|source| StoreError::Parse {
                    namespace: namespace.to_string(),
                    source,
                })
            }
        }
    }

    /// Removes the entire partition. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns an error only when the backend fails.
    pub fn clear(&self, namespace: &str) -> Result<()> {
        self.backend.remove(namespace)
    }

    /// Returns the number of readable records in the partition.
    ///
    /// Absent and unparsable partitions both count as empty.
    #[must_use]
    pub fn len(&self, namespace: &str) -> usize {
        self.read_all(namespace).map_or(0, |records| records.len())
    }

    /// Returns true when the partition holds no readable records.
    #[must_use]
    pub fn is_empty(&self, namespace: &str) -> bool {
        self.len(namespace) == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;
    use crate::types::LogLevel;

    const NS: &str = "__ROOT_LOG__";

    fn store() -> RecordStore {
        RecordStore::new(Arc::new(MemoryBackend::new()))
    }

    fn record(message: &str) -> LogRecord {
        LogRecord::now(LogLevel::Log, message)
    }

    fn messages(records: &[LogRecord]) -> Vec<&str> {
        records.iter().filter_map(LogRecord::message_text).collect()
    }

    #[test]
    fn append_inserts_newest_first() {
        let store = store();
        store.append(NS, record("first"), 1000).expect("append");
        store.append(NS, record("second"), 1000).expect("append");
        store.append(NS, record("third"), 1000).expect("append");

        let records = store.read_all(NS).expect("read");
        assert_eq!(messages(&records), vec!["third", "second", "first"]);
    }

    #[test]
    fn append_at_capacity_evicts_oldest() {
        let store = store();
        store.append(NS, record("a"), 2).expect("append");
        store.append(NS, record("b"), 2).expect("append");
        let outcome = store.append(NS, record("c"), 2).expect("append");

        assert_eq!(
            outcome.evicted.as_ref().and_then(LogRecord::message_text),
            Some("a")
        );
        let records = store.read_all(NS).expect("read");
        assert_eq!(messages(&records), vec!["c", "b"]);
    }

    #[test]
    fn partition_never_exceeds_max_len() {
        let store = store();
        for i in 0..25 {
            store
                .append(NS, record(&format!("m{i}")), 10)
                .expect("append");
            assert!(store.len(NS) <= 10);
        }
        assert_eq!(store.len(NS), 10);

        // Last max_len appends, newest-first.
        let records = store.read_all(NS).expect("read");
        assert_eq!(records[0].message_text(), Some("m24"));
        assert_eq!(records[9].message_text(), Some("m15"));
    }

    #[test]
    fn zero_capacity_keeps_only_the_newest_record() {
        let store = store();
        for i in 0..5 {
            store
                .append(NS, record(&format!("m{i}")), 0)
                .expect("append");
            assert_eq!(store.len(NS), 1);
        }

        let records = store.read_all(NS).expect("read");
        assert_eq!(messages(&records), vec!["m4"]);

        // Each append past the first evicts the previous sole record.
        let outcome = store.append(NS, record("m5"), 0).expect("append");
        assert_eq!(
            outcome.evicted.as_ref().and_then(LogRecord::message_text),
            Some("m4")
        );
    }

    #[test]
    fn append_holds_min_of_calls_and_capacity() {
        let store = store();
        for i in 0..4 {
            store
                .append(NS, record(&format!("m{i}")), 1000)
                .expect("append");
        }
        assert_eq!(store.len(NS), 4);
    }

    #[test]
    fn append_recovers_from_corrupt_partition() {
        let backend = Arc::new(MemoryBackend::new());
        backend.set(NS, "{ not json").expect("seed");
        let store = RecordStore::new(Arc::clone(&backend) as Arc<dyn KvBackend>);

        let outcome = store.append(NS, record("fresh"), 1000).expect("append");
        assert!(outcome.corruption.is_some());
        assert!(outcome.evicted.is_none());

        // Partition is valid JSON again and holds only the new record.
        let records = store.read_all(NS).expect("read");
        assert_eq!(messages(&records), vec!["fresh"]);
    }

    #[test]
    fn read_all_absent_namespace_is_empty() {
        let store = store();
        assert!(store.read_all("missing").expect("read").is_empty());
    }

    #[test]
    fn read_all_corrupt_partition_errors_with_namespace() {
        let backend = Arc::new(MemoryBackend::new());
        backend.set(NS, "garbage").expect("seed");
        let store = RecordStore::new(backend as Arc<dyn KvBackend>);

        let err = store.read_all(NS).expect_err("corrupt partition");
        assert!(matches!(err, StoreError::Parse { namespace, .. } if namespace == NS));
    }

    #[test]
    fn clear_is_idempotent() {
        let store = store();
        store.append(NS, record("x"), 1000).expect("append");
        store.clear(NS).expect("clear");
        assert!(store.is_empty(NS));
        store.clear(NS).expect("clear absent");
    }

    #[test]
    fn namespaces_are_independent() {
        let store = store();
        store.append("a", record("in-a"), 1000).expect("append");
        store.append("b", record("in-b"), 1000).expect("append");

        assert_eq!(messages(&store.read_all("a").expect("read")), vec!["in-a"]);
        assert_eq!(messages(&store.read_all("b").expect("read")), vec!["in-b"]);

        store.clear("a").expect("clear");
        assert!(store.is_empty("a"));
        assert_eq!(store.len("b"), 1);
    }
}
