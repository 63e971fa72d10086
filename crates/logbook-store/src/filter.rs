//! Query filters over stored records.
//!
//! Predicates are optional and AND-composed: an empty filter matches every
//! record. Time comparison is lexicographic on the fixed timestamp format,
//! which orders the same way as real time.

use serde::{Deserialize, Serialize};

use crate::types::{LogLevel, LogRecord};

/// Time predicate over the record's `timer` string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeFilter {
    /// Keep records with `timer >= t` (inclusive lower bound).
    Since(String),
    /// Keep records with `start <= timer <= end` (both inclusive).
    Between(String, String),
}

impl TimeFilter {
    /// Checks whether a timer string falls within this filter.
    #[must_use]
    pub fn contains(&self, timer: &str) -> bool {
        match self {
            Self::Since(start) => timer >= start.as_str(),
            Self::Between(start, end) => timer >= start.as_str() && timer <= end.as_str(),
        }
    }
}

/// Filter criteria for querying records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordFilter {
    /// Time predicate, inclusive on both bounds.
    pub time: Option<TimeFilter>,
    /// Exact level match.
    pub level: Option<LogLevel>,
    /// Case-sensitive substring match against string messages.
    pub content: Option<String>,
}

impl RecordFilter {
    /// Creates an empty filter that matches all records.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a time predicate.
    #[must_use]
    pub fn with_time(mut self, time: TimeFilter) -> Self {
        self.time = Some(time);
        self
    }

    /// Adds an inclusive lower-bound time predicate.
    #[must_use]
    pub fn with_since(mut self, start: impl Into<String>) -> Self {
        self.time = Some(TimeFilter::Since(start.into()));
        self
    }

    /// Adds an inclusive time-range predicate.
    #[must_use]
    pub fn with_between(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.time = Some(TimeFilter::Between(start.into(), end.into()));
        self
    }

    /// Adds a level predicate.
    #[must_use]
    pub const fn with_level(mut self, level: LogLevel) -> Self {
        self.level = Some(level);
        self
    }

    /// Adds a content predicate.
    #[must_use]
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Returns true when no predicate is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.time.is_none() && self.level.is_none() && self.content.is_none()
    }

    /// Checks whether a record satisfies every set predicate.
    ///
    /// A content predicate only ever matches records whose message is a JSON
    /// string; other message shapes never match.
    #[must_use]
    pub fn matches(&self, record: &LogRecord) -> bool {
        if let Some(time) = &self.time {
            if !time.contains(&record.timer) {
                return false;
            }
        }

        if let Some(level) = self.level {
            if record.level != level {
                return false;
            }
        }

        if let Some(content) = &self.content {
            match record.message_text() {
                Some(text) if text.contains(content.as_str()) => {}
                _ => return false,
            }
        }

        true
    }

    /// Applies the filter, returning matching records in their original order.
    #[must_use]
    pub fn apply(&self, records: &[LogRecord]) -> Vec<LogRecord> {
        records
            .iter()
            .filter(|record| self.matches(record))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn record(timer: &str, level: LogLevel, message: &str) -> LogRecord {
        LogRecord::at(timer, level, message)
    }

    #[test]
    fn empty_filter_matches_everything() {
        let filter = RecordFilter::new();
        assert!(filter.is_empty());
        assert!(filter.matches(&record("2024-01-01 00:00:00.000", LogLevel::Log, "x")));
    }

    #[test]
    fn level_filter_matches_exactly() {
        let filter = RecordFilter::new().with_level(LogLevel::Warn);
        assert!(filter.matches(&record("2024-01-01 00:00:00.000", LogLevel::Warn, "x")));
        assert!(!filter.matches(&record("2024-01-01 00:00:00.000", LogLevel::Error, "x")));
    }

    #[test]
    fn content_filter_is_case_sensitive() {
        let entry = record("2024-01-01 00:00:00.000", LogLevel::Log, "Connection lost");
        assert!(RecordFilter::new().with_content("Connection").matches(&entry));
        assert!(!RecordFilter::new().with_content("connection").matches(&entry));
    }

    #[test]
    fn content_filter_never_matches_non_string_messages() {
        let entry = LogRecord::at(
            "2024-01-01 00:00:00.000",
            LogLevel::Log,
            serde_json::json!({ "text": "Connection" }),
        );
        assert!(!RecordFilter::new().with_content("Connection").matches(&entry));
        // Even the empty substring requires a string message.
        assert!(!RecordFilter::new().with_content("").matches(&entry));
    }

    #[test]
    fn since_bound_is_inclusive() {
        let filter = RecordFilter::new().with_since("2024-01-01 12:00:00.000");
        assert!(filter.matches(&record("2024-01-01 12:00:00.000", LogLevel::Log, "x")));
        assert!(filter.matches(&record("2024-01-01 12:00:00.001", LogLevel::Log, "x")));
        assert!(!filter.matches(&record("2024-01-01 11:59:59.999", LogLevel::Log, "x")));
    }

    #[test]
    fn between_bounds_are_inclusive() {
        let filter = RecordFilter::new()
            .with_between("2024-01-01 00:00:00.000", "2024-01-01 23:59:59.999");
        assert!(filter.matches(&record("2024-01-01 00:00:00.000", LogLevel::Log, "x")));
        assert!(filter.matches(&record("2024-01-01 23:59:59.999", LogLevel::Log, "x")));
        assert!(!filter.matches(&record("2023-12-31 23:59:59.999", LogLevel::Log, "x")));
        assert!(!filter.matches(&record("2024-01-02 00:00:00.000", LogLevel::Log, "x")));
    }

    #[test]
    fn apply_preserves_relative_order() {
        let records = vec![
            record("2024-01-01 00:00:03.000", LogLevel::Info, "third"),
            record("2024-01-01 00:00:02.000", LogLevel::Warn, "second"),
            record("2024-01-01 00:00:01.000", LogLevel::Info, "first"),
        ];
        let filtered = RecordFilter::new().with_level(LogLevel::Info).apply(&records);
        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered[0].message_text(), Some("third"));
        assert_eq!(filtered[1].message_text(), Some("first"));
    }

    #[test]
    fn apply_does_not_mutate_input() {
        let records = vec![
            record("2024-01-01 00:00:01.000", LogLevel::Info, "a"),
            record("2024-01-01 00:00:02.000", LogLevel::Error, "b"),
        ];
        let before = records.clone();
        let _ = RecordFilter::new().with_level(LogLevel::Error).apply(&records);
        assert_eq!(records, before);
    }

    fn arb_level() -> impl Strategy<Value = LogLevel> {
        prop_oneof![
            Just(LogLevel::Log),
            Just(LogLevel::Info),
            Just(LogLevel::Warn),
            Just(LogLevel::Error),
        ]
    }

    fn arb_records() -> impl Strategy<Value = Vec<LogRecord>> {
        proptest::collection::vec((arb_level(), "[a-c]{0,4}"), 0..32).prop_map(|items| {
            items
                .into_iter()
                .enumerate()
                .map(|(i, (level, message))| {
                    LogRecord::at(
                        format!("2024-01-01 00:{:02}:{:02}.000", i / 60, i % 60),
                        level,
                        message,
                    )
                })
                .collect()
        })
    }

    proptest! {
        #[test]
        fn apply_is_idempotent(records in arb_records(), level in arb_level(), content in "[a-c]{0,2}") {
            let filter = RecordFilter::new().with_level(level).with_content(content);
            let once = filter.apply(&records);
            let twice = filter.apply(&once);
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn predicates_compose(records in arb_records(), level in arb_level(), content in "[a-c]{0,2}") {
            let by_level = RecordFilter::new().with_level(level);
            let by_content = RecordFilter::new().with_content(content.clone());
            let combined = RecordFilter::new().with_level(level).with_content(content);
            prop_assert_eq!(
                by_content.apply(&by_level.apply(&records)),
                combined.apply(&records)
            );
        }

        #[test]
        fn apply_output_is_subsequence(records in arb_records(), level in arb_level()) {
            let filtered = RecordFilter::new().with_level(level).apply(&records);
            let mut cursor = records.iter();
            for kept in &filtered {
                prop_assert!(cursor.any(|r| r == kept));
            }
        }
    }
}
