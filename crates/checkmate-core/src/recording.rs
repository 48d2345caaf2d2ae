//! In-memory logger that keeps every finished check.

use crate::logger::{CheckHandle, CheckLogger};
use crate::types::{Outcome, Status};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

/// A finished check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckRecord {
    /// Full check name, including any object prefix.
    pub name: String,
    /// Reported status.
    pub status: Status,
    /// Reason attached to a `FAIL`, `WARN` or `ERROR`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl CheckRecord {
    /// Creates a record from a check name and its outcome.
    #[must_use]
    pub fn new(name: impl Into<String>, outcome: &Outcome) -> Self {
        Self {
            name: name.into(),
            status: outcome.status(),
            reason: outcome.reason().map(str::to_string),
        }
    }
}

/// Logger collecting a [`CheckRecord`] per finished check.
///
/// Clones share the same storage, so a clone can be handed to a builder
/// while the original is kept to read the records back.
#[derive(Debug, Clone, Default)]
pub struct RecordingLogger {
    records: Arc<Mutex<Vec<CheckRecord>>>,
}

impl RecordingLogger {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of the records in completion order.
    #[must_use]
    pub fn records(&self) -> Vec<CheckRecord> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Summarizes the records collected so far.
    #[must_use]
    pub fn summary(&self) -> Summary {
        Summary::from_records(&self.records())
    }
}

impl CheckLogger for RecordingLogger {
    fn log(&self, name: &str) -> CheckHandle<'_> {
        let name = name.to_string();
        CheckHandle::from_fn(move |outcome: &Outcome| {
            self.records
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(CheckRecord::new(name, outcome));
        })
    }
}

/// Outcome counts for a set of checks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    /// Checks that passed.
    pub passed: usize,
    /// Checks that failed.
    pub failed: usize,
    /// Checks that warned.
    pub warned: usize,
    /// Checks that were skipped.
    pub skipped: usize,
    /// Checks whose predicate errored.
    pub errored: usize,
}

impl Summary {
    /// Counts statuses in `records`.
    #[must_use]
    pub fn from_records(records: &[CheckRecord]) -> Self {
        let mut summary = Self::default();
        for record in records {
            match record.status {
                Status::Pass => summary.passed += 1,
                Status::Fail => summary.failed += 1,
                Status::Warn => summary.warned += 1,
                Status::Skip => summary.skipped += 1,
                Status::Error => summary.errored += 1,
            }
        }
        summary
    }

    /// Total number of checks.
    #[must_use]
    pub fn total(&self) -> usize {
        self.passed + self.failed + self.warned + self.skipped + self.errored
    }

    /// Returns true if every check passed.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.passed == self.total()
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} check(s): {} passed, {} failed, {} warned, {} skipped, {} errored",
            self.total(),
            self.passed,
            self.failed,
            self.warned,
            self.skipped,
            self.errored
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_in_completion_order() {
        let recorder = RecordingLogger::new();

        let first = recorder.log("first");
        recorder.log("second").warn_with("low disk");
        first.pass();

        assert_eq!(
            recorder.records(),
            vec![
                CheckRecord {
                    name: "second".into(),
                    status: Status::Warn,
                    reason: Some("low disk".into()),
                },
                CheckRecord {
                    name: "first".into(),
                    status: Status::Pass,
                    reason: None,
                },
            ]
        );
    }

    #[test]
    fn clones_share_storage() {
        let recorder = RecordingLogger::new();
        let clone = recorder.clone();
        clone.log("shared").skip();
        assert_eq!(recorder.records().len(), 1);
    }

    #[test]
    fn summary_counts() {
        let recorder = RecordingLogger::new();
        recorder.log("a").pass();
        recorder.log("b").fail();
        recorder.log("c").skip();
        recorder.log("d").error("Error: boom");

        let summary = recorder.summary();
        assert_eq!(summary.total(), 4);
        assert_eq!(summary.errored, 1);
        assert!(!summary.is_clean());
        assert_eq!(
            summary.to_string(),
            "4 check(s): 1 passed, 1 failed, 0 warned, 1 skipped, 1 errored"
        );
    }

    #[test]
    fn record_serializes_status_token() {
        let record = CheckRecord::new("JAVA_HOME exists", &Outcome::Pass);
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"name":"JAVA_HOME exists","status":"PASS"}"#);
    }
}
