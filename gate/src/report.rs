//! Run reports: the result accumulator for test execution.

use crate::category::Category;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use uuid::Uuid;

/// Terminal outcome of one executed case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// The body ran and returned success.
    Passed,
    /// The body ran and an assertion did not hold.
    Failed,
    /// The body ran and hit an unexpected error.
    Errored,
    /// The case was marked ignored and the body did not run.
    Skipped,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Passed => write!(f, "ok"),
            Outcome::Failed => write!(f, "FAILED"),
            Outcome::Errored => write!(f, "ERRORED"),
            Outcome::Skipped => write!(f, "ignored"),
        }
    }
}

/// Record of one executed case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseRecord {
    /// Case name.
    pub name: String,
    /// Category the case ran under.
    pub category: Category,
    /// Terminal outcome.
    pub outcome: Outcome,
    /// Failure or error message, when there is one.
    pub message: Option<String>,
    /// Wall-clock duration of setup + body + teardown. Absent for skips.
    pub duration: Option<Duration>,
}

/// Accumulator of case outcomes for one run.
///
/// Created by the run driver when the caller does not supply one. The gate
/// never replaces a report it was handed; it either populates it through
/// the lifecycle or returns it untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// Unique id of this run.
    pub run_id: Uuid,
    /// When the report was created.
    pub started_at: DateTime<Utc>,
    records: Vec<CaseRecord>,
}

impl RunReport {
    /// Create an empty report.
    pub fn new() -> Self {
        Self {
            run_id: Uuid::new_v4(),
            started_at: Utc::now(),
            records: Vec::new(),
        }
    }

    /// Append one case record.
    pub fn record(
        &mut self,
        name: &str,
        category: Category,
        outcome: Outcome,
        message: Option<String>,
        duration: Option<Duration>,
    ) {
        self.records.push(CaseRecord {
            name: name.to_string(),
            category,
            outcome,
            message,
            duration,
        });
    }

    /// All records, in execution order.
    pub fn records(&self) -> &[CaseRecord] {
        &self.records
    }

    /// Count of cases recorded, whatever their outcome.
    pub fn total(&self) -> usize {
        self.records.len()
    }

    fn count(&self, outcome: Outcome) -> usize {
        self.records.iter().filter(|r| r.outcome == outcome).count()
    }

    /// Count of passed cases.
    pub fn passed(&self) -> usize {
        self.count(Outcome::Passed)
    }

    /// Count of failed cases.
    pub fn failed(&self) -> usize {
        self.count(Outcome::Failed)
    }

    /// Count of errored cases.
    pub fn errored(&self) -> usize {
        self.count(Outcome::Errored)
    }

    /// Count of skipped cases.
    pub fn skipped(&self) -> usize {
        self.count(Outcome::Skipped)
    }

    /// Whether the run holds no failed or errored cases.
    pub fn is_success(&self) -> bool {
        self.failed() == 0 && self.errored() == 0
    }
}

impl Default for RunReport {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} total, {} passed, {} failed, {} errored, {} ignored",
            self.total(),
            self.passed(),
            self.failed(),
            self.errored(),
            self.skipped()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_report_is_success() {
        let report = RunReport::new();
        assert_eq!(report.total(), 0);
        assert!(report.is_success());
    }

    #[test]
    fn test_tallies() {
        let mut report = RunReport::new();
        report.record("a", Category::unit(), Outcome::Passed, None, None);
        report.record(
            "b",
            Category::unit(),
            Outcome::Failed,
            Some("1 != 2".to_string()),
            None,
        );
        report.record("c", Category::api(), Outcome::Errored, None, None);
        report.record("d", Category::browser(), Outcome::Skipped, None, None);

        assert_eq!(report.total(), 4);
        assert_eq!(report.passed(), 1);
        assert_eq!(report.failed(), 1);
        assert_eq!(report.errored(), 1);
        assert_eq!(report.skipped(), 1);
        assert!(!report.is_success());
    }

    #[test]
    fn test_display_summary() {
        let mut report = RunReport::new();
        report.record("a", Category::unit(), Outcome::Passed, None, None);
        let summary = report.to_string();
        assert!(summary.contains("1 total"));
        assert!(summary.contains("1 passed"));
    }

    #[test]
    fn test_serialization_round_trip() {
        let mut report = RunReport::new();
        report.record(
            "a",
            Category::unit(),
            Outcome::Passed,
            None,
            Some(Duration::from_millis(12)),
        );
        let json = serde_json::to_string(&report).unwrap();
        let back: RunReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back.run_id, report.run_id);
        assert_eq!(back.total(), 1);
        assert_eq!(back.records()[0].outcome, Outcome::Passed);
    }
}
