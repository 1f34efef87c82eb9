//! Test case trait and execution lifecycle.
//!
//! A [`TestCase`] is a named unit of test logic with a three-phase
//! lifecycle: `set_up`, `execute`, `tear_down`. The body's failures are
//! *outcomes* and land in the report; setup and teardown failures are
//! framework-level faults and propagate to the caller unchanged.

use crate::category::Category;
use crate::report::{Outcome, RunReport};
use std::time::Instant;
use thiserror::Error;
use tracing::debug;

/// Framework-level lifecycle faults.
///
/// These abort the run instead of being tallied as test outcomes.
#[derive(Error, Debug)]
pub enum LifecycleError {
    /// The case is not runnable as constructed.
    #[error("malformed test case '{name}': {reason}")]
    Malformed { name: String, reason: String },

    /// Setup failed before the body ran.
    #[error("setup failed for '{name}': {reason}")]
    Setup { name: String, reason: String },

    /// Teardown failed after the body ran.
    #[error("teardown failed for '{name}': {reason}")]
    Teardown { name: String, reason: String },
}

pub type LifecycleResult<T> = Result<T, LifecycleError>;

/// Outcome of a test body.
///
/// Returned from [`TestCase::execute`] via `Err`; recorded into the
/// report, never propagated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CaseFailure {
    /// An expectation did not hold. Tallied as failed.
    #[error("assertion failed: {0}")]
    Assertion(String),

    /// The body hit something it could not handle. Tallied as errored.
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

/// Fail the body with an assertion failure unless `condition` holds.
pub fn ensure(condition: bool, message: impl Into<String>) -> Result<(), CaseFailure> {
    if condition {
        Ok(())
    } else {
        Err(CaseFailure::Assertion(message.into()))
    }
}

/// A named unit of test logic.
pub trait TestCase {
    /// Unique name of the case within a run.
    fn name(&self) -> &str;

    /// Category label the case belongs to.
    fn category(&self) -> Category;

    /// Whether the case is marked ignored. Ignored cases are recorded as
    /// skipped without running the body.
    fn ignored(&self) -> bool {
        false
    }

    /// Prepare fixtures. Errors propagate and abort the run.
    fn set_up(&mut self) -> LifecycleResult<()> {
        Ok(())
    }

    /// The test body.
    fn execute(&mut self) -> Result<(), CaseFailure>;

    /// Release fixtures. Runs even when the body failed; errors propagate.
    fn tear_down(&mut self) -> LifecycleResult<()> {
        Ok(())
    }
}

/// Run the full lifecycle of one case against `report`.
///
/// Setup, body, teardown, then outcome recording with the measured
/// duration. Teardown always runs once setup has succeeded; a teardown
/// error propagates after the body's outcome has been decided but before
/// it is recorded, aborting the run.
///
/// # Errors
///
/// Returns [`LifecycleError`] from setup or teardown unchanged.
pub fn run_lifecycle(case: &mut dyn TestCase, mut report: RunReport) -> LifecycleResult<RunReport> {
    let name = case.name().to_string();
    let category = case.category();

    if case.ignored() {
        debug!(case = %name, "case marked ignored, recording skip");
        report.record(&name, category, Outcome::Skipped, None, None);
        return Ok(report);
    }

    let started = Instant::now();
    case.set_up()?;

    let body = case.execute();
    let teardown = case.tear_down();
    let duration = started.elapsed();
    teardown?;

    let (outcome, message) = match body {
        Ok(()) => (Outcome::Passed, None),
        Err(CaseFailure::Assertion(message)) => (Outcome::Failed, Some(message)),
        Err(CaseFailure::Unexpected(message)) => (Outcome::Errored, Some(message)),
    };

    debug!(case = %name, outcome = %outcome, ?duration, "case finished");
    report.record(&name, category, outcome, message, Some(duration));
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ScriptedCase {
        name: String,
        body: Result<(), CaseFailure>,
        setup_error: Option<String>,
        teardown_error: Option<String>,
        setup_calls: u32,
        body_calls: u32,
        teardown_calls: u32,
    }

    impl ScriptedCase {
        fn passing(name: &str) -> Self {
            Self {
                name: name.to_string(),
                body: Ok(()),
                setup_error: None,
                teardown_error: None,
                setup_calls: 0,
                body_calls: 0,
                teardown_calls: 0,
            }
        }

        fn with_body(mut self, body: Result<(), CaseFailure>) -> Self {
            self.body = body;
            self
        }
    }

    impl TestCase for ScriptedCase {
        fn name(&self) -> &str {
            &self.name
        }

        fn category(&self) -> Category {
            Category::unit()
        }

        fn set_up(&mut self) -> LifecycleResult<()> {
            self.setup_calls += 1;
            match &self.setup_error {
                Some(reason) => Err(LifecycleError::Setup {
                    name: self.name.clone(),
                    reason: reason.clone(),
                }),
                None => Ok(()),
            }
        }

        fn execute(&mut self) -> Result<(), CaseFailure> {
            self.body_calls += 1;
            self.body.clone()
        }

        fn tear_down(&mut self) -> LifecycleResult<()> {
            self.teardown_calls += 1;
            match &self.teardown_error {
                Some(reason) => Err(LifecycleError::Teardown {
                    name: self.name.clone(),
                    reason: reason.clone(),
                }),
                None => Ok(()),
            }
        }
    }

    #[test]
    fn test_passing_body_recorded_as_passed() {
        let mut case = ScriptedCase::passing("adds");
        let report = run_lifecycle(&mut case, RunReport::new()).unwrap();
        assert_eq!(report.passed(), 1);
        assert_eq!(report.total(), 1);
        assert_eq!(case.setup_calls, 1);
        assert_eq!(case.teardown_calls, 1);
    }

    #[test]
    fn test_assertion_recorded_as_failed() {
        let mut case = ScriptedCase::passing("compares")
            .with_body(Err(CaseFailure::Assertion("1 != 2".to_string())));
        let report = run_lifecycle(&mut case, RunReport::new()).unwrap();
        assert_eq!(report.failed(), 1);
        assert_eq!(report.passed(), 0);
        let record = &report.records()[0];
        assert_eq!(record.message.as_deref(), Some("1 != 2"));
    }

    #[test]
    fn test_unexpected_recorded_as_errored() {
        let mut case = ScriptedCase::passing("reads")
            .with_body(Err(CaseFailure::Unexpected("fixture missing".to_string())));
        let report = run_lifecycle(&mut case, RunReport::new()).unwrap();
        assert_eq!(report.errored(), 1);
    }

    #[test]
    fn test_setup_error_propagates_without_running_body() {
        let mut case = ScriptedCase::passing("boots");
        case.setup_error = Some("no display".to_string());
        let result = run_lifecycle(&mut case, RunReport::new());
        assert!(matches!(result, Err(LifecycleError::Setup { .. })));
        assert_eq!(case.body_calls, 0);
        assert_eq!(case.teardown_calls, 0);
    }

    #[test]
    fn test_teardown_runs_after_failed_body() {
        let mut case = ScriptedCase::passing("cleans")
            .with_body(Err(CaseFailure::Assertion("nope".to_string())));
        let _ = run_lifecycle(&mut case, RunReport::new()).unwrap();
        assert_eq!(case.teardown_calls, 1);
    }

    #[test]
    fn test_teardown_error_propagates() {
        let mut case = ScriptedCase::passing("leaks");
        case.teardown_error = Some("port still bound".to_string());
        let result = run_lifecycle(&mut case, RunReport::new());
        assert!(matches!(result, Err(LifecycleError::Teardown { .. })));
        assert_eq!(case.body_calls, 1);
    }

    #[test]
    fn test_ignored_case_recorded_as_skipped() {
        struct Ignored;
        impl TestCase for Ignored {
            fn name(&self) -> &str {
                "ignored"
            }
            fn category(&self) -> Category {
                Category::unit()
            }
            fn ignored(&self) -> bool {
                true
            }
            fn execute(&mut self) -> Result<(), CaseFailure> {
                panic!("body must not run for ignored cases");
            }
        }

        let report = run_lifecycle(&mut Ignored, RunReport::new()).unwrap();
        assert_eq!(report.skipped(), 1);
        assert_eq!(report.total(), 1);
    }

    #[test]
    fn test_ensure_helper() {
        assert!(ensure(true, "fine").is_ok());
        let err = ensure(false, "broken").unwrap_err();
        assert_eq!(err, CaseFailure::Assertion("broken".to_string()));
    }
}
