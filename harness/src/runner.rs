//! Drives a registry of cases through the gate into one run report.

use crate::registry::CaseRegistry;
use gate::{
    run_gated, ConfigValidator, HarnessConfig, LifecycleError, Outcome, RunReport, Validator,
};
use regex::Regex;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors from a runner invocation.
#[derive(Error, Debug)]
pub enum RunnerError {
    /// A case's lifecycle raised a framework-level fault.
    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),

    /// The report file could not be written.
    #[error("failed to write report to '{path}': {source}")]
    ReportWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The report could not be serialized.
    #[error("failed to serialize report: {0}")]
    ReportSerialize(#[from] serde_json::Error),
}

pub type RunnerResult<T> = Result<T, RunnerError>;

/// Executes registered cases against a validator built from configuration.
pub struct Runner {
    config: HarnessConfig,
    validator: Box<dyn Validator>,
    filter: Option<Regex>,
}

impl Runner {
    /// Build a runner whose validator resolves from `config` (including
    /// the environment override).
    pub fn new(config: HarnessConfig) -> Self {
        let validator = Box::new(ConfigValidator::from_config(&config));
        Self {
            config,
            validator,
            filter: None,
        }
    }

    /// Replace the validator. Used by tests and embedders.
    pub fn with_validator(mut self, validator: Box<dyn Validator>) -> Self {
        self.validator = validator;
        self
    }

    /// Only run cases whose name matches `filter`.
    pub fn with_filter(mut self, filter: Regex) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Run every registered case through the gate, in registration order.
    ///
    /// Cases not matching the name filter are not attempted at all.
    /// Disallowed categories are silently omitted from the report. With
    /// `fail_fast` the run stops after the first failed or errored case.
    /// When the configuration names a report path, the JSON report is
    /// written there before returning.
    ///
    /// # Errors
    ///
    /// Propagates lifecycle faults unchanged and reports file-output
    /// problems.
    pub fn run(&self, registry: &mut CaseRegistry) -> RunnerResult<RunReport> {
        let mut report = RunReport::new();
        info!(run_id = %report.run_id, cases = registry.len(), "starting run");

        for case in registry.iter_mut() {
            if let Some(filter) = &self.filter {
                if !filter.is_match(case.name()) {
                    debug!(case = case.name(), "name filter excluded case");
                    continue;
                }
            }

            let category = case.category();
            let before = report.total();
            report = run_gated(case.as_mut(), &self.validator, &category, Some(report))?;

            let Some(record) = report.records().get(before..).and_then(|r| r.first()) else {
                // Gate omitted the case; nothing was recorded.
                continue;
            };

            match record.outcome {
                Outcome::Passed | Outcome::Skipped => {
                    info!(case = %record.name, outcome = %record.outcome, "case finished");
                }
                Outcome::Failed | Outcome::Errored => {
                    warn!(
                        case = %record.name,
                        outcome = %record.outcome,
                        message = record.message.as_deref().unwrap_or(""),
                        "case finished"
                    );
                    if self.config.run.fail_fast {
                        info!("fail-fast stopping run");
                        break;
                    }
                }
            }
        }

        info!(run_id = %report.run_id, %report, "run finished");

        if let Some(path) = &self.config.report.path {
            write_report(&report, path)?;
        }

        Ok(report)
    }
}

/// Serialize `report` as pretty JSON at `path`.
pub fn write_report(report: &RunReport, path: &Path) -> RunnerResult<()> {
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(path, json).map_err(|source| RunnerError::ReportWrite {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), "report written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gate::{ensure, AllowAll, CaseFailure, Category, TestCase};

    struct StubCase {
        name: &'static str,
        category: Category,
        body: Result<(), CaseFailure>,
    }

    impl StubCase {
        fn passing(name: &'static str, category: Category) -> Self {
            Self {
                name,
                category,
                body: Ok(()),
            }
        }

        fn failing(name: &'static str, category: Category) -> Self {
            Self {
                name,
                category,
                body: ensure(false, "always fails"),
            }
        }
    }

    impl TestCase for StubCase {
        fn name(&self) -> &str {
            self.name
        }
        fn category(&self) -> Category {
            self.category.clone()
        }
        fn execute(&mut self) -> Result<(), CaseFailure> {
            self.body.clone()
        }
    }

    fn mixed_registry() -> CaseRegistry {
        let mut registry = CaseRegistry::new();
        registry
            .register(Box::new(StubCase::passing("unit-pass", Category::unit())))
            .unwrap();
        registry
            .register(Box::new(StubCase::failing("unit-fail", Category::unit())))
            .unwrap();
        registry
            .register(Box::new(StubCase::passing(
                "browser-pass",
                Category::browser(),
            )))
            .unwrap();
        registry
    }

    #[test]
    fn test_disallowed_categories_omitted_from_report() {
        let runner = Runner::new(
            HarnessConfig::new().with_allowed_categories(vec![Category::unit()]),
        )
        .with_validator(Box::new(gate::StaticValidator::new([Category::unit()])));

        let mut registry = mixed_registry();
        let report = runner.run(&mut registry).unwrap();

        // The browser case left no trace, not even a skip.
        assert_eq!(report.total(), 2);
        assert_eq!(report.passed(), 1);
        assert_eq!(report.failed(), 1);
        assert_eq!(report.skipped(), 0);
        assert!(report.records().iter().all(|r| r.name != "browser-pass"));
    }

    #[test]
    fn test_allow_all_runs_everything() {
        let runner =
            Runner::new(HarnessConfig::new()).with_validator(Box::new(AllowAll));
        let mut registry = mixed_registry();
        let report = runner.run(&mut registry).unwrap();
        assert_eq!(report.total(), 3);
        assert_eq!(report.passed(), 2);
    }

    #[test]
    fn test_fail_fast_stops_after_first_failure() {
        let runner = Runner::new(HarnessConfig::new().with_fail_fast(true))
            .with_validator(Box::new(AllowAll));
        let mut registry = mixed_registry();
        let report = runner.run(&mut registry).unwrap();

        // unit-pass then unit-fail; browser-pass never runs.
        assert_eq!(report.total(), 2);
        assert_eq!(report.failed(), 1);
        assert!(report.records().iter().all(|r| r.name != "browser-pass"));
    }

    #[test]
    fn test_name_filter() {
        let runner = Runner::new(HarnessConfig::new())
            .with_validator(Box::new(AllowAll))
            .with_filter(Regex::new("^unit-").unwrap());
        let mut registry = mixed_registry();
        let report = runner.run(&mut registry).unwrap();
        assert_eq!(report.total(), 2);
        assert!(report.records().iter().all(|r| r.name.starts_with("unit-")));
    }

    #[test]
    fn test_report_written_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");

        let runner = Runner::new(
            HarnessConfig::new().with_report_path(&path),
        )
        .with_validator(Box::new(AllowAll));
        let mut registry = mixed_registry();
        let report = runner.run(&mut registry).unwrap();

        let written: RunReport =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written.run_id, report.run_id);
        assert_eq!(written.total(), report.total());
    }

    #[test]
    fn test_report_write_failure_reported() {
        let report = RunReport::new();
        let result = write_report(&report, Path::new("/nonexistent/dir/report.json"));
        assert!(matches!(result, Err(RunnerError::ReportWrite { .. })));
    }
}
