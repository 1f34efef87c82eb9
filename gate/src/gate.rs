//! The conditional test gate.
//!
//! A gate wraps one test case and decides, once per run attempt, whether
//! the case's lifecycle executes at all. The decision is delegated to an
//! injected [`Validator`] queried with a category label fixed at gate
//! construction. A disallowed case leaves the report exactly as it was
//! handed in: nothing is recorded, not even a skip, and none of
//! setup/body/teardown runs.

use crate::case::{run_lifecycle, LifecycleResult, TestCase};
use crate::category::Category;
use crate::report::RunReport;
use crate::validator::Validator;
use tracing::debug;

/// Decision state of a gate after its most recent run attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    /// No run attempted yet.
    Pending,
    /// The last attempt delegated to the lifecycle.
    Executed,
    /// The last attempt was disallowed and nothing ran.
    Skipped,
}

/// Run one case through the gate.
///
/// The decorator-function form of [`GatedCase::run`]: callers that do not
/// want to own a wrapper (the runner, mostly) use this directly. If
/// `report` is absent a fresh default accumulator is created. The validator
/// is queried with `category`; on disallow the accumulator is returned
/// untouched.
///
/// # Errors
///
/// Propagates [`crate::case::LifecycleError`] from the delegated lifecycle
/// unchanged. The gate raises no errors of its own.
pub fn run_gated(
    case: &mut dyn TestCase,
    validator: &dyn Validator,
    category: &Category,
    report: Option<RunReport>,
) -> LifecycleResult<RunReport> {
    let report = report.unwrap_or_default();

    if !validator.is_allowed(category) {
        debug!(case = case.name(), %category, "category disallowed, omitting case");
        return Ok(report);
    }

    run_lifecycle(case, report)
}

/// A test case wrapped with a category gate.
///
/// The category label is fixed when the gate is built, not re-read per
/// call; [`GatedCase::new`] takes it from the case itself and
/// [`GatedCase::browser`] hardcodes the browser label for suites that gate
/// every case on browser availability.
pub struct GatedCase<C, V> {
    case: C,
    validator: V,
    category: Category,
    state: GateState,
}

impl<C: TestCase, V: Validator> GatedCase<C, V> {
    /// Gate `case` on its own category.
    pub fn new(case: C, validator: V) -> Self {
        let category = case.category();
        Self {
            case,
            validator,
            category,
            state: GateState::Pending,
        }
    }

    /// Gate `case` on the browser category, whatever the case declares.
    pub fn browser(case: C, validator: V) -> Self {
        Self::new(case, validator).with_category(Category::browser())
    }

    /// Fix a different category label.
    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    /// The label this gate queries the validator with.
    pub fn category(&self) -> &Category {
        &self.category
    }

    /// Decision of the most recent run attempt.
    pub fn state(&self) -> GateState {
        self.state
    }

    /// Run the case if the validator allows its category.
    ///
    /// Always returns a valid report: the one passed in, or a fresh one if
    /// `report` was `None`. On the disallowed path the report comes back
    /// with zero changes and no lifecycle phase has run.
    ///
    /// # Errors
    ///
    /// Propagates lifecycle errors unchanged.
    pub fn run(&mut self, report: Option<RunReport>) -> LifecycleResult<RunReport> {
        let allowed = self.validator.is_allowed(&self.category);
        self.state = if allowed {
            GateState::Executed
        } else {
            GateState::Skipped
        };

        if allowed {
            run_lifecycle(&mut self.case, report.unwrap_or_default())
        } else {
            debug!(
                case = self.case.name(),
                category = %self.category,
                "category disallowed, omitting case"
            );
            Ok(report.unwrap_or_default())
        }
    }

    /// Give the wrapped case back.
    pub fn into_inner(self) -> C {
        self.case
    }
}
