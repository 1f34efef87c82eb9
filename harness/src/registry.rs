//! Registry of test cases known to the runner.

use gate::TestCase;
use thiserror::Error;

/// Errors registering cases.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// A case with this name is already registered.
    #[error("duplicate case name: {name}")]
    Duplicate { name: String },

    /// The case has an empty name.
    #[error("case name must not be empty")]
    EmptyName,
}

pub type RegistryResult<T> = Result<T, RegistryError>;

/// Ordered collection of registered cases.
///
/// Registration order is run order, so this keeps a `Vec` rather than a
/// map. Names must be unique and non-empty.
#[derive(Default)]
pub struct CaseRegistry {
    cases: Vec<Box<dyn TestCase>>,
}

impl CaseRegistry {
    pub fn new() -> Self {
        Self { cases: Vec::new() }
    }

    /// Register a case.
    ///
    /// # Errors
    ///
    /// Rejects empty and duplicate names.
    pub fn register(&mut self, case: Box<dyn TestCase>) -> RegistryResult<()> {
        let name = case.name();
        if name.is_empty() {
            return Err(RegistryError::EmptyName);
        }
        if self.cases.iter().any(|c| c.name() == name) {
            return Err(RegistryError::Duplicate {
                name: name.to_string(),
            });
        }
        self.cases.push(case);
        Ok(())
    }

    /// Names of all registered cases, in run order.
    pub fn names(&self) -> Vec<&str> {
        self.cases.iter().map(|c| c.name()).collect()
    }

    /// Number of registered cases.
    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    /// Iterate cases mutably, in run order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Box<dyn TestCase>> {
        self.cases.iter_mut()
    }

    /// Iterate cases, in run order.
    pub fn iter(&self) -> impl Iterator<Item = &Box<dyn TestCase>> {
        self.cases.iter()
    }
}
