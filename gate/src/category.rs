//! Test category labels.
//!
//! A category classifies a test case for gating purposes: a run only
//! executes cases whose category the active validator allows. Labels are
//! open-ended lowercase strings rather than a closed enum, because the set
//! of categories is defined by configuration, not by this crate. The
//! well-known constructors cover the labels the bundled harness uses.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A test classification label, normalized to lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category(String);

impl Category {
    /// Create a category from an arbitrary label.
    ///
    /// Labels are trimmed and lowercased so that `"Browser"` and
    /// `"browser"` gate identically.
    pub fn new(label: impl AsRef<str>) -> Self {
        Self(label.as_ref().trim().to_ascii_lowercase())
    }

    /// Browser-driven end-to-end tests.
    pub fn browser() -> Self {
        Self::new("browser")
    }

    /// HTTP API tests.
    pub fn api() -> Self {
        Self::new("api")
    }

    /// Plain unit tests.
    pub fn unit() -> Self {
        Self::new("unit")
    }

    /// Cross-component integration tests.
    pub fn integration() -> Self {
        Self::new("integration")
    }

    /// The label as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the label is empty after normalization.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for Category {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}
