//! Validators: the capability that decides whether a category may run.
//!
//! The gate never decides anything itself; it asks an injected
//! [`Validator`]. Production runs use [`ConfigValidator`], which resolves
//! the allow-set from the harness configuration with an environment
//! override. Tests inject [`StaticValidator`] or the degenerate
//! [`AllowAll`]/[`DenyAll`].

use crate::category::Category;
use crate::config::HarnessConfig;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

/// Environment variable overriding the configured allow-set.
///
/// Comma-separated category labels, e.g. `browser,unit`.
pub const ALLOWED_CATEGORIES_ENV: &str = "TESTGATE_ALLOWED_CATEGORIES";

/// Decides whether a test category is permitted to execute.
///
/// Contract: a pure query, deterministic for a given configuration and
/// environment.
pub trait Validator {
    fn is_allowed(&self, category: &Category) -> bool;
}

impl<V: Validator + ?Sized> Validator for &V {
    fn is_allowed(&self, category: &Category) -> bool {
        (**self).is_allowed(category)
    }
}

impl<V: Validator + ?Sized> Validator for Box<V> {
    fn is_allowed(&self, category: &Category) -> bool {
        (**self).is_allowed(category)
    }
}

/// Validator over an explicit allow-set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StaticValidator {
    allowed: HashSet<Category>,
}

impl StaticValidator {
    /// Build a validator allowing exactly `categories`.
    pub fn new(categories: impl IntoIterator<Item = Category>) -> Self {
        Self {
            allowed: categories.into_iter().collect(),
        }
    }

    /// The allow-set.
    pub fn allowed(&self) -> impl Iterator<Item = &Category> {
        self.allowed.iter()
    }
}

impl Validator for StaticValidator {
    fn is_allowed(&self, category: &Category) -> bool {
        self.allowed.contains(category)
    }
}

/// Validator that permits every category.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

impl Validator for AllowAll {
    fn is_allowed(&self, _category: &Category) -> bool {
        true
    }
}

/// Validator that permits no category.
#[derive(Debug, Clone, Copy, Default)]
pub struct DenyAll;

impl Validator for DenyAll {
    fn is_allowed(&self, _category: &Category) -> bool {
        false
    }
}

/// Validator sourced from [`HarnessConfig`], with the
/// [`ALLOWED_CATEGORIES_ENV`] environment override taking precedence.
#[derive(Debug, Clone)]
pub struct ConfigValidator {
    inner: StaticValidator,
}

impl ConfigValidator {
    /// Resolve the allow-set from `config` and the environment.
    pub fn from_config(config: &HarnessConfig) -> Self {
        let allowed = match std::env::var(ALLOWED_CATEGORIES_ENV) {
            Ok(raw) => {
                let parsed = parse_category_list(&raw);
                debug!(env = ALLOWED_CATEGORIES_ENV, ?parsed, "allow-set overridden from environment");
                parsed
            }
            Err(_) => config.run.allowed_categories.clone(),
        };

        Self {
            inner: StaticValidator::new(allowed),
        }
    }
}

impl Validator for ConfigValidator {
    fn is_allowed(&self, category: &Category) -> bool {
        self.inner.is_allowed(category)
    }
}

/// Parse a comma-separated list of category labels, dropping empties.
pub fn parse_category_list(raw: &str) -> Vec<Category> {
    raw.split(',')
        .map(Category::new)
        .filter(|c| !c.is_empty())
        .collect()
}
