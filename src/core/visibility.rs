//! Visibility predicates for conditional steps.
//!
//! A visibility predicate is a pure boolean function over the current
//! configuration. Steps carrying one are only part of the visible projection
//! while the predicate holds.

use super::config::Configuration;
use std::fmt;
use std::sync::Arc;

/// Pure predicate deciding whether a step is currently shown.
///
/// # Example
///
/// ```rust
/// use stepwise::core::{Configuration, Visibility};
///
/// let only_for_men = Visibility::field_equals("gender", "Male");
///
/// let config = Configuration::empty(["gender"]);
/// assert!(!only_for_men.check(&config));
/// assert!(only_for_men.check(&config.with("gender", "Male")));
/// ```
#[derive(Clone)]
pub struct Visibility {
    predicate: Arc<dyn Fn(&Configuration) -> bool + Send + Sync>,
}

impl Visibility {
    /// Create a predicate from a pure function.
    ///
    /// The function must be deterministic and thread-safe (Send + Sync).
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&Configuration) -> bool + Send + Sync + 'static,
    {
        Visibility {
            predicate: Arc::new(predicate),
        }
    }

    /// Visible only while `key` holds exactly `value`.
    pub fn field_equals(key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        let value = value.into();
        Self::new(move |config| config.value(&key) == value)
    }

    /// Visible unless `key` holds exactly `value`. An unanswered field counts as visible.
    pub fn field_not_equals(key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        let value = value.into();
        Self::new(move |config| config.value(&key) != value)
    }

    /// Evaluate the predicate against a configuration.
    pub fn check(&self, config: &Configuration) -> bool {
        (self.predicate)(config)
    }
}

impl fmt::Debug for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Visibility(..)")
    }
}
