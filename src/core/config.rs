//! The configuration value being built by the wizard.
//!
//! A `Configuration` maps field keys to string answers. An empty string
//! means "unanswered". Every mutating method returns a new value and
//! leaves the receiver untouched.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Flat field-to-answer mapping.
///
/// The key set is fixed when the configuration is created from a step graph
/// and never grows afterwards: writes to unknown keys are ignored by the
/// value itself and rejected by the store that owns it.
///
/// # Example
///
/// ```rust
/// use stepwise::core::Configuration;
///
/// let empty = Configuration::empty(["gender", "ethnicity"]);
/// let answered = empty.with("gender", "Female");
///
/// assert_eq!(answered.value("gender"), "Female");
/// assert_eq!(empty.value("gender"), ""); // Original unchanged
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Configuration {
    fields: BTreeMap<String, String>,
}

impl Configuration {
    /// Create a configuration where every key is present and unanswered.
    pub fn empty<I, K>(keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        Self {
            fields: keys
                .into_iter()
                .map(|key| (key.into(), String::new()))
                .collect(),
        }
    }

    /// Answer for `key`, or `None` if the key is not part of this configuration.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Answer for `key`, with unknown keys reading as unanswered.
    pub fn value(&self, key: &str) -> &str {
        self.get(key).unwrap_or("")
    }

    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn is_answered(&self, key: &str) -> bool {
        !self.value(key).is_empty()
    }

    /// Return a new configuration with `key` set to `value`.
    ///
    /// Unknown keys leave the key set unchanged.
    pub fn with(&self, key: &str, value: impl Into<String>) -> Self {
        let mut fields = self.fields.clone();
        if let Some(slot) = fields.get_mut(key) {
            *slot = value.into();
        }
        Self { fields }
    }

    /// Return a new configuration with every key in `keys` unanswered.
    pub fn cleared<'a, I>(&self, keys: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut fields = self.fields.clone();
        for key in keys {
            if let Some(slot) = fields.get_mut(key) {
                slot.clear();
            }
        }
        Self { fields }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of answered fields.
    pub fn answered_count(&self) -> usize {
        self.fields.values().filter(|v| !v.is_empty()).count()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Copy out the flat mapping handed to storage and generation services.
    pub fn to_map(&self) -> BTreeMap<String, String> {
        self.fields.clone()
    }
}
