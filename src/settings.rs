//! Wizard settings.

use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

/// Default pause between a selection and the navigation it triggers.
pub const DEFAULT_TRANSITION_DELAY_MS: u64 = 350;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Invalid wizard settings: {0}")]
    Invalid(String),
}

/// Tunables for a wizard instance.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WizardSettings {
    /// Presentational delay before navigation, letting the selection animation play
    pub transition_delay_ms: u64,

    /// Entry step override. Defaults to the graph's first step.
    pub first_step: Option<String>,
}

impl Default for WizardSettings {
    fn default() -> Self {
        Self {
            transition_delay_ms: DEFAULT_TRANSITION_DELAY_MS,
            first_step: None,
        }
    }
}

impl WizardSettings {
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        serde_json::from_str(json).map_err(|e| SettingsError::Invalid(e.to_string()))
    }

    pub fn transition_delay(&self) -> Duration {
        Duration::from_millis(self.transition_delay_ms)
    }
}
