//! Per-traversal wizard session.

use crate::core::Configuration;
use serde::{Deserialize, Serialize};

/// Current position plus the configuration built so far.
///
/// `current_step` is a 1-based ordinal into the visible projection, not
/// into the full step graph.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WizardSession {
    current_step: usize,
    configuration: Configuration,
}

impl WizardSession {
    /// Start a traversal at the first step.
    pub fn new(configuration: Configuration) -> Self {
        Self {
            current_step: 1,
            configuration,
        }
    }

    pub fn current_step(&self) -> usize {
        self.current_step
    }

    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    pub(crate) fn set_current_step(&mut self, index: usize) {
        self.current_step = index;
    }

    pub(crate) fn replace_configuration(&mut self, configuration: Configuration) {
        self.configuration = configuration;
    }
}
