//! Unanswered requirements.

use thiserror::Error;

/// A required, currently visible step that still lacks an answer
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MissingAnswer {
    #[error("Required step '{step}' is unanswered")]
    Unanswered { step: String },

    #[error("Required step '{step}' is missing '{sub_field}'")]
    IncompleteAggregate { step: String, sub_field: String },
}

impl MissingAnswer {
    /// Step the user has to revisit.
    pub fn step(&self) -> &str {
        match self {
            Self::Unanswered { step } | Self::IncompleteAggregate { step, .. } => step,
        }
    }
}
