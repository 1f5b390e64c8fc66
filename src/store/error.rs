//! Store error types.

use thiserror::Error;

/// Errors returned when an operation names something the graph does not declare or show.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Field '{field}' is not declared by the step graph")]
    UnknownField { field: String },

    #[error("Step '{step}' is not declared by the step graph")]
    UnknownStep { step: String },

    #[error("Step '{step}' does not collect sub-fields")]
    NotAggregate { step: String },

    #[error("Step '{step}' is not part of the visible steps")]
    NotVisible { step: String },
}
