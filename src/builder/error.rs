//! Build errors for step graphs and step declarations.

use thiserror::Error;

/// Errors that can occur when declaring steps and building a step graph.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("No steps defined. Add at least one step")]
    NoSteps,

    #[error("Step id not specified. Call .id(name)")]
    MissingId,

    #[error("Step '{id}' has no path. Call .path(route)")]
    MissingPath { id: String },

    #[error("Step '{id}' is declared more than once")]
    DuplicateStep { id: String },

    #[error("Field '{field}' is owned by more than one step")]
    DuplicateField { field: String },

    #[error("Aggregate step '{id}' cannot be a pivot")]
    AggregatePivot { id: String },

    #[error("Aggregate step '{id}' declares no sub-fields")]
    EmptyAggregate { id: String },
}
