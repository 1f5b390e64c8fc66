//! Builder API for declaring step graphs.
//!
//! This module provides fluent builders for declaring the canonical step
//! order with minimal boilerplate, validating ids and field ownership when
//! the graph is built.

pub mod error;
pub mod graph;
pub mod step;

pub use error::BuildError;
pub use graph::StepGraphBuilder;
pub use step::StepBuilder;
