//! Builder for constructing step graphs.

use crate::builder::error::BuildError;
use crate::builder::step::StepBuilder;
use crate::core::StepDefinition;
use crate::graph::StepGraph;
use std::collections::HashSet;

/// Builder for declaring the canonical step order with a fluent API.
///
/// Steps keep the order in which they are added.
#[derive(Debug, Default)]
pub struct StepGraphBuilder {
    steps: Vec<StepDefinition>,
}

impl StepGraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a step using a builder.
    /// Returns an error if the builder fails validation.
    pub fn step(mut self, builder: StepBuilder) -> Result<Self, BuildError> {
        let step = builder.build()?;
        self.steps.push(step);
        Ok(self)
    }

    /// Build the step graph.
    /// Returns an error if the graph is empty or ids/field keys collide.
    pub fn build(self) -> Result<StepGraph, BuildError> {
        if self.steps.is_empty() {
            return Err(BuildError::NoSteps);
        }

        check_unique(&self.steps)?;

        Ok(StepGraph::new(self.steps))
    }
}

/// Step ids and field keys must each be unique across the graph.
fn check_unique(steps: &[StepDefinition]) -> Result<(), BuildError> {
    let mut ids = HashSet::new();
    let mut fields = HashSet::new();
    for step in steps {
        if !ids.insert(step.id()) {
            return Err(BuildError::DuplicateStep {
                id: step.id().to_string(),
            });
        }
        for field in step.field_keys() {
            if !fields.insert(field) {
                return Err(BuildError::DuplicateField {
                    field: field.to_string(),
                });
            }
        }
    }
    Ok(())
}
