//! Builder for declaring a single step.

use crate::builder::error::BuildError;
use crate::core::{Configuration, StepDefinition, StepKind, Visibility};

/// Builder for declaring steps with a fluent API.
#[derive(Debug, Default)]
pub struct StepBuilder {
    id: Option<String>,
    path: Option<String>,
    label: Option<String>,
    required: bool,
    pivot: bool,
    sub_fields: Option<Vec<String>>,
    visibility: Option<Visibility>,
}

impl StepBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the step id (required). Scalar steps store their answer under this key.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the route for this step (required).
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Set a display label. Defaults to the id.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Mark the step as mandatory.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Mark the step's field as a pivot: changing an existing answer clears
    /// every scalar field declared after it.
    pub fn pivot(mut self) -> Self {
        self.pivot = true;
        self
    }

    /// Turn the step into an aggregate collecting `sub_fields`.
    pub fn aggregate<I, K>(mut self, sub_fields: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        self.sub_fields = Some(sub_fields.into_iter().map(Into::into).collect());
        self
    }

    /// Add a visibility predicate.
    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = Some(visibility);
        self
    }

    /// Add a visibility predicate using a closure.
    pub fn visible_when<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&Configuration) -> bool + Send + Sync + 'static,
    {
        self.visibility = Some(Visibility::new(predicate));
        self
    }

    /// Build the step definition.
    pub fn build(self) -> Result<StepDefinition, BuildError> {
        let id = self.id.ok_or(BuildError::MissingId)?;
        let path = self
            .path
            .ok_or_else(|| BuildError::MissingPath { id: id.clone() })?;

        let kind = match self.sub_fields {
            None => StepKind::Field,
            Some(sub_fields) if sub_fields.is_empty() => {
                return Err(BuildError::EmptyAggregate { id });
            }
            Some(_) if self.pivot => return Err(BuildError::AggregatePivot { id }),
            Some(sub_fields) => StepKind::Aggregate { sub_fields },
        };

        Ok(StepDefinition {
            label: self.label.unwrap_or_else(|| id.clone()),
            id,
            path,
            required: self.required,
            pivot: self.pivot,
            kind,
            visibility: self.visibility,
        })
    }
}
