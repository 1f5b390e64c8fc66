//! Step declarations.
//!
//! A `StepDefinition` is one entry of the canonical step order. Most steps
//! answer a single scalar field whose key is the step id. Aggregate steps
//! collect several sub-fields at once and never take part in cascades.

use super::config::Configuration;
use super::visibility::Visibility;

/// What a step writes into the configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepKind {
    /// Single answer stored under the step id.
    Field,

    /// Several answers collected on one screen.
    Aggregate { sub_fields: Vec<String> },
}

/// One step of the wizard.
///
/// Built through [`StepBuilder`](crate::builder::StepBuilder); fields are
/// read-only once the graph exists.
#[derive(Clone, Debug)]
pub struct StepDefinition {
    pub(crate) id: String,
    pub(crate) path: String,
    pub(crate) label: String,
    pub(crate) required: bool,
    pub(crate) pivot: bool,
    pub(crate) kind: StepKind,
    pub(crate) visibility: Option<Visibility>,
}

impl StepDefinition {
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Route the presentation layer resolves this step to.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Whether changing this step's answer invalidates everything after it.
    pub fn is_pivot(&self) -> bool {
        self.pivot
    }

    pub fn kind(&self) -> &StepKind {
        &self.kind
    }

    pub fn is_aggregate(&self) -> bool {
        matches!(self.kind, StepKind::Aggregate { .. })
    }

    /// Scalar field key, `None` for aggregate steps.
    pub fn field_key(&self) -> Option<&str> {
        match self.kind {
            StepKind::Field => Some(&self.id),
            StepKind::Aggregate { .. } => None,
        }
    }

    /// Every configuration key this step owns.
    pub fn field_keys(&self) -> Vec<&str> {
        match &self.kind {
            StepKind::Field => vec![self.id.as_str()],
            StepKind::Aggregate { sub_fields } => sub_fields.iter().map(String::as_str).collect(),
        }
    }

    /// Steps without a predicate are always visible.
    pub fn is_visible(&self, config: &Configuration) -> bool {
        self.visibility.as_ref().is_none_or(|v| v.check(config))
    }
}
