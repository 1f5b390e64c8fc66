//! The canonical step order and its visible projection.
//!
//! A `StepGraph` is fixed once built. Every query here is a pure function
//! of the graph and the configuration passed in, so callers always get
//! answers for the configuration they hold right now.

pub mod catalog;

use crate::core::{Configuration, StepDefinition};

/// Ordered, immutable declaration of every possible step.
///
/// # Example
///
/// ```rust
/// use stepwise::builder::{StepBuilder, StepGraphBuilder};
/// use stepwise::core::Visibility;
///
/// let graph = StepGraphBuilder::new()
///     .step(StepBuilder::new().id("gender").path("/gender").required().pivot())?
///     .step(
///         StepBuilder::new()
///             .id("beard")
///             .path("/beard")
///             .visibility(Visibility::field_equals("gender", "Male")),
///     )?
///     .step(StepBuilder::new().id("pose").path("/pose"))?
///     .build()?;
///
/// let config = graph.empty_configuration();
/// let visible: Vec<_> = graph.visible_steps(&config).iter().map(|s| s.id()).collect();
/// assert_eq!(visible, vec!["gender", "pose"]);
///
/// let config = config.with("gender", "Male");
/// assert_eq!(graph.next_step_after("gender", &config).map(|s| s.id()), Some("beard"));
/// # Ok::<(), stepwise::builder::BuildError>(())
/// ```
#[derive(Clone, Debug)]
pub struct StepGraph {
    steps: Vec<StepDefinition>,
}

impl StepGraph {
    pub(crate) fn new(steps: Vec<StepDefinition>) -> Self {
        Self { steps }
    }

    /// Every step in declaration order, visible or not.
    pub fn steps(&self) -> &[StepDefinition] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The designated entry step.
    pub fn first_step(&self) -> Option<&StepDefinition> {
        self.steps.first()
    }

    pub fn find(&self, step_id: &str) -> Option<&StepDefinition> {
        self.steps.iter().find(|s| s.id() == step_id)
    }

    /// Steps whose predicate holds for `config`, in declaration order.
    pub fn visible_steps(&self, config: &Configuration) -> Vec<&StepDefinition> {
        self.steps.iter().filter(|s| s.is_visible(config)).collect()
    }

    pub fn visible_step_count(&self, config: &Configuration) -> usize {
        self.steps.iter().filter(|s| s.is_visible(config)).count()
    }

    /// Static required flag. Unknown ids are not required.
    pub fn is_required(&self, step_id: &str) -> bool {
        self.find(step_id).is_some_and(StepDefinition::is_required)
    }

    /// The visible step following `step_id`.
    ///
    /// Visibility is recomputed from `config` on every call. Returns `None`
    /// when `step_id` is the last visible step, hidden, or unknown.
    pub fn next_step_after(
        &self,
        step_id: &str,
        config: &Configuration,
    ) -> Option<&StepDefinition> {
        let visible = self.visible_steps(config);
        let index = visible.iter().position(|s| s.id() == step_id)?;
        visible.get(index + 1).copied()
    }

    /// The visible step preceding `step_id`, for back navigation.
    pub fn previous_step_before(
        &self,
        step_id: &str,
        config: &Configuration,
    ) -> Option<&StepDefinition> {
        let visible = self.visible_steps(config);
        let index = visible.iter().position(|s| s.id() == step_id)?;
        index.checked_sub(1).and_then(|i| visible.get(i).copied())
    }

    /// 1-based ordinal of `step_id` within the visible projection.
    pub fn position(&self, step_id: &str, config: &Configuration) -> Option<usize> {
        self.visible_steps(config)
            .iter()
            .position(|s| s.id() == step_id)
            .map(|i| i + 1)
    }

    /// Visible step at a 1-based ordinal.
    pub fn step_at(&self, index: usize, config: &Configuration) -> Option<&StepDefinition> {
        index
            .checked_sub(1)
            .and_then(|i| self.visible_steps(config).get(i).copied())
    }

    /// Scalar field keys declared strictly after `field_key`.
    ///
    /// Aggregate sub-fields are never included. Unknown keys have an empty scope.
    pub fn cascade_scope(&self, field_key: &str) -> Vec<&str> {
        let Some(index) = self
            .steps
            .iter()
            .position(|s| s.field_key() == Some(field_key))
        else {
            return Vec::new();
        };

        self.steps[index + 1..]
            .iter()
            .filter_map(StepDefinition::field_key)
            .collect()
    }

    /// Whether `field_key` belongs to a pivot step.
    pub fn is_pivot(&self, field_key: &str) -> bool {
        self.steps
            .iter()
            .any(|s| s.is_pivot() && s.field_key() == Some(field_key))
    }

    /// Every configuration key the graph declares, scalar and aggregate.
    pub fn field_keys(&self) -> Vec<&str> {
        self.steps.iter().flat_map(StepDefinition::field_keys).collect()
    }

    pub fn is_scalar_field(&self, field_key: &str) -> bool {
        self.steps.iter().any(|s| s.field_key() == Some(field_key))
    }

    /// A configuration with every declared key present and unanswered.
    pub fn empty_configuration(&self) -> Configuration {
        Configuration::empty(self.field_keys())
    }
}
