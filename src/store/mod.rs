//! Authoritative owner of the configuration and wizard session.
//!
//! `ConfigStore` applies every answer atomically: the cascade triggered by
//! a pivot change completes before the updated configuration becomes
//! visible, so navigation computed afterwards always sees post-cascade
//! visibility.

mod error;
mod session;

pub use error::StoreError;
pub use session::WizardSession;

use crate::core::{AnswerChange, AnswerLog, Configuration, StepDefinition};
use crate::graph::StepGraph;
use crate::snapshot::{Snapshot, SnapshotError};
use chrono::Utc;
use std::sync::Arc;

/// Where navigation should go next.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Destination {
    /// Id of the destination step
    pub step_id: String,
    /// Route the surrounding router resolves
    pub path: String,
    /// 1-based position within the visible projection
    pub index: usize,
}

impl Destination {
    fn new(step: &StepDefinition, index: usize) -> Self {
        Self {
            step_id: step.id().to_string(),
            path: step.path().to_string(),
            index,
        }
    }
}

/// Mutable owner of one wizard traversal.
///
/// # Example
///
/// ```rust
/// use stepwise::graph::catalog::{self, model_steps};
/// use stepwise::store::ConfigStore;
/// use std::sync::Arc;
///
/// let mut store = ConfigStore::new(Arc::new(model_steps()?));
/// store.update(catalog::GENDER, "Male")?;
/// store.update(catalog::ETHNICITY, "Asian")?;
///
/// // Changing a pivot clears everything declared after it
/// store.update(catalog::GENDER, "Female")?;
/// assert_eq!(store.configuration().value(catalog::ETHNICITY), "");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug)]
pub struct ConfigStore {
    graph: Arc<StepGraph>,
    session: WizardSession,
    history: AnswerLog,
}

impl ConfigStore {
    /// Create a store with an all-empty configuration positioned at step 1.
    pub fn new(graph: Arc<StepGraph>) -> Self {
        let session = WizardSession::new(graph.empty_configuration());
        Self {
            graph,
            session,
            history: AnswerLog::new(),
        }
    }

    pub fn graph(&self) -> &StepGraph {
        &self.graph
    }

    pub fn configuration(&self) -> &Configuration {
        self.session.configuration()
    }

    pub fn session(&self) -> &WizardSession {
        &self.session
    }

    pub fn history(&self) -> &AnswerLog {
        &self.history
    }

    /// Replace a field's answer.
    ///
    /// When `field_key` is a pivot whose previous answer was non-empty and
    /// differs from `value`, every scalar field declared after it is cleared
    /// in the same update. First answers and re-selections never cascade.
    pub fn update(
        &mut self,
        field_key: &str,
        value: impl Into<String>,
    ) -> Result<&Configuration, StoreError> {
        let value = value.into();
        let current = self.session.configuration();
        let previous = current
            .get(field_key)
            .ok_or_else(|| StoreError::UnknownField {
                field: field_key.to_string(),
            })?
            .to_string();

        let cascades =
            self.graph.is_pivot(field_key) && !previous.is_empty() && previous != value;
        let (next, cleared) = if cascades {
            let scope = self.graph.cascade_scope(field_key);
            let cleared: Vec<String> = scope
                .iter()
                .filter(|key| current.is_answered(key))
                .map(|key| key.to_string())
                .collect();
            (current.cleared(scope).with(field_key, value.clone()), cleared)
        } else {
            (current.with(field_key, value.clone()), Vec::new())
        };

        if cascades {
            tracing::debug!(
                field = field_key,
                from = %previous,
                to = %value,
                cleared = cleared.len(),
                "pivot changed, downstream answers reset"
            );
        }

        self.history = self.history.record(AnswerChange {
            field: field_key.to_string(),
            previous,
            value,
            cleared,
            timestamp: Utc::now(),
        });
        self.session.replace_configuration(next);
        Ok(self.session.configuration())
    }

    /// Write one sub-field of an aggregate step. Never cascades.
    pub fn set_aggregate_field(
        &mut self,
        step_id: &str,
        sub_field: &str,
        value: impl Into<String>,
    ) -> Result<&Configuration, StoreError> {
        let step = self
            .graph
            .find(step_id)
            .ok_or_else(|| StoreError::UnknownStep {
                step: step_id.to_string(),
            })?;
        if !step.is_aggregate() {
            return Err(StoreError::NotAggregate {
                step: step_id.to_string(),
            });
        }
        if !step.field_keys().contains(&sub_field) {
            return Err(StoreError::UnknownField {
                field: sub_field.to_string(),
            });
        }
        self.update(sub_field, value)
    }

    /// Clear every scalar field declared strictly after `field_key`.
    ///
    /// `field_key` itself is left untouched.
    pub fn reset_from(&mut self, field_key: &str) -> Result<&Configuration, StoreError> {
        if !self.graph.is_scalar_field(field_key) {
            return Err(StoreError::UnknownField {
                field: field_key.to_string(),
            });
        }
        let scope = self.graph.cascade_scope(field_key);
        tracing::debug!(field = field_key, scope = scope.len(), "explicit reset");
        let next = self.session.configuration().cleared(scope);
        self.session.replace_configuration(next);
        Ok(self.session.configuration())
    }

    /// Start a fresh traversal: all-empty configuration at step 1.
    pub fn reset(&mut self) {
        self.session = WizardSession::new(self.graph.empty_configuration());
        self.history = AnswerLog::new();
    }

    /// Whether a step's answer is present.
    ///
    /// Aggregate steps never report completed here; their completion is
    /// signalled by a successful submission. Unknown steps are not completed.
    pub fn is_step_completed(&self, step_id: &str) -> bool {
        self.graph
            .find(step_id)
            .and_then(StepDefinition::field_key)
            .is_some_and(|key| self.configuration().is_answered(key))
    }

    pub fn is_step_required(&self, step_id: &str) -> bool {
        self.graph.is_required(step_id)
    }

    /// Visible projection for the current configuration.
    pub fn visible_steps(&self) -> Vec<&StepDefinition> {
        self.graph.visible_steps(self.configuration())
    }

    pub fn visible_step_count(&self) -> usize {
        self.graph.visible_step_count(self.configuration())
    }

    pub fn current_step(&self) -> usize {
        self.session.current_step()
    }

    /// Move the session index. No validation happens here.
    pub fn set_current_step(&mut self, index: usize) {
        self.session.set_current_step(index);
    }

    /// Step at the current index, if the index is inside the projection.
    pub fn current_step_definition(&self) -> Option<&StepDefinition> {
        self.graph.step_at(self.current_step(), self.configuration())
    }

    /// Destination for `step_id` itself within the current projection.
    pub fn destination_of(&self, step_id: &str) -> Option<Destination> {
        let config = self.configuration();
        let index = self.graph.position(step_id, config)?;
        let step = self.graph.step_at(index, config)?;
        Some(Destination::new(step, index))
    }

    /// Destination following `step_id`, resolved on the current (post-cascade) configuration.
    pub fn destination_after(&self, step_id: &str) -> Option<Destination> {
        let next = self.graph.next_step_after(step_id, self.configuration())?;
        self.destination_of(next.id())
    }

    /// Destination preceding `step_id`, for back navigation.
    pub fn destination_before(&self, step_id: &str) -> Option<Destination> {
        let previous = self
            .graph
            .previous_step_before(step_id, self.configuration())?;
        self.destination_of(previous.id())
    }

    /// Capture the configuration for the persistence collaborator.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(self.configuration().to_map())
    }

    /// Replace the traversal with a saved configuration.
    ///
    /// The store is reset first; answers are then taken verbatim. A snapshot
    /// naming a field the graph does not declare is rejected before anything
    /// changes.
    pub fn restore(&mut self, snapshot: &Snapshot) -> Result<(), SnapshotError> {
        snapshot.check_version()?;
        if let Some(field) = snapshot
            .fields
            .keys()
            .find(|key| !self.configuration().contains(key))
        {
            tracing::warn!(snapshot = %snapshot.id, field = %field, "snapshot rejected");
            return Err(SnapshotError::UnknownField(field.clone()));
        }

        self.reset();
        let restored = snapshot
            .fields
            .iter()
            .fold(self.configuration().clone(), |config, (key, value)| {
                config.with(key, value.as_str())
            });
        self.session.replace_configuration(restored);
        tracing::debug!(snapshot = %snapshot.id, "configuration restored");
        Ok(())
    }
}
