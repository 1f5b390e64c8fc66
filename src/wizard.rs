//! The wizard's control flow.
//!
//! `Wizard` ties the store and the guard together the way a step screen
//! drives them: guard check on activation, answer, resolve the next step
//! on the post-cascade configuration, wait out the selection animation,
//! then navigate. While a transition is pending further selections are
//! ignored.

use crate::core::Configuration;
use crate::flow::{Admission, FlowGuard};
use crate::graph::StepGraph;
use crate::requirements::{check_required, missing_answers};
use crate::settings::WizardSettings;
use crate::snapshot::{SnapshotError, SnapshotStore};
use crate::store::{ConfigStore, Destination, StoreError};
use crate::submit::{submit_configuration, GenerationService, SubmissionReceipt, SubmitError};
use std::sync::Arc;
use std::time::Duration;
use stillwater::effect::Effect;
use thiserror::Error;

/// Errors raised while assembling a wizard.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WizardError {
    #[error("Entry step '{0}' is not declared by the step graph")]
    UnknownEntryStep(String),

    #[error("Step graph has no steps")]
    EmptyGraph,
}

/// Navigation waiting for the selection animation to finish.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingTransition {
    /// Step the selection was made on
    pub from: String,
    /// Where to go once the delay has elapsed; `None` at the end of the projection
    pub destination: Option<Destination>,
    /// How long the caller should wait before completing the transition
    pub delay: Duration,
    generation: u64,
}

/// Result of a selection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selection {
    /// Another transition was still pending; nothing changed
    Ignored,

    /// Answer applied, navigation pending
    Pending(PendingTransition),
}

/// One user's wizard: configuration store, entry guard and selection debounce.
///
/// # Example
///
/// ```rust
/// use stepwise::graph::catalog::{self, model_steps};
/// use stepwise::wizard::{Selection, Wizard};
/// use stepwise::WizardSettings;
/// use std::sync::Arc;
///
/// let mut wizard = Wizard::new(Arc::new(model_steps()?), WizardSettings::default())?;
/// wizard.begin();
///
/// let Selection::Pending(pending) = wizard.select(catalog::GENDER, "Female")? else {
///     unreachable!("no transition pending yet");
/// };
/// // A second click during the animation is ignored
/// assert_eq!(wizard.select(catalog::GENDER, "Male")?, Selection::Ignored);
///
/// let next = wizard.complete_transition(pending).expect("ethnicity follows gender");
/// assert_eq!(next.step_id, catalog::ETHNICITY);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct Wizard {
    store: ConfigStore,
    guard: FlowGuard,
    settings: WizardSettings,
    /// Generation of the transition currently awaiting completion
    pending: Option<u64>,
    generation: u64,
}

impl Wizard {
    pub fn new(graph: Arc<StepGraph>, settings: WizardSettings) -> Result<Self, WizardError> {
        let first_step = match &settings.first_step {
            Some(step) if graph.find(step).is_none() => {
                return Err(WizardError::UnknownEntryStep(step.clone()));
            }
            Some(step) => step.clone(),
            None => graph
                .first_step()
                .ok_or(WizardError::EmptyGraph)?
                .id()
                .to_string(),
        };

        Ok(Self {
            store: ConfigStore::new(graph),
            guard: FlowGuard::new(first_step),
            settings,
            pending: None,
            generation: 0,
        })
    }

    pub fn store(&self) -> &ConfigStore {
        &self.store
    }

    pub fn guard(&self) -> &FlowGuard {
        &self.guard
    }

    pub fn settings(&self) -> &WizardSettings {
        &self.settings
    }

    pub fn configuration(&self) -> &Configuration {
        self.store.configuration()
    }

    /// Whether a selection is waiting for its transition to complete.
    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    /// 1-based index of the entry step in the current projection.
    fn entry_index(&self) -> usize {
        self.store
            .graph()
            .position(self.guard.first_step(), self.configuration())
            .unwrap_or(1)
    }

    /// Leave the landing point: fresh configuration, active flow.
    ///
    /// Returns the entry step's destination.
    pub fn begin(&mut self) -> Option<Destination> {
        self.store.reset();
        self.pending = None;
        self.guard.start_flow();
        let entry = self.entry_index();
        self.store.set_current_step(entry);
        self.store.destination_of(self.guard.first_step())
    }

    /// Activate a step page.
    ///
    /// On `Proceed` the session index follows the requested step; on a
    /// redirect it goes back to the entry step.
    pub fn enter(&mut self, step_id: &str) -> Admission {
        let admission = self.guard.admit(step_id);
        match &admission {
            Admission::Proceed => {
                if let Some(index) = self.store.graph().position(step_id, self.configuration()) {
                    self.store.set_current_step(index);
                }
            }
            Admission::Redirect { .. } => {
                let entry = self.entry_index();
                self.store.set_current_step(entry);
            }
        }
        admission
    }

    /// Answer a step and prepare navigation to the step after it.
    ///
    /// The next step is resolved after any cascade, so a pivot change that
    /// reveals or hides steps is already reflected in the destination.
    /// Steps outside the current projection cannot be answered.
    pub fn select(&mut self, step_id: &str, value: &str) -> Result<Selection, StoreError> {
        if self.pending.is_some() {
            tracing::debug!(step = step_id, "selection ignored, transition pending");
            return Ok(Selection::Ignored);
        }
        if self
            .store
            .graph()
            .position(step_id, self.configuration())
            .is_none()
        {
            return Err(StoreError::NotVisible {
                step: step_id.to_string(),
            });
        }

        self.store.update(step_id, value)?;
        let destination = self.store.destination_after(step_id);
        self.generation += 1;
        self.pending = Some(self.generation);

        Ok(Selection::Pending(PendingTransition {
            from: step_id.to_string(),
            destination,
            delay: self.settings.transition_delay(),
            generation: self.generation,
        }))
    }

    /// Fill one garment of an aggregate step. Does not navigate.
    pub fn select_part(
        &mut self,
        step_id: &str,
        sub_field: &str,
        value: &str,
    ) -> Result<&Configuration, StoreError> {
        self.store.set_aggregate_field(step_id, sub_field, value)
    }

    /// Finish a pending transition once its delay has elapsed.
    ///
    /// A transition outlived by its flow (abandoned, restarted, submitted or
    /// loaded over) goes nowhere and leaves the session index alone.
    pub fn complete_transition(&mut self, pending: PendingTransition) -> Option<Destination> {
        if self.pending != Some(pending.generation) || !self.guard.is_active() {
            tracing::debug!(from = %pending.from, "stale transition dropped");
            return None;
        }

        self.pending = None;
        if let Some(destination) = &pending.destination {
            tracing::debug!(from = %pending.from, to = %destination.step_id, "navigating");
            self.store.set_current_step(destination.index);
        }
        pending.destination
    }

    /// Go to the visible step before `step_id`.
    pub fn back(&mut self, step_id: &str) -> Option<Destination> {
        let destination = self.store.destination_before(step_id)?;
        self.store.set_current_step(destination.index);
        Some(destination)
    }

    /// Revisit a step intentionally, dropping every answer after it.
    pub fn revisit(&mut self, step_id: &str) -> Result<Option<Destination>, StoreError> {
        self.store.reset_from(step_id)?;
        let destination = self.store.destination_of(step_id);
        if let Some(destination) = &destination {
            self.store.set_current_step(destination.index);
        }
        Ok(destination)
    }

    /// Navigate away from the wizard without finishing.
    pub fn abandon(&mut self) {
        self.guard.end_flow();
        self.store.reset();
        self.pending = None;
    }

    /// Save the current configuration, returning its storage id.
    pub fn save(&self, storage: &mut impl SnapshotStore) -> Result<String, SnapshotError> {
        storage.save(&self.store.snapshot())
    }

    /// Load a saved configuration and enter the wizard with it.
    pub fn load(
        &mut self,
        storage: &impl SnapshotStore,
        id: &str,
    ) -> Result<Option<Destination>, SnapshotError> {
        let snapshot = storage.load(id)?;
        self.store.restore(&snapshot)?;
        self.pending = None;
        self.guard.start_flow();
        let entry = self.entry_index();
        self.store.set_current_step(entry);
        Ok(self.store.destination_of(self.guard.first_step()))
    }

    /// Hand the finished configuration to generation.
    ///
    /// Requires an active flow with no transition pending and every visible
    /// required step answered. A successful hand-off completes the flow and
    /// clears the store.
    pub async fn submit<Env>(&mut self, env: &Env) -> Result<SubmissionReceipt, SubmitError>
    where
        Env: GenerationService + Clone + Send + Sync + 'static,
    {
        if !self.guard.is_active() {
            return Err(SubmitError::FlowInactive);
        }
        if self.pending.is_some() {
            return Err(SubmitError::TransitionPending);
        }

        let readiness = check_required(self.store.graph(), self.configuration());
        if readiness.is_failure() {
            return Err(SubmitError::Incomplete(missing_answers(&readiness)));
        }

        let receipt = submit_configuration(self.configuration().to_map())
            .run(env)
            .await?;

        self.guard.complete_flow();
        self.store.reset();
        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::FlowPhase;
    use crate::graph::catalog::*;
    use crate::snapshot::MemorySnapshotStore;
    use std::collections::BTreeMap;

    fn wizard() -> Wizard {
        Wizard::new(Arc::new(model_steps().unwrap()), WizardSettings::default()).unwrap()
    }

    fn answer(wizard: &mut Wizard, step: &str, value: &str) -> Option<Destination> {
        match wizard.select(step, value).unwrap() {
            Selection::Pending(pending) => wizard.complete_transition(pending),
            Selection::Ignored => panic!("selection on {step} was ignored"),
        }
    }

    #[test]
    fn unknown_entry_step_is_rejected() {
        let settings = WizardSettings {
            first_step: Some("hat".to_string()),
            ..WizardSettings::default()
        };

        assert_eq!(
            Wizard::new(Arc::new(model_steps().unwrap()), settings).unwrap_err(),
            WizardError::UnknownEntryStep("hat".to_string())
        );
    }

    #[test]
    fn begin_activates_flow_at_first_step() {
        let mut wizard = wizard();
        let destination = wizard.begin().unwrap();

        assert_eq!(destination.step_id, GENDER);
        assert_eq!(destination.index, 1);
        assert_eq!(wizard.guard().phase(), FlowPhase::Active);
    }

    #[test]
    fn enter_without_flow_redirects_and_resets_index() {
        let mut wizard = wizard();

        let admission = wizard.enter(POSE);

        assert!(admission.is_redirect());
        assert_eq!(wizard.store().current_step(), 1);
    }

    #[test]
    fn enter_in_active_flow_tracks_position() {
        let mut wizard = wizard();
        wizard.begin();

        assert_eq!(wizard.enter(AGE), Admission::Proceed);
        assert_eq!(wizard.store().current_step(), 3);
    }

    #[test]
    fn selection_while_pending_is_ignored() {
        let mut wizard = wizard();
        wizard.begin();

        let first = wizard.select(GENDER, MALE).unwrap();
        assert!(wizard.is_busy());

        assert_eq!(wizard.select(GENDER, FEMALE).unwrap(), Selection::Ignored);
        assert_eq!(wizard.configuration().value(GENDER), MALE);

        let Selection::Pending(pending) = first else {
            panic!("first selection should be pending");
        };
        assert_eq!(pending.delay, Duration::from_millis(350));
        wizard.complete_transition(pending);
        assert!(!wizard.is_busy());
    }

    #[test]
    fn transition_outlived_by_abandon_goes_nowhere() {
        let mut wizard = wizard();
        wizard.begin();
        let Selection::Pending(pending) = wizard.select(GENDER, MALE).unwrap() else {
            panic!("first selection should be pending");
        };

        wizard.abandon();

        assert_eq!(wizard.complete_transition(pending), None);
        assert_eq!(wizard.store().current_step(), 1);
        assert_eq!(wizard.guard().phase(), FlowPhase::NotStarted);
    }

    #[test]
    fn transition_from_before_restart_is_dropped() {
        let mut wizard = wizard();
        wizard.begin();
        let Selection::Pending(stale) = wizard.select(GENDER, MALE).unwrap() else {
            panic!("first selection should be pending");
        };

        wizard.begin();
        let Selection::Pending(fresh) = wizard.select(GENDER, FEMALE).unwrap() else {
            panic!("selection after restart should be pending");
        };

        assert_eq!(wizard.complete_transition(stale), None);
        assert!(wizard.is_busy());
        assert_eq!(
            wizard.complete_transition(fresh).map(|d| d.step_id),
            Some(ETHNICITY.to_string())
        );
        assert_eq!(wizard.store().current_step(), 2);
    }

    #[test]
    fn hidden_step_cannot_be_selected() {
        let mut wizard = wizard();
        wizard.begin();
        answer(&mut wizard, GENDER, FEMALE);

        assert_eq!(
            wizard.select(BEARD, "Full").unwrap_err(),
            StoreError::NotVisible {
                step: BEARD.to_string()
            }
        );
        assert!(matches!(
            wizard.select(CLOTHING_TOP, "Shirt"),
            Err(StoreError::NotVisible { .. })
        ));
        assert!(!wizard.is_busy());
        assert_eq!(wizard.configuration().value(BEARD), "");
    }

    #[test]
    fn entry_override_drives_session_index() {
        let settings = WizardSettings {
            first_step: Some(ETHNICITY.to_string()),
            ..WizardSettings::default()
        };
        let mut wizard = Wizard::new(Arc::new(model_steps().unwrap()), settings).unwrap();

        assert_eq!(
            wizard.enter(POSE),
            Admission::Redirect {
                to: ETHNICITY.to_string(),
                replace_history: true,
            }
        );
        assert_eq!(wizard.store().current_step(), 2);
        assert_eq!(
            wizard.store().current_step_definition().map(|s| s.id()),
            Some(ETHNICITY)
        );

        let destination = wizard.begin().unwrap();
        assert_eq!(destination.index, 2);
        assert_eq!(wizard.store().current_step(), 2);
    }

    #[test]
    fn navigation_follows_post_cascade_projection() {
        let mut wizard = wizard();
        wizard.begin();
        answer(&mut wizard, GENDER, MALE);
        answer(&mut wizard, ETHNICITY, "Asian");
        answer(&mut wizard, AGE, "30");

        // switching gender reveals coverage and hides beard
        let next = answer(&mut wizard, GENDER, FEMALE).unwrap();

        assert_eq!(next.step_id, ETHNICITY);
        assert_eq!(wizard.configuration().value(ETHNICITY), "");
        answer(&mut wizard, ETHNICITY, "Asian");
        let next = answer(&mut wizard, AGE, "30").unwrap();
        assert_eq!(next.step_id, COVERAGE);
        assert_eq!(wizard.store().current_step(), 4);
    }

    #[test]
    fn projection_ends_at_clothing() {
        let mut wizard = wizard();
        wizard.begin();

        let destination = answer(&mut wizard, BACKGROUND, "Studio").unwrap();

        assert_eq!(destination.step_id, CLOTHING);
        assert_eq!(destination.index, wizard.store().visible_step_count());
        assert!(wizard.store().destination_after(CLOTHING).is_none());
    }

    #[test]
    fn back_walks_the_visible_projection() {
        let mut wizard = wizard();
        wizard.begin();
        answer(&mut wizard, GENDER, MALE);

        let destination = wizard.back(EYE_COLOR).unwrap();

        assert_eq!(destination.step_id, BEARD);
        assert_eq!(wizard.store().current_step(), destination.index);
        assert!(wizard.back(GENDER).is_none());
    }

    #[test]
    fn revisit_clears_later_answers() {
        let mut wizard = wizard();
        wizard.begin();
        answer(&mut wizard, GENDER, MALE);
        answer(&mut wizard, ETHNICITY, "Asian");
        answer(&mut wizard, AGE, "30");

        let destination = wizard.revisit(ETHNICITY).unwrap().unwrap();

        assert_eq!(destination.index, 2);
        assert_eq!(wizard.configuration().value(ETHNICITY), "Asian");
        assert_eq!(wizard.configuration().value(AGE), "");
    }

    #[test]
    fn abandon_clears_everything() {
        let mut wizard = wizard();
        wizard.begin();
        answer(&mut wizard, GENDER, MALE);

        wizard.abandon();

        assert_eq!(wizard.guard().phase(), FlowPhase::NotStarted);
        assert_eq!(wizard.configuration().answered_count(), 0);
        assert!(wizard.enter(ETHNICITY).is_redirect());
    }

    #[test]
    fn save_and_load_restart_the_traversal() {
        let mut storage = MemorySnapshotStore::new();
        let mut wizard = wizard();
        wizard.begin();
        answer(&mut wizard, GENDER, FEMALE);
        answer(&mut wizard, ETHNICITY, "Black");
        let id = wizard.save(&mut storage).unwrap();

        let mut other = self::wizard();
        let destination = other.load(&storage, &id).unwrap().unwrap();

        assert_eq!(destination.step_id, GENDER);
        assert_eq!(other.configuration().value(ETHNICITY), "Black");
        assert!(other.guard().is_active());
    }

    #[derive(Clone)]
    struct Generator {
        accept: bool,
    }

    impl GenerationService for Generator {
        fn submit(
            &self,
            fields: &BTreeMap<String, String>,
        ) -> Result<SubmissionReceipt, SubmitError> {
            if self.accept {
                Ok(SubmissionReceipt {
                    job_id: fields.get(GENDER).cloned().unwrap_or_default(),
                })
            } else {
                Err(SubmitError::Rejected("busy".to_string()))
            }
        }
    }

    fn fill_male(wizard: &mut Wizard) {
        for (step, value) in [
            (GENDER, MALE),
            (ETHNICITY, "Asian"),
            (AGE, "30"),
            (BODY_TYPE, "Athletic"),
            (POSE, "Standing"),
        ] {
            answer(wizard, step, value);
        }
        for part in [CLOTHING_TOP, CLOTHING_BOTTOM, CLOTHING_FOOTWEAR] {
            wizard.select_part(CLOTHING, part, "Item").unwrap();
        }
    }

    #[tokio::test]
    async fn submit_requires_active_flow() {
        let mut wizard = wizard();

        let result = wizard.submit(&Generator { accept: true }).await;

        assert_eq!(result.unwrap_err(), SubmitError::FlowInactive);
    }

    #[tokio::test]
    async fn submit_waits_for_pending_transition() {
        let mut wizard = wizard();
        wizard.begin();
        fill_male(&mut wizard);
        let Selection::Pending(pending) = wizard.select(BACKGROUND, "Studio").unwrap() else {
            panic!("selection should be pending");
        };

        let result = wizard.submit(&Generator { accept: true }).await;

        assert_eq!(result.unwrap_err(), SubmitError::TransitionPending);
        assert_eq!(wizard.configuration().value(GENDER), MALE);
        assert!(wizard.complete_transition(pending).is_some());
        assert!(wizard.submit(&Generator { accept: true }).await.is_ok());
    }

    #[tokio::test]
    async fn submit_reports_every_missing_answer() {
        let mut wizard = wizard();
        wizard.begin();
        answer(&mut wizard, GENDER, MALE);

        let result = wizard.submit(&Generator { accept: true }).await;

        match result {
            Err(SubmitError::Incomplete(missing)) => assert_eq!(missing.len(), 7),
            other => panic!("expected incomplete, got {other:?}"),
        }
        assert!(wizard.guard().is_active());
    }

    #[tokio::test]
    async fn successful_submit_completes_flow() {
        let mut wizard = wizard();
        wizard.begin();
        fill_male(&mut wizard);
        assert!(!wizard.store().is_step_completed(CLOTHING));

        let receipt = wizard.submit(&Generator { accept: true }).await.unwrap();

        assert_eq!(receipt.job_id, MALE);
        assert_eq!(wizard.guard().phase(), FlowPhase::Completed);
        assert_eq!(wizard.configuration().answered_count(), 0);
    }

    #[tokio::test]
    async fn rejected_submit_keeps_configuration() {
        let mut wizard = wizard();
        wizard.begin();
        fill_male(&mut wizard);

        let result = wizard.submit(&Generator { accept: false }).await;

        assert!(matches!(result, Err(SubmitError::Rejected(_))));
        assert!(wizard.guard().is_active());
        assert_eq!(wizard.configuration().value(GENDER), MALE);
    }
}
