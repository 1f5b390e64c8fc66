//! Entry discipline for the wizard.
//!
//! The guard decides, on every step activation, whether the session is
//! continuing an active traversal. Anything else landing on a step other
//! than the first is sent back to the first step.

use serde::{Deserialize, Serialize};

/// Where the current session stands in a traversal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlowPhase {
    /// No traversal entered from the first step in this session
    #[default]
    NotStarted,

    /// Traversal entered from the first step and still in progress
    Active,

    /// Traversal finished by a successful submission
    Completed,
}

impl FlowPhase {
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }
}

/// Outcome of a guard check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Admission {
    /// The requested step may be shown
    Proceed,

    /// Send the user to `to`, replacing the history entry of the rejected request
    Redirect { to: String, replace_history: bool },
}

impl Admission {
    pub fn is_redirect(&self) -> bool {
        matches!(self, Self::Redirect { .. })
    }
}

/// Session-scoped admission control.
///
/// The phase lives only as long as the guard; nothing restores it after a
/// reload, matching the in-memory configuration that is lost with it.
///
/// # Example
///
/// ```rust
/// use stepwise::flow::{Admission, FlowGuard};
///
/// let mut guard = FlowGuard::new("gender");
/// assert!(guard.admit("pose").is_redirect());
///
/// guard.start_flow();
/// assert_eq!(guard.admit("pose"), Admission::Proceed);
/// ```
#[derive(Clone, Debug)]
pub struct FlowGuard {
    first_step: String,
    phase: FlowPhase,
}

impl FlowGuard {
    pub fn new(first_step: impl Into<String>) -> Self {
        Self {
            first_step: first_step.into(),
            phase: FlowPhase::NotStarted,
        }
    }

    pub fn first_step(&self) -> &str {
        &self.first_step
    }

    pub fn phase(&self) -> FlowPhase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        self.phase.is_active()
    }

    /// Mark the traversal as entered from the first step.
    pub fn start_flow(&mut self) {
        tracing::info!(first_step = %self.first_step, "flow started");
        self.phase = FlowPhase::Active;
    }

    /// Abandon the traversal.
    pub fn end_flow(&mut self) {
        tracing::debug!(phase = ?self.phase, "flow ended");
        self.phase = FlowPhase::NotStarted;
    }

    /// Finish the traversal after a successful submission.
    pub fn complete_flow(&mut self) {
        tracing::info!("flow completed");
        self.phase = FlowPhase::Completed;
    }

    /// Check a step activation.
    ///
    /// The first step is always admitted. Any other step is admitted only
    /// while the flow is active.
    pub fn admit(&self, requested_step: &str) -> Admission {
        if requested_step == self.first_step || self.phase.is_active() {
            return Admission::Proceed;
        }

        tracing::debug!(
            requested = requested_step,
            phase = ?self.phase,
            "entry outside an active flow, redirecting"
        );
        Admission::Redirect {
            to: self.first_step.clone(),
            replace_history: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_guard_is_not_started() {
        let guard = FlowGuard::new("gender");

        assert_eq!(guard.phase(), FlowPhase::NotStarted);
        assert!(!guard.is_active());
    }

    #[test]
    fn deep_link_without_flow_redirects_to_first_step() {
        let guard = FlowGuard::new("gender");

        assert_eq!(
            guard.admit("body_type"),
            Admission::Redirect {
                to: "gender".to_string(),
                replace_history: true,
            }
        );
    }

    #[test]
    fn first_step_is_always_admitted() {
        let mut guard = FlowGuard::new("gender");
        assert_eq!(guard.admit("gender"), Admission::Proceed);

        guard.complete_flow();
        assert_eq!(guard.admit("gender"), Admission::Proceed);
    }

    #[test]
    fn active_flow_admits_any_step() {
        let mut guard = FlowGuard::new("gender");
        guard.start_flow();

        assert_eq!(guard.admit("gender"), Admission::Proceed);
        assert_eq!(guard.admit("ethnicity"), Admission::Proceed);
        assert_eq!(guard.admit("unknown"), Admission::Proceed);
    }

    #[test]
    fn ended_flow_redirects_again() {
        let mut guard = FlowGuard::new("gender");
        guard.start_flow();
        guard.end_flow();

        assert_eq!(guard.phase(), FlowPhase::NotStarted);
        assert!(guard.admit("pose").is_redirect());
    }

    #[test]
    fn completed_flow_is_observable_and_redirects() {
        let mut guard = FlowGuard::new("gender");
        guard.start_flow();
        guard.complete_flow();

        assert_eq!(guard.phase(), FlowPhase::Completed);
        assert!(guard.admit("pose").is_redirect());
    }
}
