//! Generation collaborator interface.

use crate::requirements::MissingAnswer;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Acknowledgement from the generation collaborator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    /// Job handle issued by the generation service
    pub job_id: String,
}

/// Errors that can occur when submitting a configuration
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum SubmitError {
    #[error("Configuration incomplete: {} required answer(s) missing", .0.len())]
    Incomplete(Vec<MissingAnswer>),

    #[error("Wizard flow is not active")]
    FlowInactive,

    #[error("A step transition is still pending")]
    TransitionPending,

    #[error("Generation service rejected the configuration: {0}")]
    Rejected(String),
}

/// External service that turns a finished configuration into a generation job.
///
/// Job submission and polling live behind this trait; the wizard only needs
/// to know whether the hand-off succeeded.
pub trait GenerationService {
    fn submit(&self, fields: &BTreeMap<String, String>) -> Result<SubmissionReceipt, SubmitError>;
}
