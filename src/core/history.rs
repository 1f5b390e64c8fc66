//! Answer history tracking.
//!
//! Every applied answer is recorded as an immutable `AnswerChange`,
//! including the downstream fields a cascade cleared with it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Record of a single applied answer.
///
/// # Example
///
/// ```rust
/// use stepwise::core::AnswerChange;
/// use chrono::Utc;
///
/// let change = AnswerChange {
///     field: "gender".to_string(),
///     previous: "Male".to_string(),
///     value: "Female".to_string(),
///     cleared: vec!["ethnicity".to_string()],
///     timestamp: Utc::now(),
/// };
/// assert!(change.cascaded());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnswerChange {
    /// The field that was answered
    pub field: String,
    /// Answer before the change (empty if unanswered)
    pub previous: String,
    /// Answer after the change
    pub value: String,
    /// Downstream fields reset by the same update
    pub cleared: Vec<String>,
    /// When the answer was applied
    pub timestamp: DateTime<Utc>,
}

impl AnswerChange {
    /// Whether this change invalidated downstream answers.
    pub fn cascaded(&self) -> bool {
        !self.cleared.is_empty()
    }
}

/// Ordered log of applied answers.
///
/// The log is immutable - `record` returns a new log with the change
/// appended.
///
/// # Example
///
/// ```rust
/// use stepwise::core::{AnswerChange, AnswerLog};
/// use chrono::Utc;
///
/// let log = AnswerLog::new();
/// let next = log.record(AnswerChange {
///     field: "gender".to_string(),
///     previous: String::new(),
///     value: "Male".to_string(),
///     cleared: Vec::new(),
///     timestamp: Utc::now(),
/// });
///
/// assert_eq!(next.changes().len(), 1);
/// assert_eq!(log.changes().len(), 0); // Original unchanged
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AnswerLog {
    changes: Vec<AnswerChange>,
}

impl AnswerLog {
    pub fn new() -> Self {
        Self {
            changes: Vec::new(),
        }
    }

    /// Record a change, returning a new log.
    pub fn record(&self, change: AnswerChange) -> Self {
        let mut changes = self.changes.clone();
        changes.push(change);
        Self { changes }
    }

    /// Fields in the order they were answered, repeats included.
    pub fn answered_path(&self) -> Vec<&str> {
        self.changes.iter().map(|c| c.field.as_str()).collect()
    }

    /// Number of changes that triggered a cascade.
    pub fn cascade_count(&self) -> usize {
        self.changes.iter().filter(|c| c.cascaded()).count()
    }

    /// Most recent change applied to `field`.
    pub fn last_change_to(&self, field: &str) -> Option<&AnswerChange> {
        self.changes.iter().rev().find(|c| c.field == field)
    }

    pub fn changes(&self) -> &[AnswerChange] {
        &self.changes
    }
}
