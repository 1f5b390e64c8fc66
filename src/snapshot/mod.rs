//! Saving and loading configurations.
//!
//! A `Snapshot` is the flat field-to-answer mapping handed to the
//! persistence collaborator verbatim. Snapshots never carry the current
//! step: a loaded configuration always starts a fresh traversal.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

pub mod error;
mod storage;

pub use error::SnapshotError;
pub use storage::{MemorySnapshotStore, SnapshotStore};

/// Version identifier for snapshot format
pub const SNAPSHOT_VERSION: u32 = 1;

/// Serializable copy of a configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Snapshot format version
    pub version: u32,

    /// Unique snapshot identifier
    pub id: String,

    /// When the snapshot was taken
    pub saved_at: DateTime<Utc>,

    /// Every field and its answer, unanswered fields included
    pub fields: BTreeMap<String, String>,
}

impl Snapshot {
    pub fn new(fields: BTreeMap<String, String>) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            id: Uuid::new_v4().to_string(),
            saved_at: Utc::now(),
            fields,
        }
    }

    /// Reject snapshots written by a newer format.
    pub fn check_version(&self) -> Result<(), SnapshotError> {
        if self.version > SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion {
                found: self.version,
                supported: SNAPSHOT_VERSION,
            });
        }
        Ok(())
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| SnapshotError::SerializationFailed(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let snapshot: Self = serde_json::from_str(json)
            .map_err(|e| SnapshotError::DeserializationFailed(e.to_string()))?;
        snapshot.check_version()?;
        Ok(snapshot)
    }

    /// Compact binary encoding.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        bincode::serialize(self).map_err(|e| SnapshotError::SerializationFailed(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        let snapshot: Self = bincode::deserialize(bytes)
            .map_err(|e| SnapshotError::DeserializationFailed(e.to_string()))?;
        snapshot.check_version()?;
        Ok(snapshot)
    }
}
