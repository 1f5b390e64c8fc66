//! Persistence collaborator interface.

use super::{Snapshot, SnapshotError};
use std::collections::HashMap;

/// Somewhere snapshots can be saved to and loaded from.
///
/// The wizard does not care about the medium; it only hands snapshots over
/// and restores them into a freshly reset store.
pub trait SnapshotStore {
    /// Persist a snapshot, returning the id it can be loaded by.
    fn save(&mut self, snapshot: &Snapshot) -> Result<String, SnapshotError>;

    fn load(&self, id: &str) -> Result<Snapshot, SnapshotError>;

    /// Ids of every saved snapshot.
    fn list(&self) -> Vec<String>;
}

/// In-process snapshot store holding binary-encoded snapshots.
#[derive(Debug, Default)]
pub struct MemorySnapshotStore {
    entries: HashMap<String, Vec<u8>>,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotStore for MemorySnapshotStore {
    fn save(&mut self, snapshot: &Snapshot) -> Result<String, SnapshotError> {
        let bytes = snapshot.to_bytes()?;
        self.entries.insert(snapshot.id.clone(), bytes);
        Ok(snapshot.id.clone())
    }

    fn load(&self, id: &str) -> Result<Snapshot, SnapshotError> {
        let bytes = self
            .entries
            .get(id)
            .ok_or_else(|| SnapshotError::NotFound(id.to_string()))?;
        Snapshot::from_bytes(bytes)
    }

    fn list(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.entries.keys().cloned().collect();
        ids.sort();
        ids
    }
}
