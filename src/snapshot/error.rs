//! Snapshot error types.

use thiserror::Error;

/// Errors that can occur while saving or restoring configurations
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// Serialization to JSON or binary format failed
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    /// Deserialization from JSON or binary format failed
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(String),

    /// Snapshot version is not supported by this version
    #[error("Unsupported snapshot version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// Snapshot names a field the step graph does not declare
    #[error("Snapshot contains unknown field '{0}'")]
    UnknownField(String),

    /// No snapshot saved under this id
    #[error("Snapshot '{0}' not found")]
    NotFound(String),
}
