//! Snapshot error types.

use thiserror::Error;

/// Errors that can occur while saving or restoring a snapshot
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// Encoding the snapshot as JSON failed
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    /// The stored text is not a snapshot
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(String),

    /// Snapshot was written by an incompatible format version
    #[error("Unsupported snapshot version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },
}
