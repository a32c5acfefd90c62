//! Persisted copies of the latest captured record.
//!
//! The navigation machine stores a snapshot through the host
//! [`ValueStore`](crate::host::ValueStore) whenever the captured record
//! changes, and reads it back when the composer opens in a fresh session.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::extract::EntryRecord;

pub mod error;

pub use error::SnapshotError;

/// Version identifier for snapshot format
pub const SNAPSHOT_VERSION: u32 = 1;

/// Serializable copy of an [`EntryRecord`] with bookkeeping.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecordSnapshot {
    /// Snapshot format version
    pub version: u32,

    /// Unique snapshot identifier
    pub id: String,

    /// When the snapshot was taken
    pub saved_at: DateTime<Utc>,

    pub record: EntryRecord,
}

impl RecordSnapshot {
    pub fn new(record: EntryRecord) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            id: Uuid::new_v4().to_string(),
            saved_at: Utc::now(),
            record,
        }
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        serde_json::to_string(self).map_err(|e| SnapshotError::SerializationFailed(e.to_string()))
    }

    /// Parse a stored snapshot, rejecting unknown format versions.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let snapshot: Self = serde_json::from_str(json)
            .map_err(|e| SnapshotError::DeserializationFailed(e.to_string()))?;

        if snapshot.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion {
                found: snapshot.version,
                supported: SNAPSHOT_VERSION,
            });
        }
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> EntryRecord {
        EntryRecord {
            published_at: None,
            favorite_count: 4,
            repost_count: 1,
            permalink: Some("/ann/status/9".into()),
            author_name: "Ann".into(),
            series_id: "12".into(),
        }
    }

    #[test]
    fn snapshot_serializes_correctly() {
        let snapshot = RecordSnapshot::new(record());
        let json = snapshot.to_json().unwrap();
        let restored = RecordSnapshot::from_json(&json).unwrap();

        assert_eq!(snapshot, restored);
        assert_eq!(restored.version, SNAPSHOT_VERSION);
    }

    #[test]
    fn snapshots_get_distinct_ids() {
        assert_ne!(RecordSnapshot::new(record()).id, RecordSnapshot::new(record()).id);
    }

    #[test]
    fn unknown_version_is_rejected() {
        let mut snapshot = RecordSnapshot::new(record());
        snapshot.version = 7;
        let json = snapshot.to_json().unwrap();

        let err = RecordSnapshot::from_json(&json).unwrap_err();
        assert!(matches!(
            err,
            SnapshotError::UnsupportedVersion {
                found: 7,
                supported: SNAPSHOT_VERSION
            }
        ));
    }

    #[test]
    fn garbage_is_a_deserialization_error() {
        let err = RecordSnapshot::from_json("{\"version\":1}").unwrap_err();
        assert!(matches!(err, SnapshotError::DeserializationFailed(_)));
    }
}
