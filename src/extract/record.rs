//! Structured entry records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A timeline entry extracted by [`EntryParser`](crate::extract::EntryParser).
///
/// A fresh value is produced by every successful parse; the crate never
/// mutates a record after handing it out.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryRecord {
    /// `None` when the entry's timestamp was missing or unreadable.
    pub published_at: Option<DateTime<Utc>>,
    pub favorite_count: u64,
    pub repost_count: u64,
    /// `None` when the permalink anchor carried no target.
    pub permalink: Option<String>,
    pub author_name: String,
    /// Digits following the configured series prefix in the body text.
    pub series_id: String,
}

impl EntryRecord {
    /// One-line human readable description, used as the default text handed
    /// to host commands.
    pub fn summary(&self) -> String {
        let mut line = format!("R{} {}", self.series_id, self.author_name);
        if self.favorite_count > 0 {
            line.push_str(&format!(" (\u{2764}{})", self.favorite_count));
        }
        line
    }
}
