//! Journal entry types
//!
//! One record is appended to the journal for each cache-entry lifecycle
//! event. The set is closed: matching is exhaustive, so a new lifecycle
//! event cannot be added without every consumer handling it.

use serde::{Deserialize, Serialize};

/// One cache-entry lifecycle event recorded in the journal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum JournalEntry {
    /// A write for this key has started and is not yet safe to serve
    Dirty(String),
    /// The write for this key committed; its value is safe to serve
    Clean(String),
    /// The in-flight write for this key was abandoned
    Cancel(String),
    /// The key and its value were evicted or deleted
    Remove(String),
    /// The committed value for this key was served (recency signal)
    Read(String),
}

impl JournalEntry {
    /// The cache key this event is about
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::Dirty(key)
            | Self::Clean(key)
            | Self::Cancel(key)
            | Self::Remove(key)
            | Self::Read(key) => key,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_event_kind_names_its_key() {
        let events = [
            JournalEntry::Dirty("k".into()),
            JournalEntry::Clean("k".into()),
            JournalEntry::Cancel("k".into()),
            JournalEntry::Remove("k".into()),
            JournalEntry::Read("k".into()),
        ];

        for event in &events {
            assert_eq!(event.key(), "k");
        }
    }
}
