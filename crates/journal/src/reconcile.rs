//! Journal reconciliation
//!
//! Folds the entry stream of a resolved journal file into the final
//! clean/dirty key snapshot the cache manager rebuilds its in-memory
//! index from.

use crate::codec::JournalReader;
use crate::entry::JournalEntry;
use crate::errors::Result;
use crate::paths::JournalPaths;
use crate::recovery::resolve_journal;
use std::path::Path;
use tracing::debug;

/// Reconciled journal snapshot
///
/// `clean` is ordered by recency: the most recently committed or read key
/// is last. `dirty` is ordered by insertion. Within each sequence every
/// key appears at most once; a key may appear in both while a rewrite of
/// an already-committed value is in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalData {
    pub clean: Vec<String>,
    pub dirty: Vec<String>,
    /// Entries processed beyond the minimum a compacted journal would
    /// hold (one record per clean key plus one per dirty key); the
    /// caller's signal for when compaction pays off.
    pub redundancy_count: usize,
}

/// Resolve the directory's journal files and fold the surviving journal,
/// or return `None` when the directory holds no journal at all.
///
/// Never returns a partially-folded snapshot: any header, decode, or I/O
/// failure mid-stream fails the whole read, and the caller falls back to
/// a full storage scan.
pub fn read_journal_if_exists(dir: &Path, expected_version: u32) -> Result<Option<JournalData>> {
    let paths = JournalPaths::new(dir);
    if !resolve_journal(&paths)? {
        debug!(dir = %dir.display(), "no journal present, cache starts empty");
        return Ok(None);
    }

    let mut reader = JournalReader::open(&paths.journal, expected_version)?;
    let mut clean: Vec<String> = Vec::new();
    let mut dirty: Vec<String> = Vec::new();
    let mut entries_processed = 0usize;

    while let Some(entry) = reader.next_entry()? {
        entries_processed += 1;
        match entry {
            JournalEntry::Dirty(key) => {
                // The key is deliberately not removed from `clean`: the
                // previously committed value stays servable while the new
                // write is in flight.
                if !dirty.contains(&key) {
                    dirty.push(key);
                }
            }
            JournalEntry::Clean(key) => {
                remove_key(&mut dirty, &key);
                remove_key(&mut clean, &key);
                clean.push(key);
            }
            JournalEntry::Cancel(key) => {
                remove_key(&mut dirty, &key);
            }
            JournalEntry::Remove(key) => {
                remove_key(&mut dirty, &key);
                remove_key(&mut clean, &key);
            }
            JournalEntry::Read(key) => {
                remove_key(&mut clean, &key);
                clean.push(key);
            }
        }
    }

    let redundancy_count = entries_processed.saturating_sub(clean.len() + dirty.len());
    debug!(
        entries = entries_processed,
        clean = clean.len(),
        dirty = dirty.len(),
        redundant = redundancy_count,
        "journal reconciled"
    );

    Ok(Some(JournalData {
        clean,
        dirty,
        redundancy_count,
    }))
}

fn remove_key(keys: &mut Vec<String>, key: &str) {
    if let Some(pos) = keys.iter().position(|k| k == key) {
        keys.remove(pos);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::JournalWriter;
    use crate::format::JOURNAL_VERSION;
    use tempfile::TempDir;

    fn write_entries(dir: &Path, entries: &[JournalEntry]) {
        let paths = JournalPaths::new(dir);
        let mut writer = JournalWriter::create(&paths.journal, JOURNAL_VERSION).unwrap();
        for entry in entries {
            writer.write_entry(entry).unwrap();
        }
        writer.finish().unwrap();
    }

    fn fold(entries: &[JournalEntry]) -> JournalData {
        let temp_dir = TempDir::new().unwrap();
        write_entries(temp_dir.path(), entries);
        read_journal_if_exists(temp_dir.path(), JOURNAL_VERSION)
            .unwrap()
            .unwrap()
    }

    #[test]
    fn full_lifecycle_folds_to_empty() {
        let data = fold(&[
            JournalEntry::Dirty("a".into()),
            JournalEntry::Clean("a".into()),
            JournalEntry::Dirty("b".into()),
            JournalEntry::Cancel("b".into()),
            JournalEntry::Clean("a".into()),
            JournalEntry::Remove("a".into()),
        ]);

        assert!(data.clean.is_empty());
        assert!(data.dirty.is_empty());
        assert_eq!(data.redundancy_count, 6);
    }

    #[test]
    fn read_moves_key_to_most_recent() {
        let data = fold(&[
            JournalEntry::Clean("a".into()),
            JournalEntry::Clean("b".into()),
            JournalEntry::Read("a".into()),
        ]);

        assert_eq!(data.clean, vec!["b".to_string(), "a".to_string()]);
        assert!(data.dirty.is_empty());
        assert_eq!(data.redundancy_count, 1);
    }

    #[test]
    fn clean_commits_an_in_flight_write() {
        let data = fold(&[
            JournalEntry::Dirty("a".into()),
            JournalEntry::Clean("a".into()),
        ]);

        assert_eq!(data.clean, vec!["a".to_string()]);
        assert!(data.dirty.is_empty());
        assert_eq!(data.redundancy_count, 1);
    }

    #[test]
    fn dirty_keeps_previous_committed_value_servable() {
        let data = fold(&[
            JournalEntry::Clean("a".into()),
            JournalEntry::Dirty("a".into()),
        ]);

        // The rewrite is in flight: the old value is still clean, the
        // new one is tracked as dirty.
        assert_eq!(data.clean, vec!["a".to_string()]);
        assert_eq!(data.dirty, vec!["a".to_string()]);
    }

    #[test]
    fn duplicate_dirty_entries_collapse() {
        let data = fold(&[
            JournalEntry::Dirty("a".into()),
            JournalEntry::Dirty("a".into()),
            JournalEntry::Dirty("b".into()),
        ]);

        assert_eq!(data.dirty, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(data.redundancy_count, 1);
    }

    #[test]
    fn remove_drops_key_from_both_sequences() {
        let data = fold(&[
            JournalEntry::Clean("a".into()),
            JournalEntry::Dirty("a".into()),
            JournalEntry::Remove("a".into()),
        ]);

        assert!(data.clean.is_empty());
        assert!(data.dirty.is_empty());
        assert_eq!(data.redundancy_count, 3);
    }

    #[test]
    fn read_of_unknown_key_appends_it() {
        // A Read for a key with no prior Clean still lands it in the
        // clean sequence; the fold applies transitions, it does not
        // second-guess the log.
        let data = fold(&[JournalEntry::Read("a".into())]);
        assert_eq!(data.clean, vec!["a".to_string()]);
        assert_eq!(data.redundancy_count, 0);
    }
}
