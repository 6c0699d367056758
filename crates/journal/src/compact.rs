//! Atomic journal rewrite (compaction)
//!
//! Replaces a grown journal with a minimal snapshot: one `Clean` record
//! per valid key and one `Dirty` record per in-flight key. The swap uses
//! a backup rotation so that at every instant, including after a crash at
//! any step, the directory holds at least one complete valid journal;
//! `recovery::resolve_journal` can finish the swap from any intermediate
//! state.

use crate::codec::JournalWriter;
use crate::entry::JournalEntry;
use crate::errors::Result;
use crate::paths::JournalPaths;
use crate::recovery::{remove_if_exists, rename_file};
use std::path::Path;
use tracing::debug;

/// Write a minimal journal for `clean` and `dirty` and atomically swap it
/// in as the directory's main journal.
///
/// On failure the directory still satisfies the crash-safety invariant:
/// whatever step died, either the old journal is intact or the backup
/// rotation left a state the resolver restores on the next open.
pub fn write_journal_atomically(dir: &Path, clean: &[String], dirty: &[String]) -> Result<()> {
    write_journal_with_version(dir, clean, dirty, crate::format::JOURNAL_VERSION)
}

/// As [`write_journal_atomically`], with an explicit format version
pub fn write_journal_with_version(
    dir: &Path,
    clean: &[String],
    dirty: &[String],
    version: u32,
) -> Result<()> {
    let paths = JournalPaths::new(dir);

    // Step 1: a leftover temporary file is always stale.
    remove_if_exists(&paths.tmp, "delete stale temporary journal")?;

    // Step 2: stage the new journal. finish() flushes and syncs; the
    // temporary file is a complete valid journal before any rename runs.
    let mut writer = JournalWriter::create(&paths.tmp, version)?;
    for key in clean {
        writer.write_entry(&JournalEntry::Clean(key.clone()))?;
    }
    for key in dirty {
        writer.write_entry(&JournalEntry::Dirty(key.clone()))?;
    }
    writer.finish()?;

    // Step 3: retire the current journal. From here until step 4 the
    // backup is the only complete journal; the resolver restores it if
    // we die in between.
    if paths.journal.exists() {
        rename_file(&paths.journal, &paths.backup, "retire journal to backup")?;
    }

    // Step 4: activate the new journal.
    rename_file(&paths.tmp, &paths.journal, "activate new journal")?;

    // Step 5: the backup is now redundant.
    remove_if_exists(&paths.backup, "delete journal backup")?;

    debug!(
        journal = %paths.journal.display(),
        clean = clean.len(),
        dirty = dirty.len(),
        "journal compacted"
    );

    Ok(())
}
