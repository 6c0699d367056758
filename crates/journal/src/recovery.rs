//! Crash recovery for the journal file triple
//!
//! A rewrite that dies partway through can leave any combination of the
//! main, temporary, and backup files behind. This module resolves that
//! set into a single consistent main file (or no journal at all) before
//! anything is read. Backup rotation here is the only place where an
//! ambiguous on-disk state is resolved silently; every other component
//! propagates failures unchanged.

use crate::errors::{JournalError, Result};
use crate::paths::JournalPaths;
use std::fs;
use std::io;
use std::path::Path;
use tracing::{debug, warn};

/// Reconcile the journal file triple of `paths`.
///
/// Returns `true` if a main journal file exists afterwards, `false` if
/// the directory holds no journal (fresh or empty cache). Never creates
/// files.
pub fn resolve_journal(paths: &JournalPaths) -> Result<bool> {
    if paths.backup.exists() {
        if paths.journal.exists() {
            // The rewrite completed; only the final backup cleanup was
            // lost. The main file is already the one to trust.
            debug!(backup = %paths.backup.display(), "discarding leftover journal backup");
            remove_if_exists(&paths.backup, "delete journal backup")?;
        } else {
            // The old main was retired but the new one never activated.
            // Restore the pre-rewrite journal.
            warn!(
                backup = %paths.backup.display(),
                "journal missing after interrupted rewrite, restoring backup"
            );
            rename_file(&paths.backup, &paths.journal, "restore journal backup")?;
        }
    }

    // The temporary file is either an incomplete write or one that was
    // already swapped in under another name. It must never be read.
    remove_if_exists(&paths.tmp, "delete temporary journal")?;

    Ok(paths.journal.exists())
}

/// Delete a file, treating "already absent" as success
pub(crate) fn remove_if_exists(path: &Path, operation: &'static str) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(JournalError::io(path, operation, e)),
    }
}

/// Atomically rename `from` onto `to`
pub(crate) fn rename_file(from: &Path, to: &Path, operation: &'static str) -> Result<()> {
    fs::rename(from, to).map_err(|e| JournalError::io(from, operation, e))
}
