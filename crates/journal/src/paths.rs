//! Journal file locations within a cache directory

use std::path::{Path, PathBuf};

/// Active journal file name. Stable on-disk contract: renaming any of
/// these breaks recovery of existing cache directories.
pub const JOURNAL_FILE: &str = "journal";

/// Temporary file a rewrite is staged into before it is swapped in.
pub const JOURNAL_FILE_TMP: &str = "journal.tmp";

/// Backup the previous journal is rotated to during a rewrite.
pub const JOURNAL_FILE_BACKUP: &str = "journal.bkp";

/// Resolved paths for the journal file triple of one cache directory
#[derive(Debug, Clone)]
pub struct JournalPaths {
    pub journal: PathBuf,
    pub tmp: PathBuf,
    pub backup: PathBuf,
}

impl JournalPaths {
    #[must_use]
    pub fn new(dir: &Path) -> Self {
        Self {
            journal: dir.join(JOURNAL_FILE),
            tmp: dir.join(JOURNAL_FILE_TMP),
            backup: dir.join(JOURNAL_FILE_BACKUP),
        }
    }
}
