//! Crash-safe write-ahead journal for a disk-resident cache
//!
//! The journal records cache-entry lifecycle events (write started,
//! committed, cancelled, removed, read) so that after a restart the
//! cache's valid-key set and recency order can be rebuilt without
//! scanning every stored payload. This crate owns:
//! - crash recovery over the main/temporary/backup file triple
//! - reconciliation of the entry stream into a clean/dirty snapshot
//! - atomic compaction back into a minimal journal
//!
//! It does not store payloads, decide when to compact, or coordinate
//! concurrent writers; the caller serializes all access to a directory.

mod codec;
mod compact;
mod entry;
mod errors;
mod format;
mod paths;
mod reconcile;
mod recovery;

pub use codec::{JournalReader, JournalWriter};
pub use compact::{write_journal_atomically, write_journal_with_version};
pub use entry::JournalEntry;
pub use errors::{JournalError, RecoveryHint, Result, SerializationOp};
pub use format::{JournalHeader, JOURNAL_MAGIC, JOURNAL_VERSION, MAX_FRAME_LEN};
pub use paths::{JournalPaths, JOURNAL_FILE, JOURNAL_FILE_BACKUP, JOURNAL_FILE_TMP};
pub use reconcile::{read_journal_if_exists, JournalData};
pub use recovery::resolve_journal;
