//! Journal record reader and writer
//!
//! Thin buffered wrappers over the frame codec in `format`. The writer is
//! used by the compactor and by the cache manager's normal append path;
//! the reader is used by the reconciler.

use crate::entry::JournalEntry;
use crate::errors::{JournalError, RecoveryHint, Result};
use crate::format::{self, JournalHeader};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

/// Writes a journal file: header first, then entry records
pub struct JournalWriter {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl JournalWriter {
    /// Create (truncating) a journal file and write its header
    pub fn create(path: &Path, version: u32) -> Result<Self> {
        let file =
            File::create(path).map_err(|e| JournalError::io(path, "create journal file", e))?;

        let mut writer = Self {
            path: path.to_path_buf(),
            writer: BufWriter::new(file),
        };
        format::write_frame(&mut writer.writer, &writer.path, &JournalHeader::new(version))?;
        Ok(writer)
    }

    /// Append one entry record
    pub fn write_entry(&mut self, entry: &JournalEntry) -> Result<()> {
        format::write_frame(&mut self.writer, &self.path, entry)
    }

    /// Flush buffered records and sync the file to disk.
    ///
    /// The compactor must not rename the file into place until this has
    /// returned; a rename of an unsynced file can surface as an empty or
    /// torn journal after a power loss.
    pub fn finish(self) -> Result<()> {
        let file = self
            .writer
            .into_inner()
            .map_err(|e| JournalError::io(&self.path, "flush journal file", e.into_error()))?;
        file.sync_all()
            .map_err(|e| JournalError::io(&self.path, "sync journal file", e))?;
        Ok(())
    }
}

/// Reads a journal file: validates the header, then streams entry records
pub struct JournalReader {
    path: PathBuf,
    reader: BufReader<File>,
}

impl JournalReader {
    /// Open a journal file and validate its header against the version
    /// the caller expects. The file handle is released on drop, on every
    /// path including header failure.
    pub fn open(path: &Path, expected_version: u32) -> Result<Self> {
        let file =
            File::open(path).map_err(|e| JournalError::io(path, "open journal file", e))?;

        let mut reader = Self {
            path: path.to_path_buf(),
            reader: BufReader::new(file),
        };

        let header: JournalHeader = format::read_frame(&mut reader.reader, &reader.path)?
            .ok_or_else(|| JournalError::Corruption {
                path: path.to_path_buf(),
                reason: "journal file has no header".to_string(),
                recovery_hint: RecoveryHint::RebuildIndex,
            })?;
        header.validate(&reader.path, expected_version)?;

        Ok(reader)
    }

    /// Read the next entry record, or `None` at end of stream
    pub fn next_entry(&mut self) -> Result<Option<JournalEntry>> {
        format::read_frame(&mut self.reader, &self.path)
    }
}
