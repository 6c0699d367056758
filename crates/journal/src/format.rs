//! On-disk journal format: header and record framing
//!
//! Every frame (the header and each entry record) is written as a
//! little-endian `u32` payload length, the bincode-encoded payload, and a
//! trailing little-endian `u32` CRC32C of the payload. End-of-stream is
//! only valid exactly at a frame boundary; anything else is corruption.

use crate::errors::{JournalError, RecoveryHint, Result, SerializationOp};
use crc32c::crc32c;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::io::{self, Read, Write};
use std::path::Path;

/// Magic number for journal files: "JRNL"
pub const JOURNAL_MAGIC: u32 = 0x4A52_4E4C;

/// Current journal format version
pub const JOURNAL_VERSION: u32 = 1;

/// Upper bound on a single frame's payload. Cache keys are short; a
/// larger length prefix means we are reading garbage.
pub const MAX_FRAME_LEN: usize = 1024 * 1024;

/// Journal file header, always the first frame in the file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalHeader {
    magic: u32,
    version: u32,
}

impl JournalHeader {
    #[must_use]
    pub const fn new(version: u32) -> Self {
        Self {
            magic: JOURNAL_MAGIC,
            version,
        }
    }

    /// Validate the header against the version the caller expects.
    ///
    /// A bad magic number is corruption; a well-formed header with a
    /// different version is a version mismatch. Both are hard read
    /// failures — the caller rebuilds from a full scan instead.
    pub fn validate(&self, path: &Path, expected_version: u32) -> Result<()> {
        if self.magic != JOURNAL_MAGIC {
            return Err(JournalError::Corruption {
                path: path.to_path_buf(),
                reason: format!(
                    "invalid magic number: expected {JOURNAL_MAGIC:08x}, got {:08x}",
                    self.magic
                ),
                recovery_hint: RecoveryHint::RebuildIndex,
            });
        }

        if self.version != expected_version {
            return Err(JournalError::VersionMismatch {
                path: path.to_path_buf(),
                expected_version,
                actual_version: self.version,
                recovery_hint: RecoveryHint::RebuildIndex,
            });
        }

        Ok(())
    }
}

/// Write one length-prefixed, checksummed frame
pub fn write_frame<W: Write, T: Serialize>(
    writer: &mut W,
    path: &Path,
    value: &T,
) -> Result<()> {
    let payload = bincode::serialize(value).map_err(|e| JournalError::Serialization {
        path: path.to_path_buf(),
        operation: SerializationOp::Encode,
        source: Box::new(e),
        recovery_hint: RecoveryHint::Manual {
            instructions: "Check journal record encoding".to_string(),
        },
    })?;

    // A frame the reader would reject must never reach the file; once
    // the compactor swaps such a journal in, every subsequent open fails.
    if payload.len() > MAX_FRAME_LEN {
        return Err(JournalError::Corruption {
            path: path.to_path_buf(),
            reason: format!(
                "record payload of {} bytes exceeds frame limit",
                payload.len()
            ),
            recovery_hint: RecoveryHint::Manual {
                instructions: "Journal keys must be shorter than the frame limit".to_string(),
            },
        });
    }
    let len = payload.len() as u32;

    writer
        .write_all(&len.to_le_bytes())
        .map_err(|e| JournalError::io(path, "write record length", e))?;
    writer
        .write_all(&payload)
        .map_err(|e| JournalError::io(path, "write record payload", e))?;
    writer
        .write_all(&crc32c(&payload).to_le_bytes())
        .map_err(|e| JournalError::io(path, "write record checksum", e))?;

    Ok(())
}

/// Read the next frame, or `None` on clean end-of-stream.
///
/// EOF while reading the length prefix of a fresh frame is the normal end
/// of the journal; EOF anywhere inside a frame means a torn write.
pub fn read_frame<R: Read, T: DeserializeOwned>(reader: &mut R, path: &Path) -> Result<Option<T>> {
    let mut len_bytes = [0u8; 4];
    match reader.read_exact(&mut len_bytes) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => return Ok(None),
        Err(e) => return Err(JournalError::io(path, "read record length", e)),
    }

    let len = u32::from_le_bytes(len_bytes) as usize;
    if len > MAX_FRAME_LEN {
        return Err(JournalError::Corruption {
            path: path.to_path_buf(),
            reason: format!("record length {len} exceeds frame limit"),
            recovery_hint: RecoveryHint::RebuildIndex,
        });
    }

    let mut payload = vec![0u8; len];
    let mut crc_bytes = [0u8; 4];
    let truncated = |e: io::Error| {
        if e.kind() == io::ErrorKind::UnexpectedEof {
            JournalError::Corruption {
                path: path.to_path_buf(),
                reason: "journal truncated mid-record".to_string(),
                recovery_hint: RecoveryHint::RebuildIndex,
            }
        } else {
            JournalError::io(path, "read record", e)
        }
    };
    reader.read_exact(&mut payload).map_err(truncated)?;
    reader.read_exact(&mut crc_bytes).map_err(truncated)?;

    let expected_crc = u32::from_le_bytes(crc_bytes);
    let actual_crc = crc32c(&payload);
    if actual_crc != expected_crc {
        return Err(JournalError::Corruption {
            path: path.to_path_buf(),
            reason: format!(
                "record checksum mismatch: expected {expected_crc:08x}, got {actual_crc:08x}"
            ),
            recovery_hint: RecoveryHint::RebuildIndex,
        });
    }

    let value = bincode::deserialize(&payload).map_err(|e| JournalError::Serialization {
        path: path.to_path_buf(),
        operation: SerializationOp::Decode,
        source: Box::new(e),
        recovery_hint: RecoveryHint::RebuildIndex,
    })?;

    Ok(Some(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::path::PathBuf;

    #[test]
    fn frame_round_trip() {
        let path = PathBuf::from("journal");
        let mut buf = Vec::new();
        write_frame(&mut buf, &path, &JournalHeader::new(JOURNAL_VERSION)).unwrap();

        let mut cursor = Cursor::new(buf);
        let header: JournalHeader = read_frame(&mut cursor, &path).unwrap().unwrap();
        assert_eq!(header, JournalHeader::new(JOURNAL_VERSION));

        // Next read sees a clean end-of-stream
        let next: Option<JournalHeader> = read_frame(&mut cursor, &path).unwrap();
        assert!(next.is_none());
    }

    #[test]
    fn corrupted_payload_fails_checksum() {
        let path = PathBuf::from("journal");
        let mut buf = Vec::new();
        write_frame(&mut buf, &path, &JournalHeader::new(JOURNAL_VERSION)).unwrap();
        buf[5] ^= 0xFF;

        let result: Result<Option<JournalHeader>> = read_frame(&mut Cursor::new(buf), &path);
        match result {
            Err(JournalError::Corruption { .. }) => {}
            other => panic!("expected corruption error, got {other:?}"),
        }
    }

    #[test]
    fn truncated_frame_is_corruption() {
        let path = PathBuf::from("journal");
        let mut buf = Vec::new();
        write_frame(&mut buf, &path, &JournalHeader::new(JOURNAL_VERSION)).unwrap();
        buf.truncate(buf.len() - 2);

        let result: Result<Option<JournalHeader>> = read_frame(&mut Cursor::new(buf), &path);
        match result {
            Err(JournalError::Corruption { .. }) => {}
            other => panic!("expected corruption error, got {other:?}"),
        }
    }

    #[test]
    fn oversized_payload_is_rejected_before_writing() {
        let path = PathBuf::from("journal");
        let mut buf = Vec::new();
        let payload = vec![0u8; MAX_FRAME_LEN + 1];

        match write_frame(&mut buf, &path, &payload) {
            Err(JournalError::Corruption { .. }) => {}
            other => panic!("expected corruption error, got {other:?}"),
        }
        assert!(buf.is_empty(), "no partial frame may reach the stream");
    }

    #[test]
    fn header_rejects_wrong_version() {
        let path = PathBuf::from("journal");
        let header = JournalHeader::new(2);
        match header.validate(&path, JOURNAL_VERSION) {
            Err(JournalError::VersionMismatch {
                expected_version: 1,
                actual_version: 2,
                ..
            }) => {}
            other => panic!("expected version mismatch, got {other:?}"),
        }
    }
}
