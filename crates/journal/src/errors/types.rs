//! Core error types for the journal subsystem

use std::path::PathBuf;
use std::time::Duration;

/// Result type for journal operations
pub type Result<T> = std::result::Result<T, JournalError>;

/// Error type for journal operations
#[derive(Debug)]
pub enum JournalError {
    /// I/O errors during journal file operations
    Io {
        path: PathBuf,
        operation: &'static str,
        source: std::io::Error,
        recovery_hint: RecoveryHint,
    },

    /// Record encode/decode errors
    Serialization {
        path: PathBuf,
        operation: SerializationOp,
        source: Box<dyn std::error::Error + Send + Sync>,
        recovery_hint: RecoveryHint,
    },

    /// Journal corruption detected (bad magic, CRC mismatch, truncated frame)
    Corruption {
        path: PathBuf,
        reason: String,
        recovery_hint: RecoveryHint,
    },

    /// Journal was written by an incompatible format version
    VersionMismatch {
        path: PathBuf,
        expected_version: u32,
        actual_version: u32,
        recovery_hint: RecoveryHint,
    },
}

/// Recovery hints for error handling
#[derive(Debug, Clone)]
pub enum RecoveryHint {
    /// Retry the operation
    Retry { after: Duration },

    /// Check file permissions
    CheckPermissions { path: PathBuf },

    /// Check disk space and clean up if needed
    CheckDiskSpace,

    /// Discard the journal and rebuild the index from a full storage scan
    RebuildIndex,

    /// No automated recovery possible
    Manual { instructions: String },
}

/// Serialization operation types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SerializationOp {
    Encode,
    Decode,
}
