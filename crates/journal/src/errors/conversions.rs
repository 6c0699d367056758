//! Contextual construction of I/O errors

use super::types::{JournalError, RecoveryHint};
use std::io;
use std::path::Path;
use std::time::Duration;

impl JournalError {
    /// Wrap an I/O error with the file and operation it came from,
    /// deriving the recovery hint from the error kind.
    pub fn io(path: &Path, operation: &'static str, source: io::Error) -> Self {
        let recovery_hint = match source.kind() {
            io::ErrorKind::PermissionDenied => RecoveryHint::CheckPermissions {
                path: path.to_path_buf(),
            },
            io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut | io::ErrorKind::Interrupted => {
                RecoveryHint::Retry {
                    after: Duration::from_millis(100),
                }
            }
            _ => RecoveryHint::CheckDiskSpace,
        };

        Self::Io {
            path: path.to_path_buf(),
            operation,
            source,
            recovery_hint,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn permission_errors_point_at_the_offending_path() {
        let path = PathBuf::from("cache/journal");
        let err = JournalError::io(
            &path,
            "open journal file",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );

        match err.recovery_hint() {
            RecoveryHint::CheckPermissions { path: hinted } => assert_eq!(hinted, &path),
            other => panic!("expected permissions hint, got {other:?}"),
        }
        assert!(!err.is_corruption());
    }

    #[test]
    fn transient_kinds_map_to_retry() {
        let err = JournalError::io(
            Path::new("journal"),
            "write record payload",
            io::Error::new(io::ErrorKind::TimedOut, "timed out"),
        );
        assert!(err.is_transient());
    }
}
