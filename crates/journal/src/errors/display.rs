//! Display implementations for journal errors

use super::types::JournalError;
use std::fmt;

impl fmt::Display for JournalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io {
                path,
                operation,
                source,
                ..
            } => write!(
                f,
                "I/O error during {} on '{}': {}",
                operation,
                path.display(),
                source
            ),
            Self::Serialization {
                path,
                operation,
                source,
                ..
            } => write!(
                f,
                "Failed to {operation:?} journal record in '{}': {source}",
                path.display()
            ),
            Self::Corruption { path, reason, .. } => {
                write!(f, "Journal corruption in '{}': {reason}", path.display())
            }
            Self::VersionMismatch {
                path,
                expected_version,
                actual_version,
                ..
            } => write!(
                f,
                "Journal version mismatch in '{}': expected v{expected_version}, found v{actual_version}",
                path.display()
            ),
        }
    }
}

impl std::error::Error for JournalError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Serialization { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}
