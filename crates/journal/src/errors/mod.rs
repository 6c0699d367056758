//! Error handling for the journal subsystem
//!
//! This module provides structured error types with recovery hints
//! so the wrapping cache manager can decide between retrying,
//! rebuilding its index from a full scan, or surfacing the failure.

mod conversions;
mod display;
mod recovery;
mod types;

pub use types::{JournalError, RecoveryHint, Result, SerializationOp};
