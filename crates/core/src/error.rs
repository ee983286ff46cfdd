//! Error types for collaborator contract violations
//!
//! Malformed trace input never produces an [`Error`]: it is absorbed by stats
//! counters and logs. An `Error` means a collaborator broke its contract, for
//! example the storage layer forgot a track id it handed out earlier.

use crate::types::{StringId, TrackId, UniquePid, UniqueTid};
use thiserror::Error;

/// Errors raised across the collaborator seams
#[derive(Debug, Error)]
pub enum Error {
    /// Track id not present in the track table
    #[error("unknown track: {0}")]
    UnknownTrack(TrackId),

    /// String handle not present in the string pool
    #[error("unknown string: {0}")]
    UnknownString(StringId),

    /// Logical thread not known to the identity tracker
    #[error("unknown thread: {0}")]
    UnknownThread(UniqueTid),

    /// Logical process not known to the identity tracker
    #[error("unknown process: {0}")]
    UnknownProcess(UniquePid),

    /// Configuration rejected
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Internal error (bug or invariant violation)
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type for trackforge operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if this error points at an id the caller should not have had
    pub fn is_unknown_id(&self) -> bool {
        matches!(
            self,
            Error::UnknownTrack(_)
                | Error::UnknownString(_)
                | Error::UnknownThread(_)
                | Error::UnknownProcess(_)
        )
    }

    /// Check if this is a serious/unrecoverable error
    pub fn is_serious(&self) -> bool {
        matches!(self, Error::Internal(_))
    }
}
