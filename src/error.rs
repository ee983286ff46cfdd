//! Unified error types for Trackforge.
//!
//! Wraps the collaborator errors of the member crates in one stable type for
//! callers of the facade.

use thiserror::Error;

/// All Trackforge errors.
///
/// Malformed trace input is never an error; see [`Stat`](crate::Stat) for how
/// it is reported. These variants mean the session was misconfigured or a
/// storage backend broke its contract.
#[derive(Debug, Error)]
pub enum Error {
    /// An id handed out earlier is no longer known to storage
    #[error("not found: {0}")]
    NotFound(String),

    /// Configuration rejected
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Internal error (bug or invariant violation)
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type for Trackforge operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if this is a not-found error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }

    /// Check if this is a serious/unrecoverable error.
    pub fn is_serious(&self) -> bool {
        matches!(self, Error::Internal(_))
    }
}

// Convert from member crate errors
impl From<trackforge_core::Error> for Error {
    fn from(e: trackforge_core::Error) -> Self {
        use trackforge_core::Error as CoreError;
        match e {
            CoreError::UnknownTrack(id) => Error::NotFound(format!("track {}", id)),
            CoreError::UnknownString(id) => Error::NotFound(format!("string {}", id)),
            CoreError::UnknownThread(utid) => Error::NotFound(format!("thread {}", utid)),
            CoreError::UnknownProcess(upid) => Error::NotFound(format!("process {}", upid)),
            CoreError::InvalidConfig(msg) => Error::InvalidConfig(msg),
            CoreError::Internal(msg) => Error::Internal(msg),
        }
    }
}
