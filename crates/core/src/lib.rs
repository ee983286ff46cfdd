//! Core types for trackforge
//!
//! This crate defines the vocabulary shared by the storage backend and the
//! descriptor track importer:
//! - [`types`]: identifier newtypes ([`TrackId`], [`StringId`], [`UniqueTid`],
//!   [`UniquePid`]) and the tagged [`TrackKind`] of a stored track
//! - [`value`]: [`Variadic`] argument values attached to tracks
//! - [`stats`]: named [`Stat`] counters for recoverable ingestion anomalies
//! - [`traits`]: contracts of the collaborators the importer talks to
//! - [`error`]: the [`Error`] type for collaborator contract violations

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod stats;
pub mod traits;
pub mod types;
pub mod value;

pub use error::{Error, Result};
pub use stats::Stat;
pub use traits::{ArgsStore, IdentityTracker, StatsSink, StringInterner, TraceSink, TrackStore};
pub use types::{
    StringId, TrackFlavor, TrackId, TrackKind, TrackRow, UniquePid, UniqueTid,
    DEFAULT_DESCRIPTOR_TRACK_UUID,
};
pub use value::Variadic;
