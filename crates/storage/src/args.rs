//! Per-track argument table
//!
//! Tracks usually carry a handful of args (source, source_id, parent, category),
//! so each track's list is a `SmallVec` that stays inline for the common case.

use rustc_hash::FxHashMap;
use serde::Serialize;
use smallvec::SmallVec;
use trackforge_core::types::{StringId, TrackId};
use trackforge_core::value::Variadic;

/// A single key/value pair attached to a track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Arg {
    /// Interned key
    pub key: StringId,
    /// Value
    pub value: Variadic,
}

/// Args of all tracks, in insertion order per track
#[derive(Debug, Default)]
pub struct ArgsTable {
    args: FxHashMap<TrackId, SmallVec<[Arg; 4]>>,
    total: usize,
}

impl ArgsTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `key = value` to the args of `track`
    pub fn add(&mut self, track: TrackId, key: StringId, value: Variadic) {
        self.args.entry(track).or_default().push(Arg { key, value });
        self.total += 1;
    }

    /// First value recorded for `key` on `track`
    pub fn get(&self, track: TrackId, key: StringId) -> Option<Variadic> {
        self.args
            .get(&track)?
            .iter()
            .find(|arg| arg.key == key)
            .map(|arg| arg.value)
    }

    /// All args of `track`, in insertion order
    pub fn args_for(&self, track: TrackId) -> &[Arg] {
        self.args.get(&track).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// Total number of args across all tracks
    pub fn len(&self) -> usize {
        self.total
    }

    /// Check if no args were recorded
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}
