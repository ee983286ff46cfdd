//! Collaborator contracts
//!
//! The importer owns none of the data it produces. Track rows, arguments,
//! strings, statistics and thread/process identities live behind these
//! traits, so the resolution logic can run against any backend that honors
//! them. `trackforge-storage` provides the in-memory implementations.
//!
//! All methods take `&mut self` or `&self`: ingestion is strictly sequential,
//! so implementations need no interior mutability.

use crate::error::{Error, Result};
use crate::stats::Stat;
use crate::types::{StringId, TrackFlavor, TrackId, TrackKind, TrackRow, UniquePid, UniqueTid};
use crate::value::Variadic;

/// Track table with its six variants (global/process/thread x slice/counter)
pub trait TrackStore {
    /// Insert a new row and return its id
    fn create_track(&mut self, kind: TrackKind, flavor: TrackFlavor) -> TrackId;

    /// Return the primary slice track of a thread, creating it on first use
    fn intern_thread_track(&mut self, utid: UniqueTid) -> TrackId;

    /// Return the primary slice track of a process, creating it on first use
    fn intern_process_track(&mut self, upid: UniquePid) -> TrackId;

    /// Look up a row by id
    fn track(&self, id: TrackId) -> Option<TrackRow>;

    /// Overwrite the name column of a row
    fn set_track_name(&mut self, id: TrackId, name: StringId) -> Result<()>;

    /// Read the name column of a row
    fn track_name(&self, id: TrackId) -> Result<StringId> {
        self.track(id)
            .map(|row| row.name)
            .ok_or(Error::UnknownTrack(id))
    }
}

/// Side-channel key/value metadata on tracks
pub trait ArgsStore {
    /// Record `key = value` on `track`
    fn add_arg(&mut self, track: TrackId, key: StringId, value: Variadic) -> Result<()>;

    /// Read back the value recorded for `key` on `track`
    fn arg(&self, track: TrackId, key: StringId) -> Option<Variadic>;
}

/// String interning
pub trait StringInterner {
    /// Return the stable handle for `s`, interning it on first use
    ///
    /// The empty string always maps to [`StringId::NULL`].
    fn intern_string(&mut self, s: &str) -> StringId;

    /// Resolve a handle back to its string
    fn string(&self, id: StringId) -> Option<&str>;
}

/// Named statistics counters
pub trait StatsSink {
    /// Bump `stat` by one
    fn increment_stat(&mut self, stat: Stat);

    /// Current value of `stat`
    fn stat(&self, stat: Stat) -> u64;
}

/// Owner of logical thread and process entities
///
/// Maps raw OS pid/tid values, which the kernel recycles, onto logical
/// entities that each describe one lifetime.
pub trait IdentityTracker {
    /// Map `(tid, pid)` to a logical thread, associating it with the process
    /// for `pid`
    fn update_thread(&mut self, tid: u32, pid: u32) -> UniqueTid;

    /// Start a fresh logical thread for `tid`, detached from any previous one
    ///
    /// The new thread is not associated with a process until the next
    /// [`update_thread`](IdentityTracker::update_thread).
    fn start_new_thread(&mut self, start_ts: Option<i64>, tid: u32) -> UniqueTid;

    /// Map `pid` to its current logical process, creating one if needed
    fn get_or_create_process(&mut self, pid: u32) -> UniquePid;

    /// Start a fresh logical process for `pid`, replacing the current one
    fn start_new_process(
        &mut self,
        start_ts: Option<i64>,
        parent: Option<UniquePid>,
        pid: u32,
        name: StringId,
    ) -> UniquePid;
}

/// Everything the importer needs from the storage side
pub trait TraceSink: TrackStore + ArgsStore + StringInterner + StatsSink {}

impl<T> TraceSink for T where T: TrackStore + ArgsStore + StringInterner + StatsSink {}
