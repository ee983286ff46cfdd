//! Trace storage bundle
//!
//! `TraceStorage` groups the tables one ingestion session writes to and
//! implements every storage-side collaborator trait, so a single value can be
//! handed to the importer as its `TraceSink`.

use crate::args::{Arg, ArgsTable};
use crate::stats::StatsTable;
use crate::strings::StringPool;
use crate::tracks::TrackTable;
use serde_json::json;
use trackforge_core::error::Result;
use trackforge_core::stats::Stat;
use trackforge_core::traits::{ArgsStore, StatsSink, StringInterner, TrackStore};
use trackforge_core::types::{
    StringId, TrackFlavor, TrackId, TrackKind, TrackRow, UniquePid, UniqueTid,
};
use trackforge_core::value::Variadic;

/// In-memory storage for one trace
#[derive(Debug, Default)]
pub struct TraceStorage {
    tracks: TrackTable,
    args: ArgsTable,
    strings: StringPool,
    stats: StatsTable,
}

impl TraceStorage {
    /// Create empty storage
    pub fn new() -> Self {
        Self::default()
    }

    /// Track table
    pub fn tracks(&self) -> &TrackTable {
        &self.tracks
    }

    /// Args table
    pub fn args(&self) -> &ArgsTable {
        &self.args
    }

    /// String pool
    pub fn strings(&self) -> &StringPool {
        &self.strings
    }

    /// Stats table
    pub fn stats(&self) -> &StatsTable {
        &self.stats
    }

    /// Look up the value of arg `key` on `track`, by key string
    ///
    /// Returns `None` if the key was never interned or not set on the track.
    pub fn arg_by_name(&self, track: TrackId, key: &str) -> Option<Variadic> {
        let key = self.strings.lookup(key)?;
        self.args.get(track, key)
    }

    /// Display name of `track` as a string, `None` while unnamed
    pub fn track_name_str(&self, track: TrackId) -> Option<&str> {
        let name = self.tracks.get(track)?.name.non_null()?;
        self.strings.get(name)
    }

    /// Dump tracks, their args and non-zero stats as JSON for debugging
    pub fn snapshot_json(&self) -> serde_json::Value {
        let tracks: Vec<serde_json::Value> = self
            .tracks
            .rows()
            .iter()
            .map(|row| {
                let args: serde_json::Map<String, serde_json::Value> = self
                    .args
                    .args_for(row.id)
                    .iter()
                    .map(|arg| (self.string_or_id(arg.key), self.arg_json(arg)))
                    .collect();
                json!({
                    "id": row.id.value(),
                    "name": self.track_name_str(row.id),
                    "kind": row.kind.name(),
                    "counter": row.flavor.is_counter(),
                    "args": args,
                })
            })
            .collect();

        let stats: serde_json::Map<String, serde_json::Value> = self
            .stats
            .non_zero()
            .into_iter()
            .map(|(stat, value)| (stat.name().to_string(), json!(value)))
            .collect();

        json!({ "tracks": tracks, "stats": stats })
    }

    fn string_or_id(&self, id: StringId) -> String {
        self.strings
            .get(id)
            .map(str::to_owned)
            .unwrap_or_else(|| id.to_string())
    }

    fn arg_json(&self, arg: &Arg) -> serde_json::Value {
        match arg.value {
            Variadic::Integer(v) => json!(v),
            Variadic::String(id) => json!(self.string_or_id(id)),
        }
    }
}

impl TrackStore for TraceStorage {
    fn create_track(&mut self, kind: TrackKind, flavor: TrackFlavor) -> TrackId {
        self.tracks.insert(kind, flavor)
    }

    fn intern_thread_track(&mut self, utid: UniqueTid) -> TrackId {
        self.tracks.intern_thread_track(utid)
    }

    fn intern_process_track(&mut self, upid: UniquePid) -> TrackId {
        self.tracks.intern_process_track(upid)
    }

    fn track(&self, id: TrackId) -> Option<TrackRow> {
        self.tracks.get(id).copied()
    }

    fn set_track_name(&mut self, id: TrackId, name: StringId) -> Result<()> {
        self.tracks.set_name(id, name)
    }
}

impl ArgsStore for TraceStorage {
    fn add_arg(&mut self, track: TrackId, key: StringId, value: Variadic) -> Result<()> {
        if self.tracks.get(track).is_none() {
            return Err(trackforge_core::Error::UnknownTrack(track));
        }
        self.args.add(track, key, value);
        Ok(())
    }

    fn arg(&self, track: TrackId, key: StringId) -> Option<Variadic> {
        self.args.get(track, key)
    }
}

impl StringInterner for TraceStorage {
    fn intern_string(&mut self, s: &str) -> StringId {
        self.strings.intern(s)
    }

    fn string(&self, id: StringId) -> Option<&str> {
        self.strings.get(id)
    }
}

impl StatsSink for TraceStorage {
    fn increment_stat(&mut self, stat: Stat) {
        self.stats.increment(stat);
    }

    fn stat(&self, stat: Stat) -> u64 {
        self.stats.get(stat)
    }
}
