//! Track table
//!
//! A single dense table holds all six track variants. The variant of a row is
//! carried by its [`TrackKind`] and [`TrackFlavor`] columns rather than by
//! separate tables, so callers pattern-match instead of probing membership.
//!
//! # Design
//!
//! - Vec of rows: `TrackId` is the row index, O(1) lookups
//! - FxHashMap per scope: one primary slice track per thread and per process

use rustc_hash::FxHashMap;
use trackforge_core::error::{Error, Result};
use trackforge_core::types::{
    StringId, TrackFlavor, TrackId, TrackKind, TrackRow, UniquePid, UniqueTid,
};

/// Dense table of track rows
#[derive(Debug, Default)]
pub struct TrackTable {
    rows: Vec<TrackRow>,
    /// Primary slice track per logical thread
    thread_tracks: FxHashMap<UniqueTid, TrackId>,
    /// Primary slice track per logical process
    process_tracks: FxHashMap<UniquePid, TrackId>,
}

impl TrackTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new unnamed row
    pub fn insert(&mut self, kind: TrackKind, flavor: TrackFlavor) -> TrackId {
        let id = TrackId::new(self.rows.len() as u32);
        self.rows.push(TrackRow {
            id,
            name: StringId::NULL,
            kind,
            flavor,
        });
        id
    }

    /// Primary slice track of `utid`, inserted on first use
    pub fn intern_thread_track(&mut self, utid: UniqueTid) -> TrackId {
        if let Some(id) = self.thread_tracks.get(&utid) {
            return *id;
        }
        let id = self.insert(TrackKind::Thread(utid), TrackFlavor::Slice);
        self.thread_tracks.insert(utid, id);
        id
    }

    /// Primary slice track of `upid`, inserted on first use
    pub fn intern_process_track(&mut self, upid: UniquePid) -> TrackId {
        if let Some(id) = self.process_tracks.get(&upid) {
            return *id;
        }
        let id = self.insert(TrackKind::Process(upid), TrackFlavor::Slice);
        self.process_tracks.insert(upid, id);
        id
    }

    /// Look up a row by id
    #[inline]
    pub fn get(&self, id: TrackId) -> Option<&TrackRow> {
        self.rows.get(id.index())
    }

    /// Overwrite the name column of a row
    pub fn set_name(&mut self, id: TrackId, name: StringId) -> Result<()> {
        let row = self
            .rows
            .get_mut(id.index())
            .ok_or(Error::UnknownTrack(id))?;
        row.name = name;
        Ok(())
    }

    /// Primary track of `utid`, if one was interned
    pub fn thread_track(&self, utid: UniqueTid) -> Option<TrackId> {
        self.thread_tracks.get(&utid).copied()
    }

    /// Primary track of `upid`, if one was interned
    pub fn process_track(&self, upid: UniquePid) -> Option<TrackId> {
        self.process_tracks.get(&upid).copied()
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the table is empty
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All rows in id order
    pub fn rows(&self) -> &[TrackRow] {
        &self.rows
    }

    /// Count rows matching a scope and flavor
    ///
    /// `kind` is compared by variant only: any `Thread(_)` matches
    /// `TrackKind::Thread(_)`.
    pub fn count(&self, kind: TrackKind, flavor: TrackFlavor) -> usize {
        self.rows
            .iter()
            .filter(|row| {
                std::mem::discriminant(&row.kind) == std::mem::discriminant(&kind)
                    && row.flavor == flavor
            })
            .count()
    }
}
