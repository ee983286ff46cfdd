//! Track materialization
//!
//! Picks which of the six track variants a reservation becomes and writes the
//! row, its bookkeeping args and its name through the storage traits.
//!
//! ## Variant selection
//!
//! | Reservation | Resolved parent | Row |
//! |-------------|-----------------|-----|
//! | tid set | any | primary track of the thread |
//! | pid set | any | primary track of the process |
//! | neither | thread slice track | new thread-scoped track |
//! | neither | process slice track | new process-scoped track |
//! | neither | other / none | new global track |
//!
//! Counter-ness of the new row follows the reservation. Counter parents do
//! not pass their scope on: a child of a thread counter track is global.

use crate::reservation::DescriptorTrackReservation;
use trackforge_core::error::Result;
use trackforge_core::traits::{ArgsStore, StringInterner, TrackStore};
use trackforge_core::types::{StringId, TrackFlavor, TrackId, TrackKind, UniquePid, UniqueTid};
use trackforge_core::value::Variadic;

/// A materialized descriptor track
///
/// Carries the variant of the row so children can be placed without looking
/// the parent up again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedTrack {
    /// Row in the track table
    pub id: TrackId,
    /// Scope of the row
    pub kind: TrackKind,
    /// Slice or counter
    pub flavor: TrackFlavor,
}

impl ResolvedTrack {
    /// Scope that a non-primary child of this track inherits
    ///
    /// Only slice tracks owned by a thread or process pass their scope on.
    pub fn child_scope(&self) -> Option<TrackKind> {
        match (self.kind, self.flavor) {
            (TrackKind::Thread(utid), TrackFlavor::Slice) => Some(TrackKind::Thread(utid)),
            (TrackKind::Process(upid), TrackFlavor::Slice) => Some(TrackKind::Process(upid)),
            _ => None,
        }
    }
}

/// Interned arg keys and values used on every descriptor track
#[derive(Debug, Clone, Copy)]
pub(crate) struct DescriptorArgKeys {
    pub source: StringId,
    pub source_id: StringId,
    pub parent_track_id: StringId,
    pub category: StringId,
    pub descriptor_source: StringId,
    pub default_track_name: StringId,
}

impl DescriptorArgKeys {
    pub fn intern<S: StringInterner>(storage: &mut S, default_track_name: &str) -> Self {
        Self {
            source: storage.intern_string("source"),
            source_id: storage.intern_string("source_id"),
            parent_track_id: storage.intern_string("parent_track_id"),
            category: storage.intern_string("category"),
            descriptor_source: storage.intern_string("descriptor"),
            default_track_name: storage.intern_string(default_track_name),
        }
    }
}

/// Writes descriptor tracks to storage
#[derive(Debug, Clone, Copy)]
pub(crate) struct TrackMaterializer {
    keys: DescriptorArgKeys,
}

impl TrackMaterializer {
    pub fn new(keys: DescriptorArgKeys) -> Self {
        Self { keys }
    }

    pub fn keys(&self) -> &DescriptorArgKeys {
        &self.keys
    }

    /// Primary track of a logical thread
    pub fn thread_track<S: TrackStore>(&self, storage: &mut S, utid: UniqueTid) -> ResolvedTrack {
        ResolvedTrack {
            id: storage.intern_thread_track(utid),
            kind: TrackKind::Thread(utid),
            flavor: TrackFlavor::Slice,
        }
    }

    /// Primary track of a logical process
    pub fn process_track<S: TrackStore>(&self, storage: &mut S, upid: UniquePid) -> ResolvedTrack {
        ResolvedTrack {
            id: storage.intern_process_track(upid),
            kind: TrackKind::Process(upid),
            flavor: TrackFlavor::Slice,
        }
    }

    /// New track in `scope`, counter or slice per the reservation
    pub fn create<S: TrackStore>(
        &self,
        storage: &mut S,
        scope: TrackKind,
        reservation: &DescriptorTrackReservation,
    ) -> ResolvedTrack {
        let flavor = TrackFlavor::from_is_counter(reservation.is_counter);
        ResolvedTrack {
            id: storage.create_track(scope, flavor),
            kind: scope,
            flavor,
        }
    }

    /// Record where a descriptor track came from
    pub fn attach_args<S: ArgsStore>(
        &self,
        storage: &mut S,
        track: TrackId,
        uuid: u64,
        parent: Option<TrackId>,
        category: StringId,
    ) -> Result<()> {
        storage.add_arg(
            track,
            self.keys.source,
            Variadic::String(self.keys.descriptor_source),
        )?;
        // Uuids are opaque 64-bit values; reinterpret rather than saturate.
        storage.add_arg(track, self.keys.source_id, Variadic::Integer(uuid as i64))?;
        if let Some(parent) = parent {
            storage.add_arg(
                track,
                self.keys.parent_track_id,
                Variadic::Integer(i64::from(parent.value())),
            )?;
        }
        if !category.is_null() {
            storage.add_arg(track, self.keys.category, Variadic::String(category))?;
        }
        Ok(())
    }

    /// Set the name announced by the descriptor, if any
    pub fn apply_reservation_name<S: TrackStore>(
        &self,
        storage: &mut S,
        track: TrackId,
        name: StringId,
    ) -> Result<()> {
        if name.is_null() {
            return Ok(());
        }
        storage.set_track_name(track, name)
    }
}
