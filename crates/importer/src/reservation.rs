//! Descriptor track reservations
//!
//! A descriptor announces the shape of a track before any event references
//! it. The same uuid is typically announced many times (once per packet
//! sequence, once per incremental state reset), so reservation is an upsert:
//!
//! - first sight: stored as-is
//! - same shape again: `min_timestamp` is lowered, everything else dropped
//! - different shape: the original wins and the caller is told about the
//!   conflict
//!
//! The *shape* of a track is its parent uuid, pid, tid and counter-ness.
//! Names, categories and counter encoding are not part of it.

use rustc_hash::FxHashMap;
use std::collections::hash_map::Entry;
use trackforge_core::types::StringId;

/// The declared shape of a track, before it is materialized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DescriptorTrackReservation {
    /// Uuid of the enclosing track, 0 for none
    pub parent_uuid: u64,
    /// OS process id
    pub pid: Option<u32>,
    /// OS thread id; implies `pid`
    pub tid: Option<u32>,
    /// Earliest timestamp the uuid was referenced at
    ///
    /// Only process and thread reservations carry one.
    pub min_timestamp: Option<i64>,
    /// Display name
    pub name: StringId,
    /// Category, counters only
    pub category: StringId,
    /// Track carries numeric samples
    pub is_counter: bool,
    /// Scale factor for raw counter samples, ignored when not positive
    pub unit_multiplier: i64,
    /// Counter samples are deltas
    pub is_incremental: bool,
    /// Sequence owning the incremental state, 0 when not incremental
    pub packet_sequence_id: u32,
    /// Running total of an incremental counter
    pub latest_value: i64,
}

impl DescriptorTrackReservation {
    /// Reservation for the primary track of a process
    pub fn process(pid: u32, name: StringId, timestamp: i64) -> Self {
        Self {
            pid: Some(pid),
            name,
            min_timestamp: Some(timestamp),
            ..Self::default()
        }
    }

    /// Reservation for the primary track of a thread
    pub fn thread(parent_uuid: u64, pid: u32, tid: u32, name: StringId, timestamp: i64) -> Self {
        Self {
            parent_uuid,
            pid: Some(pid),
            tid: Some(tid),
            name,
            min_timestamp: Some(timestamp),
            ..Self::default()
        }
    }

    /// Reservation for a counter track
    ///
    /// Incremental counters are bound to the sequence that announced them;
    /// absolute counters accept samples from any sequence.
    pub fn counter(
        parent_uuid: u64,
        name: StringId,
        category: StringId,
        unit_multiplier: i64,
        is_incremental: bool,
        packet_sequence_id: u32,
    ) -> Self {
        Self {
            parent_uuid,
            name,
            category,
            is_counter: true,
            unit_multiplier,
            is_incremental,
            packet_sequence_id: if is_incremental { packet_sequence_id } else { 0 },
            ..Self::default()
        }
    }

    /// Reservation for a plain child track
    pub fn child(parent_uuid: u64, name: StringId) -> Self {
        Self {
            parent_uuid,
            name,
            ..Self::default()
        }
    }

    /// Check if `other` describes the same track shape
    pub fn is_for_same_track(&self, other: &DescriptorTrackReservation) -> bool {
        self.parent_uuid == other.parent_uuid
            && self.pid == other.pid
            && self.tid == other.tid
            && self.is_counter == other.is_counter
    }

    /// Check if the track name is owned by the descriptor
    ///
    /// Primary process/thread tracks and counter tracks keep their name;
    /// other tracks may be named after the first event on them.
    pub fn has_fixed_name(&self) -> bool {
        self.pid.is_some() || self.tid.is_some() || self.is_counter
    }
}

/// Result of a reservation upsert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReserveOutcome {
    /// First reservation for this uuid
    Inserted,
    /// Same shape as the stored reservation; timestamps merged
    Merged,
    /// Different shape; the stored reservation was kept unchanged
    Conflict,
}

/// Reservations keyed by uuid
#[derive(Debug, Default)]
pub struct ReservationStore {
    pub(crate) reservations: FxHashMap<u64, DescriptorTrackReservation>,
}

impl ReservationStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Upsert `reservation` under `uuid`
    pub fn reserve(&mut self, uuid: u64, reservation: DescriptorTrackReservation) -> ReserveOutcome {
        let existing = match self.reservations.entry(uuid) {
            Entry::Vacant(slot) => {
                slot.insert(reservation);
                return ReserveOutcome::Inserted;
            }
            Entry::Occupied(slot) => slot.into_mut(),
        };

        if !existing.is_for_same_track(&reservation) {
            return ReserveOutcome::Conflict;
        }

        if let (Some(old), Some(new)) = (existing.min_timestamp, reservation.min_timestamp) {
            existing.min_timestamp = Some(old.min(new));
        }
        ReserveOutcome::Merged
    }

    /// Reservation for `uuid`
    pub fn get(&self, uuid: u64) -> Option<&DescriptorTrackReservation> {
        self.reservations.get(&uuid)
    }

    /// Check if `uuid` was reserved
    pub fn contains(&self, uuid: u64) -> bool {
        self.reservations.contains_key(&uuid)
    }

    /// Number of reserved uuids
    pub fn len(&self) -> usize {
        self.reservations.len()
    }

    /// Check if nothing was reserved
    pub fn is_empty(&self) -> bool {
        self.reservations.is_empty()
    }
}
