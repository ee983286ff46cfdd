//! The ingestion session object
//!
//! [`TrackEventTracker`] owns every piece of mutable state descriptor track
//! resolution needs for one trace: reservations, the uuid -> track memo, the
//! pid/tid ownership maps and the collaborators it writes through. Nothing is
//! global; dropping the tracker tears the session down.
//!
//! Track resolution itself lives in the private `resolver` module and is
//! exposed through [`TrackEventTracker::get_descriptor_track`].

use crate::config::TrackerConfig;
use crate::identity::IdentityReuseResolver;
use crate::materializer::{DescriptorArgKeys, ResolvedTrack, TrackMaterializer};
use crate::reservation::{DescriptorTrackReservation, ReservationStore, ReserveOutcome};
use rustc_hash::FxHashMap;
use tracing::debug;
use trackforge_core::error::Result;
use trackforge_core::stats::Stat;
use trackforge_core::traits::{IdentityTracker, TraceSink};
use trackforge_core::types::StringId;

/// Descriptor track state for one ingestion session
///
/// `S` is the storage side (tracks, args, strings, stats) and `P` the
/// identity tracker mapping OS pids/tids to logical entities.
#[derive(Debug)]
pub struct TrackEventTracker<S, P> {
    pub(crate) storage: S,
    pub(crate) process_tracker: P,
    pub(crate) config: TrackerConfig,
    pub(crate) reservations: ReservationStore,
    pub(crate) resolved: FxHashMap<u64, ResolvedTrack>,
    pub(crate) identities: IdentityReuseResolver,
    pub(crate) materializer: TrackMaterializer,
}

impl<S: TraceSink, P: IdentityTracker> TrackEventTracker<S, P> {
    /// Create a tracker with the default configuration
    pub fn new(storage: S, process_tracker: P) -> Self {
        Self::build(storage, process_tracker, TrackerConfig::default())
    }

    /// Create a tracker with a validated configuration
    pub fn with_config(storage: S, process_tracker: P, config: TrackerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(storage, process_tracker, config))
    }

    fn build(mut storage: S, process_tracker: P, config: TrackerConfig) -> Self {
        let keys = DescriptorArgKeys::intern(&mut storage, &config.default_track_name);
        Self {
            storage,
            process_tracker,
            config,
            reservations: ReservationStore::new(),
            resolved: FxHashMap::default(),
            identities: IdentityReuseResolver::new(),
            materializer: TrackMaterializer::new(keys),
        }
    }

    // ========================================================================
    // Reservation
    // ========================================================================

    /// Announce the primary track of process `pid`
    pub fn reserve_descriptor_process_track(
        &mut self,
        uuid: u64,
        name: StringId,
        pid: u32,
        timestamp: i64,
    ) {
        self.reserve(
            uuid,
            DescriptorTrackReservation::process(pid, name, timestamp),
        );
    }

    /// Announce the primary track of thread `tid` in process `pid`
    pub fn reserve_descriptor_thread_track(
        &mut self,
        uuid: u64,
        parent_uuid: u64,
        name: StringId,
        pid: u32,
        tid: u32,
        timestamp: i64,
    ) {
        self.reserve(
            uuid,
            DescriptorTrackReservation::thread(parent_uuid, pid, tid, name, timestamp),
        );
    }

    /// Announce a counter track
    #[allow(clippy::too_many_arguments)]
    pub fn reserve_descriptor_counter_track(
        &mut self,
        uuid: u64,
        parent_uuid: u64,
        name: StringId,
        category: StringId,
        unit_multiplier: i64,
        is_incremental: bool,
        packet_sequence_id: u32,
    ) {
        self.reserve(
            uuid,
            DescriptorTrackReservation::counter(
                parent_uuid,
                name,
                category,
                unit_multiplier,
                is_incremental,
                packet_sequence_id,
            ),
        );
    }

    /// Announce a plain child track
    pub fn reserve_descriptor_child_track(&mut self, uuid: u64, parent_uuid: u64, name: StringId) {
        self.reserve(uuid, DescriptorTrackReservation::child(parent_uuid, name));
    }

    fn reserve(&mut self, uuid: u64, reservation: DescriptorTrackReservation) {
        if self.reservations.reserve(uuid, reservation) == ReserveOutcome::Conflict {
            debug!(
                uuid,
                parent_uuid = reservation.parent_uuid,
                pid = ?reservation.pid,
                tid = ?reservation.tid,
                is_counter = reservation.is_counter,
                "Track descriptor doesn't match previously reserved track"
            );
            self.storage.increment_stat(Stat::TrackEventTokenizerErrors);
        }
    }

    // ========================================================================
    // Counters
    // ========================================================================

    /// Absolute value of a counter sample on track `uuid`
    ///
    /// See [`ReservationStore::convert_to_absolute_counter_value`].
    pub fn convert_to_absolute_counter_value(
        &mut self,
        uuid: u64,
        packet_sequence_id: u32,
        value: i64,
    ) -> Option<i64> {
        self.reservations
            .convert_to_absolute_counter_value(uuid, packet_sequence_id, value)
    }

    /// Reset incremental counters bound to `packet_sequence_id`
    pub fn on_incremental_state_cleared(&mut self, packet_sequence_id: u32) {
        self.reservations
            .on_incremental_state_cleared(packet_sequence_id);
    }
}

impl<S, P> TrackEventTracker<S, P> {
    /// Reservation stored for `uuid`
    pub fn reservation(&self, uuid: u64) -> Option<&DescriptorTrackReservation> {
        self.reservations.get(uuid)
    }

    /// Number of reserved uuids
    pub fn reserved_count(&self) -> usize {
        self.reservations.len()
    }

    /// Number of uuids materialized so far
    pub fn resolved_count(&self) -> usize {
        self.resolved.len()
    }

    /// Track already materialized for `uuid`, without resolving
    pub fn resolved_track(&self, uuid: u64) -> Option<ResolvedTrack> {
        self.resolved.get(&uuid).copied()
    }

    /// Active configuration
    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Storage collaborator
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Storage collaborator, mutably
    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    /// Identity tracker collaborator
    pub fn process_tracker(&self) -> &P {
        &self.process_tracker
    }

    /// Identity tracker collaborator, mutably
    pub fn process_tracker_mut(&mut self) -> &mut P {
        &mut self.process_tracker
    }

    /// End the session, handing the collaborators back
    pub fn into_parts(self) -> (S, P) {
        (self.storage, self.process_tracker)
    }
}
