//! Hierarchy resolution
//!
//! Turns a reserved uuid into a track row, resolving its ancestors first.
//! Every uuid is materialized at most once; the result is memoized for the
//! rest of the session.
//!
//! Parent links are followed recursively on an [`AncestorPath`]. A link is
//! dropped, with a warning and a stat, when it:
//!
//! - would make the chain longer than `max_ancestors`
//! - points back at a uuid already on the path
//! - names a uuid nobody reserved
//!
//! A track whose parent link is dropped is placed as if it never had one.

use crate::ancestry::AncestorPath;
use crate::materializer::ResolvedTrack;
use crate::reservation::DescriptorTrackReservation;
use crate::tracker::TrackEventTracker;
use tracing::warn;
use trackforge_core::error::Result;
use trackforge_core::stats::Stat;
use trackforge_core::traits::{IdentityTracker, TraceSink};
use trackforge_core::types::{StringId, TrackId, TrackKind, DEFAULT_DESCRIPTOR_TRACK_UUID};

impl<S: TraceSink, P: IdentityTracker> TrackEventTracker<S, P> {
    /// Track for `uuid`, materializing it and its ancestors on first use
    ///
    /// Returns `Ok(None)` if `uuid` was never reserved. A non-null
    /// `event_name` names the track after the event if the track is still
    /// unnamed and is not a process, thread or counter track.
    ///
    /// # Errors
    ///
    /// Only if a collaborator breaks its contract; malformed hierarchies are
    /// absorbed into stats.
    pub fn get_descriptor_track(
        &mut self,
        uuid: u64,
        event_name: StringId,
    ) -> Result<Option<TrackId>> {
        let mut path = AncestorPath::new();
        let Some(resolved) = self.get_descriptor_track_impl(uuid, &mut path)? else {
            return Ok(None);
        };

        if event_name.is_null() {
            return Ok(Some(resolved.id));
        }
        let has_fixed_name = self
            .reservations
            .get(uuid)
            .map_or(true, |reservation| reservation.has_fixed_name());
        if !has_fixed_name {
            self.name_if_unnamed(resolved.id, event_name)?;
        }
        Ok(Some(resolved.id))
    }

    /// The session-wide default track (uuid 0)
    ///
    /// Reserved as an unparented child track named after
    /// [`TrackerConfig::default_track_name`](crate::TrackerConfig) unless a
    /// producer already described it.
    pub fn get_or_create_default_descriptor_track(&mut self) -> Result<TrackId> {
        let mut path = AncestorPath::new();
        self.default_descriptor_track_impl(&mut path)
            .map(|resolved| resolved.id)
    }

    fn name_if_unnamed(&mut self, track: TrackId, name: StringId) -> Result<()> {
        if self.storage.track_name(track)?.is_null() {
            self.storage.set_track_name(track, name)?;
        }
        Ok(())
    }

    fn default_descriptor_track_impl(&mut self, path: &mut AncestorPath) -> Result<ResolvedTrack> {
        if let Some(resolved) =
            self.get_descriptor_track_impl(DEFAULT_DESCRIPTOR_TRACK_UUID, path)?
        {
            return Ok(resolved);
        }

        let name = self.materializer.keys().default_track_name;
        self.reserve_descriptor_child_track(DEFAULT_DESCRIPTOR_TRACK_UUID, 0, name);
        let reservation = DescriptorTrackReservation::child(0, name);
        self.materialize(DEFAULT_DESCRIPTOR_TRACK_UUID, reservation, path)
    }

    fn get_descriptor_track_impl(
        &mut self,
        uuid: u64,
        path: &mut AncestorPath,
    ) -> Result<Option<ResolvedTrack>> {
        if let Some(resolved) = self.resolved.get(&uuid) {
            return Ok(Some(*resolved));
        }
        let Some(reservation) = self.reservations.get(uuid).copied() else {
            return Ok(None);
        };
        self.materialize(uuid, reservation, path).map(Some)
    }

    /// Resolve, memoize and name
    fn materialize(
        &mut self,
        uuid: u64,
        reservation: DescriptorTrackReservation,
        path: &mut AncestorPath,
    ) -> Result<ResolvedTrack> {
        let resolved = self.resolve_descriptor_track(uuid, &reservation, path)?;
        self.resolved.insert(uuid, resolved);
        self.materializer
            .apply_reservation_name(&mut self.storage, resolved.id, reservation.name)?;
        Ok(resolved)
    }

    fn resolve_descriptor_track(
        &mut self,
        uuid: u64,
        reservation: &DescriptorTrackReservation,
        path: &mut AncestorPath,
    ) -> Result<ResolvedTrack> {
        let mut parent = None;
        if reservation.parent_uuid != 0 {
            parent = self.resolve_parent(uuid, reservation.parent_uuid, path)?;
        }

        let resolved = match (reservation.pid, reservation.tid) {
            (Some(pid), Some(tid)) => {
                let claim = self.identities.resolve_thread(
                    &mut self.process_tracker,
                    uuid,
                    pid,
                    tid,
                    reservation.min_timestamp,
                )?;
                if claim.reused {
                    self.storage.increment_stat(Stat::DescriptorTidReuse);
                }
                self.materializer
                    .thread_track(&mut self.storage, claim.entity)
            }
            (Some(pid), None) => {
                let claim = self.identities.resolve_process(
                    &mut self.process_tracker,
                    uuid,
                    pid,
                    reservation.min_timestamp,
                );
                if claim.reused {
                    self.storage.increment_stat(Stat::DescriptorPidReuse);
                }
                self.materializer
                    .process_track(&mut self.storage, claim.entity)
            }
            // A tid always comes with a pid; a stray one is placed like any
            // other scopeless track.
            (None, _) => match parent.and_then(|p: ResolvedTrack| p.child_scope()) {
                Some(scope) => self.materializer.create(&mut self.storage, scope, reservation),
                None => {
                    let track =
                        self.materializer
                            .create(&mut self.storage, TrackKind::Global, reservation);
                    if parent.is_none() && uuid != DEFAULT_DESCRIPTOR_TRACK_UUID {
                        parent = self.default_parent(uuid, path)?;
                    }
                    track
                }
            },
        };

        self.materializer.attach_args(
            &mut self.storage,
            resolved.id,
            uuid,
            parent.map(|p| p.id),
            reservation.category,
        )?;
        Ok(resolved)
    }

    /// Follow the parent link of `uuid`, or drop it
    fn resolve_parent(
        &mut self,
        uuid: u64,
        parent_uuid: u64,
        path: &mut AncestorPath,
    ) -> Result<Option<ResolvedTrack>> {
        let mut path = path.enter(uuid);

        if path.depth() > self.config.max_ancestors {
            warn!(
                uuid,
                parent_uuid, "Too many ancestors in parent_track_uuid hierarchy"
            );
            self.storage
                .increment_stat(Stat::DescriptorTrackTooManyAncestors);
            return Ok(None);
        }
        if path.contains(parent_uuid) {
            warn!(uuid, parent_uuid, "Loop detected in parent_track_uuid hierarchy");
            self.storage.increment_stat(Stat::DescriptorTrackLoops);
            return Ok(None);
        }

        let parent = self.get_descriptor_track_impl(parent_uuid, &mut path)?;
        if parent.is_none() {
            warn!(uuid, parent_uuid, "Unknown parent track");
            self.storage
                .increment_stat(Stat::DescriptorTrackUnknownParent);
        }
        Ok(parent)
    }

    /// Parent a rootless global track under the default track
    ///
    /// The default track may itself have been described with a parent. It is
    /// resolved with `uuid` on the path so the pair cannot recurse into each
    /// other, but its depth is counted from zero: where the default track
    /// lands must not depend on which chain first needed it.
    fn default_parent(
        &mut self,
        uuid: u64,
        path: &mut AncestorPath,
    ) -> Result<Option<ResolvedTrack>> {
        if path.contains(DEFAULT_DESCRIPTOR_TRACK_UUID) {
            warn!(
                uuid,
                parent_uuid = DEFAULT_DESCRIPTOR_TRACK_UUID,
                "Loop detected in parent_track_uuid hierarchy"
            );
            self.storage.increment_stat(Stat::DescriptorTrackLoops);
            return Ok(None);
        }
        let mut path = path.enter_root(uuid);
        self.default_descriptor_track_impl(&mut path).map(Some)
    }
}
