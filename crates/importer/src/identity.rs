//! Pid/tid reuse detection
//!
//! A descriptor track is the unique handle of one thread or process lifetime.
//! If a second uuid resolves to a logical thread/process that already belongs
//! to another uuid, the OS must have recycled the pid/tid, so a fresh logical
//! entity is started for the new uuid.
//!
//! Entity creation itself is delegated to the [`IdentityTracker`]; this
//! module only remembers which uuid owns which entity.

use rustc_hash::FxHashMap;
use tracing::debug;
use trackforge_core::error::{Error, Result};
use trackforge_core::traits::IdentityTracker;
use trackforge_core::types::{StringId, UniquePid, UniqueTid};

/// Outcome of claiming a logical entity for a uuid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReuseCheck<T> {
    /// The entity now owned by the uuid
    pub entity: T,
    /// A new entity had to be started because the previous one was taken
    pub reused: bool,
}

/// Owner uuid of each logical thread and process
#[derive(Debug, Default)]
pub struct IdentityReuseResolver {
    uuids_by_utid: FxHashMap<UniqueTid, u64>,
    uuids_by_upid: FxHashMap<UniquePid, u64>,
}

impl IdentityReuseResolver {
    /// Create a resolver with no claims
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the logical thread for `(pid, tid)` on behalf of `uuid`
    pub fn resolve_thread<P: IdentityTracker>(
        &mut self,
        tracker: &mut P,
        uuid: u64,
        pid: u32,
        tid: u32,
        timestamp: Option<i64>,
    ) -> Result<ReuseCheck<UniqueTid>> {
        let utid = tracker.update_thread(tid, pid);
        let old_uuid = match self.uuids_by_utid.get(&utid).copied() {
            None => {
                self.uuids_by_utid.insert(utid, uuid);
                return Ok(ReuseCheck { entity: utid, reused: false });
            }
            Some(owner) if owner == uuid => {
                return Ok(ReuseCheck { entity: utid, reused: false });
            }
            Some(owner) => owner,
        };

        debug!(
            pid,
            tid,
            old_uuid,
            uuid,
            ?timestamp,
            "Detected tid reuse from track descriptors"
        );

        let fresh = tracker.start_new_thread(None, tid);
        let associated = tracker.update_thread(tid, pid);
        if associated != fresh {
            return Err(Error::Internal(format!(
                "identity tracker returned {} instead of freshly started {} for tid {}",
                associated, fresh, tid
            )));
        }

        self.uuids_by_utid.insert(fresh, uuid);
        Ok(ReuseCheck { entity: fresh, reused: true })
    }

    /// Claim the logical process for `pid` on behalf of `uuid`
    pub fn resolve_process<P: IdentityTracker>(
        &mut self,
        tracker: &mut P,
        uuid: u64,
        pid: u32,
        timestamp: Option<i64>,
    ) -> ReuseCheck<UniquePid> {
        let upid = tracker.get_or_create_process(pid);
        let old_uuid = match self.uuids_by_upid.get(&upid).copied() {
            None => {
                self.uuids_by_upid.insert(upid, uuid);
                return ReuseCheck { entity: upid, reused: false };
            }
            Some(owner) if owner == uuid => {
                return ReuseCheck { entity: upid, reused: false };
            }
            Some(owner) => owner,
        };

        debug!(
            pid,
            old_uuid,
            uuid,
            ?timestamp,
            "Detected pid reuse from track descriptors"
        );

        let fresh = tracker.start_new_process(None, None, pid, StringId::NULL);
        self.uuids_by_upid.insert(fresh, uuid);
        ReuseCheck { entity: fresh, reused: true }
    }

    /// Uuid owning `utid`, if any
    pub fn thread_owner(&self, utid: UniqueTid) -> Option<u64> {
        self.uuids_by_utid.get(&utid).copied()
    }

    /// Uuid owning `upid`, if any
    pub fn process_owner(&self, upid: UniquePid) -> Option<u64> {
        self.uuids_by_upid.get(&upid).copied()
    }
}
