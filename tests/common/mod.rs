//! Shared helpers for integration tests

#![allow(dead_code)]

use std::sync::Once;
use trackforge::prelude::*;

static INIT_LOGGING: Once = Once::new();

/// Route `tracing` output through the test harness
pub fn init_test_logging() {
    INIT_LOGGING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .with_target(true)
            .with_ansi(false)
            .try_init();
    });
}

/// Fresh session with default configuration and test logging
pub fn session() -> TraceSession {
    init_test_logging();
    TraceSession::new()
}

/// Resolve a uuid that is known to be reserved
pub fn resolve(session: &mut TraceSession, uuid: u64) -> TrackId {
    session
        .resolve(uuid)
        .expect("resolution failed")
        .unwrap_or_else(|| panic!("uuid {} not reserved", uuid))
}

/// Value of the `parent_track_id` arg of `track`
pub fn parent_track(session: &TraceSession, track: TrackId) -> Option<TrackId> {
    session
        .storage()
        .arg_by_name(track, "parent_track_id")
        .and_then(|value| value.as_integer())
        .map(|id| TrackId::new(id as u32))
}

/// Reserve a chain `first -> first+1 -> ... -> first+len-1` of child tracks
///
/// The last link has no parent.
pub fn reserve_chain(session: &mut TraceSession, first: u64, len: u64) {
    for uuid in first..first + len {
        let parent = if uuid + 1 < first + len { uuid + 1 } else { 0 };
        session.reserve_descriptor_child_track(uuid, parent, StringId::NULL);
    }
}
