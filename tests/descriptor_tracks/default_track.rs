//! The session-wide default track

use crate::common::*;
use trackforge::prelude::*;

#[test]
fn rootless_global_track_is_parented_under_default() {
    let mut session = session();
    session.reserve_descriptor_child_track(99, 0, StringId::NULL);

    let track = resolve(&mut session, 99);
    let default = session.default_track().unwrap();

    assert_eq!(parent_track(&session, track), Some(default));
    assert_eq!(parent_track(&session, default), None);
    assert_eq!(session.track_name(default), Some("Default Track"));
    assert_eq!(session.storage().track(default).unwrap().kind, TrackKind::Global);
}

#[test]
fn default_track_is_a_singleton() {
    let mut session = session();
    session.reserve_descriptor_child_track(1, 0, StringId::NULL);
    session.reserve_descriptor_child_track(2, 0, StringId::NULL);

    let a = resolve(&mut session, 1);
    let b = resolve(&mut session, 2);
    let default = session.default_track().unwrap();

    assert_eq!(parent_track(&session, a), Some(default));
    assert_eq!(parent_track(&session, b), Some(default));
    assert_eq!(session.storage().tracks().len(), 3);
}

#[test]
fn primary_tracks_are_not_default_parented() {
    let mut session = session();
    session.reserve_descriptor_process_track(1, StringId::NULL, 5, 0);

    let track = resolve(&mut session, 1);

    assert_eq!(parent_track(&session, track), None);
    assert!(session.resolved_track(0).is_none());
}

#[test]
fn configured_default_name() {
    init_test_logging();
    let mut session = TraceSession::builder()
        .default_track_name("Global")
        .build()
        .unwrap();

    let default = session.default_track().unwrap();
    assert_eq!(session.track_name(default), Some("Global"));
}

#[test]
fn producer_may_describe_default_track() {
    let mut session = session();
    let name = session.intern("Async");
    session.reserve_descriptor_child_track(0, 0, name);
    session.reserve_descriptor_child_track(8, 0, StringId::NULL);

    let track = resolve(&mut session, 8);
    let default = session.default_track().unwrap();

    assert_eq!(session.track_name(default), Some("Async"));
    assert_eq!(parent_track(&session, track), Some(default));
}

#[test]
fn default_track_with_looping_parent() {
    let mut session = session();
    session.reserve_descriptor_child_track(0, 3, StringId::NULL);
    session.reserve_descriptor_child_track(3, 0, StringId::NULL);

    let track = resolve(&mut session, 3);
    let default = session.resolved_track(0).unwrap().id;

    assert_eq!(parent_track(&session, track), Some(default));
    assert_eq!(parent_track(&session, default), None);
    assert_eq!(session.stat(Stat::DescriptorTrackLoops), 1);
    assert_eq!(session.storage().tracks().len(), 2);
}

fn reserve_default_under_process(session: &mut TraceSession) {
    session.reserve_descriptor_process_track(500, StringId::NULL, 7, 0);
    session.reserve_descriptor_child_track(0, 500, StringId::NULL);
}

#[test]
fn default_track_parent_survives_deep_first_use() {
    let mut nested = session();
    reserve_default_under_process(&mut nested);
    // 1 -> 2 -> ... -> 10, the last one rootless
    reserve_chain(&mut nested, 1, 10);
    resolve(&mut nested, 1);
    let nested_default = nested.resolved_track(0).unwrap().id;

    let mut fresh = session();
    reserve_default_under_process(&mut fresh);
    let fresh_default = fresh.default_track().unwrap();

    for (session, default) in [(&nested, nested_default), (&fresh, fresh_default)] {
        let process = session.resolved_track(500).unwrap().id;
        assert_eq!(parent_track(session, default), Some(process));
        assert!(matches!(
            session.storage().track(default).unwrap().kind,
            TrackKind::Process(_)
        ));
        assert_eq!(session.stat(Stat::DescriptorTrackTooManyAncestors), 0);
    }
}
