//! Parent resolution: scoping, loops, depth bound, unknown parents

use crate::common::*;
use trackforge::prelude::*;

#[test]
fn child_of_thread_track_is_thread_scoped() {
    let mut session = session();
    session.reserve_descriptor_thread_track(1, 0, StringId::NULL, 5, 9, 0);
    session.reserve_descriptor_child_track(2, 1, StringId::NULL);

    let child = resolve(&mut session, 2);
    let thread = session.resolved_track(1).unwrap();

    let row = session.storage().track(child).unwrap();
    assert_eq!(row.kind, thread.kind);
    assert!(matches!(row.kind, TrackKind::Thread(_)));
    assert_eq!(parent_track(&session, child), Some(thread.id));
}

#[test]
fn counter_under_process_is_process_counter() {
    let mut session = session();
    session.reserve_descriptor_process_track(1, StringId::NULL, 5, 0);
    session.reserve_descriptor_counter_track(2, 1, StringId::NULL, StringId::NULL, 1, false, 0);

    let counter = resolve(&mut session, 2);
    let row = session.storage().track(counter).unwrap();

    assert!(matches!(row.kind, TrackKind::Process(_)));
    assert_eq!(row.flavor, TrackFlavor::Counter);
}

#[test]
fn child_of_global_track_is_global() {
    let mut session = session();
    session.reserve_descriptor_child_track(1, 0, StringId::NULL);
    session.reserve_descriptor_child_track(2, 1, StringId::NULL);

    let child = resolve(&mut session, 2);
    let parent = session.resolved_track(1).unwrap().id;

    assert_eq!(session.storage().track(child).unwrap().kind, TrackKind::Global);
    assert_eq!(parent_track(&session, child), Some(parent));
}

#[test]
fn parent_loop_terminates() {
    let mut session = session();
    session.reserve_descriptor_child_track(10, 11, StringId::NULL);
    session.reserve_descriptor_child_track(11, 10, StringId::NULL);

    let track = resolve(&mut session, 10);
    let other = session.resolved_track(11).unwrap().id;
    let default = session.resolved_track(0).unwrap().id;

    assert_eq!(session.stat(Stat::DescriptorTrackLoops), 1);
    // The link closing the loop is dropped; 11 falls back to the default track.
    assert_eq!(parent_track(&session, other), Some(default));
    assert_eq!(parent_track(&session, track), Some(other));

    // Resolving the other end afterwards is a memo hit.
    assert_eq!(resolve(&mut session, 11), other);
    assert_eq!(session.stat(Stat::DescriptorTrackLoops), 1);
}

#[test]
fn deep_chain_is_cut_at_bound() {
    let mut session = session();
    // 1 -> 2 -> ... -> 12
    reserve_chain(&mut session, 1, 12);

    resolve(&mut session, 1);

    assert_eq!(session.stat(Stat::DescriptorTrackTooManyAncestors), 1);
    for uuid in 1..=11 {
        assert!(session.resolved_track(uuid).is_some(), "uuid {} unresolved", uuid);
    }
    // The 11th ancestor link was dropped, so 12 was never reached.
    assert!(session.resolved_track(12).is_none());
    let eleventh = session.resolved_track(11).unwrap().id;
    let default = session.resolved_track(0).unwrap().id;
    assert_eq!(parent_track(&session, eleventh), Some(default));
}

#[test]
fn very_deep_chain_does_not_overflow() {
    let mut session = session();
    reserve_chain(&mut session, 1, 10_000);

    for uuid in (1..=10_000).rev().step_by(997) {
        resolve(&mut session, uuid);
    }
    assert!(session.stat(Stat::DescriptorTrackTooManyAncestors) > 0);
}

#[test]
fn bound_is_configurable() {
    init_test_logging();
    let mut session = TraceSession::builder().max_ancestors(3).build().unwrap();
    reserve_chain(&mut session, 1, 6);

    resolve(&mut session, 1);

    assert_eq!(session.stat(Stat::DescriptorTrackTooManyAncestors), 1);
    assert!(session.resolved_track(4).is_some());
    assert!(session.resolved_track(5).is_none());
}

#[test]
fn unknown_parent_is_recovered() {
    let mut session = session();
    session.reserve_descriptor_child_track(3, 777, StringId::NULL);

    let track = resolve(&mut session, 3);
    let default = session.default_track().unwrap();

    assert_eq!(session.stat(Stat::DescriptorTrackUnknownParent), 1);
    assert_eq!(parent_track(&session, track), Some(default));
}

#[test]
fn descriptor_args_recorded() {
    let mut session = session();
    let category = session.intern("memory");
    session.reserve_descriptor_process_track(1, StringId::NULL, 5, 0);
    session.reserve_descriptor_counter_track(2, 1, StringId::NULL, category, 1, false, 0);

    let counter = resolve(&mut session, 2);
    let storage = session.storage();
    let descriptor = storage.strings().lookup("descriptor").unwrap();

    assert_eq!(
        storage.arg_by_name(counter, "source"),
        Some(Variadic::String(descriptor))
    );
    assert_eq!(storage.arg_by_name(counter, "source_id"), Some(Variadic::Integer(2)));
    assert_eq!(
        storage.arg_by_name(counter, "category"),
        Some(Variadic::String(category))
    );
    assert_eq!(
        parent_track(&session, counter),
        Some(session.resolved_track(1).unwrap().id)
    );
}

#[test]
fn event_name_applies_once_to_unnamed_child() {
    let mut session = session();
    session.reserve_descriptor_child_track(4, 0, StringId::NULL);

    let track = session.resolve_for_event(4, "Compose").unwrap().unwrap();
    session.resolve_for_event(4, "Draw").unwrap();

    assert_eq!(session.track_name(track), Some("Compose"));
}

#[test]
fn event_name_does_not_override_descriptor_name() {
    let mut session = session();
    let name = session.intern("GPU");
    session.reserve_descriptor_child_track(4, 0, name);

    let track = session.resolve_for_event(4, "Draw").unwrap().unwrap();
    assert_eq!(session.track_name(track), Some("GPU"));
}

#[test]
fn snapshot_lists_every_track() {
    let mut session = session();
    session.reserve_descriptor_thread_track(1, 0, StringId::NULL, 5, 9, 0);
    session.reserve_descriptor_child_track(2, 1, StringId::NULL);
    resolve(&mut session, 2);

    let snapshot = session.snapshot_json();
    let tracks = snapshot["tracks"].as_array().unwrap();
    assert_eq!(tracks.len(), 2);
    assert!(tracks.iter().all(|t| t["kind"] == "thread"));
    assert_eq!(tracks[1]["args"]["source"], "descriptor");
}
