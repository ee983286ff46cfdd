//! Reservation upserts and resolve-once

use crate::common::*;
use proptest::prelude::*;
use trackforge::prelude::*;

#[test]
fn repeated_identical_reservation_matches_single() {
    let mut once = session();
    once.reserve_descriptor_thread_track(1, 0, StringId::NULL, 100, 200, 1000);

    let mut twice = session();
    twice.reserve_descriptor_thread_track(1, 0, StringId::NULL, 100, 200, 1000);
    twice.reserve_descriptor_thread_track(1, 0, StringId::NULL, 100, 200, 1000);

    assert_eq!(once.reservation(1), twice.reservation(1));
    assert_eq!(once.reserved_count(), twice.reserved_count());
    assert_eq!(twice.stat(Stat::TrackEventTokenizerErrors), 0);
}

#[test]
fn conflicting_thread_reservation_keeps_original() {
    let mut session = session();
    session.reserve_descriptor_thread_track(1, 0, StringId::NULL, 100, 200, 1000);
    session.reserve_descriptor_thread_track(1, 0, StringId::NULL, 100, 201, 1000);

    let kept = session.reservation(1).unwrap();
    assert_eq!(kept.pid, Some(100));
    assert_eq!(kept.tid, Some(200));
    assert_eq!(session.stat(Stat::TrackEventTokenizerErrors), 1);
}

#[test]
fn conflicting_parent_is_detected() {
    let mut session = session();
    session.reserve_descriptor_child_track(5, 1, StringId::NULL);
    session.reserve_descriptor_child_track(5, 2, StringId::NULL);
    session.reserve_descriptor_child_track(5, 1, StringId::NULL);

    assert_eq!(session.reservation(5).unwrap().parent_uuid, 1);
    assert_eq!(session.stat(Stat::TrackEventTokenizerErrors), 1);
}

#[test]
fn resolve_twice_creates_one_row() {
    let mut session = session();
    session.reserve_descriptor_thread_track(1, 0, StringId::NULL, 100, 200, 1000);

    let first = resolve(&mut session, 1);
    let rows = session.storage().tracks().len();
    let second = resolve(&mut session, 1);

    assert_eq!(first, second);
    assert_eq!(session.storage().tracks().len(), rows);
    assert_eq!(session.resolved_count(), 1);
}

#[test]
fn reservation_after_resolution_does_not_move_track() {
    let mut session = session();
    session.reserve_descriptor_process_track(1, StringId::NULL, 100, 50);
    let track = resolve(&mut session, 1);

    session.reserve_descriptor_process_track(1, StringId::NULL, 100, 10);

    assert_eq!(session.reservation(1).unwrap().min_timestamp, Some(10));
    assert_eq!(resolve(&mut session, 1), track);
}

#[test]
fn unreserved_uuid_resolves_to_nothing() {
    let mut session = session();
    assert_eq!(session.resolve(1234).unwrap(), None);
    assert_eq!(session.resolved_count(), 0);
}

proptest! {
    #[test]
    fn min_timestamp_is_minimum_of_reservations(
        timestamps in proptest::collection::vec(any::<i64>(), 1..16)
    ) {
        let mut session = TraceSession::new();
        for ts in &timestamps {
            session.reserve_descriptor_thread_track(1, 0, StringId::NULL, 100, 200, *ts);
        }
        prop_assert_eq!(
            session.reservation(1).unwrap().min_timestamp,
            timestamps.iter().copied().min()
        );
        prop_assert_eq!(session.stat(Stat::TrackEventTokenizerErrors), 0);
    }
}
