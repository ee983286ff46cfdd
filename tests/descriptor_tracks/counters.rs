//! Counter sample decoding through a session

use crate::common::*;
use proptest::prelude::*;
use trackforge::prelude::*;

fn incremental_session() -> TraceSession {
    let mut session = session();
    session.reserve_descriptor_counter_track(5, 0, StringId::NULL, StringId::NULL, 1000, true, 7);
    session
}

#[test]
fn incremental_counter_accumulates() {
    let mut session = incremental_session();

    assert_eq!(session.convert_to_absolute_counter_value(5, 7, 3), Some(3000));
    assert_eq!(session.reservation(5).unwrap().latest_value, 3000);
    assert_eq!(session.convert_to_absolute_counter_value(5, 7, 2), Some(5000));
}

#[test]
fn cleared_state_restarts_from_zero() {
    let mut session = incremental_session();
    session.convert_to_absolute_counter_value(5, 7, 3);
    session.convert_to_absolute_counter_value(5, 7, 2);

    session.on_incremental_state_cleared(7);

    assert_eq!(session.reservation(5).unwrap().latest_value, 0);
    assert_eq!(session.convert_to_absolute_counter_value(5, 7, 4), Some(4000));
}

#[test]
fn foreign_sequence_is_rejected() {
    let mut session = incremental_session();
    session.convert_to_absolute_counter_value(5, 7, 3);

    assert_eq!(session.convert_to_absolute_counter_value(5, 8, 1), None);
    assert_eq!(session.reservation(5).unwrap().latest_value, 3000);

    session.on_incremental_state_cleared(8);
    assert_eq!(session.reservation(5).unwrap().latest_value, 3000);
}

#[test]
fn decoding_does_not_need_resolution() {
    let mut session = incremental_session();
    session.convert_to_absolute_counter_value(5, 7, 1);
    assert_eq!(session.resolved_count(), 0);

    let track = resolve(&mut session, 5);
    assert_eq!(
        session.storage().track(track).unwrap().flavor,
        TrackFlavor::Counter
    );
    assert_eq!(session.convert_to_absolute_counter_value(5, 7, 1), Some(2000));
}

#[test]
fn non_counter_tracks_are_rejected() {
    let mut session = session();
    session.reserve_descriptor_process_track(1, StringId::NULL, 5, 0);

    assert_eq!(session.convert_to_absolute_counter_value(1, 0, 10), None);
    assert_eq!(session.convert_to_absolute_counter_value(2, 0, 10), None);
}

proptest! {
    #[test]
    fn absolute_counter_is_scaled_sample(
        multiplier in 1i64..10_000,
        sample in -1_000_000i64..1_000_000,
        sequence in any::<u32>(),
    ) {
        let mut session = TraceSession::new();
        session.reserve_descriptor_counter_track(
            9, 0, StringId::NULL, StringId::NULL, multiplier, false, 3,
        );
        prop_assert_eq!(
            session.convert_to_absolute_counter_value(9, sequence, sample),
            Some(sample * multiplier)
        );
        prop_assert_eq!(session.reservation(9).unwrap().latest_value, 0);
    }
}
