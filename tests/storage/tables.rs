//! Track, args, string and stats tables behind `TraceStorage`

use trackforge::prelude::*;
use trackforge::{TraceStorage, UniquePid, UniqueTid};

#[test]
fn six_track_variants_are_counted_separately() {
    let mut storage = TraceStorage::new();
    let scopes = [
        TrackKind::Global,
        TrackKind::Process(UniquePid::new(0)),
        TrackKind::Thread(UniqueTid::new(0)),
    ];
    for scope in scopes {
        storage.create_track(scope, TrackFlavor::Slice);
        storage.create_track(scope, TrackFlavor::Counter);
        storage.create_track(scope, TrackFlavor::Counter);
    }

    let tracks = storage.tracks();
    assert_eq!(tracks.len(), 9);
    for scope in scopes {
        assert_eq!(tracks.count(scope, TrackFlavor::Slice), 1);
        assert_eq!(tracks.count(scope, TrackFlavor::Counter), 2);
    }
}

#[test]
fn primary_tracks_are_interned_per_entity() {
    let mut storage = TraceStorage::new();
    let a = storage.intern_thread_track(UniqueTid::new(1));
    let b = storage.intern_thread_track(UniqueTid::new(1));
    let c = storage.intern_thread_track(UniqueTid::new(2));
    let p = storage.intern_process_track(UniquePid::new(1));

    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_ne!(a, p);
    assert_eq!(storage.tracks().thread_track(UniqueTid::new(2)), Some(c));
    assert_eq!(storage.tracks().process_track(UniquePid::new(1)), Some(p));
}

#[test]
fn naming_unknown_track_is_an_error() {
    let mut storage = TraceStorage::new();
    let name = storage.intern_string("x");
    let err = storage.set_track_name(TrackId::new(3), name).unwrap_err();
    assert!(err.is_unknown_id());
}

#[test]
fn args_on_unknown_track_are_rejected() {
    let mut storage = TraceStorage::new();
    let key = storage.intern_string("k");
    assert!(storage.add_arg(TrackId::new(0), key, Variadic::Integer(1)).is_err());
    assert!(storage.args().is_empty());
}

#[test]
fn args_read_back_by_key() {
    let mut storage = TraceStorage::new();
    let track = storage.create_track(TrackKind::Global, TrackFlavor::Slice);
    let key = storage.intern_string("source_id");
    storage.add_arg(track, key, Variadic::Integer(-5)).unwrap();

    assert_eq!(storage.arg(track, key), Some(Variadic::Integer(-5)));
    assert_eq!(storage.arg_by_name(track, "source_id"), Some(Variadic::Integer(-5)));
    assert_eq!(storage.arg_by_name(track, "never_interned"), None);
}

#[test]
fn empty_string_is_null() {
    let mut storage = TraceStorage::new();
    assert_eq!(storage.intern_string(""), StringId::NULL);
    let id = storage.intern_string("proc");
    assert_eq!(storage.intern_string("proc"), id);
    assert_eq!(storage.string(id), Some("proc"));
}

#[test]
fn stats_accumulate() {
    let mut storage = TraceStorage::new();
    storage.increment_stat(Stat::DescriptorTrackLoops);
    storage.increment_stat(Stat::DescriptorTrackLoops);
    storage.increment_stat(Stat::DescriptorTidReuse);

    assert_eq!(storage.stat(Stat::DescriptorTrackLoops), 2);
    assert_eq!(storage.stats().total_errors(), 2);
    assert_eq!(storage.stats().non_zero().len(), 2);
}

#[test]
fn snapshot_includes_stats() {
    let mut storage = TraceStorage::new();
    storage.increment_stat(Stat::TrackEventTokenizerErrors);

    let snapshot = storage.snapshot_json();
    assert_eq!(snapshot["stats"]["track_event_tokenizer_errors"], 1);
    assert!(snapshot["tracks"].as_array().unwrap().is_empty());
}
