//! Descriptor Track Integration Tests
//!
//! End-to-end behavior of a `TraceSession`: reservation upserts, hierarchy
//! resolution, pid/tid reuse, counter decoding and the default track.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test --test descriptor_tracks
//!
//! # Hierarchy tests only
//! cargo test --test descriptor_tracks hierarchy::
//! ```

#[path = "../common/mod.rs"]
mod common;

mod counters;
mod default_track;
mod hierarchy;
mod reservations;
