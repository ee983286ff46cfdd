//! Storage layer for trackforge
//!
//! This crate implements in-memory collaborators for the descriptor track
//! importer:
//! - TrackTable: dense track rows, interned primary thread/process tracks
//! - ArgsTable: key/value args per track
//! - StringPool: string interning with a reserved null handle
//! - StatsTable: named ingestion counters
//! - ProcessTracker: logical thread/process entities over reusable pid/tid
//! - TraceStorage: bundles the tables and implements `TraceSink`

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod args;
pub mod process;
pub mod stats;
pub mod strings;
pub mod trace_storage;
pub mod tracks;

pub use args::{Arg, ArgsTable};
pub use process::{ProcessEntry, ProcessTracker, ThreadEntry};
pub use stats::StatsTable;
pub use strings::StringPool;
pub use trace_storage::TraceStorage;
pub use tracks::TrackTable;
