//! # Trackforge
//!
//! Descriptor track resolution for trace ingestion.
//!
//! Instrumented processes describe their timeline tracks up front: a 64-bit
//! uuid per track, an optional parent uuid, and optionally the pid/tid the
//! track belongs to or the encoding of counter samples on it. Trackforge
//! turns these descriptors into a canonical, deduplicated track table.
//!
//! ## Quick Start
//!
//! ```
//! use trackforge::prelude::*;
//!
//! let mut session = TraceSession::new();
//!
//! // Descriptors may arrive in any order, any number of times
//! session.reserve_descriptor_process_track(1, StringId::NULL, 42, 0);
//! session.reserve_descriptor_counter_track(2, 1, StringId::NULL, StringId::NULL, 1000, true, 7);
//!
//! // Events resolve uuids lazily
//! let counter = session.resolve(2)?.unwrap();
//! assert_eq!(session.storage().track(counter).unwrap().flavor, TrackFlavor::Counter);
//!
//! // Incremental counter samples become absolute values
//! assert_eq!(session.convert_to_absolute_counter_value(2, 7, 3), Some(3000));
//! assert_eq!(session.convert_to_absolute_counter_value(2, 7, 2), Some(5000));
//! # Ok::<(), trackforge::Error>(())
//! ```
//!
//! ## Crates
//!
//! - `trackforge-core` - ids, the tagged track kind, stats and the
//!   collaborator traits
//! - `trackforge-storage` - in-memory tables and identity tracker
//! - `trackforge-importer` - reservation, hierarchy resolution, counter
//!   decoding

#![warn(missing_docs)]

mod error;
mod session;

pub mod prelude;

// Re-export main entry points
pub use error::{Error, Result};
pub use session::{SessionTracker, TraceSession, TraceSessionBuilder};

// Re-export member crate types
pub use trackforge_core::{
    Stat, StringId, TrackFlavor, TrackId, TrackKind, TrackRow, UniquePid, UniqueTid, Variadic,
};
pub use trackforge_importer::{DescriptorTrackReservation, ResolvedTrack, TrackerConfig};
pub use trackforge_storage::{ProcessTracker, TraceStorage};
