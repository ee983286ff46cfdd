//! Convenient imports for Trackforge.
//!
//! This module re-exports the most commonly used types so you can get started
//! with a single import:
//!
//! ```
//! use trackforge::prelude::*;
//!
//! let mut session = TraceSession::new();
//! session.reserve_descriptor_child_track(7, 0, StringId::NULL);
//! assert!(session.resolve(7)?.is_some());
//! # Ok::<(), trackforge::Error>(())
//! ```

// Main entry point
pub use crate::session::{TraceSession, TraceSessionBuilder};

// Error handling
pub use crate::error::{Error, Result};

// Configuration
pub use trackforge_importer::TrackerConfig;

// Core types
pub use trackforge_core::{
    Stat, StringId, TrackFlavor, TrackId, TrackKind, UniquePid, UniqueTid, Variadic,
};

// Collaborator traits, for reading storage back
pub use trackforge_core::{ArgsStore, StatsSink, StringInterner, TrackStore};
