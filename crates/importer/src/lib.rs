//! Descriptor track importer
//!
//! Turns track descriptors announced by instrumented processes into
//! canonical, deduplicated track rows. The pieces, leaf-first:
//!
//! - [`reservation`]: one reservation per track uuid, idempotent upsert with
//!   shape validation
//! - [`identity`]: detects pid/tid reuse across descriptor uuids
//! - [`ancestry`]: the bounded ancestor path used to break hierarchy loops
//! - [`materializer`]: picks the track variant for a reservation and writes it
//! - [`counter`]: absolute values from incremental counter samples
//! - [`tracker`]: the [`TrackEventTracker`] session object tying it together
//!
//! ## Resolution flow
//!
//! ```text
//! reserve_descriptor_*_track()      (any order, repeated)
//!         |
//!         v
//! get_descriptor_track(uuid)
//!   memoized? ---------------------> TrackId
//!   reserved? -> resolve parent (recursive, bounded, loop-checked)
//!             -> identity reuse check (pid/tid tracks)
//!             -> materialize row, attach args, name
//!             -> memoize ---------> TrackId
//!   otherwise ---------------------> None
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod ancestry;
pub mod config;
pub mod counter;
pub mod identity;
pub mod materializer;
pub mod reservation;
mod resolver;
pub mod tracker;

pub use config::TrackerConfig;
pub use identity::{IdentityReuseResolver, ReuseCheck};
pub use materializer::ResolvedTrack;
pub use reservation::{DescriptorTrackReservation, ReservationStore, ReserveOutcome};
pub use tracker::TrackEventTracker;
