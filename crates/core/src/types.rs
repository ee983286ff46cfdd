//! Core types for track resolution
//!
//! This module defines the fundamental identifiers used throughout the system:
//! - [`TrackId`]: Row identifier in the track table
//! - [`StringId`]: Handle to an interned string
//! - [`UniqueTid`] / [`UniquePid`]: Logical thread/process entities
//! - [`TrackKind`]: Which scope a stored track belongs to

use serde::{Deserialize, Serialize};

/// Uuid of the session-wide default descriptor track.
///
/// Global tracks without a parent are attached below this track. A producer
/// may also emit a descriptor for it explicitly.
pub const DEFAULT_DESCRIPTOR_TRACK_UUID: u64 = 0;

/// Identifier of a row in the track table
///
/// Ids are dense and assigned in insertion order, starting at zero.
///
/// # Examples
///
/// ```
/// use trackforge_core::types::TrackId;
///
/// let id = TrackId::new(3);
/// assert_eq!(id.value(), 3);
/// assert_eq!(id.to_string(), "track#3");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TrackId(u32);

impl TrackId {
    /// Create a TrackId from its raw row index
    pub const fn new(value: u32) -> Self {
        TrackId(value)
    }

    /// Raw row index
    pub const fn value(&self) -> u32 {
        self.0
    }

    /// Row index as a `usize`, for indexing dense tables
    pub const fn index(&self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for TrackId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "track#{}", self.0)
    }
}

/// Handle to an interned string
///
/// `StringId::NULL` stands for "no string" and always maps to the empty
/// string in the pool.
///
/// # Examples
///
/// ```
/// use trackforge_core::types::StringId;
///
/// assert!(StringId::NULL.is_null());
/// assert!(!StringId::new(7).is_null());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct StringId(u32);

impl StringId {
    /// The absent string
    pub const NULL: StringId = StringId(0);

    /// Create a StringId from its raw pool index
    pub const fn new(value: u32) -> Self {
        StringId(value)
    }

    /// Raw pool index
    pub const fn value(&self) -> u32 {
        self.0
    }

    /// Check if this handle stands for "no string"
    pub const fn is_null(&self) -> bool {
        self.0 == 0
    }

    /// `None` for the null handle, `Some(self)` otherwise
    pub fn non_null(self) -> Option<StringId> {
        if self.is_null() {
            None
        } else {
            Some(self)
        }
    }
}

impl std::fmt::Display for StringId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "str#{}", self.0)
    }
}

/// Logical thread entity
///
/// Distinct from the OS tid: a reused tid maps to a new `UniqueTid`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UniqueTid(u32);

impl UniqueTid {
    /// Create a UniqueTid from its raw index
    pub const fn new(value: u32) -> Self {
        UniqueTid(value)
    }

    /// Raw index
    pub const fn value(&self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for UniqueTid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "utid#{}", self.0)
    }
}

/// Logical process entity
///
/// Distinct from the OS pid: a reused pid maps to a new `UniquePid`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UniquePid(u32);

impl UniquePid {
    /// Create a UniquePid from its raw index
    pub const fn new(value: u32) -> Self {
        UniquePid(value)
    }

    /// Raw index
    pub const fn value(&self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for UniquePid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "upid#{}", self.0)
    }
}

/// Scope of a stored track
///
/// Together with [`TrackFlavor`] this selects one of the six track table
/// variants: global, process or thread, each either slice or counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrackKind {
    /// Not associated with any process or thread
    Global,
    /// Owned by a logical process
    Process(UniquePid),
    /// Owned by a logical thread
    Thread(UniqueTid),
}

impl TrackKind {
    /// Stable name of the scope, used in logs and dumps
    pub const fn name(&self) -> &'static str {
        match self {
            TrackKind::Global => "global",
            TrackKind::Process(_) => "process",
            TrackKind::Thread(_) => "thread",
        }
    }
}

/// What a track carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TrackFlavor {
    /// Span and instant events
    #[default]
    Slice,
    /// Numeric samples
    Counter,
}

impl TrackFlavor {
    /// Counter if `is_counter`, slice otherwise
    pub const fn from_is_counter(is_counter: bool) -> Self {
        if is_counter {
            TrackFlavor::Counter
        } else {
            TrackFlavor::Slice
        }
    }

    /// Check if this is a counter track
    pub const fn is_counter(&self) -> bool {
        matches!(self, TrackFlavor::Counter)
    }
}

/// A row of the track table, as seen by the importer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackRow {
    /// Row identifier
    pub id: TrackId,
    /// Display name, `StringId::NULL` while unnamed
    pub name: StringId,
    /// Scope of the track
    pub kind: TrackKind,
    /// Slice or counter
    pub flavor: TrackFlavor,
}
