//! Ancestor path for bounded parent resolution
//!
//! Input may contain parent loops or absurdly deep chains. While a track's
//! parents are being resolved, its uuid sits on an [`AncestorPath`]; the
//! resolver refuses to follow a parent link that is already on the path or
//! that would make the path longer than the configured bound.
//!
//! Entries are pushed through [`AncestorPath::enter`], which returns an
//! [`AncestorGuard`]. The guard pops the entry when dropped, so the path is
//! restored on every exit, including early returns and `?`.
//!
//! [`AncestorPath::enter_root`] starts a new depth count while keeping the
//! outer entries visible to [`AncestorPath::contains`]. Resolution of a
//! session-wide track from deep inside a chain is then bounded the same as
//! resolving it on its own.

use smallvec::SmallVec;
use std::ops::{Deref, DerefMut};

/// Uuids of the tracks currently being resolved, outermost first
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AncestorPath {
    uuids: SmallVec<[u64; 16]>,
    floor: usize,
}

impl AncestorPath {
    /// Empty path, for a top-level resolution
    pub fn new() -> Self {
        Self::default()
    }

    /// Push `uuid` for the lifetime of the returned guard
    #[must_use = "the uuid is popped as soon as the guard is dropped"]
    pub fn enter(&mut self, uuid: u64) -> AncestorGuard<'_> {
        let floor = self.floor;
        self.uuids.push(uuid);
        AncestorGuard { path: self, floor }
    }

    /// Push `uuid` and restart the depth count after it
    ///
    /// Entries up to and including `uuid` still count for loop detection
    /// but not for [`depth`](Self::depth).
    #[must_use = "the uuid is popped as soon as the guard is dropped"]
    pub fn enter_root(&mut self, uuid: u64) -> AncestorGuard<'_> {
        let floor = self.floor;
        self.uuids.push(uuid);
        self.floor = self.uuids.len();
        AncestorGuard { path: self, floor }
    }

    /// Check if `uuid` is being resolved further up the stack
    pub fn contains(&self, uuid: u64) -> bool {
        self.uuids.contains(&uuid)
    }

    /// Number of uuids on the path
    pub fn len(&self) -> usize {
        self.uuids.len()
    }

    /// Number of uuids entered since the innermost [`enter_root`](Self::enter_root)
    pub fn depth(&self) -> usize {
        self.uuids.len() - self.floor
    }

    /// Check if the path is empty
    pub fn is_empty(&self) -> bool {
        self.uuids.is_empty()
    }

    /// Uuids on the path, outermost first
    pub fn as_slice(&self) -> &[u64] {
        &self.uuids
    }
}

/// Scoped entry on an [`AncestorPath`]
///
/// Derefs to the path so it can be threaded into the next recursion level.
#[derive(Debug)]
pub struct AncestorGuard<'a> {
    path: &'a mut AncestorPath,
    floor: usize,
}

impl Deref for AncestorGuard<'_> {
    type Target = AncestorPath;

    fn deref(&self) -> &AncestorPath {
        self.path
    }
}

impl DerefMut for AncestorGuard<'_> {
    fn deref_mut(&mut self) -> &mut AncestorPath {
        self.path
    }
}

impl Drop for AncestorGuard<'_> {
    fn drop(&mut self) {
        self.path.uuids.pop();
        self.path.floor = self.floor;
    }
}
