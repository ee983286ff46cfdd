//! Ingestion session entry point for Trackforge.
//!
//! This module provides [`TraceSession`], a [`TrackEventTracker`] wired to
//! the in-memory storage and identity tracker, and its builder.

use crate::error::Result;
use std::ops::{Deref, DerefMut};
use tracing::debug;
use trackforge_core::stats::Stat;
use trackforge_core::traits::{StatsSink, StringInterner};
use trackforge_core::types::{StringId, TrackId};
use trackforge_importer::{TrackEventTracker, TrackerConfig};
use trackforge_storage::{ProcessTracker, TraceStorage};

/// The tracker type behind a [`TraceSession`]
pub type SessionTracker = TrackEventTracker<TraceStorage, ProcessTracker>;

/// One trace's worth of descriptor track state.
///
/// Derefs to the underlying [`TrackEventTracker`], so every reservation,
/// resolution and counter operation is available directly.
///
/// # Example
///
/// ```
/// use trackforge::prelude::*;
///
/// let mut session = TraceSession::new();
/// let name = session.intern("renderer");
/// session.reserve_descriptor_thread_track(1, 0, name, 10, 11, 1_000);
///
/// let track = session.resolve(1)?.unwrap();
/// assert_eq!(session.track_name(track), Some("renderer"));
/// # Ok::<(), trackforge::Error>(())
/// ```
#[derive(Debug)]
pub struct TraceSession {
    tracker: SessionTracker,
}

impl TraceSession {
    /// Create a session with the default configuration.
    pub fn new() -> Self {
        Self {
            tracker: TrackEventTracker::new(TraceStorage::new(), ProcessTracker::new()),
        }
    }

    /// Create a builder for session configuration.
    ///
    /// # Example
    ///
    /// ```
    /// use trackforge::TraceSession;
    ///
    /// let session = TraceSession::builder()
    ///     .max_ancestors(4)
    ///     .default_track_name("Global")
    ///     .build()?;
    /// assert_eq!(session.config().max_ancestors, 4);
    /// # Ok::<(), trackforge::Error>(())
    /// ```
    pub fn builder() -> TraceSessionBuilder {
        TraceSessionBuilder::new()
    }

    /// Intern `s` in the session's string pool.
    pub fn intern(&mut self, s: &str) -> StringId {
        self.tracker.storage_mut().intern_string(s)
    }

    /// Resolve the track for `uuid`, `None` if it was never reserved.
    pub fn resolve(&mut self, uuid: u64) -> Result<Option<TrackId>> {
        Ok(self.tracker.get_descriptor_track(uuid, StringId::NULL)?)
    }

    /// Resolve the track for `uuid` on behalf of an event named `event_name`.
    ///
    /// Unnamed child tracks take the name of the first event resolved on
    /// them.
    pub fn resolve_for_event(&mut self, uuid: u64, event_name: &str) -> Result<Option<TrackId>> {
        let event_name = self.intern(event_name);
        Ok(self.tracker.get_descriptor_track(uuid, event_name)?)
    }

    /// The session-wide default track.
    pub fn default_track(&mut self) -> Result<TrackId> {
        Ok(self.tracker.get_or_create_default_descriptor_track()?)
    }

    /// Display name of `track`, `None` while unnamed.
    pub fn track_name(&self, track: TrackId) -> Option<&str> {
        self.tracker.storage().track_name_str(track)
    }

    /// Current value of `stat`.
    pub fn stat(&self, stat: Stat) -> u64 {
        self.tracker.storage().stat(stat)
    }

    /// Dump tracks, args and stats as JSON.
    pub fn snapshot_json(&self) -> serde_json::Value {
        self.tracker.storage().snapshot_json()
    }

    /// End the session, handing back storage and identity state.
    pub fn finish(self) -> (TraceStorage, ProcessTracker) {
        debug!(
            reserved = self.tracker.reserved_count(),
            resolved = self.tracker.resolved_count(),
            "Finishing trace session"
        );
        self.tracker.into_parts()
    }
}

impl Default for TraceSession {
    fn default() -> Self {
        Self::new()
    }
}

impl Deref for TraceSession {
    type Target = SessionTracker;

    fn deref(&self) -> &SessionTracker {
        &self.tracker
    }
}

impl DerefMut for TraceSession {
    fn deref_mut(&mut self) -> &mut SessionTracker {
        &mut self.tracker
    }
}

/// Builder for session configuration.
///
/// # Example
///
/// ```
/// use trackforge::{TraceSession, TrackerConfig};
///
/// // From a JSON config file's contents
/// let config = TrackerConfig::from_json(r#"{"max_ancestors": 16}"#)?;
/// let session = TraceSession::builder().config(config).build()?;
///
/// // Tests: log resolution anomalies to stderr
/// let session = TraceSession::builder().with_logging().build()?;
/// # Ok::<(), trackforge::Error>(())
/// ```
#[derive(Debug, Default)]
pub struct TraceSessionBuilder {
    config: TrackerConfig,
    logging: bool,
}

impl TraceSessionBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: TrackerConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the longest ancestor chain followed during resolution.
    pub fn max_ancestors(mut self, max_ancestors: usize) -> Self {
        self.config = self.config.with_max_ancestors(max_ancestors);
        self
    }

    /// Set the name of the session-wide default track.
    pub fn default_track_name(mut self, name: impl Into<String>) -> Self {
        self.config = self.config.with_default_track_name(name);
        self
    }

    /// Install a `tracing-subscriber` fmt subscriber on build.
    ///
    /// Does nothing if a global subscriber is already set.
    pub fn with_logging(mut self) -> Self {
        self.logging = true;
        self
    }

    /// Validate the configuration and create the session.
    pub fn build(self) -> Result<TraceSession> {
        if self.logging {
            // Fails only when a subscriber is already installed.
            let _ = tracing_subscriber::fmt().with_target(true).try_init();
        }
        let tracker = TrackEventTracker::with_config(
            TraceStorage::new(),
            ProcessTracker::new(),
            self.config,
        )?;
        Ok(TraceSession { tracker })
    }
}
