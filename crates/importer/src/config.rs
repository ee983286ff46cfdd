//! Tracker configuration
//!
//! Defaults match what producers expect; both knobs can be overridden from
//! code or loaded from JSON:
//!
//! ```
//! use trackforge_importer::TrackerConfig;
//!
//! let config = TrackerConfig::from_json(r#"{"max_ancestors": 4}"#).unwrap();
//! assert_eq!(config.max_ancestors, 4);
//! assert_eq!(config.default_track_name, "Default Track");
//! ```

use serde::{Deserialize, Serialize};
use trackforge_core::error::{Error, Result};

/// Configuration of a [`TrackEventTracker`](crate::TrackEventTracker)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Longest ancestor chain followed when resolving parents
    ///
    /// Links beyond this depth are dropped, which bounds recursion on
    /// adversarial input.
    pub max_ancestors: usize,

    /// Display name of the session-wide default track
    pub default_track_name: String,
}

impl TrackerConfig {
    /// Default bound on ancestor chains
    pub const DEFAULT_MAX_ANCESTORS: usize = 10;

    /// Default name of the default track
    pub const DEFAULT_TRACK_NAME: &'static str = "Default Track";

    /// Parse and validate a JSON configuration; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: TrackerConfig =
            serde_json::from_str(json).map_err(|e| Error::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Set the ancestor bound
    pub fn with_max_ancestors(mut self, max_ancestors: usize) -> Self {
        self.max_ancestors = max_ancestors;
        self
    }

    /// Set the default track name
    pub fn with_default_track_name(mut self, name: impl Into<String>) -> Self {
        self.default_track_name = name.into();
        self
    }

    /// Reject configurations that cannot work
    ///
    /// A zero ancestor bound would drop every parent link; an empty default
    /// name would leave the default track indistinguishable from an unnamed
    /// one.
    pub fn validate(&self) -> Result<()> {
        if self.max_ancestors == 0 {
            return Err(Error::InvalidConfig(
                "max_ancestors must be at least 1".to_string(),
            ));
        }
        if self.default_track_name.is_empty() {
            return Err(Error::InvalidConfig(
                "default_track_name must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            max_ancestors: Self::DEFAULT_MAX_ANCESTORS,
            default_track_name: Self::DEFAULT_TRACK_NAME.to_string(),
        }
    }
}
