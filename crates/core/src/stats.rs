//! Named ingestion statistics
//!
//! Recoverable anomalies never abort ingestion. Instead they bump one of these
//! counters, which operators and tests can read back.
//!
//! | Stat | Raised when |
//! |------|-------------|
//! | TrackEventTokenizerErrors | A uuid is re-reserved with a different shape |
//! | DescriptorTrackUnknownParent | A parent uuid was never reserved |
//! | DescriptorTrackLoops | A parent link would close a cycle |
//! | DescriptorTrackTooManyAncestors | The ancestor chain exceeds the depth bound |
//! | DescriptorTidReuse | A second uuid claims an already owned thread |
//! | DescriptorPidReuse | A second uuid claims an already owned process |

use serde::{Deserialize, Serialize};

/// Statistics counters raised by descriptor track ingestion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stat {
    /// Conflicting re-reservation of a track uuid
    TrackEventTokenizerErrors,
    /// Parent uuid not reserved at resolution time
    DescriptorTrackUnknownParent,
    /// Parent link ignored because it would form a loop
    DescriptorTrackLoops,
    /// Parent link ignored because the ancestor chain is too deep
    DescriptorTrackTooManyAncestors,
    /// New logical thread started because its tid was reused
    DescriptorTidReuse,
    /// New logical process started because its pid was reused
    DescriptorPidReuse,
}

impl Stat {
    /// Number of distinct stats
    pub const COUNT: usize = 6;

    /// All stats (for iteration)
    pub const ALL: [Stat; Stat::COUNT] = [
        Stat::TrackEventTokenizerErrors,
        Stat::DescriptorTrackUnknownParent,
        Stat::DescriptorTrackLoops,
        Stat::DescriptorTrackTooManyAncestors,
        Stat::DescriptorTidReuse,
        Stat::DescriptorPidReuse,
    ];

    /// Dense index, for array-backed tables
    pub const fn index(&self) -> usize {
        match self {
            Stat::TrackEventTokenizerErrors => 0,
            Stat::DescriptorTrackUnknownParent => 1,
            Stat::DescriptorTrackLoops => 2,
            Stat::DescriptorTrackTooManyAncestors => 3,
            Stat::DescriptorTidReuse => 4,
            Stat::DescriptorPidReuse => 5,
        }
    }

    /// Stable snake_case name
    pub const fn name(&self) -> &'static str {
        match self {
            Stat::TrackEventTokenizerErrors => "track_event_tokenizer_errors",
            Stat::DescriptorTrackUnknownParent => "descriptor_track_unknown_parent",
            Stat::DescriptorTrackLoops => "descriptor_track_loops",
            Stat::DescriptorTrackTooManyAncestors => "descriptor_track_too_many_ancestors",
            Stat::DescriptorTidReuse => "descriptor_tid_reuse",
            Stat::DescriptorPidReuse => "descriptor_pid_reuse",
        }
    }

    /// Parse from stable name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|stat| stat.name() == name)
    }

    /// Check if this stat signals malformed input rather than expected churn
    ///
    /// Pid/tid reuse is a normal property of long traces; the rest point at
    /// inconsistent producers.
    pub const fn is_error(&self) -> bool {
        !matches!(self, Stat::DescriptorTidReuse | Stat::DescriptorPidReuse)
    }
}

impl std::fmt::Display for Stat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
