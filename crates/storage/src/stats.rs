//! Ingestion statistics table

use trackforge_core::stats::Stat;

/// One counter per [`Stat`]
#[derive(Debug, Default, Clone)]
pub struct StatsTable {
    counts: [u64; Stat::COUNT],
}

impl StatsTable {
    /// Create a table with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Bump `stat` by one
    #[inline]
    pub fn increment(&mut self, stat: Stat) {
        self.counts[stat.index()] += 1;
    }

    /// Current value of `stat`
    #[inline]
    pub fn get(&self, stat: Stat) -> u64 {
        self.counts[stat.index()]
    }

    /// Sum of all counters flagged as errors
    pub fn total_errors(&self) -> u64 {
        Stat::ALL
            .iter()
            .filter(|stat| stat.is_error())
            .map(|stat| self.get(*stat))
            .sum()
    }

    /// Non-zero counters as `(stat, value)` pairs
    pub fn non_zero(&self) -> Vec<(Stat, u64)> {
        Stat::ALL
            .iter()
            .map(|stat| (*stat, self.get(*stat)))
            .filter(|(_, value)| *value > 0)
            .collect()
    }
}
