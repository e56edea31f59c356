//! Memo Statistics Module
//!
//! Tracks how memoized calls were served: hits, misses and passthroughs.

use serde::Serialize;

// == Memo Stats ==
/// Counters for a single memoized invoker.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MemoStats {
    /// Calls answered from the cache
    pub hits: u64,
    /// Calls that ran the wrapped function while caching
    pub misses: u64,
    /// Calls that ran the wrapped function after caching stopped
    pub passthroughs: u64,
    /// Entries this invoker has inserted into its store, mirrored from the
    /// invoker's entry count
    pub stored_entries: usize,
}

impl MemoStats {
    // == Constructor ==
    /// Creates a new MemoStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / total calls, or 0.0 if nothing has been called.
    pub fn hit_rate(&self) -> f64 {
        let total = self.total_calls();
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// Total number of calls observed.
    pub fn total_calls(&self) -> u64 {
        self.hits + self.misses + self.passthroughs
    }

    // == Record Hit ==
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    // == Record Miss ==
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    // == Record Passthrough ==
    pub fn record_passthrough(&mut self) {
        self.passthroughs += 1;
    }

    // == Set Stored Entries ==
    pub fn set_stored_entries(&mut self, count: usize) {
        self.stored_entries = count;
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_new() {
        let stats = MemoStats::new();
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.misses, 0);
        assert_eq!(stats.passthroughs, 0);
        assert_eq!(stats.stored_entries, 0);
    }

    #[test]
    fn test_hit_rate_no_calls() {
        assert_eq!(MemoStats::new().hit_rate(), 0.0);
    }

    #[test]
    fn test_hit_rate_mixed() {
        let mut stats = MemoStats::new();
        stats.record_hit();
        stats.record_miss();
        stats.record_passthrough();
        stats.record_hit();
        assert_eq!(stats.total_calls(), 4);
        assert_eq!(stats.hit_rate(), 0.5);
    }

    #[test]
    fn test_misses_do_not_count_entries() {
        let mut stats = MemoStats::new();
        stats.record_miss();
        stats.record_miss();
        stats.record_passthrough();
        assert_eq!(stats.misses, 2);
        assert_eq!(stats.stored_entries, 0);

        stats.set_stored_entries(1);
        assert_eq!(stats.stored_entries, 1);
    }
}
