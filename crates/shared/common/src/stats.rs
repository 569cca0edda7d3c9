//! Request statistics collaborator.
//!
//! The backend only increments counters; where they end up (a metrics
//! exporter, a status page, nowhere) is decided by whoever injects the sink.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Counters maintained by the frontend-facing backend operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Counter {
    BindRequests,
    BindSuccesses,
    SearchRequests,
    SearchSuccesses,
    Closes,
}

impl Counter {
    pub const ALL: [Counter; 5] = [
        Counter::BindRequests,
        Counter::BindSuccesses,
        Counter::SearchRequests,
        Counter::SearchSuccesses,
        Counter::Closes,
    ];

    /// Stable key used when exporting the counter
    pub fn key(&self) -> &'static str {
        match self {
            Counter::BindRequests => "bind_reqs",
            Counter::BindSuccesses => "bind_successes",
            Counter::SearchRequests => "search_reqs",
            Counter::SearchSuccesses => "search_successes",
            Counter::Closes => "closes",
        }
    }

    fn index(&self) -> usize {
        match self {
            Counter::BindRequests => 0,
            Counter::BindSuccesses => 1,
            Counter::SearchRequests => 2,
            Counter::SearchSuccesses => 3,
            Counter::Closes => 4,
        }
    }
}

impl fmt::Display for Counter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Statistics sink trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait Stats: Send + Sync {
    /// Add one to a counter
    fn incr(&self, counter: Counter);
}

/// Sink that drops every increment.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopStats;

impl Stats for NoopStats {
    fn incr(&self, _counter: Counter) {}
}

/// Process-local atomic counters.
#[derive(Debug, Default)]
pub struct InMemoryStats {
    counters: [AtomicU64; 5],
}

impl InMemoryStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, counter: Counter) -> u64 {
        self.counters[counter.index()].load(Ordering::Relaxed)
    }

    /// Current value of every counter, keyed by export name
    pub fn snapshot(&self) -> Vec<(&'static str, u64)> {
        Counter::ALL
            .iter()
            .map(|c| (c.key(), self.get(*c)))
            .collect()
    }
}

impl Stats for InMemoryStats {
    fn incr(&self, counter: Counter) {
        self.counters[counter.index()].fetch_add(1, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_counts() {
        let stats = InMemoryStats::new();
        stats.incr(Counter::BindRequests);
        stats.incr(Counter::BindRequests);
        stats.incr(Counter::Closes);

        assert_eq!(stats.get(Counter::BindRequests), 2);
        assert_eq!(stats.get(Counter::BindSuccesses), 0);
        assert_eq!(stats.get(Counter::Closes), 1);
    }

    #[test]
    fn test_snapshot_uses_export_keys() {
        let stats = InMemoryStats::new();
        stats.incr(Counter::SearchSuccesses);

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.len(), 5);
        assert!(snapshot.contains(&("search_successes", 1)));
        assert!(snapshot.contains(&("bind_reqs", 0)));
    }

    #[test]
    fn test_mock_records_increments() {
        let mut stats = MockStats::new();
        stats
            .expect_incr()
            .withf(|c| *c == Counter::Closes)
            .times(1)
            .return_const(());

        stats.incr(Counter::Closes);
    }
}
