use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, info};

/// Tracks how searches were executed
#[derive(Debug, Clone)]
pub struct SearchMetrics {
    // Dispatch metrics
    sequential_searches: Arc<AtomicU64>,
    parallel_searches: Arc<AtomicU64>,
    workers_spawned: Arc<AtomicU64>,

    // Outcome metrics
    matches_found: Arc<AtomicU64>,
    misses: Arc<AtomicU64>,
}

impl SearchMetrics {
    /// Creates a new SearchMetrics instance
    pub fn new() -> Self {
        Self {
            sequential_searches: Arc::new(AtomicU64::new(0)),
            parallel_searches: Arc::new(AtomicU64::new(0)),
            workers_spawned: Arc::new(AtomicU64::new(0)),
            matches_found: Arc::new(AtomicU64::new(0)),
            misses: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Records a search that ran on the calling thread
    pub fn record_sequential(&self) {
        self.sequential_searches.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a search that fanned out to `workers` workers
    pub fn record_parallel(&self, workers: usize) {
        self.parallel_searches.fetch_add(1, Ordering::Relaxed);
        let total = self
            .workers_spawned
            .fetch_add(workers as u64, Ordering::Relaxed)
            + workers as u64;
        debug!("Fanned out to {} workers, total spawned: {}", workers, total);
    }

    /// Records whether a search produced a match
    pub fn record_outcome(&self, found: bool) {
        if found {
            self.matches_found.fetch_add(1, Ordering::Relaxed);
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Gets current search statistics
    pub fn get_stats(&self) -> SearchStats {
        SearchStats {
            sequential_searches: self.sequential_searches.load(Ordering::Relaxed),
            parallel_searches: self.parallel_searches.load(Ordering::Relaxed),
            workers_spawned: self.workers_spawned.load(Ordering::Relaxed),
            matches_found: self.matches_found.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }

    /// Logs current search statistics
    pub fn log_stats(&self) {
        let stats = self.get_stats();
        info!(
            "Search stats:\n\
             Searches (sequential/parallel): {}/{}\n\
             Workers spawned: {}\n\
             Matches/misses: {}/{}",
            stats.sequential_searches,
            stats.parallel_searches,
            stats.workers_spawned,
            stats.matches_found,
            stats.misses
        );
    }
}

impl Default for SearchMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of search statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchStats {
    pub sequential_searches: u64,
    pub parallel_searches: u64,
    pub workers_spawned: u64,
    pub matches_found: u64,
    pub misses: u64,
}
