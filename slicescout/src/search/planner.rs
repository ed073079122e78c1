use std::ops::Range;
use tracing::debug;

use crate::config::SearchConfig;

/// Fewest partitions worth dispatching to separate workers
pub const MIN_PARALLEL_WORKERS: usize = 2;

/// How a search over a slice of a given length is executed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Plan {
    /// One scan over the whole slice on the calling thread
    Sequential,
    /// One worker per range; ranges are ascending, disjoint and cover the slice
    Parallel(Vec<Range<usize>>),
}

impl Plan {
    /// Number of scans this plan runs
    pub fn worker_count(&self) -> usize {
        match self {
            Plan::Sequential => 1,
            Plan::Parallel(ranges) => ranges.len(),
        }
    }
}

/// Splits `len` elements into worker partitions.
///
/// `workers = min(len / max_search_length, max_search_workers)`. Anything
/// below [`MIN_PARALLEL_WORKERS`] runs sequentially. Every partition except
/// the last holds exactly `max_search_length` elements; the last one takes
/// the remainder.
pub fn plan(len: usize, config: &SearchConfig) -> Plan {
    let (max_elems, max_workers) = config.tunables();
    let workers = (len / max_elems).min(max_workers);

    if len == 0 || workers < MIN_PARALLEL_WORKERS {
        debug!(
            "Sequential scan of {} elements (max_search_length={}, max_search_workers={})",
            len, max_elems, max_workers
        );
        return Plan::Sequential;
    }

    let ranges: Vec<Range<usize>> = (0..workers)
        .map(|i| {
            let start = i * max_elems;
            let end = if i == workers - 1 {
                len
            } else {
                start + max_elems
            };
            start..end
        })
        .collect();

    debug!("Partitioned {} elements into {} ranges", len, ranges.len());
    Plan::Parallel(ranges)
}
