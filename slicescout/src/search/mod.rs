/// This module implements the partitioned predicate search.
///
/// A search runs in four stages:
///
/// 1. **Planning** ([`planner`]): the slice length and the two tunables
///    decide between one sequential scan and a fan-out over contiguous,
///    disjoint partitions (`max_search_length` elements each, the last one
///    absorbing the remainder, at most `max_search_workers` of them).
///
/// 2. **Scanning** ([`worker`]): each partition is scanned front to back
///    for a forward search or back to front for a backward search. The
///    predicate always receives indices into the full slice.
///
/// 3. **Fan-out / fan-in** ([`aggregator`]): partitions run as a rayon
///    parallel iterator and their answers are collected. The collect is the
///    only synchronization point; nothing is cancelled early.
///
/// 4. **Reconciliation**: the lowest reported index wins a forward search and
///    the highest wins a backward search, so the answer is the one a plain
///    sequential scan would give no matter which worker finished first.
///
/// ```rust,ignore
/// let searcher = Searcher::new(SearchConfig::default().with_max_search_length(50_000));
/// let hit = searcher.first(&readings, Some(|_: usize, r: &Reading| r.value > threshold));
/// ```
pub mod aggregator;
pub mod engine;
pub mod planner;
pub mod worker;

pub use engine::{
    contains, first, global_metrics, index_of, last, try_first, try_last, Searcher,
};
pub use planner::{plan, Plan};
pub use worker::Direction;
