use once_cell::sync::Lazy;
use tracing::debug;

use super::aggregator::fan_out;
use super::planner::{plan, Plan};
use super::worker::{scan, Direction};
use crate::config::SearchConfig;
use crate::errors::{SearchError, SearchResult};
use crate::metrics::SearchMetrics;
use crate::results::Match;

static GLOBAL_METRICS: Lazy<SearchMetrics> = Lazy::new(SearchMetrics::new);

/// Metrics shared by every search that runs on the process-wide configuration
pub fn global_metrics() -> &'static SearchMetrics {
    &GLOBAL_METRICS
}

/// Runs searches against one fixed configuration
#[derive(Debug, Clone)]
pub struct Searcher {
    config: SearchConfig,
    metrics: SearchMetrics,
}

impl Searcher {
    /// Creates a searcher with its own configuration and metrics
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            metrics: SearchMetrics::new(),
        }
    }

    /// Snapshots the process-wide configuration; metrics go to [`global_metrics`]
    pub fn from_global() -> Self {
        Self {
            config: SearchConfig::global(),
            metrics: GLOBAL_METRICS.clone(),
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Gets the metrics this searcher records into
    pub fn metrics(&self) -> &SearchMetrics {
        &self.metrics
    }

    /// Index of the first (forward) or last (backward) element satisfying
    /// `predicate`, planned against this searcher's configuration.
    pub fn find<T, P>(&self, seq: &[T], predicate: &P, direction: Direction) -> Option<usize>
    where
        T: Sync,
        P: Fn(usize, &T) -> bool + Sync,
    {
        let found = match plan(seq.len(), &self.config) {
            Plan::Sequential => {
                self.metrics.record_sequential();
                scan(seq, predicate, 0..seq.len(), direction)
            }
            Plan::Parallel(ranges) => {
                self.metrics.record_parallel(ranges.len());
                fan_out(seq, predicate, ranges, direction)
            }
        };

        debug!("{:?} search over {} elements: {:?}", direction, seq.len(), found);
        self.metrics.record_outcome(found.is_some());
        found
    }

    fn locate<'a, T, P>(
        &self,
        seq: &'a [T],
        predicate: Option<P>,
        direction: Direction,
    ) -> SearchResult<Option<Match<'a, T>>>
    where
        T: Sync,
        P: Fn(usize, &T) -> bool + Sync,
    {
        if seq.is_empty() {
            return Err(SearchError::EmptyInput);
        }

        let Some(predicate) = predicate else {
            return Ok(Some(Match::at(seq, direction.boundary(seq.len()))));
        };

        Ok(self
            .find(seq, &predicate, direction)
            .map(|index| Match::at(seq, index)))
    }

    /// First element satisfying `predicate`, or the first element when no
    /// predicate is given.
    ///
    /// # Panics
    ///
    /// Panics if `seq` is empty. Use [`Searcher::try_first`] to get
    /// [`SearchError::EmptyInput`] instead.
    pub fn first<'a, T, P>(&self, seq: &'a [T], predicate: Option<P>) -> Option<Match<'a, T>>
    where
        T: Sync,
        P: Fn(usize, &T) -> bool + Sync,
    {
        match self.locate(seq, predicate, Direction::Forward) {
            Ok(found) => found,
            Err(e) => panic!("{}", e),
        }
    }

    /// Last element satisfying `predicate`, or the last element when no
    /// predicate is given.
    ///
    /// # Panics
    ///
    /// Panics if `seq` is empty. Use [`Searcher::try_last`] to get
    /// [`SearchError::EmptyInput`] instead.
    pub fn last<'a, T, P>(&self, seq: &'a [T], predicate: Option<P>) -> Option<Match<'a, T>>
    where
        T: Sync,
        P: Fn(usize, &T) -> bool + Sync,
    {
        match self.locate(seq, predicate, Direction::Backward) {
            Ok(found) => found,
            Err(e) => panic!("{}", e),
        }
    }

    /// Like [`Searcher::first`], but reports an empty slice and a miss as errors
    pub fn try_first<'a, T, P>(
        &self,
        seq: &'a [T],
        predicate: Option<P>,
    ) -> SearchResult<Match<'a, T>>
    where
        T: Sync,
        P: Fn(usize, &T) -> bool + Sync,
    {
        self.locate(seq, predicate, Direction::Forward)?
            .ok_or(SearchError::NotFound)
    }

    /// Like [`Searcher::last`], but reports an empty slice and a miss as errors
    pub fn try_last<'a, T, P>(
        &self,
        seq: &'a [T],
        predicate: Option<P>,
    ) -> SearchResult<Match<'a, T>>
    where
        T: Sync,
        P: Fn(usize, &T) -> bool + Sync,
    {
        self.locate(seq, predicate, Direction::Backward)?
            .ok_or(SearchError::NotFound)
    }

    /// Lowest index holding `target`. An empty slice is simply a miss.
    pub fn index_of<T>(&self, seq: &[T], target: &T) -> Option<usize>
    where
        T: PartialEq + Sync,
    {
        self.find(seq, &|_: usize, value: &T| value == target, Direction::Forward)
    }

    /// Whether any element equals `target`
    pub fn contains<T>(&self, seq: &[T], target: &T) -> bool
    where
        T: PartialEq + Sync,
    {
        self.index_of(seq, target).is_some()
    }
}

impl Default for Searcher {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}

/// First element satisfying `predicate` under the process-wide configuration.
///
/// ```rust
/// let values = [1, 2, 3, 4, 5];
/// let found = slicescout::first(&values, Some(|_: usize, v: &i32| *v == 3)).unwrap();
/// assert_eq!((found.index, *found.value), (2, 3));
/// ```
///
/// # Panics
///
/// Panics if `seq` is empty.
pub fn first<'a, T, P>(seq: &'a [T], predicate: Option<P>) -> Option<Match<'a, T>>
where
    T: Sync,
    P: Fn(usize, &T) -> bool + Sync,
{
    Searcher::from_global().first(seq, predicate)
}

/// Last element satisfying `predicate` under the process-wide configuration.
///
/// # Panics
///
/// Panics if `seq` is empty.
pub fn last<'a, T, P>(seq: &'a [T], predicate: Option<P>) -> Option<Match<'a, T>>
where
    T: Sync,
    P: Fn(usize, &T) -> bool + Sync,
{
    Searcher::from_global().last(seq, predicate)
}

pub fn try_first<'a, T, P>(seq: &'a [T], predicate: Option<P>) -> SearchResult<Match<'a, T>>
where
    T: Sync,
    P: Fn(usize, &T) -> bool + Sync,
{
    Searcher::from_global().try_first(seq, predicate)
}

pub fn try_last<'a, T, P>(seq: &'a [T], predicate: Option<P>) -> SearchResult<Match<'a, T>>
where
    T: Sync,
    P: Fn(usize, &T) -> bool + Sync,
{
    Searcher::from_global().try_last(seq, predicate)
}

/// Lowest index holding `target` under the process-wide configuration
pub fn index_of<T>(seq: &[T], target: &T) -> Option<usize>
where
    T: PartialEq + Sync,
{
    Searcher::from_global().index_of(seq, target)
}

pub fn contains<T>(seq: &[T], target: &T) -> bool
where
    T: PartialEq + Sync,
{
    Searcher::from_global().contains(seq, target)
}

#[cfg(test)]
mod tests {
    use super::*;

    type NoPredicate = fn(usize, &i32) -> bool;

    fn small_partitions() -> Searcher {
        Searcher::new(
            SearchConfig::default()
                .with_max_search_length(3)
                .with_max_search_workers(4),
        )
    }

    #[test]
    fn test_first_and_last_with_predicate() {
        let values = [1, 2, 3, 4, 3];
        let searcher = Searcher::default();

        let found = searcher.first(&values, Some(|_: usize, v: &i32| *v == 3)).unwrap();
        assert_eq!((found.index, *found.value), (2, 3));

        let found = searcher.last(&values, Some(|_: usize, v: &i32| *v == 3)).unwrap();
        assert_eq!((found.index, *found.value), (4, 3));
    }

    #[test]
    fn test_missing_predicate_returns_boundary() {
        let values = [10, 20, 30];
        let searcher = Searcher::default();

        let found = searcher.first(&values, None::<NoPredicate>).unwrap();
        assert_eq!((found.index, *found.value), (0, 10));

        let found = searcher.last(&values, None::<NoPredicate>).unwrap();
        assert_eq!((found.index, *found.value), (2, 30));

        // The boundary path never reaches the planner
        assert_eq!(searcher.metrics().get_stats().sequential_searches, 0);
    }

    #[test]
    #[should_panic(expected = "The slice is empty")]
    fn test_first_panics_on_empty() {
        let values: [i32; 0] = [];
        Searcher::default().first(&values, None::<NoPredicate>);
    }

    #[test]
    #[should_panic(expected = "The slice is empty")]
    fn test_last_panics_on_empty() {
        let values: [i32; 0] = [];
        Searcher::default().last(&values, Some(|_: usize, v: &i32| *v == 1));
    }

    #[test]
    fn test_try_variants_report_errors() {
        let empty: [i32; 0] = [];
        let values = [1, 2, 3];
        let searcher = Searcher::default();

        assert!(matches!(
            searcher.try_first(&empty, None::<NoPredicate>),
            Err(SearchError::EmptyInput)
        ));
        assert!(matches!(
            searcher.try_last(&empty, None::<NoPredicate>),
            Err(SearchError::EmptyInput)
        ));
        assert!(matches!(
            searcher.try_first(&values, Some(|_: usize, v: &i32| *v == 9)),
            Err(SearchError::NotFound)
        ));
        assert_eq!(
            searcher.try_last(&values, Some(|_: usize, v: &i32| *v < 3)).unwrap().index,
            1
        );
    }

    #[test]
    fn test_index_of_and_contains() {
        let values = [5, 7, 5, 9];
        let searcher = Searcher::default();

        assert_eq!(searcher.index_of(&values, &5), Some(0));
        assert_eq!(searcher.index_of(&values, &9), Some(3));
        assert_eq!(searcher.index_of(&values, &6), None);
        assert!(searcher.contains(&values, &7));
        assert!(!searcher.contains(&values, &6));

        let empty: [i32; 0] = [];
        assert_eq!(searcher.index_of(&empty, &1), None);
        assert!(!searcher.contains(&empty, &1));
    }

    #[test]
    fn test_parallel_path_agrees_with_sequential() {
        let values: Vec<i32> = (0..40).map(|i| (i * 7) % 11).collect();
        let sequential = Searcher::default();
        let parallel = small_partitions();

        for target in 0..12 {
            let predicate = |_: usize, v: &i32| *v == target;
            assert_eq!(
                sequential.first(&values, Some(predicate)),
                parallel.first(&values, Some(predicate))
            );
            assert_eq!(
                sequential.last(&values, Some(predicate)),
                parallel.last(&values, Some(predicate))
            );
            assert_eq!(
                sequential.index_of(&values, &target),
                parallel.index_of(&values, &target)
            );
        }

        let stats = parallel.metrics().get_stats();
        assert_eq!(stats.sequential_searches, 0);
        assert_eq!(stats.parallel_searches, 36);
        assert_eq!(stats.workers_spawned, 36 * 4);
    }

    #[test]
    fn test_metrics_record_outcomes() {
        let values = [1, 2, 3];
        let searcher = Searcher::default();

        searcher.index_of(&values, &2);
        searcher.index_of(&values, &4);

        let stats = searcher.metrics().get_stats();
        assert_eq!(stats.sequential_searches, 2);
        assert_eq!(stats.matches_found, 1);
        assert_eq!(stats.misses, 1);
    }

    #[test]
    fn test_free_functions_use_global_config() {
        let values = [1, 2, 3, 4, 5];
        let before = global_metrics().get_stats().matches_found;

        let found = first(&values, Some(|_: usize, v: &i32| *v == 3)).unwrap();
        assert_eq!((found.index, *found.value), (2, 3));
        assert_eq!(last(&values, None::<NoPredicate>).unwrap().index, 4);
        assert_eq!(index_of(&values, &6), None);
        assert!(contains(&values, &1));
        assert!(try_first(&values, Some(|_: usize, v: &i32| *v > 5)).is_err());
        assert_eq!(try_last(&values, Some(|_: usize, v: &i32| *v < 3)).unwrap().index, 1);

        // Other tests may search concurrently, so only a lower bound holds
        assert!(global_metrics().get_stats().matches_found >= before + 3);
    }
}
