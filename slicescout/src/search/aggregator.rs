use rayon::prelude::*;
use std::ops::Range;
use tracing::trace;

use super::worker::{scan, Direction};
use crate::results::WorkerResult;

/// Runs one worker per range on the rayon pool and reconciles their answers.
///
/// The caller blocks until every worker has reported. Workers are not
/// cancelled when another partition finds a match; each scans its own range
/// to completion (or to its first local hit in scan order).
pub fn fan_out<T, P>(
    seq: &[T],
    predicate: &P,
    ranges: Vec<Range<usize>>,
    direction: Direction,
) -> Option<usize>
where
    T: Sync,
    P: Fn(usize, &T) -> bool + Sync,
{
    let results: Vec<WorkerResult> = ranges
        .into_par_iter()
        .map(|range| WorkerResult {
            found: scan(seq, predicate, range.clone(), direction),
            range,
        })
        .collect();

    reconcile(results, direction)
}

/// Selects the answer among worker results, whatever order they arrived in
pub fn reconcile<I>(results: I, direction: Direction) -> Option<usize>
where
    I: IntoIterator<Item = WorkerResult>,
{
    direction.select(results.into_iter().filter_map(|result| {
        trace!("Partition {:?} reported {:?}", result.range, result.found);
        result.found
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(range: Range<usize>, found: Option<usize>) -> WorkerResult {
        WorkerResult { range, found }
    }

    #[test]
    fn test_reconcile_ignores_arrival_order() {
        let results = vec![
            result(200..300, Some(250)),
            result(0..100, None),
            result(100..200, Some(120)),
        ];

        let mut reversed = results.clone();
        reversed.reverse();

        assert_eq!(reconcile(results.clone(), Direction::Forward), Some(120));
        assert_eq!(reconcile(reversed.clone(), Direction::Forward), Some(120));
        assert_eq!(reconcile(results, Direction::Backward), Some(250));
        assert_eq!(reconcile(reversed, Direction::Backward), Some(250));
    }

    #[test]
    fn test_reconcile_all_missing() {
        let results = vec![result(0..10, None), result(10..20, None)];
        assert_eq!(reconcile(results, Direction::Forward), None);
        assert_eq!(reconcile(Vec::new(), Direction::Backward), None);
    }

    #[test]
    fn test_fan_out_matches_in_every_partition() {
        let values: Vec<u32> = (0..1_000).map(|i| i % 10).collect();
        let ranges = vec![0..250, 250..500, 500..750, 750..1_000];
        let is_seven = |_: usize, v: &u32| *v == 7;

        assert_eq!(
            fan_out(&values, &is_seven, ranges.clone(), Direction::Forward),
            Some(7)
        );
        assert_eq!(
            fan_out(&values, &is_seven, ranges, Direction::Backward),
            Some(997)
        );
    }

    #[test]
    fn test_fan_out_runs_every_worker() {
        let values = vec![1u8; 400];
        let visited = std::sync::atomic::AtomicUsize::new(0);
        let count_all = |_: usize, _: &u8| {
            visited.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
            false
        };

        let ranges = vec![0..100, 100..200, 200..400];
        assert_eq!(fan_out(&values, &count_all, ranges, Direction::Forward), None);
        assert_eq!(visited.into_inner(), 400);
    }
}
