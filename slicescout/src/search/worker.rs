use std::ops::Range;

/// Scan order within a partition, and which end of the slice wins
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Lowest matching index wins
    Forward,
    /// Highest matching index wins
    Backward,
}

impl Direction {
    /// Index of the element a search returns when no predicate is given.
    ///
    /// # Panics
    ///
    /// Panics if `len` is zero.
    pub fn boundary(self, len: usize) -> usize {
        assert!(len > 0, "boundary of an empty slice");
        match self {
            Direction::Forward => 0,
            Direction::Backward => len - 1,
        }
    }

    /// Picks the winning index among per-partition answers
    pub fn select(self, found: impl Iterator<Item = usize>) -> Option<usize> {
        match self {
            Direction::Forward => found.min(),
            Direction::Backward => found.max(),
        }
    }
}

/// Scans `seq[range]` and returns the global index of the first match in
/// scan order. The predicate sees global indices.
pub fn scan<T, P>(
    seq: &[T],
    predicate: &P,
    range: Range<usize>,
    direction: Direction,
) -> Option<usize>
where
    P: Fn(usize, &T) -> bool + ?Sized,
{
    let start = range.start;
    let mut window = seq[range].iter().enumerate();

    let hit = match direction {
        Direction::Forward => window.find(|&(offset, value)| predicate(start + offset, value)),
        Direction::Backward => {
            window.rfind(|&(offset, value)| predicate(start + offset, value))
        }
    };

    hit.map(|(offset, _)| start + offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn equals(target: i32) -> impl Fn(usize, &i32) -> bool {
        move |_: usize, value: &i32| *value == target
    }

    #[test]
    fn test_forward_returns_first_match() {
        let values = [1, 3, 5, 3, 1];
        assert_eq!(scan(&values, &equals(3), 0..5, Direction::Forward), Some(1));
    }

    #[test]
    fn test_backward_returns_last_match() {
        let values = [1, 3, 5, 3, 1];
        assert_eq!(scan(&values, &equals(3), 0..5, Direction::Backward), Some(3));
    }

    #[test]
    fn test_predicate_sees_global_indices() {
        let values: Vec<usize> = (0..20).collect();
        let seen = std::sync::Mutex::new(Vec::new());
        let hit = scan(
            &values,
            &|i: usize, v: &usize| {
                seen.lock().unwrap().push(i);
                assert_eq!(i, *v);
                i % 7 == 0
            },
            10..20,
            Direction::Forward,
        );
        assert_eq!(hit, Some(14));
        assert_eq!(*seen.lock().unwrap(), vec![10, 11, 12, 13, 14]);
    }

    #[test]
    fn test_scan_stays_inside_range() {
        let values = [9, 0, 0, 0, 9];
        assert_eq!(scan(&values, &equals(9), 1..4, Direction::Forward), None);
        assert_eq!(scan(&values, &equals(9), 1..4, Direction::Backward), None);
        assert_eq!(scan(&values, &equals(9), 2..2, Direction::Forward), None);
    }

    #[test]
    fn test_direction_helpers() {
        assert_eq!(Direction::Forward.boundary(5), 0);
        assert_eq!(Direction::Backward.boundary(5), 4);
        assert_eq!(Direction::Forward.select([7, 2, 9].into_iter()), Some(2));
        assert_eq!(Direction::Backward.select([7, 2, 9].into_iter()), Some(9));
        assert_eq!(Direction::Forward.select(std::iter::empty()), None);
    }

    #[test]
    #[should_panic(expected = "boundary of an empty slice")]
    fn test_backward_boundary_of_empty_panics() {
        Direction::Backward.boundary(0);
    }
}
