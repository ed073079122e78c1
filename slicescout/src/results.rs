/// Search result types.
///
/// A successful search borrows the matching element from the caller's slice
/// instead of copying it, so `Match` carries the lifetime of the searched
/// sequence. "Not found" is never encoded in the index: it is the `None` of
/// the surrounding `Option` (or [`SearchError::NotFound`](crate::SearchError)
/// for the `try_*` functions).
use serde::Serialize;
use std::ops::Range;

/// The element a search settled on
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct Match<'a, T> {
    /// Position of the element in the searched slice
    pub index: usize,
    /// The element itself
    pub value: &'a T,
}

impl<'a, T> Match<'a, T> {
    pub(crate) fn at(seq: &'a [T], index: usize) -> Self {
        Self {
            index,
            value: &seq[index],
        }
    }

    /// Returns an owned copy of the matched value
    pub fn cloned(&self) -> (usize, T)
    where
        T: Clone,
    {
        (self.index, self.value.clone())
    }
}

// Manual impls: derives would require `T: Clone`/`T: Copy`.
impl<T> Clone for Match<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Match<'_, T> {}

/// The outcome of one worker over its partition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerResult {
    /// The partition the worker scanned
    pub range: Range<usize>,
    /// Global index of the worker's local answer, if any
    pub found: Option<usize>,
}
