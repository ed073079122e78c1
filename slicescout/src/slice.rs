//! Small sequential helpers for unsorted slices.

/// Whether any element satisfies `predicate`. Without a predicate this is
/// "the slice has at least one element".
pub fn any<T, P>(seq: &[T], predicate: Option<P>) -> bool
where
    P: Fn(usize, &T) -> bool,
{
    match predicate {
        Some(predicate) => seq
            .iter()
            .enumerate()
            .any(|(index, value)| predicate(index, value)),
        None => !seq.is_empty(),
    }
}

/// Whether every element satisfies `predicate`; vacuously true when empty
pub fn all<T, P>(seq: &[T], predicate: P) -> bool
where
    P: Fn(usize, &T) -> bool,
{
    seq.iter()
        .enumerate()
        .all(|(index, value)| predicate(index, value))
}

/// The slice without its first element.
///
/// # Panics
///
/// Panics if `seq` is empty.
pub fn remove_first<T>(seq: &[T]) -> &[T] {
    &seq[1..]
}

/// The slice without its last element.
///
/// # Panics
///
/// Panics if `seq` is empty.
pub fn remove_last<T>(seq: &[T]) -> &[T] {
    &seq[..seq.len() - 1]
}
