/// This module defines the error types for slicescout.
///
/// Searching distinguishes two very different negative outcomes:
///
/// 1. **Empty input** to [`first`](crate::first) or [`last`](crate::last).
///    There is no boundary element to return, so the call itself is invalid.
///    The panicking entry points abort with [`SearchError::EmptyInput`]'s
///    message; the `try_*` variants hand it back as an `Err`.
///
/// 2. **Nothing matched**. This is an ordinary answer, not a failure. The
///    plain entry points return `None`; the `try_*` variants return
///    [`SearchError::NotFound`] so that callers can use `?`.
///
/// ```rust,ignore
/// match slicescout::try_first(&values, Some(|_: usize, v: &i32| *v > 10)) {
///     Ok(found) => println!("{} at {}", found.value, found.index),
///     Err(SearchError::NotFound) => println!("nothing above 10"),
///     Err(e) => return Err(e),
/// }
/// ```
use thiserror::Error;

/// Result type for search operations
pub type SearchResult<T> = Result<T, SearchError>;

/// Errors that can occur during search operations
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("The slice is empty")]
    EmptyInput,
    #[error("Value not found")]
    NotFound,
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl SearchError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    /// Whether this error is the ordinary "nothing matched" outcome
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }
}

impl From<config::ConfigError> for SearchError {
    fn from(e: config::ConfigError) -> Self {
        Self::config_error(e.to_string())
    }
}
