pub mod config;
pub mod errors;
pub mod metrics;
pub mod results;
pub mod search;
pub mod slice;

pub use config::{
    max_search_length, max_search_workers, set_max_search_length, set_max_search_workers,
    SearchConfig, DEFAULT_MAX_SEARCH_LENGTH, DEFAULT_MAX_SEARCH_WORKERS,
};
pub use errors::{SearchError, SearchResult};
pub use results::Match;
pub use search::{contains, first, index_of, last, try_first, try_last, Direction, Searcher};
