pub mod all_completions;
pub mod binary_dictionary;
pub mod dictionary;
pub mod entry;
pub mod error;
pub mod index;
pub mod loader;
pub mod query_cache;
pub mod range_finder;
pub mod top_k;

pub use error::{Error, LineError, Result};

/// How many completions `ten_best` returns at most.
pub const BEST_COMPLETIONS: usize = 10;
