use tracing::debug;

use super::all_completions::AllCompletions;
use super::dictionary::Dictionary;
use super::query_cache::{LazyQueryCache, PrecomputedQueryCache};
use super::top_k::{select_best, BestList};
use super::BEST_COMPLETIONS;

/// Prefix completion over a fixed dictionary.
pub trait CompletionIndex {
    fn dictionary(&self) -> &Dictionary;

    /// All entries starting with `prefix`, in dictionary order. Never cached.
    fn all_completions(&self, prefix: &str) -> AllCompletions<'_> {
        AllCompletions::new(self.dictionary(), prefix)
    }

    /// Up to ten entries starting with `prefix`, best first.
    fn ten_best(&self, prefix: &str) -> BestList;
}

fn compute_ten_best(dictionary: &Dictionary, prefix: &str) -> BestList {
    let best = select_best(&AllCompletions::new(dictionary, prefix), BEST_COMPLETIONS);
    if best.is_empty() {
        debug!(prefix, "no completions");
    }
    best
}

/// Computes ten-best lists on first request and caches them.
/// Not `Sync`; wrap it in a `Mutex` to share it between threads.
#[derive(Debug)]
pub struct LazyCompletionIndex {
    dictionary: Dictionary,
    cache: LazyQueryCache,
}

impl LazyCompletionIndex {
    pub fn new(dictionary: Dictionary) -> LazyCompletionIndex {
        LazyCompletionIndex {
            dictionary,
            cache: LazyQueryCache::new(),
        }
    }
}

impl CompletionIndex for LazyCompletionIndex {
    fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    fn ten_best(&self, prefix: &str) -> BestList {
        self.cache
            .get_or_compute(prefix, || compute_ten_best(&self.dictionary, prefix))
    }
}

/// Computes the ten-best list of every prefix of every word up front.
/// Queries only read the cache, so the index can be shared through an `Arc`.
#[derive(Debug)]
pub struct PrecomputedCompletionIndex {
    dictionary: Dictionary,
    cache: PrecomputedQueryCache,
}

impl PrecomputedCompletionIndex {
    pub fn new(dictionary: Dictionary) -> PrecomputedCompletionIndex {
        let cache =
            PrecomputedQueryCache::build(&dictionary, |prefix| compute_ten_best(&dictionary, prefix));
        PrecomputedCompletionIndex { dictionary, cache }
    }

    pub fn cached_prefixes(&self) -> usize {
        self.cache.len()
    }
}

impl CompletionIndex for PrecomputedCompletionIndex {
    fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    fn ten_best(&self, prefix: &str) -> BestList {
        self.cache.get(prefix)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThreadSafety {
    #[default]
    None,
    ThreadSafe,
}

/// One of the two index implementations, picked by `ThreadSafety`.
#[derive(Debug)]
pub enum Completer {
    Lazy(LazyCompletionIndex),
    Precomputed(PrecomputedCompletionIndex),
}

impl Completer {
    pub fn build(dictionary: Dictionary, thread_safety: ThreadSafety) -> Completer {
        match thread_safety {
            ThreadSafety::None => Completer::Lazy(LazyCompletionIndex::new(dictionary)),
            ThreadSafety::ThreadSafe => {
                Completer::Precomputed(PrecomputedCompletionIndex::new(dictionary))
            }
        }
    }
}

impl CompletionIndex for Completer {
    fn dictionary(&self) -> &Dictionary {
        match self {
            Completer::Lazy(index) => index.dictionary(),
            Completer::Precomputed(index) => index.dictionary(),
        }
    }

    fn ten_best(&self, prefix: &str) -> BestList {
        match self {
            Completer::Lazy(index) => index.ten_best(prefix),
            Completer::Precomputed(index) => index.ten_best(prefix),
        }
    }
}
