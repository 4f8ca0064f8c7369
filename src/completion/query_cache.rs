use std::cell::RefCell;
use std::collections::HashMap;

use tracing::{debug, info};

use super::dictionary::Dictionary;
use super::top_k::BestList;

/// Prefix cache filled on demand.
///
/// Lookups mutate the map, so the cache is `!Sync`. Share it between threads
/// only behind a lock.
#[derive(Debug, Default)]
pub struct LazyQueryCache {
    cache: RefCell<HashMap<String, BestList>>,
}

impl LazyQueryCache {
    pub fn new() -> LazyQueryCache {
        LazyQueryCache::default()
    }

    pub fn get_or_compute<F>(&self, prefix: &str, compute: F) -> BestList
    where
        F: FnOnce() -> BestList,
    {
        if let Some(best) = self.cache.borrow().get(prefix) {
            return best.clone();
        }
        let best = compute();
        self.cache
            .borrow_mut()
            .insert(prefix.to_string(), best.clone());
        best
    }

    pub fn len(&self) -> usize {
        self.cache.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.borrow().is_empty()
    }
}

/// Prefix cache filled once for every prefix of every dictionary word.
/// It is read-only afterwards and may be shared between threads freely.
#[derive(Debug, Default)]
pub struct PrecomputedQueryCache {
    cache: HashMap<String, BestList>,
}

impl PrecomputedQueryCache {
    pub fn build<F>(dictionary: &Dictionary, mut compute: F) -> PrecomputedQueryCache
    where
        F: FnMut(&str) -> BestList,
    {
        info!(entries = dictionary.len(), "precomputing completions of every prefix");
        let mut cache = HashMap::new();
        cache.insert(String::new(), compute(""));
        for entry in dictionary {
            let word = entry.word();
            for (start, c) in word.char_indices() {
                let prefix = &word[..start + c.len_utf8()];
                if !cache.contains_key(prefix) {
                    let best = compute(prefix);
                    cache.insert(prefix.to_string(), best);
                }
            }
        }
        info!(prefixes = cache.len(), "precomputation completed");
        PrecomputedQueryCache { cache }
    }

    /// Never computes: a prefix missing from the cache has no completions.
    pub fn get(&self, prefix: &str) -> BestList {
        match self.cache.get(prefix) {
            Some(best) => best.clone(),
            None => {
                debug!(prefix, "prefix was not precomputed");
                BestList::empty()
            }
        }
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}
