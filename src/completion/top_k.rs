use std::cmp::Ordering;
use std::ops::Deref;
use std::sync::Arc;

use super::entry::Entry;

/// The best completions of a prefix, best first. Clones share the same
/// entries, so a cached list can be handed out freely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BestList {
    entries: Arc<[Entry]>,
}

impl BestList {
    pub fn empty() -> BestList {
        BestList {
            entries: Arc::from(Vec::new()),
        }
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(Entry::word)
    }
}

impl Default for BestList {
    fn default() -> BestList {
        BestList::empty()
    }
}

impl Deref for BestList {
    type Target = [Entry];

    fn deref(&self) -> &[Entry] {
        &self.entries
    }
}

impl<'a> IntoIterator for &'a BestList {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Keeps the `limit` best entries seen so far, sorted by `Entry::rank_cmp`.
#[derive(Debug)]
pub struct TopK<'a> {
    limit: usize,
    best: Vec<&'a Entry>,
}

impl<'a> TopK<'a> {
    pub fn new(limit: usize) -> TopK<'a> {
        TopK {
            limit,
            best: Vec::with_capacity(limit),
        }
    }

    pub fn push(&mut self, entry: &'a Entry) {
        if self.limit == 0 {
            return;
        }
        if self.best.len() == self.limit {
            // A candidate that would land past the end is dropped before the
            // binary search.
            let worst = self.best[self.limit - 1];
            if entry.rank_cmp(worst) != Ordering::Less {
                return;
            }
            self.best.pop();
        }
        let position = match self.best.binary_search_by(|kept| kept.rank_cmp(entry)) {
            Ok(i) | Err(i) => i,
        };
        self.best.insert(position, entry);
    }

    pub fn len(&self) -> usize {
        self.best.len()
    }

    pub fn is_empty(&self) -> bool {
        self.best.is_empty()
    }

    pub fn finish(self) -> BestList {
        let entries: Vec<Entry> = self.best.into_iter().cloned().collect();
        BestList {
            entries: Arc::from(entries),
        }
    }
}

/// Selects the `limit` best entries of `source` without sorting all of it.
pub fn select_best<'a, I>(source: I, limit: usize) -> BestList
where
    I: IntoIterator<Item = &'a Entry>,
{
    let mut top = TopK::new(limit);
    for entry in source {
        top.push(entry);
    }
    top.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::completion::BEST_COMPLETIONS;
    use rand::prelude::*;

    fn full_sort(entries: &[Entry], limit: usize) -> Vec<Entry> {
        let mut sorted = entries.to_vec();
        sorted.sort_by(Entry::rank_cmp);
        sorted.truncate(limit);
        sorted
    }

    #[test]
    fn orders_by_frequency_then_word() {
        let entries = vec![
            Entry::new("abb", 3),
            Entry::new("aaa", 5),
            Entry::new("abc", 5),
        ];
        let best = select_best(&entries, BEST_COMPLETIONS);
        assert_eq!(best.words().collect::<Vec<_>>(), vec!["aaa", "abc", "abb"]);
    }

    #[test]
    fn keeps_only_the_limit() {
        let entries: Vec<Entry> = (0..25).map(|i| Entry::new(format!("w{:02}", i), i)).collect();
        let best = select_best(&entries, BEST_COMPLETIONS);
        assert_eq!(best.len(), BEST_COMPLETIONS);
        let frequencies: Vec<u64> = best.iter().map(Entry::frequency).collect();
        assert_eq!(frequencies, (15..25).rev().collect::<Vec<u64>>());
    }

    #[test]
    fn fewer_entries_than_limit() {
        let entries = vec![Entry::new("b", 1), Entry::new("a", 1)];
        let best = select_best(&entries, BEST_COMPLETIONS);
        assert_eq!(best.words().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn empty_source_gives_empty_list() {
        let best = select_best(&Vec::<Entry>::new(), BEST_COMPLETIONS);
        assert!(best.is_empty());
        assert_eq!(best, BestList::empty());
    }

    #[test]
    fn zero_limit_gives_empty_list() {
        let entries = vec![Entry::new("a", 1)];
        assert!(select_best(&entries, 0).is_empty());
    }

    #[test]
    fn candidate_tied_with_worst_is_rejected() {
        let mut entries: Vec<Entry> = (0..10).map(|i| Entry::new(format!("a{}", i), 5)).collect();
        entries.push(Entry::new("a9", 5));
        entries.push(Entry::new("b", 5));
        let best = select_best(&entries, BEST_COMPLETIONS);
        let words: Vec<&str> = best.words().collect();
        assert_eq!(words.len(), 10);
        assert_eq!(words[9], "a9");
        assert!(!words.contains(&"b"));
    }

    #[test]
    fn input_order_does_not_matter() {
        let mut rng = rand::rng();
        let entries: Vec<Entry> = (0..200)
            .map(|i| Entry::new(format!("word{}", i % 37), rng.random_range(0..20)))
            .collect();
        let expected = full_sort(&entries, BEST_COMPLETIONS);

        let mut ascending = entries.clone();
        ascending.sort_by(|a, b| b.rank_cmp(a));
        let mut descending = entries.clone();
        descending.sort_by(Entry::rank_cmp);
        let mut shuffled = entries.clone();
        shuffled.shuffle(&mut rng);

        for source in [&entries, &ascending, &descending, &shuffled] {
            assert_eq!(select_best(source.iter(), BEST_COMPLETIONS).entries(), &expected[..]);
        }
    }

    #[test]
    fn matches_full_sort_on_random_input() {
        let mut rng = rand::rng();
        for _ in 0..100 {
            let size = rng.random_range(0..60);
            let entries: Vec<Entry> = (0..size)
                .map(|_| {
                    let word: String = (0..rng.random_range(1..4))
                        .map(|_| rng.random_range(b'a'..=b'd') as char)
                        .collect();
                    Entry::new(word, rng.random_range(0..8))
                })
                .collect();
            let limit = rng.random_range(0..15);
            assert_eq!(select_best(&entries, limit).entries(), &full_sort(&entries, limit)[..]);
        }
    }
}
