use std::cell::OnceCell;

use super::dictionary::Dictionary;
use super::entry::Entry;
use super::range_finder::{find_range, PrefixRange};

/// Every dictionary entry that starts with a prefix, in dictionary order.
///
/// The matching range is searched on first use and reused afterwards. The
/// view can be iterated any number of times; each `iter()` starts over.
#[derive(Debug)]
pub struct AllCompletions<'a> {
    dictionary: &'a Dictionary,
    prefix: String,
    range: OnceCell<Option<PrefixRange>>,
}

impl<'a> AllCompletions<'a> {
    pub fn new(dictionary: &'a Dictionary, prefix: impl Into<String>) -> AllCompletions<'a> {
        AllCompletions {
            dictionary,
            prefix: prefix.into(),
            range: OnceCell::new(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn range(&self) -> Option<PrefixRange> {
        *self
            .range
            .get_or_init(|| find_range(self.dictionary, &self.prefix))
    }

    pub fn len(&self) -> usize {
        self.range().map_or(0, |range| range.len())
    }

    pub fn is_empty(&self) -> bool {
        self.range().is_none()
    }

    pub fn iter(&self) -> CompletionsIter<'a> {
        let entries = self.dictionary.entries();
        match self.range() {
            Some(range) => CompletionsIter {
                entries,
                position: range.first,
                end: range.last + 1,
            },
            None => CompletionsIter {
                entries,
                position: 0,
                end: 0,
            },
        }
    }
}

impl<'a, 'b> IntoIterator for &'b AllCompletions<'a> {
    type Item = &'a Entry;
    type IntoIter = CompletionsIter<'a>;

    fn into_iter(self) -> CompletionsIter<'a> {
        self.iter()
    }
}

#[derive(Debug, Clone)]
pub struct CompletionsIter<'a> {
    entries: &'a [Entry],
    position: usize,
    end: usize,
}

impl<'a> Iterator for CompletionsIter<'a> {
    type Item = &'a Entry;

    fn next(&mut self) -> Option<&'a Entry> {
        if self.position < self.end {
            let entry = &self.entries[self.position];
            self.position += 1;
            Some(entry)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end - self.position;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for CompletionsIter<'_> {}
