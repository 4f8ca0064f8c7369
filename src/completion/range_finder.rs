use std::cmp::Ordering;

use super::dictionary::Dictionary;
use super::entry::Entry;

/// Inclusive index range of the dictionary entries sharing a prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrefixRange {
    pub first: usize,
    pub last: usize,
}

impl PrefixRange {
    pub fn len(&self) -> usize {
        self.last - self.first + 1
    }
}

/// Compares the first `prefix.len()` bytes of `word` with `prefix`.
/// A word that runs out of bytes before the prefix does compares as less.
fn compare_prefix(word: &[u8], prefix: &[u8]) -> Ordering {
    if word.len() < prefix.len() {
        match word.cmp(&prefix[..word.len()]) {
            Ordering::Equal => Ordering::Less,
            ordering => ordering,
        }
    } else {
        word[..prefix.len()].cmp(prefix)
    }
}

struct RangeFinder<'a> {
    entries: &'a [Entry],
    prefix: &'a [u8],
}

impl<'a> RangeFinder<'a> {
    fn compare(&self, index: usize) -> Ordering {
        compare_prefix(self.entries[index].word().as_bytes(), self.prefix)
    }

    fn matches(&self, index: usize) -> bool {
        self.compare(index) == Ordering::Equal
    }

    /// Looks for any matching index. Returns it together with the narrowed
    /// `left`/`right` bounds that enclose the whole matching run.
    fn find_any(&self) -> Option<(usize, usize, usize)> {
        let mut left = 0;
        let mut right = self.entries.len() - 1;
        loop {
            let current = (left + right) / 2;
            match self.compare(current) {
                Ordering::Equal => return Some((current, left, right)),
                Ordering::Less => left = current,
                Ordering::Greater => right = current,
            }
            if right - left <= 1 {
                break;
            }
        }
        // The loop never examines the outermost elements unless they are a
        // midpoint, so a match may still sit on either edge.
        if left == 0 && self.matches(0) {
            return Some((0, left, right));
        }
        let last = self.entries.len() - 1;
        if right == last && self.matches(last) {
            return Some((last, left, right));
        }
        None
    }

    /// Moves from a matching `internal` index towards `outer` and returns the
    /// outermost index that still matches. `internal` always matches,
    /// `outer` may not.
    fn clarify_border(&self, mut internal: usize, mut outer: usize) -> usize {
        while internal.abs_diff(outer) > 1 {
            let test = (internal + outer) / 2;
            if self.matches(test) {
                internal = test;
            } else {
                outer = test;
            }
        }
        if self.matches(outer) {
            outer
        } else {
            internal
        }
    }
}

/// Finds the range of entries whose word starts with `prefix` with three
/// binary searches: one for any match and one for each border.
pub fn find_range(dictionary: &Dictionary, prefix: &str) -> Option<PrefixRange> {
    if dictionary.is_empty() {
        return None;
    }
    let finder = RangeFinder {
        entries: dictionary.entries(),
        prefix: prefix.as_bytes(),
    };
    let (found, left, right) = finder.find_any()?;
    Some(PrefixRange {
        first: finder.clarify_border(found, left),
        last: finder.clarify_border(found, right),
    })
}
