use std::cmp::Ordering;

/// A dictionary word together with its frequency in the source texts.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Entry {
    word: String,
    frequency: u64,
}

impl Entry {
    pub fn new(word: impl Into<String>, frequency: u64) -> Entry {
        Entry {
            word: word.into(),
            frequency,
        }
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    pub fn frequency(&self) -> u64 {
        self.frequency
    }

    /// Ranking order of completions: higher frequency first, then the word in
    /// ordinal order. `Less` means `self` ranks better than `other`.
    pub fn rank_cmp(&self, other: &Entry) -> Ordering {
        other
            .frequency
            .cmp(&self.frequency)
            .then_with(|| self.word.as_bytes().cmp(other.word.as_bytes()))
    }

    /// Ordinal comparison by word only, used to sort the dictionary.
    pub fn word_cmp(&self, other: &Entry) -> Ordering {
        self.word.as_bytes().cmp(other.word.as_bytes())
    }
}
