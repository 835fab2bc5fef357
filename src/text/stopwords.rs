//! English stopword list.

use std::collections::HashSet;

/// The classic English stopword list: common function words, single letters,
/// digits, `$` and `_`.
pub const STOPWORDS: &[&str] = &[
    "about", "after", "all", "also", "am", "an", "and", "another", "any", "are", "as", "at", "be",
    "because", "been", "before", "being", "between", "both", "but", "by", "came", "can", "come",
    "could", "did", "do", "each", "for", "from", "get", "got", "has", "had", "he", "have", "her",
    "here", "him", "himself", "his", "how", "if", "in", "into", "is", "it", "like", "make",
    "many", "me", "might", "more", "most", "much", "must", "my", "never", "now", "of", "on",
    "only", "or", "other", "our", "out", "over", "said", "same", "see", "should", "since", "some",
    "still", "such", "take", "than", "that", "the", "their", "them", "then", "there", "these",
    "they", "this", "those", "through", "to", "too", "under", "up", "very", "was", "way", "we",
    "well", "were", "what", "where", "which", "while", "who", "with", "would", "you", "your",
    "a", "b", "c", "d", "e", "f", "g", "h", "i", "j", "k", "l", "m", "n", "o", "p", "q", "r", "s",
    "t", "u", "v", "w", "x", "y", "z", "$", "1", "2", "3", "4", "5", "6", "7", "8", "9", "0", "_",
];

/// A set of stopwords, matched case-insensitively.
#[derive(Debug, Clone)]
pub struct Stopwords {
    words: Vec<String>,
    lookup: HashSet<String>,
}

impl Stopwords {
    /// Creates the default English list extended with `extra` words.
    pub fn with_extra<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut words: Vec<String> = STOPWORDS.iter().map(|w| w.to_string()).collect();
        for word in extra {
            let word = word.as_ref().trim().to_lowercase();
            if !word.is_empty() && !words.contains(&word) {
                words.push(word);
            }
        }
        let lookup = words.iter().cloned().collect();
        Self { words, lookup }
    }

    /// Returns true if `word` is a stopword.
    pub fn contains(&self, word: &str) -> bool {
        self.lookup.contains(&word.to_lowercase())
    }

    /// Returns the stopwords in list order.
    pub fn words(&self) -> &[String] {
        &self.words
    }
}

impl Default for Stopwords {
    fn default() -> Self {
        Self::with_extra(std::iter::empty::<&str>())
    }
}
