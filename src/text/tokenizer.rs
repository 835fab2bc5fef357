//! Word tokenizer for lookup input.
//!
//! Splits raw text on non-word characters, removes stopwords and duplicates,
//! and keeps the first-occurrence order.

use super::Stopwords;
use regex::Regex;
use std::collections::HashSet;

/// Turns raw input text into the word list handed to the lookup engine.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    word_pattern: Regex,
    stopwords: Option<Stopwords>,
}

impl Tokenizer {
    /// Creates a tokenizer. `stopwords = None` keeps every word.
    pub fn new(stopwords: Option<Stopwords>) -> Self {
        Self {
            // Letters, digits and underscore; everything else separates words
            word_pattern: Regex::new(r"\w+").expect("word pattern is valid"),
            stopwords,
        }
    }

    /// Tokenizes `text` into unique words in first-occurrence order.
    pub fn parse(&self, text: &str) -> Vec<String> {
        let mut seen = HashSet::new();
        self.word_pattern
            .find_iter(text)
            .map(|m| m.as_str())
            .filter(|w| !self.is_stopword(w))
            .filter(|w| seen.insert(w.to_string()))
            .map(String::from)
            .collect()
    }

    fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.as_ref().is_some_and(|s| s.contains(word))
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new(Some(Stopwords::default()))
    }
}
