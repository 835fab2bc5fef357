//! Lexical database abstraction for wordpos.
//!
//! Provides a trait-based interface for lexical lookups, allowing
//! different backends (WordNet files, in-memory lexicons) to be used
//! interchangeably by the fan-out engine.

mod mock;
mod types;
mod wordnet;

pub use mock::{FailingProvider, MemoryProvider};
pub use types::{normalize_lemma, split_gloss, Category, RandomQuery, Sense};
pub use wordnet::WordNetProvider;

use crate::error::{Result, WordposError};
use async_trait::async_trait;
use rand::seq::SliceRandom;
use std::path::PathBuf;
use tracing::debug;

/// Which lexical backend to open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexiconSource {
    /// A WordNet `dict/` directory on disk.
    WordNet(PathBuf),
    /// The built-in sample lexicon.
    Sample,
}

/// Creates a lexical provider for the given source.
///
/// This is the central factory function for lexicon backends.
pub async fn connect(source: &LexiconSource) -> Result<Box<dyn LexicalProvider>> {
    match source {
        LexiconSource::WordNet(dir) => {
            let provider = WordNetProvider::open(dir).await?;
            debug!("Opened WordNet dictionary at {}", provider.dir().display());
            Ok(Box::new(provider))
        }
        LexiconSource::Sample => Ok(Box::new(MemoryProvider::sample())),
    }
}

/// Trait defining the interface for lexical providers.
///
/// Every call settles exactly once. Failures are reported as errors and the
/// caller decides whether they are fatal.
#[async_trait]
pub trait LexicalProvider: Send + Sync {
    /// Returns the words of `words` that have an entry in `category`, in input order.
    async fn filter_words(&self, category: Category, words: &[String]) -> Result<Vec<String>>;

    /// Looks up the senses of `word` within one category.
    async fn lookup(&self, category: Category, word: &str) -> Result<Vec<Sense>>;

    /// Looks up the senses of `word` across all categories.
    async fn lookup_definition(&self, word: &str) -> Result<Vec<Sense>> {
        let mut senses = Vec::new();
        for category in Category::ALL {
            senses.extend(self.lookup(category, word).await?);
        }
        Ok(senses)
    }

    /// Samples random lemmas, optionally restricted to one category.
    async fn lookup_random(
        &self,
        category: Option<Category>,
        query: &RandomQuery,
    ) -> Result<Vec<String>>;
}

/// Returns an error for a word that cannot be normalized into a lemma.
pub(crate) fn empty_word_error() -> WordposError {
    WordposError::provider("Cannot look up an empty word")
}

/// Picks up to `count` distinct lemmas from `candidates` at random.
pub(crate) fn sample_lemmas(mut candidates: Vec<String>, count: usize) -> Vec<String> {
    candidates.sort();
    candidates.dedup();
    let mut rng = rand::thread_rng();
    candidates
        .choose_multiple(&mut rng, count)
        .cloned()
        .collect()
}
