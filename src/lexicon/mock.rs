//! In-memory lexical providers for testing.
//!
//! Provides a deterministic lexicon with optional artificial latency, plus a
//! provider whose every call fails.

use super::{empty_word_error, normalize_lemma, sample_lemmas, Category, LexicalProvider};
use super::{RandomQuery, Sense};
use crate::error::{Result, WordposError};
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// A lexicon held entirely in memory.
#[derive(Debug, Default)]
pub struct MemoryProvider {
    entries: BTreeMap<Category, BTreeMap<String, Vec<Sense>>>,
    /// Artificial latency keyed by word or category label.
    latency: HashMap<String, Duration>,
    calls: AtomicUsize,
}

impl MemoryProvider {
    /// Creates an empty lexicon.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a sense for `lemma` in `category`.
    pub fn with_sense(mut self, category: Category, lemma: &str, gloss: &str) -> Self {
        let lemma = normalize_lemma(lemma);
        let mut sense = Sense::new(category, lemma.clone(), gloss);
        sense.synonyms = vec![lemma.clone()];
        self.entries
            .entry(category)
            .or_default()
            .entry(lemma)
            .or_default()
            .push(sense);
        self
    }

    /// Delays every call whose word (or category label, for list filtering)
    /// equals `key`.
    pub fn with_latency(mut self, key: impl Into<String>, delay: Duration) -> Self {
        self.latency.insert(key.into(), delay);
        self
    }

    /// Number of provider calls made so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// The built-in sample lexicon.
    pub fn sample() -> Self {
        Self::new()
            .with_sense(Category::Noun, "dog", "a member of the genus Canis; \"the dog barked all night\"")
            .with_sense(Category::Noun, "dog", "a dull unattractive unpleasant girl or woman")
            .with_sense(Category::Verb, "dog", "go after with the intent to catch; \"The policeman chased the mugger down the alley\"")
            .with_sense(Category::Noun, "cat", "feline mammal usually having thick soft fur and no ability to roar")
            .with_sense(Category::Noun, "run", "a score in baseball made by a runner touching all four bases safely")
            .with_sense(Category::Verb, "run", "move fast by using one's feet; \"Don't run--you'll be out of breath\"")
            .with_sense(Category::Noun, "bank", "sloping land (especially the slope beside a body of water)")
            .with_sense(Category::Noun, "bank", "a financial institution that accepts deposits and channels the money into lending activities")
            .with_sense(Category::Verb, "bank", "do business with a bank or keep an account at a bank")
            .with_sense(Category::Adjective, "quick", "accomplished rapidly and without delay; \"was quick to make friends\"")
            .with_sense(Category::Adverb, "quick", "with little or no delay")
            .with_sense(Category::Adverb, "quickly", "with rapid movements; \"he works quickly\"")
            .with_sense(Category::Adjective, "happy", "enjoying or showing or marked by joy or pleasure")
            .with_sense(Category::Adjective, "brown", "of a color similar to that of wood or earth")
            .with_sense(Category::Noun, "brown", "an orange of low brightness and saturation")
            .with_sense(Category::Noun, "fox", "alert carnivorous mammal with pointed muzzle and ears and a bushy tail")
            .with_sense(Category::Verb, "jump", "move forward by leaps and bounds")
            .with_sense(Category::Adverb, "lazily", "in a slow and lazy manner")
    }

    async fn delay_for(&self, key: &str) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.latency.get(key) {
            tokio::time::sleep(*delay).await;
        }
    }

    fn senses(&self, category: Category, lemma: &str) -> Vec<Sense> {
        self.entries
            .get(&category)
            .and_then(|words| words.get(lemma))
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl LexicalProvider for MemoryProvider {
    async fn filter_words(&self, category: Category, words: &[String]) -> Result<Vec<String>> {
        self.delay_for(category.label()).await;
        let known = self.entries.get(&category);
        Ok(words
            .iter()
            .filter(|w| known.is_some_and(|k| k.contains_key(&normalize_lemma(w))))
            .cloned()
            .collect())
    }

    async fn lookup(&self, category: Category, word: &str) -> Result<Vec<Sense>> {
        let lemma = normalize_lemma(word);
        if lemma.is_empty() {
            return Err(empty_word_error());
        }
        self.delay_for(word).await;
        Ok(self.senses(category, &lemma))
    }

    async fn lookup_definition(&self, word: &str) -> Result<Vec<Sense>> {
        let lemma = normalize_lemma(word);
        if lemma.is_empty() {
            return Err(empty_word_error());
        }
        self.delay_for(word).await;
        Ok(Category::ALL
            .iter()
            .flat_map(|c| self.senses(*c, &lemma))
            .collect())
    }

    async fn lookup_random(
        &self,
        category: Option<Category>,
        query: &RandomQuery,
    ) -> Result<Vec<String>> {
        self.delay_for(&query.starts_with).await;
        let prefix = normalize_lemma(&query.starts_with);
        let candidates: Vec<String> = self
            .entries
            .iter()
            .filter(|(c, _)| category.map_or(true, |wanted| **c == wanted))
            .flat_map(|(_, words)| words.keys())
            .filter(|lemma| lemma.starts_with(&prefix))
            .cloned()
            .collect();
        Ok(sample_lemmas(candidates, query.count))
    }
}

/// A provider whose every call fails.
#[derive(Debug, Default)]
pub struct FailingProvider;

impl FailingProvider {
    fn failure(what: &str) -> WordposError {
        WordposError::provider(format!("{what} is unavailable"))
    }
}

#[async_trait]
impl LexicalProvider for FailingProvider {
    async fn filter_words(&self, category: Category, _words: &[String]) -> Result<Vec<String>> {
        Err(Self::failure(category.label()))
    }

    async fn lookup(&self, category: Category, _word: &str) -> Result<Vec<Sense>> {
        Err(Self::failure(category.label()))
    }

    async fn lookup_definition(&self, word: &str) -> Result<Vec<Sense>> {
        Err(Self::failure(word))
    }

    async fn lookup_random(
        &self,
        _category: Option<Category>,
        _query: &RandomQuery,
    ) -> Result<Vec<String>> {
        Err(Self::failure("random sampling"))
    }
}
