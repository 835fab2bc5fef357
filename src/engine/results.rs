//! Aggregated lookup results.

use crate::lexicon::{Category, Sense};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Key of a result map entry: a category label, a word, or `""` for
/// "no category".
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResultKey(String);

impl ResultKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Key for a category, or the empty key when there is none.
    pub fn category(category: Option<Category>) -> Self {
        Self(category.map(|c| c.label()).unwrap_or_default().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResultKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One item of a result set.
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ResultItem {
    Word(String),
    Sense(Sense),
}

impl fmt::Debug for ResultItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Word(word) => fmt::Debug::fmt(word, f),
            Self::Sense(sense) => fmt::Debug::fmt(sense, f),
        }
    }
}

impl From<String> for ResultItem {
    fn from(word: String) -> Self {
        Self::Word(word)
    }
}

impl From<Sense> for ResultItem {
    fn from(sense: Sense) -> Self {
        Self::Sense(sense)
    }
}

/// The contributions accumulated under one key.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ResultEntry {
    key: ResultKey,
    /// Lowest plan position that contributed; orders entries.
    rank: usize,
    /// Contributions by plan position, so arrival order does not matter.
    parts: BTreeMap<usize, Vec<ResultItem>>,
}

impl ResultEntry {
    fn items(&self) -> impl Iterator<Item = &ResultItem> {
        self.parts.values().flatten()
    }

    fn len(&self) -> usize {
        self.parts.values().map(Vec::len).sum()
    }
}

/// Results of one run, keyed by category or by word.
///
/// Entries only grow: a contribution for an existing key is appended, never
/// substituted. Iteration follows plan order, not arrival order.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ResultMap {
    entries: Vec<ResultEntry>,
}

impl ResultMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a map with a single entry of plain words.
    pub fn from_words(key: impl Into<String>, words: &[String]) -> Self {
        let mut map = Self::new();
        map.merge(
            ResultKey::new(key),
            0,
            words.iter().cloned().map(ResultItem::Word).collect(),
        );
        map
    }

    /// Merges the result of the call at plan position `seq` under `key`.
    pub fn merge(&mut self, key: ResultKey, seq: usize, items: Vec<ResultItem>) {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.key == key) {
            entry.parts.entry(seq).or_default().extend(items);
            if seq < entry.rank {
                entry.rank = seq;
                self.entries.sort_by_key(|e| e.rank);
            }
            return;
        }

        let position = self.entries.partition_point(|e| e.rank < seq);
        self.entries.insert(
            position,
            ResultEntry {
                key,
                rank: seq,
                parts: BTreeMap::from([(seq, items)]),
            },
        );
    }

    /// Returns the accumulated items for `key`.
    pub fn get(&self, key: &str) -> Option<Vec<&ResultItem>> {
        self.entry(key).map(|e| e.items().collect())
    }

    /// Returns the number of items accumulated under `key` (0 if absent).
    pub fn count(&self, key: &str) -> usize {
        self.entry(key).map_or(0, ResultEntry::len)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entry(key).is_some()
    }

    /// Iterates over keys and their accumulated items in plan order.
    pub fn iter(&self) -> impl Iterator<Item = (&ResultKey, Vec<&ResultItem>)> {
        self.entries.iter().map(|e| (&e.key, e.items().collect()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &ResultKey> {
        self.entries.iter().map(|e| &e.key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn entry(&self, key: &str) -> Option<&ResultEntry> {
        self.entries.iter().find(|e| e.key.as_str() == key)
    }
}

impl fmt::Debug for ResultMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.entries.iter().map(|e| (e.key.as_str(), e.items().collect::<Vec<_>>())))
            .finish()
    }
}

/// Items of one entry, serialized as a flat sequence.
struct EntryItems<'a>(&'a ResultEntry);

impl Serialize for EntryItems<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.0.len()))?;
        for item in self.0.items() {
            seq.serialize_element(item)?;
        }
        seq.end()
    }
}

impl Serialize for ResultMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(entry.key.as_str(), &EntryItems(entry))?;
        }
        map.end()
    }
}
