//! Lexical types for wordpos.
//!
//! Defines the part-of-speech categories and the entries a provider returns.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A grammatical part-of-speech class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Noun,
    Adjective,
    Verb,
    Adverb,
}

impl Category {
    /// All categories, in canonical order.
    pub const ALL: [Category; 4] = [
        Category::Noun,
        Category::Adjective,
        Category::Verb,
        Category::Adverb,
    ];

    /// Returns the display label ("Noun", "Adjective", ...).
    pub fn label(&self) -> &'static str {
        match self {
            Self::Noun => "Noun",
            Self::Adjective => "Adjective",
            Self::Verb => "Verb",
            Self::Adverb => "Adverb",
        }
    }

    /// Returns the WordNet file suffix (`index.noun`, `data.adj`, ...).
    pub fn file_suffix(&self) -> &'static str {
        match self {
            Self::Noun => "noun",
            Self::Adjective => "adj",
            Self::Verb => "verb",
            Self::Adverb => "adv",
        }
    }

    /// Returns the WordNet part-of-speech letter.
    pub fn pos_letter(&self) -> char {
        match self {
            Self::Noun => 'n',
            Self::Adjective => 'a',
            Self::Verb => 'v',
            Self::Adverb => 'r',
        }
    }

    /// Maps a WordNet synset type letter to a category.
    ///
    /// Adjective satellites (`s`) belong to [`Category::Adjective`].
    pub fn from_pos_letter(letter: char) -> Option<Self> {
        match letter {
            'n' => Some(Self::Noun),
            'a' | 's' => Some(Self::Adjective),
            'v' => Some(Self::Verb),
            'r' => Some(Self::Adverb),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "noun" | "n" => Ok(Self::Noun),
            "adjective" | "adj" | "a" => Ok(Self::Adjective),
            "verb" | "v" => Ok(Self::Verb),
            "adverb" | "adv" | "r" => Ok(Self::Adverb),
            _ => Err(format!("Unknown category: {}", s)),
        }
    }
}

/// One sense (synset membership) of a word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sense {
    /// Byte offset of the synset in its data file.
    pub synset_offset: u64,
    /// Lexicographer file number.
    pub lex_filenum: u8,
    /// Synset type letter as found in the data file (`n`, `v`, `a`, `s`, `r`).
    pub pos: String,
    /// Category the sense belongs to.
    pub category: Category,
    /// The looked-up lemma.
    pub lemma: String,
    /// All words of the synset.
    pub synonyms: Vec<String>,
    /// Full gloss text.
    pub gloss: String,
    /// Definition part of the gloss.
    pub def: String,
    /// Example sentences from the gloss.
    pub exp: Vec<String>,
}

impl Sense {
    /// Creates a sense with a gloss, splitting definition and examples.
    pub fn new(category: Category, lemma: impl Into<String>, gloss: impl Into<String>) -> Self {
        let gloss = gloss.into();
        let (def, exp) = split_gloss(&gloss);
        Self {
            synset_offset: 0,
            lex_filenum: 0,
            pos: category.pos_letter().to_string(),
            category,
            lemma: lemma.into(),
            synonyms: Vec::new(),
            gloss,
            def,
            exp,
        }
    }
}

/// Splits a WordNet gloss into its definition and quoted examples.
///
/// `"a domestic dog; \"the dog barked\""` yields
/// `("a domestic dog", ["the dog barked"])`.
pub fn split_gloss(gloss: &str) -> (String, Vec<String>) {
    let mut parts = gloss.split("; \"");
    let def = parts.next().unwrap_or_default().trim().to_string();
    let exp = parts
        .map(|p| p.trim().trim_end_matches(';').trim().trim_matches('"').to_string())
        .filter(|p| !p.is_empty())
        .collect();
    (def, exp)
}

/// Query for random word sampling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RandomQuery {
    /// Prefix the sampled lemmas must start with (empty = any).
    pub starts_with: String,
    /// Number of lemmas to sample.
    pub count: usize,
}

impl RandomQuery {
    pub fn new(starts_with: impl Into<String>, count: usize) -> Self {
        Self {
            starts_with: starts_with.into(),
            count,
        }
    }
}

/// Normalizes a word into WordNet lemma form.
///
/// Lowercases, trims and replaces inner spaces with underscores.
pub fn normalize_lemma(word: &str) -> String {
    word.trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}
