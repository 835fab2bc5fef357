//! WordNet database provider.
//!
//! Reads a WordNet 3.x `dict/` directory. Index files are loaded lazily, once
//! per category; synsets are read by seeking to their byte offset in the
//! matching data file.

use super::{empty_word_error, normalize_lemma, sample_lemmas, split_gloss};
use super::{Category, LexicalProvider, RandomQuery, Sense};
use crate::error::{Result, WordposError};
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::io::SeekFrom;
use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, AsyncSeekExt, BufReader};
use tokio::sync::{Mutex, OnceCell};
use tracing::debug;

/// Lemma table parsed from one `index.<pos>` file.
#[derive(Debug, Default)]
pub struct IndexTable {
    /// Lemma to synset offsets, sorted by lemma.
    lemmas: BTreeMap<String, Vec<u64>>,
}

impl IndexTable {
    /// Parses the contents of an index file.
    ///
    /// Lines starting with a space belong to the license header and are skipped.
    pub fn parse(content: &str) -> Result<Self> {
        let mut lemmas = BTreeMap::new();
        for (line_no, line) in content.lines().enumerate() {
            if line.starts_with(' ') || line.trim().is_empty() {
                continue;
            }
            let (lemma, offsets) = parse_index_line(line).ok_or_else(|| {
                WordposError::provider(format!("Malformed index line {}: {line}", line_no + 1))
            })?;
            lemmas.insert(lemma, offsets);
        }
        Ok(Self { lemmas })
    }

    /// Returns the synset offsets for a lemma.
    pub fn offsets(&self, lemma: &str) -> Option<&[u64]> {
        self.lemmas.get(lemma).map(Vec::as_slice)
    }

    /// Returns true if the lemma has an entry.
    pub fn contains(&self, lemma: &str) -> bool {
        self.lemmas.contains_key(lemma)
    }

    /// Returns all lemmas starting with `prefix`, in sorted order.
    pub fn with_prefix<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'a String> + 'a {
        self.lemmas
            .range(prefix.to_string()..)
            .map(|(lemma, _)| lemma)
            .take_while(move |lemma| lemma.starts_with(prefix))
    }

    pub fn len(&self) -> usize {
        self.lemmas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lemmas.is_empty()
    }
}

/// `lemma pos synset_cnt p_cnt [ptr_symbol...] sense_cnt tagsense_cnt synset_offset...`
fn parse_index_line(line: &str) -> Option<(String, Vec<u64>)> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let lemma = fields.first()?.to_string();
    let synset_cnt: usize = fields.get(2)?.parse().ok()?;
    let p_cnt: usize = fields.get(3)?.parse().ok()?;
    // sense_cnt and tagsense_cnt follow the pointer symbols
    let offsets_start = 4 + p_cnt + 2;
    let offsets = fields
        .get(offsets_start..offsets_start + synset_cnt)?
        .iter()
        .map(|f| f.parse::<u64>().ok())
        .collect::<Option<Vec<_>>>()?;
    Some((lemma, offsets))
}

/// Parses one synset line of a data file into a sense of `lemma`.
///
/// Format: `offset lex_filenum ss_type w_cnt word lex_id [...] p_cnt [...] | gloss`.
pub fn parse_synset_line(line: &str, lemma: &str) -> Result<Sense> {
    let malformed = || WordposError::provider(format!("Malformed synset line: {line}"));

    let (head, gloss) = line.split_once(" | ").unwrap_or((line, ""));
    let fields: Vec<&str> = head.split_whitespace().collect();
    if fields.len() < 4 {
        return Err(malformed());
    }

    let synset_offset: u64 = fields[0].parse().map_err(|_| malformed())?;
    let lex_filenum: u8 = fields[1].parse().map_err(|_| malformed())?;
    let pos = fields[2].to_string();
    let category = pos
        .chars()
        .next()
        .and_then(Category::from_pos_letter)
        .ok_or_else(malformed)?;
    let w_cnt = usize::from_str_radix(fields[3], 16).map_err(|_| malformed())?;

    let synonyms = fields
        .get(4..4 + 2 * w_cnt)
        .ok_or_else(malformed)?
        .iter()
        .step_by(2)
        .map(|w| strip_adjective_marker(w).to_string())
        .collect();

    let gloss = gloss.trim().to_string();
    let (def, exp) = split_gloss(&gloss);

    Ok(Sense {
        synset_offset,
        lex_filenum,
        pos,
        category,
        lemma: lemma.to_string(),
        synonyms,
        gloss,
        def,
        exp,
    })
}

/// Removes syntactic markers such as `(p)`, `(a)` or `(ip)` from adjective words.
fn strip_adjective_marker(word: &str) -> &str {
    match word.find('(') {
        Some(idx) if word.ends_with(')') => &word[..idx],
        _ => word,
    }
}

/// Lazily opened files of one category.
#[derive(Debug, Default)]
struct CategoryFiles {
    index: OnceCell<IndexTable>,
    /// Shared handle to `data.<pos>`; reads seek under the lock.
    data: OnceCell<Mutex<BufReader<File>>>,
}

/// Lexical provider backed by WordNet database files.
///
/// At most one index and one data file per category is open, however many
/// lookups are in flight.
pub struct WordNetProvider {
    dir: PathBuf,
    files: HashMap<Category, CategoryFiles>,
}

impl WordNetProvider {
    /// Opens a WordNet `dict/` directory.
    ///
    /// Fails if any index or data file is missing. Files are not read until
    /// the first lookup that needs them.
    pub async fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        for category in Category::ALL {
            for kind in ["index", "data"] {
                let path = file_path(&dir, kind, category);
                if !tokio::fs::try_exists(&path).await.unwrap_or(false) {
                    return Err(WordposError::provider(format!(
                        "WordNet file not found: {}",
                        path.display()
                    )));
                }
            }
        }

        let files = Category::ALL
            .iter()
            .map(|c| (*c, CategoryFiles::default()))
            .collect();
        Ok(Self { dir, files })
    }

    /// Returns the dictionary directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn files(&self, category: Category) -> Result<&CategoryFiles> {
        self.files
            .get(&category)
            .ok_or_else(|| WordposError::internal(format!("No file slot for {category}")))
    }

    async fn index(&self, category: Category) -> Result<&IndexTable> {
        self.files(category)?
            .index
            .get_or_try_init(|| async {
                let path = file_path(&self.dir, "index", category);
                let content = tokio::fs::read_to_string(&path).await.map_err(|e| {
                    WordposError::provider(format!("Failed to read {}: {e}", path.display()))
                })?;
                let table = IndexTable::parse(&content)?;
                debug!("Loaded {} lemmas from {}", table.len(), path.display());
                Ok::<_, WordposError>(table)
            })
            .await
    }

    async fn data(&self, category: Category) -> Result<&Mutex<BufReader<File>>> {
        self.files(category)?
            .data
            .get_or_try_init(|| async {
                let path = file_path(&self.dir, "data", category);
                let file = File::open(&path).await.map_err(|e| {
                    WordposError::provider(format!("Failed to open {}: {e}", path.display()))
                })?;
                debug!("Opened {}", path.display());
                Ok::<_, WordposError>(Mutex::new(BufReader::new(file)))
            })
            .await
    }

    async fn read_synset(&self, category: Category, offset: u64, lemma: &str) -> Result<Sense> {
        let mut reader = self.data(category).await?.lock().await;
        reader
            .seek(SeekFrom::Start(offset))
            .await
            .map_err(|e| WordposError::provider(format!("Failed to seek to {offset}: {e}")))?;

        let mut line = String::new();
        reader.read_line(&mut line).await.map_err(|e| {
            WordposError::provider(format!("Failed to read synset {offset}: {e}"))
        })?;
        drop(reader);
        parse_synset_line(line.trim_end(), lemma)
    }
}

fn file_path(dir: &Path, kind: &str, category: Category) -> PathBuf {
    dir.join(format!("{kind}.{}", category.file_suffix()))
}

#[async_trait]
impl LexicalProvider for WordNetProvider {
    async fn filter_words(&self, category: Category, words: &[String]) -> Result<Vec<String>> {
        let index = self.index(category).await?;
        Ok(words
            .iter()
            .filter(|w| index.contains(&normalize_lemma(w)))
            .cloned()
            .collect())
    }

    async fn lookup(&self, category: Category, word: &str) -> Result<Vec<Sense>> {
        let lemma = normalize_lemma(word);
        if lemma.is_empty() {
            return Err(empty_word_error());
        }
        let index = self.index(category).await?;
        let Some(offsets) = index.offsets(&lemma) else {
            return Ok(Vec::new());
        };

        let mut senses = Vec::with_capacity(offsets.len());
        for offset in offsets {
            senses.push(self.read_synset(category, *offset, &lemma).await?);
        }
        Ok(senses)
    }

    async fn lookup_random(
        &self,
        category: Option<Category>,
        query: &RandomQuery,
    ) -> Result<Vec<String>> {
        let prefix = normalize_lemma(&query.starts_with);
        let categories = match category {
            Some(c) => vec![c],
            None => Category::ALL.to_vec(),
        };

        let mut candidates = Vec::new();
        for category in categories {
            let index = self.index(category).await?;
            candidates.extend(index.with_prefix(&prefix).cloned());
        }
        Ok(sample_lemmas(candidates, query.count))
    }
}
