//! Rendering of lookup results.
//!
//! Pure functions from a completed result map to the text printed on stdout.

use crate::engine::{Command, ResultItem, ResultMap};
use crate::error::{Result, WordposError};
use crate::lexicon::Category;

/// How results are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputMode {
    /// A header per entry, one item per line.
    #[default]
    Verbose,
    /// Items separated by spaces, no headers.
    Brief,
    /// Per-category counts followed by the number of parsed words.
    Count,
    /// Structured dump of the full result object.
    Full,
    /// The result object as JSON.
    Json,
}

impl OutputMode {
    /// Picks the mode from output flags. Count wins over JSON, JSON over full,
    /// full over brief.
    ///
    /// Callers pass `count = false` for commands that cannot report counts.
    pub fn from_flags(count: bool, brief: bool, full: bool, json: bool) -> Self {
        if count {
            Self::Count
        } else if json {
            Self::Json
        } else if full {
            Self::Full
        } else if brief {
            Self::Brief
        } else {
            Self::Verbose
        }
    }

    fn separator(&self) -> &'static str {
        match self {
            Self::Brief => " ",
            _ => "\n",
        }
    }
}

impl std::str::FromStr for OutputMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "verbose" => Ok(Self::Verbose),
            "brief" => Ok(Self::Brief),
            "count" => Ok(Self::Count),
            "full" => Ok(Self::Full),
            "json" => Ok(Self::Json),
            _ => Err(format!(
                "Invalid output mode: {s}. Expected: verbose, brief, count, full, or json"
            )),
        }
    }
}

/// Renders the results of `command`.
///
/// `word_count` is the number of parsed input words, reported by count mode.
pub fn render(
    command: Command,
    results: &ResultMap,
    mode: OutputMode,
    word_count: usize,
) -> Result<String> {
    match mode {
        OutputMode::Count if command != Command::Def => Ok(render_counts(command, results, word_count)),
        OutputMode::Json => serde_json::to_string(results)
            .map_err(|e| WordposError::internal(format!("Failed to serialize results: {e}"))),
        OutputMode::Full => Ok(format!("{results:#?}")),
        _ if command == Command::Def => Ok(render_definitions(results)),
        _ => Ok(render_lists(results, mode)),
    }
}

/// Renders the stopword list.
pub fn render_stopwords(words: &[String], mode: OutputMode) -> Result<String> {
    match mode {
        OutputMode::Json => serde_json::to_string(words)
            .map_err(|e| WordposError::internal(format!("Failed to serialize stopwords: {e}"))),
        _ => Ok(words.join(mode.separator())),
    }
}

/// `get`: counts for every category in canonical order, then the word count.
/// Other commands only report the word count.
fn render_counts(command: Command, results: &ResultMap, word_count: usize) -> String {
    let mut out = String::new();
    if command == Command::Get {
        for category in Category::ALL {
            out.push_str(&format!("{} ", results.count(category.label())));
        }
    }
    out.push_str(&word_count.to_string());
    out
}

/// Each word followed by its senses; words without senses are skipped.
fn render_definitions(results: &ResultMap) -> String {
    let mut out = String::new();
    for (key, items) in results.iter() {
        if items.is_empty() {
            continue;
        }
        out.push_str(&format!("{key}\n"));
        for item in items {
            match item {
                ResultItem::Sense(sense) => {
                    out.push_str(&format!("  {}: {}\n", sense.pos, sense.gloss));
                }
                ResultItem::Word(word) => out.push_str(&format!("  {word}\n")),
            }
        }
        out.push('\n');
    }
    out
}

/// Each non-empty entry as an optional `# key count:` header and its items.
fn render_lists(results: &ResultMap, mode: OutputMode) -> String {
    let sep = mode.separator();
    let mut out = String::new();
    for (key, items) in results.iter() {
        if items.is_empty() {
            continue;
        }
        if mode != OutputMode::Brief {
            out.push_str(&format!("# {key} {}:{sep}", items.len()));
        }
        let joined: Vec<String> = items.iter().map(|item| item_text(item)).collect();
        out.push_str(&format!("{}{sep}\n", joined.join(sep)));
    }
    out
}

fn item_text(item: &ResultItem) -> String {
    match item {
        ResultItem::Word(word) => word.clone(),
        ResultItem::Sense(sense) => sense.lemma.clone(),
    }
}
