//! Command-line argument parsing for wordpos.
//!
//! Uses clap to parse the command, category and output flags, and resolves
//! them against the configuration file into a [`Request`].

use crate::app::{Action, Request};
use crate::config::Config;
use crate::engine::{Command, PlanOptions, RunOptions};
use crate::error::{Result, WordposError};
use crate::input::InputSource;
use crate::lexicon::{Category, LexiconSource};
use crate::output::OutputMode;
use crate::text::Stopwords;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

/// Part-of-speech lookups, definitions and random words from WordNet.
#[derive(Parser, Debug)]
#[command(name = "wordpos")]
#[command(version, about, long_about = None)]
#[command(override_usage = "wordpos [OPTIONS] <COMMAND> [WORD ... | -i <FILE> | <stdin>]")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<CliCommand>,

    /// Get nouns
    #[arg(short = 'n', long, global = true)]
    pub noun: bool,

    /// Get adjectives
    #[arg(short = 'a', long, global = true)]
    pub adj: bool,

    /// Get verbs
    #[arg(short = 'v', long, global = true)]
    pub verb: bool,

    /// Get adverbs
    #[arg(short = 'r', long, global = true)]
    pub adv: bool,

    /// Count only (noun, adj, verb, adv, total parsed words)
    #[arg(short = 'c', long, global = true)]
    pub count: bool,

    /// Brief output (all on one line, no headers)
    #[arg(short = 'b', long, global = true)]
    pub brief: bool,

    /// Full results object
    #[arg(short = 'f', long, global = true)]
    pub full: bool,

    /// Full results object as JSON
    #[arg(short = 'j', long, global = true)]
    pub json: bool,

    /// Input file
    #[arg(short = 'i', long, value_name = "FILE", global = true)]
    pub file: Option<PathBuf>,

    /// Include stopwords (default: stopwords are excluded)
    #[arg(short = 's', long, global = true)]
    pub with_stopwords: bool,

    /// Number of random words to return
    #[arg(short = 'N', long, value_name = "NUM", global = true)]
    pub num: Option<usize>,

    /// WordNet dictionary directory
    #[arg(long, value_name = "DIR", env = "WORDNET_DICT", global = true)]
    pub dict: Option<PathBuf>,

    /// Config file path
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Give up on a single lookup after this many milliseconds
    #[arg(long, value_name = "MS", global = true)]
    pub timeout_ms: Option<u64>,

    /// Use the built-in sample lexicon instead of WordNet files (for testing)
    #[arg(long, global = true)]
    pub mock_lexicon: bool,
}

/// Commands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    /// Get list of words for particular POS
    Get {
        words: Vec<String>,
    },
    /// Lookup definitions
    Def {
        words: Vec<String>,
    },
    /// Get random words (starting with <word>, optionally)
    Rand {
        words: Vec<String>,
    },
    /// Show parsed words, deduped and less stopwords
    Parse {
        words: Vec<String>,
    },
    /// Show list of stopwords (valid options are -b and -j)
    Stopwords,
}

impl CliCommand {
    /// Returns the action this command performs.
    pub fn action(&self) -> Action {
        match self {
            Self::Get { .. } => Action::Lookup(Command::Get),
            Self::Def { .. } => Action::Lookup(Command::Def),
            Self::Rand { .. } => Action::Lookup(Command::Rand),
            Self::Parse { .. } => Action::Lookup(Command::Parse),
            Self::Stopwords => Action::Stopwords,
        }
    }

    /// Returns the positional words.
    pub fn words(&self) -> &[String] {
        match self {
            Self::Get { words }
            | Self::Def { words }
            | Self::Rand { words }
            | Self::Parse { words } => words,
            Self::Stopwords => &[],
        }
    }
}

impl Cli {
    /// Parses command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Returns the config file path to use.
    ///
    /// Uses the --config argument if provided, otherwise the default path.
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(Config::default_path)
    }

    /// Returns the categories selected by flags, in canonical order.
    pub fn categories(&self) -> Vec<Category> {
        [
            (self.noun, Category::Noun),
            (self.adj, Category::Adjective),
            (self.verb, Category::Verb),
            (self.adv, Category::Adverb),
        ]
        .into_iter()
        .filter_map(|(selected, category)| selected.then_some(category))
        .collect()
    }

    /// Returns the output mode selected by flags for `action`.
    ///
    /// `-c` is ignored by actions without a count form (`def`, `stopwords`).
    pub fn output_mode(&self, action: Action) -> OutputMode {
        let count = self.count && action.reports_counts();
        OutputMode::from_flags(count, self.brief, self.full, self.json)
    }

    /// Returns the lexicon to open.
    ///
    /// `--mock-lexicon` wins, then `--dict` / `WORDNET_DICT`, then the config file.
    pub fn lexicon_source(&self, config: &Config) -> Result<LexiconSource> {
        if self.mock_lexicon {
            return Ok(LexiconSource::Sample);
        }
        self.dict
            .clone()
            .or_else(|| config.dictionary.path.clone())
            .map(LexiconSource::WordNet)
            .ok_or_else(|| {
                WordposError::config(
                    "No WordNet dictionary configured. Use --dict, WORDNET_DICT, or [dictionary] path in the config file",
                )
            })
    }

    /// Builds the request for `command`, with flags taking precedence over `config`.
    pub fn to_request(&self, command: &CliCommand, config: &Config) -> Result<Request> {
        let action = command.action();
        let random_count = self.num.unwrap_or(config.lookup.random_count);
        if random_count == 0 {
            return Err(WordposError::config("--num must be at least 1"));
        }

        // rand samples the whole lexicon when no words are given
        let read_stdin = action != Action::Lookup(Command::Rand);
        let input = InputSource::select(self.file.clone(), command.words().to_vec(), read_stdin);

        let call_timeout = self
            .timeout_ms
            .map(Duration::from_millis)
            .or_else(|| config.lookup.call_timeout());

        Ok(Request {
            action,
            categories: self.categories(),
            mode: self.output_mode(action),
            input,
            exclude_stopwords: config.parse.stopwords && !self.with_stopwords,
            stopwords: Stopwords::with_extra(&config.parse.extra_stopwords),
            plan_options: PlanOptions { random_count },
            run_options: RunOptions { call_timeout },
        })
    }
}
