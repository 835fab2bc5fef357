//! Lookup planning.
//!
//! Turns a command, the selected categories and the word list into the
//! ordered set of provider calls to issue and the number of completions the
//! aggregator must wait for.

use super::results::ResultKey;
use crate::lexicon::{Category, RandomQuery};
use std::fmt;
use std::str::FromStr;

/// A lookup command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Words of the input that belong to each category.
    Get,
    /// Definitions (glosses) of each input word.
    Def,
    /// Random words, optionally starting with each input word.
    Rand,
    /// The tokenized input itself; no lookups.
    Parse,
}

impl Command {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Def => "def",
            Self::Rand => "rand",
            Self::Parse => "parse",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Command {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "get" => Ok(Self::Get),
            "def" | "lookup" => Ok(Self::Def),
            "rand" => Ok(Self::Rand),
            "parse" => Ok(Self::Parse),
            _ => Err(format!("Unknown command: {}", s)),
        }
    }
}

/// How completed calls are keyed in the result map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyMode {
    /// One entry per category label.
    Category,
    /// One entry per looked-up word.
    Word,
}

/// The provider operation every call of a plan performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupOp {
    /// `filter_words(category, words)`: one call covers the whole word list.
    FilterWords,
    /// `lookup_definition(word)`: all categories at once.
    Definition,
    /// `lookup(category, word)`.
    CategoryDefinition,
    /// `lookup_random(category?, query)`.
    Random,
}

/// Resolves the provider operation for a command.
///
/// `filtered` is true when the user selected categories explicitly.
pub fn resolve_op(command: Command, filtered: bool) -> Option<LookupOp> {
    match (command, filtered) {
        (Command::Get, _) => Some(LookupOp::FilterWords),
        (Command::Def, false) => Some(LookupOp::Definition),
        (Command::Def, true) => Some(LookupOp::CategoryDefinition),
        (Command::Rand, _) => Some(LookupOp::Random),
        (Command::Parse, _) => None,
    }
}

/// What a single call looks up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallTarget {
    /// The whole word list.
    Words(Vec<String>),
    /// One word.
    Word(String),
    /// A random sampling query.
    Random(RandomQuery),
}

/// One unit of asynchronous lookup work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallDescriptor {
    /// Position in the plan; used to order contributions deterministically.
    pub seq: usize,
    /// `None` means no category dimension.
    pub category: Option<Category>,
    pub target: CallTarget,
}

impl CallDescriptor {
    /// Returns the result map key this call contributes to.
    pub fn result_key(&self, mode: KeyMode) -> ResultKey {
        match (mode, &self.target) {
            (KeyMode::Word, CallTarget::Word(word)) => ResultKey::new(word.clone()),
            _ => ResultKey::category(self.category),
        }
    }
}

/// Options that shape the plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanOptions {
    /// Number of words each random query samples.
    pub random_count: usize,
}

impl Default for PlanOptions {
    fn default() -> Self {
        Self { random_count: 1 }
    }
}

/// The calls to issue for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandPlan {
    pub command: Command,
    /// `None` for commands that never touch the provider.
    pub op: Option<LookupOp>,
    pub key_mode: KeyMode,
    pub descriptors: Vec<CallDescriptor>,
    /// Completions to wait for; fixed at plan time.
    pub expected_count: usize,
}

impl CommandPlan {
    /// Returns true if running the plan issues any provider call.
    pub fn needs_provider(&self) -> bool {
        self.expected_count > 0
    }
}

/// Computes the plan for `command` over `words`.
pub fn compute_plan(
    command: Command,
    selected: &[Category],
    words: &[String],
    options: &PlanOptions,
) -> CommandPlan {
    let selected = canonical_categories(selected);
    let filtered = !selected.is_empty();
    let op = resolve_op(command, filtered);
    let key_mode = match command {
        Command::Def => KeyMode::Word,
        _ => KeyMode::Category,
    };

    let categories: Vec<Option<Category>> = match (command, filtered) {
        (_, true) => selected.into_iter().map(Some).collect(),
        (Command::Rand | Command::Def, false) => vec![None],
        _ => Category::ALL.into_iter().map(Some).collect(),
    };

    let mut targets: Vec<(Option<Category>, CallTarget)> = Vec::new();
    match command {
        Command::Parse => {}
        Command::Get if words.is_empty() => {}
        Command::Get => {
            for category in &categories {
                targets.push((*category, CallTarget::Words(words.to_vec())));
            }
        }
        Command::Def => {
            for category in &categories {
                for word in words {
                    targets.push((*category, CallTarget::Word(word.clone())));
                }
            }
        }
        Command::Rand => {
            // Without words, one unprefixed query per category
            let prefixes: Vec<&str> = if words.is_empty() {
                vec![""]
            } else {
                words.iter().map(String::as_str).collect()
            };
            for category in &categories {
                for prefix in &prefixes {
                    let query = RandomQuery::new(*prefix, options.random_count);
                    targets.push((*category, CallTarget::Random(query)));
                }
            }
        }
    }

    let descriptors = targets
        .into_iter()
        .enumerate()
        .map(|(seq, (category, target))| CallDescriptor {
            seq,
            category,
            target,
        })
        .collect();

    CommandPlan {
        command,
        op,
        key_mode,
        descriptors,
        expected_count: expected_count(command, categories.len(), words.len()),
    }
}

/// Number of completions a plan waits for.
///
/// `get` issues one call per category; `def` one per category and word;
/// `rand` one per category and prefix, with a single empty prefix when no
/// words were given.
pub fn expected_count(command: Command, categories: usize, words: usize) -> usize {
    match command {
        Command::Parse => 0,
        Command::Get if words == 0 => 0,
        Command::Get => categories,
        Command::Def => categories * words,
        Command::Rand => categories * words.max(1),
    }
}

/// Deduplicates categories and puts them in canonical order.
fn canonical_categories(selected: &[Category]) -> Vec<Category> {
    Category::ALL
        .into_iter()
        .filter(|c| selected.contains(c))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_get_issues_one_call_per_category() {
        let plan = compute_plan(
            Command::Get,
            &[Category::Verb, Category::Noun],
            &words(&["dog", "run"]),
            &PlanOptions::default(),
        );
        assert_eq!(plan.expected_count, 2);
        assert_eq!(plan.key_mode, KeyMode::Category);
        assert_eq!(plan.op, Some(LookupOp::FilterWords));
        // Canonical order regardless of selection order
        assert_eq!(plan.descriptors[0].category, Some(Category::Noun));
        assert_eq!(plan.descriptors[1].category, Some(Category::Verb));
        assert_eq!(
            plan.descriptors[0].target,
            CallTarget::Words(words(&["dog", "run"]))
        );
    }

    #[test]
    fn test_get_defaults_to_all_categories() {
        let plan = compute_plan(Command::Get, &[], &words(&["dog"]), &PlanOptions::default());
        assert_eq!(plan.expected_count, 4);
        let categories: Vec<_> = plan.descriptors.iter().filter_map(|d| d.category).collect();
        assert_eq!(categories, Category::ALL.to_vec());
    }

    #[test]
    fn test_zero_words_plans_no_calls() {
        for command in [Command::Get, Command::Def, Command::Parse] {
            let plan = compute_plan(command, &[], &[], &PlanOptions::default());
            assert_eq!(plan.expected_count, 0, "{command}");
            assert!(plan.descriptors.is_empty());
            assert!(!plan.needs_provider());
        }
    }

    #[test]
    fn test_def_is_word_keyed_with_one_call_per_word() {
        let plan = compute_plan(
            Command::Def,
            &[],
            &words(&["bank", "dog", "run"]),
            &PlanOptions::default(),
        );
        assert_eq!(plan.expected_count, 3);
        assert_eq!(plan.key_mode, KeyMode::Word);
        assert_eq!(plan.op, Some(LookupOp::Definition));
        assert!(plan.descriptors.iter().all(|d| d.category.is_none()));
        assert_eq!(plan.descriptors[2].result_key(plan.key_mode).as_str(), "run");
    }

    #[test]
    fn test_def_with_categories_fans_out_per_category() {
        let plan = compute_plan(
            Command::Def,
            &[Category::Noun, Category::Verb],
            &words(&["bank"]),
            &PlanOptions::default(),
        );
        assert_eq!(plan.op, Some(LookupOp::CategoryDefinition));
        assert_eq!(plan.expected_count, 2);
        // Both calls land on the same word key
        let keys: Vec<_> = plan
            .descriptors
            .iter()
            .map(|d| d.result_key(plan.key_mode))
            .collect();
        assert_eq!(keys[0], keys[1]);
    }

    #[test]
    fn test_rand_without_words_issues_single_unprefixed_query() {
        let options = PlanOptions { random_count: 5 };
        let plan = compute_plan(Command::Rand, &[], &[], &options);
        assert_eq!(plan.expected_count, 1);
        assert_eq!(plan.descriptors.len(), 1);
        assert_eq!(plan.descriptors[0].category, None);
        assert_eq!(
            plan.descriptors[0].target,
            CallTarget::Random(RandomQuery::new("", 5))
        );
        assert_eq!(plan.descriptors[0].result_key(plan.key_mode).as_str(), "");
    }

    #[test]
    fn test_rand_with_prefixes_and_category() {
        let plan = compute_plan(
            Command::Rand,
            &[Category::Adverb],
            &words(&["qu", "la"]),
            &PlanOptions::default(),
        );
        assert_eq!(plan.expected_count, 2);
        assert!(plan
            .descriptors
            .iter()
            .all(|d| d.result_key(plan.key_mode).as_str() == "Adverb"));
    }

    #[test]
    fn test_parse_never_needs_provider() {
        let plan = compute_plan(Command::Parse, &[], &words(&["dog"]), &PlanOptions::default());
        assert_eq!(plan.op, None);
        assert!(!plan.needs_provider());
    }

    #[test]
    fn test_expected_count_matches_descriptors() {
        let word_lists = [words(&[]), words(&["a"]), words(&["a", "b", "c"])];
        let selections: [&[Category]; 3] = [&[], &[Category::Noun], &Category::ALL];
        for command in [Command::Get, Command::Def, Command::Rand, Command::Parse] {
            for list in &word_lists {
                for selected in selections {
                    let plan = compute_plan(command, selected, list, &PlanOptions::default());
                    assert_eq!(plan.expected_count, plan.descriptors.len());
                }
            }
        }
    }

    #[test]
    fn test_descriptor_seq_follows_plan_order() {
        let plan = compute_plan(Command::Def, &Category::ALL, &words(&["a", "b"]), &PlanOptions::default());
        let seqs: Vec<usize> = plan.descriptors.iter().map(|d| d.seq).collect();
        assert_eq!(seqs, (0..8).collect::<Vec<_>>());
    }

    #[test]
    fn test_command_from_str() {
        assert_eq!("get".parse::<Command>().unwrap(), Command::Get);
        assert_eq!("lookup".parse::<Command>().unwrap(), Command::Def);
        assert!("stopwords".parse::<Command>().is_err());
    }
}
