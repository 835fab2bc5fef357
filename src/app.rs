//! Request execution for wordpos.
//!
//! Ties input resolution, tokenization, planning, the fan-out run and
//! rendering together. Preparation happens before any lexicon is opened so
//! that input errors abort the run before a single lookup is issued.

use crate::engine::{self, compute_plan, Command, CommandPlan, PlanOptions, ResultMap, RunOptions};
use crate::error::{Result, WordposError};
use crate::input::{resolve_input, InputSource};
use crate::lexicon::{Category, LexicalProvider};
use crate::output::{self, OutputMode};
use crate::text::{Stopwords, Tokenizer};
use tracing::{debug, info};

/// What the user asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// A lookup command (or `parse`).
    Lookup(Command),
    /// Print the stopword list.
    Stopwords,
}

impl Action {
    /// Returns true if the action has a count-only output form.
    pub fn reports_counts(&self) -> bool {
        matches!(self, Self::Lookup(command) if *command != Command::Def)
    }
}

/// A fully resolved invocation.
#[derive(Debug, Clone)]
pub struct Request {
    pub action: Action,
    /// Categories selected by flags; empty means the command's default.
    pub categories: Vec<Category>,
    pub mode: OutputMode,
    pub input: InputSource,
    /// Remove stopwords from the parsed input.
    pub exclude_stopwords: bool,
    pub stopwords: Stopwords,
    pub plan_options: PlanOptions,
    pub run_options: RunOptions,
}

impl Request {
    /// Creates a request with default settings.
    pub fn new(action: Action, input: InputSource) -> Self {
        Self {
            action,
            categories: Vec::new(),
            mode: OutputMode::default(),
            input,
            exclude_stopwords: true,
            stopwords: Stopwords::default(),
            plan_options: PlanOptions::default(),
            run_options: RunOptions::default(),
        }
    }

    fn tokenizer(&self) -> Tokenizer {
        let stopwords = self.exclude_stopwords.then(|| self.stopwords.clone());
        Tokenizer::new(stopwords)
    }
}

/// A request whose input has been read and whose plan is computed.
#[derive(Debug)]
pub struct Prepared {
    mode: OutputMode,
    work: Work,
}

#[derive(Debug)]
enum Work {
    Stopwords(Vec<String>),
    Lookup {
        plan: CommandPlan,
        words: Vec<String>,
        run_options: RunOptions,
    },
}

impl Prepared {
    /// Returns true if completing this request issues provider calls.
    pub fn needs_lexicon(&self) -> bool {
        match &self.work {
            Work::Stopwords(_) => false,
            Work::Lookup { plan, .. } => plan.needs_provider(),
        }
    }

    /// Returns the lookup plan, if any.
    pub fn plan(&self) -> Option<&CommandPlan> {
        match &self.work {
            Work::Stopwords(_) => None,
            Work::Lookup { plan, .. } => Some(plan),
        }
    }
}

/// Reads the input, tokenizes it and computes the plan.
pub async fn prepare(request: &Request) -> Result<Prepared> {
    let work = match request.action {
        Action::Stopwords => Work::Stopwords(request.stopwords.words().to_vec()),
        Action::Lookup(command) => {
            let text = resolve_input(&request.input).await?;
            let words = request.tokenizer().parse(&text);
            let plan = compute_plan(command, &request.categories, &words, &request.plan_options);
            info!(
                command = %command,
                words = words.len(),
                expected = plan.expected_count,
                "Planned lookups"
            );
            Work::Lookup {
                plan,
                words,
                run_options: request.run_options,
            }
        }
    };
    Ok(Prepared {
        mode: request.mode,
        work,
    })
}

/// Runs the prepared lookups and renders the output.
///
/// `provider` may be `None` when [`Prepared::needs_lexicon`] is false.
pub async fn complete(
    prepared: Prepared,
    provider: Option<&dyn LexicalProvider>,
) -> Result<String> {
    let (plan, words, run_options) = match prepared.work {
        Work::Stopwords(list) => return output::render_stopwords(&list, prepared.mode),
        Work::Lookup {
            plan,
            words,
            run_options,
        } => (plan, words, run_options),
    };

    let results = if plan.command == Command::Parse {
        ResultMap::from_words("words", &words)
    } else if plan.needs_provider() {
        let provider = provider.ok_or_else(|| {
            WordposError::internal(format!("No lexicon available for {}", plan.command))
        })?;
        engine::run(&plan, provider, &run_options).await?
    } else {
        debug!(command = %plan.command, "No words to look up");
        ResultMap::new()
    };

    output::render(plan.command, &results, prepared.mode, words.len())
}

/// Prepares and completes a request against `provider`.
pub async fn execute(request: &Request, provider: &dyn LexicalProvider) -> Result<String> {
    let prepared = prepare(request).await?;
    complete(prepared, Some(provider)).await
}
