//! Fan-out execution of a lookup plan.
//!
//! [`FanOutAggregator`] is the pure state of one run: it counts completions
//! against the count fixed at plan time and merges each result into the
//! result map. [`run`] drives it, issuing every call of the plan at once and
//! polling them from a single task, so completions are handled one at a time
//! in whatever order they settle.

use super::plan::{CallDescriptor, CallTarget, CommandPlan, KeyMode, LookupOp};
use super::results::{ResultItem, ResultMap};
use crate::error::{Result, WordposError};
use crate::lexicon::LexicalProvider;
use futures::stream::{FuturesUnordered, StreamExt};
use std::time::Duration;
use tracing::{debug, warn};

/// Lifecycle of one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregatorState {
    /// Plan computed, no calls issued.
    Idle,
    /// Calls issued, fewer completions than expected.
    Running,
    /// Every expected completion received. Terminal.
    Complete,
}

/// Options for executing a plan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Per-call limit. A call that exceeds it counts as a failed call.
    /// `None` waits indefinitely.
    pub call_timeout: Option<Duration>,
}

/// Completion counting and result merging for one run.
#[derive(Debug)]
pub struct FanOutAggregator {
    key_mode: KeyMode,
    expected: usize,
    received: usize,
    failed: usize,
    state: AggregatorState,
    results: ResultMap,
}

impl FanOutAggregator {
    /// Creates an idle aggregator for `plan`.
    pub fn new(plan: &CommandPlan) -> Self {
        Self {
            key_mode: plan.key_mode,
            expected: plan.expected_count,
            received: 0,
            failed: 0,
            state: AggregatorState::Idle,
            results: ResultMap::new(),
        }
    }

    pub fn state(&self) -> AggregatorState {
        self.state
    }

    pub fn expected(&self) -> usize {
        self.expected
    }

    pub fn received(&self) -> usize {
        self.received
    }

    /// Number of completions that were failures.
    pub fn failed(&self) -> usize {
        self.failed
    }

    /// Moves out of `Idle`.
    ///
    /// With nothing to wait for the run completes immediately.
    pub fn start(&mut self) -> Result<AggregatorState> {
        if self.state != AggregatorState::Idle {
            return Err(WordposError::internal(format!(
                "Cannot start a run in state {:?}",
                self.state
            )));
        }
        self.state = if self.expected == 0 {
            AggregatorState::Complete
        } else {
            AggregatorState::Running
        };
        Ok(self.state)
    }

    /// Records the completion of one call.
    ///
    /// A failed call still counts as one completion but contributes nothing.
    /// An empty result also counts as exactly one completion.
    pub fn record(
        &mut self,
        descriptor: &CallDescriptor,
        outcome: Result<Vec<ResultItem>>,
    ) -> Result<AggregatorState> {
        if self.state != AggregatorState::Running {
            return Err(WordposError::internal(format!(
                "Completion for call {} received in state {:?}",
                descriptor.seq, self.state
            )));
        }

        let key = descriptor.result_key(self.key_mode);
        match outcome {
            Ok(items) => {
                debug!(seq = descriptor.seq, key = key.as_str(), items = items.len(), "Call settled");
                self.results.merge(key, descriptor.seq, items);
            }
            Err(e) => {
                warn!(seq = descriptor.seq, key = key.as_str(), "Lookup failed: {e}");
                self.failed += 1;
            }
        }

        self.received += 1;
        if self.received == self.expected {
            self.state = AggregatorState::Complete;
        }
        Ok(self.state)
    }

    /// Hands out the results of a completed run.
    pub fn finish(self) -> Result<ResultMap> {
        if self.state != AggregatorState::Complete {
            return Err(WordposError::internal(format!(
                "Run finished after {} of {} completions",
                self.received, self.expected
            )));
        }
        Ok(self.results)
    }
}

/// Executes `plan` against `provider` and returns the merged results.
///
/// All calls are issued before any completes. The returned future resolves
/// once, after exactly `plan.expected_count` completions. Without a call
/// timeout, a provider call that never settles keeps the run pending.
pub async fn run(
    plan: &CommandPlan,
    provider: &dyn LexicalProvider,
    options: &RunOptions,
) -> Result<ResultMap> {
    let mut aggregator = FanOutAggregator::new(plan);
    if aggregator.start()? == AggregatorState::Complete {
        debug!(command = %plan.command, "Nothing to look up");
        return aggregator.finish();
    }

    let op = plan.op.ok_or_else(|| {
        WordposError::internal(format!("Command {} has no lookup operation", plan.command))
    })?;
    debug!(
        command = %plan.command,
        calls = plan.descriptors.len(),
        expected = plan.expected_count,
        "Dispatching lookups"
    );

    let mut pending: FuturesUnordered<_> = plan
        .descriptors
        .iter()
        .map(|descriptor| async move {
            let outcome = match options.call_timeout {
                Some(limit) => tokio::time::timeout(limit, dispatch(op, descriptor, provider))
                    .await
                    .unwrap_or_else(|_| {
                        Err(WordposError::provider(format!(
                            "Lookup timed out after {}ms",
                            limit.as_millis()
                        )))
                    }),
                None => dispatch(op, descriptor, provider).await,
            };
            (descriptor, outcome)
        })
        .collect();

    while let Some((descriptor, outcome)) = pending.next().await {
        if aggregator.record(descriptor, outcome)? == AggregatorState::Complete {
            break;
        }
    }

    debug!(
        received = aggregator.received(),
        failed = aggregator.failed(),
        "Run complete"
    );
    aggregator.finish()
}

/// Issues the provider call for one descriptor.
async fn dispatch(
    op: LookupOp,
    descriptor: &CallDescriptor,
    provider: &dyn LexicalProvider,
) -> Result<Vec<ResultItem>> {
    match (op, &descriptor.target, descriptor.category) {
        (LookupOp::FilterWords, CallTarget::Words(words), Some(category)) => Ok(provider
            .filter_words(category, words)
            .await?
            .into_iter()
            .map(ResultItem::Word)
            .collect()),
        (LookupOp::Definition, CallTarget::Word(word), _) => Ok(provider
            .lookup_definition(word)
            .await?
            .into_iter()
            .map(ResultItem::Sense)
            .collect()),
        (LookupOp::CategoryDefinition, CallTarget::Word(word), Some(category)) => Ok(provider
            .lookup(category, word)
            .await?
            .into_iter()
            .map(ResultItem::Sense)
            .collect()),
        (LookupOp::Random, CallTarget::Random(query), category) => Ok(provider
            .lookup_random(category, query)
            .await?
            .into_iter()
            .map(ResultItem::Word)
            .collect()),
        (op, target, category) => Err(WordposError::internal(format!(
            "Operation {op:?} cannot serve {target:?} (category {category:?})"
        ))),
    }
}
