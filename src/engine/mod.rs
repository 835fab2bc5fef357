//! The lookup engine: planning, concurrent fan-out and result aggregation.

pub mod aggregator;
pub mod plan;
pub mod results;

pub use aggregator::{run, AggregatorState, FanOutAggregator, RunOptions};
pub use plan::{
    compute_plan, expected_count, resolve_op, CallDescriptor, CallTarget, Command, CommandPlan,
    KeyMode, LookupOp, PlanOptions,
};
pub use results::{ResultItem, ResultKey, ResultMap};
