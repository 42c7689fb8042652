//! Grouped aggregation.
//!
//! An [`Aggregator`] folds rows into per-group accumulators and hands out an
//! [`AggregateResults`] operator over the finished groups. [`AggregateExec`]
//! wires an aggregator to a child operator.
//!
//! Each accumulator holds a running value and a running count:
//!
//! | function    | merge             | result          |
//! |-------------|-------------------|-----------------|
//! | `MIN`       | min               | value           |
//! | `MAX`       | max               | value           |
//! | `SUM`       | add               | value           |
//! | `AVG`       | add               | value / count   |
//! | `COUNT`     | unchanged         | count           |
//! | `SUM_COUNT` | add               | count           |
//! | `SC_AVG`    | add               | value / count   |

mod accumulator;
mod exec;
mod func;
mod grouping;
mod int;
mod results;
mod text;

use std::fmt;
use std::sync::Arc;

use heapstone_common::{HeapstoneResult, Row, Schema};

pub use exec::AggregateExec;
pub use func::AggregateFunc;
pub use grouping::Grouping;
pub use int::IntAggregator;
pub use results::AggregateResults;
pub use text::TextAggregator;

/// Name of the group column in an aggregator's own output schema.
pub const GROUP_FIELD_NAME: &str = "group_value";

/// Name of the aggregate column in an aggregator's own output schema.
pub const AGGREGATE_FIELD_NAME: &str = "aggregate_value";

/// Folds rows into grouped aggregates.
pub trait Aggregator: fmt::Debug {
    /// Merges one input row into its group.
    fn merge_row(&mut self, row: &Row) -> HeapstoneResult<()>;

    /// Returns a closed iterator over a snapshot of the current groups.
    ///
    /// Rows merged afterwards do not show up in the returned iterator.
    fn results(&self) -> AggregateResults;

    /// Output schema: `(group, aggregate)` when grouped, `(aggregate)`
    /// otherwise.
    fn schema(&self) -> Arc<Schema>;
}
