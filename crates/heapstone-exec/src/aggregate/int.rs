//! Aggregation over int fields.

use std::sync::Arc;

use tracing::trace;

use heapstone_common::{Field, FieldType, HeapstoneError, HeapstoneResult, Row, Schema};

use super::accumulator::GroupTable;
use super::func::AggregateFunc;
use super::grouping::Grouping;
use super::results::AggregateResults;
use super::{Aggregator, AGGREGATE_FIELD_NAME, GROUP_FIELD_NAME};

/// Aggregates an `Int` field with any [`AggregateFunc`].
#[derive(Debug, Clone)]
pub struct IntAggregator {
    grouping: Grouping,
    agg_field: usize,
    func: AggregateFunc,
    schema: Arc<Schema>,
    groups: GroupTable,
}

impl IntAggregator {
    /// Creates an aggregator over the `Int` field at `agg_field`.
    pub fn new(
        grouping: Grouping,
        agg_field: usize,
        func: AggregateFunc,
    ) -> HeapstoneResult<Self> {
        Ok(Self {
            grouping,
            agg_field,
            func,
            schema: output_schema(grouping)?,
            groups: GroupTable::default(),
        })
    }

    /// Returns the aggregate function.
    pub fn func(&self) -> AggregateFunc {
        self.func
    }

    /// Number of groups seen so far.
    pub fn num_groups(&self) -> usize {
        self.groups.len()
    }
}

impl Aggregator for IntAggregator {
    fn merge_row(&mut self, row: &Row) -> HeapstoneResult<()> {
        let key = self.grouping.key_of(row)?;
        let value = match row.get(self.agg_field)? {
            Some(v) => v.as_int().ok_or(HeapstoneError::TypeMismatch {
                expected: FieldType::Int,
                actual: v.field_type(),
            })?,
            None => {
                return Err(HeapstoneError::invalid_argument(format!(
                    "aggregate field {} is unset",
                    self.agg_field
                )))
            }
        };
        trace!(?key, value, func = %self.func, "merging row");
        self.groups.merge(key, self.func, i64::from(value))
    }

    fn results(&self) -> AggregateResults {
        let groups = self.groups.snapshot(self.grouping.is_grouped(), self.func);
        AggregateResults::new(self.schema.clone(), self.func, groups)
    }

    fn schema(&self) -> Arc<Schema> {
        self.schema.clone()
    }
}

/// `(group_value, aggregate_value)` or `(aggregate_value)`.
pub(super) fn output_schema(grouping: Grouping) -> HeapstoneResult<Arc<Schema>> {
    let mut fields = Vec::with_capacity(2);
    if let Grouping::By { field_type, .. } = grouping {
        fields.push(Field::new(GROUP_FIELD_NAME, field_type));
    }
    fields.push(Field::new(AGGREGATE_FIELD_NAME, FieldType::Int));
    Schema::new(fields).map(Arc::new)
}
