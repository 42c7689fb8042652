//! The aggregate operator.

use std::sync::Arc;

use tracing::debug;

use heapstone_common::{Field, FieldType, HeapstoneError, HeapstoneResult, Row, Schema};

use super::func::AggregateFunc;
use super::grouping::Grouping;
use super::int::IntAggregator;
use super::results::AggregateResults;
use super::text::TextAggregator;
use super::Aggregator;
use crate::operator::Operator;

const NAME: &str = "AggregateExec";

/// Aggregate operator that groups and folds every row of its child.
///
/// `open` drains the child into a fresh aggregator, so reopening after a
/// `close` recomputes from scratch. `rewind` only replays the results.
#[derive(Debug)]
pub struct AggregateExec {
    /// Child operator.
    child: Box<dyn Operator>,
    /// Aggregated field position.
    agg_field: usize,
    /// Grouping mode.
    grouping: Grouping,
    /// Aggregate function.
    func: AggregateFunc,
    /// Output schema.
    schema: Arc<Schema>,
    /// Results of the current pass; `None` while closed.
    results: Option<AggregateResults>,
}

impl AggregateExec {
    /// Creates a new aggregate operator.
    ///
    /// Fails if a field position is out of range, or with
    /// `UnsupportedFunction` when aggregating a `Text` field with anything
    /// but `COUNT`.
    pub fn new(
        child: Box<dyn Operator>,
        agg_field: usize,
        group_field: Option<usize>,
        func: AggregateFunc,
    ) -> HeapstoneResult<Self> {
        let input = child.schema();
        let agg = input.field(agg_field)?;
        if agg.field_type == FieldType::Text && func != AggregateFunc::Count {
            return Err(HeapstoneError::UnsupportedFunction {
                function: func.to_string(),
                field_type: FieldType::Text,
            });
        }

        let mut fields = Vec::with_capacity(2);
        let grouping = match group_field {
            Some(index) => {
                let group = input.field(index)?;
                fields.push(group.clone());
                Grouping::by(index, group.field_type)
            }
            None => Grouping::None,
        };
        fields.push(Field::new(format!("{func}({})", agg.name), FieldType::Int));
        let schema = Arc::new(Schema::new(fields)?);

        Ok(Self {
            child,
            agg_field,
            grouping,
            func,
            schema,
            results: None,
        })
    }

    /// Returns the grouping field position, if grouped.
    pub fn group_field(&self) -> Option<usize> {
        match self.grouping {
            Grouping::By { index, .. } => Some(index),
            Grouping::None => None,
        }
    }

    /// Returns the group column name, if grouped.
    pub fn group_field_name(&self) -> Option<&str> {
        self.group_field()
            .and_then(|_| self.schema.field_name(0).ok())
    }

    /// Returns the aggregated field position.
    pub fn aggregate_field(&self) -> usize {
        self.agg_field
    }

    /// Returns the aggregate column name, e.g. `sum(price)`.
    pub fn aggregate_field_name(&self) -> &str {
        let last = self.schema.num_fields() - 1;
        self.schema.field_name(last).unwrap_or_default()
    }

    /// Returns the aggregate function.
    pub fn func(&self) -> AggregateFunc {
        self.func
    }

    fn aggregator(&self) -> HeapstoneResult<Box<dyn Aggregator>> {
        let field_type = self.child.schema().field_type(self.agg_field)?;
        let aggregator: Box<dyn Aggregator> = match field_type {
            FieldType::Int => Box::new(IntAggregator::new(
                self.grouping,
                self.agg_field,
                self.func,
            )?),
            FieldType::Text => Box::new(TextAggregator::new(
                self.grouping,
                self.agg_field,
                self.func,
            )?),
        };
        Ok(aggregator)
    }

    fn results_mut(&mut self, operation: &'static str) -> HeapstoneResult<&mut AggregateResults> {
        self.results
            .as_mut()
            .ok_or_else(|| HeapstoneError::not_open(NAME, operation))
    }
}

impl Operator for AggregateExec {
    fn schema(&self) -> Arc<Schema> {
        self.schema.clone()
    }

    fn open(&mut self) -> HeapstoneResult<()> {
        if self.results.is_some() {
            return Err(HeapstoneError::already_open(NAME));
        }
        self.child.open()?;

        let mut aggregator = self.aggregator()?;
        let mut merged = 0usize;
        while self.child.has_next()? {
            let row = self.child.next()?;
            aggregator.merge_row(&row)?;
            merged += 1;
        }

        let mut results = aggregator.results().with_schema(self.schema.clone());
        results.open()?;
        debug!(
            func = %self.func,
            rows = merged,
            groups = results.num_groups(),
            "aggregated input"
        );
        self.results = Some(results);
        Ok(())
    }

    fn has_next(&mut self) -> HeapstoneResult<bool> {
        self.results_mut("has_next")?.has_next()
    }

    fn next(&mut self) -> HeapstoneResult<Row> {
        self.results_mut("next")?.next()
    }

    fn rewind(&mut self) -> HeapstoneResult<()> {
        self.results_mut("rewind")?.rewind()
    }

    fn close(&mut self) {
        if let Some(mut results) = self.results.take() {
            results.close();
        }
        self.child.close();
    }
}
