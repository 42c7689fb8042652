//! Result iterator over finished groups.

use std::sync::Arc;

use heapstone_common::{HeapstoneError, HeapstoneResult, Row, Schema, Value};

use super::accumulator::Accumulator;
use super::func::AggregateFunc;
use crate::operator::Operator;

const NAME: &str = "AggregateResults";

/// Iterator over finished groups, one row per group.
///
/// Results are computed from the accumulators as rows are pulled; `rewind`
/// replays them without touching the input again.
#[derive(Debug, Clone)]
pub struct AggregateResults {
    schema: Arc<Schema>,
    func: AggregateFunc,
    groups: Arc<Vec<(Option<Value>, Accumulator)>>,
    /// Index of the next group; `None` while closed.
    position: Option<usize>,
}

impl AggregateResults {
    pub(crate) fn new(
        schema: Arc<Schema>,
        func: AggregateFunc,
        groups: Vec<(Option<Value>, Accumulator)>,
    ) -> Self {
        Self {
            schema,
            func,
            groups: Arc::new(groups),
            position: None,
        }
    }

    /// Replaces the output schema, e.g. to rename the columns.
    #[must_use]
    pub fn with_schema(mut self, schema: Arc<Schema>) -> Self {
        self.schema = schema;
        self
    }

    /// Number of groups.
    pub fn num_groups(&self) -> usize {
        self.groups.len()
    }

    fn position_mut(&mut self, operation: &'static str) -> HeapstoneResult<&mut usize> {
        self.position
            .as_mut()
            .ok_or_else(|| HeapstoneError::not_open(NAME, operation))
    }
}

impl Operator for AggregateResults {
    fn schema(&self) -> Arc<Schema> {
        self.schema.clone()
    }

    fn open(&mut self) -> HeapstoneResult<()> {
        if self.position.is_some() {
            return Err(HeapstoneError::already_open(NAME));
        }
        self.position = Some(0);
        Ok(())
    }

    fn has_next(&mut self) -> HeapstoneResult<bool> {
        let len = self.groups.len();
        Ok(*self.position_mut("has_next")? < len)
    }

    fn next(&mut self) -> HeapstoneResult<Row> {
        let len = self.groups.len();
        let position = self.position_mut("next")?;
        if *position >= len {
            return Err(HeapstoneError::NoMoreRows { operator: NAME });
        }
        let index = *position;
        *position += 1;

        let (key, acc) = &self.groups[index];
        let mut values = Vec::with_capacity(2);
        values.extend(key.iter().cloned());
        values.push(acc.result(self.func)?);
        Row::from_values(self.schema.clone(), values)
    }

    fn rewind(&mut self) -> HeapstoneResult<()> {
        *self.position_mut("rewind")? = 0;
        Ok(())
    }

    fn close(&mut self) {
        self.position = None;
    }
}
