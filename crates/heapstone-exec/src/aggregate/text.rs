//! Aggregation over text fields.

use std::sync::Arc;

use heapstone_common::{FieldType, HeapstoneError, HeapstoneResult, Row, Schema};

use super::accumulator::GroupTable;
use super::func::AggregateFunc;
use super::grouping::Grouping;
use super::int::output_schema;
use super::results::AggregateResults;
use super::Aggregator;

/// Aggregates a `Text` field. Only `COUNT` is supported.
#[derive(Debug, Clone)]
pub struct TextAggregator {
    grouping: Grouping,
    agg_field: usize,
    schema: Arc<Schema>,
    groups: GroupTable,
}

impl TextAggregator {
    /// Creates a counting aggregator over the field at `agg_field`.
    ///
    /// Fails with `UnsupportedFunction` for anything but `COUNT`.
    pub fn new(
        grouping: Grouping,
        agg_field: usize,
        func: AggregateFunc,
    ) -> HeapstoneResult<Self> {
        if func != AggregateFunc::Count {
            return Err(HeapstoneError::UnsupportedFunction {
                function: func.to_string(),
                field_type: FieldType::Text,
            });
        }
        Ok(Self {
            grouping,
            agg_field,
            schema: output_schema(grouping)?,
            groups: GroupTable::default(),
        })
    }
}

impl Aggregator for TextAggregator {
    fn merge_row(&mut self, row: &Row) -> HeapstoneResult<()> {
        let key = self.grouping.key_of(row)?;
        // Only the position is checked; the counted value is never read.
        row.get(self.agg_field)?;
        self.groups.merge(key, AggregateFunc::Count, 0)
    }

    fn results(&self) -> AggregateResults {
        let groups = self
            .groups
            .snapshot(self.grouping.is_grouped(), AggregateFunc::Count);
        AggregateResults::new(self.schema.clone(), AggregateFunc::Count, groups)
    }

    fn schema(&self) -> Arc<Schema> {
        self.schema.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operator::{collect_rows, Operator};
    use heapstone_common::{ErrorKind, Value};

    #[test]
    fn test_only_count() {
        for func in AggregateFunc::ALL {
            let result = TextAggregator::new(Grouping::None, 0, func);
            if func == AggregateFunc::Count {
                assert!(result.is_ok());
            } else {
                assert_eq!(result.unwrap_err().kind(), ErrorKind::UnsupportedFunction);
            }
        }
    }

    #[test]
    fn test_grouped_count() {
        let schema = Arc::new(Schema::unnamed(&[FieldType::Text, FieldType::Text]).unwrap());
        let mut agg =
            TextAggregator::new(Grouping::by(0, FieldType::Text), 1, AggregateFunc::Count)
                .unwrap();
        for (g, v) in [("A", "x"), ("A", "y"), ("B", "z")] {
            let row =
                Row::from_values(schema.clone(), vec![Value::text(g), Value::text(v)]).unwrap();
            agg.merge_row(&row).unwrap();
        }

        let mut results = agg.results();
        results.open().unwrap();
        let mut out: Vec<String> = collect_rows(&mut results)
            .unwrap()
            .iter()
            .map(ToString::to_string)
            .collect();
        out.sort();
        assert_eq!(out, vec!["A\t2", "B\t1"]);
    }

    #[test]
    fn test_ungrouped_empty_count() {
        let agg = TextAggregator::new(Grouping::None, 0, AggregateFunc::Count).unwrap();
        let mut results = agg.results();
        results.open().unwrap();
        assert_eq!(results.next().unwrap().to_string(), "0");
        assert!(!results.has_next().unwrap());
    }
}
