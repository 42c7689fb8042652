//! Per-group running state.

use std::collections::HashMap;

use heapstone_common::{HeapstoneError, HeapstoneResult, Value};

use super::func::AggregateFunc;

/// Running state of one group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct Accumulator {
    pub(crate) value: i64,
    pub(crate) count: i64,
}

impl Accumulator {
    /// State after the first row of a group.
    pub(crate) fn first(func: AggregateFunc, value: i64) -> Self {
        let value = match func {
            AggregateFunc::Count => 0,
            _ => value,
        };
        Self { value, count: 1 }
    }

    /// Folds one more value in.
    pub(crate) fn merge(&mut self, func: AggregateFunc, value: i64) -> HeapstoneResult<()> {
        match func {
            AggregateFunc::Min => self.value = self.value.min(value),
            AggregateFunc::Max => self.value = self.value.max(value),
            AggregateFunc::Sum
            | AggregateFunc::Avg
            | AggregateFunc::SumCount
            | AggregateFunc::ScAvg => {
                self.value = self.value.checked_add(value).ok_or_else(|| {
                    HeapstoneError::Overflow {
                        message: format!("{func} accumulator overflowed"),
                    }
                })?;
            }
            AggregateFunc::Count => {}
        }
        self.count += 1;
        Ok(())
    }

    /// Final value of the group. Never mutates the accumulator.
    pub(crate) fn result(&self, func: AggregateFunc) -> HeapstoneResult<Value> {
        let raw = match func {
            AggregateFunc::Min | AggregateFunc::Max | AggregateFunc::Sum => self.value,
            AggregateFunc::Avg | AggregateFunc::ScAvg => {
                if self.count == 0 {
                    0
                } else {
                    self.value / self.count
                }
            }
            AggregateFunc::Count | AggregateFunc::SumCount => self.count,
        };
        i32::try_from(raw).map(Value::Int).map_err(|_| HeapstoneError::Overflow {
            message: format!("{func} result {raw} does not fit an int field"),
        })
    }
}

/// Accumulators keyed by group, in first-seen order.
#[derive(Debug, Clone, Default)]
pub(crate) struct GroupTable {
    entries: Vec<(Option<Value>, Accumulator)>,
    index: HashMap<Option<Value>, usize>,
}

impl GroupTable {
    /// Merges `value` into the group `key`, creating it on first sight.
    pub(crate) fn merge(
        &mut self,
        key: Option<Value>,
        func: AggregateFunc,
        value: i64,
    ) -> HeapstoneResult<()> {
        match self.index.get(&key) {
            Some(&i) => self.entries[i].1.merge(func, value),
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, Accumulator::first(func, value)));
                Ok(())
            }
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Copies the groups out for a result iterator.
    ///
    /// An empty ungrouped table yields one zero-count entry for functions
    /// that report a count.
    pub(crate) fn snapshot(
        &self,
        grouped: bool,
        func: AggregateFunc,
    ) -> Vec<(Option<Value>, Accumulator)> {
        if self.entries.is_empty() && !grouped && func.has_empty_result() {
            return vec![(None, Accumulator::default())];
        }
        self.entries.clone()
    }
}
