//! Aggregate function tags.

use std::fmt;
use std::str::FromStr;

use heapstone_common::HeapstoneError;

/// Aggregate function tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AggregateFunc {
    /// Smallest value.
    Min,
    /// Largest value.
    Max,
    /// Sum of values.
    Sum,
    /// Truncated integer mean.
    Avg,
    /// Number of rows.
    Count,
    /// Combiner input: running sum and count, reporting the count.
    SumCount,
    /// Combiner average: running sum over running count.
    ScAvg,
}

impl AggregateFunc {
    /// All functions, in declaration order.
    pub const ALL: [AggregateFunc; 7] = [
        AggregateFunc::Min,
        AggregateFunc::Max,
        AggregateFunc::Sum,
        AggregateFunc::Avg,
        AggregateFunc::Count,
        AggregateFunc::SumCount,
        AggregateFunc::ScAvg,
    ];

    /// Returns the lowercase function name.
    pub fn as_str(self) -> &'static str {
        match self {
            AggregateFunc::Min => "min",
            AggregateFunc::Max => "max",
            AggregateFunc::Sum => "sum",
            AggregateFunc::Avg => "avg",
            AggregateFunc::Count => "count",
            AggregateFunc::SumCount => "sum_count",
            AggregateFunc::ScAvg => "sc_avg",
        }
    }

    /// Returns true if an empty ungrouped input still yields one row.
    pub fn has_empty_result(self) -> bool {
        matches!(self, AggregateFunc::Count | AggregateFunc::SumCount)
    }
}

impl fmt::Display for AggregateFunc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AggregateFunc {
    type Err = HeapstoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        AggregateFunc::ALL
            .into_iter()
            .find(|f| f.as_str() == lower)
            .ok_or_else(|| {
                HeapstoneError::invalid_argument(format!("unknown aggregate function: {s}"))
            })
    }
}
