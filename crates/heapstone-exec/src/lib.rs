//! # heapstone-exec
//!
//! Pull-based query operators for heapstone.
//!
//! Every operator implements [`Operator`]: a five-call protocol of `open`,
//! `has_next`, `next`, `rewind` and `close`. Parents own their children as
//! `Box<dyn Operator>` and drive them synchronously from their own `next`.
//!
//! ```text
//!              AggregateExec
//!                    │
//!           NestedLoopJoinExec
//!              ┌─────┴─────┐
//!        SeqScanExec   SeqScanExec
//!         (outer)        (inner)
//! ```
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use heapstone_common::{FieldType, Row, Schema, Value};
//! use heapstone_exec::{collect_rows, AggregateExec, AggregateFunc, Operator, ValuesExec};
//!
//! let schema = Arc::new(Schema::from_types(&[FieldType::Int], &["n"]).unwrap());
//! let rows = [5, 1, 9, 3]
//!     .into_iter()
//!     .map(|n| Row::from_values(schema.clone(), vec![Value::int(n)]).unwrap())
//!     .collect();
//!
//! let values = ValuesExec::new(schema, rows);
//! let mut max = AggregateExec::new(Box::new(values), 0, None, AggregateFunc::Max).unwrap();
//! max.open().unwrap();
//! let out = collect_rows(&mut max).unwrap();
//! assert_eq!(out[0].get(0).unwrap(), Some(&Value::int(9)));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod aggregate;
pub mod join;
pub mod operator;
pub mod scan;
pub mod values;

pub use aggregate::{
    AggregateExec, AggregateFunc, AggregateResults, Aggregator, Grouping, IntAggregator,
    TextAggregator,
};
pub use join::{CmpOp, FieldPredicate, FnPredicate, JoinPredicate, NestedLoopJoinExec};
pub use operator::{collect_rows, Operator};
pub use scan::SeqScanExec;
pub use values::ValuesExec;
