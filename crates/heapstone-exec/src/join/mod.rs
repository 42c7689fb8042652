//! Nested-loop join and join predicates.

mod nested_loop;
mod predicate;

pub use nested_loop::NestedLoopJoinExec;
pub use predicate::{CmpOp, FieldPredicate, FnPredicate, JoinPredicate};
