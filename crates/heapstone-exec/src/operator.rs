//! The iterator protocol shared by every operator.

use std::fmt;
use std::sync::Arc;

use heapstone_common::{HeapstoneResult, Row, Schema};

/// Trait for executable operators.
///
/// An operator is either *closed* or *ready*. It starts closed; `open`
/// makes it ready (opening its children first) and `close` returns it to
/// closed. `has_next`, `next` and `rewind` fail with `InvalidState` while
/// closed, and a second `open` without a `close` fails the same way.
pub trait Operator: fmt::Debug {
    /// Returns the output schema.
    fn schema(&self) -> Arc<Schema>;

    /// Prepares the operator, and its children, to produce rows.
    fn open(&mut self) -> HeapstoneResult<()>;

    /// Returns true if `next` would return a row. Calling it repeatedly
    /// without `next` has no further effect.
    fn has_next(&mut self) -> HeapstoneResult<bool>;

    /// Returns the next row, or `NoMoreRows` when exhausted.
    fn next(&mut self) -> HeapstoneResult<Row>;

    /// Returns to the position right after `open`.
    fn rewind(&mut self) -> HeapstoneResult<()>;

    /// Releases state and closes children. Closing a closed operator is a
    /// no-op.
    fn close(&mut self);
}

impl<T: Operator + ?Sized> Operator for Box<T> {
    fn schema(&self) -> Arc<Schema> {
        (**self).schema()
    }

    fn open(&mut self) -> HeapstoneResult<()> {
        (**self).open()
    }

    fn has_next(&mut self) -> HeapstoneResult<bool> {
        (**self).has_next()
    }

    fn next(&mut self) -> HeapstoneResult<Row> {
        (**self).next()
    }

    fn rewind(&mut self) -> HeapstoneResult<()> {
        (**self).rewind()
    }

    fn close(&mut self) {
        (**self).close()
    }
}

/// Drains the remaining rows of a ready operator.
pub fn collect_rows(op: &mut dyn Operator) -> HeapstoneResult<Vec<Row>> {
    let mut rows = Vec::new();
    while op.has_next()? {
        rows.push(op.next()?);
    }
    Ok(rows)
}
