//! Nested-loop join.

use std::sync::Arc;

use tracing::debug;

use heapstone_common::{HeapstoneError, HeapstoneResult, Row, Schema};

use super::predicate::JoinPredicate;
use crate::operator::Operator;

const NAME: &str = "NestedLoopJoinExec";

/// Per-open join state.
#[derive(Debug, Default)]
struct JoinState {
    /// Outer row currently being matched.
    outer: Option<Row>,
    /// Row produced by `has_next` and not yet returned.
    pending: Option<Row>,
}

/// Joins two children with an arbitrary predicate.
///
/// For each left (outer) row the right (inner) child is streamed from its
/// current position and every match is emitted immediately. When the inner
/// child is exhausted it is rewound and the outer child advances. Output
/// rows are `left ⧺ right` and carry the left row's record id.
#[derive(Debug)]
pub struct NestedLoopJoinExec {
    /// Outer child.
    left: Box<dyn Operator>,
    /// Inner child.
    right: Box<dyn Operator>,
    /// Join predicate.
    predicate: Box<dyn JoinPredicate>,
    /// Output schema.
    schema: Arc<Schema>,
    /// `None` while closed.
    state: Option<JoinState>,
}

impl NestedLoopJoinExec {
    /// Creates a new nested-loop join.
    pub fn new(
        predicate: Box<dyn JoinPredicate>,
        left: Box<dyn Operator>,
        right: Box<dyn Operator>,
    ) -> Self {
        let schema = Arc::new(Schema::merge(&left.schema(), &right.schema()));
        Self {
            left,
            right,
            predicate,
            schema,
            state: None,
        }
    }

    /// Returns the join predicate.
    pub fn predicate(&self) -> &dyn JoinPredicate {
        self.predicate.as_ref()
    }

    /// Returns the names of the compared `(left, right)` fields when the
    /// predicate is a field comparison.
    pub fn join_field_names(&self) -> Option<(String, String)> {
        let (l, r) = self.predicate.fields()?;
        let left = self.left.schema().field_name(l).ok()?.to_string();
        let right = self.right.schema().field_name(r).ok()?.to_string();
        Some((left, right))
    }

    /// Advances to the next matching pair.
    fn fetch_next(&mut self) -> HeapstoneResult<Option<Row>> {
        let Self {
            left,
            right,
            predicate,
            schema,
            state,
        } = self;
        let state = state
            .as_mut()
            .ok_or_else(|| HeapstoneError::not_open(NAME, "next"))?;

        loop {
            if state.outer.is_none() {
                if !left.has_next()? {
                    return Ok(None);
                }
                state.outer = Some(left.next()?);
            }
            let Some(outer) = state.outer.as_ref() else {
                continue;
            };

            while right.has_next()? {
                let inner = right.next()?;
                if predicate.matches(outer, &inner) {
                    return Ok(Some(outer.concat(&inner, schema.clone())));
                }
            }

            right.rewind()?;
            state.outer = None;
        }
    }

    fn state_mut(&mut self, operation: &'static str) -> HeapstoneResult<&mut JoinState> {
        self.state
            .as_mut()
            .ok_or_else(|| HeapstoneError::not_open(NAME, operation))
    }
}

impl Operator for NestedLoopJoinExec {
    fn schema(&self) -> Arc<Schema> {
        self.schema.clone()
    }

    fn open(&mut self) -> HeapstoneResult<()> {
        if self.state.is_some() {
            return Err(HeapstoneError::already_open(NAME));
        }
        self.left.open()?;
        if let Err(e) = self.right.open() {
            self.left.close();
            return Err(e);
        }
        debug!(schema = %self.schema, "opened nested-loop join");
        self.state = Some(JoinState::default());
        Ok(())
    }

    fn has_next(&mut self) -> HeapstoneResult<bool> {
        if self.state_mut("has_next")?.pending.is_some() {
            return Ok(true);
        }
        let row = self.fetch_next()?;
        let state = self.state_mut("has_next")?;
        state.pending = row;
        Ok(state.pending.is_some())
    }

    fn next(&mut self) -> HeapstoneResult<Row> {
        if let Some(row) = self.state_mut("next")?.pending.take() {
            return Ok(row);
        }
        self.fetch_next()?
            .ok_or(HeapstoneError::NoMoreRows { operator: NAME })
    }

    fn rewind(&mut self) -> HeapstoneResult<()> {
        self.state_mut("rewind")?;
        self.left.rewind()?;
        self.right.rewind()?;
        self.state = Some(JoinState::default());
        Ok(())
    }

    fn close(&mut self) {
        self.state = None;
        self.right.close();
        self.left.close();
    }
}
