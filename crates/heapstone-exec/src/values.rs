//! In-memory row source.

use std::sync::Arc;

use heapstone_common::{HeapstoneError, HeapstoneResult, Row, Schema};

use crate::operator::Operator;

const NAME: &str = "ValuesExec";

/// Replays a fixed list of rows.
#[derive(Debug, Clone)]
pub struct ValuesExec {
    schema: Arc<Schema>,
    rows: Vec<Row>,
    /// Index of the next row; `None` while closed.
    position: Option<usize>,
}

impl ValuesExec {
    /// Creates an operator over `rows`.
    pub fn new(schema: Arc<Schema>, rows: Vec<Row>) -> Self {
        Self {
            schema,
            rows,
            position: None,
        }
    }

    fn position_mut(&mut self, operation: &'static str) -> HeapstoneResult<&mut usize> {
        self.position
            .as_mut()
            .ok_or_else(|| HeapstoneError::not_open(NAME, operation))
    }
}

impl Operator for ValuesExec {
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
        let len = self.rows.len();
        Ok(*self.position_mut("has_next")? < len)
    }

    fn next(&mut self) -> HeapstoneResult<Row> {
        let len = self.rows.len();
        let position = self.position_mut("next")?;
        if *position >= len {
            return Err(HeapstoneError::NoMoreRows { operator: NAME });
        }
        let index = *position;
        *position += 1;
        Ok(self.rows[index].clone())
    }

    fn rewind(&mut self) -> HeapstoneResult<()> {
        *self.position_mut("rewind")? = 0;
        Ok(())
    }

    fn close(&mut self) {
        self.position = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operator::collect_rows;
    use heapstone_common::{ErrorKind, FieldType, Value};

    fn values() -> ValuesExec {
        let schema = Arc::new(Schema::unnamed(&[FieldType::Int]).unwrap());
        let rows = (1..=3)
            .map(|i| Row::from_values(schema.clone(), vec![Value::int(i)]).unwrap())
            .collect();
        ValuesExec::new(schema, rows)
    }

    #[test]
    fn test_lifecycle() {
        let mut op = values();
        assert_eq!(op.next().unwrap_err().kind(), ErrorKind::InvalidState);

        op.open().unwrap();
        assert_eq!(op.open().unwrap_err().kind(), ErrorKind::InvalidState);
        assert_eq!(collect_rows(&mut op).unwrap().len(), 3);
        assert!(!op.has_next().unwrap());
        assert_eq!(op.next().unwrap_err().kind(), ErrorKind::NoMoreRows);

        op.rewind().unwrap();
        assert_eq!(op.next().unwrap().to_string(), "1");

        op.close();
        op.close();
        assert_eq!(op.rewind().unwrap_err().kind(), ErrorKind::InvalidState);
    }
}
