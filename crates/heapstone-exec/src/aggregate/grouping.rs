//! Group key extraction.

use heapstone_common::{FieldType, HeapstoneError, HeapstoneResult, Row, Value};

/// How rows are grouped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grouping {
    /// All rows fall into one implicit group.
    None,
    /// Rows are grouped by the value of one field.
    By {
        /// Position of the grouping field.
        index: usize,
        /// Type of the grouping field.
        field_type: FieldType,
    },
}

impl Grouping {
    /// Groups by the field at `index`.
    pub fn by(index: usize, field_type: FieldType) -> Self {
        Grouping::By { index, field_type }
    }

    /// Returns true unless this is [`Grouping::None`].
    pub fn is_grouped(&self) -> bool {
        matches!(self, Grouping::By { .. })
    }

    /// Extracts the group key of `row`; `None` is the implicit group.
    pub(crate) fn key_of(&self, row: &Row) -> HeapstoneResult<Option<Value>> {
        let Grouping::By { index, field_type } = *self else {
            return Ok(None);
        };
        let value = row.get(index)?.ok_or_else(|| {
            HeapstoneError::invalid_argument(format!("group field {index} is unset"))
        })?;
        if value.field_type() != field_type {
            return Err(HeapstoneError::TypeMismatch {
                expected: field_type,
                actual: value.field_type(),
            });
        }
        Ok(Some(value.clone()))
    }
}
