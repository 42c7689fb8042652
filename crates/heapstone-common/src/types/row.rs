//! Row representation.
//!
//! A `Row` holds one value slot per schema field plus an optional
//! [`RecordId`] locating it on disk.

use std::fmt;
use std::sync::Arc;

use super::{RecordId, Schema, Value};
use crate::error::{HeapstoneError, HeapstoneResult};

/// A single row of values.
///
/// Positions start unset and are filled with [`Row::set`]. `set` does not
/// check the value against the schema's field type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    schema: Arc<Schema>,
    values: Vec<Option<Value>>,
    record_id: Option<RecordId>,
}

impl Row {
    /// Creates a row with every field unset.
    pub fn new(schema: Arc<Schema>) -> Self {
        let values = vec![None; schema.num_fields()];
        Self {
            schema,
            values,
            record_id: None,
        }
    }

    /// Creates a fully populated row.
    ///
    /// Fails with `InvalidArgument` if the number of values differs from the
    /// schema's field count.
    pub fn from_values(schema: Arc<Schema>, values: Vec<Value>) -> HeapstoneResult<Self> {
        if values.len() != schema.num_fields() {
            return Err(HeapstoneError::invalid_argument(format!(
                "row has {} values but schema has {} fields",
                values.len(),
                schema.num_fields()
            )));
        }
        Ok(Self {
            schema,
            values: values.into_iter().map(Some).collect(),
            record_id: None,
        })
    }

    /// Returns the schema this row conforms to.
    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    /// Returns the number of fields.
    pub fn num_fields(&self) -> usize {
        self.values.len()
    }

    /// Returns the value at `index`, or `None` if it has not been set.
    pub fn get(&self, index: usize) -> HeapstoneResult<Option<&Value>> {
        self.values
            .get(index)
            .map(Option::as_ref)
            .ok_or(HeapstoneError::IndexOutOfRange {
                index,
                len: self.values.len(),
            })
    }

    /// Sets the value at `index`.
    pub fn set(&mut self, index: usize, value: Value) -> HeapstoneResult<()> {
        let len = self.values.len();
        let slot = self
            .values
            .get_mut(index)
            .ok_or(HeapstoneError::IndexOutOfRange { index, len })?;
        *slot = Some(value);
        Ok(())
    }

    /// Returns all value slots in field order.
    pub fn values(&self) -> &[Option<Value>] {
        &self.values
    }

    /// Returns the row's physical location, if it came from storage.
    pub fn record_id(&self) -> Option<RecordId> {
        self.record_id
    }

    /// Replaces the row's physical location.
    pub fn set_record_id(&mut self, record_id: Option<RecordId>) {
        self.record_id = record_id;
    }

    /// Builder-style variant of [`Row::set_record_id`].
    #[must_use]
    pub fn with_record_id(mut self, record_id: RecordId) -> Self {
        self.record_id = Some(record_id);
        self
    }

    /// Concatenates this row with `other` under `schema`.
    ///
    /// The result keeps this row's record id; `other`'s is dropped.
    pub fn concat(&self, other: &Row, schema: Arc<Schema>) -> Row {
        let mut values = Vec::with_capacity(self.values.len() + other.values.len());
        values.extend(self.values.iter().cloned());
        values.extend(other.values.iter().cloned());
        Row {
            schema,
            values,
            record_id: self.record_id,
        }
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 {
                write!(f, "\t")?;
            }
            match value {
                Some(v) => write!(f, "{}", v)?,
                None => write!(f, "null")?,
            }
        }
        Ok(())
    }
}
