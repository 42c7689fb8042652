//! Schema representation.
//!
//! A schema is the ordered list of typed fields every row of a table (or
//! every output row of an operator) conforms to.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::FieldType;
use crate::error::{HeapstoneError, HeapstoneResult};

/// A named, typed field in a schema.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Field {
    /// Field name. Need not be unique within a schema.
    pub name: String,
    /// Field type.
    pub field_type: FieldType,
}

impl Field {
    /// Creates a new field.
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
        }
    }

    /// Returns the field name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name, self.field_type)
    }
}

/// An ordered sequence of fields. Always holds at least one field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Schema {
    fields: Vec<Field>,
}

impl Schema {
    /// Creates a schema from fields.
    ///
    /// Fails with `InvalidArgument` if `fields` is empty.
    pub fn new(fields: Vec<Field>) -> HeapstoneResult<Self> {
        if fields.is_empty() {
            return Err(HeapstoneError::invalid_argument(
                "schema must have at least one field",
            ));
        }
        Ok(Self { fields })
    }

    /// Creates a schema from parallel type and name lists.
    pub fn from_types(types: &[FieldType], names: &[&str]) -> HeapstoneResult<Self> {
        if types.len() != names.len() {
            return Err(HeapstoneError::invalid_argument(format!(
                "{} field types but {} field names",
                types.len(),
                names.len()
            )));
        }
        let fields = types
            .iter()
            .zip(names)
            .map(|(&t, &n)| Field::new(n, t))
            .collect();
        Self::new(fields)
    }

    /// Creates a schema of unnamed fields, named by ordinal (`f0`, `f1`, ...).
    pub fn unnamed(types: &[FieldType]) -> HeapstoneResult<Self> {
        let fields = types
            .iter()
            .enumerate()
            .map(|(i, &t)| Field::new(format!("f{i}"), t))
            .collect();
        Self::new(fields)
    }

    /// Returns the number of fields.
    pub fn num_fields(&self) -> usize {
        self.fields.len()
    }

    /// Returns all fields.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Returns the field at `index`.
    pub fn field(&self, index: usize) -> HeapstoneResult<&Field> {
        self.fields
            .get(index)
            .ok_or(HeapstoneError::IndexOutOfRange {
                index,
                len: self.fields.len(),
            })
    }

    /// Returns the type of the field at `index`.
    pub fn field_type(&self, index: usize) -> HeapstoneResult<FieldType> {
        self.field(index).map(|f| f.field_type)
    }

    /// Returns the name of the field at `index`.
    pub fn field_name(&self, index: usize) -> HeapstoneResult<&str> {
        self.field(index).map(Field::name)
    }

    /// Returns the position of the first field called `name`.
    pub fn index_of(&self, name: &str) -> HeapstoneResult<usize> {
        self.fields
            .iter()
            .position(|f| f.name == name)
            .ok_or_else(|| HeapstoneError::NoSuchField {
                name: name.to_string(),
            })
    }

    /// Encoded size in bytes of one row with this schema.
    pub fn byte_size(&self) -> usize {
        self.fields.iter().map(|f| f.field_type.encoded_size()).sum()
    }

    /// Concatenates two schemas, `left` fields first.
    pub fn merge(left: &Schema, right: &Schema) -> Schema {
        let mut fields = Vec::with_capacity(left.fields.len() + right.fields.len());
        fields.extend(left.fields.iter().cloned());
        fields.extend(right.fields.iter().cloned());
        Schema { fields }
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, field) in self.fields.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", field)?;
        }
        Ok(())
    }
}
