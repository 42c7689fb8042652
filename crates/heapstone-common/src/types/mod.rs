//! Type definitions for heapstone.
//!
//! This module contains the identifiers, values, schemas and rows shared by
//! the storage and execution layers.

mod ids;
mod row;
mod schema;
mod value;

pub use ids::{HeapPageId, RecordId, TableId};
pub use row::Row;
pub use schema::{Field, Schema};
pub use value::{FieldType, Value};
