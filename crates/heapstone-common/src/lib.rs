//! # heapstone-common
//!
//! Common types, errors, and configuration for heapstone.
//!
//! This crate provides the foundational types shared by the storage and
//! execution crates:
//!
//! - **Types**: identifiers (`TableId`, `HeapPageId`, `RecordId`), field
//!   values, schemas and rows
//! - **Errors**: unified error handling with `HeapstoneError`
//! - **Config**: storage and engine configuration
//! - **Constants**: page and field size limits
//!
//! ## Example
//!
//! ```rust
//! use heapstone_common::types::{FieldType, Row, Schema, Value};
//! use heapstone_common::HeapstoneResult;
//!
//! fn example() -> HeapstoneResult<()> {
//!     let schema = Schema::from_types(&[FieldType::Int, FieldType::Text], &["id", "name"])?;
//!     let mut row = Row::new(schema.into());
//!     row.set(0, Value::int(7))?;
//!     row.set(1, Value::text("seven"))?;
//!     assert_eq!(row.to_string(), "7\tseven");
//!     Ok(())
//! }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod constants;
pub mod error;
pub mod types;

// Re-export commonly used items at the crate root
pub use constants::*;
pub use error::{ErrorKind, HeapstoneError, HeapstoneResult};
pub use types::{Field, FieldType, HeapPageId, RecordId, Row, Schema, TableId, Value};
