//! Error handling for heapstone.
//!
//! This module provides a unified error type and result alias used
//! across the storage and execution crates.

mod engine;

pub use engine::{ErrorKind, HeapstoneError};

/// Result type alias for heapstone operations.
pub type HeapstoneResult<T> = std::result::Result<T, HeapstoneError>;
