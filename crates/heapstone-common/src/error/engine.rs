//! Engine error types.
//!
//! Every failure the storage and execution layers can report is a variant of
//! [`HeapstoneError`]. Variants are grouped into stable [`ErrorKind`]s so
//! callers can branch on the category without matching every variant.

use std::fmt;
use std::io;

use thiserror::Error;

use crate::types::{FieldType, HeapPageId};

/// Error kinds for categorizing errors.
///
/// These codes can be used for programmatic error handling and
/// are stable across versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum ErrorKind {
    // General errors (0x0000 - 0x00FF)
    /// Invalid argument or configuration.
    InvalidArgument = 0x0001,
    /// Arithmetic result out of range.
    Overflow = 0x0002,

    // I/O errors (0x0100 - 0x01FF)
    /// Backing-store read error or short read.
    IoFailure = 0x0100,
    /// Store length is not a multiple of the page size.
    MalformedStore = 0x0101,
    /// Page bytes could not be decoded.
    Corruption = 0x0102,

    // Schema errors (0x0200 - 0x02FF)
    /// Field name not present in a schema.
    NoSuchField = 0x0200,
    /// Field index outside a schema or row.
    IndexOutOfRange = 0x0201,

    // Execution errors (0x0300 - 0x03FF)
    /// Iterator protocol misuse.
    InvalidState = 0x0300,
    /// Pulled past the end of an operator.
    NoMoreRows = 0x0301,
    /// Aggregate function not defined for the field type.
    UnsupportedFunction = 0x0302,
}

impl ErrorKind {
    /// Returns the numeric code.
    #[inline]
    #[must_use]
    pub const fn as_u16(self) -> u16 {
        self as u16
    }

    /// Returns the error category name.
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match (*self as u16) >> 8 {
            0x00 => "General",
            0x01 => "I/O",
            0x02 => "Schema",
            0x03 => "Execution",
            _ => "Unknown",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// The main error type for heapstone.
///
/// # Example
///
/// ```rust
/// use heapstone_common::error::{ErrorKind, HeapstoneError};
///
/// let err = HeapstoneError::NoMoreRows { operator: "SeqScan" };
/// assert_eq!(err.kind(), ErrorKind::NoMoreRows);
/// ```
#[derive(Debug, Error)]
pub enum HeapstoneError {
    // ==========================================================================
    // General Errors
    // ==========================================================================
    /// Invalid argument provided.
    #[error("invalid argument: {message}")]
    InvalidArgument {
        /// Error message.
        message: String,
    },

    /// Invalid configuration.
    #[error("configuration error: {message}")]
    Config {
        /// Error message.
        message: String,
    },

    /// A value did not have the type the operation requires.
    #[error("type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        /// Type the operation requires.
        expected: FieldType,
        /// Type that was found.
        actual: FieldType,
    },

    /// An aggregate result does not fit the output field.
    #[error("arithmetic overflow: {message}")]
    Overflow {
        /// Error message.
        message: String,
    },

    // ==========================================================================
    // I/O Errors
    // ==========================================================================
    /// I/O error from the backing store.
    #[error("I/O error: {source}")]
    IoFailure {
        /// The underlying I/O error.
        #[from]
        source: io::Error,
    },

    /// Fewer bytes than a full page were available.
    #[error("short read of page {page_id}: expected {expected} bytes, got {actual}")]
    ShortRead {
        /// The page being read.
        page_id: HeapPageId,
        /// Bytes requested.
        expected: usize,
        /// Bytes actually read.
        actual: usize,
    },

    /// Store length is not an exact multiple of the page size.
    #[error("malformed store: length {length} is not a multiple of page size {page_size}")]
    MalformedStore {
        /// Store length in bytes.
        length: u64,
        /// Configured page size.
        page_size: usize,
    },

    /// Page bytes could not be decoded.
    #[error("page {page_id} is corrupted: {reason}")]
    Corruption {
        /// The corrupted page.
        page_id: HeapPageId,
        /// Reason for corruption.
        reason: String,
    },

    // ==========================================================================
    // Schema Errors
    // ==========================================================================
    /// No field with the given name.
    #[error("no such field: {name}")]
    NoSuchField {
        /// The missing field name.
        name: String,
    },

    /// Field index outside `[0, len)`.
    #[error("index {index} out of range for {len} fields")]
    IndexOutOfRange {
        /// The offending index.
        index: usize,
        /// Number of fields.
        len: usize,
    },

    // ==========================================================================
    // Execution Errors
    // ==========================================================================
    /// Iterator protocol misuse.
    #[error("{operator}: cannot {operation} while {state}")]
    InvalidState {
        /// Operator name.
        operator: &'static str,
        /// Attempted operation.
        operation: &'static str,
        /// Current state.
        state: &'static str,
    },

    /// `next` called on an exhausted operator.
    #[error("{operator}: no more rows")]
    NoMoreRows {
        /// Operator name.
        operator: &'static str,
    },

    /// Aggregate function not supported for the field type.
    #[error("aggregate function {function} is not supported over {field_type} fields")]
    UnsupportedFunction {
        /// Function name.
        function: String,
        /// Aggregated field type.
        field_type: FieldType,
    },
}

impl HeapstoneError {
    /// Creates an `InvalidArgument` error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Creates a `Config` error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Creates an `InvalidState` error for an operator that is not open.
    pub fn not_open(operator: &'static str, operation: &'static str) -> Self {
        Self::InvalidState {
            operator,
            operation,
            state: "closed",
        }
    }

    /// Creates an `InvalidState` error for a second `open` call.
    pub fn already_open(operator: &'static str) -> Self {
        Self::InvalidState {
            operator,
            operation: "open",
            state: "already open",
        }
    }

    /// Creates a `Corruption` error.
    pub fn corruption(page_id: HeapPageId, reason: impl Into<String>) -> Self {
        Self::Corruption {
            page_id,
            reason: reason.into(),
        }
    }

    /// Returns the error kind.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidArgument { .. } | Self::Config { .. } | Self::TypeMismatch { .. } => {
                ErrorKind::InvalidArgument
            }
            Self::Overflow { .. } => ErrorKind::Overflow,
            Self::IoFailure { .. } | Self::ShortRead { .. } => ErrorKind::IoFailure,
            Self::MalformedStore { .. } => ErrorKind::MalformedStore,
            Self::Corruption { .. } => ErrorKind::Corruption,
            Self::NoSuchField { .. } => ErrorKind::NoSuchField,
            Self::IndexOutOfRange { .. } => ErrorKind::IndexOutOfRange,
            Self::InvalidState { .. } => ErrorKind::InvalidState,
            Self::NoMoreRows { .. } => ErrorKind::NoMoreRows,
            Self::UnsupportedFunction { .. } => ErrorKind::UnsupportedFunction,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TableId;

    #[test]
    fn test_error_kind_category() {
        assert_eq!(ErrorKind::InvalidArgument.category(), "General");
        assert_eq!(ErrorKind::IoFailure.category(), "I/O");
        assert_eq!(ErrorKind::NoSuchField.category(), "Schema");
        assert_eq!(ErrorKind::NoMoreRows.category(), "Execution");
    }

    #[test]
    fn test_short_read_is_io_failure() {
        let err = HeapstoneError::ShortRead {
            page_id: HeapPageId::new(TableId::new(1), 3),
            expected: 4096,
            actual: 10,
        };
        assert_eq!(err.kind(), ErrorKind::IoFailure);
        assert!(err.to_string().contains("expected 4096"));
    }

    #[test]
    fn test_from_io_error() {
        let err: HeapstoneError = io::Error::new(io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(err, HeapstoneError::IoFailure { .. }));
        assert_eq!(err.kind(), ErrorKind::IoFailure);
    }

    #[test]
    fn test_invalid_state_display() {
        let err = HeapstoneError::not_open("NestedLoopJoin", "next");
        assert_eq!(err.to_string(), "NestedLoopJoin: cannot next while closed");
        assert_eq!(err.kind(), ErrorKind::InvalidState);
    }
}
