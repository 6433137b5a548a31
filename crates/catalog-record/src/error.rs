//! Error types for record access and field path parsing.

use thiserror::Error;

use crate::value::ValueKind;

/// Errors that can occur when reading fields from a record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    /// The requested field is not present on the record.
    #[error("missing field: {0}")]
    MissingField(String),

    /// The field is present but holds a different kind of value.
    #[error("type mismatch for field '{field}': expected {expected}, found {found}")]
    TypeMismatch {
        /// Name of the field.
        field: String,
        /// Kind the caller asked for.
        expected: ValueKind,
        /// Kind actually stored.
        found: ValueKind,
    },

    /// Empty field path provided.
    #[error("empty field path")]
    EmptyFieldPath,

    /// Field path could not be parsed.
    #[error("invalid field path at position {position}: {message}")]
    InvalidFieldPath {
        /// Position in the input where parsing failed.
        position: usize,
        /// Description of the error.
        message: String,
    },
}

/// Result type for record operations.
pub type RecordResult<T> = std::result::Result<T, RecordError>;
