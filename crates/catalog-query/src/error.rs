//! Error types for the collection engine.

use catalog_record::RecordError;
use thiserror::Error;

/// Errors that can occur in fallible collection operations.
///
/// Most query operations are total: empty ranges and out-of-range pages
/// degrade gracefully and empty aggregates are reported through
/// [`Aggregate::Empty`](crate::Aggregate::Empty).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// Typed field access failed on one of the records.
    #[error("record error: {0}")]
    Record(#[from] RecordError),

    /// A statistics spec declared the same tally name twice.
    #[error("duplicate tally name: {0}")]
    DuplicateTally(String),

    /// A statistics spec declared the same numeric field twice.
    #[error("duplicate statistics field: {0}")]
    DuplicateField(String),
}

/// Result type for collection operations.
pub type QueryResult<T> = std::result::Result<T, QueryError>;
