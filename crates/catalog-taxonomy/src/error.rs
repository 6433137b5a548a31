//! Error types for taxonomy construction and lookup.

use catalog_record::RecordId;
use thiserror::Error;

/// Errors that can occur while building or querying a taxonomy.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TaxonomyError {
    /// Two input records share the same id.
    #[error("duplicate record id: {0}")]
    DuplicateIdentity(RecordId),

    /// No record with the requested id exists.
    #[error("record not found: {0}")]
    NotFound(RecordId),

    /// Records whose parent chain never reaches a root.
    #[error("cyclic parent references: {}", join_ids(.ids))]
    CyclicParent {
        /// Unreachable record ids, in input order.
        ids: Vec<RecordId>,
    },
}

/// Result type for taxonomy operations.
pub type TaxonomyResult<T> = std::result::Result<T, TaxonomyError>;

fn join_ids(ids: &[RecordId]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
