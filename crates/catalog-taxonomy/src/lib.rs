//! # catalog-taxonomy
//!
//! Rebuilds flat, parent-referenced catalog records (categories, attributes,
//! internal categories) into navigable trees.
//!
//! ## Quick Start
//!
//! ```rust
//! use catalog_record::{CatalogRecord, RecordId};
//! use catalog_taxonomy::{build_tree, depth, find, flatten};
//!
//! let records = vec![
//!     CatalogRecord::new(1).with_parent(0).with_field("name", "Apparel"),
//!     CatalogRecord::new(2).with_parent(1).with_field("name", "Shoes"),
//!     CatalogRecord::new(3).with_parent(1).with_field("name", "Shirts"),
//! ];
//!
//! let forest = build_tree(records.clone())?;
//! assert_eq!(depth(&forest), 2);
//! assert_eq!(find(&forest, &RecordId::from(3))?.record().str_field("name").unwrap(), "Shirts");
//! assert_eq!(flatten(&forest), records);
//! # Ok::<(), catalog_taxonomy::TaxonomyError>(())
//! ```
//!
//! ## Rules
//!
//! | Input | Result |
//! |-------|--------|
//! | parent absent, `0`, `""` or `"0"` | top-level root, input order |
//! | parent matches another record | child of that record, input order |
//! | parent matches nothing | top-level root (dangling parent) |
//! | two records with one id | `TaxonomyError::DuplicateIdentity` |
//! | parent chain never reaches a root | `TaxonomyError::CyclicParent` |
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                    catalog-taxonomy                       │
//! │                                                           │
//! │  Forest (owned)            TaxonomyIndex<'a> (borrowed)   │
//! │  ├── build: id index +     ├── parent/children indexes    │
//! │  │   parent→children index ├── ancestors (nearest first)  │
//! │  ├── flatten (pre-order)   ├── descendants (BFS)          │
//! │  ├── find / depth          └── to_forest                  │
//! │  └── ancestor_path / path_label                           │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` - Serialize forests as nested JSON (`children` omitted on leaves)

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
mod forest;
mod index;
mod node;
mod stats;

pub use error::{TaxonomyError, TaxonomyResult};
pub use forest::Forest;
pub use index::TaxonomyIndex;
pub use node::{Preorder, TreeNode};
pub use stats::TaxonomyStats;

// Re-export the record types for convenience
pub use catalog_record::{CatalogRecord, RecordId};

/// Builds a forest from flat records. See [`Forest::build`].
pub fn build_tree<I>(records: I) -> TaxonomyResult<Forest>
where
    I: IntoIterator<Item = CatalogRecord>,
{
    Forest::build(records)
}

/// Returns the forest's records in pre-order. See [`Forest::flatten`].
pub fn flatten(forest: &Forest) -> Vec<CatalogRecord> {
    forest.flatten()
}

/// Finds a node by id. See [`Forest::find`].
pub fn find<'a>(forest: &'a Forest, id: &RecordId) -> TaxonomyResult<&'a TreeNode> {
    forest.find(id)
}

/// Maximum depth of the forest. See [`Forest::depth`].
pub fn depth(forest: &Forest) -> usize {
    forest.depth()
}

/// Root-to-node record chain. See [`Forest::ancestor_path`].
pub fn ancestor_path<'a>(forest: &'a Forest, id: &RecordId) -> TaxonomyResult<Vec<&'a CatalogRecord>> {
    forest.ancestor_path(id)
}
