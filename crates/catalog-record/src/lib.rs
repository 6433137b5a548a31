//! # catalog-record
//!
//! The shared record abstraction for the catalog engine.
//!
//! Every catalog entity coming from the vendor API (categories, attributes,
//! internal categories, products) is handled as a [`CatalogRecord`]: an
//! identity, an optional parent reference and an open map of named fields.
//! Both the taxonomy builder and the collection engine operate on sequences
//! of these records.
//!
//! ## Usage
//!
//! ```rust
//! use catalog_record::{CatalogRecord, FieldPath, FieldValue};
//!
//! let phones = CatalogRecord::new(12)
//!     .with_parent(3)
//!     .with_field("name", "Phones")
//!     .with_field("price", 199.0)
//!     .with_field(
//!         "attributes",
//!         FieldValue::map([("color", FieldValue::from("black"))]),
//!     );
//!
//! assert_eq!(phones.str_field("name").unwrap(), "Phones");
//!
//! let path = FieldPath::parse("attributes.color").unwrap();
//! assert_eq!(phones.resolve(&path).unwrap().as_str(), Some("black"));
//! ```
//!
//! ## Field Paths
//!
//! | Path | Meaning |
//! |------|---------|
//! | `price` | top-level field |
//! | `attributes.color` | key inside a nested map |
//! | `images[0].url` | element of a nested list, then a key |
//!
//! ## Feature Flags
//!
//! - `serde` - Serialize/deserialize records from the usual vendor JSON shape

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
mod id;
mod path;
mod record;
mod value;

pub use error::{RecordError, RecordResult};
pub use id::RecordId;
pub use path::{FieldPath, PathSegment};
pub use record::CatalogRecord;
pub use value::{FieldValue, ValueKind};
