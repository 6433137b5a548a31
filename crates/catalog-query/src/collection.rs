//! Owned record collection.

use catalog_record::CatalogRecord;

use crate::config::QueryConfig;
use crate::query::Query;

/// An ordered, owned set of records with query settings attached.
///
/// Records are never mutated by queries; every [`Query`] borrows them.
///
/// # Example
///
/// ```rust
/// use catalog_query::{Collection, Direction};
/// use catalog_record::CatalogRecord;
///
/// let products: Collection = vec![
///     CatalogRecord::new(1).with_field("price", 10),
///     CatalogRecord::new(2).with_field("price", 10),
///     CatalogRecord::new(3).with_field("price", 5),
/// ]
/// .into_iter()
/// .collect();
///
/// let ids: Vec<String> = products
///     .query()
///     .sort_by("price", Direction::Ascending)
///     .ids()
///     .iter()
///     .map(ToString::to_string)
///     .collect();
/// assert_eq!(ids, ["3", "1", "2"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Collection {
    records: Vec<CatalogRecord>,
    config: QueryConfig,
}

impl Collection {
    /// Creates a collection with default settings.
    pub fn new(records: Vec<CatalogRecord>) -> Self {
        Self {
            records,
            config: QueryConfig::default(),
        }
    }

    /// Creates a collection with custom settings.
    pub fn with_config(records: Vec<CatalogRecord>, config: QueryConfig) -> Self {
        Self { records, config }
    }

    /// Starts a query over every record, in collection order.
    pub fn query(&self) -> Query<'_> {
        Query::with_config(&self.records, self.config)
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the collection holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The records, in collection order.
    pub fn records(&self) -> &[CatalogRecord] {
        &self.records
    }

    /// Iterates the records in collection order.
    pub fn iter(&self) -> std::slice::Iter<'_, CatalogRecord> {
        self.records.iter()
    }

    /// The query settings.
    pub fn config(&self) -> &QueryConfig {
        &self.config
    }

    /// Replaces the query settings.
    pub fn set_config(&mut self, config: QueryConfig) {
        self.config = config;
    }

    /// Consumes the collection into its records.
    pub fn into_records(self) -> Vec<CatalogRecord> {
        self.records
    }
}

impl FromIterator<CatalogRecord> for Collection {
    fn from_iter<I: IntoIterator<Item = CatalogRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl From<Vec<CatalogRecord>> for Collection {
    fn from(records: Vec<CatalogRecord>) -> Self {
        Self::new(records)
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = &'a CatalogRecord;
    type IntoIter = std::slice::Iter<'a, CatalogRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl IntoIterator for Collection {
    type Item = CatalogRecord;
    type IntoIter = std::vec::IntoIter<CatalogRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}
