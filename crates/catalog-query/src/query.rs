//! Chainable, borrowed record views.

use catalog_record::{CatalogRecord, FieldPath, FieldValue, RecordId, RecordResult};
use tracing::trace;

use crate::aggregate::{self, Aggregate, AggregateOp};
use crate::collection::Collection;
use crate::config::QueryConfig;
use crate::error::QueryResult;
use crate::filter::{self, Comparison};
use crate::group::{self, Counts, Groups};
use crate::paginate::{self, Page};
use crate::search;
use crate::sort::{self, Direction, SortKey};
use crate::statistics::{self, Statistics, StatisticsSpec};

/// An ordered view over borrowed records.
///
/// Narrowing and reordering methods consume the view and return a new one,
/// so calls chain; terminal methods borrow the view and return a scalar,
/// a mapping or a [`Page`]. The underlying records are never modified.
///
/// # Example
///
/// ```rust
/// use catalog_query::{Collection, Direction};
/// use catalog_record::CatalogRecord;
///
/// let products = Collection::new(vec![
///     CatalogRecord::new(1).with_field("name", "Trail Boot").with_field("price", 120),
///     CatalogRecord::new(2).with_field("name", "Road Shoe").with_field("price", 90),
///     CatalogRecord::new(3).with_field("name", "Trail Sock").with_field("price", 12),
/// ]);
///
/// let trail = products
///     .query()
///     .search("trail", &["name"])
///     .filter_by_field_between("price", 50.0, 200.0)
///     .sort_by("price", Direction::Descending);
///
/// assert_eq!(trail.len(), 1);
/// assert_eq!(trail.first().map(|r| r.id().to_string()), Some("1".to_string()));
/// ```
#[derive(Debug, Clone)]
pub struct Query<'a> {
    rows: Vec<&'a CatalogRecord>,
    config: QueryConfig,
}

impl<'a> Query<'a> {
    /// Creates a view over `records` with default settings.
    pub fn new(records: &'a [CatalogRecord]) -> Self {
        Self::with_config(records, QueryConfig::default())
    }

    /// Creates a view over `records` with custom settings.
    pub fn with_config(records: &'a [CatalogRecord], config: QueryConfig) -> Self {
        Self {
            rows: records.iter().collect(),
            config,
        }
    }

    /// Creates a view over already-selected record references.
    pub fn from_refs(rows: Vec<&'a CatalogRecord>, config: QueryConfig) -> Self {
        Self { rows, config }
    }

    // =========================================================================
    // Narrowing and reordering
    // =========================================================================

    /// Keeps records satisfying `predicate`, in view order.
    pub fn filter<P>(self, predicate: P) -> Self
    where
        P: Fn(&CatalogRecord) -> bool + Sync,
    {
        let rows = filter::filter(self.rows, predicate, &self.config);
        Self {
            rows,
            config: self.config,
        }
    }

    /// Keeps records whose `field` equals `value`.
    ///
    /// A missing field only matches [`FieldValue::Null`].
    pub fn filter_by_field(self, field: &str, value: impl Into<FieldValue>) -> Self {
        let rows = filter::filter_by_field(self.rows, field, &value.into(), &self.config);
        Self {
            rows,
            config: self.config,
        }
    }

    /// Keeps records whose `field` equals any of `values`.
    pub fn filter_by_field_in<V, I>(self, field: &str, values: I) -> Self
    where
        V: Into<FieldValue>,
        I: IntoIterator<Item = V>,
    {
        let values: Vec<FieldValue> = values.into_iter().map(Into::into).collect();
        let rows = filter::filter_by_field_in(self.rows, field, &values, &self.config);
        Self {
            rows,
            config: self.config,
        }
    }

    /// Keeps records whose numeric `field` lies in `[low, high]`.
    ///
    /// Non-numeric and missing values are excluded; `low > high` yields an
    /// empty view.
    pub fn filter_by_field_between(self, field: &str, low: f64, high: f64) -> Self {
        let rows = filter::filter_by_field_between(self.rows, field, low, high, &self.config);
        Self {
            rows,
            config: self.config,
        }
    }

    /// Keeps records where `field op value` holds.
    pub fn filter_where(self, field: &str, op: Comparison, value: impl Into<FieldValue>) -> Self {
        let rows = filter::filter_where(self.rows, field, op, &value.into(), &self.config);
        Self {
            rows,
            config: self.config,
        }
    }

    /// Keeps records where any of `fields` contains `term`, ignoring case.
    pub fn search(self, term: &str, fields: &[&str]) -> Self {
        let rows = search::search(self.rows, term, fields, &self.config);
        Self {
            rows,
            config: self.config,
        }
    }

    /// Stable sort on one field.
    pub fn sort_by(self, field: &str, direction: Direction) -> Self {
        self.sort_by_keys(&[SortKey {
            field: field.to_string(),
            direction,
        }])
    }

    /// Stable lexicographic sort on several keys.
    pub fn sort_by_keys(self, keys: &[SortKey]) -> Self {
        let rows = sort::sort_by_keys(self.rows, keys, &self.config);
        Self {
            rows,
            config: self.config,
        }
    }

    /// Keeps the first `count` records.
    pub fn take(mut self, count: usize) -> Self {
        self.rows.truncate(count);
        self
    }

    /// Drops the first `count` records.
    pub fn skip(mut self, count: usize) -> Self {
        let count = count.min(self.rows.len());
        self.rows.drain(..count);
        self
    }

    /// Keeps the first record of each distinct `field` value.
    pub fn unique_by(self, field: &str) -> Self {
        let rows = group::unique_by(self.rows, field);
        Self {
            rows,
            config: self.config,
        }
    }

    // =========================================================================
    // Inspection
    // =========================================================================

    /// Number of records in the view.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the view is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The records in view order.
    pub fn records(&self) -> &[&'a CatalogRecord] {
        &self.rows
    }

    /// Iterates the records in view order.
    pub fn iter(&self) -> impl Iterator<Item = &'a CatalogRecord> + '_ {
        self.rows.iter().copied()
    }

    /// Consumes the view into its record references.
    pub fn into_vec(self) -> Vec<&'a CatalogRecord> {
        self.rows
    }

    /// The settings this view runs with.
    pub fn config(&self) -> &QueryConfig {
        &self.config
    }

    /// Identities in view order.
    pub fn ids(&self) -> Vec<&'a RecordId> {
        self.rows.iter().map(|r| r.id()).collect()
    }

    /// First record of the view.
    pub fn first(&self) -> Option<&'a CatalogRecord> {
        self.rows.first().copied()
    }

    /// Last record of the view.
    pub fn last(&self) -> Option<&'a CatalogRecord> {
        self.rows.last().copied()
    }

    /// The record with identity `id`, if it is in the view.
    pub fn find_by_id(&self, id: impl Into<RecordId>) -> Option<&'a CatalogRecord> {
        let id = id.into();
        self.rows.iter().copied().find(|r| r.id() == &id)
    }

    /// Values of `field` in view order; missing values are `Null`.
    pub fn pluck(&self, field: &str) -> Vec<FieldValue> {
        let path = FieldPath::lenient(field);
        self.rows
            .iter()
            .map(|r| r.resolve(&path).map(|v| v.into_owned()).unwrap_or_default())
            .collect()
    }

    /// Splits the view into consecutive views of at most `size` records.
    ///
    /// A `size` of 0 is treated as 1.
    pub fn chunk(&self, size: usize) -> Vec<Query<'a>> {
        self.rows
            .chunks(size.max(1))
            .map(|rows| Query::from_refs(rows.to_vec(), self.config))
            .collect()
    }

    /// Converts every record with `f`, stopping at the first failure.
    pub fn try_map<T, F>(&self, f: F) -> QueryResult<Vec<T>>
    where
        F: Fn(&CatalogRecord) -> RecordResult<T>,
    {
        let mapped = self
            .rows
            .iter()
            .map(|&r| f(r))
            .collect::<RecordResult<Vec<T>>>()?;
        Ok(mapped)
    }

    /// Clones the view into an owned collection with the same settings.
    pub fn to_collection(&self) -> Collection {
        Collection::with_config(self.rows.iter().map(|&r| r.clone()).collect(), self.config)
    }

    // =========================================================================
    // Pages, groups and aggregates
    // =========================================================================

    /// Returns page `page` (1-based, clamped) of `per_page` records.
    ///
    /// A `per_page` of 0 uses [`QueryConfig::default_per_page`].
    pub fn paginate(self, page: usize, per_page: usize) -> Page<'a> {
        paginate::paginate(self.rows, page, per_page, &self.config)
    }

    /// Partitions the view by `field`.
    pub fn group_by(&self, field: &str) -> Groups<'a> {
        group::group_by(&self.rows, field)
    }

    /// Counts records per `field` value.
    pub fn count_by(&self, field: &str) -> Counts {
        group::count_by(&self.rows, field)
    }

    /// Runs `op` over the numeric values of `field`.
    pub fn aggregate(&self, field: &str, op: AggregateOp) -> Aggregate {
        trace!(field, %op, rows = self.rows.len(), "aggregate");
        aggregate::aggregate(&self.rows, field, op, &self.config)
    }

    /// Sum of `field`; 0 over an empty view.
    pub fn sum(&self, field: &str) -> Aggregate {
        self.aggregate(field, AggregateOp::Sum)
    }

    /// Mean of `field`.
    pub fn avg(&self, field: &str) -> Aggregate {
        self.aggregate(field, AggregateOp::Avg)
    }

    /// Minimum of `field`.
    pub fn min(&self, field: &str) -> Aggregate {
        self.aggregate(field, AggregateOp::Min)
    }

    /// Maximum of `field`.
    pub fn max(&self, field: &str) -> Aggregate {
        self.aggregate(field, AggregateOp::Max)
    }

    /// Runs the tallies and field summaries declared by `spec`.
    pub fn statistics(&self, spec: &StatisticsSpec) -> Statistics {
        statistics::statistics(&self.rows, spec, &self.config)
    }
}

impl<'a> IntoIterator for Query<'a> {
    type Item = &'a CatalogRecord;
    type IntoIter = std::vec::IntoIter<&'a CatalogRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

impl<'a> From<&'a Collection> for Query<'a> {
    fn from(collection: &'a Collection) -> Self {
        collection.query()
    }
}
