//! # catalog-query
//!
//! In-memory filtering, sorting, searching, pagination, grouping and
//! aggregation over ordered catalog record collections.
//!
//! Every operation is pure and stable: filters keep surviving records in
//! input order, sorts keep equal records in input order, and the underlying
//! records are never modified.
//!
//! ## Quick Start
//!
//! ```rust
//! use catalog_query::{Aggregate, Collection, Direction};
//! use catalog_record::CatalogRecord;
//!
//! let products = Collection::new(vec![
//!     CatalogRecord::new(1).with_field("brand", "acme").with_field("price", 10),
//!     CatalogRecord::new(2).with_field("brand", "globex").with_field("price", 20),
//!     CatalogRecord::new(3).with_field("brand", "acme").with_field("price", 30),
//! ]);
//!
//! let acme = products.query().filter_by_field("brand", "acme");
//! assert_eq!(acme.avg("price"), Aggregate::Value(20.0));
//!
//! let page = products
//!     .query()
//!     .sort_by("price", Direction::Descending)
//!     .paginate(1, 2);
//! assert_eq!(page.data.len(), 2);
//! assert!(page.has_more_pages);
//! ```
//!
//! ## Operations
//!
//! | Operation | Result |
//! |-----------|--------|
//! | `filter`, `filter_by_field`, `filter_by_field_in` | stable subset |
//! | `filter_by_field_between(lo, hi)` | inclusive numeric range; `lo > hi` is empty |
//! | `filter_where(field, Comparison, value)` | `Eq` `Ne` `Gt` `Ge` `Lt` `Le` |
//! | `search(term, fields)` | case-insensitive substring on any field |
//! | `sort_by`, `sort_by_keys` | stable; missing values sort as zero/empty |
//! | `paginate(page, per_page)` | [`Page`] with clamped page number |
//! | `group_by`, `count_by`, `unique_by` | first-appearance order |
//! | `sum`, `avg`, `min`, `max` | [`Aggregate`]; `Empty` when nothing contributed |
//! | `statistics(&spec)` | named tallies and numeric field summaries |
//!
//! ## Feature Flags
//!
//! - `parallel` - Runs filters and aggregate extraction on the rayon pool
//!   for large views (see [`QueryConfig::parallel_threshold`])
//! - `serde` - Serialize pages, aggregates and statistics

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod aggregate;
mod collection;
mod config;
mod error;
mod filter;
mod group;
mod paginate;
mod query;
mod search;
mod sort;
mod statistics;
mod value;

pub use aggregate::{Aggregate, AggregateOp};
pub use collection::Collection;
pub use config::{QueryConfig, QueryConfigBuilder};
pub use error::{QueryError, QueryResult};
pub use filter::Comparison;
pub use group::{Counts, FloatKey, GroupKey, Groups};
pub use paginate::Page;
pub use query::Query;
pub use sort::{Direction, SortKey};
pub use statistics::{FieldSummary, Statistics, StatisticsSpec, StatisticsSpecBuilder, Tally};

// Re-export the record types for convenience
pub use catalog_record::{CatalogRecord, FieldValue, RecordId};

/// Keeps records satisfying `predicate`. See [`Query::filter`].
pub fn filter<P>(records: &[CatalogRecord], predicate: P) -> Vec<&CatalogRecord>
where
    P: Fn(&CatalogRecord) -> bool + Sync,
{
    Query::new(records).filter(predicate).into_vec()
}

/// Keeps records whose `field` equals `value`. See [`Query::filter_by_field`].
pub fn filter_by_field<'a>(
    records: &'a [CatalogRecord],
    field: &str,
    value: impl Into<FieldValue>,
) -> Vec<&'a CatalogRecord> {
    Query::new(records).filter_by_field(field, value).into_vec()
}

/// Keeps records whose `field` equals any of `values`.
pub fn filter_by_field_in<'a, V, I>(
    records: &'a [CatalogRecord],
    field: &str,
    values: I,
) -> Vec<&'a CatalogRecord>
where
    V: Into<FieldValue>,
    I: IntoIterator<Item = V>,
{
    Query::new(records).filter_by_field_in(field, values).into_vec()
}

/// Keeps records whose numeric `field` lies in `[low, high]`.
pub fn filter_by_field_between<'a>(
    records: &'a [CatalogRecord],
    field: &str,
    low: f64,
    high: f64,
) -> Vec<&'a CatalogRecord> {
    Query::new(records)
        .filter_by_field_between(field, low, high)
        .into_vec()
}

/// Stable sort on one field. See [`Query::sort_by`].
pub fn sort_by<'a>(
    records: &'a [CatalogRecord],
    field: &str,
    direction: Direction,
) -> Vec<&'a CatalogRecord> {
    Query::new(records).sort_by(field, direction).into_vec()
}

/// Case-insensitive search over `fields`. See [`Query::search`].
pub fn search<'a>(records: &'a [CatalogRecord], term: &str, fields: &[&str]) -> Vec<&'a CatalogRecord> {
    Query::new(records).search(term, fields).into_vec()
}

/// One page of `records`. See [`Query::paginate`].
pub fn paginate(records: &[CatalogRecord], page: usize, per_page: usize) -> Page<'_> {
    Query::new(records).paginate(page, per_page)
}

/// Partitions `records` by `field`. See [`Query::group_by`].
pub fn group_by<'a>(records: &'a [CatalogRecord], field: &str) -> Groups<'a> {
    Query::new(records).group_by(field)
}

/// Counts `records` per `field` value. See [`Query::count_by`].
pub fn count_by(records: &[CatalogRecord], field: &str) -> Counts {
    Query::new(records).count_by(field)
}

/// Runs `op` over the numeric values of `field`. See [`Query::aggregate`].
pub fn aggregate(records: &[CatalogRecord], field: &str, op: AggregateOp) -> Aggregate {
    Query::new(records).aggregate(field, op)
}

/// Runs a statistics report over `records`. See [`Query::statistics`].
pub fn statistics(records: &[CatalogRecord], spec: &StatisticsSpec) -> Statistics {
    Query::new(records).statistics(spec)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_api_accessible() {
        let _: Option<Collection> = None;
        let _: Option<QueryConfig> = None;
        let _: Option<Page<'_>> = None;
        let _: Option<Statistics> = None;
        let _: Option<QueryResult<()>> = None;
    }

    #[test]
    fn test_free_functions_delegate() {
        let records = vec![
            CatalogRecord::new(1).with_field("v", 1),
            CatalogRecord::new(2).with_field("v", 2),
            CatalogRecord::new(3).with_field("v", 1),
        ];

        assert_eq!(filter_by_field(&records, "v", 1).len(), 2);
        assert_eq!(filter(&records, |r| r.id() == &RecordId::from(2)).len(), 1);
        assert_eq!(filter_by_field_in(&records, "v", [2]).len(), 1);
        assert_eq!(filter_by_field_between(&records, "v", 1.5, 3.0).len(), 1);
        assert_eq!(sort_by(&records, "v", Direction::Descending)[0].id(), &RecordId::from(2));
        assert_eq!(search(&records, "2", &["v"]).len(), 1);
        assert_eq!(paginate(&records, 2, 2).data.len(), 1);
        assert_eq!(group_by(&records, "v").len(), 2);
        assert_eq!(count_by(&records, "v").get_value(1), 2);
        assert_eq!(aggregate(&records, "v", AggregateOp::Sum), Aggregate::Value(4.0));

        let spec = StatisticsSpec::builder().numeric_field("v").build().unwrap();
        assert_eq!(statistics(&records, &spec).field("v").map(|f| f.count), Some(3));
    }
}
