//! Stable filtering over record views.
//!
//! Every filter keeps surviving records in their input order.

use catalog_record::{CatalogRecord, FieldPath, FieldValue};
use tracing::trace;

use crate::config::QueryConfig;
use crate::value::{compare_values, numeric, values_equal};

/// Comparison operator for [`Query::filter_where`](crate::Query::filter_where).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    /// Equal.
    Eq,
    /// Not equal.
    Ne,
    /// Greater than.
    Gt,
    /// Greater than or equal.
    Ge,
    /// Less than.
    Lt,
    /// Less than or equal.
    Le,
}

pub(crate) fn filter<'a, P>(
    rows: Vec<&'a CatalogRecord>,
    predicate: P,
    config: &QueryConfig,
) -> Vec<&'a CatalogRecord>
where
    P: Fn(&CatalogRecord) -> bool + Sync,
{
    #[cfg(feature = "parallel")]
    if config.use_parallel(rows.len()) {
        use rayon::prelude::*;
        trace!(rows = rows.len(), "filtering on rayon pool");
        // Indexed parallel iterators collect in input order.
        return rows.into_par_iter().filter(|r| predicate(r)).collect();
    }

    #[cfg(not(feature = "parallel"))]
    let _ = config;

    rows.into_iter().filter(|r| predicate(r)).collect()
}

pub(crate) fn filter_by_field<'a>(
    rows: Vec<&'a CatalogRecord>,
    field: &str,
    value: &FieldValue,
    config: &QueryConfig,
) -> Vec<&'a CatalogRecord> {
    let path = FieldPath::lenient(field);
    filter(
        rows,
        |record| match record.resolve(&path) {
            Some(actual) => values_equal(&actual, value, config),
            None => value.is_null(),
        },
        config,
    )
}

pub(crate) fn filter_by_field_in<'a>(
    rows: Vec<&'a CatalogRecord>,
    field: &str,
    values: &[FieldValue],
    config: &QueryConfig,
) -> Vec<&'a CatalogRecord> {
    let path = FieldPath::lenient(field);
    filter(
        rows,
        |record| match record.resolve(&path) {
            Some(actual) => values.iter().any(|v| values_equal(&actual, v, config)),
            None => values.iter().any(FieldValue::is_null),
        },
        config,
    )
}

pub(crate) fn filter_by_field_between<'a>(
    rows: Vec<&'a CatalogRecord>,
    field: &str,
    low: f64,
    high: f64,
    config: &QueryConfig,
) -> Vec<&'a CatalogRecord> {
    if low > high {
        trace!(field, low, high, "empty range, no rows match");
        return Vec::new();
    }
    let path = FieldPath::lenient(field);
    filter(
        rows,
        |record| {
            record
                .resolve(&path)
                .and_then(|v| numeric(&v, config))
                .is_some_and(|n| n >= low && n <= high)
        },
        config,
    )
}

pub(crate) fn filter_where<'a>(
    rows: Vec<&'a CatalogRecord>,
    field: &str,
    op: Comparison,
    value: &FieldValue,
    config: &QueryConfig,
) -> Vec<&'a CatalogRecord> {
    let path = FieldPath::lenient(field);
    filter(
        rows,
        |record| {
            let actual = record
                .resolve(&path)
                .map(|v| v.into_owned())
                .unwrap_or_default();
            matches_comparison(&actual, op, value, config)
        },
        config,
    )
}

/// Ordering comparisons only hold between two numbers or two strings;
/// anything else never matches `Gt`/`Ge`/`Lt`/`Le`.
fn matches_comparison(
    actual: &FieldValue,
    op: Comparison,
    expected: &FieldValue,
    config: &QueryConfig,
) -> bool {
    match op {
        Comparison::Eq => values_equal(actual, expected, config),
        Comparison::Ne => !values_equal(actual, expected, config),
        _ => {
            let ordering = match (numeric(actual, config), numeric(expected, config)) {
                (Some(a), Some(b)) => a.partial_cmp(&b),
                _ => match (actual, expected) {
                    (FieldValue::String(_), FieldValue::String(_)) => {
                        Some(compare_values(actual, expected))
                    }
                    _ => None,
                },
            };
            let Some(ordering) = ordering else {
                return false;
            };
            match op {
                Comparison::Gt => ordering.is_gt(),
                Comparison::Ge => ordering.is_ge(),
                Comparison::Lt => ordering.is_lt(),
                Comparison::Le => ordering.is_le(),
                Comparison::Eq | Comparison::Ne => false,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_record::RecordId;

    fn product(id: i64, price: f64, status: &str) -> CatalogRecord {
        CatalogRecord::new(id)
            .with_field("price", price)
            .with_field("status", status)
    }

    fn sample() -> Vec<CatalogRecord> {
        vec![
            product(1, 10.0, "active"),
            product(2, 25.0, "draft"),
            product(3, 5.0, "active"),
            CatalogRecord::new(4).with_field("status", "active"),
        ]
    }

    fn ids(rows: &[&CatalogRecord]) -> Vec<RecordId> {
        rows.iter().map(|r| r.id().clone()).collect()
    }

    fn rid(values: &[i64]) -> Vec<RecordId> {
        values.iter().map(|&v| RecordId::from(v)).collect()
    }

    #[test]
    fn test_filter_preserves_order() {
        let records = sample();
        let config = QueryConfig::default();
        let rows = filter(records.iter().collect(), |r| r.id() != &RecordId::from(2), &config);
        assert_eq!(ids(&rows), rid(&[1, 3, 4]));
    }

    #[test]
    fn test_filter_by_field() {
        let records = sample();
        let config = QueryConfig::default();
        let rows = filter_by_field(records.iter().collect(), "status", &"active".into(), &config);
        assert_eq!(ids(&rows), rid(&[1, 3, 4]));
    }

    #[test]
    fn test_filter_by_field_null_matches_missing() {
        let records = sample();
        let config = QueryConfig::default();
        let rows = filter_by_field(records.iter().collect(), "price", &FieldValue::Null, &config);
        assert_eq!(ids(&rows), rid(&[4]));
    }

    #[test]
    fn test_filter_by_field_in() {
        let records = sample();
        let config = QueryConfig::default();
        let values = [FieldValue::from(5), FieldValue::from(25)];
        let rows = filter_by_field_in(records.iter().collect(), "price", &values, &config);
        assert_eq!(ids(&rows), rid(&[2, 3]));
    }

    #[test]
    fn test_between_inclusive() {
        let records = sample();
        let config = QueryConfig::default();
        let rows = filter_by_field_between(records.iter().collect(), "price", 5.0, 10.0, &config);
        assert_eq!(ids(&rows), rid(&[1, 3]));
    }

    #[test]
    fn test_between_inverted_range_is_empty() {
        let records = sample();
        let config = QueryConfig::default();
        let rows = filter_by_field_between(records.iter().collect(), "price", 30.0, 1.0, &config);
        assert!(rows.is_empty());
    }

    #[test]
    fn test_between_with_numeric_strings() {
        let records = vec![
            CatalogRecord::new(1).with_field("price", "12.50"),
            CatalogRecord::new(2).with_field("price", "n/a"),
        ];
        let strict = QueryConfig::default();
        assert!(filter_by_field_between(records.iter().collect(), "price", 0.0, 20.0, &strict)
            .is_empty());

        let lenient = QueryConfig::builder().with_numeric_strings(true).build();
        let rows = filter_by_field_between(records.iter().collect(), "price", 0.0, 20.0, &lenient);
        assert_eq!(ids(&rows), rid(&[1]));
    }

    #[test]
    fn test_filter_where() {
        let records = sample();
        let config = QueryConfig::default();
        let gt = filter_where(records.iter().collect(), "price", Comparison::Gt, &8.into(), &config);
        assert_eq!(ids(&gt), rid(&[1, 2]));

        let le = filter_where(records.iter().collect(), "price", Comparison::Le, &10.into(), &config);
        assert_eq!(ids(&le), rid(&[1, 3]));

        let ne = filter_where(
            records.iter().collect(),
            "status",
            Comparison::Ne,
            &"active".into(),
            &config,
        );
        assert_eq!(ids(&ne), rid(&[2]));
    }

    #[test]
    fn test_filter_where_strings() {
        let records = vec![
            CatalogRecord::new(1).with_field("sku", "A-100"),
            CatalogRecord::new(2).with_field("sku", "B-200"),
            CatalogRecord::new(3).with_field("sku", 300),
        ];
        let config = QueryConfig::default();
        let rows = filter_where(records.iter().collect(), "sku", Comparison::Ge, &"B".into(), &config);
        assert_eq!(ids(&rows), rid(&[2]));
    }

    #[test]
    fn test_filter_nested_path() {
        let records = vec![
            CatalogRecord::new(1).with_field("attrs", FieldValue::map([("color", "red".into())])),
            CatalogRecord::new(2).with_field("attrs", FieldValue::map([("color", "blue".into())])),
        ];
        let config = QueryConfig::default();
        let rows = filter_by_field(records.iter().collect(), "attrs.color", &"blue".into(), &config);
        assert_eq!(ids(&rows), rid(&[2]));
    }
}
