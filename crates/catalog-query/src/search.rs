//! Case-insensitive substring search across fields.

use catalog_record::{CatalogRecord, FieldPath, FieldValue};

use crate::config::QueryConfig;
use crate::filter::filter;

pub(crate) fn search<'a>(
    rows: Vec<&'a CatalogRecord>,
    term: &str,
    fields: &[&str],
    config: &QueryConfig,
) -> Vec<&'a CatalogRecord> {
    let needle = term.to_lowercase();
    if needle.is_empty() {
        return rows;
    }
    let paths: Vec<FieldPath> = fields.iter().map(|f| FieldPath::lenient(f)).collect();

    filter(
        rows,
        |record| {
            paths
                .iter()
                .filter_map(|path| record.resolve(path))
                .any(|value| contains(&value, &needle))
        },
        config,
    )
}

/// Strings and numbers (by their display form) are searched; lists and
/// maps are searched element by element.
fn contains(value: &FieldValue, needle: &str) -> bool {
    match value {
        FieldValue::String(s) => s.to_lowercase().contains(needle),
        FieldValue::Int(_) | FieldValue::Float(_) => value.to_string().contains(needle),
        FieldValue::List(items) => items.iter().any(|item| contains(item, needle)),
        FieldValue::Map(map) => map.values().any(|item| contains(item, needle)),
        FieldValue::Null | FieldValue::Bool(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_record::RecordId;

    fn sample() -> Vec<CatalogRecord> {
        vec![
            CatalogRecord::new(1)
                .with_field("name", "Leather Boots")
                .with_field("sku", "LB-100"),
            CatalogRecord::new(2)
                .with_field("name", "Canvas Sneaker")
                .with_field("tags", FieldValue::list(["summer", "BOOTS-alt"])),
            CatalogRecord::new(3)
                .with_field("name", "Wool Socks")
                .with_field("sku", 4100),
        ]
    }

    fn ids(rows: &[&CatalogRecord]) -> Vec<RecordId> {
        rows.iter().map(|r| r.id().clone()).collect()
    }

    fn rid(values: &[i64]) -> Vec<RecordId> {
        values.iter().map(|&v| RecordId::from(v)).collect()
    }

    #[test]
    fn test_case_insensitive() {
        let records = sample();
        let rows = search(records.iter().collect(), "BOOTS", &["name"], &QueryConfig::default());
        assert_eq!(ids(&rows), rid(&[1]));
    }

    #[test]
    fn test_any_field_matches() {
        let records = sample();
        let rows = search(
            records.iter().collect(),
            "boots",
            &["name", "tags"],
            &QueryConfig::default(),
        );
        assert_eq!(ids(&rows), rid(&[1, 2]));
    }

    #[test]
    fn test_numbers_searched_by_display_form() {
        let records = sample();
        let rows = search(records.iter().collect(), "100", &["sku"], &QueryConfig::default());
        assert_eq!(ids(&rows), rid(&[1, 3]));
    }

    #[test]
    fn test_empty_term_matches_everything() {
        let records = sample();
        let rows = search(records.iter().collect(), "", &["name"], &QueryConfig::default());
        assert_eq!(ids(&rows), rid(&[1, 2, 3]));
    }

    #[test]
    fn test_no_fields_matches_nothing() {
        let records = sample();
        let rows = search(records.iter().collect(), "boots", &[], &QueryConfig::default());
        assert!(rows.is_empty());
    }
}
