//! Integration tests for the collection engine.
//!
//! These tests run whole query pipelines over a small product catalog.

use catalog_query::{
    Aggregate, AggregateOp, Collection, Comparison, Direction, GroupKey, Query, QueryConfig,
    SortKey, StatisticsSpec,
};
use catalog_record::{CatalogRecord, FieldValue, RecordId};

/// Mock catalog: ten products over three brands, some without a price.
fn catalog() -> Collection {
    let rows: [(i64, &str, &str, Option<f64>, &str); 10] = [
        (1, "Oak Desk", "acme", Some(250.0), "active"),
        (2, "Pine Shelf", "globex", Some(80.0), "active"),
        (3, "Oak Chair", "acme", Some(120.0), "draft"),
        (4, "Steel Lamp", "initech", None, "active"),
        (5, "Birch Stool", "globex", Some(45.5), "active"),
        (6, "Oak Bench", "acme", Some(120.0), "active"),
        (7, "Glass Vase", "initech", Some(30.0), "archived"),
        (8, "Walnut Table", "acme", Some(610.0), "active"),
        (9, "Pine Desk", "globex", Some(199.0), "draft"),
        (10, "Cotton Rug", "initech", None, "active"),
    ];
    rows.iter()
        .map(|&(id, name, brand, price, status)| {
            CatalogRecord::new(id)
                .with_field("name", name)
                .with_field("brand", brand)
                .with_field("price", price)
                .with_field("status", status)
                .with_field(
                    "attributes",
                    FieldValue::map([("material", FieldValue::from(name.split(' ').next().unwrap_or("")))]),
                )
        })
        .collect()
}

fn ids(query: &Query<'_>) -> Vec<i64> {
    query.ids().iter().filter_map(|id| id.as_int()).collect()
}

// =========================================================================
// Stability
// =========================================================================

#[test]
fn test_stable_sort_keeps_ties_in_input_order() {
    let products = Collection::new(vec![
        CatalogRecord::new(1).with_field("price", 10),
        CatalogRecord::new(2).with_field("price", 10),
        CatalogRecord::new(3).with_field("price", 5),
    ]);
    let sorted = products.query().sort_by("price", Direction::Ascending);
    assert_eq!(ids(&sorted), vec![3, 1, 2]);
}

#[test]
fn test_filter_keeps_input_order() {
    let products = Collection::new(vec![
        CatalogRecord::new(1).with_field("v", 1),
        CatalogRecord::new(2).with_field("v", 2),
        CatalogRecord::new(3).with_field("v", 1),
    ]);
    let matched = products.query().filter_by_field("v", 1);
    assert_eq!(ids(&matched), vec![1, 3]);
}

#[test]
fn test_sort_descending_missing_prices_last() {
    let products = catalog();
    let sorted = products.query().sort_by("price", Direction::Descending);
    assert_eq!(ids(&sorted), vec![8, 1, 9, 3, 6, 2, 5, 7, 4, 10]);
}

#[test]
fn test_multi_key_sort() {
    let products = catalog();
    let keys = [SortKey::asc("brand"), SortKey::asc("price")];
    let sorted = products.query().sort_by_keys(&keys);
    assert_eq!(ids(&sorted), vec![3, 6, 1, 8, 5, 2, 9, 4, 10, 7]);
}

// =========================================================================
// Pagination
// =========================================================================

#[test]
fn test_pagination_over_seven_records() {
    let products: Collection = (1..=7).map(CatalogRecord::new).collect();

    let first = products.query().paginate(1, 3);
    assert_eq!(first.data.len(), 3);
    assert_eq!((first.from, first.to), (Some(1), Some(3)));
    assert_eq!(first.last_page, 3);
    assert!(first.has_more_pages);

    let last = products.query().paginate(3, 3);
    assert_eq!(last.data.len(), 1);
    assert_eq!((last.from, last.to), (Some(7), Some(7)));
    assert!(!last.has_more_pages);

    let clamped = products.query().paginate(99, 3);
    assert_eq!(clamped.current_page, 3);
    assert_eq!(clamped.data, last.data);
}

#[test]
fn test_paginate_after_filter() {
    let products = catalog();
    let page = products
        .query()
        .filter_by_field("status", "active")
        .sort_by("name", Direction::Ascending)
        .paginate(2, 3);
    assert_eq!(page.total, 7);
    assert_eq!(page.last_page, 3);
    let names: Vec<&str> = page
        .data
        .iter()
        .filter_map(|r| r.get("name").and_then(FieldValue::as_str))
        .collect();
    assert_eq!(names, vec!["Oak Bench", "Oak Desk", "Pine Shelf"]);
}

#[test]
fn test_configured_default_page_size() {
    let config = QueryConfig::builder()
        .with_default_per_page(4)
        .with_max_per_page(5)
        .build();
    let products = Collection::with_config(catalog().into_records(), config);
    assert_eq!(products.query().paginate(1, 0).per_page, 4);
    assert_eq!(products.query().paginate(1, 50).per_page, 5);
}

// =========================================================================
// Filters and search
// =========================================================================

#[test]
fn test_between_excludes_missing_prices() {
    let products = catalog();
    let cheap = products.query().filter_by_field_between("price", 0.0, 100.0);
    assert_eq!(ids(&cheap), vec![2, 5, 7]);

    let empty = products.query().filter_by_field_between("price", 100.0, 0.0);
    assert!(empty.is_empty());
}

#[test]
fn test_filter_nested_field() {
    let products = catalog();
    let oak = products.query().filter_by_field("attributes.material", "Oak");
    assert_eq!(ids(&oak), vec![1, 3, 6]);
}

#[test]
fn test_filter_where_chain() {
    let products = catalog();
    let view = products
        .query()
        .filter_where("price", Comparison::Gt, 100)
        .filter_where("status", Comparison::Ne, "draft");
    assert_eq!(ids(&view), vec![1, 6, 8]);
}

#[test]
fn test_search_case_insensitive_across_fields() {
    let products = catalog();
    let hits = products.query().search("PINE", &["name", "brand"]);
    assert_eq!(ids(&hits), vec![2, 9]);

    let hits = products.query().search("globex", &["name", "brand"]);
    assert_eq!(ids(&hits), vec![2, 5, 9]);

    assert_eq!(products.query().search("", &["name"]).len(), 10);
}

// =========================================================================
// Grouping and aggregates
// =========================================================================

#[test]
fn test_avg_and_empty_aggregate() {
    let products = Collection::new(vec![
        CatalogRecord::new(1).with_field("price", 10),
        CatalogRecord::new(2).with_field("price", 20),
        CatalogRecord::new(3).with_field("price", 30),
    ]);
    assert_eq!(products.query().avg("price"), Aggregate::Value(20.0));

    let empty = Collection::default();
    assert_eq!(empty.query().avg("price"), Aggregate::Empty);
    assert_eq!(empty.query().sum("price"), Aggregate::Value(0.0));
}

#[test]
fn test_aggregate_per_group() {
    let products = catalog();
    let groups = products.query().group_by("brand");
    let keys: Vec<String> = groups.keys().map(ToString::to_string).collect();
    assert_eq!(keys, vec!["acme", "globex", "initech"]);

    let acme = Query::from_refs(
        groups.get(&GroupKey::from("acme")).unwrap_or_default().to_vec(),
        QueryConfig::default(),
    );
    assert_eq!(acme.aggregate("price", AggregateOp::Max), Aggregate::Value(610.0));
    assert_eq!(acme.len(), 4);
}

#[test]
fn test_count_by_status() {
    let products = catalog();
    let counts = products.query().count_by("status");
    assert_eq!(counts.get_value("active"), 7);
    assert_eq!(counts.get_value("draft"), 2);
    assert_eq!(counts.get_value("archived"), 1);
    assert_eq!(counts.total(), 10);
}

#[test]
fn test_statistics_report() {
    let products = catalog();
    let spec = StatisticsSpec::builder()
        .tally_field_equals("active", "status", "active")
        .tally("premium", |r| r.number_field("price").is_ok_and(|p| p >= 200.0))
        .numeric_field("price")
        .build()
        .unwrap();

    let stats = products.query().statistics(&spec);
    assert_eq!(stats.total, 10);
    assert_eq!(stats.tally("active").map(|t| t.matched), Some(7));
    assert_eq!(stats.tally("premium").map(|t| (t.matched, t.unmatched)), Some((2, 8)));

    let price = stats.field("price").unwrap();
    assert_eq!(price.count, 8);
    assert_eq!(price.min, Aggregate::Value(30.0));
    assert_eq!(price.max, Aggregate::Value(610.0));
}

#[test]
fn test_statistics_tally_agrees_with_filter_under_numeric_strings() {
    let config = QueryConfig::builder().with_numeric_strings(true).build();
    let products = Collection::with_config(
        vec![
            CatalogRecord::new(1).with_field("aisle", "7"),
            CatalogRecord::new(2).with_field("aisle", 7),
            CatalogRecord::new(3).with_field("aisle", 8),
        ],
        config,
    );
    let spec = StatisticsSpec::builder()
        .tally_field_equals("aisle_7", "aisle", 7)
        .build()
        .unwrap();

    let filtered = products.query().filter_by_field("aisle", 7).len();
    let stats = products.query().statistics(&spec);
    assert_eq!(filtered, 2);
    assert_eq!(stats.tally("aisle_7").map(|t| t.matched), Some(filtered));
}

#[test]
fn test_dotted_top_level_field() {
    let products = Collection::new(vec![
        CatalogRecord::new(1).with_field("unit.price", 4.5),
        CatalogRecord::new(2).with_field("unit.price", 2.0),
        CatalogRecord::new(3).with_field("unit", FieldValue::map([("price", FieldValue::from(9.0))])),
    ]);

    let cheap = products.query().filter_by_field("unit.price", 2.0);
    assert_eq!(ids(&cheap), vec![2]);

    let sorted = products.query().sort_by("unit.price", Direction::Ascending);
    assert_eq!(ids(&sorted), vec![2, 1, 3]);
    assert_eq!(products.query().sum("unit.price"), Aggregate::Value(15.5));
}

// =========================================================================
// View helpers
// =========================================================================

#[test]
fn test_view_helpers() {
    let products = catalog();
    let view = products.query().filter_by_field("brand", "globex");

    assert_eq!(view.first().map(|r| r.id().clone()), Some(RecordId::from(2)));
    assert_eq!(view.last().map(|r| r.id().clone()), Some(RecordId::from(9)));
    assert!(view.find_by_id(5).is_some());
    assert!(view.find_by_id(1).is_none());
    assert_eq!(
        view.pluck("price"),
        vec![FieldValue::from(80.0), FieldValue::from(45.5), FieldValue::from(199.0)]
    );

    let owned = view.to_collection();
    assert_eq!(owned.len(), 3);
    assert_eq!(ids(&owned.query().skip(1).take(1)), vec![5]);
}

#[test]
fn test_queries_do_not_mutate_records() {
    let products = catalog();
    let before = products.clone();
    let _ = products
        .query()
        .sort_by("price", Direction::Descending)
        .filter_by_field("brand", "acme")
        .paginate(1, 2);
    assert_eq!(products, before);
}
