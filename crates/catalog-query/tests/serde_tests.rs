//! Serialization tests for pages and reports.
//!
//! Run with `cargo test -p catalog-query --features serde`.

#![cfg(feature = "serde")]

use catalog_query::{Collection, StatisticsSpec};
use catalog_record::CatalogRecord;
use serde_json::json;

fn products() -> Collection {
    let records: Vec<CatalogRecord> = serde_json::from_value(json!([
        {"id": 1, "name": "Desk", "price": 10},
        {"id": 2, "name": "Shelf", "price": 30},
        {"id": 3, "name": "Lamp"}
    ]))
    .unwrap();
    Collection::new(records)
}

#[test]
fn test_page_serializes_with_metadata() {
    let products = products();
    let page = products.query().paginate(2, 2);
    let value = serde_json::to_value(&page).unwrap();

    assert_eq!(
        value,
        json!({
            "data": [{"id": 3, "name": "Lamp"}],
            "current_page": 2,
            "per_page": 2,
            "total": 3,
            "last_page": 2,
            "from": 3,
            "to": 3,
            "has_more_pages": false
        })
    );
}

#[test]
fn test_empty_page_bounds_are_null() {
    let empty = Collection::default();
    let value = serde_json::to_value(empty.query().paginate(1, 10)).unwrap();
    assert_eq!(value["from"], json!(null));
    assert_eq!(value["to"], json!(null));
}

#[test]
fn test_statistics_serialize_empty_aggregates_as_null() {
    let products = products();
    let spec = StatisticsSpec::builder()
        .tally("priced", |r| r.has_field("price"))
        .numeric_field("price")
        .numeric_field("weight")
        .build()
        .unwrap();
    let value = serde_json::to_value(products.query().statistics(&spec)).unwrap();

    assert_eq!(value["total"], json!(3));
    assert_eq!(
        value["tallies"],
        json!([{"name": "priced", "matched": 2, "unmatched": 1}])
    );
    assert_eq!(value["fields"][0]["avg"], json!(20.0));
    assert_eq!(value["fields"][1]["count"], json!(0));
    assert_eq!(value["fields"][1]["avg"], json!(null));
    assert_eq!(value["fields"][1]["min"], json!(null));
}
