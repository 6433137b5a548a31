//! Serialization tests for catalog records.
//!
//! Run with `cargo test -p catalog-record --features serde`.

#![cfg(feature = "serde")]

use catalog_record::{CatalogRecord, FieldPath, FieldValue, RecordId};

#[test]
fn test_deserialize_vendor_category() {
    let json = r#"{"id": 12, "parent_id": "3", "name": "Phones", "sort": 2}"#;
    let record: CatalogRecord = serde_json::from_str(json).unwrap();

    assert_eq!(record.id(), &RecordId::from(12));
    assert_eq!(record.parent_id(), Some(&RecordId::from(3)));
    assert_eq!(record.str_field("name").unwrap(), "Phones");
    assert_eq!(record.int_field("sort").unwrap(), 2);
    assert!(!record.has_field("parent_id"));
}

#[test]
fn test_deserialize_parent_aliases() {
    let camel: CatalogRecord = serde_json::from_str(r#"{"id": 2, "parentId": 1}"#).unwrap();
    assert_eq!(camel.parent_id(), Some(&RecordId::from(1)));

    let short: CatalogRecord = serde_json::from_str(r#"{"id": 2, "pid": 0}"#).unwrap();
    assert!(short.is_declared_root());
}

#[test]
fn test_deserialize_without_parent() {
    let record: CatalogRecord =
        serde_json::from_str(r#"{"id": "sku-1", "price": 19.9, "on_sale": false}"#).unwrap();

    assert_eq!(record.id(), &RecordId::from("sku-1"));
    assert!(record.parent_id().is_none());
    assert_eq!(record.get("price"), Some(&FieldValue::Float(19.9)));
    assert_eq!(record.get("on_sale"), Some(&FieldValue::Bool(false)));
}

#[test]
fn test_deserialize_nested_fields() {
    let json = r#"{
        "id": 5,
        "attributes": {"color": "red", "sizes": [38, 39]},
        "images": [{"url": "a.png"}, {"url": "b.png"}],
        "note": null
    }"#;
    let record: CatalogRecord = serde_json::from_str(json).unwrap();

    assert_eq!(record.lookup("attributes.color").unwrap().as_str(), Some("red"));
    assert_eq!(record.lookup("images[1].url").unwrap().as_str(), Some("b.png"));
    assert_eq!(record.get("note"), Some(&FieldValue::Null));
}

#[test]
fn test_serialize_omits_missing_parent() {
    let record = CatalogRecord::new(1).with_field("name", "Root");
    let json = serde_json::to_value(&record).unwrap();

    assert_eq!(json, serde_json::json!({"id": 1, "name": "Root"}));
}

#[test]
fn test_serialize_string_id_and_parent() {
    let record = CatalogRecord::new("shoes").with_parent("apparel");
    let json = serde_json::to_value(&record).unwrap();

    assert_eq!(json, serde_json::json!({"id": "shoes", "parent_id": "apparel"}));
}

#[test]
fn test_field_path_as_string() {
    let path: FieldPath = serde_json::from_str(r#""images[0].url""#).unwrap();
    assert_eq!(path.to_string(), "images[0].url");
    assert_eq!(serde_json::to_string(&path).unwrap(), r#""images[0].url""#);

    assert!(serde_json::from_str::<FieldPath>(r#""[0]""#).is_err());
}
