//! The rayon path must give the same results as the sequential one.
//!
//! Run with `cargo test -p catalog-query --features parallel`.

#![cfg(feature = "parallel")]

use catalog_query::{AggregateOp, Collection, QueryConfig};
use catalog_record::CatalogRecord;

fn records(count: usize) -> Vec<CatalogRecord> {
    (0..count)
        .map(|i| {
            CatalogRecord::new(i as i64 + 1)
                .with_field("bucket", (i % 7) as i64)
                .with_field("price", (i % 100) as f64 * 1.5)
        })
        .collect()
}

fn parallel_config() -> QueryConfig {
    QueryConfig::builder()
        .with_parallel(true)
        .with_parallel_threshold(100)
        .build()
}

#[test]
fn test_parallel_filter_preserves_order() {
    let sequential = Collection::new(records(5_000));
    let parallel = Collection::with_config(records(5_000), parallel_config());

    let seq_ids = sequential.query().filter_by_field("bucket", 3).ids().len();
    let par = parallel.query().filter_by_field("bucket", 3);
    assert_eq!(par.len(), seq_ids);

    let par_ids: Vec<i64> = par.ids().iter().filter_map(|id| id.as_int()).collect();
    let mut sorted = par_ids.clone();
    sorted.sort_unstable();
    assert_eq!(par_ids, sorted);
}

#[test]
fn test_parallel_aggregates_match_sequential() {
    let sequential = Collection::new(records(5_000));
    let parallel = Collection::with_config(records(5_000), parallel_config());

    for op in [AggregateOp::Sum, AggregateOp::Avg, AggregateOp::Min, AggregateOp::Max] {
        assert_eq!(
            parallel.query().aggregate("price", op),
            sequential.query().aggregate("price", op),
            "{op} differs"
        );
    }
}

#[test]
fn test_below_threshold_runs_sequentially() {
    let parallel = Collection::with_config(records(50), parallel_config());
    assert_eq!(parallel.query().filter_by_field("bucket", 0).len(), 8);
}
