//! Unit tests for the weighted average calculator and row aggregation.

mod common;

use mabi_market::{summarize, weighted_average, PriceBucket};

use common::{row, sample_rows};

fn bucket(price: f64, count: u32) -> PriceBucket {
    PriceBucket { price, count }
}

// ---------------------------------------------------------------------------
// weighted_average
// ---------------------------------------------------------------------------

#[test]
fn empty_input_yields_zero_not_error() {
    let result = weighted_average(&[]);
    assert_eq!(result.weighted_avg, 0);
    assert_eq!(result.total_count, 0);
}

#[test]
fn single_bucket_average_is_its_price() {
    let result = weighted_average(&[bucket(1234.0, 7)]);
    assert_eq!(result.weighted_avg, 1234);
    assert_eq!(result.total_count, 7);
}

#[test]
fn average_is_weighted_by_quantity() {
    // (20000*3 + 25000*5 + 30000*2) / 10 = 25000
    let buckets = [bucket(20_000.0, 3), bucket(25_000.0, 5), bucket(30_000.0, 2)];
    let result = weighted_average(&buckets);
    assert_eq!(result.weighted_avg, 25_000);
    assert_eq!(result.total_count, 10);
}

#[test]
fn average_rounds_to_nearest_integer() {
    // (100*1 + 101*2) / 3 = 100.666... -> 101
    let result = weighted_average(&[bucket(100.0, 1), bucket(101.0, 2)]);
    assert_eq!(result.weighted_avg, 101);
}

#[test]
fn average_is_invariant_under_reordering() {
    let forward = [bucket(20_000.0, 3), bucket(25_000.0, 5), bucket(30_000.0, 2)];
    let shuffled = [bucket(30_000.0, 2), bucket(20_000.0, 3), bucket(25_000.0, 5)];
    assert_eq!(weighted_average(&forward), weighted_average(&shuffled));
}

#[test]
fn input_is_not_mutated() {
    let buckets = vec![bucket(25_000.0, 5), bucket(20_000.0, 3)];
    let before = buckets.clone();
    let _ = weighted_average(&buckets);
    assert_eq!(buckets, before);
}

// ---------------------------------------------------------------------------
// summarize
// ---------------------------------------------------------------------------

#[test]
fn summarize_empty_rows_is_none() {
    assert!(summarize("Silk", &[]).is_none());
}

#[test]
fn summarize_computes_all_summary_fields() {
    let rows = sample_rows();
    let summary = summarize("Mutant Rabbit's Foot", &rows).expect("non-empty rows");

    assert_eq!(summary.item_name, "Mutant Rabbit's Foot");
    assert_eq!(summary.avg_price, 25_000);
    assert_eq!(summary.lowest_price, 20_000.0);
    assert_eq!(summary.total_items, 10);
    assert_eq!(summary.price_list.len(), 3);
}

#[test]
fn summarize_sorts_buckets_ascending_by_price() {
    let rows = vec![row(30_000.0, 2, 0), row(20_000.0, 3, 1), row(25_000.0, 5, 2)];
    let summary = summarize("item", &rows).expect("non-empty rows");

    let prices: Vec<f64> = summary.price_list.iter().map(|b| b.price).collect();
    assert_eq!(prices, vec![20_000.0, 25_000.0, 30_000.0]);
    assert_eq!(summary.lowest_price, 20_000.0);
}

#[test]
fn summarize_takes_latest_collection_timestamp() {
    let rows = vec![row(100.0, 1, 0), row(200.0, 1, 30), row(300.0, 1, 15)];
    let summary = summarize("item", &rows).expect("non-empty rows");
    assert_eq!(summary.collected_at, row(0.0, 1, 30).collected_at);
}

#[test]
fn summarize_serializes_with_camel_case_wire_names() {
    let summary = summarize("Silk", &sample_rows()).expect("non-empty rows");
    let json = serde_json::to_value(&summary).expect("serializable");

    assert_eq!(json["itemName"], "Silk");
    assert_eq!(json["avgPrice"], 25_000);
    assert_eq!(json["lowestPrice"], 20_000.0);
    assert_eq!(json["totalItems"], 10);
    assert_eq!(json["priceList"][0]["price"], 20_000.0);
    assert_eq!(json["priceList"][0]["count"], 3);
}
