//! Weighted average price calculation and row aggregation.
//!
//! Pure functions: no clock, no IO, input never mutated. The weighted
//! average is a plain quantity-weighted mean, so it is invariant under
//! reordering of the input buckets.

use std::cmp::Ordering;

use chrono::Utc;

use crate::models::{PriceBucket, PriceRow, PriceSummary};

/// Result of [`weighted_average`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeightedAverage {
    /// Quantity-weighted mean price, rounded to the nearest integer.
    pub weighted_avg: i64,
    /// Sum of all bucket counts.
    pub total_count: u64,
}

/// Compute the quantity-weighted mean price over a sequence of buckets.
///
/// Empty input yields `{0, 0}` rather than an error.
pub fn weighted_average(buckets: &[PriceBucket]) -> WeightedAverage {
    let total_count: u64 = buckets.iter().map(|b| u64::from(b.count)).sum();
    if total_count == 0 {
        return WeightedAverage {
            weighted_avg: 0,
            total_count: 0,
        };
    }
    let weighted_sum: f64 = buckets.iter().map(|b| b.price * f64::from(b.count)).sum();
    WeightedAverage {
        weighted_avg: (weighted_sum / total_count as f64).round() as i64,
        total_count,
    }
}

/// Aggregate fetched listings into a [`PriceSummary`].
///
/// Buckets are sorted ascending by price, `lowest_price` is the cheapest
/// listing, and `collected_at` is the latest timestamp among the rows.
/// Returns `None` for an empty row set; the caller decides whether that
/// means "no data" (it does, for the price service).
pub fn summarize(item_name: &str, rows: &[PriceRow]) -> Option<PriceSummary> {
    if rows.is_empty() {
        return None;
    }

    let mut price_list: Vec<PriceBucket> = rows
        .iter()
        .map(|r| PriceBucket {
            price: r.unit_price,
            count: r.quantity,
        })
        .collect();
    price_list.sort_by(|a, b| a.price.partial_cmp(&b.price).unwrap_or(Ordering::Equal));

    let WeightedAverage {
        weighted_avg,
        total_count,
    } = weighted_average(&price_list);

    let lowest_price = price_list.first().map(|b| b.price).unwrap_or(0.0);
    let collected_at = rows
        .iter()
        .map(|r| r.collected_at)
        .max()
        .unwrap_or_else(Utc::now);

    Some(PriceSummary {
        item_name: item_name.to_string(),
        avg_price: weighted_avg,
        lowest_price,
        total_items: total_count,
        collected_at,
        price_list,
    })
}
