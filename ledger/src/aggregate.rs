//! Pure aggregation routines over sales records.
//!
//! All of these are single-threaded folds with no shared mutable state;
//! `BTreeMap` keys keep every grouped result in a deterministic order.

use std::collections::BTreeMap;

use crate::record::SaleRecord;

/// Sum of the `sales` column.
#[must_use]
pub fn total_sales(records: &[SaleRecord]) -> f64 {
    records.iter().map(|r| r.sales).sum()
}

/// Sum of the `profit` column.
#[must_use]
pub fn total_profit(records: &[SaleRecord]) -> f64 {
    records.iter().map(|r| r.profit).sum()
}

/// Sales summed per category.
#[must_use]
pub fn sales_by_category(records: &[SaleRecord]) -> BTreeMap<String, f64> {
    sum_by(records, |r| r.category.clone(), |r| r.sales)
}

/// Profit summed per region.
#[must_use]
pub fn profit_by_region(records: &[SaleRecord]) -> BTreeMap<String, f64> {
    sum_by(records, |r| r.region.clone(), |r| r.profit)
}

/// Sales summed per `YYYY-MM` month bucket.
#[must_use]
pub fn monthly_sales(records: &[SaleRecord]) -> BTreeMap<String, f64> {
    sum_by(records, |r| r.order_date.month_key(), |r| r.sales)
}

/// The `top_n` subcategories by total sales, descending; ties break
/// ascending by name.
#[must_use]
pub fn top_subcategories_by_sales(records: &[SaleRecord], top_n: usize) -> Vec<(String, f64)> {
    let totals = sum_by(records, |r| r.subcategory.clone(), |r| r.sales);
    let mut ranked: Vec<(String, f64)> = totals.into_iter().collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(top_n);
    ranked
}

/// Profit margin (profit / sales) per category; 0 when a category's sales
/// sum to 0.
#[must_use]
pub fn category_profit_margin(records: &[SaleRecord]) -> BTreeMap<String, f64> {
    let mut totals: BTreeMap<String, (f64, f64)> = BTreeMap::new();
    for r in records {
        let entry = totals.entry(r.category.clone()).or_insert((0.0, 0.0));
        entry.0 += r.profit;
        entry.1 += r.sales;
    }
    totals
        .into_iter()
        .map(|(category, (profit_sum, sales_sum))| {
            let margin = if sales_sum == 0.0 {
                0.0
            } else {
                profit_sum / sales_sum
            };
            (category, margin)
        })
        .collect()
}

/// Sales summed per (region, category) pair.
#[must_use]
pub fn region_category_sales(records: &[SaleRecord]) -> BTreeMap<(String, String), f64> {
    sum_by(
        records,
        |r| (r.region.clone(), r.category.clone()),
        |r| r.sales,
    )
}

/// The `top_n` orders by profit, descending.
#[must_use]
pub fn top_orders_by_profit(records: &[SaleRecord], top_n: usize) -> Vec<&SaleRecord> {
    let mut ranked: Vec<&SaleRecord> = records.iter().collect();
    ranked.sort_by(|a, b| b.profit.total_cmp(&a.profit));
    ranked.truncate(top_n);
    ranked
}

fn sum_by<K: Ord>(
    records: &[SaleRecord],
    key_fn: impl Fn(&SaleRecord) -> K,
    value_fn: impl Fn(&SaleRecord) -> f64,
) -> BTreeMap<K, f64> {
    let mut totals = BTreeMap::new();
    for r in records {
        *totals.entry(key_fn(r)).or_insert(0.0) += value_fn(r);
    }
    totals
}
