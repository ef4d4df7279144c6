//! Sales ledger analytics.
//!
//! Loads Superstore-style CSV rows into typed [`SaleRecord`]s, folds them
//! through a set of deterministic aggregations, and renders a console
//! report. The `sales_report` binary fans records through a
//! `conveyor` pipeline before reporting, so the analytics double as an
//! end-to-end exercise of the buffer crates.

#![warn(missing_docs)]

pub mod aggregate;
pub mod load;
pub mod record;
pub mod report;

pub use aggregate::{
    category_profit_margin, monthly_sales, profit_by_region, region_category_sales,
    sales_by_category, top_orders_by_profit, top_subcategories_by_sales, total_profit,
    total_sales,
};
pub use load::{load_sales, load_sales_path, LoadError};
pub use record::{DateError, OrderDate, SaleRecord};
pub use report::render_report;

#[cfg(test)]
mod tests;
