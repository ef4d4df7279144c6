//! Console report over a set of sales records.

use std::fmt::{self, Write};

use crate::aggregate::{
    category_profit_margin, monthly_sales, profit_by_region, region_category_sales,
    sales_by_category, top_orders_by_profit, top_subcategories_by_sales, total_profit,
    total_sales,
};
use crate::record::SaleRecord;

/// Render the full analysis suite as a printable report.
///
/// # Errors
/// Only forwards formatting errors from the underlying writer.
pub fn render_report(records: &[SaleRecord], out: &mut impl Write) -> fmt::Result {
    writeln!(out, "Loaded {} records\n", records.len())?;

    writeln!(out, "Totals")?;
    writeln!(out, "  Total sales : ${:.2}", total_sales(records))?;
    writeln!(out, "  Total profit: ${:.2}\n", total_profit(records))?;

    writeln!(out, "Monthly sales (YYYY-MM)")?;
    for (month, value) in monthly_sales(records) {
        writeln!(out, "  {month}: ${value:.2}")?;
    }
    writeln!(out)?;

    writeln!(out, "Top subcategories by sales")?;
    for (name, value) in top_subcategories_by_sales(records, 5) {
        writeln!(out, "  {name}: ${value:.2}")?;
    }
    writeln!(out)?;

    writeln!(out, "Sales by category")?;
    for (category, value) in sales_by_category(records) {
        writeln!(out, "  {category}: ${value:.2}")?;
    }
    writeln!(out)?;

    writeln!(out, "Profit by region")?;
    for (region, value) in profit_by_region(records) {
        writeln!(out, "  {region}: ${value:.2}")?;
    }
    writeln!(out)?;

    writeln!(out, "Category profit margin (profit / sales)")?;
    for (category, margin) in category_profit_margin(records) {
        writeln!(out, "  {category}: {:.2}%", margin * 100.0)?;
    }
    writeln!(out)?;

    writeln!(out, "Region + category sales")?;
    for ((region, category), value) in region_category_sales(records) {
        writeln!(out, "  {region} / {category}: ${value:.2}")?;
    }
    writeln!(out)?;

    writeln!(out, "Top orders by profit")?;
    for record in top_orders_by_profit(records, 5) {
        writeln!(
            out,
            "  {} ({} - {} - {}/{}): sales=${:.2}, profit=${:.2}",
            record.order_id,
            record.order_date,
            record.region,
            record.category,
            record.subcategory,
            record.sales,
            record.profit,
        )?;
    }

    Ok(())
}
