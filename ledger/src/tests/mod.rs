use crate::record::{OrderDate, SaleRecord};


fn record(
    order_id: &str,
    date: (u16, u8, u8),
    region: &str,
    category: &str,
    subcategory: &str,
    sales: f64,
    quantity: u32,
    profit: f64,
) -> SaleRecord {
    SaleRecord {
        order_id: order_id.to_string(),
        order_date: OrderDate::new(date.0, date.1, date.2).unwrap(),
        region: region.to_string(),
        category: category.to_string(),
        subcategory: subcategory.to_string(),
        sales,
        quantity,
        profit,
    }
}

fn sample_records() -> Vec<SaleRecord> {
    vec![
        record("O1", (2023, 1, 10), "East", "Technology", "Phones", 1000.0, 3, 200.0),
        record("O2", (2023, 1, 12), "East", "Furniture", "Chairs", 300.0, 4, 60.0),
        record("O3", (2023, 2, 1), "West", "Technology", "Accessories", 150.0, 5, 70.0),
        record("O4", (2023, 2, 15), "Central", "Office Supplies", "Paper", 80.0, 8, 30.0),
        record("O5", (2023, 3, 5), "West", "Furniture", "Tables", 700.0, 2, 90.0),
        record("O6", (2023, 3, 6), "Central", "Technology", "Phones", 400.0, 1, -50.0),
    ]
}
