//! Minimal pipeline demo: two producers, three consumers, one buffer.
//!
//! Run with:
//!     cargo run -p conveyor-core --example pipeline

use conveyor_core::{Pipeline, TransformError};

fn main() {
    let report = Pipeline::builder(4)
        .source((0..10).collect::<Vec<i32>>())
        .source((100..110).collect::<Vec<i32>>())
        .consumers(3)
        .transform(|x| {
            if x < 0 {
                Err(TransformError::new("negative item"))
            } else {
                Ok(x * 10)
            }
        })
        .run();

    println!("delivered {} items: {:?}", report.delivered(), report.items);
    println!("producers: {:?}", report.producers);
    println!("consumers: {:?}", report.consumers);
}
