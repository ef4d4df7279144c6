//! Load a sales CSV, fan it through a bounded-buffer pipeline, and print
//! the aggregate report.
//!
//! Usage: `sales_report <sales.csv>`

use std::env;
use std::process::ExitCode;

use conveyor_core::Pipeline;
use ledger::{load_sales_path, render_report};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let Some(path) = env::args().nth(1) else {
        error!("usage: sales_report <sales.csv>");
        return ExitCode::FAILURE;
    };

    let records = match load_sales_path(&path) {
        Ok(records) => records,
        Err(err) => {
            error!("{err}");
            return ExitCode::FAILURE;
        }
    };
    info!(count = records.len(), path, "loaded sales file");

    // Fan the rows through a producer/consumer pipeline before reporting.
    // For a single file this is pure ceremony, but it keeps the report path
    // identical to how multi-source feeds are ingested. One consumer keeps
    // delivery in file order, so tie-breaking in the top-orders ranking is
    // stable run to run.
    let report = Pipeline::builder(64).source(records).run();
    let records = report.items;

    let mut out = String::new();
    if let Err(err) = render_report(&records, &mut out) {
        error!("{err}");
        return ExitCode::FAILURE;
    }
    print!("{out}");

    ExitCode::SUCCESS
}
