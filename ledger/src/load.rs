//! CSV ingestion.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use snafu::{ResultExt, Snafu};
use tracing::debug;

use crate::record::SaleRecord;

/// Error while loading a sales CSV.
#[derive(Debug, Snafu)]
pub enum LoadError {
    /// The file could not be opened.
    #[snafu(display("cannot open {path}: {source}"))]
    Open {
        /// Path that failed to open.
        path: String,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// A row failed to parse or deserialize.
    #[snafu(display("bad row {row}: {source}"))]
    BadRow {
        /// 1-based data row number (header excluded).
        row: usize,
        /// Underlying CSV/deserialization error.
        source: csv::Error,
    },
}

/// Read CSV rows into [`SaleRecord`]s.
///
/// The first line must be a header naming the `SaleRecord` fields. The whole
/// file is rejected on the first bad row, identified by its 1-based row
/// number.
///
/// # Errors
/// Returns [`LoadError::BadRow`] for a malformed or ill-typed row.
pub fn load_sales<R: Read>(reader: R) -> Result<Vec<SaleRecord>, LoadError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut records = Vec::new();
    for (idx, row) in csv_reader.deserialize().enumerate() {
        let record: SaleRecord = row.context(BadRowSnafu { row: idx + 1 })?;
        records.push(record);
    }
    debug!(count = records.len(), "loaded sales records");
    Ok(records)
}

/// Read a sales CSV from a file path.
///
/// # Errors
/// Returns [`LoadError::Open`] when the file cannot be opened, otherwise
/// as [`load_sales`].
pub fn load_sales_path(path: impl AsRef<Path>) -> Result<Vec<SaleRecord>, LoadError> {
    let path = path.as_ref();
    let file = File::open(path).context(OpenSnafu {
        path: path.display().to_string(),
    })?;
    load_sales(file)
}
