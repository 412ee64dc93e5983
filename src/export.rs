//! CSV export of a [`PriceTable`].
//!
//! Layout: header `,id,date,price`, then one row per (coin, day) with the
//! row's position inside its coin's series in the first column.

use std::fs;
use std::io::Write;
use std::path::Path;

use chrono::NaiveDate;
use log::info;
use serde::Serialize;
use tempfile::NamedTempFile;

use crate::error::{CoinGeckoError, Result};
use crate::models::PriceTable;

const HEADER: [&str; 4] = ["", "id", "date", "price"];

#[derive(Serialize)]
struct CsvRow<'a> {
    index: usize,
    id: &'a str,
    date: NaiveDate,
    price: f64,
}

/// Serialize `table` as CSV into `writer`.
pub fn write_csv<W: Write>(table: &PriceTable, writer: W) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    wtr.write_record(HEADER)?;
    for (index, point) in table.indexed_rows() {
        wtr.serialize(CsvRow {
            index,
            id: &point.id,
            date: point.date,
            price: point.price,
        })?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write `table` to `path`, replacing any existing file.
///
/// Rows go to a temp file next to the target which is renamed over it only
/// once fully written, so a failed export leaves the old file untouched.
/// Returns the number of data rows written.
pub fn write_csv_file(table: &PriceTable, path: &Path) -> Result<usize> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let mut tmp = NamedTempFile::new_in(dir)?;
    write_csv(table, &mut tmp)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path)
        .map_err(|e| CoinGeckoError::Io(e.error))?;

    let rows = table.len();
    info!("Wrote {} rows to {}", rows, path.display());
    Ok(rows)
}
