use std::path::Path;

use chrono::NaiveDateTime;
use common::{Result, WattboardError};
use csv::ReaderBuilder;
use tracing::info;

use crate::TimeSeriesTable;

/// Timestamp layout of the source export (day-month-year hour:minute).
pub const TIMESTAMP_FORMAT: &str = "%d-%m-%Y %H:%M";

/// Load a consumption table from a delimited file.
///
/// The first header column is the timestamp; every remaining column is one
/// region. A missing or unreadable file, or a timestamp that does not match
/// [`TIMESTAMP_FORMAT`], fails with `DataUnavailable` and no partial table
/// escapes. Numeric cells that fail to parse are loaded as NaN and skipped
/// by downstream aggregations.
pub fn load(path: impl AsRef<Path>) -> Result<TimeSeriesTable> {
    let path = path.as_ref();
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(|e| WattboardError::DataUnavailable(format!("{}: {e}", path.display())))?;

    let headers = reader
        .headers()
        .map_err(|e| WattboardError::DataUnavailable(format!("{}: {e}", path.display())))?
        .clone();
    if headers.len() < 2 {
        return Err(WattboardError::DataUnavailable(format!(
            "{}: expected a timestamp column and at least one region column",
            path.display()
        )));
    }
    let regions: Vec<String> = headers.iter().skip(1).map(|h| h.trim().to_string()).collect();

    let mut timestamps = Vec::new();
    let mut columns: Vec<Vec<f64>> = vec![Vec::new(); regions.len()];

    for record in reader.records() {
        let record = record
            .map_err(|e| WattboardError::DataUnavailable(format!("{}: {e}", path.display())))?;
        let raw = record.get(0).unwrap_or("").trim();
        let timestamp = NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT).map_err(|e| {
            WattboardError::DataUnavailable(format!(
                "{}: bad timestamp {raw:?} on row {}: {e}",
                path.display(),
                timestamps.len() + 2,
            ))
        })?;
        timestamps.push(timestamp);

        for (i, column) in columns.iter_mut().enumerate() {
            let cell = record.get(i + 1).unwrap_or("").trim();
            column.push(cell.parse::<f64>().unwrap_or(f64::NAN));
        }
    }

    let table = TimeSeriesTable::new(timestamps, regions, columns)?;
    info!(
        path = %path.display(),
        rows = table.len(),
        regions = table.regions().len(),
        "Loaded consumption table"
    );
    Ok(table)
}
