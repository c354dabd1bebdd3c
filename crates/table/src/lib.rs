pub mod loader;

pub use loader::{load, TIMESTAMP_FORMAT};

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::NaiveDateTime;
use common::{Result, WattboardError};

static NEXT_VERSION: AtomicU64 = AtomicU64::new(1);

/// An immutable table of per-region values keyed by a strictly ascending,
/// unique timestamp index.
///
/// Each table carries a process-unique `version` id so derived results can
/// be cached by table identity without hashing the data.
#[derive(Debug, Clone)]
pub struct TimeSeriesTable {
    timestamps: Vec<NaiveDateTime>,
    regions: Vec<String>,
    columns: Vec<Vec<f64>>,
    version: u64,
}

impl TimeSeriesTable {
    /// Build a table from parallel columns, one per region.
    ///
    /// Rows are sorted by timestamp; duplicate timestamps and ragged
    /// columns are rejected with `InvalidInput`.
    pub fn new(
        timestamps: Vec<NaiveDateTime>,
        regions: Vec<String>,
        columns: Vec<Vec<f64>>,
    ) -> Result<Self> {
        if regions.len() != columns.len() {
            return Err(WattboardError::InvalidInput(format!(
                "{} region names for {} columns",
                regions.len(),
                columns.len()
            )));
        }
        for (region, column) in regions.iter().zip(&columns) {
            if column.len() != timestamps.len() {
                return Err(WattboardError::InvalidInput(format!(
                    "column {region} has {} values for {} timestamps",
                    column.len(),
                    timestamps.len()
                )));
            }
        }

        let mut order: Vec<usize> = (0..timestamps.len()).collect();
        order.sort_by_key(|&i| timestamps[i]);
        for pair in order.windows(2) {
            if timestamps[pair[0]] == timestamps[pair[1]] {
                return Err(WattboardError::InvalidInput(format!(
                    "duplicate timestamp {}",
                    timestamps[pair[0]]
                )));
            }
        }

        let timestamps: Vec<NaiveDateTime> = order.iter().map(|&i| timestamps[i]).collect();
        let columns: Vec<Vec<f64>> = columns
            .into_iter()
            .map(|column| order.iter().map(|&i| column[i]).collect())
            .collect();

        Ok(Self {
            timestamps,
            regions,
            columns,
            version: NEXT_VERSION.fetch_add(1, Ordering::Relaxed),
        })
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Process-unique identity of this table, for cache keys.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Ascending timestamp index.
    pub fn timestamps(&self) -> &[NaiveDateTime] {
        &self.timestamps
    }

    /// Region names in source column order.
    pub fn regions(&self) -> &[String] {
        &self.regions
    }

    pub fn start(&self) -> Option<NaiveDateTime> {
        self.timestamps.first().copied()
    }

    pub fn end(&self) -> Option<NaiveDateTime> {
        self.timestamps.last().copied()
    }

    /// Values of one region, row order matching `timestamps()`.
    pub fn column(&self, region: &str) -> Result<&[f64]> {
        self.regions
            .iter()
            .position(|r| r == region)
            .map(|i| self.columns[i].as_slice())
            .ok_or_else(|| WattboardError::UnknownRegion(region.to_string()))
    }

    /// One region's series as parallel timestamp/value slices.
    pub fn series(&self, region: &str) -> Result<(&[NaiveDateTime], &[f64])> {
        Ok((&self.timestamps, self.column(region)?))
    }

    /// Iterate all columns as `(region, values)` pairs.
    pub fn iter_columns(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.regions
            .iter()
            .map(String::as_str)
            .zip(self.columns.iter().map(Vec::as_slice))
    }
}
