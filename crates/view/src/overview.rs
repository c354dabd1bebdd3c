use std::cmp::Ordering;

use chrono::NaiveDateTime;
use common::stats;
use serde::{Deserialize, Serialize};
use table::TimeSeriesTable;

/// Sidebar summary of the loaded table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverviewStats {
    pub rows: usize,
    pub region_count: usize,
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
    /// Region with the highest full-range mean, with that mean.
    pub peak_region: Option<(String, f64)>,
}

pub fn overview(table: &TimeSeriesTable) -> OverviewStats {
    let peak_region = table
        .iter_columns()
        .map(|(region, values)| (region.to_string(), stats::mean(values)))
        .filter(|(_, mean)| mean.is_finite())
        .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal));

    OverviewStats {
        rows: table.len(),
        region_count: table.regions().len(),
        start: table.start(),
        end: table.end(),
        peak_region,
    }
}
