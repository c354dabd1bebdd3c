use chrono::NaiveDateTime;
use common::{stats, Result};
use serde::{Deserialize, Serialize};
use table::TimeSeriesTable;

/// Region-major matrix of bucket means for the comparison heatmap.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeatmapView {
    /// Row labels, one per region.
    pub regions: Vec<String>,
    /// Column labels, one per bucket.
    pub timestamps: Vec<NaiveDateTime>,
    /// `values[row][col]` is the bucket mean for `regions[row]`.
    pub values: Vec<Vec<f64>>,
}

/// Regions ranked by full-range mean consumption, highest first,
/// truncated to `n`.
pub fn top_regions(table: &TimeSeriesTable, n: usize) -> Vec<String> {
    let mut ranked: Vec<(String, f64)> = table
        .iter_columns()
        .map(|(region, values)| (region.to_string(), stats::mean(values)))
        .collect();
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    ranked.truncate(n);
    ranked.into_iter().map(|(region, _)| region).collect()
}

/// Build the heatmap matrix for `regions` from an aggregated table,
/// transposed to one row per region like the source dashboard.
pub fn heatmap(aggregated: &TimeSeriesTable, regions: &[String]) -> Result<HeatmapView> {
    let mut values = Vec::with_capacity(regions.len());
    for region in regions {
        values.push(aggregated.column(region)?.to_vec());
    }
    Ok(HeatmapView {
        regions: regions.to_vec(),
        timestamps: aggregated.timestamps().to_vec(),
        values,
    })
}
