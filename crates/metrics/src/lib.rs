use common::{stats, Granularity, MetricSet, Result, WattboardError};
use table::TimeSeriesTable;
use tracing::debug;

/// Compute the metric set for one region over the full table range.
///
/// `current` is the value at the table's last timestamp, NaN included if
/// that cell failed to parse. The growth rate compares the last two
/// monthly-mean buckets and reports `0.0` when fewer than two exist, when
/// the previous month is zero, or when either month is not finite.
pub fn compute(table: &TimeSeriesTable, region: &str) -> Result<MetricSet> {
    let values = table.column(region)?;
    if values.is_empty() {
        return Err(WattboardError::InvalidInput(format!(
            "region {region} has no observations"
        )));
    }

    let current = values[values.len() - 1];
    let average = stats::mean(values);
    let peak = stats::max(values);
    let minimum = stats::min(values);
    let volatility = stats::std_dev(values);

    let monthly = resample::resample(table, Granularity::Monthly)?;
    let growth_rate = growth_rate(monthly.column(region)?);

    let load_factor = if peak != 0.0 && peak.is_finite() {
        average / peak * 100.0
    } else {
        0.0
    };

    debug!(
        region = region,
        current = current,
        growth_rate = growth_rate,
        "Computed metrics"
    );

    Ok(MetricSet {
        current,
        average,
        peak,
        minimum,
        growth_rate,
        volatility,
        load_factor,
    })
}

/// Percentage change between the last two monthly means.
fn growth_rate(monthly: &[f64]) -> f64 {
    if monthly.len() < 2 {
        return 0.0;
    }
    let prev = monthly[monthly.len() - 2];
    let last = monthly[monthly.len() - 1];
    if prev == 0.0 || !prev.is_finite() || !last.is_finite() {
        return 0.0;
    }
    (last - prev) / prev * 100.0
}
