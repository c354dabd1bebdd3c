use chrono::NaiveDateTime;
use common::Result;
use serde::{Deserialize, Serialize};
use table::TimeSeriesTable;

/// Points per day in the hourly source data.
const POINTS_PER_DAY: usize = 24;

/// Data behind the historical consumption chart: the raw series plus a
/// trailing moving-average overlay.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryChart {
    pub region: String,
    pub timestamps: Vec<NaiveDateTime>,
    pub values: Vec<f64>,
    /// Trailing mean over `window_days`; NaN until the window has filled.
    pub moving_average: Vec<f64>,
    pub window_days: u32,
}

/// Chart data for one region with a `window_days` trailing moving average.
pub fn history_chart(
    table: &TimeSeriesTable,
    region: &str,
    window_days: u32,
) -> Result<HistoryChart> {
    let (timestamps, values) = table.series(region)?;
    let window = window_days as usize * POINTS_PER_DAY;
    Ok(HistoryChart {
        region: region.to_string(),
        timestamps: timestamps.to_vec(),
        values: values.to_vec(),
        moving_average: moving_average(values, window),
        window_days,
    })
}

/// Trailing moving average over a fixed window.
///
/// Output `i` is the mean of `values[i + 1 - window ..= i]`; positions
/// before the window has filled, and windows containing a non-finite
/// value, are NaN.
pub fn moving_average(values: &[f64], window: usize) -> Vec<f64> {
    if window <= 1 {
        return values.to_vec();
    }
    let mut out = vec![f64::NAN; values.len()];
    let mut sum = 0.0;
    let mut missing = 0_usize;
    for i in 0..values.len() {
        if values[i].is_finite() {
            sum += values[i];
        } else {
            missing += 1;
        }
        if i >= window {
            if values[i - window].is_finite() {
                sum -= values[i - window];
            } else {
                missing -= 1;
            }
        }
        if i + 1 >= window && missing == 0 {
            out[i] = sum / window as f64;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    #[test]
    fn test_moving_average_warmup_and_values() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0];
        let out = moving_average(&values, 3);

        assert!(out[0].is_nan());
        assert!(out[1].is_nan());
        assert!((out[2] - 2.0).abs() < 1e-9);
        assert!((out[3] - 3.0).abs() < 1e-9);
        assert!((out[4] - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_moving_average_nan_windows() {
        let values = [1.0, f64::NAN, 3.0, 4.0, 5.0];
        let out = moving_average(&values, 2);

        assert!(out[0].is_nan());
        assert!(out[1].is_nan()); // window covers the NaN
        assert!(out[2].is_nan()); // still covers the NaN
        assert!((out[3] - 3.5).abs() < 1e-9);
        assert!((out[4] - 4.5).abs() < 1e-9);
    }

    #[test]
    fn test_moving_average_window_one_is_identity() {
        let values = [1.0, 2.0, 3.0];
        assert_eq!(moving_average(&values, 1), values.to_vec());
    }

    #[test]
    fn test_history_chart_window_in_points() {
        let base = NaiveDate::from_ymd_opt(2019, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let n = 30 * POINTS_PER_DAY;
        let timestamps: Vec<NaiveDateTime> =
            (0..n).map(|i| base + Duration::hours(i as i64)).collect();
        let values = vec![60.0; n];
        let table =
            TimeSeriesTable::new(timestamps, vec!["A".into()], vec![values]).unwrap();

        let chart = history_chart(&table, "A", 1).unwrap();
        assert_eq!(chart.values.len(), n);
        // 1-day window = 24 points: 23 warmup NaNs then the constant mean
        assert!(chart.moving_average[22].is_nan());
        assert!((chart.moving_average[23] - 60.0).abs() < 1e-9);
    }
}
