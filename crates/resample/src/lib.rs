use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use common::{Granularity, Result};
use table::TimeSeriesTable;
use tracing::debug;

/// Mean-aggregate a table into daily or monthly buckets.
///
/// Each bucket holds the arithmetic mean of the finite observations falling
/// inside it, per region independently; buckets with no observations are
/// absent from the output. Daily buckets are labeled at midnight of the day,
/// monthly buckets at the last day of the month (the source export's
/// month-end convention).
pub fn resample(table: &TimeSeriesTable, granularity: Granularity) -> Result<TimeSeriesTable> {
    let labels: Vec<NaiveDateTime> = table
        .timestamps()
        .iter()
        .map(|ts| bucket_label(*ts, granularity))
        .collect();

    // Bucket labels in ascending order, plus each row's bucket index.
    let mut bucket_index: BTreeMap<NaiveDateTime, usize> = BTreeMap::new();
    let mut row_bucket = Vec::with_capacity(labels.len());
    for label in &labels {
        let next = bucket_index.len();
        row_bucket.push(*bucket_index.entry(*label).or_insert(next));
    }
    let out_timestamps: Vec<NaiveDateTime> = bucket_index.into_keys().collect();

    let mut out_columns = Vec::with_capacity(table.regions().len());
    for (_, column) in table.iter_columns() {
        let mut sums = vec![0.0_f64; out_timestamps.len()];
        let mut counts = vec![0_u32; out_timestamps.len()];
        for (row, v) in column.iter().enumerate() {
            if !v.is_finite() {
                continue;
            }
            sums[row_bucket[row]] += v;
            counts[row_bucket[row]] += 1;
        }
        let means: Vec<f64> = sums
            .iter()
            .zip(&counts)
            .map(|(s, &c)| if c == 0 { f64::NAN } else { s / f64::from(c) })
            .collect();
        out_columns.push(means);
    }

    debug!(
        granularity = ?granularity,
        input_rows = table.len(),
        buckets = out_timestamps.len(),
        "Resampled table"
    );

    TimeSeriesTable::new(out_timestamps, table.regions().to_vec(), out_columns)
}

/// Label of the bucket containing `ts`.
fn bucket_label(ts: NaiveDateTime, granularity: Granularity) -> NaiveDateTime {
    match granularity {
        Granularity::Daily => ts.date().and_time(NaiveTime::MIN),
        Granularity::Monthly => month_end(ts.date()).and_time(NaiveTime::MIN),
    }
}

/// Last day of the month containing `date`.
fn month_end(date: NaiveDate) -> NaiveDate {
    let next_month = if date.month() == 12 {
        NaiveDate::from_ymd_opt(date.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(date.year(), date.month() + 1, 1)
    };
    next_month.and_then(|d| d.pred_opt()).unwrap_or(date)
}
