//! Benchmarks for per-region metric derivation.

use chrono::{NaiveDate, NaiveDateTime};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use table::TimeSeriesTable;

fn make_table(rows: usize) -> TimeSeriesTable {
    let base = NaiveDate::from_ymd_opt(2019, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    let timestamps: Vec<NaiveDateTime> = (0..rows)
        .map(|i| base + chrono::Duration::hours(i as i64))
        .collect();

    let mut state = 7_u64;
    let values: Vec<f64> = (0..rows)
        .map(|i| {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
            let noise = ((state >> 33) as f64) / (u32::MAX as f64) * 15.0;
            350.0 + 60.0 * (i as f64 * std::f64::consts::PI / 12.0).sin() + noise
        })
        .collect();

    TimeSeriesTable::new(timestamps, vec!["region-0".into()], vec![values]).unwrap()
}

fn bench_metrics(c: &mut Criterion) {
    let mut group = c.benchmark_group("metrics_compute");

    for rows in [720, 8760, 17520] {
        let table = make_table(rows);
        group.bench_with_input(BenchmarkId::from_parameter(rows), &table, |b, table| {
            b.iter(|| metrics::compute(black_box(table), "region-0"))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_metrics);
criterion_main!(benches);
