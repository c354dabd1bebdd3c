use augurs::prophet::{
    wasmstan::WasmstanOptimizer, FeatureMode, GrowthType, PositiveFloat, PredictionData, Prophet,
    ProphetOptions, SeasonalityOption, TrainingData,
};
use chrono::{Duration, NaiveDateTime};
use common::{
    ForecastConfig, ForecastResult, ObservedPoint, PredictedPoint, Result, WattboardError,
};
use table::TimeSeriesTable;
use tracing::{debug, info};

/// Seasonal additive forecasting engine.
///
/// Fitting is delegated to the Prophet implementation in `augurs` with the
/// WASMStan optimizer; this crate only shapes the series, configures the
/// model and splits the predictions.
#[derive(Debug, Clone)]
pub struct ForecastEngine {
    config: ForecastConfig,
}

impl ForecastEngine {
    pub fn new(config: ForecastConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ForecastConfig {
        &self.config
    }

    /// Fit the configured model on one region's series and predict every
    /// historical timestamp plus `horizon_days` future points.
    ///
    /// Future points are spaced one calendar day apart after the last
    /// observation regardless of the history's native hourly granularity;
    /// the source dashboard extended its frame the same way and callers
    /// rely on it.
    pub fn forecast(
        &self,
        table: &TimeSeriesTable,
        region: &str,
        horizon_days: u32,
    ) -> Result<ForecastResult> {
        let (timestamps, values) = table.series(region)?;

        // The model cannot train on missing cells; drop them up front.
        let observed: Vec<ObservedPoint> = timestamps
            .iter()
            .zip(values)
            .filter(|(_, v)| v.is_finite())
            .map(|(ts, v)| ObservedPoint {
                timestamp: *ts,
                value: *v,
            })
            .collect();

        if observed.len() < 2 {
            return Err(WattboardError::ForecastUnavailable(format!(
                "region {region} has {} usable observations, need at least 2",
                observed.len()
            )));
        }

        let history_ds: Vec<i64> = observed
            .iter()
            .map(|p| p.timestamp.and_utc().timestamp())
            .collect();
        let history_y: Vec<f64> = observed.iter().map(|p| p.value).collect();

        let last = observed[observed.len() - 1].timestamp;
        let future_timestamps: Vec<NaiveDateTime> = (1..=i64::from(horizon_days))
            .map(|d| last + Duration::days(d))
            .collect();

        info!(
            region = region,
            observations = observed.len(),
            horizon_days = horizon_days,
            "Fitting seasonal model"
        );

        let data = TrainingData::new(history_ds.clone(), history_y)
            .map_err(|e| WattboardError::ForecastUnavailable(format!("training data: {e}")))?;

        let mut model = Prophet::new(self.options()?, WasmstanOptimizer::new());
        model
            .fit(data, Default::default())
            .map_err(|e| WattboardError::ForecastUnavailable(format!("model fit: {e}")))?;

        let mut prediction_ds = history_ds;
        prediction_ds.extend(future_timestamps.iter().map(|ts| ts.and_utc().timestamp()));
        let predictions = model
            .predict(Some(PredictionData::new(prediction_ds)))
            .map_err(|e| WattboardError::ForecastUnavailable(format!("model predict: {e}")))?;

        let point = predictions.yhat.point;
        let lower = predictions.yhat.lower.ok_or_else(|| {
            WattboardError::ForecastUnavailable("model produced no lower bounds".into())
        })?;
        let upper = predictions.yhat.upper.ok_or_else(|| {
            WattboardError::ForecastUnavailable("model produced no upper bounds".into())
        })?;

        let requested = observed.len() + future_timestamps.len();
        if point.len() != requested || lower.len() != requested || upper.len() != requested {
            return Err(WattboardError::ForecastUnavailable(format!(
                "model returned {} predictions for {requested} requested timestamps",
                point.len()
            )));
        }

        let all_timestamps = observed
            .iter()
            .map(|p| p.timestamp)
            .chain(future_timestamps);
        let mut fitted: Vec<PredictedPoint> = all_timestamps
            .zip(point)
            .zip(lower.into_iter().zip(upper))
            .map(|((timestamp, predicted), (lo, hi))| PredictedPoint {
                timestamp,
                predicted,
                // Bounds are sampled quantiles; keep the interval around the point.
                lower: lo.min(predicted),
                upper: hi.max(predicted),
            })
            .collect();
        let future = fitted.split_off(observed.len());

        debug!(
            fitted = fitted.len(),
            future = future.len(),
            "Forecast complete"
        );

        Ok(ForecastResult {
            observed,
            fitted,
            future,
        })
    }

    fn options(&self) -> Result<ProphetOptions> {
        Ok(ProphetOptions {
            growth: GrowthType::Linear,
            seasonality_mode: FeatureMode::Additive,
            daily_seasonality: SeasonalityOption::Manual(self.config.daily_seasonality),
            weekly_seasonality: SeasonalityOption::Manual(self.config.weekly_seasonality),
            yearly_seasonality: SeasonalityOption::Manual(self.config.yearly_seasonality),
            changepoint_prior_scale: positive(self.config.changepoint_prior_scale)?,
            seasonality_prior_scale: positive(self.config.seasonality_prior_scale)?,
            ..Default::default()
        })
    }
}

impl Default for ForecastEngine {
    fn default() -> Self {
        Self::new(ForecastConfig::default())
    }
}

fn positive(value: f64) -> Result<PositiveFloat> {
    PositiveFloat::try_from(value)
        .map_err(|e| WattboardError::InvalidInput(format!("prior scale {value}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn hourly_table(region: &str, values: Vec<f64>) -> TimeSeriesTable {
        let base = NaiveDate::from_ymd_opt(2019, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let timestamps: Vec<NaiveDateTime> = (0..values.len())
            .map(|i| base + Duration::hours(i as i64))
            .collect();
        TimeSeriesTable::new(timestamps, vec![region.into()], vec![values]).unwrap()
    }

    #[test]
    fn test_insufficient_data() {
        let engine = ForecastEngine::default();
        let table = hourly_table("A", vec![1.0]);
        let result = engine.forecast(&table, "A", 3);
        assert!(matches!(
            result,
            Err(WattboardError::ForecastUnavailable(_))
        ));
    }

    #[test]
    fn test_nan_only_series_is_unavailable() {
        let engine = ForecastEngine::default();
        let table = hourly_table("A", vec![f64::NAN; 10]);
        assert!(engine.forecast(&table, "A", 3).is_err());
    }

    #[test]
    fn test_unknown_region() {
        let engine = ForecastEngine::default();
        let table = hourly_table("A", vec![1.0, 2.0, 3.0]);
        assert!(matches!(
            engine.forecast(&table, "Z", 3),
            Err(WattboardError::UnknownRegion(_))
        ));
    }

    #[test]
    fn test_constant_series_slices_and_bounds() {
        let engine = ForecastEngine::default();
        let table = hourly_table("A", vec![100.0; 48]);

        let result = engine.forecast(&table, "A", 3).unwrap();
        assert_eq!(result.observed.len(), 48);
        assert_eq!(result.fitted.len(), 48);
        assert_eq!(result.future.len(), 3);

        for p in result.fitted.iter().chain(&result.future) {
            assert!(p.is_consistent(), "inconsistent interval at {}", p.timestamp);
        }
        // Constant history → predictions near 100 up to seasonal noise
        for p in &result.future {
            assert!((p.predicted - 100.0).abs() < 20.0, "expected ~100, got {}", p.predicted);
        }
    }

    #[test]
    fn test_future_points_are_day_spaced() {
        let engine = ForecastEngine::default();
        let table = hourly_table("A", (0..48).map(|i| 200.0 + i as f64).collect());

        let result = engine.forecast(&table, "A", 4).unwrap();
        let last_observed = result.observed[result.observed.len() - 1].timestamp;
        for (i, p) in result.future.iter().enumerate() {
            assert_eq!(p.timestamp, last_observed + Duration::days(i as i64 + 1));
        }
    }
}
