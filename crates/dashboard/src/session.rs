use std::sync::Arc;

use common::{AppConfig, ForecastResult, Granularity, MetricSet, Result, WattboardError};
use forecast::ForecastEngine;
use table::TimeSeriesTable;
use tracing::info;
use view::{GaugeSpec, HeatmapView, HistoryChart, KpiCard, OverviewStats};

use crate::cache::Memo;

/// One interactive analytics session over a loaded consumption table.
///
/// The session owns the table, validates selections and memoizes every
/// derived result in explicit cache tables keyed on the table version plus
/// the selection. Interactions are synchronous: a selection change is a
/// plain method call that blocks until the derivation completes, and any
/// failure is terminal for that call only.
pub struct Dashboard {
    config: AppConfig,
    table: TimeSeriesTable,
    engine: ForecastEngine,
    resamples: Memo<(u64, Granularity), Arc<TimeSeriesTable>>,
    metric_sets: Memo<(u64, String), MetricSet>,
    forecasts: Memo<(u64, String, u32), Arc<ForecastResult>>,
}

impl Dashboard {
    /// Load the configured data file and start a session.
    ///
    /// A missing or unreadable file is terminal: the session never starts
    /// and no partial table is retained.
    pub fn open(config: AppConfig) -> Result<Self> {
        let table = table::load(&config.data.path)?;
        Ok(Self::from_table(table, config))
    }

    /// Start a session over an already-built table.
    pub fn from_table(table: TimeSeriesTable, config: AppConfig) -> Self {
        info!(
            rows = table.len(),
            regions = table.regions().len(),
            "Starting dashboard session"
        );
        let engine = ForecastEngine::new(config.forecast.clone());
        Self {
            config,
            table,
            engine,
            resamples: Memo::new(),
            metric_sets: Memo::new(),
            forecasts: Memo::new(),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn table(&self) -> &TimeSeriesTable {
        &self.table
    }

    /// Region names available to the region selector.
    pub fn regions(&self) -> &[String] {
        self.table.regions()
    }

    /// Summary of the loaded table for the session sidebar.
    pub fn overview(&self) -> OverviewStats {
        view::overview(&self.table)
    }

    /// Daily mean aggregate of the loaded table.
    pub fn daily(&mut self) -> Result<Arc<TimeSeriesTable>> {
        self.aggregate(Granularity::Daily)
    }

    /// Monthly mean aggregate of the loaded table.
    pub fn monthly(&mut self) -> Result<Arc<TimeSeriesTable>> {
        self.aggregate(Granularity::Monthly)
    }

    fn aggregate(&mut self, granularity: Granularity) -> Result<Arc<TimeSeriesTable>> {
        let table = &self.table;
        self.resamples
            .get_or_try_insert_with((table.version(), granularity), || {
                Ok(Arc::new(resample::resample(table, granularity)?))
            })
    }

    /// Metric set for one region, memoized per region.
    pub fn metrics(&mut self, region: &str) -> Result<MetricSet> {
        let table = &self.table;
        self.metric_sets
            .get_or_try_insert_with((table.version(), region.to_string()), || {
                metrics::compute(table, region)
            })
    }

    /// Seasonal forecast for one region and horizon, memoized per pair.
    ///
    /// The horizon must be one of the configured selectable day counts.
    /// A fit failure is terminal for this call; previously cached results
    /// for other selections stay valid.
    pub fn forecast(&mut self, region: &str, horizon_days: u32) -> Result<Arc<ForecastResult>> {
        if !self.config.forecast.horizon_choices.contains(&horizon_days) {
            return Err(WattboardError::InvalidInput(format!(
                "horizon {horizon_days} is not one of the selectable horizons {:?}",
                self.config.forecast.horizon_choices
            )));
        }
        let table = &self.table;
        let engine = &self.engine;
        self.forecasts.get_or_try_insert_with(
            (table.version(), region.to_string(), horizon_days),
            || Ok(Arc::new(engine.forecast(table, region, horizon_days)?)),
        )
    }

    /// Forecast at the configured default horizon.
    pub fn default_forecast(&mut self, region: &str) -> Result<Arc<ForecastResult>> {
        let horizon = self.config.forecast.default_horizon_days;
        self.forecast(region, horizon)
    }

    /// The four KPI cards for a region.
    pub fn kpis(&mut self, region: &str) -> Result<Vec<KpiCard>> {
        Ok(view::kpi_cards(&self.metrics(region)?))
    }

    /// Gauge spec for the region's current load against its peak.
    pub fn gauge(&mut self, region: &str) -> Result<GaugeSpec> {
        Ok(GaugeSpec::current_load(&self.metrics(region)?))
    }

    /// Historical chart data with the configured trailing moving average.
    pub fn history_chart(&self, region: &str) -> Result<HistoryChart> {
        view::history_chart(&self.table, region, self.config.display.moving_average_days)
    }

    /// Daily-mean heatmap across the top consuming regions.
    pub fn heatmap(&mut self) -> Result<HeatmapView> {
        let top = view::top_regions(&self.table, self.config.display.heatmap_regions);
        let daily = self.daily()?;
        view::heatmap(&daily, &top)
    }
}
