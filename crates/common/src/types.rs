use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Aggregation granularity for derived tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    Daily,
    Monthly,
}

/// Summary metrics for one region over the full table range.
///
/// Values are in megawatts except `growth_rate` and `load_factor`, which
/// are percentages. Division-by-zero edges (zero previous month, zero peak)
/// report `0.0` instead of faulting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricSet {
    /// Value at the last timestamp in the table.
    pub current: f64,
    /// Mean over the full range.
    pub average: f64,
    /// Maximum over the full range.
    pub peak: f64,
    /// Minimum over the full range.
    pub minimum: f64,
    /// Percentage change between the last two monthly means. Zero when
    /// fewer than two monthly buckets exist.
    pub growth_rate: f64,
    /// Sample standard deviation over the full range.
    pub volatility: f64,
    /// average / peak, as a percentage.
    pub load_factor: f64,
}

/// One observed historical point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObservedPoint {
    pub timestamp: NaiveDateTime,
    pub value: f64,
}

/// One predicted point with its uncertainty interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictedPoint {
    pub timestamp: NaiveDateTime,
    pub predicted: f64,
    pub lower: f64,
    pub upper: f64,
}

impl PredictedPoint {
    /// True if the point prediction sits inside its own interval.
    pub fn is_consistent(&self) -> bool {
        self.lower <= self.predicted && self.predicted <= self.upper
    }
}

/// Output of the forecast engine: the observed series, its in-sample fit
/// and the out-of-sample predictions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastResult {
    /// The observed series the model was fit on.
    pub observed: Vec<ObservedPoint>,
    /// In-sample predictions, one per observed point.
    pub fitted: Vec<PredictedPoint>,
    /// Out-of-sample predictions, one per forecast day.
    pub future: Vec<PredictedPoint>,
}
