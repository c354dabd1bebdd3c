use serde::{Deserialize, Serialize};

use crate::{Result, WattboardError};

/// Application-level configuration for a dashboard session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub forecast: ForecastConfig,

    #[serde(default)]
    pub display: DisplayConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data: DataConfig::default(),
            forecast: ForecastConfig::default(),
            display: DisplayConfig::default(),
        }
    }
}

impl AppConfig {
    /// Parse a configuration from a JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| WattboardError::InvalidInput(format!("config parse: {e}")))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Path of the consumption CSV snapshot to load at session start.
    #[serde(default = "default_data_path")]
    pub path: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: default_data_path(),
        }
    }
}

/// Seasonal model configuration plus the selectable forecast horizons.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastConfig {
    #[serde(default = "default_true")]
    pub daily_seasonality: bool,

    #[serde(default = "default_true")]
    pub weekly_seasonality: bool,

    #[serde(default = "default_true")]
    pub yearly_seasonality: bool,

    #[serde(default = "default_changepoint_prior_scale")]
    pub changepoint_prior_scale: f64,

    #[serde(default = "default_seasonality_prior_scale")]
    pub seasonality_prior_scale: f64,

    /// Horizon day counts offered by the horizon selector.
    #[serde(default = "default_horizon_choices")]
    pub horizon_choices: Vec<u32>,

    #[serde(default = "default_horizon_days")]
    pub default_horizon_days: u32,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            daily_seasonality: default_true(),
            weekly_seasonality: default_true(),
            yearly_seasonality: default_true(),
            changepoint_prior_scale: default_changepoint_prior_scale(),
            seasonality_prior_scale: default_seasonality_prior_scale(),
            horizon_choices: default_horizon_choices(),
            default_horizon_days: default_horizon_days(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Trailing moving-average window on the history chart, in days.
    #[serde(default = "default_moving_average_days")]
    pub moving_average_days: u32,

    /// Number of regions shown on the comparison heatmap.
    #[serde(default = "default_heatmap_regions")]
    pub heatmap_regions: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            moving_average_days: default_moving_average_days(),
            heatmap_regions: default_heatmap_regions(),
        }
    }
}

fn default_data_path() -> String {
    "Power_Consumption_2019_2020.csv".into()
}
fn default_true() -> bool {
    true
}
fn default_changepoint_prior_scale() -> f64 {
    0.05
}
fn default_seasonality_prior_scale() -> f64 {
    10.0
}
fn default_horizon_choices() -> Vec<u32> {
    vec![30, 90, 180, 365]
}
fn default_horizon_days() -> u32 {
    90
}
fn default_moving_average_days() -> u32 {
    30
}
fn default_heatmap_regions() -> usize {
    10
}
