use common::MetricSet;
use serde::{Deserialize, Serialize};

/// Rendering spec for the current-load gauge.
///
/// The axis runs from zero to the peak observed to date, with green/amber/
/// red bands at 50% and 80% of the axis, a threshold line at 90% and a
/// delta reference at 70%.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GaugeSpec {
    pub value: f64,
    pub axis_max: f64,
    pub delta_reference: f64,
    pub bands: Vec<GaugeBand>,
    pub threshold: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GaugeBand {
    pub from: f64,
    pub to: f64,
}

impl GaugeSpec {
    /// Gauge for the region's current load against its peak.
    pub fn current_load(metrics: &MetricSet) -> Self {
        let max = metrics.peak;
        Self {
            value: metrics.current,
            axis_max: max,
            delta_reference: max * 0.7,
            bands: vec![
                GaugeBand {
                    from: 0.0,
                    to: max * 0.5,
                },
                GaugeBand {
                    from: max * 0.5,
                    to: max * 0.8,
                },
                GaugeBand {
                    from: max * 0.8,
                    to: max,
                },
            ],
            threshold: max * 0.9,
        }
    }
}
