use common::MetricSet;
use serde::{Deserialize, Serialize};

/// One headline card on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiCard {
    pub label: String,
    pub value: f64,
    pub unit: String,
}

/// The four headline cards: current, average and peak load plus growth rate.
pub fn kpi_cards(metrics: &MetricSet) -> Vec<KpiCard> {
    vec![
        KpiCard {
            label: "Current Load".into(),
            value: metrics.current,
            unit: "MW".into(),
        },
        KpiCard {
            label: "Average Load".into(),
            value: metrics.average,
            unit: "MW".into(),
        },
        KpiCard {
            label: "Peak Load".into(),
            value: metrics.peak,
            unit: "MW".into(),
        },
        KpiCard {
            label: "Growth Rate".into(),
            value: metrics.growth_rate,
            unit: "%".into(),
        },
    ]
}
