pub mod chart;
pub mod gauge;
pub mod heatmap;
pub mod kpi;
pub mod overview;

pub use chart::{history_chart, moving_average, HistoryChart};
pub use gauge::{GaugeBand, GaugeSpec};
pub use heatmap::{heatmap, top_regions, HeatmapView};
pub use kpi::{kpi_cards, KpiCard};
pub use overview::{overview, OverviewStats};
