//! Static chart rendering for the analysis outputs

pub mod charts;
pub mod config;

pub use charts::{
    category_performance_chart, customer_segment_chart, monthly_trend_charts,
    regional_performance_chart, render_all, sales_profit_scatter, seasonal_analysis_chart,
    summary_dashboard, weekday_analysis_chart,
};
pub use config::PlotSettings;
