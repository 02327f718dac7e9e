//! Grouped analyses over the enriched dataset
//!
//! Each analysis is a single-pass aggregation producing an `AggTable`
//! (and occasionally a small summary struct) that the reporting layer
//! formats into text and spreadsheet output.

use std::collections::HashSet;

use chrono::NaiveDate;

use crate::model::EnrichedRecord;

pub mod performance;
pub mod portfolio;
pub mod profitability;
pub mod trends;

pub use performance::{
    category_performance, customer_value, region_category_matrix, regional_performance,
    segment_performance, state_performance, subcategory_performance,
};
pub use portfolio::{product_matrix, PortfolioMatrix, Quadrant};
pub use profitability::{
    customer_profitability, customer_table, profit_stars, profit_traps,
    regional_efficiency, subcategory_profit, CustomerSummary,
};
pub use trends::{monthly_trends, quarterly_trends, weekday_analysis};

/// Dataset-wide headline metrics
#[derive(Debug, Clone, PartialEq)]
pub struct OverallMetrics {
    pub row_count: usize,
    pub total_sales: f64,
    pub total_profit: f64,
    /// Mean profit margin across rows; 0 for an empty dataset
    pub avg_margin: f64,
    pub distinct_orders: usize,
    pub distinct_customers: usize,
    pub loss_orders: usize,
    /// Share of rows with negative profit, in percent
    pub loss_share: f64,
    /// Total profit of loss-making rows (negative or zero)
    pub loss_total: f64,
    pub first_order: Option<NaiveDate>,
    pub last_order: Option<NaiveDate>,
}

impl OverallMetrics {
    /// Compute headline metrics in one pass
    pub fn compute(records: &[EnrichedRecord]) -> Self {
        let row_count = records.len();
        let total_sales: f64 = records.iter().map(|r| r.record.sales).sum();
        let total_profit: f64 = records.iter().map(|r| r.profit).sum();
        let avg_margin = if row_count == 0 {
            0.0
        } else {
            records.iter().map(|r| r.profit_margin).sum::<f64>() / row_count as f64
        };

        let distinct_orders: HashSet<&str> =
            records.iter().map(|r| r.record.order_id.as_str()).collect();
        let distinct_customers: HashSet<&str> = records
            .iter()
            .map(|r| r.record.customer_id.as_str())
            .collect();

        let loss_rows: Vec<&EnrichedRecord> =
            records.iter().filter(|r| r.profit < 0.0).collect();
        let loss_orders = loss_rows.len();
        let loss_share = if row_count == 0 {
            0.0
        } else {
            loss_orders as f64 / row_count as f64 * 100.0
        };
        let loss_total: f64 = loss_rows.iter().map(|r| r.profit).sum();

        let first_order = records.iter().map(|r| r.record.order_date).min();
        let last_order = records.iter().map(|r| r.record.order_date).max();

        OverallMetrics {
            row_count,
            total_sales,
            total_profit,
            avg_margin,
            distinct_orders: distinct_orders.len(),
            distinct_customers: distinct_customers.len(),
            loss_orders,
            loss_share,
            loss_total,
            first_order,
            last_order,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }
}
