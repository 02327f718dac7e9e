//! Time trends: monthly, quarterly and day-of-week aggregates

use crate::error::Result;
use crate::groupby::{AggTable, GroupBy};
use crate::model::EnrichedRecord;
use crate::temporal::{weekday_name, WEEKDAY_ORDER};

/// Month-over-month sales, profit, margin and order counts
///
/// Keys are `YYYY-MM` labels sorted chronologically.
pub fn monthly_trends(records: &[EnrichedRecord]) -> Result<AggTable> {
    let gb = GroupBy::new(records, |r| format!("{:04}-{:02}", r.year, r.month));
    period_trends(gb, "Month", "Monthly")
}

/// Quarter-over-quarter sales, profit, margin and order counts
///
/// Keys are `YYYY-Qn` labels sorted chronologically.
pub fn quarterly_trends(records: &[EnrichedRecord]) -> Result<AggTable> {
    let gb = GroupBy::new(records, |r| format!("{:04}-Q{}", r.year, r.quarter));
    period_trends(gb, "Quarter", "Quarterly")
}

fn period_trends(
    gb: GroupBy<'_, String, EnrichedRecord>,
    key_name: &str,
    prefix: &str,
) -> Result<AggTable> {
    let sales = gb.sum_by(|r| r.record.sales);
    let profit = gb.sum_by(|r| r.profit);
    let margin = gb.mean_by(|r| r.profit_margin);
    let orders = gb.distinct_by(|r| r.record.order_id.clone());

    let mut table = AggTable::new(
        key_name,
        vec![
            format!("{prefix}_Sales"),
            format!("{prefix}_Profit"),
            format!("{prefix}_Margin"),
            format!("{prefix}_Orders"),
        ],
    );
    for i in 0..sales.len() {
        table.push_row(
            sales[i].0.clone(),
            vec![sales[i].1, profit[i].1, margin[i].1, orders[i].1 as f64],
        )?;
    }
    // Zero-padded period labels sort chronologically
    table.sort_asc_by_key();
    Ok(table)
}

/// Sales patterns by day of week, Monday through Sunday
///
/// Days with no orders in the dataset are omitted.
pub fn weekday_analysis(records: &[EnrichedRecord]) -> Result<AggTable> {
    let gb = GroupBy::new(records, |r| r.day_of_week);
    let total_sales = gb.sum_by(|r| r.record.sales);
    let avg_sales = gb.mean_by(|r| r.record.sales);
    let total_profit = gb.sum_by(|r| r.profit);
    let orders = gb.distinct_by(|r| r.record.order_id.clone());

    let mut table = AggTable::new(
        "Day_of_Week",
        vec![
            "Total_Sales".to_string(),
            "Avg_Sales".to_string(),
            "Total_Profit".to_string(),
            "Order_Count".to_string(),
        ],
    );
    for day in WEEKDAY_ORDER {
        let Some(i) = total_sales.iter().position(|(d, _)| *d == day) else {
            continue;
        };
        table.push_row(
            weekday_name(day),
            vec![
                total_sales[i].1,
                avg_sales[i].1,
                total_profit[i].1,
                orders[i].1 as f64,
            ],
        )?;
    }
    Ok(table)
}
