//! Performance summaries by category, region, segment and customer

use crate::error::Result;
use crate::groupby::{AggTable, GroupBy};
use crate::model::EnrichedRecord;

fn count_sum_mean_columns() -> Vec<String> {
    vec![
        "Order_Count".to_string(),
        "Total_Sales".to_string(),
        "Avg_Sales".to_string(),
        "Total_Profit".to_string(),
        "Avg_Profit".to_string(),
        "Avg_Profit_Margin".to_string(),
    ]
}

/// Shared shape of the category/region summaries: row count, sales
/// totals and means, profit totals and means, mean margin
fn performance_table<K, F, L>(
    records: &[EnrichedRecord],
    key_name: &str,
    key_fn: F,
    label_fn: L,
) -> Result<AggTable>
where
    K: std::fmt::Debug + Eq + std::hash::Hash + Clone,
    F: Fn(&EnrichedRecord) -> K,
    L: Fn(&K) -> String,
{
    let gb = GroupBy::new(records, key_fn);
    let counts = gb.sizes();
    let total_sales = gb.sum_by(|r| r.record.sales);
    let avg_sales = gb.mean_by(|r| r.record.sales);
    let total_profit = gb.sum_by(|r| r.profit);
    let avg_profit = gb.mean_by(|r| r.profit);
    let avg_margin = gb.mean_by(|r| r.profit_margin);

    let mut table = AggTable::new(key_name, count_sum_mean_columns());
    for i in 0..counts.len() {
        table.push_row(
            label_fn(&counts[i].0),
            vec![
                counts[i].1 as f64,
                total_sales[i].1,
                avg_sales[i].1,
                total_profit[i].1,
                avg_profit[i].1,
                avg_margin[i].1,
            ],
        )?;
    }
    table.sort_desc_by("Total_Sales")?;
    Ok(table)
}

/// Category-level performance, sorted by total sales
pub fn category_performance(records: &[EnrichedRecord]) -> Result<AggTable> {
    performance_table(
        records,
        "Category",
        |r| r.record.category.clone(),
        |k| k.label().to_string(),
    )
}

/// Regional performance, sorted by total sales
pub fn regional_performance(records: &[EnrichedRecord]) -> Result<AggTable> {
    performance_table(
        records,
        "Region",
        |r| r.record.region.clone(),
        |k| k.label().to_string(),
    )
}

/// Sub-category performance: sales, order count, profit, mean margin
pub fn subcategory_performance(records: &[EnrichedRecord]) -> Result<AggTable> {
    let gb = GroupBy::new(records, |r| r.record.sub_category.clone());
    let total_sales = gb.sum_by(|r| r.record.sales);
    let counts = gb.sizes();
    let total_profit = gb.sum_by(|r| r.profit);
    let avg_margin = gb.mean_by(|r| r.profit_margin);

    let mut table = AggTable::new(
        "Sub-Category",
        vec![
            "Total_Sales".to_string(),
            "Order_Count".to_string(),
            "Total_Profit".to_string(),
            "Avg_Profit_Margin".to_string(),
        ],
    );
    for i in 0..counts.len() {
        table.push_row(
            counts[i].0.clone(),
            vec![
                total_sales[i].1,
                counts[i].1 as f64,
                total_profit[i].1,
                avg_margin[i].1,
            ],
        )?;
    }
    table.sort_desc_by("Total_Sales")?;
    Ok(table)
}

/// Segment performance including distinct customer counts
pub fn segment_performance(records: &[EnrichedRecord]) -> Result<AggTable> {
    let gb = GroupBy::new(records, |r| r.record.segment.clone());
    let counts = gb.sizes();
    let total_sales = gb.sum_by(|r| r.record.sales);
    let avg_sales = gb.mean_by(|r| r.record.sales);
    let total_profit = gb.sum_by(|r| r.profit);
    let avg_profit = gb.mean_by(|r| r.profit);
    let avg_margin = gb.mean_by(|r| r.profit_margin);
    let customers = gb.distinct_by(|r| r.record.customer_id.clone());

    let mut columns = count_sum_mean_columns();
    columns.push("Unique_Customers".to_string());

    let mut table = AggTable::new("Segment", columns);
    for i in 0..counts.len() {
        table.push_row(
            counts[i].0.label().to_string(),
            vec![
                counts[i].1 as f64,
                total_sales[i].1,
                avg_sales[i].1,
                total_profit[i].1,
                avg_profit[i].1,
                avg_margin[i].1,
                customers[i].1 as f64,
            ],
        )?;
    }
    table.sort_desc_by("Total_Sales")?;
    Ok(table)
}

/// Region × category performance matrix
pub fn region_category_matrix(records: &[EnrichedRecord]) -> Result<AggTable> {
    let gb = GroupBy::new(records, |r| {
        (r.record.region.clone(), r.record.category.clone())
    });
    let total_sales = gb.sum_by(|r| r.record.sales);
    let total_profit = gb.sum_by(|r| r.profit);
    let avg_margin = gb.mean_by(|r| r.profit_margin);
    let orders = gb.distinct_by(|r| r.record.order_id.clone());

    let mut table = AggTable::new(
        "Region / Category",
        vec![
            "Sales".to_string(),
            "Profit".to_string(),
            "Avg_Margin".to_string(),
            "Orders".to_string(),
        ],
    );
    for i in 0..total_sales.len() {
        let (region, category) = &total_sales[i].0;
        table.push_row(
            format!("{} / {}", region.label(), category.label()),
            vec![
                total_sales[i].1,
                total_profit[i].1,
                avg_margin[i].1,
                orders[i].1 as f64,
            ],
        )?;
    }
    table.sort_desc_by("Sales")?;
    Ok(table)
}

/// State-level sales and profit; rows without a state are left out,
/// and an export without the column yields an empty table
pub fn state_performance(records: &[EnrichedRecord]) -> Result<AggTable> {
    let with_state: Vec<&EnrichedRecord> = records
        .iter()
        .filter(|r| r.record.state.is_some())
        .collect();

    let gb = GroupBy::new(&with_state, |r| {
        r.record.state.clone().unwrap_or_default()
    });
    let total_sales = gb.sum_by(|r| r.record.sales);
    let total_profit = gb.sum_by(|r| r.profit);
    let avg_margin = gb.mean_by(|r| r.profit_margin);

    let mut table = AggTable::new(
        "State",
        vec![
            "Sales".to_string(),
            "Profit".to_string(),
            "Avg_Profit_Margin".to_string(),
        ],
    );
    for i in 0..total_sales.len() {
        table.push_row(
            total_sales[i].0.clone(),
            vec![total_sales[i].1, total_profit[i].1, avg_margin[i].1],
        )?;
    }
    table.sort_desc_by("Sales")?;
    Ok(table)
}

/// Per-customer sales, profit and distinct order counts
pub fn customer_value(records: &[EnrichedRecord]) -> Result<AggTable> {
    let gb = GroupBy::new(records, |r| r.record.customer_id.clone());
    let total_sales = gb.sum_by(|r| r.record.sales);
    let total_profit = gb.sum_by(|r| r.profit);
    let orders = gb.distinct_by(|r| r.record.order_id.clone());

    let mut table = AggTable::new(
        "Customer ID",
        vec![
            "Customer_Sales".to_string(),
            "Customer_Profit".to_string(),
            "Order_Count".to_string(),
        ],
    );
    for i in 0..total_sales.len() {
        table.push_row(
            total_sales[i].0.clone(),
            vec![total_sales[i].1, total_profit[i].1, orders[i].1 as f64],
        )?;
    }
    table.sort_desc_by("Customer_Sales")?;
    Ok(table)
}
