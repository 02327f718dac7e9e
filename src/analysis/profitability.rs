//! Profitability analyses: traps, stars, customer tiers and regional
//! efficiency

use crate::error::Result;
use crate::groupby::{AggTable, GroupBy};
use crate::model::{BandThresholds, CustomerTier, EnrichedRecord};
use crate::stats;

/// Sub-category profitability: sales, profit, mean margin and distinct
/// order counts
pub fn subcategory_profit(records: &[EnrichedRecord]) -> Result<AggTable> {
    let gb = GroupBy::new(records, |r| r.record.sub_category.clone());
    let total_sales = gb.sum_by(|r| r.record.sales);
    let total_profit = gb.sum_by(|r| r.profit);
    let avg_margin = gb.mean_by(|r| r.profit_margin);
    let orders = gb.distinct_by(|r| r.record.order_id.clone());

    let mut table = AggTable::new(
        "Sub-Category",
        vec![
            "Total_Sales".to_string(),
            "Total_Profit".to_string(),
            "Avg_Profit_Margin".to_string(),
            "Order_Count".to_string(),
        ],
    );
    for i in 0..total_sales.len() {
        table.push_row(
            total_sales[i].0.clone(),
            vec![
                total_sales[i].1,
                total_profit[i].1,
                avg_margin[i].1,
                orders[i].1 as f64,
            ],
        )?;
    }
    table.sort_desc_by("Total_Sales")?;
    Ok(table)
}

/// Profit traps: sub-categories with above-median sales but mean margin
/// below the trap threshold
pub fn profit_traps(subcategories: &AggTable, trap_margin: f64) -> Result<AggTable> {
    let mut traps = subcategories.clone();
    if traps.is_empty() {
        return Ok(traps);
    }
    let sales_median = stats::median(&subcategories.column_values("Total_Sales")?)?;
    let sales_idx = traps.column_index("Total_Sales")?;
    let margin_idx = traps.column_index("Avg_Profit_Margin")?;
    traps.retain(|row| row.values[sales_idx] > sales_median && row.values[margin_idx] < trap_margin);
    traps.sort_desc_by("Total_Sales")?;
    Ok(traps)
}

/// Profit stars: above-median sales with mean margin above the star
/// threshold, sorted by total profit
pub fn profit_stars(subcategories: &AggTable, star_margin: f64) -> Result<AggTable> {
    let mut stars = subcategories.clone();
    if stars.is_empty() {
        return Ok(stars);
    }
    let sales_median = stats::median(&subcategories.column_values("Total_Sales")?)?;
    let sales_idx = stars.column_index("Total_Sales")?;
    let margin_idx = stars.column_index("Avg_Profit_Margin")?;
    stars.retain(|row| row.values[sales_idx] > sales_median && row.values[margin_idx] > star_margin);
    stars.sort_desc_by("Total_Profit")?;
    Ok(stars)
}

/// Per-customer profitability summary with tier classification
#[derive(Debug, Clone)]
pub struct CustomerSummary {
    pub customer_id: String,
    pub total_sales: f64,
    pub total_profit: f64,
    pub avg_margin: f64,
    pub order_count: usize,
    pub profit_per_order: f64,
    pub tier: CustomerTier,
}

/// Customer-level profitability, sorted by total profit descending
pub fn customer_profitability(
    records: &[EnrichedRecord],
    bands: &BandThresholds,
) -> Vec<CustomerSummary> {
    let gb = GroupBy::new(records, |r| r.record.customer_id.clone());
    let total_sales = gb.sum_by(|r| r.record.sales);
    let total_profit = gb.sum_by(|r| r.profit);
    let avg_margin = gb.mean_by(|r| r.profit_margin);
    let orders = gb.distinct_by(|r| r.record.order_id.clone());

    let mut summaries: Vec<CustomerSummary> = (0..total_sales.len())
        .map(|i| {
            let order_count = orders[i].1;
            let profit = total_profit[i].1;
            CustomerSummary {
                customer_id: total_sales[i].0.clone(),
                total_sales: total_sales[i].1,
                total_profit: profit,
                avg_margin: avg_margin[i].1,
                order_count,
                // Groups are non-empty, so order_count is at least 1
                profit_per_order: profit / order_count as f64,
                tier: CustomerTier::classify(profit, bands),
            }
        })
        .collect();

    summaries.sort_by(|a, b| {
        b.total_profit
            .partial_cmp(&a.total_profit)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    summaries
}

/// Render customer summaries as an aggregate table with a tier column
pub fn customer_table(summaries: &[CustomerSummary]) -> Result<AggTable> {
    let mut table = AggTable::new(
        "Customer ID",
        vec![
            "Total_Sales".to_string(),
            "Total_Profit".to_string(),
            "Avg_Profit_Margin".to_string(),
            "Order_Count".to_string(),
            "Profit_Per_Order".to_string(),
        ],
    )
    .with_tag_column("Profitability_Tier");

    for s in summaries {
        table.push_tagged_row(
            s.customer_id.clone(),
            vec![
                s.total_sales,
                s.total_profit,
                s.avg_margin,
                s.order_count as f64,
                s.profit_per_order,
            ],
            Some(s.tier.label().to_string()),
        )?;
    }
    Ok(table)
}

/// Regional efficiency metrics: totals, per-order figures and margins
pub fn regional_efficiency(records: &[EnrichedRecord]) -> Result<AggTable> {
    let gb = GroupBy::new(records, |r| r.record.region.clone());
    let total_sales = gb.sum_by(|r| r.record.sales);
    let avg_order_sales = gb.mean_by(|r| r.record.sales);
    let total_profit = gb.sum_by(|r| r.profit);
    let avg_order_profit = gb.mean_by(|r| r.profit);
    let avg_margin = gb.mean_by(|r| r.profit_margin);
    let orders = gb.distinct_by(|r| r.record.order_id.clone());

    let mut table = AggTable::new(
        "Region",
        vec![
            "Total_Sales".to_string(),
            "Avg_Order_Sales".to_string(),
            "Total_Profit".to_string(),
            "Avg_Order_Profit".to_string(),
            "Avg_Profit_Margin".to_string(),
            "Total_Orders".to_string(),
            "Sales_Per_Order".to_string(),
            "Profit_Per_Order".to_string(),
        ],
    );
    for i in 0..total_sales.len() {
        let order_count = orders[i].1 as f64;
        table.push_row(
            total_sales[i].0.label().to_string(),
            vec![
                total_sales[i].1,
                avg_order_sales[i].1,
                total_profit[i].1,
                avg_order_profit[i].1,
                avg_margin[i].1,
                order_count,
                total_sales[i].1 / order_count,
                total_profit[i].1 / order_count,
            ],
        )?;
    }
    table.sort_desc_by("Total_Sales")?;
    Ok(table)
}
