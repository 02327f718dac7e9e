//! Narrative recommendation reports built from the computed aggregates

use std::fmt::Write;

use chrono::Local;

use crate::analysis::{CustomerSummary, OverallMetrics, PortfolioMatrix, Quadrant};
use crate::config::ThresholdConfig;
use crate::error::Result;
use crate::groupby::AggTable;
use crate::report::{count, heading, money, money_whole, percent};

/// All computed aggregates a narrative report can draw from
#[derive(Debug)]
pub struct ReportContext<'a> {
    pub metrics: &'a OverallMetrics,
    /// Per-category performance
    pub categories: &'a AggTable,
    /// Per-region performance
    pub regions: &'a AggTable,
    /// Per-segment performance
    pub segments: &'a AggTable,
    /// Profit trap sub-categories
    pub traps: &'a AggTable,
    /// Per-customer profitability, sorted by total profit
    pub customers: &'a [CustomerSummary],
    /// Regional efficiency metrics
    pub efficiency: &'a AggTable,
    /// Four-quadrant product portfolio
    pub matrix: &'a PortfolioMatrix,
}

/// Row key with the highest value in a column, None on an empty table
fn max_row<'t>(table: &'t AggTable, column: &str) -> Result<Option<(&'t str, f64)>> {
    extreme_row(table, column, true)
}

/// Row key with the lowest value in a column, None on an empty table
fn min_row<'t>(table: &'t AggTable, column: &str) -> Result<Option<(&'t str, f64)>> {
    extreme_row(table, column, false)
}

fn extreme_row<'t>(table: &'t AggTable, column: &str, max: bool) -> Result<Option<(&'t str, f64)>> {
    let idx = table.column_index(column)?;
    let mut best: Option<(&str, f64)> = None;
    for row in &table.rows {
        let value = row.values[idx];
        let better = match best {
            None => true,
            Some((_, current)) => {
                if max {
                    value > current
                } else {
                    value < current
                }
            }
        };
        if better {
            best = Some((row.key.as_str(), value));
        }
    }
    Ok(best)
}

/// Actionable profitability recommendations
pub fn profitability_recommendations(
    ctx: &ReportContext<'_>,
    thresholds: &ThresholdConfig,
) -> Result<String> {
    let mut out = heading("PROFITABILITY OPTIMIZATION RECOMMENDATIONS");
    out.push('\n');

    if ctx.metrics.is_empty() {
        out.push_str("Dataset is empty; no recommendations available.\n");
        return Ok(out);
    }

    if !ctx.traps.is_empty() {
        let trap_sales = ctx.traps.column_total("Total_Sales")?;
        out.push_str("PRODUCT OPTIMIZATION:\n");
        writeln!(
            out,
            "  - Focus on {} profit trap sub-categories ({} in sales)",
            ctx.traps.row_count(),
            money_whole(trap_sales)
        )?;
        out.push_str("  - Consider price increases or cost reductions for low-margin items\n\n");
    }

    let loss_customers = ctx
        .customers
        .iter()
        .filter(|c| c.total_profit < 0.0)
        .count();
    if loss_customers > 0 {
        out.push_str("CUSTOMER OPTIMIZATION:\n");
        writeln!(
            out,
            "  - Review {} loss-making customers",
            count(loss_customers)
        )?;
        out.push_str("  - Implement minimum order values or service fees\n\n");
    }

    if let (Some((best, best_margin)), Some((worst, worst_margin))) = (
        max_row(ctx.efficiency, "Avg_Profit_Margin")?,
        min_row(ctx.efficiency, "Avg_Profit_Margin")?,
    ) {
        out.push_str("REGIONAL OPTIMIZATION:\n");
        writeln!(
            out,
            "  - Replicate the {} success model ({} margin)",
            best,
            percent(best_margin)
        )?;
        writeln!(
            out,
            "  - Improve {} operations ({} margin)",
            worst,
            percent(worst_margin)
        )?;
        out.push('\n');
    }

    let stars = ctx.matrix.members(Quadrant::Stars);
    let dogs = ctx.matrix.members(Quadrant::Dogs);
    if !stars.is_empty() || !dogs.is_empty() {
        out.push_str("PORTFOLIO OPTIMIZATION:\n");
        if !stars.is_empty() {
            writeln!(out, "  - Invest more in {} 'Star' products", stars.len())?;
        }
        if !dogs.is_empty() {
            writeln!(
                out,
                "  - Consider discontinuing {} 'Dog' products",
                dogs.len()
            )?;
        }
        out.push('\n');
    }

    if ctx.metrics.avg_margin < thresholds.target_margin {
        let potential =
            (thresholds.target_margin - ctx.metrics.avg_margin) / 100.0 * ctx.metrics.total_sales;
        out.push_str("PROFIT IMPROVEMENT POTENTIAL:\n");
        writeln!(out, "  - Current margin: {}", percent(ctx.metrics.avg_margin))?;
        writeln!(
            out,
            "  - Target margin: {}",
            percent(thresholds.target_margin)
        )?;
        writeln!(
            out,
            "  - Potential profit increase: {}",
            money_whole(potential)
        )?;
    }

    Ok(out)
}

/// One projected scenario in the financial impact analysis
struct ImpactScenario {
    name: &'static str,
    description: &'static str,
    /// Margin improvement in percentage points
    margin_improvement: f64,
    /// Sales growth in percent
    sales_growth: f64,
}

const SCENARIOS: [ImpactScenario; 3] = [
    ImpactScenario {
        name: "CONSERVATIVE",
        description: "Conservative implementation with minimal risk",
        margin_improvement: 2.0,
        sales_growth: 0.0,
    },
    ImpactScenario {
        name: "MODERATE",
        description: "Moderate implementation with balanced risk/reward",
        margin_improvement: 4.5,
        sales_growth: 2.0,
    },
    ImpactScenario {
        name: "AGGRESSIVE",
        description: "Aggressive implementation with higher risk but maximum reward",
        margin_improvement: 7.0,
        sales_growth: 5.0,
    },
];

/// Full business recommendations report: executive summary, opportunities,
/// strategy horizons, projected impact and roadmap
pub fn business_report(ctx: &ReportContext<'_>, thresholds: &ThresholdConfig) -> Result<String> {
    let mut out = heading("BUSINESS RECOMMENDATIONS REPORT");
    writeln!(out, "Generated: {}\n", Local::now().format("%Y-%m-%d %H:%M:%S"))?;

    if ctx.metrics.is_empty() {
        out.push_str("Dataset is empty; no report available.\n");
        return Ok(out);
    }

    write_executive_summary(&mut out, ctx)?;
    write_opportunities(&mut out, ctx, thresholds)?;
    write_strategy_horizons(&mut out)?;
    write_financial_impact(&mut out, ctx.metrics)?;
    write_kpis(&mut out)?;

    out.push_str(&heading("CONCLUSION"));
    out.push_str(
        "\nThe analysis identifies opportunities for profit optimization across\n\
         product pricing, customer management and regional operations. The\n\
         recommended strategies provide a path to improved profitability while\n\
         maintaining sales growth. Success depends on systematic execution of\n\
         the roadmap and continuous monitoring of the key indicators above.\n",
    );

    Ok(out)
}

fn write_executive_summary(out: &mut String, ctx: &ReportContext<'_>) -> Result<()> {
    let m = ctx.metrics;
    out.push_str(&heading("EXECUTIVE SUMMARY"));
    out.push_str("\nOVERALL PERFORMANCE:\n");
    writeln!(out, "  - Total Sales: {}", money(m.total_sales))?;
    writeln!(out, "  - Total Profit: {}", money(m.total_profit))?;
    writeln!(out, "  - Average Profit Margin: {}", percent(m.avg_margin))?;
    writeln!(out, "  - Total Orders: {}", count(m.distinct_orders))?;
    writeln!(out, "  - Unique Customers: {}", count(m.distinct_customers))?;

    out.push_str("\nTOP PERFORMERS:\n");
    if let Some((category, sales)) = max_row(ctx.categories, "Total_Sales")? {
        writeln!(out, "  - Best Category: {} ({})", category, money(sales))?;
    }
    if let Some((region, sales)) = max_row(ctx.regions, "Total_Sales")? {
        writeln!(out, "  - Best Region: {} ({})", region, money(sales))?;
    }
    if let Some((segment, sales)) = max_row(ctx.segments, "Total_Sales")? {
        writeln!(out, "  - Best Segment: {} ({})", segment, money(sales))?;
    }

    out.push_str("\nKEY FINDINGS:\n");
    writeln!(
        out,
        "  - {} loss-making orders ({})",
        count(m.loss_orders),
        percent(m.loss_share)
    )?;
    if let (Some((_, lowest)), Some((_, highest))) = (
        min_row(ctx.categories, "Avg_Profit_Margin")?,
        max_row(ctx.categories, "Avg_Profit_Margin")?,
    ) {
        writeln!(
            out,
            "  - Profit margin varies across categories ({} to {})",
            percent(lowest),
            percent(highest)
        )?;
    }
    out.push_str("  - Regional performance gaps present optimization opportunities\n\n");
    Ok(())
}

fn write_opportunities(
    out: &mut String,
    ctx: &ReportContext<'_>,
    thresholds: &ThresholdConfig,
) -> Result<()> {
    out.push_str(&heading("PROFIT OPTIMIZATION OPPORTUNITIES"));
    out.push('\n');
    let mut index = 0;

    if !ctx.traps.is_empty() {
        index += 1;
        let trap_sales = ctx.traps.column_total("Total_Sales")?;
        writeln!(out, "{index}. PROFIT TRAP PRODUCTS")?;
        writeln!(
            out,
            "   {} sub-categories with high sales but margins below {}",
            ctx.traps.row_count(),
            percent(thresholds.trap_margin)
        )?;
        writeln!(out, "   Impact: {} in sales at risk", money_whole(trap_sales))?;
        out.push_str(
            "   Action: review pricing strategy, negotiate supplier terms, or\n\
             change the product mix\n\n",
        );
    }

    let loss_total: f64 = ctx
        .customers
        .iter()
        .filter(|c| c.total_profit < 0.0)
        .map(|c| c.total_profit)
        .sum();
    let loss_count = ctx
        .customers
        .iter()
        .filter(|c| c.total_profit < 0.0)
        .count();
    if loss_count > 0 {
        index += 1;
        writeln!(out, "{index}. LOSS-MAKING CUSTOMERS")?;
        writeln!(out, "   {} customers generating losses", count(loss_count))?;
        writeln!(out, "   Impact: {} in losses", money_whole(loss_total.abs()))?;
        out.push_str(
            "   Action: implement minimum order values, service fees, or\n\
             customer tier pricing\n\n",
        );
    }

    if let (Some((best, best_margin)), Some((worst, worst_margin))) = (
        max_row(ctx.efficiency, "Avg_Profit_Margin")?,
        min_row(ctx.efficiency, "Avg_Profit_Margin")?,
    ) {
        let gap = best_margin - worst_margin;
        if gap > thresholds.regional_gap {
            index += 1;
            writeln!(out, "{index}. REGIONAL PERFORMANCE GAP")?;
            writeln!(
                out,
                "   {} margin difference between best and worst regions",
                percent(gap)
            )?;
            writeln!(out, "   Impact: potential to improve {worst} performance")?;
            writeln!(out, "   Action: replicate {best} best practices in {worst}\n")?;
        }
    }

    if index == 0 {
        out.push_str("No significant optimization opportunities identified.\n\n");
    }
    Ok(())
}

fn write_strategy_horizons(out: &mut String) -> Result<()> {
    out.push_str(&heading("STRATEGIC RECOMMENDATIONS"));

    out.push_str("\nIMMEDIATE ACTIONS (0-3 months):\n");
    out.push_str(
        "1. Pricing Review\n\
            Review and adjust pricing for low-margin, high-volume products\n\
         2. Minimum Order Implementation\n\
            Introduce minimum order values for loss-making customer segments\n\
         3. Cost Reduction Initiative\n\
            Negotiate better terms with suppliers for profit trap categories\n",
    );

    out.push_str("\nSHORT-TERM INITIATIVES (3-6 months):\n");
    out.push_str(
        "1. Regional Best Practice Rollout\n\
            Apply successful regional strategies across underperforming regions\n\
         2. Customer Segmentation Enhancement\n\
            Develop tiered pricing and service models based on customer profitability\n\
         3. Product Portfolio Optimization\n\
            Phase out or reposition low-performing products\n",
    );

    out.push_str("\nLONG-TERM STRATEGY (6-12 months):\n");
    out.push_str(
        "1. Category Expansion\n\
            Expand high-margin categories and reduce dependency on low-margin ones\n\
         2. Private Label Development\n\
            Develop private label products in high-volume, low-margin categories\n\
         3. Advanced Analytics Implementation\n\
            Introduce dynamic pricing and demand forecasting\n\n",
    );
    Ok(())
}

fn write_financial_impact(out: &mut String, metrics: &OverallMetrics) -> Result<()> {
    out.push_str(&heading("FINANCIAL IMPACT ANALYSIS"));
    out.push('\n');

    let current_margin = if metrics.total_sales > 0.0 {
        metrics.total_profit / metrics.total_sales * 100.0
    } else {
        0.0
    };

    for scenario in &SCENARIOS {
        let new_margin = current_margin + scenario.margin_improvement;
        let new_sales = metrics.total_sales * (1.0 + scenario.sales_growth / 100.0);
        let new_profit = new_sales * new_margin / 100.0;
        let increase = new_profit - metrics.total_profit;

        writeln!(out, "{} SCENARIO:", scenario.name)?;
        writeln!(out, "{}", scenario.description)?;
        writeln!(out, "  - New Profit Margin: {}", percent(new_margin))?;
        writeln!(out, "  - Projected Sales: {}", money(new_sales))?;
        writeln!(out, "  - Projected Profit: {}", money(new_profit))?;
        writeln!(out, "  - Profit Increase: {}\n", money(increase))?;
    }
    Ok(())
}

fn write_kpis(out: &mut String) -> Result<()> {
    out.push_str(&heading("SUCCESS METRICS & KPIS"));
    out.push_str(
        "\nKey indicators to track:\n\
         - Overall profit margin improvement\n\
         - Revenue per customer increase\n\
         - Regional performance convergence\n\
         - Loss-making order reduction\n\
         \n\
         Monitoring schedule:\n\
         - Weekly: pricing and margin tracking\n\
         - Monthly: customer and regional performance\n\
         - Quarterly: strategic initiative progress\n\n",
    );
    Ok(())
}
