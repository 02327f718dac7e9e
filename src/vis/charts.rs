//! Chart rendering with the plotters bitmap backend
//!
//! Each function renders one PNG from pre-computed aggregate tables (or,
//! for the scatter, from the enriched records directly). Empty inputs
//! produce no file.

use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;

use crate::analysis;
use crate::error::{Error, Result};
use crate::groupby::{AggTable, GroupBy};
use crate::model::EnrichedRecord;
use crate::report::{count, money_whole, percent};
use crate::vis::config::PlotSettings;

fn viz<E: std::fmt::Display>(err: E) -> Error {
    Error::Visualization(err.to_string())
}

/// Value range with a 5% margin on each side, floored at zero for
/// all-positive data
fn value_range(values: &[f64]) -> (f64, f64) {
    let min = values.iter().fold(f64::INFINITY, |a, &b| a.min(b));
    let max = values.iter().fold(f64::NEG_INFINITY, |a, &b| a.max(b));
    let span = (max - min).abs().max(1.0);
    let low = if min >= 0.0 { 0.0 } else { min - span * 0.05 };
    (low, max + span * 0.05)
}

/// Draw one bar panel for a table column
fn bar_panel(
    area: &DrawingArea<BitMapBackend<'_>, Shift>,
    title: &str,
    y_label: &str,
    labels: &[String],
    values: &[f64],
    settings: &PlotSettings,
    color_index: usize,
) -> Result<()> {
    let (y_min, y_max) = value_range(values);
    let mut chart = ChartBuilder::on(area)
        .caption(title, ("sans-serif", 22).into_font())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d((0..labels.len()).into_segmented(), y_min..y_max)
        .map_err(viz)?;

    let mut mesh = chart.configure_mesh();
    if !settings.show_grid {
        mesh.disable_mesh();
    }
    mesh.disable_x_mesh()
        .x_labels(labels.len())
        .x_label_formatter(&|seg| match seg {
            SegmentValue::CenterOf(i) => labels.get(*i).cloned().unwrap_or_default(),
            _ => String::new(),
        })
        .y_desc(y_label)
        .draw()
        .map_err(viz)?;

    let (r, g, b) = settings.color(color_index);
    let color = RGBColor(r, g, b);
    chart
        .draw_series(values.iter().enumerate().map(|(i, &v)| {
            Rectangle::new(
                [
                    (SegmentValue::Exact(i), 0.0),
                    (SegmentValue::Exact(i + 1), v),
                ],
                color.filled(),
            )
        }))
        .map_err(viz)?;

    Ok(())
}

/// Draw one line panel over sequential period labels
fn line_panel(
    area: &DrawingArea<BitMapBackend<'_>, Shift>,
    title: &str,
    y_label: &str,
    labels: &[String],
    values: &[f64],
    settings: &PlotSettings,
    color_index: usize,
) -> Result<()> {
    let (y_min, y_max) = value_range(values);
    let x_max = (labels.len().saturating_sub(1)).max(1) as f64;
    let mut chart = ChartBuilder::on(area)
        .caption(title, ("sans-serif", 22).into_font())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0f64..x_max, y_min..y_max)
        .map_err(viz)?;

    let mut mesh = chart.configure_mesh();
    if !settings.show_grid {
        mesh.disable_mesh();
    }
    mesh.x_labels(labels.len().min(12))
        .x_label_formatter(&|x| {
            let i = x.round();
            if i < 0.0 {
                return String::new();
            }
            labels.get(i as usize).cloned().unwrap_or_default()
        })
        .y_desc(y_label)
        .draw()
        .map_err(viz)?;

    let (r, g, b) = settings.color(color_index);
    let color = RGBColor(r, g, b);
    chart
        .draw_series(LineSeries::new(
            values.iter().enumerate().map(|(i, &v)| (i as f64, v)),
            color.stroke_width(2),
        ))
        .map_err(viz)?;
    chart
        .draw_series(
            values
                .iter()
                .enumerate()
                .map(|(i, &v)| Circle::new((i as f64, v), 3, color.filled())),
        )
        .map_err(viz)?;

    Ok(())
}

/// Month-over-month sales, profit, margin and order count panels
pub fn monthly_trend_charts<P: AsRef<Path>>(
    trends: &AggTable,
    path: P,
    settings: &PlotSettings,
) -> Result<()> {
    if trends.is_empty() {
        return Ok(());
    }
    let labels: Vec<String> = trends.rows.iter().map(|r| r.key.clone()).collect();
    let panels = [
        ("Monthly Sales Trend", "Sales ($)", "Monthly_Sales"),
        ("Monthly Profit Trend", "Profit ($)", "Monthly_Profit"),
        ("Monthly Profit Margin Trend", "Margin (%)", "Monthly_Margin"),
        ("Monthly Order Count", "Orders", "Monthly_Orders"),
    ];

    let root = BitMapBackend::new(path.as_ref(), (settings.width, settings.height))
        .into_drawing_area();
    root.fill(&WHITE).map_err(viz)?;
    let areas = root.split_evenly((2, 2));

    for (i, (title, y_label, column)) in panels.iter().enumerate() {
        let values = trends.column_values(column)?;
        line_panel(&areas[i], title, y_label, &labels, &values, settings, i)?;
    }
    root.present().map_err(viz)?;
    Ok(())
}

/// Category bars: total sales, total profit, mean margin and order counts
pub fn category_performance_chart<P: AsRef<Path>>(
    categories: &AggTable,
    path: P,
    settings: &PlotSettings,
) -> Result<()> {
    if categories.is_empty() {
        return Ok(());
    }
    let labels: Vec<String> = categories.rows.iter().map(|r| r.key.clone()).collect();
    let panels = [
        ("Total Sales by Category", "Sales ($)", "Total_Sales"),
        ("Total Profit by Category", "Profit ($)", "Total_Profit"),
        (
            "Average Profit Margin by Category",
            "Margin (%)",
            "Avg_Profit_Margin",
        ),
        ("Order Count by Category", "Orders", "Order_Count"),
    ];

    let root = BitMapBackend::new(path.as_ref(), (settings.width, settings.height))
        .into_drawing_area();
    root.fill(&WHITE).map_err(viz)?;
    let areas = root.split_evenly((2, 2));

    for (i, (title, y_label, column)) in panels.iter().enumerate() {
        let values = categories.column_values(column)?;
        bar_panel(&areas[i], title, y_label, &labels, &values, settings, i)?;
    }
    root.present().map_err(viz)?;
    Ok(())
}

/// Regional bars: total sales and mean margin side by side
pub fn regional_performance_chart<P: AsRef<Path>>(
    regions: &AggTable,
    path: P,
    settings: &PlotSettings,
) -> Result<()> {
    if regions.is_empty() {
        return Ok(());
    }
    let labels: Vec<String> = regions.rows.iter().map(|r| r.key.clone()).collect();

    let root = BitMapBackend::new(path.as_ref(), (settings.width, settings.height))
        .into_drawing_area();
    root.fill(&WHITE).map_err(viz)?;
    let areas = root.split_evenly((1, 2));

    let sales = regions.column_values("Total_Sales")?;
    bar_panel(
        &areas[0],
        "Total Sales by Region",
        "Sales ($)",
        &labels,
        &sales,
        settings,
        0,
    )?;
    let margins = regions.column_values("Avg_Profit_Margin")?;
    bar_panel(
        &areas[1],
        "Average Profit Margin by Region",
        "Margin (%)",
        &labels,
        &margins,
        settings,
        1,
    )?;
    root.present().map_err(viz)?;
    Ok(())
}

/// Scatter of total sales against total profit per sub-category, one
/// color per category
pub fn sales_profit_scatter<P: AsRef<Path>>(
    records: &[EnrichedRecord],
    path: P,
    settings: &PlotSettings,
) -> Result<()> {
    if records.is_empty() {
        return Ok(());
    }
    let gb = GroupBy::new(records, |r| r.record.sub_category.clone());
    let total_sales = gb.sum_by(|r| r.record.sales);
    let total_profit = gb.sum_by(|r| r.profit);
    // Category of a sub-category is the category of its first row
    let parents: Vec<String> = gb
        .keys()
        .iter()
        .map(|k| {
            gb.rows(k)
                .next()
                .map(|r| r.record.category.label().to_string())
                .unwrap_or_default()
        })
        .collect();

    let mut categories: Vec<String> = Vec::new();
    for parent in &parents {
        if !categories.contains(parent) {
            categories.push(parent.clone());
        }
    }

    let sales: Vec<f64> = total_sales.iter().map(|(_, v)| *v).collect();
    let profits: Vec<f64> = total_profit.iter().map(|(_, v)| *v).collect();
    let (x_min, x_max) = value_range(&sales);
    let (y_min, y_max) = value_range(&profits);

    let root = BitMapBackend::new(path.as_ref(), (settings.width, settings.height))
        .into_drawing_area();
    root.fill(&WHITE).map_err(viz)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            "Sales vs Profit by Sub-Category",
            ("sans-serif", 24).into_font(),
        )
        .margin(10)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)
        .map_err(viz)?;

    chart
        .configure_mesh()
        .x_desc("Total Sales ($)")
        .y_desc("Total Profit ($)")
        .draw()
        .map_err(viz)?;

    for (ci, category) in categories.iter().enumerate() {
        let (r, g, b) = settings.color(ci);
        let color = RGBColor(r, g, b);
        let points: Vec<(f64, f64)> = parents
            .iter()
            .enumerate()
            .filter(|(_, parent)| *parent == category)
            .map(|(i, _)| (sales[i], profits[i]))
            .collect();
        chart
            .draw_series(
                points
                    .into_iter()
                    .map(|(x, y)| Circle::new((x, y), 5, color.filled())),
            )
            .map_err(viz)?
            .label(category.clone())
            .legend(move |(x, y)| Circle::new((x, y), 5, color.filled()));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(viz)?;

    root.present().map_err(viz)?;
    Ok(())
}

/// Quarterly sales and profit bars, stacked vertically
pub fn seasonal_analysis_chart<P: AsRef<Path>>(
    quarterly: &AggTable,
    path: P,
    settings: &PlotSettings,
) -> Result<()> {
    if quarterly.is_empty() {
        return Ok(());
    }
    let labels: Vec<String> = quarterly.rows.iter().map(|r| r.key.clone()).collect();

    let root = BitMapBackend::new(path.as_ref(), (settings.width, settings.height))
        .into_drawing_area();
    root.fill(&WHITE).map_err(viz)?;
    let areas = root.split_evenly((2, 1));

    let sales = quarterly.column_values("Quarterly_Sales")?;
    bar_panel(
        &areas[0],
        "Quarterly Sales Performance",
        "Sales ($)",
        &labels,
        &sales,
        settings,
        0,
    )?;
    let profit = quarterly.column_values("Quarterly_Profit")?;
    bar_panel(
        &areas[1],
        "Quarterly Profit Performance",
        "Profit ($)",
        &labels,
        &profit,
        settings,
        2,
    )?;
    root.present().map_err(viz)?;
    Ok(())
}

/// Total sales bars in weekday order, Monday through Sunday
pub fn weekday_analysis_chart<P: AsRef<Path>>(
    weekdays: &AggTable,
    path: P,
    settings: &PlotSettings,
) -> Result<()> {
    if weekdays.is_empty() {
        return Ok(());
    }
    let labels: Vec<String> = weekdays.rows.iter().map(|r| r.key.clone()).collect();

    let root = BitMapBackend::new(path.as_ref(), (settings.width, settings.height))
        .into_drawing_area();
    root.fill(&WHITE).map_err(viz)?;

    let sales = weekdays.column_values("Total_Sales")?;
    bar_panel(
        &root,
        "Sales by Day of Week",
        "Sales ($)",
        &labels,
        &sales,
        settings,
        1,
    )?;
    root.present().map_err(viz)?;
    Ok(())
}

/// Segment panels: sales, profit, order counts and mean margin
pub fn customer_segment_chart<P: AsRef<Path>>(
    segments: &AggTable,
    path: P,
    settings: &PlotSettings,
) -> Result<()> {
    if segments.is_empty() {
        return Ok(());
    }
    let labels: Vec<String> = segments.rows.iter().map(|r| r.key.clone()).collect();
    let panels = [
        ("Sales by Customer Segment", "Sales ($)", "Total_Sales"),
        ("Profit by Customer Segment", "Profit ($)", "Total_Profit"),
        ("Order Count by Customer Segment", "Orders", "Order_Count"),
        (
            "Average Profit Margin by Customer Segment",
            "Margin (%)",
            "Avg_Profit_Margin",
        ),
    ];

    let root = BitMapBackend::new(path.as_ref(), (settings.width, settings.height))
        .into_drawing_area();
    root.fill(&WHITE).map_err(viz)?;
    let areas = root.split_evenly((2, 2));

    for (i, (title, y_label, column)) in panels.iter().enumerate() {
        let values = segments.column_values(column)?;
        bar_panel(&areas[i], title, y_label, &labels, &values, settings, i)?;
    }
    root.present().map_err(viz)?;
    Ok(())
}

/// Single-page dashboard: headline metrics above six summary panels
pub fn summary_dashboard<P: AsRef<Path>>(
    records: &[EnrichedRecord],
    path: P,
    settings: &PlotSettings,
) -> Result<()> {
    if records.is_empty() {
        return Ok(());
    }

    let metrics = analysis::OverallMetrics::compute(records);
    let categories = analysis::category_performance(records)?;
    let regions = analysis::regional_performance(records)?;
    let segments = analysis::segment_performance(records)?;
    let monthly = analysis::monthly_trends(records)?;
    let mut subcategories = analysis::subcategory_performance(records)?;
    subcategories.truncate(5);

    let root = BitMapBackend::new(path.as_ref(), (settings.width, settings.height))
        .into_drawing_area();
    root.fill(&WHITE).map_err(viz)?;

    let (header, body) = root.split_vertically((settings.height / 4) as i32);
    header
        .draw(&Text::new(
            "SALES OPTIMIZATION DASHBOARD",
            (20, 10),
            ("sans-serif", 28).into_font(),
        ))
        .map_err(viz)?;
    let metric_font = ("sans-serif", 18).into_font();
    let lines = [
        format!("Total Sales: {}", money_whole(metrics.total_sales)),
        format!("Total Profit: {}", money_whole(metrics.total_profit)),
        format!("Average Margin: {}", percent(metrics.avg_margin)),
        format!("Total Orders: {}", count(metrics.distinct_orders)),
    ];
    for (i, line) in lines.iter().enumerate() {
        header
            .draw(&Text::new(
                line.clone(),
                (20, 52 + 24 * i as i32),
                metric_font.clone(),
            ))
            .map_err(viz)?;
    }

    let areas = body.split_evenly((2, 3));
    let category_labels: Vec<String> = categories.rows.iter().map(|r| r.key.clone()).collect();
    let region_labels: Vec<String> = regions.rows.iter().map(|r| r.key.clone()).collect();
    let segment_labels: Vec<String> = segments.rows.iter().map(|r| r.key.clone()).collect();
    let month_labels: Vec<String> = monthly.rows.iter().map(|r| r.key.clone()).collect();
    let subcategory_labels: Vec<String> =
        subcategories.rows.iter().map(|r| r.key.clone()).collect();

    bar_panel(
        &areas[0],
        "Sales by Category",
        "Sales ($)",
        &category_labels,
        &categories.column_values("Total_Sales")?,
        settings,
        0,
    )?;
    bar_panel(
        &areas[1],
        "Sales by Region",
        "Sales ($)",
        &region_labels,
        &regions.column_values("Total_Sales")?,
        settings,
        1,
    )?;
    line_panel(
        &areas[2],
        "Monthly Sales Trend",
        "Sales ($)",
        &month_labels,
        &monthly.column_values("Monthly_Sales")?,
        settings,
        2,
    )?;
    bar_panel(
        &areas[3],
        "Profit Margin by Category",
        "Margin (%)",
        &category_labels,
        &categories.column_values("Avg_Profit_Margin")?,
        settings,
        3,
    )?;
    bar_panel(
        &areas[4],
        "Sales by Customer Segment",
        "Sales ($)",
        &segment_labels,
        &segments.column_values("Total_Sales")?,
        settings,
        4,
    )?;
    bar_panel(
        &areas[5],
        "Top 5 Sub-Categories",
        "Sales ($)",
        &subcategory_labels,
        &subcategories.column_values("Total_Sales")?,
        settings,
        5,
    )?;

    root.present().map_err(viz)?;
    Ok(())
}

/// Render the whole chart suite into a directory, creating it if needed
pub fn render_all<P: AsRef<Path>>(
    records: &[EnrichedRecord],
    dir: P,
    settings: &PlotSettings,
) -> Result<Vec<String>> {
    let dir = dir.as_ref();
    std::fs::create_dir_all(dir)?;

    let monthly = analysis::monthly_trends(records)?;
    let categories = analysis::category_performance(records)?;
    let regions = analysis::regional_performance(records)?;
    let quarterly = analysis::quarterly_trends(records)?;
    let weekdays = analysis::weekday_analysis(records)?;
    let segments = analysis::segment_performance(records)?;

    monthly_trend_charts(&monthly, dir.join("monthly_trends.png"), settings)?;
    category_performance_chart(&categories, dir.join("category_performance.png"), settings)?;
    regional_performance_chart(&regions, dir.join("regional_performance.png"), settings)?;
    sales_profit_scatter(records, dir.join("sales_vs_profit_scatter.png"), settings)?;
    seasonal_analysis_chart(&quarterly, dir.join("seasonal_analysis.png"), settings)?;
    weekday_analysis_chart(&weekdays, dir.join("day_of_week_analysis.png"), settings)?;
    customer_segment_chart(&segments, dir.join("customer_segment_analysis.png"), settings)?;
    summary_dashboard(records, dir.join("summary_dashboard.png"), settings)?;

    let mut written = Vec::new();
    for name in [
        "monthly_trends.png",
        "category_performance.png",
        "regional_performance.png",
        "sales_vs_profit_scatter.png",
        "seasonal_analysis.png",
        "day_of_week_analysis.png",
        "customer_segment_analysis.png",
        "summary_dashboard.png",
    ] {
        if dir.join(name).exists() {
            written.push(name.to_string());
        }
    }
    Ok(written)
}
