//! Final project summary with a deliverables inventory

use std::fmt::Write;
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::analysis::OverallMetrics;
use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::report::{count, heading, money, percent};

const CHART_FILES: [&str; 8] = [
    "monthly_trends.png",
    "category_performance.png",
    "regional_performance.png",
    "sales_vs_profit_scatter.png",
    "seasonal_analysis.png",
    "day_of_week_analysis.png",
    "customer_segment_analysis.png",
    "summary_dashboard.png",
];

const REPORT_FILES: [&str; 4] = [
    "eda_summary_tables.xlsx",
    "profitability_analysis.xlsx",
    "profitability_recommendations.txt",
    "business_recommendations_report.txt",
];

fn file_size_label(path: &Path) -> String {
    match std::fs::metadata(path) {
        Ok(meta) => {
            let bytes = meta.len();
            if bytes > 1024 * 1024 {
                format!(" ({:.1} MB)", bytes as f64 / (1024.0 * 1024.0))
            } else if bytes > 1024 {
                format!(" ({:.1} KB)", bytes as f64 / 1024.0)
            } else {
                format!(" ({bytes} bytes)")
            }
        }
        Err(_) => String::new(),
    }
}

fn inventory_section(out: &mut String, title: &str, paths: &[PathBuf]) -> Result<()> {
    let present: Vec<&PathBuf> = paths.iter().filter(|p| p.exists()).collect();
    if present.is_empty() {
        return Ok(());
    }
    writeln!(out, "\n{title}:")?;
    for path in present {
        writeln!(out, "  - {}{}", path.display(), file_size_label(path))?;
    }
    Ok(())
}

/// Full project summary: dataset metrics, pipeline steps completed and an
/// inventory of the files the run produced
pub fn final_summary(metrics: &OverallMetrics, config: &AnalysisConfig) -> Result<String> {
    let mut out = heading("SALES OPTIMIZATION ANALYSIS");
    writeln!(out, "Final Summary Report")?;
    writeln!(out, "Generated: {}\n", Local::now().format("%Y-%m-%d %H:%M:%S"))?;

    out.push_str(&heading("PROJECT OVERVIEW"));
    out.push_str(
        "\nBatch analysis of the superstore sales dataset: cleaning, synthetic\n\
         profit enrichment, grouped aggregates, profitability analysis, chart\n\
         rendering and business recommendations.\n\n",
    );

    out.push_str(&heading("DATASET SUMMARY"));
    if metrics.is_empty() {
        out.push_str("\nDataset is empty.\n\n");
    } else {
        out.push('\n');
        writeln!(out, "  - Rows: {}", count(metrics.row_count))?;
        if let (Some(first), Some(last)) = (metrics.first_order, metrics.last_order) {
            writeln!(
                out,
                "  - Date Range: {} to {}",
                first.format("%Y-%m-%d"),
                last.format("%Y-%m-%d")
            )?;
        }
        writeln!(out, "  - Total Sales: {}", money(metrics.total_sales))?;
        writeln!(out, "  - Total Profit: {}", money(metrics.total_profit))?;
        writeln!(
            out,
            "  - Average Profit Margin: {}",
            percent(metrics.avg_margin)
        )?;
        writeln!(out, "  - Unique Orders: {}", count(metrics.distinct_orders))?;
        writeln!(
            out,
            "  - Unique Customers: {}\n",
            count(metrics.distinct_customers)
        )?;
    }

    out.push_str(&heading("ANALYSIS COMPLETED"));
    out.push_str(
        "\n1. Data exploration and quality assessment\n\
         2. Data cleaning and synthetic profit generation\n\
         3. Exploratory data analysis\n\
         4. Profitability analysis\n\
         5. Time trend analysis and visualizations\n\
         6. Business recommendations\n",
    );

    out.push_str("\n");
    out.push_str(&heading("PROJECT DELIVERABLES INVENTORY"));

    let data_files = vec![
        config.data.cleaned_path(),
        config.output.output_dir.join("data_dictionary.txt"),
        config
            .output
            .output_dir
            .join("data_exploration_summary.txt"),
    ];
    inventory_section(&mut out, "DATA FILES", &data_files)?;

    let report_files: Vec<PathBuf> = REPORT_FILES
        .iter()
        .map(|name| config.output.output_dir.join(name))
        .collect();
    inventory_section(&mut out, "ANALYSIS REPORTS", &report_files)?;

    let chart_files: Vec<PathBuf> = CHART_FILES
        .iter()
        .map(|name| config.output.visualizations_dir.join(name))
        .collect();
    inventory_section(&mut out, "VISUALIZATIONS", &chart_files)?;

    out.push_str("\n");
    out.push_str(&heading("NEXT STEPS"));
    out.push_str(
        "\n1. Review the business recommendations report\n\
         2. Prioritize implementation initiatives\n\
         3. Monitor key performance indicators\n\
         4. Execute profit optimization strategies\n",
    );

    Ok(out)
}
