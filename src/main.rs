//! storelens CLI: one subcommand per pipeline step

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use storelens::analysis::{self, CustomerSummary, OverallMetrics, PortfolioMatrix};
use storelens::config::{AnalysisConfig, ThresholdConfig};
use storelens::io::{read_cleaned_csv, read_sales_csv, write_cleaned_csv, write_workbook};
use storelens::model::EnrichedRecord;
use storelens::report::{self, ReportContext};
use storelens::vis::{self, PlotSettings};
use storelens::{AggTable, ProfitSynthesizer};

#[derive(Parser)]
#[command(name = "storelens", version, about = "Batch sales analytics pipeline")]
struct Cli {
    /// Directory holding the source and cleaned CSV files
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Directory for reports and workbooks
    #[arg(long, global = true)]
    output_dir: Option<PathBuf>,

    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Seed for the profit synthesizer
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Summarize the raw dataset
    Explore,
    /// Clean the dataset and synthesize the profit column
    Clean,
    /// Exploratory aggregates and the summary workbook
    Eda,
    /// Profitability analyses and recommendations
    Profitability,
    /// Render the chart suite
    Visualize,
    /// Business recommendations report
    Recommend,
    /// Final project summary
    Summary,
    /// Run every step in order
    RunAll,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let mut config =
        AnalysisConfig::load(cli.config.as_deref()).context("loading configuration")?;
    if let Some(dir) = cli.data_dir {
        config.data.data_dir = dir;
    }
    if let Some(dir) = cli.output_dir {
        config.output.output_dir = dir;
    }
    if let Some(seed) = cli.seed {
        config.enrichment.seed = seed;
    }

    match cli.command {
        Command::Explore => explore(&config),
        Command::Clean => clean(&config).map(|_| ()),
        Command::Eda => eda(&config),
        Command::Profitability => profitability(&config),
        Command::Visualize => visualize(&config),
        Command::Recommend => recommend(&config),
        Command::Summary => summary(&config),
        Command::RunAll => run_all(&config),
    }
}

fn explore(config: &AnalysisConfig) -> Result<()> {
    let records = read_sales_csv(config.data.input_path())
        .with_context(|| format!("reading {}", config.data.input_path().display()))?;
    info!(rows = records.len(), "loaded raw dataset");

    let summary = report::exploration_summary(&records)?;
    fs::create_dir_all(&config.output.output_dir)?;
    let path = config.output.output_dir.join("data_exploration_summary.txt");
    fs::write(&path, &summary)?;

    println!("{summary}");
    info!(path = %path.display(), "exploration summary written");
    Ok(())
}

fn clean(config: &AnalysisConfig) -> Result<Vec<EnrichedRecord>> {
    let records = read_sales_csv(config.data.input_path())
        .with_context(|| format!("reading {}", config.data.input_path().display()))?;
    info!(rows = records.len(), "loaded raw dataset");

    let synthesizer = ProfitSynthesizer::new()?;
    let mut rng = StdRng::seed_from_u64(config.enrichment.seed);
    let enriched = storelens::enrich_records(
        records,
        &synthesizer,
        &config.thresholds.bands,
        &mut rng,
    );

    let cleaned_path = config.data.cleaned_path();
    write_cleaned_csv(&enriched, &cleaned_path)
        .with_context(|| format!("writing {}", cleaned_path.display()))?;
    info!(
        rows = enriched.len(),
        seed = config.enrichment.seed,
        path = %cleaned_path.display(),
        "cleaned dataset written"
    );

    fs::create_dir_all(&config.output.output_dir)?;
    let dict_path = config.output.output_dir.join("data_dictionary.txt");
    fs::write(&dict_path, report::data_dictionary())?;
    info!(path = %dict_path.display(), "data dictionary written");

    Ok(enriched)
}

/// Load the cleaned dataset, running the clean step first if it has not
/// been produced yet
fn load_enriched(config: &AnalysisConfig) -> Result<Vec<EnrichedRecord>> {
    let cleaned_path = config.data.cleaned_path();
    if cleaned_path.exists() {
        let records = read_cleaned_csv(&cleaned_path, &config.thresholds.bands)
            .with_context(|| format!("reading {}", cleaned_path.display()))?;
        info!(rows = records.len(), "loaded cleaned dataset");
        Ok(records)
    } else {
        info!("cleaned dataset missing, running the clean step first");
        clean(config)
    }
}

fn eda(config: &AnalysisConfig) -> Result<()> {
    let records = load_enriched(config)?;

    let categories = analysis::category_performance(&records)?;
    let regions = analysis::regional_performance(&records)?;
    let segments = analysis::segment_performance(&records)?;
    let monthly = analysis::monthly_trends(&records)?;

    let metrics = OverallMetrics::compute(&records);
    if !metrics.is_empty() {
        info!(
            total_sales = metrics.total_sales,
            total_profit = metrics.total_profit,
            avg_margin = metrics.avg_margin,
            orders = metrics.distinct_orders,
            "overall metrics"
        );
    }

    fs::create_dir_all(&config.output.output_dir)?;
    let path = config.output.output_dir.join("eda_summary_tables.xlsx");
    write_workbook(
        &path,
        &[
            ("Category_Analysis", &categories),
            ("Regional_Analysis", &regions),
            ("Segment_Analysis", &segments),
            ("Monthly_Trends", &monthly),
        ],
    )
    .with_context(|| format!("writing {}", path.display()))?;
    info!(path = %path.display(), "EDA summary workbook written");

    print_eda_digest(&records, &categories, &regions, &segments)?;
    Ok(())
}

/// Console digest of the exploratory tables, top-10 rows for the long ones
fn print_eda_digest(
    records: &[EnrichedRecord],
    categories: &AggTable,
    regions: &AggTable,
    segments: &AggTable,
) -> Result<()> {
    println!("CATEGORY SUMMARY\n{}", categories.to_text());
    println!("REGIONAL SUMMARY\n{}", regions.to_text());
    println!("SEGMENT SUMMARY\n{}", segments.to_text());

    let by_sales = analysis::subcategory_performance(records)?;
    let mut by_profit = by_sales.clone();
    by_profit.sort_desc_by("Total_Profit")?;
    by_profit.truncate(10);

    let mut by_sales = by_sales;
    by_sales.truncate(10);
    println!("TOP 10 SUB-CATEGORIES BY SALES\n{}", by_sales.to_text());
    println!("TOP 10 SUB-CATEGORIES BY PROFIT\n{}", by_profit.to_text());

    let states = analysis::state_performance(records)?;
    if !states.is_empty() {
        let mut states = states;
        states.truncate(10);
        println!("TOP 10 STATES BY SALES\n{}", states.to_text());
    }

    let mut customers = analysis::customer_value(records)?;
    customers.truncate(10);
    println!("TOP 10 CUSTOMERS BY VALUE\n{}", customers.to_text());

    let matrix = analysis::region_category_matrix(records)?;
    println!("REGION / CATEGORY MATRIX\n{}", matrix.to_text());

    let quarterly = analysis::quarterly_trends(records)?;
    println!("QUARTERLY TRENDS\n{}", quarterly.to_text());

    let weekdays = analysis::weekday_analysis(records)?;
    println!("SALES BY DAY OF WEEK\n{}", weekdays.to_text());
    Ok(())
}

/// Every aggregate the narrative reports draw from
struct Aggregates {
    metrics: OverallMetrics,
    categories: AggTable,
    regions: AggTable,
    segments: AggTable,
    traps: AggTable,
    stars: AggTable,
    customers: Vec<CustomerSummary>,
    efficiency: AggTable,
    matrix: PortfolioMatrix,
}

impl Aggregates {
    fn compute(records: &[EnrichedRecord], thresholds: &ThresholdConfig) -> Result<Self> {
        let subcategories = analysis::subcategory_profit(records)?;
        Ok(Aggregates {
            metrics: OverallMetrics::compute(records),
            categories: analysis::category_performance(records)?,
            regions: analysis::regional_performance(records)?,
            segments: analysis::segment_performance(records)?,
            traps: analysis::profit_traps(&subcategories, thresholds.trap_margin)?,
            stars: analysis::profit_stars(&subcategories, thresholds.star_margin)?,
            customers: analysis::customer_profitability(records, &thresholds.bands),
            efficiency: analysis::regional_efficiency(records)?,
            matrix: analysis::product_matrix(records)?,
        })
    }

    fn context(&self) -> ReportContext<'_> {
        ReportContext {
            metrics: &self.metrics,
            categories: &self.categories,
            regions: &self.regions,
            segments: &self.segments,
            traps: &self.traps,
            customers: &self.customers,
            efficiency: &self.efficiency,
            matrix: &self.matrix,
        }
    }
}

fn profitability(config: &AnalysisConfig) -> Result<()> {
    let records = load_enriched(config)?;
    let aggregates = Aggregates::compute(&records, &config.thresholds)?;
    let customer_table = analysis::customer_table(&aggregates.customers)?;

    fs::create_dir_all(&config.output.output_dir)?;
    let workbook_path = config.output.output_dir.join("profitability_analysis.xlsx");
    write_workbook(
        &workbook_path,
        &[
            ("Profit_Traps", &aggregates.traps),
            ("Customer_Profitability", &customer_table),
            ("Regional_Efficiency", &aggregates.efficiency),
            ("Product_Matrix", &aggregates.matrix.table),
        ],
    )
    .with_context(|| format!("writing {}", workbook_path.display()))?;
    info!(path = %workbook_path.display(), "profitability workbook written");

    if !aggregates.traps.is_empty() {
        println!("PROFIT TRAPS\n{}", aggregates.traps.to_text());
    }
    if !aggregates.stars.is_empty() {
        println!("PROFIT STARS\n{}", aggregates.stars.to_text());
    }

    let text = report::profitability_recommendations(&aggregates.context(), &config.thresholds)?;
    let text_path = config
        .output
        .output_dir
        .join("profitability_recommendations.txt");
    fs::write(&text_path, &text)?;

    println!("{text}");
    info!(path = %text_path.display(), "profitability recommendations written");
    Ok(())
}

fn visualize(config: &AnalysisConfig) -> Result<()> {
    let records = load_enriched(config)?;
    let settings = PlotSettings::sized(config.charts.width, config.charts.height);
    let written = vis::render_all(&records, &config.output.visualizations_dir, &settings)
        .context("rendering charts")?;
    info!(
        charts = written.len(),
        dir = %config.output.visualizations_dir.display(),
        "charts rendered"
    );
    Ok(())
}

fn recommend(config: &AnalysisConfig) -> Result<()> {
    let records = load_enriched(config)?;
    let aggregates = Aggregates::compute(&records, &config.thresholds)?;

    let text = report::business_report(&aggregates.context(), &config.thresholds)?;
    fs::create_dir_all(&config.output.output_dir)?;
    let path = config
        .output
        .output_dir
        .join("business_recommendations_report.txt");
    fs::write(&path, &text)?;

    println!("{text}");
    info!(path = %path.display(), "business recommendations written");
    Ok(())
}

fn summary(config: &AnalysisConfig) -> Result<()> {
    let records = load_enriched(config)?;
    let metrics = OverallMetrics::compute(&records);

    let text = report::final_summary(&metrics, config)?;
    fs::create_dir_all(&config.output.output_dir)?;
    let path = config.output.output_dir.join("final_project_summary.txt");
    fs::write(&path, &text)?;

    println!("{text}");
    info!(path = %path.display(), "final summary written");
    Ok(())
}

fn run_all(config: &AnalysisConfig) -> Result<()> {
    explore(config)?;
    clean(config)?;
    eda(config)?;
    profitability(config)?;
    visualize(config)?;
    recommend(config)?;
    summary(config)
}
