//! Batch sales analytics over the superstore retail dataset
//!
//! The pipeline loads the source CSV, cleans it, synthesizes a profit
//! column from per-category margin heuristics with seeded randomness,
//! computes grouped aggregates, and renders charts and text/Excel
//! reports. Each CLI step is a thin wrapper over the library modules
//! declared here.

// Core data model and pipeline state
pub mod error;
pub mod model;
pub mod temporal;

// Profit synthesis
pub mod profit;
pub mod stats;

// Aggregation
pub mod analysis;
pub mod groupby;

// Input/output surfaces
pub mod config;
pub mod io;
pub mod report;
pub mod vis;

// Re-export the types most callers need
pub use analysis::OverallMetrics;
pub use config::AnalysisConfig;
pub use error::{Error, Result};
pub use groupby::{AggTable, GroupBy};
pub use model::{
    BandThresholds, Category, CustomerTier, EnrichedRecord, ProfitBand, Region, SalesBand,
    SalesRecord, Segment,
};
pub use profit::{enrich_records, MarginOutcome, MarginSchedule, ProfitSynthesizer};
