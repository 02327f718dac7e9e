//! Core data model: raw sales records, enriched records and
//! presentation bands
//!
//! A `SalesRecord` is the immutable input row as loaded from the source
//! CSV. Enrichment derives a synthetic profit, a profit margin and the
//! date/band columns once per record; the resulting `EnrichedRecord` is
//! never mutated afterwards.

use std::fmt;

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::temporal::DateFeatures;

/// Product category (three known values in the source dataset)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Technology,
    Furniture,
    OfficeSupplies,
    /// Category label not present in the source dataset
    Other(String),
}

impl Category {
    /// Parse a category from its CSV label
    pub fn parse(label: &str) -> Self {
        match label.trim() {
            "Technology" => Category::Technology,
            "Furniture" => Category::Furniture,
            "Office Supplies" => Category::OfficeSupplies,
            other => Category::Other(other.to_string()),
        }
    }

    /// Label as it appears in the source dataset
    pub fn label(&self) -> &str {
        match self {
            Category::Technology => "Technology",
            Category::Furniture => "Furniture",
            Category::OfficeSupplies => "Office Supplies",
            Category::Other(s) => s,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Customer segment
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Segment {
    Consumer,
    Corporate,
    HomeOffice,
    Other(String),
}

impl Segment {
    pub fn parse(label: &str) -> Self {
        match label.trim() {
            "Consumer" => Segment::Consumer,
            "Corporate" => Segment::Corporate,
            "Home Office" => Segment::HomeOffice,
            other => Segment::Other(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Segment::Consumer => "Consumer",
            Segment::Corporate => "Corporate",
            Segment::HomeOffice => "Home Office",
            Segment::Other(s) => s,
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Geographic region
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
    West,
    East,
    Central,
    South,
    Other(String),
}

impl Region {
    pub fn parse(label: &str) -> Self {
        match label.trim() {
            "West" => Region::West,
            "East" => Region::East,
            "Central" => Region::Central,
            "South" => Region::South,
            other => Region::Other(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Region::West => "West",
            Region::East => "East",
            Region::Central => "Central",
            Region::South => "South",
            Region::Other(s) => s,
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One row of the source sales dataset
///
/// Required columns are plain fields; columns that may be absent from a
/// given export are `Option` and the transformations that depend on them
/// are skipped when they are `None`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesRecord {
    pub row_id: Option<u64>,
    pub order_id: String,
    pub order_date: NaiveDate,
    pub ship_date: Option<NaiveDate>,
    pub ship_mode: Option<String>,
    pub customer_id: String,
    pub customer_name: Option<String>,
    pub segment: Segment,
    pub country: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    /// Missing postal codes are filled with 0 during cleaning
    pub postal_code: Option<u32>,
    pub region: Region,
    pub product_id: Option<String>,
    pub category: Category,
    pub sub_category: String,
    pub product_name: Option<String>,
    pub sales: f64,
}

/// A sales record enriched with synthetic profit and derived columns
#[derive(Debug, Clone, Serialize)]
pub struct EnrichedRecord {
    pub record: SalesRecord,
    /// Synthetic profit; may be negative on the loss branch
    pub profit: f64,
    /// Profit as a percentage of sales
    pub profit_margin: f64,
    pub year: i32,
    pub month: u32,
    pub quarter: u32,
    pub day_of_week: Weekday,
    pub sales_band: SalesBand,
    pub profit_band: ProfitBand,
}

impl EnrichedRecord {
    /// Build an enriched record from a raw record and its synthetic profit
    pub fn new(record: SalesRecord, profit: f64, bands: &BandThresholds) -> Self {
        let profit_margin = profit / record.sales * 100.0;
        let dates = DateFeatures::of(record.order_date);
        let sales_band = SalesBand::classify(record.sales, bands);
        let profit_band = ProfitBand::classify(profit, bands);
        EnrichedRecord {
            record,
            profit,
            profit_margin,
            year: dates.year,
            month: dates.month,
            quarter: dates.quarter,
            day_of_week: dates.day_of_week,
            sales_band,
            profit_band,
        }
    }
}

/// Fixed band edges used when classifying sales, profit and customer value
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BandThresholds {
    /// Sales band edges: Low ≤ .0 < Medium ≤ .1 < High ≤ .2 < Very High
    pub sales: (f64, f64, f64),
    /// Profit band edges: Loss ≤ .0 < Low ≤ .1 < Medium ≤ .2 < High
    pub profit: (f64, f64, f64),
    /// Customer tier edges over total profit per customer
    pub customer: (f64, f64, f64),
}

impl Default for BandThresholds {
    fn default() -> Self {
        BandThresholds {
            sales: (100.0, 500.0, 1000.0),
            profit: (0.0, 50.0, 200.0),
            customer: (0.0, 100.0, 500.0),
        }
    }
}

/// Sales amount band (`Sales_Category` column of the cleaned dataset)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SalesBand {
    Low,
    Medium,
    High,
    VeryHigh,
}

impl SalesBand {
    pub fn classify(sales: f64, bands: &BandThresholds) -> Self {
        let (low, medium, high) = bands.sales;
        if sales <= low {
            SalesBand::Low
        } else if sales <= medium {
            SalesBand::Medium
        } else if sales <= high {
            SalesBand::High
        } else {
            SalesBand::VeryHigh
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SalesBand::Low => "Low",
            SalesBand::Medium => "Medium",
            SalesBand::High => "High",
            SalesBand::VeryHigh => "Very High",
        }
    }
}

impl fmt::Display for SalesBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Profit amount band (`Profit_Category` column of the cleaned dataset)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ProfitBand {
    Loss,
    LowProfit,
    MediumProfit,
    HighProfit,
}

impl ProfitBand {
    pub fn classify(profit: f64, bands: &BandThresholds) -> Self {
        let (loss, low, medium) = bands.profit;
        if profit <= loss {
            ProfitBand::Loss
        } else if profit <= low {
            ProfitBand::LowProfit
        } else if profit <= medium {
            ProfitBand::MediumProfit
        } else {
            ProfitBand::HighProfit
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProfitBand::Loss => "Loss",
            ProfitBand::LowProfit => "Low Profit",
            ProfitBand::MediumProfit => "Medium Profit",
            ProfitBand::HighProfit => "High Profit",
        }
    }
}

impl fmt::Display for ProfitBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Customer profitability tier over total profit per customer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CustomerTier {
    Loss,
    Low,
    Medium,
    High,
}

impl CustomerTier {
    pub fn classify(total_profit: f64, bands: &BandThresholds) -> Self {
        let (loss, low, medium) = bands.customer;
        if total_profit <= loss {
            CustomerTier::Loss
        } else if total_profit <= low {
            CustomerTier::Low
        } else if total_profit <= medium {
            CustomerTier::Medium
        } else {
            CustomerTier::High
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CustomerTier::Loss => "Loss",
            CustomerTier::Low => "Low",
            CustomerTier::Medium => "Medium",
            CustomerTier::High => "High",
        }
    }
}

impl fmt::Display for CustomerTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
