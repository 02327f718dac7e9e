//! Configuration management for storelens
//!
//! Centralized analysis configuration with support for:
//! - TOML configuration files
//! - Environment variable overrides (`STORELENS_*`)
//! - Configuration validation

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::BandThresholds;

/// Main configuration structure for an analysis run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Input dataset locations
    pub data: DataConfig,
    /// Output locations
    pub output: OutputConfig,
    /// Profit enrichment settings
    pub enrichment: EnrichmentConfig,
    /// Classification thresholds
    pub thresholds: ThresholdConfig,
    /// Chart rendering settings
    pub charts: ChartConfig,
}

/// Input dataset configuration section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Directory holding the source and cleaned CSV files
    pub data_dir: PathBuf,
    /// Source CSV file name
    pub input_file: String,
    /// Cleaned CSV file name written by the clean step
    pub cleaned_file: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        DataConfig {
            data_dir: PathBuf::from("data"),
            input_file: "superstore_sales.csv".to_string(),
            cleaned_file: "superstore_sales_cleaned.csv".to_string(),
        }
    }
}

impl DataConfig {
    pub fn input_path(&self) -> PathBuf {
        self.data_dir.join(&self.input_file)
    }

    pub fn cleaned_path(&self) -> PathBuf {
        self.data_dir.join(&self.cleaned_file)
    }
}

/// Output locations configuration section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory for reports and workbooks
    pub output_dir: PathBuf,
    /// Directory for rendered charts
    pub visualizations_dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            output_dir: PathBuf::from("reports"),
            visualizations_dir: PathBuf::from("visualizations"),
        }
    }
}

/// Profit enrichment configuration section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnrichmentConfig {
    /// Seed for the profit synthesizer's random source
    pub seed: u64,
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        EnrichmentConfig { seed: 42 }
    }
}

/// Classification thresholds used by the analyses
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdConfig {
    /// Sales/profit/customer band edges
    pub bands: BandThresholds,
    /// Mean margin below which an above-median-sales group is a profit trap (%)
    pub trap_margin: f64,
    /// Mean margin above which an above-median-sales group is a profit star (%)
    pub star_margin: f64,
    /// Benchmark margin used for improvement-potential estimates (%)
    pub target_margin: f64,
    /// Margin gap between best and worst region worth flagging (%)
    pub regional_gap: f64,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        ThresholdConfig {
            bands: BandThresholds::default(),
            trap_margin: 20.0,
            star_margin: 30.0,
            target_margin: 35.0,
            regional_gap: 5.0,
        }
    }
}

/// Chart rendering configuration section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Chart width in pixels
    pub width: u32,
    /// Chart height in pixels
    pub height: u32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        ChartConfig {
            width: 1024,
            height: 640,
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        AnalysisConfig {
            data: DataConfig::default(),
            output: OutputConfig::default(),
            enrichment: EnrichmentConfig::default(),
            thresholds: ThresholdConfig::default(),
            charts: ChartConfig::default(),
        }
    }
}

impl AnalysisConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            Error::Configuration(format!(
                "Could not read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        let config: AnalysisConfig = toml::from_str(&content)
            .map_err(|e| Error::Configuration(format!("Invalid config file: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with precedence: file (if given), then
    /// environment variable overrides, then defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(p) => Self::from_file(p)?,
            None => AnalysisConfig::default(),
        };
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `STORELENS_*` environment variable overrides
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(dir) = env::var("STORELENS_DATA_DIR") {
            self.data.data_dir = PathBuf::from(dir);
        }
        if let Ok(dir) = env::var("STORELENS_OUTPUT_DIR") {
            self.output.output_dir = PathBuf::from(dir);
        }
        if let Ok(dir) = env::var("STORELENS_VIZ_DIR") {
            self.output.visualizations_dir = PathBuf::from(dir);
        }
        if let Ok(seed) = env::var("STORELENS_SEED") {
            self.enrichment.seed = seed
                .parse()
                .map_err(|e| Error::Configuration(format!("Invalid STORELENS_SEED: {}", e)))?;
        }
        Ok(())
    }

    /// Validate threshold ordering and chart dimensions
    pub fn validate(&self) -> Result<()> {
        let (s0, s1, s2) = self.thresholds.bands.sales;
        if !(s0 < s1 && s1 < s2) {
            return Err(Error::Configuration(
                "Sales band edges must be strictly increasing".into(),
            ));
        }
        let (p0, p1, p2) = self.thresholds.bands.profit;
        if !(p0 < p1 && p1 < p2) {
            return Err(Error::Configuration(
                "Profit band edges must be strictly increasing".into(),
            ));
        }
        let (c0, c1, c2) = self.thresholds.bands.customer;
        if !(c0 < c1 && c1 < c2) {
            return Err(Error::Configuration(
                "Customer tier edges must be strictly increasing".into(),
            ));
        }
        if self.thresholds.trap_margin >= self.thresholds.star_margin {
            return Err(Error::Configuration(
                "Trap margin must be below star margin".into(),
            ));
        }
        if self.charts.width == 0 || self.charts.height == 0 {
            return Err(Error::Configuration(
                "Chart dimensions must be positive".into(),
            ));
        }
        Ok(())
    }
}
