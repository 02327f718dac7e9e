use std::env;
use std::fs;
use std::path::PathBuf;

use tempfile::tempdir;

use storelens::config::AnalysisConfig;
use storelens::error::{Error, Result};

#[test]
fn test_default_configuration() {
    let config = AnalysisConfig::default();
    assert_eq!(config.data.data_dir, PathBuf::from("data"));
    assert_eq!(config.data.input_file, "superstore_sales.csv");
    assert_eq!(
        config.data.input_path(),
        PathBuf::from("data/superstore_sales.csv")
    );
    assert_eq!(config.output.output_dir, PathBuf::from("reports"));
    assert_eq!(config.enrichment.seed, 42);
    assert_eq!(config.thresholds.trap_margin, 20.0);
    assert_eq!(config.thresholds.star_margin, 30.0);
    assert_eq!(config.charts.width, 1024);
    assert!(config.validate().is_ok());
}

#[test]
fn test_partial_toml_file_keeps_defaults() -> Result<()> {
    let dir = tempdir().map_err(Error::Io)?;
    let path = dir.path().join("storelens.toml");
    fs::write(
        &path,
        r#"
[data]
data_dir = "datasets"

[enrichment]
seed = 7

[thresholds]
trap_margin = 18.0
"#,
    )
    .map_err(Error::Io)?;

    let config = AnalysisConfig::from_file(&path)?;
    assert_eq!(config.data.data_dir, PathBuf::from("datasets"));
    assert_eq!(config.enrichment.seed, 7);
    assert_eq!(config.thresholds.trap_margin, 18.0);
    // Sections absent from the file fall back to defaults
    assert_eq!(config.data.cleaned_file, "superstore_sales_cleaned.csv");
    assert_eq!(config.thresholds.star_margin, 30.0);
    Ok(())
}

#[test]
fn test_invalid_toml_is_a_configuration_error() -> Result<()> {
    let dir = tempdir().map_err(Error::Io)?;
    let path = dir.path().join("broken.toml");
    fs::write(&path, "[thresholds\ntrap_margin = 18.0").map_err(Error::Io)?;

    let err = AnalysisConfig::from_file(&path).unwrap_err();
    assert!(matches!(err, Error::Configuration(_)));
    Ok(())
}

#[test]
fn test_validation_rejects_unordered_band_edges() {
    let mut config = AnalysisConfig::default();
    config.thresholds.bands.sales = (500.0, 100.0, 1000.0);
    assert!(matches!(
        config.validate(),
        Err(Error::Configuration(_))
    ));

    let mut config = AnalysisConfig::default();
    config.thresholds.bands.profit = (0.0, 0.0, 200.0);
    assert!(config.validate().is_err());
}

#[test]
fn test_validation_rejects_trap_at_or_above_star() {
    let mut config = AnalysisConfig::default();
    config.thresholds.trap_margin = 30.0;
    config.thresholds.star_margin = 30.0;
    assert!(matches!(
        config.validate(),
        Err(Error::Configuration(_))
    ));
}

#[test]
fn test_validation_rejects_zero_chart_dimensions() {
    let mut config = AnalysisConfig::default();
    config.charts.height = 0;
    assert!(config.validate().is_err());
}

#[test]
fn test_environment_overrides() -> Result<()> {
    // The only test in this binary touching STORELENS_* variables, so
    // parallel test threads never observe them half-set
    env::set_var("STORELENS_SEED", "1234");
    env::set_var("STORELENS_DATA_DIR", "/tmp/storelens-data");
    let result = AnalysisConfig::load(None);
    env::remove_var("STORELENS_DATA_DIR");

    env::set_var("STORELENS_SEED", "not-a-number");
    let mut probe = AnalysisConfig::default();
    let bad_seed = probe.apply_env_overrides();
    env::remove_var("STORELENS_SEED");

    let config = result?;
    assert_eq!(config.enrichment.seed, 1234);
    assert_eq!(config.data.data_dir, PathBuf::from("/tmp/storelens-data"));
    assert!(matches!(bad_seed, Err(Error::Configuration(_))));
    Ok(())
}
