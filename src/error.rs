//! Error types for storelens

use thiserror::Error;

/// Error type definitions
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error")]
    Io(#[source] std::io::Error),

    #[error("CSV error")]
    Csv(#[source] csv::Error),

    #[error("Input file not found: {0}")]
    InputNotFound(String),

    #[error("Missing required column: {0}")]
    MissingColumn(String),

    #[error("Invalid value in column {column}, row {row}: {value}")]
    InvalidCell {
        column: String,
        row: usize,
        value: String,
    },

    #[error("Date parse error: {0}")]
    DateParse(String),

    #[error("Empty data: {0}")]
    EmptyData(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Excel error: {0}")]
    Excel(String),

    #[error("Visualization error: {0}")]
    Visualization(String),

    #[error("Format error: {0}")]
    Format(String),
}

/// Result type alias using storelens Error
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::Csv(err)
    }
}

impl From<std::fmt::Error> for Error {
    fn from(err: std::fmt::Error) -> Self {
        Error::Format(err.to_string())
    }
}
