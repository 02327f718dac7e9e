//! Input/output: CSV ingestion, cleaned-dataset output and Excel
//! workbooks

pub mod csv;
pub mod excel;

pub use self::csv::{read_cleaned_csv, read_sales_csv, write_cleaned_csv};
pub use self::excel::write_workbook;
