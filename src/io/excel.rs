//! Excel workbook output
//!
//! Writes aggregate tables to an .xlsx workbook, one sheet per table.
//! Group keys become the first column; measures are written as numeric
//! cells rounded to two decimals, matching the text reports.

use std::path::Path;

use simple_excel_writer::{Row, Workbook};

use crate::error::{Error, Result};
use crate::groupby::AggTable;

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Write one workbook with a named sheet per aggregate table
pub fn write_workbook<P: AsRef<Path>>(path: P, sheets: &[(&str, &AggTable)]) -> Result<()> {
    let path_str = path
        .as_ref()
        .to_str()
        .ok_or_else(|| Error::Excel("Could not convert file path to string".to_string()))?;

    let mut workbook = Workbook::create(path_str);

    for (sheet_name, table) in sheets {
        let mut sheet = workbook.create_sheet(sheet_name);

        workbook
            .write_sheet(&mut sheet, |sheet_writer| {
                // Header row: key column then measure columns
                let mut header = Row::new();
                header.add_cell(table.key_name.as_str());
                for column in &table.columns {
                    header.add_cell(column.as_str());
                }
                if let Some(tag_name) = &table.tag_column {
                    header.add_cell(tag_name.as_str());
                }
                sheet_writer.append_row(header)?;

                for row in &table.rows {
                    let mut cells = Row::new();
                    cells.add_cell(row.key.as_str());
                    for &value in &row.values {
                        cells.add_cell(round2(value));
                    }
                    if table.tag_column.is_some() {
                        cells.add_cell(row.tag.as_deref().unwrap_or(""));
                    }
                    sheet_writer.append_row(cells)?;
                }

                Ok(())
            })
            .map_err(|e| Error::Excel(format!("Could not write sheet '{}': {}", sheet_name, e)))?;
    }

    workbook
        .close()
        .map_err(|e| Error::Excel(format!("Could not save Excel file: {}", e)))?;

    Ok(())
}
