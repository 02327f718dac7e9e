//! Dataset exploration summary and data dictionary

use std::collections::HashSet;
use std::fmt::Write;

use crate::error::Result;
use crate::io::csv::CLEANED_HEADER;
use crate::model::SalesRecord;
use crate::report::{count, heading, money, percent};
use crate::stats;

/// Input columns in dataset order
const INPUT_COLUMNS: [&str; 18] = [
    "Row ID",
    "Order ID",
    "Order Date",
    "Ship Date",
    "Ship Mode",
    "Customer ID",
    "Customer Name",
    "Segment",
    "Country",
    "City",
    "State",
    "Postal Code",
    "Region",
    "Product ID",
    "Category",
    "Sub-Category",
    "Product Name",
    "Sales",
];

/// Column descriptions for the cleaned dataset
const COLUMN_DESCRIPTIONS: [(&str, &str); 27] = [
    ("Row ID", "Unique identifier for each row"),
    ("Order ID", "Unique identifier for each order"),
    ("Order Date", "Date when the order was placed"),
    ("Ship Date", "Date when the order was shipped"),
    ("Ship Mode", "Shipping method used"),
    ("Customer ID", "Unique identifier for each customer"),
    ("Customer Name", "Name of the customer"),
    (
        "Segment",
        "Customer segment (Consumer, Corporate, Home Office)",
    ),
    ("Country", "Country where order was placed"),
    ("City", "City where order was placed"),
    ("State", "State where order was placed"),
    ("Postal Code", "Postal code of delivery location"),
    ("Region", "Geographic region (West, East, Central, South)"),
    ("Product ID", "Unique identifier for each product"),
    (
        "Category",
        "Product category (Furniture, Office Supplies, Technology)",
    ),
    ("Sub-Category", "Product sub-category"),
    ("Product Name", "Name of the product"),
    ("Sales", "Revenue generated from the sale"),
    (
        "Profit",
        "Profit generated (synthetic data based on industry margins)",
    ),
    ("Profit_Margin", "Profit as percentage of sales"),
    ("Year", "Year extracted from Order Date"),
    ("Month", "Month extracted from Order Date"),
    ("Quarter", "Quarter extracted from Order Date"),
    ("Day_of_Week", "Day of week when order was placed"),
    ("Month_Name", "Month name when order was placed"),
    (
        "Sales_Category",
        "Sales amount category (Low, Medium, High, Very High)",
    ),
    (
        "Profit_Category",
        "Profit amount category (Loss, Low, Medium, High)",
    ),
];

/// Column-by-column description of the cleaned dataset
pub fn data_dictionary() -> String {
    let mut out = heading("SALES DATA DICTIONARY");
    out.push('\n');
    for (column, description) in COLUMN_DESCRIPTIONS {
        // The dictionary tracks the cleaned-file header exactly
        debug_assert!(CLEANED_HEADER.contains(&column));
        out.push_str(&format!("{column}: {description}\n"));
    }
    out
}

/// Shape, missing values, numeric summary and categorical cardinalities
/// of the raw dataset
pub fn exploration_summary(records: &[SalesRecord]) -> Result<String> {
    let mut out = heading("SALES DATA EXPLORATION SUMMARY");
    out.push('\n');

    writeln!(
        out,
        "Dataset Shape: {} rows, {} columns\n",
        count(records.len()),
        INPUT_COLUMNS.len()
    )?;

    out.push_str("Columns:\n");
    for (i, column) in INPUT_COLUMNS.iter().enumerate() {
        writeln!(out, "{:2}. {column}", i + 1)?;
    }

    if records.is_empty() {
        out.push_str("\nDataset is empty; no further summaries available.\n");
        return Ok(out);
    }

    out.push_str("\nMissing Values:\n");
    let missing: [(&str, usize); 8] = [
        ("Row ID", records.iter().filter(|r| r.row_id.is_none()).count()),
        (
            "Ship Date",
            records.iter().filter(|r| r.ship_date.is_none()).count(),
        ),
        (
            "Ship Mode",
            records.iter().filter(|r| r.ship_mode.is_none()).count(),
        ),
        (
            "Customer Name",
            records.iter().filter(|r| r.customer_name.is_none()).count(),
        ),
        ("City", records.iter().filter(|r| r.city.is_none()).count()),
        ("State", records.iter().filter(|r| r.state.is_none()).count()),
        (
            "Postal Code",
            records.iter().filter(|r| r.postal_code.is_none()).count(),
        ),
        (
            "Product Name",
            records.iter().filter(|r| r.product_name.is_none()).count(),
        ),
    ];
    let mut any_missing = false;
    for (column, n) in missing {
        if n > 0 {
            any_missing = true;
            let share = n as f64 / records.len() as f64 * 100.0;
            writeln!(out, "  {column}: {} ({})", count(n), percent(share))?;
        }
    }
    if !any_missing {
        out.push_str("  No missing values found\n");
    }

    let sales: Vec<f64> = records.iter().map(|r| r.sales).collect();
    out.push_str("\nSales Summary:\n");
    writeln!(out, "  count: {}", count(sales.len()))?;
    writeln!(out, "  mean:  {}", money(stats::mean(&sales)?))?;
    if sales.len() > 1 {
        writeln!(out, "  std:   {}", money(stats::std_dev(&sales)?))?;
    }
    let min = sales.iter().fold(f64::INFINITY, |a, &b| a.min(b));
    let max = sales.iter().fold(f64::NEG_INFINITY, |a, &b| a.max(b));
    writeln!(out, "  min:   {}", money(min))?;
    writeln!(out, "  25%:   {}", money(stats::percentile(&sales, 25.0)?))?;
    writeln!(out, "  50%:   {}", money(stats::median(&sales)?))?;
    writeln!(out, "  75%:   {}", money(stats::percentile(&sales, 75.0)?))?;
    writeln!(out, "  max:   {}", money(max))?;

    out.push_str("\nCategorical Columns:\n");
    write_cardinality(&mut out, "Segment", records, |r| {
        Some(r.segment.label().to_string())
    })?;
    write_cardinality(&mut out, "Region", records, |r| {
        Some(r.region.label().to_string())
    })?;
    write_cardinality(&mut out, "Category", records, |r| {
        Some(r.category.label().to_string())
    })?;
    write_cardinality(&mut out, "Sub-Category", records, |r| {
        Some(r.sub_category.clone())
    })?;
    write_cardinality(&mut out, "Ship Mode", records, |r| r.ship_mode.clone())?;
    write_cardinality(&mut out, "State", records, |r| r.state.clone())?;
    write_cardinality(&mut out, "City", records, |r| r.city.clone())?;
    write_cardinality(&mut out, "Customer ID", records, |r| {
        Some(r.customer_id.clone())
    })?;

    let first = records.iter().map(|r| r.order_date).min();
    let last = records.iter().map(|r| r.order_date).max();
    if let (Some(first), Some(last)) = (first, last) {
        writeln!(
            out,
            "\nOrder Date range: {} to {}",
            first.format("%Y-%m-%d"),
            last.format("%Y-%m-%d")
        )?;
    }

    Ok(out)
}

fn write_cardinality<F>(
    out: &mut String,
    column: &str,
    records: &[SalesRecord],
    field: F,
) -> Result<()>
where
    F: Fn(&SalesRecord) -> Option<String>,
{
    let mut values: Vec<String> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    for record in records {
        if let Some(value) = field(record) {
            if seen.insert(value.clone()) {
                values.push(value);
            }
        }
    }
    writeln!(out, "  {column}: {} unique values", count(values.len()))?;
    if !values.is_empty() && values.len() <= 10 {
        writeln!(out, "    Values: {}", values.join(", "))?;
    }
    Ok(())
}
