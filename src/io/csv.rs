//! CSV reading and writing for the sales dataset
//!
//! The source export uses day/month/year dates; the cleaned dataset is
//! written back with ISO dates plus the derived profit, calendar and
//! band columns. Required columns abort the load when absent; optional
//! columns simply leave their fields unset.

use std::fs::File;
use std::path::Path;

use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord, Writer};

use crate::error::{Error, Result};
use crate::model::{
    BandThresholds, Category, EnrichedRecord, Region, SalesRecord, Segment,
};
use crate::temporal::{month_name, weekday_name};

/// Required columns of the source export
pub const REQUIRED_COLUMNS: [&str; 9] = [
    "Order ID",
    "Order Date",
    "Ship Date",
    "Customer ID",
    "Segment",
    "Region",
    "Category",
    "Sub-Category",
    "Sales",
];

/// Header of the cleaned dataset
pub const CLEANED_HEADER: [&str; 27] = [
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
    "Profit",
    "Profit_Margin",
    "Year",
    "Month",
    "Quarter",
    "Day_of_Week",
    "Month_Name",
    "Sales_Category",
    "Profit_Category",
];

/// Column positions resolved against one header row
struct ColumnMap {
    order_id: usize,
    order_date: usize,
    ship_date: usize,
    customer_id: usize,
    segment: usize,
    region: usize,
    category: usize,
    sub_category: usize,
    sales: usize,
    row_id: Option<usize>,
    ship_mode: Option<usize>,
    customer_name: Option<usize>,
    country: Option<usize>,
    city: Option<usize>,
    state: Option<usize>,
    postal_code: Option<usize>,
    product_id: Option<usize>,
    product_name: Option<usize>,
    profit: Option<usize>,
}

impl ColumnMap {
    fn resolve(headers: &StringRecord) -> Result<Self> {
        let find = |name: &str| headers.iter().position(|h| h.trim() == name);
        let require = |name: &str| {
            find(name).ok_or_else(|| Error::MissingColumn(name.to_string()))
        };

        Ok(ColumnMap {
            order_id: require("Order ID")?,
            order_date: require("Order Date")?,
            ship_date: require("Ship Date")?,
            customer_id: require("Customer ID")?,
            segment: require("Segment")?,
            region: require("Region")?,
            category: require("Category")?,
            sub_category: require("Sub-Category")?,
            sales: require("Sales")?,
            row_id: find("Row ID"),
            ship_mode: find("Ship Mode"),
            customer_name: find("Customer Name"),
            country: find("Country"),
            city: find("City"),
            state: find("State"),
            postal_code: find("Postal Code"),
            product_id: find("Product ID"),
            product_name: find("Product Name"),
            profit: find("Profit"),
        })
    }
}

/// Parse a date cell; the source export uses day/month/year, the
/// cleaned dataset ISO dates
fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%d/%m/%Y")
        .or_else(|_| NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d"))
        .map_err(|_| Error::DateParse(value.to_string()))
}

fn cell<'r>(record: &'r StringRecord, idx: usize) -> &'r str {
    record.get(idx).unwrap_or("").trim()
}

fn optional_cell(record: &StringRecord, idx: Option<usize>) -> Option<String> {
    let idx = idx?;
    let value = cell(record, idx);
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn parse_record(record: &StringRecord, map: &ColumnMap, row: usize) -> Result<SalesRecord> {
    let sales_raw = cell(record, map.sales);
    let sales: f64 = sales_raw.parse().map_err(|_| Error::InvalidCell {
        column: "Sales".to_string(),
        row,
        value: sales_raw.to_string(),
    })?;

    // Ship date is a required column but tolerated when blank
    let ship_date_raw = cell(record, map.ship_date);
    let ship_date = if ship_date_raw.is_empty() {
        None
    } else {
        Some(parse_date(ship_date_raw)?)
    };

    // Missing postal codes are filled with 0; the export sometimes
    // carries them as floats
    let postal_code = map.postal_code.map(|idx| {
        let raw = cell(record, idx);
        raw.parse::<f64>().map(|v| v as u32).unwrap_or(0)
    });

    let row_id = map
        .row_id
        .and_then(|idx| cell(record, idx).parse::<u64>().ok());

    Ok(SalesRecord {
        row_id,
        order_id: cell(record, map.order_id).to_string(),
        order_date: parse_date(cell(record, map.order_date))?,
        ship_date,
        ship_mode: optional_cell(record, map.ship_mode),
        customer_id: cell(record, map.customer_id).to_string(),
        customer_name: optional_cell(record, map.customer_name),
        segment: Segment::parse(cell(record, map.segment)),
        country: optional_cell(record, map.country),
        city: optional_cell(record, map.city),
        state: optional_cell(record, map.state),
        postal_code,
        region: Region::parse(cell(record, map.region)),
        product_id: optional_cell(record, map.product_id),
        category: Category::parse(cell(record, map.category)),
        sub_category: cell(record, map.sub_category).to_string(),
        product_name: optional_cell(record, map.product_name),
        sales,
    })
}

/// Read the source sales dataset
pub fn read_sales_csv<P: AsRef<Path>>(path: P) -> Result<Vec<SalesRecord>> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(Error::InputNotFound(path.display().to_string()));
    }
    let file = File::open(path).map_err(Error::Io)?;

    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let headers = rdr.headers().map_err(Error::Csv)?.clone();
    let map = ColumnMap::resolve(&headers)?;

    let mut records = Vec::new();
    for (row, result) in rdr.records().enumerate() {
        let record = result.map_err(Error::Csv)?;
        records.push(parse_record(&record, &map, row)?);
    }
    Ok(records)
}

/// Read a cleaned dataset back into enriched records
///
/// Calendar and band columns are re-derived from the stored order date
/// and profit, which is cheaper and safer than parsing them back.
pub fn read_cleaned_csv<P: AsRef<Path>>(
    path: P,
    bands: &BandThresholds,
) -> Result<Vec<EnrichedRecord>> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(Error::InputNotFound(path.display().to_string()));
    }
    let file = File::open(path).map_err(Error::Io)?;

    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let headers = rdr.headers().map_err(Error::Csv)?.clone();
    let map = ColumnMap::resolve(&headers)?;
    let profit_idx = map
        .profit
        .ok_or_else(|| Error::MissingColumn("Profit".to_string()))?;

    let mut records = Vec::new();
    for (row, result) in rdr.records().enumerate() {
        let record = result.map_err(Error::Csv)?;
        let sales_record = parse_record(&record, &map, row)?;
        let profit_raw = cell(&record, profit_idx);
        let profit: f64 = profit_raw.parse().map_err(|_| Error::InvalidCell {
            column: "Profit".to_string(),
            row,
            value: profit_raw.to_string(),
        })?;
        records.push(EnrichedRecord::new(sales_record, profit, bands));
    }
    Ok(records)
}

fn opt_str(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

/// Write the cleaned dataset: source columns plus profit, calendar and
/// band columns
pub fn write_cleaned_csv<P: AsRef<Path>>(records: &[EnrichedRecord], path: P) -> Result<()> {
    let file = File::create(path.as_ref()).map_err(Error::Io)?;
    let mut wtr = Writer::from_writer(file);

    wtr.write_record(CLEANED_HEADER).map_err(Error::Csv)?;

    for enriched in records {
        let r = &enriched.record;
        let row = [
            r.row_id.map(|id| id.to_string()).unwrap_or_default(),
            r.order_id.clone(),
            r.order_date.format("%Y-%m-%d").to_string(),
            r.ship_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            opt_str(&r.ship_mode),
            r.customer_id.clone(),
            opt_str(&r.customer_name),
            r.segment.label().to_string(),
            opt_str(&r.country),
            opt_str(&r.city),
            opt_str(&r.state),
            r.postal_code.map(|p| p.to_string()).unwrap_or_default(),
            r.region.label().to_string(),
            opt_str(&r.product_id),
            r.category.label().to_string(),
            r.sub_category.clone(),
            opt_str(&r.product_name),
            r.sales.to_string(),
            enriched.profit.to_string(),
            enriched.profit_margin.to_string(),
            enriched.year.to_string(),
            enriched.month.to_string(),
            enriched.quarter.to_string(),
            weekday_name(enriched.day_of_week).to_string(),
            month_name(enriched.month).to_string(),
            enriched.sales_band.label().to_string(),
            enriched.profit_band.label().to_string(),
        ];
        wtr.write_record(&row).map_err(Error::Csv)?;
    }

    wtr.flush().map_err(Error::Io)?;
    Ok(())
}
