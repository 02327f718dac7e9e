use std::fs;

use chrono::NaiveDate;
use tempfile::tempdir;

use storelens::error::{Error, Result};
use storelens::io::csv::{read_cleaned_csv, read_sales_csv, write_cleaned_csv};
use storelens::model::{
    BandThresholds, Category, EnrichedRecord, ProfitBand, Region, SalesBand, SalesRecord, Segment,
};

const RAW_HEADER: &str = "Row ID,Order ID,Order Date,Ship Date,Ship Mode,Customer ID,Customer Name,Segment,Country,City,State,Postal Code,Region,Product ID,Category,Sub-Category,Product Name,Sales";

fn record(order_id: &str, date: (i32, u32, u32), sub_category: &str, sales: f64) -> SalesRecord {
    SalesRecord {
        row_id: Some(1),
        order_id: order_id.to_string(),
        order_date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
        ship_date: NaiveDate::from_ymd_opt(date.0, date.1, date.2 + 3),
        ship_mode: Some("Second Class".to_string()),
        customer_id: "CG-12520".to_string(),
        customer_name: Some("Claire Gute".to_string()),
        segment: Segment::Consumer,
        country: Some("United States".to_string()),
        city: Some("Henderson".to_string()),
        state: Some("Kentucky".to_string()),
        postal_code: Some(42420),
        region: Region::South,
        product_id: Some("FUR-BO-10001798".to_string()),
        category: Category::Furniture,
        sub_category: sub_category.to_string(),
        product_name: Some("Bush Somerset Collection Bookcase".to_string()),
        sales,
    }
}

#[test]
fn test_read_source_csv_parses_day_month_year() -> Result<()> {
    let dir = tempdir().map_err(Error::Io)?;
    let path = dir.path().join("sales.csv");
    let body = format!(
        "{RAW_HEADER}\n\
         1,CA-2017-152156,08/11/2017,11/11/2017,Second Class,CG-12520,Claire Gute,Consumer,United States,Henderson,Kentucky,42420.0,South,FUR-BO-10001798,Furniture,Bookcases,Somerset Bookcase,261.96\n\
         2,CA-2017-152156,08/11/2017,,,CG-12520,,Consumer,United States,,,,South,FUR-CH-10000454,Furniture,Chairs,,731.94\n"
    );
    fs::write(&path, body).map_err(Error::Io)?;

    let records = read_sales_csv(&path)?;
    assert_eq!(records.len(), 2);

    let first = &records[0];
    assert_eq!(first.order_date, NaiveDate::from_ymd_opt(2017, 11, 8).unwrap());
    assert_eq!(first.ship_date, NaiveDate::from_ymd_opt(2017, 11, 11));
    // Postal codes exported as floats are truncated to integers
    assert_eq!(first.postal_code, Some(42420));
    assert_eq!(first.category, Category::Furniture);
    assert_eq!(first.segment, Segment::Consumer);
    assert!((first.sales - 261.96).abs() < 1e-9);

    // Blank optional cells stay unset; blank ship dates are tolerated
    let second = &records[1];
    assert_eq!(second.ship_date, None);
    assert_eq!(second.ship_mode, None);
    assert_eq!(second.customer_name, None);
    assert_eq!(second.postal_code, Some(0));
    Ok(())
}

#[test]
fn test_missing_input_file_is_reported() {
    let err = read_sales_csv("does/not/exist.csv").unwrap_err();
    assert!(matches!(err, Error::InputNotFound(_)));
}

#[test]
fn test_missing_required_column_aborts_the_load() -> Result<()> {
    let dir = tempdir().map_err(Error::Io)?;
    let path = dir.path().join("no_sales.csv");
    fs::write(
        &path,
        "Order ID,Order Date,Ship Date,Customer ID,Segment,Region,Category,Sub-Category\n",
    )
    .map_err(Error::Io)?;

    let err = read_sales_csv(&path).unwrap_err();
    assert!(matches!(err, Error::MissingColumn(ref c) if c == "Sales"));
    Ok(())
}

#[test]
fn test_invalid_sales_cell_is_located() -> Result<()> {
    let dir = tempdir().map_err(Error::Io)?;
    let path = dir.path().join("bad.csv");
    let body = format!(
        "{RAW_HEADER}\n\
         1,CA-1,08/11/2017,,,C-1,,Consumer,,,,42420,South,P-1,Furniture,Chairs,,not-a-number\n"
    );
    fs::write(&path, body).map_err(Error::Io)?;

    let err = read_sales_csv(&path).unwrap_err();
    match err {
        Error::InvalidCell { column, row, .. } => {
            assert_eq!(column, "Sales");
            assert_eq!(row, 0);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    Ok(())
}

#[test]
fn test_cleaned_dataset_round_trip() -> Result<()> {
    let dir = tempdir().map_err(Error::Io)?;
    let path = dir.path().join("cleaned.csv");
    let bands = BandThresholds::default();

    let rows = vec![
        EnrichedRecord::new(record("CA-1", (2017, 11, 8), "Bookcases", 261.96), 57.63, &bands),
        EnrichedRecord::new(record("CA-2", (2018, 2, 20), "Chairs", 1250.0), -31.25, &bands),
    ];
    write_cleaned_csv(&rows, &path)?;

    let header = fs::read_to_string(&path).map_err(Error::Io)?;
    let header = header.lines().next().unwrap_or("").to_string();
    assert!(header.contains("Profit_Margin"));
    assert!(header.contains("Sales_Category"));
    assert!(header.contains("Month_Name"));

    let reloaded = read_cleaned_csv(&path, &bands)?;
    assert_eq!(reloaded.len(), 2);

    let first = &reloaded[0];
    assert_eq!(first.record.order_date, rows[0].record.order_date);
    assert_eq!(first.record.ship_date, rows[0].record.ship_date);
    assert!((first.profit - 57.63).abs() < 1e-9);
    assert!((first.profit_margin - rows[0].profit_margin).abs() < 1e-9);
    assert_eq!(first.year, 2017);
    assert_eq!(first.quarter, 4);
    assert_eq!(first.sales_band, SalesBand::Medium);

    let second = &reloaded[1];
    assert!((second.profit - -31.25).abs() < 1e-9);
    assert_eq!(second.sales_band, SalesBand::VeryHigh);
    assert_eq!(second.profit_band, ProfitBand::Loss);
    Ok(())
}

#[test]
fn test_cleaned_reader_requires_a_profit_column() -> Result<()> {
    let dir = tempdir().map_err(Error::Io)?;
    let path = dir.path().join("raw.csv");
    let body = format!(
        "{RAW_HEADER}\n\
         1,CA-1,08/11/2017,,,C-1,,Consumer,,,,42420,South,P-1,Furniture,Chairs,,100.0\n"
    );
    fs::write(&path, body).map_err(Error::Io)?;

    let err = read_cleaned_csv(&path, &BandThresholds::default()).unwrap_err();
    assert!(matches!(err, Error::MissingColumn(ref c) if c == "Profit"));
    Ok(())
}
