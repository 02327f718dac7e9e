use chrono::NaiveDate;
use tempfile::tempdir;

use storelens::error::{Error, Result};
use storelens::model::{
    BandThresholds, Category, EnrichedRecord, Region, SalesRecord, Segment,
};
use storelens::vis::{render_all, PlotSettings};

fn enriched(
    order_id: &str,
    date: (i32, u32, u32),
    category: Category,
    sub_category: &str,
    segment: Segment,
    region: Region,
    sales: f64,
    profit: f64,
) -> EnrichedRecord {
    let record = SalesRecord {
        row_id: None,
        order_id: order_id.to_string(),
        order_date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
        ship_date: None,
        ship_mode: None,
        customer_id: "CU-0001".to_string(),
        customer_name: None,
        segment,
        country: Some("United States".to_string()),
        city: None,
        state: None,
        postal_code: None,
        region,
        product_id: None,
        category,
        sub_category: sub_category.to_string(),
        product_name: None,
        sales,
    };
    EnrichedRecord::new(record, profit, &BandThresholds::default())
}

fn sample_records() -> Vec<EnrichedRecord> {
    let subjects = [
        (Category::Technology, "Phones", Segment::Corporate, Region::West),
        (Category::OfficeSupplies, "Paper", Segment::Consumer, Region::East),
        (Category::OfficeSupplies, "Labels", Segment::Consumer, Region::South),
        (Category::Furniture, "Chairs", Segment::HomeOffice, Region::Central),
    ];
    (0..24)
        .map(|i| {
            let (category, sub, segment, region) = &subjects[i % subjects.len()];
            enriched(
                &format!("ORD-{i}"),
                (2023, 1 + (i % 12) as u32, 1 + (i % 27) as u32),
                category.clone(),
                sub,
                segment.clone(),
                region.clone(),
                100.0 + 40.0 * i as f64,
                20.0 + 5.0 * i as f64,
            )
        })
        .collect()
}

#[test]
fn test_render_all_produces_the_full_chart_suite() -> Result<()> {
    let dir = tempdir().map_err(Error::Io)?;
    let records = sample_records();
    let settings = PlotSettings::sized(800, 600);

    let written = render_all(&records, dir.path(), &settings)?;
    assert_eq!(
        written,
        vec![
            "monthly_trends.png",
            "category_performance.png",
            "regional_performance.png",
            "sales_vs_profit_scatter.png",
            "seasonal_analysis.png",
            "day_of_week_analysis.png",
            "customer_segment_analysis.png",
            "summary_dashboard.png",
        ]
    );

    for name in &written {
        let path = dir.path().join(name);
        let meta = std::fs::metadata(&path).map_err(Error::Io)?;
        assert!(meta.len() > 0, "{name} is empty");
    }
    Ok(())
}

#[test]
fn test_render_all_skips_an_empty_dataset() -> Result<()> {
    let dir = tempdir().map_err(Error::Io)?;
    let written = render_all(&[], dir.path(), &PlotSettings::default())?;
    assert!(written.is_empty());
    assert_eq!(std::fs::read_dir(dir.path()).map_err(Error::Io)?.count(), 0);
    Ok(())
}
