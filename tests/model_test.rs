use storelens::model::{
    BandThresholds, Category, CustomerTier, ProfitBand, Region, SalesBand, Segment,
};

#[test]
fn test_category_parse_and_label() {
    assert_eq!(Category::parse("Office Supplies"), Category::OfficeSupplies);
    assert_eq!(Category::parse(" Technology "), Category::Technology);
    assert_eq!(Category::parse("Furniture"), Category::Furniture);
    assert_eq!(
        Category::parse("Services"),
        Category::Other("Services".to_string())
    );
    assert_eq!(Category::OfficeSupplies.label(), "Office Supplies");
    assert_eq!(Category::Other("Services".to_string()).label(), "Services");
}

#[test]
fn test_segment_and_region_parse() {
    assert_eq!(Segment::parse("Home Office"), Segment::HomeOffice);
    assert_eq!(Segment::parse("Corporate"), Segment::Corporate);
    assert_eq!(Segment::HomeOffice.label(), "Home Office");

    assert_eq!(Region::parse("Central"), Region::Central);
    assert_eq!(Region::parse("Nowhere"), Region::Other("Nowhere".to_string()));
    assert_eq!(Region::West.to_string(), "West");
}

#[test]
fn test_sales_band_edges() {
    let bands = BandThresholds::default();
    // Edge values belong to the lower band
    assert_eq!(SalesBand::classify(50.0, &bands), SalesBand::Low);
    assert_eq!(SalesBand::classify(100.0, &bands), SalesBand::Low);
    assert_eq!(SalesBand::classify(100.01, &bands), SalesBand::Medium);
    assert_eq!(SalesBand::classify(500.0, &bands), SalesBand::Medium);
    assert_eq!(SalesBand::classify(1000.0, &bands), SalesBand::High);
    assert_eq!(SalesBand::classify(1000.5, &bands), SalesBand::VeryHigh);
    assert_eq!(SalesBand::VeryHigh.label(), "Very High");
}

#[test]
fn test_profit_band_edges() {
    let bands = BandThresholds::default();
    assert_eq!(ProfitBand::classify(-25.0, &bands), ProfitBand::Loss);
    assert_eq!(ProfitBand::classify(0.0, &bands), ProfitBand::Loss);
    assert_eq!(ProfitBand::classify(25.0, &bands), ProfitBand::LowProfit);
    assert_eq!(ProfitBand::classify(50.0, &bands), ProfitBand::LowProfit);
    assert_eq!(ProfitBand::classify(200.0, &bands), ProfitBand::MediumProfit);
    assert_eq!(ProfitBand::classify(200.01, &bands), ProfitBand::HighProfit);
    assert_eq!(ProfitBand::LowProfit.label(), "Low Profit");
}

#[test]
fn test_customer_tier_edges() {
    let bands = BandThresholds::default();
    assert_eq!(CustomerTier::classify(-1.0, &bands), CustomerTier::Loss);
    assert_eq!(CustomerTier::classify(0.0, &bands), CustomerTier::Loss);
    assert_eq!(CustomerTier::classify(100.0, &bands), CustomerTier::Low);
    assert_eq!(CustomerTier::classify(500.0, &bands), CustomerTier::Medium);
    assert_eq!(CustomerTier::classify(500.01, &bands), CustomerTier::High);
}

#[test]
fn test_custom_band_thresholds() {
    let bands = BandThresholds {
        sales: (10.0, 20.0, 30.0),
        profit: (0.0, 5.0, 10.0),
        customer: (0.0, 1.0, 2.0),
    };
    assert_eq!(SalesBand::classify(15.0, &bands), SalesBand::Medium);
    assert_eq!(ProfitBand::classify(7.5, &bands), ProfitBand::MediumProfit);
    assert_eq!(CustomerTier::classify(1.5, &bands), CustomerTier::Medium);
}
