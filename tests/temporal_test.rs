use chrono::{NaiveDate, Weekday};

use storelens::temporal::{month_name, weekday_name, DateFeatures, WEEKDAY_ORDER};

#[test]
fn test_date_features_of_known_date() {
    // 2023-06-15 is a Thursday in the second quarter
    let date = NaiveDate::from_ymd_opt(2023, 6, 15).unwrap();
    let features = DateFeatures::of(date);
    assert_eq!(features.year, 2023);
    assert_eq!(features.month, 6);
    assert_eq!(features.quarter, 2);
    assert_eq!(features.day_of_week, Weekday::Thu);
}

#[test]
fn test_quarter_boundaries() {
    let expected = [1, 1, 1, 2, 2, 2, 3, 3, 3, 4, 4, 4];
    for (month, quarter) in (1..=12u32).zip(expected) {
        let date = NaiveDate::from_ymd_opt(2023, month, 1).unwrap();
        assert_eq!(DateFeatures::of(date).quarter, quarter, "month {month}");
    }
}

#[test]
fn test_month_names() {
    assert_eq!(month_name(1), "January");
    assert_eq!(month_name(9), "September");
    assert_eq!(month_name(12), "December");
    assert_eq!(month_name(13), "Unknown");
}

#[test]
fn test_weekday_order_runs_monday_to_sunday() {
    assert_eq!(WEEKDAY_ORDER.len(), 7);
    assert_eq!(WEEKDAY_ORDER[0], Weekday::Mon);
    assert_eq!(WEEKDAY_ORDER[6], Weekday::Sun);
    assert_eq!(weekday_name(WEEKDAY_ORDER[0]), "Monday");
    assert_eq!(weekday_name(WEEKDAY_ORDER[5]), "Saturday");
}
