//! Order-date feature extraction
//!
//! Derives the calendar columns of the cleaned dataset (year, month,
//! quarter, weekday, month name) from an order date.

use chrono::{Datelike, NaiveDate, Weekday};

/// Calendar features derived from a single date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateFeatures {
    pub year: i32,
    /// 1-based month number
    pub month: u32,
    /// 1-based quarter number
    pub quarter: u32,
    pub day_of_week: Weekday,
}

impl DateFeatures {
    /// Extract features from a date
    pub fn of(date: NaiveDate) -> Self {
        let month = date.month();
        DateFeatures {
            year: date.year(),
            month,
            quarter: (month - 1) / 3 + 1,
            day_of_week: date.weekday(),
        }
    }
}

/// English month name for a 1-based month number
pub fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "Unknown",
    }
}

/// English weekday name
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Weekdays in presentation order (Monday first)
pub const WEEKDAY_ORDER: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];
