//! Text report generation
//!
//! Reports are plain text built from the computed aggregates. Formatting
//! helpers here mirror the presentation of the spreadsheet output:
//! dollar amounts with thousands separators, percents at one decimal.

pub mod exploration;
pub mod recommendations;
pub mod summary;

pub use exploration::{data_dictionary, exploration_summary};
pub use recommendations::{business_report, profitability_recommendations, ReportContext};
pub use summary::final_summary;

/// Format a value with thousands separators at the given decimal count
pub(crate) fn thousands(value: f64, decimals: usize) -> String {
    let formatted = format!("{value:.decimals$}");
    let (sign, rest) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted.as_str()),
    };
    let (int_part, frac_part) = match rest.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (rest, None),
    };

    let mut grouped = String::new();
    let digits: Vec<char> = int_part.chars().collect();
    for (i, c) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*c);
    }

    match frac_part {
        Some(f) => format!("{sign}{grouped}.{f}"),
        None => format!("{sign}{grouped}"),
    }
}

/// Dollar amount with two decimals
pub(crate) fn money(value: f64) -> String {
    if value < 0.0 {
        format!("-${}", thousands(-value, 2))
    } else {
        format!("${}", thousands(value, 2))
    }
}

/// Whole-dollar amount
pub(crate) fn money_whole(value: f64) -> String {
    if value < 0.0 {
        format!("-${}", thousands(-value, 0))
    } else {
        format!("${}", thousands(value, 0))
    }
}

/// Integer count with thousands separators
pub(crate) fn count(n: usize) -> String {
    thousands(n as f64, 0)
}

/// Percent at one decimal
pub(crate) fn percent(value: f64) -> String {
    format!("{value:.1}%")
}

/// A section header followed by an underline of equals signs
pub(crate) fn heading(title: &str) -> String {
    format!("{}\n{}\n", title, "=".repeat(title.len()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thousands_groups_digits() {
        assert_eq!(thousands(1234567.891, 2), "1,234,567.89");
        assert_eq!(thousands(999.0, 0), "999");
        assert_eq!(thousands(1000.0, 0), "1,000");
        assert_eq!(thousands(-45678.5, 2), "-45,678.50");
    }

    #[test]
    fn money_handles_negatives() {
        assert_eq!(money(1500.0), "$1,500.00");
        assert_eq!(money(-1500.0), "-$1,500.00");
        assert_eq!(money_whole(2500000.4), "$2,500,000");
    }

    #[test]
    fn heading_underlines_title() {
        assert_eq!(heading("ABC"), "ABC\n===\n");
    }
}
