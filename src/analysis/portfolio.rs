//! Product portfolio matrix
//!
//! Classifies sub-categories into four quadrants by comparing each one
//! against the median total sales and median mean margin of the whole
//! portfolio.

use crate::error::Result;
use crate::groupby::{AggTable, GroupBy};
use crate::model::EnrichedRecord;
use crate::stats;

/// Portfolio quadrant of a sub-category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quadrant {
    /// High sales, high margin
    Stars,
    /// High sales, low margin
    CashCows,
    /// Low sales, high margin
    QuestionMarks,
    /// Low sales, low margin
    Dogs,
}

impl Quadrant {
    /// Place a sub-category relative to the portfolio medians
    pub fn classify(sales: f64, margin: f64, sales_median: f64, margin_median: f64) -> Self {
        if sales > sales_median && margin > margin_median {
            Quadrant::Stars
        } else if sales > sales_median {
            Quadrant::CashCows
        } else if margin > margin_median {
            Quadrant::QuestionMarks
        } else {
            Quadrant::Dogs
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Quadrant::Stars => "Stars",
            Quadrant::CashCows => "Cash Cows",
            Quadrant::QuestionMarks => "Question Marks",
            Quadrant::Dogs => "Dogs",
        }
    }
}

/// Portfolio matrix: per-sub-category table plus the medians used to
/// split it into quadrants
#[derive(Debug, Clone)]
pub struct PortfolioMatrix {
    /// Per-sub-category figures with a `Category_Type` quadrant column
    pub table: AggTable,
    pub sales_median: f64,
    pub margin_median: f64,
}

impl PortfolioMatrix {
    /// Sub-category keys falling in the given quadrant
    pub fn members(&self, quadrant: Quadrant) -> Vec<&str> {
        let label = quadrant.label();
        self.table
            .rows
            .iter()
            .filter(|row| row.tag.as_deref() == Some(label))
            .map(|row| row.key.as_str())
            .collect()
    }
}

/// Build the four-quadrant portfolio matrix over sub-categories
pub fn product_matrix(records: &[EnrichedRecord]) -> Result<PortfolioMatrix> {
    if records.is_empty() {
        let table = AggTable::new(
            "Sub-Category",
            vec![
                "Total_Sales".to_string(),
                "Total_Profit".to_string(),
                "Avg_Profit_Margin".to_string(),
            ],
        )
        .with_tag_column("Category_Type");
        return Ok(PortfolioMatrix {
            table,
            sales_median: 0.0,
            margin_median: 0.0,
        });
    }

    let gb = GroupBy::new(records, |r| r.record.sub_category.clone());
    let total_sales = gb.sum_by(|r| r.record.sales);
    let total_profit = gb.sum_by(|r| r.profit);
    let avg_margin = gb.mean_by(|r| r.profit_margin);

    let sales_values: Vec<f64> = total_sales.iter().map(|(_, v)| *v).collect();
    let margin_values: Vec<f64> = avg_margin.iter().map(|(_, v)| *v).collect();
    let sales_median = stats::median(&sales_values)?;
    let margin_median = stats::median(&margin_values)?;

    let mut table = AggTable::new(
        "Sub-Category",
        vec![
            "Total_Sales".to_string(),
            "Total_Profit".to_string(),
            "Avg_Profit_Margin".to_string(),
        ],
    )
    .with_tag_column("Category_Type");

    for i in 0..total_sales.len() {
        let quadrant = Quadrant::classify(
            total_sales[i].1,
            avg_margin[i].1,
            sales_median,
            margin_median,
        );
        table.push_tagged_row(
            total_sales[i].0.clone(),
            vec![total_sales[i].1, total_profit[i].1, avg_margin[i].1],
            Some(quadrant.label().to_string()),
        )?;
    }
    table.sort_desc_by("Total_Sales")?;

    Ok(PortfolioMatrix {
        table,
        sales_median,
        margin_median,
    })
}
