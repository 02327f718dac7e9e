use storelens::error::Error;
use storelens::groupby::{AggTable, GroupBy};

struct Order {
    city: &'static str,
    order_id: &'static str,
    amount: f64,
}

fn orders() -> Vec<Order> {
    vec![
        Order { city: "Austin", order_id: "A-1", amount: 120.0 },
        Order { city: "Boston", order_id: "B-1", amount: 80.0 },
        Order { city: "Austin", order_id: "A-2", amount: 30.0 },
        Order { city: "Chicago", order_id: "C-1", amount: 200.0 },
        Order { city: "Boston", order_id: "B-1", amount: 50.0 },
        Order { city: "Austin", order_id: "A-1", amount: 10.0 },
    ]
}

#[test]
fn test_keys_follow_first_appearance_order() {
    let rows = orders();
    let gb = GroupBy::new(&rows, |o| o.city);
    assert_eq!(gb.group_count(), 3);
    assert_eq!(gb.keys(), &["Austin", "Boston", "Chicago"]);
    assert_eq!(
        gb.sizes(),
        vec![("Austin", 3), ("Boston", 2), ("Chicago", 1)]
    );
}

#[test]
fn test_group_rows_preserve_input_order() {
    let rows = orders();
    let gb = GroupBy::new(&rows, |o| o.city);
    let amounts: Vec<f64> = gb.rows(&"Austin").map(|o| o.amount).collect();
    assert_eq!(amounts, vec![120.0, 30.0, 10.0]);
}

#[test]
fn test_sum_mean_and_distinct() {
    let rows = orders();
    let gb = GroupBy::new(&rows, |o| o.city);

    let sums = gb.sum_by(|o| o.amount);
    assert_eq!(sums[0], ("Austin", 160.0));
    assert_eq!(sums[1], ("Boston", 130.0));
    assert_eq!(sums[2], ("Chicago", 200.0));

    let means = gb.mean_by(|o| o.amount);
    assert!((means[1].1 - 65.0).abs() < 1e-9);

    // Boston has two rows but a single distinct order id
    let distinct = gb.distinct_by(|o| o.order_id);
    assert_eq!(distinct[0], ("Austin", 2));
    assert_eq!(distinct[1], ("Boston", 1));
}

#[test]
fn test_group_sums_conserve_the_total() {
    let rows = orders();
    let total: f64 = rows.iter().map(|o| o.amount).sum();
    let gb = GroupBy::new(&rows, |o| o.city);
    let grouped: f64 = gb.sum_by(|o| o.amount).iter().map(|(_, v)| v).sum();
    assert!((grouped - total).abs() < 1e-9);
}

#[test]
fn test_empty_input_yields_no_groups() {
    let rows: Vec<Order> = Vec::new();
    let gb = GroupBy::new(&rows, |o| o.city);
    assert!(gb.is_empty());
    assert_eq!(gb.group_count(), 0);
    assert!(gb.keys().is_empty());
    assert!(gb.sum_by(|o| o.amount).is_empty());
}

#[test]
fn test_table_rejects_mismatched_row_width() {
    let mut table = AggTable::new("City", vec!["Sales".to_string(), "Orders".to_string()]);
    let err = table.push_row("Austin", vec![1.0]).unwrap_err();
    assert!(matches!(err, Error::InvalidValue(_)));
    assert!(table.is_empty());
}

#[test]
fn test_table_lookup_and_totals() -> Result<(), Error> {
    let mut table = AggTable::new("City", vec!["Sales".to_string()]);
    table.push_row("Austin", vec![160.0])?;
    table.push_row("Boston", vec![130.0])?;

    assert_eq!(table.get("Boston", "Sales"), Some(130.0));
    assert_eq!(table.get("Dallas", "Sales"), None);
    assert_eq!(table.column_total("Sales")?, 290.0);
    assert_eq!(table.column_values("Sales")?, vec![160.0, 130.0]);
    assert!(matches!(
        table.column_index("Profit"),
        Err(Error::MissingColumn(_))
    ));
    Ok(())
}

#[test]
fn test_sort_desc_keeps_insertion_order_on_ties() -> Result<(), Error> {
    let mut table = AggTable::new("City", vec!["Sales".to_string()]);
    table.push_row("Austin", vec![100.0])?;
    table.push_row("Boston", vec![300.0])?;
    table.push_row("Chicago", vec![100.0])?;
    table.push_row("Dallas", vec![200.0])?;

    table.sort_desc_by("Sales")?;
    let keys: Vec<&str> = table.rows.iter().map(|r| r.key.as_str()).collect();
    assert_eq!(keys, vec!["Boston", "Dallas", "Austin", "Chicago"]);

    table.truncate(2);
    assert_eq!(table.row_count(), 2);
    Ok(())
}

#[test]
fn test_sort_asc_by_key_orders_period_labels() -> Result<(), Error> {
    let mut table = AggTable::new("Month", vec!["Sales".to_string()]);
    table.push_row("2023-03", vec![1.0])?;
    table.push_row("2022-11", vec![2.0])?;
    table.push_row("2023-01", vec![3.0])?;

    table.sort_asc_by_key();
    let keys: Vec<&str> = table.rows.iter().map(|r| r.key.as_str()).collect();
    assert_eq!(keys, vec!["2022-11", "2023-01", "2023-03"]);
    Ok(())
}

#[test]
fn test_retain_filters_rows() -> Result<(), Error> {
    let mut table = AggTable::new("City", vec!["Sales".to_string()]);
    table.push_row("Austin", vec![160.0])?;
    table.push_row("Boston", vec![30.0])?;
    table.push_row("Chicago", vec![200.0])?;

    table.retain(|row| row.values[0] >= 100.0);
    let keys: Vec<&str> = table.rows.iter().map(|r| r.key.as_str()).collect();
    assert_eq!(keys, vec!["Austin", "Chicago"]);
    Ok(())
}

#[test]
fn test_text_rendering_includes_tag_column() -> Result<(), Error> {
    let mut table = AggTable::new("City", vec!["Sales".to_string()])
        .with_tag_column("Tier");
    table.push_tagged_row("Austin", vec![160.0], Some("High".to_string()))?;
    table.push_tagged_row("Boston", vec![30.0], Some("Low".to_string()))?;

    let text = table.to_text();
    let mut lines = text.lines();
    let header = lines.next().unwrap();
    assert!(header.contains("City"));
    assert!(header.contains("Sales"));
    assert!(header.contains("Tier"));
    assert!(text.contains("160.00"));
    assert!(text.contains("High"));
    Ok(())
}
