//! Grouping and aggregation over record slices
//!
//! `GroupBy` partitions a slice of rows by a key function: one group per
//! distinct key present in the input, every row attributed to exactly
//! one group, and no zero-filling for absent keys. Groups iterate in
//! first-appearance order, which also serves as the stable tie-break
//! when aggregate tables are sorted by a measure.

use std::collections::{HashMap, HashSet};
use std::fmt::Debug;
use std::hash::Hash;

use crate::error::{Error, Result};

/// Rows of a slice partitioned by a grouping key
#[derive(Debug)]
pub struct GroupBy<'a, K, R>
where
    K: Debug + Eq + Hash + Clone,
{
    /// Row indices per key
    groups: HashMap<K, Vec<usize>>,
    /// Keys in first-appearance order
    key_order: Vec<K>,
    /// Source rows
    source: &'a [R],
}

impl<'a, K, R> GroupBy<'a, K, R>
where
    K: Debug + Eq + Hash + Clone,
{
    /// Group rows by the given key function
    pub fn new<F>(source: &'a [R], key_fn: F) -> Self
    where
        F: Fn(&R) -> K,
    {
        let mut groups: HashMap<K, Vec<usize>> = HashMap::new();
        let mut key_order = Vec::new();

        for (i, row) in source.iter().enumerate() {
            let key = key_fn(row);
            let entry = groups.entry(key.clone()).or_default();
            if entry.is_empty() {
                key_order.push(key);
            }
            entry.push(i);
        }

        GroupBy {
            groups,
            key_order,
            source,
        }
    }

    /// Number of distinct groups
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Keys in first-appearance order
    pub fn keys(&self) -> &[K] {
        &self.key_order
    }

    /// Rows of one group, in input order
    pub fn rows<'b>(&'b self, key: &K) -> impl Iterator<Item = &'a R> + 'b {
        let source = self.source;
        self.groups
            .get(key)
            .map(|indices| indices.as_slice())
            .unwrap_or(&[])
            .iter()
            .map(move |&i| &source[i])
    }

    /// Row count per group, in key order
    pub fn sizes(&self) -> Vec<(K, usize)> {
        self.key_order
            .iter()
            .map(|k| (k.clone(), self.groups[k].len()))
            .collect()
    }

    /// Sum of a measure per group, in key order
    pub fn sum_by<F>(&self, measure: F) -> Vec<(K, f64)>
    where
        F: Fn(&R) -> f64,
    {
        self.key_order
            .iter()
            .map(|k| (k.clone(), self.rows(k).map(&measure).sum()))
            .collect()
    }

    /// Mean of a measure per group, in key order
    ///
    /// Groups are never empty by construction, so the division is safe.
    pub fn mean_by<F>(&self, measure: F) -> Vec<(K, f64)>
    where
        F: Fn(&R) -> f64,
    {
        self.key_order
            .iter()
            .map(|k| {
                let n = self.groups[k].len() as f64;
                let total: f64 = self.rows(k).map(&measure).sum();
                (k.clone(), total / n)
            })
            .collect()
    }

    /// Count of distinct values of a field per group, in key order
    pub fn distinct_by<F, V>(&self, field: F) -> Vec<(K, usize)>
    where
        F: Fn(&R) -> V,
        V: Eq + Hash,
    {
        self.key_order
            .iter()
            .map(|k| {
                let distinct: HashSet<V> = self.rows(k).map(&field).collect();
                (k.clone(), distinct.len())
            })
            .collect()
    }
}

/// One row of an aggregate table
#[derive(Debug, Clone, PartialEq)]
pub struct AggRow {
    /// Display label of the group key
    pub key: String,
    /// Measure values in column order
    pub values: Vec<f64>,
    /// Classification label, present when the table has a tag column
    pub tag: Option<String>,
}

/// Aggregate result table: one row per group key, named measure columns
///
/// Recomputed fresh on each report run; never persisted as
/// authoritative state.
#[derive(Debug, Clone)]
pub struct AggTable {
    /// Name of the grouping dimension
    pub key_name: String,
    /// Measure column names
    pub columns: Vec<String>,
    /// Name of the classification column, if rows carry tags
    pub tag_column: Option<String>,
    pub rows: Vec<AggRow>,
}

impl AggTable {
    pub fn new<S: Into<String>>(key_name: S, columns: Vec<String>) -> Self {
        AggTable {
            key_name: key_name.into(),
            columns,
            tag_column: None,
            rows: Vec::new(),
        }
    }

    /// Declare a trailing classification column for tagged rows
    pub fn with_tag_column<S: Into<String>>(mut self, name: S) -> Self {
        self.tag_column = Some(name.into());
        self
    }

    /// Append a row; the value count must match the column count
    pub fn push_row<S: Into<String>>(&mut self, key: S, values: Vec<f64>) -> Result<()> {
        self.push_tagged_row(key, values, None)
    }

    /// Append a row with a classification tag
    pub fn push_tagged_row<S: Into<String>>(
        &mut self,
        key: S,
        values: Vec<f64>,
        tag: Option<String>,
    ) -> Result<()> {
        if values.len() != self.columns.len() {
            return Err(Error::InvalidValue(format!(
                "Row has {} values but table has {} columns",
                values.len(),
                self.columns.len()
            )));
        }
        self.rows.push(AggRow {
            key: key.into(),
            values,
            tag,
        });
        Ok(())
    }

    /// Index of a measure column by name
    pub fn column_index(&self, column: &str) -> Result<usize> {
        self.columns
            .iter()
            .position(|c| c == column)
            .ok_or_else(|| Error::MissingColumn(column.to_string()))
    }

    /// Value of a measure for a given key
    pub fn get(&self, key: &str, column: &str) -> Option<f64> {
        let idx = self.column_index(column).ok()?;
        self.rows.iter().find(|r| r.key == key).map(|r| r.values[idx])
    }

    /// Sum of one measure column over all rows
    pub fn column_total(&self, column: &str) -> Result<f64> {
        let idx = self.column_index(column)?;
        Ok(self.rows.iter().map(|r| r.values[idx]).sum())
    }

    /// All values of one measure column, in row order
    pub fn column_values(&self, column: &str) -> Result<Vec<f64>> {
        let idx = self.column_index(column)?;
        Ok(self.rows.iter().map(|r| r.values[idx]).collect())
    }

    /// Sort rows by a measure, descending; ties keep insertion order
    pub fn sort_desc_by(&mut self, column: &str) -> Result<()> {
        let idx = self.column_index(column)?;
        self.rows.sort_by(|a, b| {
            b.values[idx]
                .partial_cmp(&a.values[idx])
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        Ok(())
    }

    /// Sort rows by key label, ascending; used for chronological tables
    pub fn sort_asc_by_key(&mut self) {
        self.rows.sort_by(|a, b| a.key.cmp(&b.key));
    }

    /// Keep only the first n rows
    pub fn truncate(&mut self, n: usize) {
        self.rows.truncate(n);
    }

    /// Retain rows matching a predicate over (key, values)
    pub fn retain<F>(&mut self, mut predicate: F)
    where
        F: FnMut(&AggRow) -> bool,
    {
        self.rows.retain(|r| predicate(r));
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Render the table as aligned plain text for narrative reports
    pub fn to_text(&self) -> String {
        let mut widths: Vec<usize> = Vec::with_capacity(self.columns.len() + 1);
        widths.push(
            self.rows
                .iter()
                .map(|r| r.key.len())
                .chain(std::iter::once(self.key_name.len()))
                .max()
                .unwrap_or(0),
        );
        for (i, col) in self.columns.iter().enumerate() {
            let max_value = self
                .rows
                .iter()
                .map(|r| format!("{:.2}", r.values[i]).len())
                .max()
                .unwrap_or(0);
            widths.push(col.len().max(max_value));
        }

        let mut out = String::new();
        out.push_str(&format!("{:<w$}", self.key_name, w = widths[0]));
        for (i, col) in self.columns.iter().enumerate() {
            out.push_str(&format!("  {:>w$}", col, w = widths[i + 1]));
        }
        if let Some(tag_name) = &self.tag_column {
            out.push_str(&format!("  {}", tag_name));
        }
        out.push('\n');
        for row in &self.rows {
            out.push_str(&format!("{:<w$}", row.key, w = widths[0]));
            for (i, value) in row.values.iter().enumerate() {
                out.push_str(&format!("  {:>w$.2}", value, w = widths[i + 1]));
            }
            if self.tag_column.is_some() {
                out.push_str(&format!("  {}", row.tag.as_deref().unwrap_or("")));
            }
            out.push('\n');
        }
        out
    }
}
