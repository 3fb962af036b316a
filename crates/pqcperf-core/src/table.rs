// Dweve PQC Perf - Benchmark Result Normalization
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Positional metric rows and the normalized tables built from them.

use crate::error::{CoreError, Result};

/// One metric cell: `None` when the metric is unavailable.
///
/// A blank cell is a placeholder, never omitted, so that every row keeps the
/// width of its table.
pub type MetricField = Option<String>;

/// One output record: leading label cells followed by metric cells.
///
/// # Examples
///
/// ```
/// use pqcperf_core::MetricRow;
///
/// let mut row = MetricRow::new(["ML-KEM-512", "keygen"]);
/// row.push_metric("15872");
/// row.push_blanks(1);
/// assert_eq!(row.width(), 4);
/// assert_eq!(row.cells().collect::<Vec<_>>(), vec!["ML-KEM-512", "keygen", "15872", ""]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetricRow {
    labels: Vec<String>,
    metrics: Vec<MetricField>,
}

impl MetricRow {
    /// Create a row with label cells and no metrics yet.
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            labels: labels.into_iter().map(Into::into).collect(),
            metrics: Vec::new(),
        }
    }

    /// Create a row from labels and metric cells.
    pub fn with_metrics<I, S>(labels: I, metrics: Vec<MetricField>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut row = Self::new(labels);
        row.metrics = metrics;
        row
    }

    /// Create a row whose metrics are all blank.
    pub fn blank<I, S>(labels: I, width: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_metrics(labels, vec![None; width])
    }

    /// Append one present metric.
    pub fn push_metric(&mut self, value: impl Into<String>) {
        self.metrics.push(Some(value.into()));
    }

    /// Append metric cells.
    pub fn extend_metrics<I>(&mut self, values: I)
    where
        I: IntoIterator<Item = MetricField>,
    {
        self.metrics.extend(values);
    }

    /// Append `count` blank placeholders.
    pub fn push_blanks(&mut self, count: usize) {
        self.metrics.extend(std::iter::repeat(None).take(count));
    }

    /// Insert a label cell at `index` among the labels.
    pub fn insert_label(&mut self, index: usize, label: impl Into<String>) {
        self.labels.insert(index, label.into());
    }

    /// Label cells.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Metric cells.
    pub fn metrics(&self) -> &[MetricField] {
        &self.metrics
    }

    /// Cell at `column`, labels first; blanks read as `""`.
    pub fn cell(&self, column: usize) -> Option<&str> {
        if column < self.labels.len() {
            return Some(self.labels[column].as_str());
        }
        self.metrics
            .get(column - self.labels.len())
            .map(|field| field.as_deref().unwrap_or(""))
    }

    /// Total number of cells.
    pub fn width(&self) -> usize {
        self.labels.len() + self.metrics.len()
    }

    /// Whether the row carries metric cells and all of them are blank.
    pub fn is_blank(&self) -> bool {
        !self.metrics.is_empty() && self.metrics.iter().all(Option::is_none)
    }

    /// All cells in order, blanks as `""`.
    pub fn cells(&self) -> impl Iterator<Item = &str> + '_ {
        self.labels.iter().map(String::as_str).chain(
            self.metrics
                .iter()
                .map(|field| field.as_deref().unwrap_or("")),
        )
    }
}

/// Ordered rows for one (machine, run, category) triple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedTable {
    columns: Vec<String>,
    rows: Vec<MetricRow>,
}

impl NormalizedTable {
    /// Create an empty table with the given column names.
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row; its width must equal the column count.
    pub fn push_row(&mut self, row: MetricRow) -> Result<()> {
        if row.width() != self.columns.len() {
            return Err(CoreError::WidthMismatch {
                expected: self.columns.len(),
                actual: row.width(),
                row: self.rows.len() + 1,
            });
        }
        self.rows.push(row);
        Ok(())
    }

    /// Column names.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Rows in insertion order.
    pub fn rows(&self) -> &[MetricRow] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of rows whose metrics are all blank.
    pub fn blank_rows(&self) -> usize {
        self.rows.iter().filter(|row| row.is_blank()).count()
    }

    /// Keep only the rows matching `keep`.
    pub fn retain<F>(&mut self, keep: F)
    where
        F: FnMut(&MetricRow) -> bool,
    {
        self.rows.retain(keep);
    }

    /// Index of a column by name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    /// Prepend a label column, one label per existing row.
    pub fn prepend_label_column<I, S>(&mut self, name: &str, labels: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        if labels.len() != self.rows.len() {
            return Err(CoreError::WidthMismatch {
                expected: self.rows.len(),
                actual: labels.len(),
                row: labels.len().min(self.rows.len()) + 1,
            });
        }

        self.columns.insert(0, name.to_string());
        for (row, label) in self.rows.iter_mut().zip(labels) {
            row.insert_label(0, label);
        }
        Ok(())
    }

    /// Rows whose cell in `column` contains `needle` as a substring.
    ///
    /// Handshake tables are split per signature algorithm this way; a name
    /// contained in another (`mldsa44` in `p256_mldsa44`) selects both.
    pub fn filter_contains(&self, column: usize, needle: &str) -> NormalizedTable {
        let rows = self
            .rows
            .iter()
            .filter(|row| row.cell(column).is_some_and(|cell| cell.contains(needle)))
            .cloned()
            .collect();
        NormalizedTable {
            columns: self.columns.clone(),
            rows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{MEMORY_COLUMNS, PQC_HANDSHAKE_COLUMNS};

    fn memory_row(alg: &str, op: &str) -> MetricRow {
        MetricRow::with_metrics(
            [alg, op],
            vec![
                Some("1".to_string()),
                Some("2".to_string()),
                Some("3".to_string()),
                Some("4".to_string()),
                Some("5".to_string()),
            ],
        )
    }

    #[test]
    fn test_push_row_checks_width() {
        let mut table = NormalizedTable::new(MEMORY_COLUMNS);
        table.push_row(memory_row("BIKE-L1", "keygen")).unwrap();

        let err = table
            .push_row(MetricRow::blank(["BIKE-L1", "encaps"], 4))
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::WidthMismatch { expected: 7, actual: 6, row: 2 }
        ));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_blank_rows_counted() {
        let mut table = NormalizedTable::new(MEMORY_COLUMNS);
        table.push_row(memory_row("BIKE-L1", "keygen")).unwrap();
        table.push_row(MetricRow::blank(["BIKE-L1", "encaps"], 5)).unwrap();
        assert_eq!(table.blank_rows(), 1);
        assert_eq!(table.rows()[1].cell(4), Some(""));
    }

    #[test]
    fn test_row_without_metrics_is_not_blank() {
        let row = MetricRow::new(["label"]);
        assert!(!row.is_blank());
        assert_eq!(row.cell(1), None);
    }

    #[test]
    fn test_prepend_label_column() {
        let mut table = NormalizedTable::new(["Operation", "Iterations"]);
        table
            .push_row(MetricRow::with_metrics(["keygen"], vec![Some("10".into())]))
            .unwrap();
        table
            .push_row(MetricRow::with_metrics(["encaps"], vec![Some("12".into())]))
            .unwrap();

        table
            .prepend_label_column("Algorithm", ["HQC-128", "HQC-128"])
            .unwrap();
        assert_eq!(table.columns()[0], "Algorithm");
        assert_eq!(
            table.rows()[1].cells().collect::<Vec<_>>(),
            vec!["HQC-128", "encaps", "12"]
        );
    }

    #[test]
    fn test_prepend_label_column_length_mismatch() {
        let mut table = NormalizedTable::new(["Operation"]);
        table.push_row(MetricRow::new(["keygen"])).unwrap();
        assert!(table.prepend_label_column("Algorithm", Vec::<String>::new()).is_err());
        assert_eq!(table.columns().len(), 1);
    }

    #[test]
    fn test_filter_contains_uses_substring() {
        let mut table = NormalizedTable::new(PQC_HANDSHAKE_COLUMNS);
        for sig in ["mldsa44", "p256_mldsa44", "falcon512"] {
            table.push_row(MetricRow::blank([sig, "mlkem512", ""], 5)).unwrap();
        }

        let subset = table.filter_contains(0, "mldsa44");
        assert_eq!(subset.len(), 2);
        assert_eq!(subset.columns(), table.columns());

        assert_eq!(table.filter_contains(0, "falcon512").len(), 1);
        assert!(table.filter_contains(0, "sphincs").is_empty());
    }

    #[test]
    fn test_column_index() {
        let table = NormalizedTable::new(PQC_HANDSHAKE_COLUMNS);
        assert_eq!(table.column_index("Signing Algorithm"), Some(0));
        assert_eq!(table.column_index("Real Time (s)"), Some(7));
        assert_eq!(table.column_index("missing"), None);
    }
}
