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

//! Write normalized tables as CSV.

use crate::error::{CsvError, Result};
use pqcperf_core::NormalizedTable;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Configuration for CSV output.
#[derive(Debug, Clone)]
pub struct ToCsvConfig {
    /// Field delimiter (default: ',')
    pub delimiter: u8,
    /// Include header row (default: true)
    pub include_headers: bool,
    /// Quote style for fields (default: necessary)
    pub quote_style: csv::QuoteStyle,
}

impl Default for ToCsvConfig {
    fn default() -> Self {
        Self {
            delimiter: b',',
            include_headers: true,
            quote_style: csv::QuoteStyle::Necessary,
        }
    }
}

impl ToCsvConfig {
    /// `|`-delimited output, as used for the cleaned intermediate speed
    /// tables.
    pub fn pipe_delimited() -> Self {
        Self {
            delimiter: b'|',
            ..Self::default()
        }
    }
}

/// Convert a table to a CSV string.
///
/// Blank metric cells are written as empty fields.
///
/// # Example
/// ```
/// use pqcperf_core::{MetricRow, NormalizedTable};
/// use pqcperf_csv::to_csv;
///
/// let mut table = NormalizedTable::new(["Algorithm", "Operation", "maxBytes"]);
/// let mut row = MetricRow::new(["HQC-128", "keygen"]);
/// row.push_metric("12792");
/// table.push_row(row).unwrap();
/// table.push_row(MetricRow::blank(["HQC-128", "encaps"], 1)).unwrap();
///
/// let csv = to_csv(&table).unwrap();
/// assert_eq!(csv, "Algorithm,Operation,maxBytes\nHQC-128,keygen,12792\nHQC-128,encaps,\n");
/// ```
pub fn to_csv(table: &NormalizedTable) -> Result<String> {
    to_csv_with_config(table, ToCsvConfig::default())
}

/// Convert a table to a CSV string with custom configuration.
pub fn to_csv_with_config(table: &NormalizedTable, config: ToCsvConfig) -> Result<String> {
    let mut buffer = Vec::with_capacity(estimate_csv_size(table));
    to_csv_writer_with_config(table, &mut buffer, config)?;
    String::from_utf8(buffer).map_err(|_| CsvError::InvalidUtf8 {
        context: "CSV output".to_string(),
    })
}

/// Write a table to CSV format with custom configuration.
///
/// # Errors
///
/// Fails on a row whose width differs from the header, or when the
/// underlying writer fails.
pub fn to_csv_writer_with_config<W: Write>(
    table: &NormalizedTable,
    writer: W,
    config: ToCsvConfig,
) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(config.delimiter)
        .quote_style(config.quote_style)
        .flexible(true)
        .from_writer(writer);

    if config.include_headers {
        wtr.write_record(table.columns())?;
    }

    let width = table.columns().len();
    for (idx, row) in table.rows().iter().enumerate() {
        if row.width() != width {
            return Err(CsvError::WidthMismatch {
                expected: width,
                actual: row.width(),
                row: idx + 1,
            });
        }
        wtr.write_record(row.cells())?;
    }

    wtr.flush()
        .map_err(|e| CsvError::Csv(csv::Error::from(e)))?;
    Ok(())
}

/// Write a table to `path`, creating parent directories and replacing any
/// existing file.
pub fn write_table(path: &Path, table: &NormalizedTable, config: &ToCsvConfig) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| CsvError::io_error(parent, e))?;
    }

    let file = File::create(path).map_err(|e| CsvError::io_error(path, e))?;
    to_csv_writer_with_config(table, BufWriter::new(file), config.clone())
        .map_err(|e| e.with_path(path))?;

    tracing::debug!(
        path = %path.display(),
        rows = table.len(),
        blank_rows = table.blank_rows(),
        "wrote table"
    );
    Ok(())
}

/// Rough output size: header plus an average of 12 bytes per cell.
fn estimate_csv_size(table: &NormalizedTable) -> usize {
    let header: usize = table.columns().iter().map(|c| c.len() + 1).sum();
    header + table.len() * table.columns().len() * 12
}

#[cfg(test)]
mod tests {
    use super::*;
    use pqcperf_core::MetricRow;

    fn handshake_table() -> NormalizedTable {
        let mut table = NormalizedTable::new([
            "Signing Algorithm",
            "KEM Algorithm",
            "Reused Session ID",
            "Connections in User Time",
        ]);
        let mut first = MetricRow::new(["mldsa44", "mlkem512", ""]);
        first.push_metric("10");
        table.push_row(first).unwrap();
        let mut reused = MetricRow::new(["mldsa44", "mlkem512", "*"]);
        reused.push_metric("15");
        table.push_row(reused).unwrap();
        table
    }

    #[test]
    fn test_headers_and_rows() {
        let csv = to_csv(&handshake_table()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(
            lines[0],
            "Signing Algorithm,KEM Algorithm,Reused Session ID,Connections in User Time"
        );
        assert_eq!(lines[1], "mldsa44,mlkem512,,10");
        assert_eq!(lines[2], "mldsa44,mlkem512,*,15");
    }

    #[test]
    fn test_without_headers() {
        let config = ToCsvConfig {
            include_headers: false,
            ..Default::default()
        };
        let csv = to_csv_with_config(&handshake_table(), config).unwrap();
        assert_eq!(csv.lines().count(), 2);
    }

    #[test]
    fn test_pipe_delimited() {
        let csv = to_csv_with_config(&handshake_table(), ToCsvConfig::pipe_delimited()).unwrap();
        assert!(csv.starts_with("Signing Algorithm|KEM Algorithm|"));
        assert!(csv.contains("mldsa44|mlkem512||10\n"));
    }

    #[test]
    fn test_quotes_cells_with_delimiter() {
        let mut table = NormalizedTable::new(["Operation", "Time (us): mean"]);
        let mut row = MetricRow::new(["keygen"]);
        row.push_metric("1,5");
        table.push_row(row).unwrap();

        let csv = to_csv(&table).unwrap();
        assert!(csv.contains("keygen,\"1,5\""));
    }

    #[test]
    fn test_empty_table_writes_header_only() {
        let table = NormalizedTable::new(["Algorithm", "Operation"]);
        assert_eq!(to_csv(&table).unwrap(), "Algorithm,Operation\n");
    }

    #[test]
    fn test_write_table_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results").join("machine_1").join("t.csv");

        write_table(&path, &handshake_table(), &ToCsvConfig::default()).unwrap();
        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written.lines().count(), 3);

        // Rewriting replaces the previous content.
        let table = NormalizedTable::new(["Signing Algorithm"]);
        write_table(&path, &table, &ToCsvConfig::default()).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "Signing Algorithm\n");
    }
}
