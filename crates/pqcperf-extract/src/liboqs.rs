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

//! liboqs `speed_kem` / `speed_sig` table extraction.
//!
//! The benchmark prints system information, a `|`-delimited table and a
//! closing timestamp line:
//!
//! ```text
//! Started at 2025-01-01 10:00:00
//! Operation                      | Iterations | Total time (s) | Time (us): mean | ...
//! ------------------------------ | ----------:| --------------:| ---------------:| ...
//! ML-KEM-512                     |            |                |                 | ...
//! keygen                         |     161257 |          3.000 |          18.604 | ...
//! Ended at 2025-01-01 10:00:09
//! ```
//!
//! Rows naming an algorithm group the three operation rows below them.

use crate::error::{ExtractError, Result};
use pqcperf_core::{MetricRow, NormalizedTable, ReadLimits};
use std::path::Path;

/// First cell of the header line.
pub const OPERATION_HEADER: &str = "Operation";

const CELL_DELIMITER: char = '|';

fn is_separator(line: &str) -> bool {
    !line.trim().is_empty()
        && line
            .chars()
            .all(|c| matches!(c, '-' | ':' | '|' | ' ' | '\t'))
}

fn split_cells(line: &str) -> Vec<&str> {
    line.split(CELL_DELIMITER).map(str::trim).collect()
}

/// Parse the operation table, keeping the algorithm group rows.
///
/// Cells are trimmed; empty metric cells become blanks. The first column
/// (`Operation`) becomes the row label.
///
/// # Errors
///
/// Fails when no `Operation` header line exists or a row has a different
/// number of cells than the header.
pub fn parse_operation_table(text: &str) -> Result<NormalizedTable> {
    let lines: Vec<&str> = text.lines().collect();
    let header_idx = lines
        .iter()
        .position(|line| line.starts_with(OPERATION_HEADER))
        .ok_or(ExtractError::MissingHeader {
            sentinel: OPERATION_HEADER,
        })?;

    let columns = split_cells(lines[header_idx]);
    let mut table = NormalizedTable::new(columns.iter().copied());

    // The closing timestamp line is the last non-blank line without cells.
    let mut end = lines.len();
    while end > header_idx + 1 && lines[end - 1].trim().is_empty() {
        end -= 1;
    }
    if end > header_idx + 1 && !lines[end - 1].contains(CELL_DELIMITER) {
        end -= 1;
    }

    for (offset, line) in lines[header_idx + 1..end].iter().enumerate() {
        let line_no = header_idx + offset + 2;
        if line.trim().is_empty() || is_separator(line) {
            continue;
        }

        let cells = split_cells(line);
        if cells.len() != columns.len() {
            return Err(ExtractError::WidthMismatch {
                expected: columns.len(),
                actual: cells.len(),
                line: line_no,
            });
        }

        let metrics = cells[1..]
            .iter()
            .map(|cell| (!cell.is_empty()).then(|| cell.to_string()))
            .collect();
        table.push_row(MetricRow::with_metrics([cells[0]], metrics))?;
    }

    Ok(table)
}

/// Drop the algorithm group rows, leaving only operation rows.
pub fn retain_operation_rows(table: &mut NormalizedTable, algorithms: &[String]) {
    table.retain(|row| {
        row.labels()
            .first()
            .map_or(true, |label| !algorithms.iter().any(|alg| alg == label))
    });
}

/// Read a raw liboqs speed file and parse its operation table.
pub fn read_operation_table(path: &Path, limits: &ReadLimits) -> Result<NormalizedTable> {
    let text = limits.read_to_string(path)?;
    parse_operation_table(&text).map_err(|e| e.in_file(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPEED_KEM: &str = "\
Configuration info
==================
Target platform:  x86_64-Linux-6.8.0
Compiler:         gcc (13.2.0)
Started at 2025-01-01 10:00:00
Operation                      | Iterations | Total time (s) | Time (us): mean | pop. stdev | CPU cycles: mean          | pop. stdev
------------------------------ | ----------:| --------------:| ---------------:| ----------:| -------------------------:| ----------:
ML-KEM-512                     |            |                |                 |            |                           |           
keygen                         |     161257 |          3.000 |          18.604 |      1.021 |                     55718 |       3052
encaps                         |     150893 |          3.000 |          19.882 |      0.917 |                     59546 |       2739
decaps                         |     119624 |          3.000 |          25.079 |      1.006 |                     75113 |       3008
Ended at 2025-01-01 10:00:09
";

    #[test]
    fn test_parse_keeps_group_rows() {
        let table = parse_operation_table(SPEED_KEM).unwrap();
        assert_eq!(table.columns().len(), 7);
        assert_eq!(table.columns()[0], "Operation");
        assert_eq!(table.columns()[3], "Time (us): mean");
        assert_eq!(table.len(), 4);
        assert!(table.rows()[0].is_blank());
        assert_eq!(
            table.rows()[1].cells().collect::<Vec<_>>(),
            vec!["keygen", "161257", "3.000", "18.604", "1.021", "55718", "3052"]
        );
    }

    #[test]
    fn test_retain_operation_rows() {
        let mut table = parse_operation_table(SPEED_KEM).unwrap();
        retain_operation_rows(&mut table, &["ML-KEM-512".to_string()]);
        let ops: Vec<_> = table.rows().iter().map(|r| r.labels()[0].as_str()).collect();
        assert_eq!(ops, vec!["keygen", "encaps", "decaps"]);
    }

    #[test]
    fn test_unlisted_algorithm_row_survives() {
        let mut table = parse_operation_table(SPEED_KEM).unwrap();
        retain_operation_rows(&mut table, &["ML-KEM-768".to_string()]);
        assert_eq!(table.len(), 4);
    }

    #[test]
    fn test_missing_header() {
        let err = parse_operation_table("Configuration info\nEnded at now\n").unwrap_err();
        assert!(matches!(err, ExtractError::MissingHeader { .. }));
    }

    #[test]
    fn test_footer_only_dropped_once() {
        let text = "Operation | Iterations\nkeygen | 10\n\n";
        let table = parse_operation_table(text).unwrap();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_ragged_row_rejected() {
        let text = "Operation | Iterations | Total\nkeygen | 10\nEnded\n";
        let err = parse_operation_table(text).unwrap_err();
        assert!(matches!(
            err,
            ExtractError::WidthMismatch { expected: 3, actual: 2, line: 2 }
        ));
    }
}
