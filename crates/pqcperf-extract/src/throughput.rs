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

//! Throughput extraction from `openssl speed` tables.
//!
//! The table starts after a header line: one containing `keygens/s` (KEM
//! tables) or one containing both `sign` and `verify` (signature tables).
//! Every later non-blank line is a data row: an algorithm label followed by
//! operation times (`0.000016s`) and rates.

use crate::error::{ExtractError, Result};
use pqcperf_core::schema::{KEM_SPEED_COLUMNS, SIG_SPEED_COLUMNS};
use pqcperf_core::{AlgorithmFamily, MetricRow, NormalizedTable, ReadLimits};
use std::path::Path;

const UNIT_SUFFIX: char = 's';

/// Output schema of a throughput table.
pub fn throughput_columns(family: AlgorithmFamily) -> &'static [&'static str] {
    match family {
        AlgorithmFamily::Kem => &KEM_SPEED_COLUMNS,
        AlgorithmFamily::Sig => &SIG_SPEED_COLUMNS,
    }
}

fn is_table_start(line: &str) -> bool {
    line.contains("keygens/s") || (line.contains("sign") && line.contains("verify"))
}

/// Strip a trailing unit suffix from a numeric cell.
///
/// # Examples
///
/// ```
/// use pqcperf_extract::strip_unit_suffix;
///
/// assert_eq!(strip_unit_suffix("0.000016s"), "0.000016");
/// assert_eq!(strip_unit_suffix("62160.0"), "62160.0");
/// assert_eq!(strip_unit_suffix("bits"), "bits");
/// ```
pub fn strip_unit_suffix(cell: &str) -> &str {
    match cell.strip_suffix(UNIT_SUFFIX) {
        Some(number) if number.parse::<f64>().is_ok() => number,
        _ => cell,
    }
}

/// Parse an `openssl speed` table for one algorithm family.
///
/// No row-count check happens here; the caller validates the table against
/// the family's algorithm list.
///
/// # Errors
///
/// Fails when a data row does not have one cell per schema column.
pub fn parse_throughput_table(text: &str, family: AlgorithmFamily) -> Result<NormalizedTable> {
    let columns = throughput_columns(family);
    let mut table = NormalizedTable::new(columns.iter().copied());
    let mut started = false;

    for (line_idx, line) in text.lines().enumerate() {
        if !started {
            if is_table_start(line) {
                tracing::debug!(line = line_idx + 1, %family, "speed table header found");
                started = true;
            }
            continue;
        }

        let cells: Vec<&str> = line.split_whitespace().collect();
        if cells.is_empty() {
            continue;
        }
        if cells.len() != columns.len() {
            return Err(ExtractError::WidthMismatch {
                expected: columns.len(),
                actual: cells.len(),
                line: line_idx + 1,
            });
        }

        let mut row = MetricRow::new([cells[0]]);
        for cell in &cells[1..] {
            row.push_metric(strip_unit_suffix(cell));
        }
        table.push_row(row)?;
    }

    if !started {
        tracing::debug!(%family, "no speed table header found");
    }

    Ok(table)
}

/// Read an `openssl speed` output file and parse its table.
pub fn read_throughput_table(
    path: &Path,
    family: AlgorithmFamily,
    limits: &ReadLimits,
) -> Result<NormalizedTable> {
    let text = limits.read_to_string(path)?;
    parse_throughput_table(&text, family).map_err(|e| e.in_file(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEM_SPEED: &str = "\
version: 3.5.0
built on: Tue Apr  8 13:02:55 2025 UTC
options: bn(64,64)
CPUINFO: OPENSSL_ia32cap=0xfffa3203578bffff:0x7a9
                               keygen    encaps    decaps keygens/s  encaps/s  decaps/s
                 mlkem512 0.000016s 0.000017s 0.000020s   62160.0   58843.4   50296.8
                 mlkem768 0.000026s 0.000025s 0.000030s   38942.6   40002.1   33120.9
";

    const SIG_SPEED: &str = "\
version: 3.5.0
                               keygen     signs    verify keygens/s    sign/s  verify/s
                  mldsa44 0.000048s 0.000120s 0.000046s   20833.3    8333.3   21739.1
";

    #[test]
    fn test_kem_table() {
        let table = parse_throughput_table(KEM_SPEED, AlgorithmFamily::Kem).unwrap();
        assert_eq!(table.columns()[4], "Keygen/s");
        assert_eq!(table.len(), 2);
        assert_eq!(
            table.rows()[0].cells().collect::<Vec<_>>(),
            vec!["mlkem512", "0.000016", "0.000017", "0.000020", "62160.0", "58843.4", "50296.8"]
        );
    }

    #[test]
    fn test_sig_table_uses_sig_schema() {
        let table = parse_throughput_table(SIG_SPEED, AlgorithmFamily::Sig).unwrap();
        assert_eq!(table.columns()[2], "Signs");
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows()[0].cell(2), Some("0.000120"));
    }

    #[test]
    fn test_sign_verify_sentinel() {
        let text = "header\n  sign verify sign/s verify/s\nrsa 1s 2s 3 4 5 6\n";
        let table = parse_throughput_table(text, AlgorithmFamily::Sig).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows()[0].cell(1), Some("1"));
    }

    #[test]
    fn test_no_header_yields_empty_table() {
        let table = parse_throughput_table("version: 3.5.0\n", AlgorithmFamily::Kem).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.columns().len(), 7);
    }

    #[test]
    fn test_blank_lines_skipped() {
        let text = format!("{}\n\n", KEM_SPEED);
        let table = parse_throughput_table(&text, AlgorithmFamily::Kem).unwrap();
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_short_row_rejected() {
        let text = format!("{}    frodo640aes 0.0003s 0.0004s\n", KEM_SPEED);
        let err = parse_throughput_table(&text, AlgorithmFamily::Kem).unwrap_err();
        assert!(matches!(
            err,
            ExtractError::WidthMismatch { expected: 7, actual: 3, line: 8 }
        ));
    }

    #[test]
    fn test_label_keeps_suffix() {
        let text = "keygens/s\nmlkems 1s 2s 3s 4 5 6\n";
        let table = parse_throughput_table(text, AlgorithmFamily::Kem).unwrap();
        assert_eq!(table.rows()[0].cell(0), Some("mlkems"));
        assert_eq!(table.rows()[0].cell(3), Some("3"));
    }
}
