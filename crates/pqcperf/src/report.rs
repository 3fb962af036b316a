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

//! Record of the tables written by a parse run.

use std::fmt;
use std::path::PathBuf;

/// One normalized table written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct WrittenTable {
    /// Result category, e.g. `"KEM Memory Results"`.
    pub category: String,
    /// Run number.
    pub run: u32,
    /// Output file.
    pub path: PathBuf,
    /// Rows written (header excluded).
    pub rows: usize,
    /// Rows written as blank placeholders.
    pub blank_rows: usize,
}

/// Tables written for one machine, in write order.
///
/// This is the handoff to the averaging stage: every listed table passed
/// its cardinality check.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ParseReport {
    /// Machine whose results were parsed.
    pub machine_id: u32,
    /// Written tables.
    pub tables: Vec<WrittenTable>,
}

impl ParseReport {
    /// Empty report for `machine_id`.
    pub fn new(machine_id: u32) -> Self {
        Self {
            machine_id,
            tables: Vec::new(),
        }
    }

    /// Append a written table.
    pub fn push(&mut self, table: WrittenTable) {
        self.tables.push(table);
    }

    /// Append every table of `other`.
    pub fn merge(&mut self, other: ParseReport) {
        self.tables.extend(other.tables);
    }

    /// Number of written tables.
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Whether nothing was written.
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Total placeholder rows across all tables.
    pub fn blank_rows(&self) -> usize {
        self.tables.iter().map(|t| t.blank_rows).sum()
    }

    /// Tables of one category.
    pub fn category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a WrittenTable> + 'a {
        self.tables.iter().filter(move |t| t.category == category)
    }
}

impl fmt::Display for ParseReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Machine-ID ({}): {} tables written, {} blank rows",
            self.machine_id,
            self.len(),
            self.blank_rows()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn written(category: &str, blank_rows: usize) -> WrittenTable {
        WrittenTable {
            category: category.to_string(),
            run: 1,
            path: PathBuf::from("x.csv"),
            rows: 6,
            blank_rows,
        }
    }

    #[test]
    fn test_totals() {
        let mut report = ParseReport::new(2);
        report.push(written("KEM Memory Results", 1));
        report.push(written("Sig Memory Results", 2));
        assert_eq!(report.len(), 2);
        assert_eq!(report.blank_rows(), 3);
        assert_eq!(report.category("KEM Memory Results").count(), 1);
        assert_eq!(
            report.to_string(),
            "Machine-ID (2): 2 tables written, 3 blank rows"
        );
    }

    #[test]
    fn test_merge() {
        let mut first = ParseReport::new(1);
        first.push(written("KEM Speed Results", 0));
        let mut second = ParseReport::new(1);
        second.push(written("PQC TLS Handshake Results", 0));
        first.merge(second);
        assert_eq!(first.len(), 2);
    }
}
