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

//! Cardinality validation: the gate every table passes before it is written.
//!
//! The expected row count is derived from the manifest only, scaled by the
//! fixed number of rows produced per algorithm (three operations for memory
//! and liboqs speed tables, two session modes per signature/KEM pair for
//! handshake tables, one row per algorithm for throughput tables).
//!
//! The check compares counts, not identities. A table with a duplicated
//! algorithm and a missing one still passes; blank placeholder rows count
//! toward the total.

use crate::error::CardinalityError;
use crate::table::NormalizedTable;

/// Row count a table must have, with the context used in diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expectation {
    context: String,
    expected: usize,
}

impl Expectation {
    /// `algorithms * rows_per_algorithm` rows.
    pub fn per_algorithm(
        context: impl Into<String>,
        algorithms: usize,
        rows_per_algorithm: usize,
    ) -> Self {
        Self {
            context: context.into(),
            expected: algorithms * rows_per_algorithm,
        }
    }

    /// `left * right * rows_per_pair` rows, for tables iterating over every
    /// pair of two lists.
    pub fn per_pair(
        context: impl Into<String>,
        left: usize,
        right: usize,
        rows_per_pair: usize,
    ) -> Self {
        Self {
            context: context.into(),
            expected: left * right * rows_per_pair,
        }
    }

    /// Expected row count.
    pub fn expected(&self) -> usize {
        self.expected
    }

    /// Diagnostic context.
    pub fn context(&self) -> &str {
        &self.context
    }

    /// Compare an observed count against the expectation.
    pub fn check(&self, actual: usize) -> Result<(), CardinalityError> {
        if actual == self.expected {
            return Ok(());
        }
        tracing::error!(
            context = %self.context,
            expected = self.expected,
            actual,
            "row count does not match the algorithm manifest"
        );
        Err(CardinalityError {
            context: self.context.clone(),
            expected: self.expected,
            actual,
        })
    }

    /// Check a table's row count.
    pub fn validate(&self, table: &NormalizedTable) -> Result<(), CardinalityError> {
        self.check(table.len())
    }
}

/// Check that `actual` equals `algorithms * rows_per_algorithm`.
///
/// # Examples
///
/// ```
/// use pqcperf_core::check_cardinality;
///
/// assert!(check_cardinality(6, 2, 3, "KEM Memory Results").is_ok());
///
/// let err = check_cardinality(5, 2, 3, "KEM Memory Results").unwrap_err();
/// assert_eq!(err.expected, 6);
/// assert_eq!(err.actual, 5);
/// ```
pub fn check_cardinality(
    actual: usize,
    algorithms: usize,
    rows_per_algorithm: usize,
    context: &str,
) -> Result<(), CardinalityError> {
    Expectation::per_algorithm(context, algorithms, rows_per_algorithm).check(actual)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::MEMORY_COLUMNS;
    use crate::table::MetricRow;

    #[test]
    fn test_matching_count_passes() {
        assert!(check_cardinality(9, 3, 3, "Sig Memory Results").is_ok());
    }

    #[test]
    fn test_extra_rows_fail() {
        let err = check_cardinality(12, 3, 3, "Sig Memory Results").unwrap_err();
        assert_eq!(err.context, "Sig Memory Results");
        assert_eq!((err.expected, err.actual), (9, 12));
    }

    #[test]
    fn test_empty_manifest_expects_no_rows() {
        assert!(check_cardinality(0, 0, 3, "KEM Speed Results").is_ok());
        assert!(check_cardinality(1, 0, 3, "KEM Speed Results").is_err());
    }

    #[test]
    fn test_per_pair() {
        let expectation = Expectation::per_pair("PQC TLS Handshake Results", 3, 4, 2);
        assert_eq!(expectation.expected(), 24);
        assert!(expectation.check(24).is_ok());
        assert!(expectation.check(23).is_err());
    }

    #[test]
    fn test_blank_rows_count_toward_total() {
        let mut table = NormalizedTable::new(MEMORY_COLUMNS);
        for op in ["keygen", "encaps", "decaps"] {
            table.push_row(MetricRow::blank(["HQC-128", op], 5)).unwrap();
        }
        let expectation = Expectation::per_algorithm("KEM Memory Results", 1, 3);
        assert!(expectation.validate(&table).is_ok());
    }

    #[test]
    fn test_count_only_check_accepts_substituted_algorithm() {
        // Same count, different identities: only the count is compared.
        let mut table = NormalizedTable::new(MEMORY_COLUMNS);
        for alg in ["HQC-128", "HQC-128"] {
            for op in ["keygen", "encaps", "decaps"] {
                table.push_row(MetricRow::blank([alg, op], 5)).unwrap();
            }
        }
        let expectation = Expectation::per_algorithm("KEM Memory Results", 2, 3);
        assert!(expectation.validate(&table).is_ok());
    }
}
