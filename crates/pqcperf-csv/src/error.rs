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

//! Error types for CSV output.

use std::path::PathBuf;
use thiserror::Error;

/// CSV output error types.
///
/// # Examples
///
/// ```
/// use pqcperf_csv::CsvError;
///
/// let err = CsvError::WidthMismatch {
///     expected: 7,
///     actual: 6,
///     row: 4,
/// };
/// assert_eq!(
///     err.to_string(),
///     "Row width mismatch: expected 7 columns, got 6 in row 4"
/// );
/// ```
#[derive(Debug, Error)]
pub enum CsvError {
    /// A row does not match the header width.
    #[error("Row width mismatch: expected {expected} columns, got {actual} in row {row}")]
    WidthMismatch {
        /// Number of columns in the header.
        expected: usize,
        /// Number of cells in the row.
        actual: usize,
        /// Row number (1-based, header excluded).
        row: usize,
    },

    /// Output file or directory could not be written.
    #[error("I/O error for '{path}': {message}")]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Error description.
        message: String,
    },

    /// Error from the underlying CSV writer.
    #[error("CSV library error: {0}")]
    Csv(#[from] csv::Error),

    /// Output was not valid UTF-8.
    #[error("Invalid UTF-8 in {context}")]
    InvalidUtf8 {
        /// What was being produced.
        context: String,
    },
}

/// Result type for CSV output.
pub type Result<T> = std::result::Result<T, CsvError>;

impl CsvError {
    /// Create an I/O error with path context.
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CsvError::Io {
            path: path.into(),
            message: source.to_string(),
        }
    }

    /// Attach `path` to errors that carry no location of their own.
    pub fn with_path(self, path: &std::path::Path) -> Self {
        match self {
            CsvError::Csv(e) => CsvError::Io {
                path: path.to_path_buf(),
                message: e.to_string(),
            },
            other => other,
        }
    }
}
