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

//! Error types for the extractors.

use pqcperf_core::CoreError;
use std::path::PathBuf;
use thiserror::Error;

/// Extraction error types.
///
/// Row-local extractors (massif snapshots, `s_time` logs) surface these to
/// the assembler, which turns them into blank placeholder rows. Table-level
/// extractors (speed tables) let them propagate.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Reading the artifact failed (missing, unreadable, over the size limit).
    #[error(transparent)]
    Read(#[from] CoreError),

    /// A line could not be interpreted.
    ///
    /// # Examples
    ///
    /// ```
    /// use pqcperf_extract::ExtractError;
    ///
    /// let err = ExtractError::Malformed {
    ///     line: 7,
    ///     reason: "expected 5 snapshot fields, found 3".to_string(),
    /// };
    /// assert_eq!(err.to_string(), "malformed line 7: expected 5 snapshot fields, found 3");
    /// ```
    #[error("malformed line {line}: {reason}")]
    Malformed {
        /// Line number (1-based).
        line: usize,
        /// What was wrong with it.
        reason: String,
    },

    /// The requested block ended without a complete set of metrics.
    #[error("no complete {what} found")]
    Incomplete {
        /// Description of the missing data.
        what: String,
    },

    /// A table line has the wrong number of cells.
    #[error("Row width mismatch: expected {expected} columns, got {actual} at line {line}")]
    WidthMismatch {
        /// Column count of the table header.
        expected: usize,
        /// Cells found on the line.
        actual: usize,
        /// Line number (1-based).
        line: usize,
    },

    /// The table header line was never found.
    #[error("table header starting with '{sentinel}' not found")]
    MissingHeader {
        /// Text the header was expected to start with.
        sentinel: &'static str,
    },

    /// An error annotated with the file it came from.
    #[error("{}: {}", .path.display(), .source)]
    InFile {
        /// Artifact path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: Box<ExtractError>,
    },
}

/// Convenience alias for results carrying an [`ExtractError`].
pub type Result<T> = std::result::Result<T, ExtractError>;

impl ExtractError {
    /// Attach the artifact path, unless the error already names a path.
    pub fn in_file(self, path: impl Into<PathBuf>) -> Self {
        match self {
            err @ (ExtractError::Read(_) | ExtractError::InFile { .. }) => err,
            other => ExtractError::InFile {
                path: path.into(),
                source: Box::new(other),
            },
        }
    }
}
