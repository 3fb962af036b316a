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

//! Error types shared by the manifest loader, the table model and the
//! cardinality validator.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Remedy printed alongside every manifest/data divergence.
pub const SETUP_REMEDY: &str = "Please ensure the alg-list files have the same algorithms used in the testing, \
the setup process may need to be re-run. If that is the case, please ensure to copy the up_results \
directory to a safe location before re-running the setup script";

/// Raised when a normalized table does not hold the number of rows the
/// algorithm manifest predicts.
///
/// This is always fatal for the whole parse run: a divergence between the
/// recorded manifest and the executed test matrix would corrupt every
/// downstream average.
///
/// # Examples
///
/// ```
/// use pqcperf_core::CardinalityError;
///
/// let err = CardinalityError {
///     context: "KEM Memory Results".to_string(),
///     expected: 6,
///     actual: 5,
/// };
/// assert!(err.to_string().contains("KEM Memory Results"));
/// assert!(err.to_string().contains("expected 6"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "mismatch between the number of algorithms in the alg-list file and the data being parsed \
     for {context} (expected {expected} rows, found {actual})"
)]
pub struct CardinalityError {
    /// Human readable category, e.g. `"Sig Speed Results"`.
    pub context: String,
    /// Row count derived from the manifest.
    pub expected: usize,
    /// Row count actually observed.
    pub actual: usize,
}

impl CardinalityError {
    /// The user-actionable instruction that accompanies the diagnostic.
    pub fn remedy(&self) -> &'static str {
        SETUP_REMEDY
    }
}

/// Errors produced by `pqcperf-core`.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The sentinel marker file could not be found in any ancestor directory.
    #[error("project root marker '{marker}' not found in '{start}' or any of its parents")]
    RootNotFound {
        /// Marker file name that was searched for.
        marker: &'static str,
        /// Directory the search started from.
        start: PathBuf,
    },

    /// An explicitly supplied root does not carry the marker file.
    #[error("'{path}' is not a project root (missing '{marker}')")]
    NotProjectRoot {
        /// Candidate root directory.
        path: PathBuf,
        /// Marker file name.
        marker: &'static str,
    },

    /// The raw result tree for a machine is absent.
    #[error(
        "Machine-ID ({machine_id}) up_results directory does not exist, please ensure the \
         up_results directory is present before continuing: '{path}'"
    )]
    MissingMachineResults {
        /// Machine identifier.
        machine_id: u32,
        /// Expected directory.
        path: PathBuf,
    },

    /// An algorithm list could not be read.
    #[error("failed to read algorithm list '{path}': {message}")]
    Manifest {
        /// Algorithm list path.
        path: PathBuf,
        /// Underlying failure.
        message: String,
    },

    /// Manifest/data divergence.
    #[error(transparent)]
    Cardinality(#[from] CardinalityError),

    /// A row was pushed into a table with a different column count.
    #[error("Row width mismatch: expected {expected} columns, got {actual} in row {row}")]
    WidthMismatch {
        /// Column count of the table schema.
        expected: usize,
        /// Cell count of the offending row.
        actual: usize,
        /// Row number (1-based) the row would have occupied.
        row: usize,
    },

    /// File I/O failure with path context.
    #[error("I/O error for '{path}': {message}")]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Error description.
        message: String,
    },

    /// An input file exceeds the configured read limit.
    #[error("File '{path}' is too large ({actual} bytes). Maximum allowed: {max} bytes")]
    FileTooLarge {
        /// Offending file.
        path: PathBuf,
        /// Actual size in bytes.
        actual: u64,
        /// Limit in bytes.
        max: u64,
    },

    /// Normalized results already exist and the conflict policy forbids
    /// replacing them.
    #[error(
        "parsed results already exist for Machine-ID ({machine_id}) in '{path}', move the entire \
         directory elsewhere or re-run with --replace-old-results"
    )]
    ResultsExist {
        /// Machine identifier.
        machine_id: u32,
        /// Existing results directory.
        path: PathBuf,
    },
}

/// Convenience alias for results carrying a [`CoreError`].
pub type Result<T> = std::result::Result<T, CoreError>;

impl CoreError {
    /// Create an I/O error with file path context.
    pub fn io_error(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: source.to_string(),
        }
    }

    /// Whether this error stems from a manifest/data divergence.
    pub fn is_cardinality(&self) -> bool {
        matches!(self, CoreError::Cardinality(_))
    }
}
