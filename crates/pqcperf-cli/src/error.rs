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

//! Structured error types for the pqcperf CLI.

use pqcperf::PipelineError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors reported by CLI commands.
#[derive(Error, Debug)]
pub enum CliError {
    /// The parse run failed.
    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    /// I/O operation failed outside the parse run.
    #[error("I/O error for '{path}': {message}")]
    Io {
        /// The path that caused the error
        path: PathBuf,
        /// The error message
        message: String,
    },

    /// JSON report serialization failed.
    #[error("JSON serialization error: {0}")]
    Json(String),
}

impl CliError {
    /// Create an I/O error with path context.
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CliError::Io {
            path: path.into(),
            message: source.to_string(),
        }
    }

    /// Follow-up instruction printed below the error, if any.
    pub fn remedy(&self) -> Option<&'static str> {
        match self {
            CliError::Pipeline(e) => e.remedy(),
            _ => None,
        }
    }
}

impl From<pqcperf::CoreError> for CliError {
    fn from(err: pqcperf::CoreError) -> Self {
        CliError::Pipeline(err.into())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::Json(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pqcperf::CardinalityError;

    #[test]
    fn test_cardinality_has_remedy() {
        let err = CliError::from(PipelineError::Cardinality(CardinalityError {
            context: "Sig Memory Results".to_string(),
            expected: 9,
            actual: 6,
        }));
        assert!(err.to_string().contains("Sig Memory Results"));
        assert!(err.remedy().unwrap().contains("setup process may need to be re-run"));
    }

    #[test]
    fn test_io_error_has_no_remedy() {
        let err = CliError::io_error(
            ".",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert_eq!(err.to_string(), "I/O error for '.': gone");
        assert!(err.remedy().is_none());
    }
}
