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

//! Errors of the parse pipelines.

use pqcperf_core::{CardinalityError, CoreError};
use pqcperf_csv::CsvError;
use pqcperf_extract::ExtractError;
use thiserror::Error;

/// Failure that aborts a parse run.
///
/// Row-local extraction problems never reach this type; they are replaced by
/// blank placeholder rows while the tables are assembled.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Manifest/data divergence.
    #[error(transparent)]
    Cardinality(#[from] CardinalityError),

    /// Root discovery, manifest loading, layout or conflict failure.
    #[error(transparent)]
    Core(CoreError),

    /// A table-level artifact (speed table) could not be parsed.
    #[error(transparent)]
    Extract(#[from] ExtractError),

    /// A normalized table could not be written.
    #[error(transparent)]
    Csv(#[from] CsvError),

    /// Invalid pipeline options.
    #[error("invalid options: {0}")]
    InvalidOptions(String),
}

/// Result alias for the parse pipelines.
pub type Result<T> = std::result::Result<T, PipelineError>;

impl From<CoreError> for PipelineError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Cardinality(inner) => PipelineError::Cardinality(inner),
            other => PipelineError::Core(other),
        }
    }
}

impl PipelineError {
    /// Whether the run stopped on a manifest/data divergence.
    pub fn is_cardinality(&self) -> bool {
        matches!(self, PipelineError::Cardinality(_))
    }

    /// Instruction printed after the diagnostic, where one applies.
    pub fn remedy(&self) -> Option<&'static str> {
        match self {
            PipelineError::Cardinality(err) => Some(err.remedy()),
            _ => None,
        }
    }
}
