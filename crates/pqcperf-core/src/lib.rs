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

//! Data model and validation core for PQC benchmark result normalization.
//!
//! This crate holds everything the format-specific extractors and the table
//! assembler share:
//!
//! - [`AlgorithmManifest`]: the ordered algorithm lists recorded at setup
//!   time, which define row order and expected row counts
//! - [`OperationSet`] / [`AlgorithmFamily`]: the fixed operation triples
//! - [`MetricRow`] / [`NormalizedTable`]: positional rows with explicit blank
//!   placeholders
//! - [`Expectation`] / [`check_cardinality`]: the row-count gate applied to
//!   every table before it is written
//! - [`ProjectRoot`], [`ComputationalLayout`], [`TlsLayout`]: root discovery
//!   and the per-machine directory layout
//!
//! # Example
//!
//! ```
//! use pqcperf_core::{AlgorithmCategory, AlgorithmManifest, Expectation, MetricRow,
//!     NormalizedTable, OPERATIONS_PER_ALGORITHM};
//! use pqcperf_core::schema::{MEMORY_COLUMNS, MEMORY_METRIC_WIDTH};
//!
//! let manifest = AlgorithmManifest::from_lists([(AlgorithmCategory::Kem, vec!["HQC-128"])]);
//! let mut table = NormalizedTable::new(MEMORY_COLUMNS);
//! for op in ["keygen", "encaps", "decaps"] {
//!     table.push_row(MetricRow::blank(["HQC-128", op], MEMORY_METRIC_WIDTH)).unwrap();
//! }
//!
//! let expectation = Expectation::per_algorithm(
//!     "KEM Memory Results",
//!     manifest.count(AlgorithmCategory::Kem),
//!     OPERATIONS_PER_ALGORITHM,
//! );
//! assert!(expectation.validate(&table).is_ok());
//! ```

pub mod cardinality;
mod error;
pub mod layout;
mod limits;
pub mod manifest;
mod operation;
pub mod schema;
mod table;

pub use cardinality::{check_cardinality, Expectation};
pub use error::{CardinalityError, CoreError, Result, SETUP_REMEDY};
pub use layout::{ComputationalLayout, ProjectRoot, TlsLayout, TlsVariant, ROOT_MARKER};
pub use limits::{ReadLimits, DEFAULT_MAX_FILE_SIZE, MAX_FILE_SIZE_ENV};
pub use manifest::{
    parse_algorithm_list, read_algorithm_list, AlgorithmCategory, AlgorithmManifest,
};
pub use operation::{
    AlgorithmFamily, OperationSet, KEM_OPERATIONS, OPERATIONS_PER_ALGORITHM, SIG_OPERATIONS,
};
pub use table::{MetricField, MetricRow, NormalizedTable};
