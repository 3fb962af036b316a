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

//! CSV output for normalized PQC benchmark tables.
//!
//! Every table is written with a header row followed by its rows in
//! insertion order; blank metric cells become empty fields so a missing
//! artifact keeps its position in the output.
//!
//! # Example
//!
//! ```no_run
//! use pqcperf_core::schema::MEMORY_COLUMNS;
//! use pqcperf_core::NormalizedTable;
//! use pqcperf_csv::{write_table, ToCsvConfig};
//! use std::path::Path;
//!
//! let table = NormalizedTable::new(MEMORY_COLUMNS);
//! write_table(Path::new("kem-mem-metrics-1.csv"), &table, &ToCsvConfig::default()).unwrap();
//! ```

mod error;
mod to_csv;

pub use error::{CsvError, Result};
pub use to_csv::{
    to_csv, to_csv_with_config, to_csv_writer_with_config, write_table,
    ToCsvConfig,
};
