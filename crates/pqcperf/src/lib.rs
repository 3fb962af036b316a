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

//! Normalization of PQC benchmark output into validated CSV tables.
//!
//! Raw tool output left by the benchmark scripts (valgrind massif snapshots,
//! liboqs speed tables, `openssl s_time` logs and `openssl speed` tables) is
//! turned into canonical per-run tables. Every table is checked against the
//! algorithm manifest before it is written:
//!
//! - a missing or malformed artifact becomes a blank row and a warning
//! - a row count that differs from the manifest stops the whole run
//!
//! # Example
//!
//! ```no_run
//! use pqcperf::{parse_computational, ConflictPolicy, ParseOptions, ProjectRoot};
//!
//! let root = ProjectRoot::discover(&std::env::current_dir().unwrap()).unwrap();
//! let options = ParseOptions::new(1, 3)
//!     .unwrap()
//!     .with_conflict_policy(ConflictPolicy::Replace);
//!
//! let report = parse_computational(&root, &options).unwrap();
//! for table in &report.tables {
//!     println!("{} run {}: {}", table.category, table.run, table.path.display());
//! }
//! ```

pub mod computational;
mod error;
mod options;
pub mod output;
mod report;
pub mod tls;

pub use computational::{
    assemble_memory_table, assemble_speed_tables, parse_computational, parse_computational_with,
    SpeedTables,
};
pub use error::{PipelineError, Result};
pub use options::{ConflictPolicy, ParseOptions};
pub use report::{ParseReport, WrittenTable};
pub use tls::{
    assemble_classic_table, assemble_handshake_table, assemble_throughput_table,
    check_handshake_file_count, parse_tls, parse_tls_with, signature_subset,
};

// Re-export the pieces callers need to drive a run.
pub use pqcperf_core::{
    AlgorithmCategory, AlgorithmFamily, AlgorithmManifest, CardinalityError, CoreError,
    NormalizedTable, ProjectRoot, ReadLimits, TlsVariant,
};
pub use pqcperf_csv::ToCsvConfig;

/// Parse the computational results, then the TLS results, of one machine.
pub fn parse_all(root: &ProjectRoot, options: &ParseOptions) -> Result<ParseReport> {
    let mut report = parse_computational(root, options)?;
    report.merge(parse_tls(root, options)?);
    Ok(report)
}
