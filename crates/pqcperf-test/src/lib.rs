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

//! Shared test fixtures for PQC benchmark result parsing.
//!
//! - [`formats`]: synthetic `ms_print`, `s_time`, `openssl speed` and
//!   liboqs speed output
//! - [`TestProject`]: a temporary project root with algorithm lists and raw
//!   artifacts laid out the way the benchmark scripts leave them
//!
//! # Quick Start
//!
//! ```rust
//! use pqcperf_core::AlgorithmFamily;
//! use pqcperf_test::TestProject;
//!
//! let project = TestProject::new();
//! let layout = project.populate_computational(1, 1, &["HQC-128"], &["Falcon-512"]);
//! assert!(layout.memory_artifact(AlgorithmFamily::Kem, "HQC-128", 0, 1).is_file());
//! ```

pub mod formats;
mod project;

pub use formats::{
    default_s_time_log, liboqs_speed_output, massif_output, massif_output_without_peak,
    openssl_speed_output, s_time_log, with_thousands, SnapshotRecord, TimingBlock,
};
pub use project::{TestProject, TlsAlgorithms};
