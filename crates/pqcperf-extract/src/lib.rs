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

//! Format-specific extractors for raw benchmark tool output.
//!
//! Each extractor turns one kind of unstructured tool text into metric rows:
//!
//! - [`snapshot`]: valgrind massif peak memory (`ms_print` output)
//! - [`timing`]: OpenSSL `s_time` handshake logs, first-use or session-reuse
//!   block, selected through [`SessionPhase`]
//! - [`throughput`]: OpenSSL `speed` tables for KEM and signature algorithms
//! - [`liboqs`]: liboqs `speed_kem` / `speed_sig` operation tables
//!
//! Every extractor has a pure `parse_*` function over text and a `read_*`
//! wrapper that reads the file through [`pqcperf_core::ReadLimits`] and
//! attaches the path to errors.

mod error;
pub mod liboqs;
pub mod snapshot;
pub mod throughput;
pub mod timing;

pub use error::{ExtractError, Result};
pub use liboqs::{parse_operation_table, read_operation_table, retain_operation_rows};
pub use snapshot::{parse_peak_snapshot, read_peak_snapshot, PeakSnapshot};
pub use throughput::{
    parse_throughput_table, read_throughput_table, strip_unit_suffix, throughput_columns,
};
pub use timing::{
    append_timing_metrics, parse_timing_log, read_timing_log, SessionPhase, TimingMetrics,
};
