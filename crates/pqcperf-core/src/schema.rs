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

//! Fixed column schemas of the canonical output tables.

/// Metric columns produced per memory row.
pub const MEMORY_METRIC_WIDTH: usize = 5;

/// Metric columns produced per handshake row.
pub const HANDSHAKE_METRIC_WIDTH: usize = 5;

/// Peak memory usage per algorithm operation.
pub const MEMORY_COLUMNS: [&str; 7] = [
    "Algorithm",
    "Operation",
    "intits",
    "maxBytes",
    "maxHeap",
    "extHeap",
    "maxStack",
];

/// PQC and PQC-hybrid handshake timings.
pub const PQC_HANDSHAKE_COLUMNS: [&str; 8] = [
    "Signing Algorithm",
    "KEM Algorithm",
    "Reused Session ID",
    "Connections in User Time",
    "User Time (s)",
    "Connections Per User Second",
    "Connections in Real Time",
    "Real Time (s)",
];

/// Classic handshake timings.
pub const CLASSIC_HANDSHAKE_COLUMNS: [&str; 8] = [
    "Ciphersuite",
    "Classic Algorithm",
    "Reused Session ID",
    "Connections in User Time",
    "User Time (s)",
    "Connections Per User Second",
    "Connections in Real Time",
    "Real Time (s)",
];

/// KEM throughput (`openssl speed`).
pub const KEM_SPEED_COLUMNS: [&str; 7] = [
    "Algorithm",
    "Keygen",
    "encaps",
    "decaps",
    "Keygen/s",
    "Encaps/s",
    "Decaps/s",
];

/// Signature throughput (`openssl speed`).
pub const SIG_SPEED_COLUMNS: [&str; 7] = [
    "Algorithm",
    "Keygen",
    "Signs",
    "Verify",
    "Keygen/s",
    "sign/s",
    "verify/s",
];

/// Value of the `Reused Session ID` column for first-use rows.
pub const FIRST_USE_TAG: &str = "";

/// Value of the `Reused Session ID` column for session-reuse rows.
pub const REUSED_TAG: &str = "*";
