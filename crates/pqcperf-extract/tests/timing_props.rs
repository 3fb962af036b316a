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

//! Property tests for the `s_time` block state machine.

use pqcperf_extract::{parse_timing_log, SessionPhase};
use pqcperf_test::{s_time_log, TimingBlock};
use proptest::prelude::*;

fn rate() -> impl Strategy<Value = String> {
    (1u32..100_000, 0u32..100).prop_map(|(whole, frac)| format!("{}.{:02}", whole, frac))
}

fn user_time() -> impl Strategy<Value = String> {
    (0u32..60, 1u32..100).prop_map(|(whole, frac)| format!("{}.{:02}s", whole, frac))
}

proptest! {
    #[test]
    fn blocks_never_mix(
        first_n in 1u64..1_000_000,
        reuse_n in 1u64..1_000_000,
        first_time in user_time(),
        reuse_time in user_time(),
        first_rate in rate(),
        reuse_rate in rate(),
        first_real in 1u64..60,
        reuse_real in 1u64..60,
    ) {
        let log = s_time_log(
            TimingBlock { connections: first_n, user_time: &first_time, rate: &first_rate, real_seconds: first_real },
            TimingBlock { connections: reuse_n, user_time: &reuse_time, rate: &reuse_rate, real_seconds: reuse_real },
        );

        let first = parse_timing_log(&log, SessionPhase::FirstUse).unwrap();
        prop_assert_eq!(first.user_connections, first_n.to_string());
        prop_assert_eq!(first.user_seconds, first_time.trim_end_matches('s'));
        prop_assert_eq!(first.connections_per_user_second, first_rate);
        prop_assert_eq!(first.real_seconds, first_real.to_string());

        let reused = parse_timing_log(&log, SessionPhase::Reused).unwrap();
        prop_assert_eq!(reused.user_connections, reuse_n.to_string());
        prop_assert_eq!(reused.user_seconds, reuse_time.trim_end_matches('s'));
        prop_assert_eq!(reused.connections_per_user_second, reuse_rate);
        prop_assert_eq!(reused.real_connections, reuse_n.to_string());
    }

    #[test]
    fn truncated_reuse_block_is_incomplete(first_n in 1u64..1_000, reuse_n in 1u64..1_000) {
        let log = s_time_log(
            TimingBlock { connections: first_n, user_time: "0.10s", rate: "100", real_seconds: 1 },
            TimingBlock { connections: reuse_n, user_time: "0.10s", rate: "100", real_seconds: 1 },
        );
        let cut = log.rfind(" real seconds").unwrap();
        let truncated = &log[..log[..cut].rfind('\n').unwrap()];

        prop_assert!(parse_timing_log(truncated, SessionPhase::FirstUse).is_ok());
        prop_assert!(parse_timing_log(truncated, SessionPhase::Reused).is_err());
    }
}
