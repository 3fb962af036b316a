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

//! Synthetic tool output in the formats the extractors consume.

use pqcperf_core::AlgorithmFamily;

/// Format an integer with `,` thousands separators, as `ms_print` does.
pub fn with_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Memory metrics of one synthetic snapshot record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapshotRecord {
    pub instructions: u64,
    pub total_bytes: u64,
    pub useful_heap: u64,
    pub extra_heap: u64,
    pub stacks: u64,
}

impl SnapshotRecord {
    /// A record whose values are derived from `seed`.
    pub fn seeded(seed: u64) -> Self {
        Self {
            instructions: 100_000 + seed * 1_001,
            total_bytes: 10_000 + seed * 17,
            useful_heap: 8_192 + seed,
            extra_heap: 32,
            stacks: 1_500 + seed * 3,
        }
    }

    /// Values as the extractor reports them.
    pub fn expected_cells(&self) -> Vec<String> {
        [
            self.instructions,
            self.total_bytes,
            self.useful_heap,
            self.extra_heap,
            self.stacks,
        ]
        .iter()
        .map(u64::to_string)
        .collect()
    }

    fn line(&self, index: usize) -> String {
        format!(
            "{:>3} {:>14} {:>16} {:>16} {:>13} {:>12}",
            index,
            with_thousands(self.instructions),
            with_thousands(self.total_bytes),
            with_thousands(self.useful_heap),
            with_thousands(self.extra_heap),
            with_thousands(self.stacks),
        )
    }
}

/// `ms_print` output with `records.len()` snapshots, the one at `peak`
/// marked as the peak. A `peak` beyond the records announces a snapshot
/// that never appears.
pub fn massif_output(command: &str, records: &[SnapshotRecord], peak: usize) -> String {
    let rule = "-".repeat(80);
    let mut out = format!(
        "{rule}\nCommand:            {command}\nMassif arguments:   --stacks=yes\n\
         ms_print arguments: massif.out\n{rule}\n\n    KB\n12.49^      #\n     |      #\n   \
         0 +------->ki\n\nNumber of snapshots: {}\n Detailed snapshots: [{} (peak)]\n\n{rule}\n  \
         n        time(i)         total(B)   useful-heap(B) extra-heap(B)    stacks(B)\n{rule}\n",
        records.len(),
        peak,
    );
    for (index, record) in records.iter().enumerate() {
        out.push_str(&record.line(index));
        out.push('\n');
        if index == peak {
            out.push_str("64.04% (8,192B) (heap allocation functions) malloc/new/new[], --alloc-fns, etc.\n");
        }
    }
    out
}

/// `ms_print` output without any peak announcement.
pub fn massif_output_without_peak(command: &str) -> String {
    massif_output(command, &[SnapshotRecord::seeded(0)], 0).replace(" (peak)", "")
}

/// One block of an `s_time` log.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimingBlock<'a> {
    pub connections: u64,
    /// User time as printed, with its `s` unit (e.g. `"0.05s"`).
    pub user_time: &'a str,
    pub rate: &'a str,
    pub real_seconds: u64,
}

impl TimingBlock<'_> {
    fn lines(&self) -> String {
        format!(
            "{} connections in {}; {} connections/user sec, bytes read 0\n\
             {} connections in {} real seconds, 0 bytes read per connection\n",
            self.connections, self.user_time, self.rate, self.connections, self.real_seconds
        )
    }
}

/// A two-block `openssl s_time` log.
pub fn s_time_log(first_use: TimingBlock<'_>, reuse: TimingBlock<'_>) -> String {
    format!(
        "Collecting connection statistics for 5 seconds\ntttttttttttttttt\n\n{}\n\n\
         Now timing with session id reuse.\nstarting\nrrrrrrrrrrrrrrrr\n\n{}",
        first_use.lines(),
        reuse.lines()
    )
}

/// A complete log with fixed first-use `(10, 0.05s, 200)` and reuse
/// `(15, 0.02s, 750)` metrics.
pub fn default_s_time_log() -> String {
    s_time_log(
        TimingBlock {
            connections: 10,
            user_time: "0.05s",
            rate: "200",
            real_seconds: 1,
        },
        TimingBlock {
            connections: 15,
            user_time: "0.02s",
            rate: "750",
            real_seconds: 1,
        },
    )
}

/// `openssl speed` output for the given algorithms.
pub fn openssl_speed_output(family: AlgorithmFamily, algorithms: &[String]) -> String {
    let header = match family {
        AlgorithmFamily::Kem => "keygen    encaps    decaps keygens/s  encaps/s  decaps/s",
        AlgorithmFamily::Sig => "keygen     signs    verify keygens/s    sign/s  verify/s",
    };
    let mut out = format!(
        "version: 3.5.0\nbuilt on: Tue Apr  8 13:02:55 2025 UTC\noptions: bn(64,64)\n{:>31}{}\n",
        "", header
    );
    for (i, alg) in algorithms.iter().enumerate() {
        let base = (i + 1) as f64;
        out.push_str(&format!(
            "{:>25} {:.6}s {:.6}s {:.6}s {:>9.1} {:>9.1} {:>9.1}\n",
            alg,
            0.000010 * base,
            0.000011 * base,
            0.000012 * base,
            100000.0 / base,
            90909.1 / base,
            83333.3 / base,
        ));
    }
    out
}

/// liboqs `speed_kem` / `speed_sig` output for the given algorithms.
pub fn liboqs_speed_output(family: AlgorithmFamily, algorithms: &[String]) -> String {
    let mut out = String::from(
        "Configuration info\n==================\nTarget platform:  x86_64-Linux-6.8.0\n\
         Compiler:         gcc (13.2.0)\nStarted at 2025-01-01 10:00:00\n\
         Operation                      | Iterations | Total time (s) | Time (us): mean | pop. stdev | CPU cycles: mean          | pop. stdev\n\
         ------------------------------ | ----------:| --------------:| ---------------:| ----------:| -------------------------:| ----------:\n",
    );
    for (i, alg) in algorithms.iter().enumerate() {
        out.push_str(&format!(
            "{:<30} | {:>10} | {:>14} | {:>15} | {:>10} | {:>25} | {:>10}\n",
            alg, "", "", "", "", "", ""
        ));
        for (j, op) in family.operations().names().iter().enumerate() {
            let n = (i * 3 + j + 1) as u64;
            out.push_str(&format!(
                "{:<30} | {:>10} | {:>14} | {:>15} | {:>10} | {:>25} | {:>10}\n",
                op,
                1000 * n,
                "3.000",
                format!("{}.250", 10 * n),
                "1.000",
                30_000 * n,
                1_000 * n
            ));
        }
    }
    out.push_str("Ended at 2025-01-01 10:00:09\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_thousands() {
        assert_eq!(with_thousands(0), "0");
        assert_eq!(with_thousands(999), "999");
        assert_eq!(with_thousands(1_000), "1,000");
        assert_eq!(with_thousands(221_044), "221,044");
        assert_eq!(with_thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn test_massif_output_marks_peak() {
        let text = massif_output("./test_kem_mem HQC-128 0", &[SnapshotRecord::seeded(1)], 0);
        assert!(text.contains(" Detailed snapshots: [0 (peak)]"));
        assert!(text.contains("  0        101,001"));
    }

    #[test]
    fn test_s_time_log_blocks() {
        let log = default_s_time_log();
        let reuse_at = log.find("reuse").unwrap();
        assert!(log[..reuse_at].contains("10 connections in 0.05s; 200 connections/user sec"));
        assert!(log[reuse_at..].contains("15 connections in 0.02s; 750 connections/user sec"));
    }
}
