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

//! Peak memory extraction from valgrind massif (`ms_print`) output.
//!
//! `ms_print` lists the detailed snapshots in a header line such as
//!
//! ```text
//!  Detailed snapshots: [3, 9, 14 (peak), 20]
//! ```
//!
//! and later prints one record per snapshot, right-aligned on its index:
//!
//! ```text
//!  14        221,044           12,792            8,192            32        4,568
//! ```
//!
//! The record of the peak snapshot yields the five memory metrics.

use crate::error::{ExtractError, Result};
use pqcperf_core::schema::MEMORY_METRIC_WIDTH;
use pqcperf_core::{MetricField, ReadLimits};
use std::path::Path;

const DETAILED_SNAPSHOTS: &str = "Detailed snapshots:";
const PEAK_MARKER: &str = "(peak)";

/// Metrics of the peak snapshot, in output column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeakSnapshot {
    /// Snapshot index.
    pub index: usize,
    /// Instructions executed at the snapshot (`time(i)`).
    pub instructions: u64,
    /// Total memory (`total(B)`).
    pub total_bytes: u64,
    /// Useful heap (`useful-heap(B)`).
    pub useful_heap: u64,
    /// Extra heap (`extra-heap(B)`).
    pub extra_heap: u64,
    /// Stack size (`stacks(B)`).
    pub stacks: u64,
}

impl PeakSnapshot {
    /// Metric cells for a memory row.
    pub fn metrics(&self) -> Vec<MetricField> {
        [
            self.instructions,
            self.total_bytes,
            self.useful_heap,
            self.extra_heap,
            self.stacks,
        ]
        .iter()
        .map(|value| Some(value.to_string()))
        .collect()
    }
}

/// Index announced with the `(peak)` marker on a detailed-snapshots line.
fn peak_index(line: &str) -> Option<usize> {
    let before = line[..line.find(PEAK_MARKER)?].trim_end();
    let digits = before.len() - before.trim_end_matches(|c: char| c.is_ascii_digit()).len();
    before[before.len() - digits..].parse().ok()
}

fn parse_record(line: &str, index: usize, line_no: usize) -> Result<Option<PeakSnapshot>> {
    let cleaned = line.replace(',', "");
    let mut fields = cleaned.split_whitespace();

    if fields.next().and_then(|f| f.parse::<usize>().ok()) != Some(index) {
        return Ok(None);
    }

    let values = fields
        .map(|field| {
            field.parse::<u64>().map_err(|_| ExtractError::Malformed {
                line: line_no,
                reason: format!("non-numeric snapshot field '{}'", field),
            })
        })
        .collect::<Result<Vec<u64>>>()?;

    match values[..] {
        [instructions, total_bytes, useful_heap, extra_heap, stacks] => Ok(Some(PeakSnapshot {
            index,
            instructions,
            total_bytes,
            useful_heap,
            extra_heap,
            stacks,
        })),
        _ => Err(ExtractError::Malformed {
            line: line_no,
            reason: format!(
                "expected {} snapshot fields, found {}",
                MEMORY_METRIC_WIDTH,
                values.len()
            ),
        }),
    }
}

/// Find the peak snapshot in `ms_print` output.
///
/// Returns `Ok(None)` when no peak is announced or the announced snapshot
/// record never appears.
///
/// # Examples
///
/// ```
/// use pqcperf_extract::parse_peak_snapshot;
///
/// let text = "\
/// Number of snapshots: 3
///  Detailed snapshots: [1 (peak)]
///   n        time(i)         total(B)   useful-heap(B) extra-heap(B)    stacks(B)
///   0              0                0                0             0            0
///   1        126,544            3,464               24             8        3,432
/// ";
/// let peak = parse_peak_snapshot(text).unwrap().unwrap();
/// assert_eq!(peak.index, 1);
/// assert_eq!(peak.instructions, 126_544);
/// assert_eq!(peak.stacks, 3_432);
/// ```
pub fn parse_peak_snapshot(text: &str) -> Result<Option<PeakSnapshot>> {
    let mut peak: Option<(usize, String)> = None;

    for (line_idx, line) in text.lines().enumerate() {
        if line.trim_start().starts_with(DETAILED_SNAPSHOTS) {
            if let Some(index) = peak_index(line) {
                tracing::debug!(index, "peak snapshot announced");
                peak = Some((index, format!("{:>3}", index)));
            }
            continue;
        }

        if let Some((index, prefix)) = &peak {
            if line.starts_with(prefix.as_str()) {
                if let Some(snapshot) = parse_record(line, *index, line_idx + 1)? {
                    return Ok(Some(snapshot));
                }
            }
        }
    }

    Ok(None)
}

/// Read a massif output file and find its peak snapshot.
pub fn read_peak_snapshot(path: &Path, limits: &ReadLimits) -> Result<Option<PeakSnapshot>> {
    let text = limits.read_to_string(path)?;
    parse_peak_snapshot(&text).map_err(|e| e.in_file(path))
}
