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

//! Options threaded through the parse pipelines.

use crate::error::{PipelineError, Result};
use pqcperf_core::ReadLimits;
use pqcperf_csv::ToCsvConfig;

/// What to do when normalized results already exist for a machine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ConflictPolicy {
    /// Stop with an error naming the existing directory.
    #[default]
    Abort,
    /// Remove the existing results and parse again.
    Replace,
}

impl ConflictPolicy {
    /// Policy selected by a `--replace-old-results` style flag.
    pub fn from_replace_flag(replace: bool) -> Self {
        if replace {
            ConflictPolicy::Replace
        } else {
            ConflictPolicy::Abort
        }
    }
}

/// Configuration for one parse invocation.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Machine whose results are parsed.
    pub machine_id: u32,
    /// Number of benchmark runs to parse (runs are numbered from 1).
    pub total_runs: u32,
    /// Handling of pre-existing normalized results.
    pub conflict_policy: ConflictPolicy,
    /// Size guard for every file read into memory.
    pub limits: ReadLimits,
    /// CSV output settings of the normalized tables.
    pub csv: ToCsvConfig,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            machine_id: 1,
            total_runs: 1,
            conflict_policy: ConflictPolicy::Abort,
            limits: ReadLimits::default(),
            csv: ToCsvConfig::default(),
        }
    }
}

impl ParseOptions {
    /// Options for `machine_id` and `total_runs`, other settings default.
    pub fn new(machine_id: u32, total_runs: u32) -> Result<Self> {
        let options = Self {
            machine_id,
            total_runs,
            ..Self::default()
        };
        options.validate()?;
        Ok(options)
    }

    /// Set the conflict policy.
    pub fn with_conflict_policy(mut self, policy: ConflictPolicy) -> Self {
        self.conflict_policy = policy;
        self
    }

    /// Set the read limits.
    pub fn with_limits(mut self, limits: ReadLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Check option invariants.
    pub fn validate(&self) -> Result<()> {
        if self.total_runs == 0 {
            return Err(PipelineError::InvalidOptions(
                "the number of test runs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Run numbers to parse, in order.
    pub fn runs(&self) -> impl Iterator<Item = u32> {
        1..=self.total_runs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_runs_rejected() {
        let err = ParseOptions::new(1, 0).unwrap_err();
        assert!(matches!(err, PipelineError::InvalidOptions(_)));
    }

    #[test]
    fn test_runs_start_at_one() {
        let options = ParseOptions::new(2, 3).unwrap();
        assert_eq!(options.runs().collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(options.conflict_policy, ConflictPolicy::Abort);
    }

    #[test]
    fn test_replace_flag() {
        assert_eq!(ConflictPolicy::from_replace_flag(true), ConflictPolicy::Replace);
        assert_eq!(ConflictPolicy::from_replace_flag(false), ConflictPolicy::Abort);
    }
}
