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

//! Size guard for artifacts read fully into memory.

use crate::error::{CoreError, Result};
use std::fs;
use std::path::Path;

/// Environment variable overriding [`DEFAULT_MAX_FILE_SIZE`].
pub const MAX_FILE_SIZE_ENV: &str = "PQCPERF_MAX_FILE_SIZE";

/// Default maximum artifact size: 1 GB.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 1024 * 1024 * 1024;

/// Limits applied when reading raw artifacts and manifests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadLimits {
    /// Maximum file size in bytes.
    pub max_file_size: u64,
}

impl Default for ReadLimits {
    fn default() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }
}

impl ReadLimits {
    /// Limits with the file size taken from `PQCPERF_MAX_FILE_SIZE` when it
    /// holds a valid byte count.
    pub fn from_env() -> Self {
        let max_file_size = std::env::var(MAX_FILE_SIZE_ENV)
            .ok()
            .and_then(|s| s.trim().parse::<u64>().ok())
            .unwrap_or(DEFAULT_MAX_FILE_SIZE);
        Self { max_file_size }
    }

    /// No restrictions (for testing).
    pub fn unlimited() -> Self {
        Self {
            max_file_size: u64::MAX,
        }
    }

    /// Read a whole text file, refusing files above the size limit.
    pub fn read_to_string(&self, path: &Path) -> Result<String> {
        let metadata = fs::metadata(path).map_err(|e| CoreError::io_error(path, e))?;

        if metadata.len() > self.max_file_size {
            return Err(CoreError::FileTooLarge {
                path: path.to_path_buf(),
                actual: metadata.len(),
                max: self.max_file_size,
            });
        }

        fs::read_to_string(path).map_err(|e| CoreError::io_error(path, e))
    }
}
