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

//! Output directory preparation and table writing.

use crate::error::Result;
use crate::options::ConflictPolicy;
use crate::report::{ParseReport, WrittenTable};
use pqcperf_core::{CoreError, NormalizedTable};
use pqcperf_csv::{write_table, ToCsvConfig};
use std::fs;
use std::path::{Path, PathBuf};

/// Apply the conflict policy to `results_dir`, then create `output_dirs`.
///
/// # Errors
///
/// Fails with [`CoreError::ResultsExist`] when results are present and the
/// policy is [`ConflictPolicy::Abort`].
pub fn prepare_output_dirs(
    machine_id: u32,
    results_dir: &Path,
    output_dirs: &[PathBuf],
    policy: ConflictPolicy,
) -> Result<()> {
    if results_dir.exists() {
        match policy {
            ConflictPolicy::Abort => {
                return Err(CoreError::ResultsExist {
                    machine_id,
                    path: results_dir.to_path_buf(),
                }
                .into());
            }
            ConflictPolicy::Replace => {
                tracing::info!(
                    machine_id,
                    path = %results_dir.display(),
                    "replace-old-results set, removing old results"
                );
                fs::remove_dir_all(results_dir).map_err(|e| CoreError::io_error(results_dir, e))?;
            }
        }
    }

    for dir in output_dirs {
        fs::create_dir_all(dir).map_err(|e| CoreError::io_error(dir, e))?;
    }
    Ok(())
}

/// Remove `dir` with everything in it and create it again empty.
pub fn recreate_dir(dir: &Path) -> Result<()> {
    if dir.exists() {
        tracing::debug!(path = %dir.display(), "clearing directory");
        fs::remove_dir_all(dir).map_err(|e| CoreError::io_error(dir, e))?;
    }
    fs::create_dir_all(dir).map_err(|e| CoreError::io_error(dir, e))?;
    Ok(())
}

/// Writes validated tables and records them in a [`ParseReport`].
pub(crate) struct TableSink<'a> {
    csv: &'a ToCsvConfig,
    report: ParseReport,
}

impl<'a> TableSink<'a> {
    pub(crate) fn new(machine_id: u32, csv: &'a ToCsvConfig) -> Self {
        Self {
            csv,
            report: ParseReport::new(machine_id),
        }
    }

    /// Write `table` with the sink's CSV settings.
    pub(crate) fn write(
        &mut self,
        category: &str,
        run: u32,
        path: &Path,
        table: &NormalizedTable,
    ) -> Result<()> {
        let csv = self.csv;
        self.write_with(category, run, path, table, csv)
    }

    /// Write `table` with explicit CSV settings.
    pub(crate) fn write_with(
        &mut self,
        category: &str,
        run: u32,
        path: &Path,
        table: &NormalizedTable,
        csv: &ToCsvConfig,
    ) -> Result<()> {
        write_table(path, table, csv)?;
        let blank_rows = table.blank_rows();
        if blank_rows > 0 {
            tracing::warn!(category, run, blank_rows, path = %path.display(), "table written with blank rows");
        } else {
            tracing::info!(category, run, rows = table.len(), path = %path.display(), "table written");
        }
        self.report.push(WrittenTable {
            category: category.to_string(),
            run,
            path: path.to_path_buf(),
            rows: table.len(),
            blank_rows,
        });
        Ok(())
    }

    pub(crate) fn finish(self) -> ParseReport {
        self.report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PipelineError;

    #[test]
    fn test_abort_on_existing_results() {
        let dir = tempfile::tempdir().unwrap();
        let results = dir.path().join("machine_1");
        fs::create_dir_all(&results).unwrap();

        let err = prepare_output_dirs(1, &results, &[], ConflictPolicy::Abort).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Core(CoreError::ResultsExist { machine_id: 1, .. })
        ));
    }

    #[test]
    fn test_replace_removes_old_results() {
        let dir = tempfile::tempdir().unwrap();
        let results = dir.path().join("machine_1");
        let stale = results.join("mem_results").join("kem-mem-metrics-1.csv");
        fs::create_dir_all(stale.parent().unwrap()).unwrap();
        fs::write(&stale, "old").unwrap();

        let speed = results.join("speed_results");
        prepare_output_dirs(1, &results, &[speed.clone()], ConflictPolicy::Replace).unwrap();
        assert!(!stale.exists());
        assert!(speed.is_dir());
    }

    #[test]
    fn test_fresh_machine_creates_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let results = dir.path().join("machine_7");
        let mem = results.join("mem_results");
        prepare_output_dirs(7, &results, &[mem.clone()], ConflictPolicy::Abort).unwrap();
        assert!(mem.is_dir());
    }

    #[test]
    fn test_recreate_dir_drops_stale_files() {
        let dir = tempfile::tempdir().unwrap();
        let speed = dir.path().join("speed_results");
        fs::create_dir_all(&speed).unwrap();
        fs::write(speed.join("test-kem-speed-3.csv"), "stale").unwrap();

        recreate_dir(&speed).unwrap();
        assert!(speed.is_dir());
        assert_eq!(fs::read_dir(&speed).unwrap().count(), 0);

        let fresh = dir.path().join("fresh");
        recreate_dir(&fresh).unwrap();
        assert!(fresh.is_dir());
    }

    #[test]
    fn test_sink_records_tables() {
        let dir = tempfile::tempdir().unwrap();
        let csv = ToCsvConfig::default();
        let mut sink = TableSink::new(1, &csv);
        let table = NormalizedTable::new(["Algorithm"]);
        let path = dir.path().join("t.csv");
        sink.write("KEM Speed Results", 2, &path, &table).unwrap();

        let report = sink.finish();
        assert_eq!(report.tables[0].run, 2);
        assert_eq!(report.tables[0].path, path);
        assert!(path.is_file());
    }
}
