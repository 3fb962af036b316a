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

//! Computational (liboqs) result assembly: peak memory and CPU speed tables.

use crate::error::Result;
use crate::options::ParseOptions;
use crate::output::{prepare_output_dirs, recreate_dir, TableSink};
use crate::report::ParseReport;
use pqcperf_core::schema::{MEMORY_COLUMNS, MEMORY_METRIC_WIDTH};
use pqcperf_core::{
    AlgorithmCategory, AlgorithmFamily, AlgorithmManifest, ComputationalLayout, CoreError,
    Expectation, MetricRow, NormalizedTable, ProjectRoot, ReadLimits, OPERATIONS_PER_ALGORITHM,
};
use pqcperf_csv::ToCsvConfig;
use pqcperf_extract::{read_operation_table, read_peak_snapshot, retain_operation_rows};

/// Category name of a family's memory tables.
pub fn memory_category(family: AlgorithmFamily) -> String {
    format!("{} Memory Results", family.display_name())
}

/// Category name of a family's liboqs speed tables.
pub fn speed_category(family: AlgorithmFamily) -> String {
    format!("{} Speed Results", family.display_name())
}

/// Build one run's memory table for `family`.
///
/// Rows follow the manifest order, three per algorithm. A missing or
/// unusable massif file yields a blank row in its place.
///
/// # Errors
///
/// Fails only when the row count differs from `|algorithms| × 3`.
pub fn assemble_memory_table(
    layout: &ComputationalLayout,
    family: AlgorithmFamily,
    algorithms: &[String],
    run: u32,
    limits: &ReadLimits,
) -> Result<NormalizedTable> {
    let mut table = NormalizedTable::new(MEMORY_COLUMNS);

    for algorithm in algorithms {
        for (index, operation) in family.operations().iter() {
            let path = layout.memory_artifact(family, algorithm, index, run);
            let labels = [algorithm.as_str(), operation];

            let row = match read_peak_snapshot(&path, limits) {
                Ok(Some(peak)) => MetricRow::with_metrics(labels, peak.metrics()),
                Ok(None) => {
                    tracing::warn!(path = %path.display(), run, "no peak snapshot found - substituting blank row");
                    MetricRow::blank(labels, MEMORY_METRIC_WIDTH)
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), run, error = %e, "memory parsing error - substituting blank row");
                    MetricRow::blank(labels, MEMORY_METRIC_WIDTH)
                }
            };
            table.push_row(row)?;
        }
    }

    Expectation::per_algorithm(memory_category(family), algorithms.len(), OPERATIONS_PER_ALGORITHM)
        .validate(&table)?;
    Ok(table)
}

/// A liboqs speed table in its two output forms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeedTables {
    /// The extracted `|` table, algorithm group rows included.
    pub cleaned: NormalizedTable,
    /// Operation rows only, with a leading `Algorithm` column.
    pub normalized: NormalizedTable,
}

/// Build one run's normalized speed table from the extracted liboqs
/// operation table.
///
/// # Errors
///
/// Fails when the operation rows are not exactly `|algorithms| × 3`.
pub fn assemble_speed_tables(
    cleaned: NormalizedTable,
    family: AlgorithmFamily,
    algorithms: &[String],
) -> Result<SpeedTables> {
    let mut normalized = cleaned.clone();
    retain_operation_rows(&mut normalized, algorithms);
    Expectation::per_algorithm(speed_category(family), algorithms.len(), OPERATIONS_PER_ALGORITHM)
        .validate(&normalized)?;

    let labels = algorithms
        .iter()
        .flat_map(|alg| std::iter::repeat(alg.as_str()).take(OPERATIONS_PER_ALGORITHM));
    normalized.prepend_label_column("Algorithm", labels)?;

    Ok(SpeedTables {
        cleaned,
        normalized,
    })
}

/// Parse every computational result of one machine.
///
/// Speed tables are processed before memory tables, each run in order. The
/// first cardinality mismatch stops the run.
pub fn parse_computational(root: &ProjectRoot, options: &ParseOptions) -> Result<ParseReport> {
    options.validate()?;
    let manifest = AlgorithmManifest::load_computational(&root.alg_lists_dir(), &options.limits)?;
    parse_computational_with(root, &manifest, options)
}

/// [`parse_computational`] with an already loaded manifest.
pub fn parse_computational_with(
    root: &ProjectRoot,
    manifest: &AlgorithmManifest,
    options: &ParseOptions,
) -> Result<ParseReport> {
    let layout = ComputationalLayout::new(root, options.machine_id);
    if !layout.up_machine_dir.is_dir() {
        return Err(CoreError::MissingMachineResults {
            machine_id: options.machine_id,
            path: layout.up_machine_dir.clone(),
        }
        .into());
    }

    prepare_output_dirs(
        options.machine_id,
        &layout.results_machine_dir,
        &layout.output_dirs(),
        options.conflict_policy,
    )?;
    recreate_dir(&layout.up_speed_dir)?;

    tracing::info!(machine_id = options.machine_id, runs = options.total_runs, "parsing computational results");
    let mut sink = TableSink::new(options.machine_id, &options.csv);
    let cleaned_csv = ToCsvConfig::pipe_delimited();

    for run in options.runs() {
        for family in AlgorithmFamily::ALL {
            let algorithms = manifest.algorithms(family_category(family));
            let raw = layout.raw_speed_file(family, run);
            let cleaned = read_operation_table(&raw, &options.limits)?;
            let tables = assemble_speed_tables(cleaned, family, algorithms)?;

            sink.write_with(
                &format!("{} (pre-processed)", speed_category(family)),
                run,
                &layout.up_speed_file(family, run),
                &tables.cleaned,
                &cleaned_csv,
            )?;
            sink.write(
                &speed_category(family),
                run,
                &layout.speed_table(family, run),
                &tables.normalized,
            )?;
        }
    }

    for run in options.runs() {
        for family in AlgorithmFamily::ALL {
            let algorithms = manifest.algorithms(family_category(family));
            let table = assemble_memory_table(&layout, family, algorithms, run, &options.limits)?;
            sink.write(&memory_category(family), run, &layout.memory_table(family, run), &table)?;
        }
    }

    Ok(sink.finish())
}

fn family_category(family: AlgorithmFamily) -> AlgorithmCategory {
    match family {
        AlgorithmFamily::Kem => AlgorithmCategory::Kem,
        AlgorithmFamily::Sig => AlgorithmCategory::Sig,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pqcperf_extract::parse_operation_table;
    use pqcperf_test::{liboqs_speed_output, TestProject};

    fn names(algs: &[&str]) -> Vec<String> {
        algs.iter().map(|a| a.to_string()).collect()
    }

    #[test]
    fn test_speed_tables_insert_algorithm_column() {
        let algs = names(&["BIKE-L1", "HQC-128"]);
        let text = liboqs_speed_output(AlgorithmFamily::Kem, &algs);

        let cleaned = parse_operation_table(&text).unwrap();
        let tables = assemble_speed_tables(cleaned, AlgorithmFamily::Kem, &algs).unwrap();
        assert_eq!(tables.cleaned.len(), 8);
        assert_eq!(tables.normalized.len(), 6);
        assert_eq!(tables.normalized.columns()[0], "Algorithm");
        assert_eq!(tables.normalized.columns()[1], "Operation");

        let labels: Vec<(&str, &str)> = tables
            .normalized
            .rows()
            .iter()
            .map(|r| (r.labels()[0].as_str(), r.labels()[1].as_str()))
            .collect();
        assert_eq!(labels[0], ("BIKE-L1", "keygen"));
        assert_eq!(labels[5], ("HQC-128", "decaps"));
    }

    #[test]
    fn test_speed_table_manifest_drift_is_fatal() {
        let text = liboqs_speed_output(AlgorithmFamily::Sig, &names(&["Falcon-512", "ML-DSA-44"]));
        let cleaned = parse_operation_table(&text).unwrap();
        let err = assemble_speed_tables(cleaned, AlgorithmFamily::Sig, &names(&["Falcon-512"]))
            .unwrap_err();
        assert!(err.is_cardinality());
        assert!(err.to_string().contains("Sig Speed Results"));
    }

    #[test]
    fn test_memory_table_blank_for_missing_artifact() {
        let project = TestProject::new();
        let layout = project.populate_computational(1, 1, &["HQC-128"], &[]);
        std::fs::remove_file(layout.memory_artifact(AlgorithmFamily::Kem, "HQC-128", 1, 1)).unwrap();

        let table = assemble_memory_table(
            &layout,
            AlgorithmFamily::Kem,
            &names(&["HQC-128"]),
            1,
            &ReadLimits::default(),
        )
        .unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.blank_rows(), 1);
        assert!(table.rows()[1].is_blank());
        assert_eq!(table.rows()[1].labels()[1], "encaps");
    }
}
