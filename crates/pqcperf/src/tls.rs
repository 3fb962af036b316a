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

//! TLS result assembly: handshake timings and `openssl speed` throughput.

use crate::error::Result;
use crate::options::ParseOptions;
use crate::output::{prepare_output_dirs, TableSink};
use crate::report::ParseReport;
use pqcperf_core::schema::{CLASSIC_HANDSHAKE_COLUMNS, PQC_HANDSHAKE_COLUMNS};
use pqcperf_core::{
    AlgorithmCategory, AlgorithmFamily, AlgorithmManifest, CoreError, Expectation, MetricRow,
    NormalizedTable, ProjectRoot, ReadLimits, TlsLayout, TlsVariant,
};
use pqcperf_extract::{append_timing_metrics, read_throughput_table, SessionPhase};
use std::fs;
use std::path::Path;

/// Rows per signature/KEM pair: first use and session reuse.
pub const ROWS_PER_HANDSHAKE_PAIR: usize = 2;

/// Category name of a variant's combined handshake tables.
pub fn handshake_category(variant: TlsVariant) -> String {
    format!("{} TLS Handshake Results", variant)
}

/// Category name of the classic handshake tables.
pub const CLASSIC_CATEGORY: &str = "Classic TLS Handshake Results";

/// Category name of a throughput table.
pub fn throughput_category(variant: TlsVariant, family: AlgorithmFamily) -> String {
    format!("{} {} TLS Speed Results", variant, family.display_name())
}

/// Verify that run 1 of `variant` produced one `s_time` log per
/// signature/KEM pair.
///
/// # Errors
///
/// Fails when the raw directory cannot be listed or the file count differs
/// from `|sigs| × |kems|`. A missing directory counts as zero files.
pub fn check_handshake_file_count(
    layout: &TlsLayout,
    variant: TlsVariant,
    sigs: usize,
    kems: usize,
) -> Result<()> {
    let dir = layout.up_handshake_dir(variant);
    let count = match fs::read_dir(&dir) {
        Ok(entries) => entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| {
                let name = entry.file_name();
                let name = name.to_string_lossy();
                name.starts_with("tls_handshake_1_") && name.ends_with(".txt")
            })
            .count(),
        // a variant that never ran has no directory
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => 0,
        Err(e) => return Err(CoreError::io_error(&dir, e).into()),
    };

    Expectation::per_pair(
        format!("{} TLS Handshake result files", variant),
        sigs,
        kems,
        1,
    )
    .check(count)?;
    Ok(())
}

fn timing_row(
    labels: [&str; 2],
    path: &Path,
    phase: SessionPhase,
    limits: &ReadLimits,
) -> MetricRow {
    let mut row = MetricRow::new([labels[0], labels[1], phase.tag()]);
    append_timing_metrics(&mut row, path, phase, limits);
    row
}

/// Build one run's combined handshake table for `variant`.
///
/// Signatures are the outer loop and KEM groups the inner one; each pair
/// yields a first-use row followed by a session-reuse row.
pub fn assemble_handshake_table(
    layout: &TlsLayout,
    variant: TlsVariant,
    sigs: &[String],
    kems: &[String],
    run: u32,
    limits: &ReadLimits,
) -> Result<NormalizedTable> {
    let mut table = NormalizedTable::new(PQC_HANDSHAKE_COLUMNS);

    for sig in sigs {
        for kem in kems {
            let path = layout.handshake_artifact(variant, run, sig, kem);
            for phase in SessionPhase::ALL {
                table.push_row(timing_row([sig.as_str(), kem.as_str()], &path, phase, limits))?;
            }
        }
    }

    Expectation::per_pair(
        handshake_category(variant),
        sigs.len(),
        kems.len(),
        ROWS_PER_HANDSHAKE_PAIR,
    )
    .validate(&table)?;
    Ok(table)
}

/// Rows of a combined handshake table whose signing algorithm contains
/// `sig`.
pub fn signature_subset(table: &NormalizedTable, sig: &str) -> NormalizedTable {
    table.filter_contains(0, sig)
}

/// Build one run's classic handshake table.
pub fn assemble_classic_table(
    layout: &TlsLayout,
    ciphers: &[String],
    classic: &[String],
    run: u32,
    limits: &ReadLimits,
) -> Result<NormalizedTable> {
    let mut table = NormalizedTable::new(CLASSIC_HANDSHAKE_COLUMNS);

    for cipher in ciphers {
        for alg in classic {
            let path = layout.classic_artifact(run, cipher, alg);
            for phase in SessionPhase::ALL {
                table.push_row(timing_row([cipher.as_str(), alg.as_str()], &path, phase, limits))?;
            }
        }
    }

    Expectation::per_pair(
        CLASSIC_CATEGORY,
        ciphers.len(),
        classic.len(),
        ROWS_PER_HANDSHAKE_PAIR,
    )
    .validate(&table)?;
    Ok(table)
}

/// Parse one `openssl speed` file and check it holds one row per listed
/// algorithm.
pub fn assemble_throughput_table(
    path: &Path,
    variant: TlsVariant,
    family: AlgorithmFamily,
    algorithms: &[String],
    limits: &ReadLimits,
) -> Result<NormalizedTable> {
    let table = read_throughput_table(path, family, limits)?;
    Expectation::per_algorithm(throughput_category(variant, family), algorithms.len(), 1)
        .validate(&table)?;
    Ok(table)
}

/// Parse every TLS result of one machine.
pub fn parse_tls(root: &ProjectRoot, options: &ParseOptions) -> Result<ParseReport> {
    options.validate()?;
    let manifest = AlgorithmManifest::load_tls(&root.alg_lists_dir(), &options.limits)?;
    parse_tls_with(root, &manifest, options)
}

/// [`parse_tls`] with an already loaded manifest.
pub fn parse_tls_with(
    root: &ProjectRoot,
    manifest: &AlgorithmManifest,
    options: &ParseOptions,
) -> Result<ParseReport> {
    let layout = TlsLayout::new(root, options.machine_id);
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

    tracing::info!(machine_id = options.machine_id, runs = options.total_runs, "parsing TLS results");
    let mut sink = TableSink::new(options.machine_id, &options.csv);
    let limits = &options.limits;

    for run in options.runs() {
        for variant in TlsVariant::ALL {
            let sigs = manifest.algorithms(variant.sig_category());
            let kems = manifest.algorithms(variant.kem_category());
            if run == 1 {
                check_handshake_file_count(&layout, variant, sigs.len(), kems.len())?;
            }

            let category = handshake_category(variant);
            let base = assemble_handshake_table(&layout, variant, sigs, kems, run, limits)?;
            sink.write(&category, run, &layout.base_table(variant, run), &base)?;

            for sig in sigs {
                let subset = signature_subset(&base, sig);
                sink.write(&category, run, &layout.signature_table(variant, sig, run), &subset)?;
            }
        }

        let classic = assemble_classic_table(
            &layout,
            manifest.algorithms(AlgorithmCategory::Cipher),
            manifest.algorithms(AlgorithmCategory::Classic),
            run,
            limits,
        )?;
        sink.write(CLASSIC_CATEGORY, run, &layout.classic_table(run), &classic)?;

        for variant in TlsVariant::ALL {
            for family in AlgorithmFamily::ALL {
                let algorithms = manifest.algorithms(variant.speed_category(family));
                let table = assemble_throughput_table(
                    &layout.speed_artifact(variant, family, run),
                    variant,
                    family,
                    algorithms,
                    limits,
                )?;
                sink.write(
                    &throughput_category(variant, family),
                    run,
                    &layout.speed_table(variant, family, run),
                    &table,
                )?;
            }
        }
    }

    Ok(sink.finish())
}
