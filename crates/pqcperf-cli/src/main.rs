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

//! pqcperf Command Line Interface

use clap::Parser;
use colored::Colorize;
use pqcperf_cli::cli::Commands;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// pqcperf - PQC benchmark result parser
///
/// Normalizes the raw output of the computational and TLS benchmark runs
/// into per-run CSV tables, checked against the algorithm lists recorded at
/// setup time.
///
/// # Examples
///
/// ```bash
/// # Parse three runs of machine 1
/// pqcperf computational --machine-id 1 --total-runs 3
///
/// # Re-parse TLS results, replacing the previous ones
/// pqcperf tls --total-runs 3 --replace-old-results
/// ```
#[derive(Parser)]
#[command(name = "pqcperf")]
#[command(author, version, about = "pqcperf - PQC benchmark result parser", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

fn init_tracing(verbose: bool) {
    let directive = if verbose { "pqcperf=debug" } else { "pqcperf=info" };

    // stdout carries the report
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive(directive.parse().expect("valid log directive")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command.execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "[ERROR]".red().bold(), e);
            if let Some(remedy) = e.remedy() {
                eprintln!("{}", remedy);
            }
            ExitCode::FAILURE
        }
    }
}
