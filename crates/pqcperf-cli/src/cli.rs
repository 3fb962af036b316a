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

//! CLI command definitions and argument parsing.

use crate::commands::{self, ResultSet};
use crate::error::CliError;
use clap::{Args, Subcommand};
use std::path::PathBuf;

/// Arguments shared by every parse command.
#[derive(Args, Debug, Clone)]
pub struct ParseArgs {
    /// Machine-ID whose up_results are parsed
    #[arg(short, long, default_value_t = 1)]
    pub machine_id: u32,

    /// Number of test runs performed on the machine
    #[arg(short = 'r', long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub total_runs: u32,

    /// Replace previously parsed results for the machine instead of stopping
    #[arg(long)]
    pub replace_old_results: bool,

    /// Project root (defaults to searching upwards from the current directory)
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Print the run report as JSON
    #[arg(long)]
    pub json: bool,
}

/// Top-level CLI commands.
///
/// # Examples
///
/// ```no_run
/// use clap::Parser;
/// use pqcperf_cli::cli::Commands;
///
/// #[derive(Parser)]
/// struct Cli {
///     #[command(subcommand)]
///     command: Commands,
/// }
/// ```
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse liboqs memory and CPU speed results
    ///
    /// Produces the memory tables (peak massif snapshot per algorithm
    /// operation) and the liboqs speed tables of every run.
    Computational(ParseArgs),

    /// Parse OQS-Provider TLS handshake and speed results
    ///
    /// Produces the PQC, hybrid and classic handshake tables, split per
    /// signature algorithm, and the `openssl speed` tables of every run.
    Tls(ParseArgs),

    /// Parse computational and TLS results
    Both(ParseArgs),
}

impl Commands {
    /// Execute the command.
    ///
    /// # Errors
    ///
    /// Returns `Err` when root discovery, manifest loading, a cardinality
    /// check or table output fails.
    pub fn execute(self) -> Result<(), CliError> {
        match self {
            Commands::Computational(args) => commands::parse(ResultSet::Computational, &args),
            Commands::Tls(args) => commands::parse(ResultSet::Tls, &args),
            Commands::Both(args) => commands::parse(ResultSet::Both, &args),
        }
    }
}
