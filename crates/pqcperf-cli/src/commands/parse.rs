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

//! The parse commands.

use super::report::print_report;
use crate::cli::ParseArgs;
use crate::error::CliError;
use pqcperf::{
    parse_all, parse_computational, parse_tls, ConflictPolicy, ParseOptions, ProjectRoot,
    ReadLimits,
};

/// Which result sets a command parses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultSet {
    /// liboqs memory and speed results.
    Computational,
    /// TLS handshake and speed results.
    Tls,
    /// Both, computational first.
    Both,
}

/// Locate the project root from `--root` or the current directory.
pub fn resolve_root(args: &ParseArgs) -> Result<ProjectRoot, CliError> {
    match &args.root {
        Some(root) => Ok(ProjectRoot::at(root)?),
        None => {
            let cwd = std::env::current_dir().map_err(|e| CliError::io_error(".", e))?;
            Ok(ProjectRoot::discover(&cwd)?)
        }
    }
}

/// Pipeline options from the command arguments and the environment.
pub fn build_options(args: &ParseArgs) -> Result<ParseOptions, CliError> {
    let options = ParseOptions::new(args.machine_id, args.total_runs)?
        .with_conflict_policy(ConflictPolicy::from_replace_flag(args.replace_old_results))
        .with_limits(ReadLimits::from_env());
    Ok(options)
}

/// Parse the selected result set and print the report.
pub fn parse(set: ResultSet, args: &ParseArgs) -> Result<(), CliError> {
    let root = resolve_root(args)?;
    let options = build_options(args)?;
    tracing::debug!(root = %root.path().display(), ?set, "project root resolved");

    let report = match set {
        ResultSet::Computational => parse_computational(&root, &options)?,
        ResultSet::Tls => parse_tls(&root, &options)?,
        ResultSet::Both => parse_all(&root, &options)?,
    };

    print_report(&report, args.json)
}
