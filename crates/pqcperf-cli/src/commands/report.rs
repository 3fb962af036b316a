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

//! Run report output.

use crate::error::CliError;
use colored::Colorize;
use pqcperf::ParseReport;

/// Print the report to stdout, as text or as pretty JSON.
///
/// Text output lists one line per written table, marked `✓` when complete
/// and `!` when it carries blank placeholder rows.
pub fn print_report(report: &ParseReport, json: bool) -> Result<(), CliError> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    for table in &report.tables {
        let mark = if table.blank_rows > 0 {
            "!".yellow().bold()
        } else {
            "✓".green().bold()
        };
        print!(
            "{} {} (run {}): {} rows",
            mark,
            table.category,
            table.run,
            table.rows
        );
        if table.blank_rows > 0 {
            print!(", {} blank", table.blank_rows);
        }
        println!(" -> {}", table.path.display());
    }
    println!("{}", report);
    Ok(())
}
