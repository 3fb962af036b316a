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

//! Handshake timing extraction from `openssl s_time` logs.
//!
//! A log holds exactly two blocks in a fixed order: first-use connections,
//! then, after a line mentioning `reuse`, connections resuming the session.
//! Each block reports a user-time line and a real-time line:
//!
//! ```text
//! 1623 connections in 0.92s; 1764.13 connections/user sec, bytes read 0
//! 1623 connections in 6 real seconds, 0 bytes read per connection
//! ```

use crate::error::{ExtractError, Result};
use pqcperf_core::schema::{FIRST_USE_TAG, HANDSHAKE_METRIC_WIDTH, REUSED_TAG};
use pqcperf_core::{MetricField, MetricRow, ReadLimits};
use std::fmt;
use std::path::Path;

const REUSE_MARKER: &str = "reuse";

/// Which block of an `s_time` log a line belongs to.
///
/// The only transition is `FirstUse -> Reused`, taken once on the first line
/// containing the reuse marker; there is no way back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionPhase {
    /// New session per connection.
    FirstUse,
    /// Session ID reused.
    Reused,
}

impl SessionPhase {
    /// Both phases in log order.
    pub const ALL: [SessionPhase; 2] = [SessionPhase::FirstUse, SessionPhase::Reused];

    /// Phase after observing `line`.
    pub fn observe(self, line: &str) -> Self {
        match self {
            SessionPhase::FirstUse if line.contains(REUSE_MARKER) => SessionPhase::Reused,
            phase => phase,
        }
    }

    /// Value of the `Reused Session ID` column.
    pub const fn tag(self) -> &'static str {
        match self {
            SessionPhase::FirstUse => FIRST_USE_TAG,
            SessionPhase::Reused => REUSED_TAG,
        }
    }
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SessionPhase::FirstUse => "first-use",
            SessionPhase::Reused => "session-reuse",
        })
    }
}

/// The five handshake metrics of one block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimingMetrics {
    /// Connections completed, user-time line.
    pub user_connections: String,
    /// User time in seconds, unit stripped.
    pub user_seconds: String,
    /// Connections per user second.
    pub connections_per_user_second: String,
    /// Connections completed, real-time line.
    pub real_connections: String,
    /// Real time in seconds.
    pub real_seconds: String,
}

impl TimingMetrics {
    /// Metric cells in output column order.
    pub fn into_metrics(self) -> Vec<MetricField> {
        vec![
            Some(self.user_connections),
            Some(self.user_seconds),
            Some(self.connections_per_user_second),
            Some(self.real_connections),
            Some(self.real_seconds),
        ]
    }
}

fn is_user_line(line: &str) -> bool {
    line.contains("connections") && line.contains("user")
}

fn is_real_line(line: &str) -> bool {
    line.contains("connections") && line.contains("real")
}

fn numeric(token: Option<&str>, line: usize) -> Result<String> {
    let token = token.ok_or_else(|| ExtractError::Malformed {
        line,
        reason: "line ends before the expected metric".to_string(),
    })?;
    if token.parse::<f64>().is_err() {
        return Err(ExtractError::Malformed {
            line,
            reason: format!("'{}' is not numeric", token),
        });
    }
    Ok(token.to_string())
}

/// `<n> connections in <t>s; <rate> connections/user sec, ...`
fn parse_user_line(line: &str, line_no: usize) -> Result<(String, String, String)> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let seconds = tokens
        .get(3)
        .map(|t| t.trim_end_matches(';').trim_end_matches('s'));
    Ok((
        numeric(tokens.first().copied(), line_no)?,
        numeric(seconds, line_no)?,
        numeric(tokens.get(4).copied(), line_no)?,
    ))
}

/// `<n> connections in <t> real seconds, ...`
fn parse_real_line(line: &str, line_no: usize) -> Result<(String, String)> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    Ok((
        numeric(tokens.first().copied(), line_no)?,
        numeric(tokens.get(3).copied(), line_no)?,
    ))
}

/// Extract the metrics of the `wanted` block from `s_time` output.
///
/// Lines are only captured while the current phase equals `wanted`, so the
/// two blocks never mix. The first-use block ends at its real-time line; the
/// reuse block is the last one and runs to the end of the input.
///
/// # Errors
///
/// Fails when a metric line cannot be tokenized, when a block repeats a
/// metric line, or when the block ends without both lines.
///
/// # Examples
///
/// ```
/// use pqcperf_extract::{parse_timing_log, SessionPhase};
///
/// let log = "\
/// 10 connections in 0.05s; 200 connections/user sec, bytes read 0
/// 10 connections in 1 real seconds, 0 bytes read per connection
/// Now timing with session id reuse.
/// 15 connections in 0.02s; 750 connections/user sec, bytes read 0
/// 15 connections in 1 real seconds, 0 bytes read per connection
/// ";
/// let reused = parse_timing_log(log, SessionPhase::Reused).unwrap();
/// assert_eq!(reused.user_connections, "15");
/// assert_eq!(reused.user_seconds, "0.02");
/// assert_eq!(reused.connections_per_user_second, "750");
/// ```
pub fn parse_timing_log(text: &str, wanted: SessionPhase) -> Result<TimingMetrics> {
    let mut phase = SessionPhase::FirstUse;
    let mut user = None;
    let mut real = None;

    for (line_idx, line) in text.lines().enumerate() {
        let line_no = line_idx + 1;
        phase = phase.observe(line);
        if phase != wanted {
            continue;
        }

        if is_user_line(line) {
            if user.is_some() {
                return Err(ExtractError::Malformed {
                    line: line_no,
                    reason: format!("repeated user-time line in {} block", wanted),
                });
            }
            user = Some(parse_user_line(line, line_no)?);
        } else if is_real_line(line) {
            if real.is_some() {
                return Err(ExtractError::Malformed {
                    line: line_no,
                    reason: format!("repeated real-time line in {} block", wanted),
                });
            }
            real = Some(parse_real_line(line, line_no)?);
            if wanted == SessionPhase::FirstUse {
                break;
            }
        }
    }

    match (user, real) {
        (
            Some((user_connections, user_seconds, connections_per_user_second)),
            Some((real_connections, real_seconds)),
        ) => Ok(TimingMetrics {
            user_connections,
            user_seconds,
            connections_per_user_second,
            real_connections,
            real_seconds,
        }),
        _ => Err(ExtractError::Incomplete {
            what: format!("{} timing metrics", wanted),
        }),
    }
}

/// Read an `s_time` log and extract the `wanted` block.
pub fn read_timing_log(path: &Path, wanted: SessionPhase, limits: &ReadLimits) -> Result<TimingMetrics> {
    let text = limits.read_to_string(path)?;
    parse_timing_log(&text, wanted).map_err(|e| e.in_file(path))
}

/// Append the five timing metrics of `path` to `row`.
///
/// Never fails: on any read or parse failure the error is logged with the
/// offending path and five blank placeholders are appended instead, so the
/// row keeps its width. Returns whether real metrics were appended.
pub fn append_timing_metrics(
    row: &mut MetricRow,
    path: &Path,
    wanted: SessionPhase,
    limits: &ReadLimits,
) -> bool {
    match read_timing_log(path, wanted, limits) {
        Ok(metrics) => {
            row.extend_metrics(metrics.into_metrics());
            true
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), phase = %wanted, error = %e, "missing file - substituting blank row");
            row.push_blanks(HANDSHAKE_METRIC_WIDTH);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOG: &str = "\
Collecting connection statistics for 5 seconds
tttttttttttttttttttttttttttttttttttttt

1623 connections in 0.92s; 1764.13 connections/user sec, bytes read 0
1623 connections in 6 real seconds, 0 bytes read per connection


Now timing with session id reuse.
starting
rrrrrrrrrrrrrrrrrrrrrrrrrrrrrrrrrrrrrr

4571 connections in 0.64s; 7142.19 connections/user sec, bytes read 0
4571 connections in 6 real seconds, 0 bytes read per connection
";

    #[test]
    fn test_phase_transition_is_one_way() {
        let phase = SessionPhase::FirstUse.observe("Now timing with session id reuse.");
        assert_eq!(phase, SessionPhase::Reused);
        assert_eq!(phase.observe("no marker here"), SessionPhase::Reused);
        assert_eq!(
            SessionPhase::FirstUse.observe("1623 connections in 0.92s"),
            SessionPhase::FirstUse
        );
    }

    #[test]
    fn test_first_use_block() {
        let metrics = parse_timing_log(LOG, SessionPhase::FirstUse).unwrap();
        assert_eq!(
            metrics,
            TimingMetrics {
                user_connections: "1623".to_string(),
                user_seconds: "0.92".to_string(),
                connections_per_user_second: "1764.13".to_string(),
                real_connections: "1623".to_string(),
                real_seconds: "6".to_string(),
            }
        );
    }

    #[test]
    fn test_reuse_block() {
        let metrics = parse_timing_log(LOG, SessionPhase::Reused).unwrap();
        assert_eq!(metrics.user_connections, "4571");
        assert_eq!(metrics.user_seconds, "0.64");
        assert_eq!(metrics.connections_per_user_second, "7142.19");
        assert_eq!(metrics.real_seconds, "6");
    }

    #[test]
    fn test_reuse_block_missing() {
        let first_use_only = LOG.split("Now timing").next().unwrap();
        assert!(parse_timing_log(first_use_only, SessionPhase::FirstUse).is_ok());
        let err = parse_timing_log(first_use_only, SessionPhase::Reused).unwrap_err();
        assert!(matches!(err, ExtractError::Incomplete { .. }));
    }

    #[test]
    fn test_truncated_real_line() {
        let log = "10 connections in 0.05s; 200 connections/user sec\n10 connections in real seconds\n";
        let err = parse_timing_log(log, SessionPhase::FirstUse).unwrap_err();
        assert!(matches!(err, ExtractError::Malformed { line: 2, .. }));
    }

    #[test]
    fn test_repeated_reuse_line_rejected() {
        let log = format!(
            "{}4571 connections in 0.64s; 7142.19 connections/user sec, bytes read 0\n",
            LOG
        );
        let err = parse_timing_log(&log, SessionPhase::Reused).unwrap_err();
        assert!(matches!(err, ExtractError::Malformed { line: 14, .. }));
        assert!(parse_timing_log(&log, SessionPhase::FirstUse).is_ok());
    }

    #[test]
    fn test_append_blank_on_missing_file() {
        let mut row = MetricRow::new(["mldsa44", "mlkem512", ""]);
        let appended = append_timing_metrics(
            &mut row,
            Path::new("/nonexistent/tls_handshake_1_mldsa44_mlkem512.txt"),
            SessionPhase::FirstUse,
            &ReadLimits::default(),
        );
        assert!(!appended);
        assert_eq!(row.width(), 8);
        assert!(row.is_blank());
    }

    #[test]
    fn test_phase_tags() {
        assert_eq!(SessionPhase::FirstUse.tag(), "");
        assert_eq!(SessionPhase::Reused.tag(), "*");
    }
}
