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

//! Algorithm manifest: the ordered algorithm lists recorded at setup time.
//!
//! Every list is a plain text file with one algorithm name per line. The
//! order of the file is the order of the rows in every normalized table, and
//! its length defines the row count the [`cardinality`](crate::cardinality)
//! validator expects.

use crate::error::{CoreError, Result};
use crate::limits::ReadLimits;
use crate::operation::AlgorithmFamily;
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

/// Classic TLS baselines used when no `tls_classic_algs.txt` is present.
pub const DEFAULT_CLASSIC_ALGS: [&str; 6] = [
    "RSA_2048",
    "RSA_3072",
    "RSA_4096",
    "prime256v1",
    "secp384r1",
    "secp521r1",
];

/// TLS 1.3 cipher suites used when no `tls_ciphers.txt` is present.
pub const DEFAULT_CIPHERS: [&str; 3] = [
    "TLS_AES_256_GCM_SHA384",
    "TLS_CHACHA20_POLY1305_SHA256",
    "TLS_AES_128_GCM_SHA256",
];

/// One algorithm list in the manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AlgorithmCategory {
    /// liboqs KEM algorithms (computational benchmarks).
    Kem,
    /// liboqs signature algorithms (computational benchmarks).
    Sig,
    /// PQC KEM groups used in TLS handshakes.
    TlsKem,
    /// PQC signature algorithms used in TLS handshakes.
    TlsSig,
    /// Hybrid KEM groups used in TLS handshakes.
    HybridKem,
    /// Hybrid signature algorithms used in TLS handshakes.
    HybridSig,
    /// PQC KEM algorithms in the TLS speed tables.
    SpeedKem,
    /// PQC signature algorithms in the TLS speed tables.
    SpeedSig,
    /// Hybrid KEM algorithms in the TLS speed tables.
    HybridSpeedKem,
    /// Hybrid signature algorithms in the TLS speed tables.
    HybridSpeedSig,
    /// Classic TLS baselines (RSA and ECDSA curves).
    Classic,
    /// TLS 1.3 cipher suites.
    Cipher,
}

impl AlgorithmCategory {
    /// Categories required by computational (liboqs) parsing.
    pub const COMPUTATIONAL: [AlgorithmCategory; 2] =
        [AlgorithmCategory::Kem, AlgorithmCategory::Sig];

    /// Categories required by TLS parsing.
    pub const TLS: [AlgorithmCategory; 10] = [
        AlgorithmCategory::TlsKem,
        AlgorithmCategory::TlsSig,
        AlgorithmCategory::HybridKem,
        AlgorithmCategory::HybridSig,
        AlgorithmCategory::SpeedKem,
        AlgorithmCategory::SpeedSig,
        AlgorithmCategory::HybridSpeedKem,
        AlgorithmCategory::HybridSpeedSig,
        AlgorithmCategory::Classic,
        AlgorithmCategory::Cipher,
    ];

    /// File name of the list inside the `alg_lists` directory.
    pub const fn file_name(self) -> &'static str {
        match self {
            AlgorithmCategory::Kem => "kem_algs.txt",
            AlgorithmCategory::Sig => "sig_algs.txt",
            AlgorithmCategory::TlsKem => "tls_kem_algs.txt",
            AlgorithmCategory::TlsSig => "tls_sig_algs.txt",
            AlgorithmCategory::HybridKem => "tls_hybr_kem_algs.txt",
            AlgorithmCategory::HybridSig => "tls_hybr_sig_algs.txt",
            AlgorithmCategory::SpeedKem => "tls_speed_kem_algs.txt",
            AlgorithmCategory::SpeedSig => "tls_speed_sig_algs.txt",
            AlgorithmCategory::HybridSpeedKem => "tls_speed_hybr_kem_algs.txt",
            AlgorithmCategory::HybridSpeedSig => "tls_speed_hybr_sig_algs.txt",
            AlgorithmCategory::Classic => "tls_classic_algs.txt",
            AlgorithmCategory::Cipher => "tls_ciphers.txt",
        }
    }

    /// Built-in list used when the file is absent. Only the classic
    /// baselines and cipher suites have one.
    pub fn builtin(self) -> Option<&'static [&'static str]> {
        match self {
            AlgorithmCategory::Classic => Some(&DEFAULT_CLASSIC_ALGS),
            AlgorithmCategory::Cipher => Some(&DEFAULT_CIPHERS),
            _ => None,
        }
    }

    /// Family of the algorithms in the list, where one applies.
    pub const fn family(self) -> Option<AlgorithmFamily> {
        match self {
            AlgorithmCategory::Kem
            | AlgorithmCategory::TlsKem
            | AlgorithmCategory::HybridKem
            | AlgorithmCategory::SpeedKem
            | AlgorithmCategory::HybridSpeedKem => Some(AlgorithmFamily::Kem),
            AlgorithmCategory::Sig
            | AlgorithmCategory::TlsSig
            | AlgorithmCategory::HybridSig
            | AlgorithmCategory::SpeedSig
            | AlgorithmCategory::HybridSpeedSig => Some(AlgorithmFamily::Sig),
            AlgorithmCategory::Classic | AlgorithmCategory::Cipher => None,
        }
    }
}

impl fmt::Display for AlgorithmCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.file_name().trim_end_matches(".txt");
        f.write_str(name)
    }
}

/// Parse the contents of an algorithm list file.
///
/// Names are trimmed and blank lines are skipped; order is preserved and
/// duplicates are kept as-is.
///
/// # Examples
///
/// ```
/// use pqcperf_core::parse_algorithm_list;
///
/// let algs = parse_algorithm_list("ML-KEM-512\n  ML-KEM-768 \n\nML-KEM-1024\n");
/// assert_eq!(algs, vec!["ML-KEM-512", "ML-KEM-768", "ML-KEM-1024"]);
/// ```
pub fn parse_algorithm_list(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Read one algorithm list file.
pub fn read_algorithm_list(path: &Path, limits: &ReadLimits) -> Result<Vec<String>> {
    let text = limits
        .read_to_string(path)
        .map_err(|e| CoreError::Manifest {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    Ok(parse_algorithm_list(&text))
}

/// The ordered algorithm lists of one parse invocation.
///
/// Loaded once and read-only for the rest of the run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlgorithmManifest {
    lists: BTreeMap<AlgorithmCategory, Vec<String>>,
}

impl AlgorithmManifest {
    /// Build a manifest from in-memory lists.
    pub fn from_lists<I, S>(lists: I) -> Self
    where
        I: IntoIterator<Item = (AlgorithmCategory, Vec<S>)>,
        S: Into<String>,
    {
        let lists = lists
            .into_iter()
            .map(|(category, names)| (category, names.into_iter().map(Into::into).collect()))
            .collect();
        Self { lists }
    }

    /// Load the given categories from `alg_lists_dir`.
    ///
    /// A missing file is an error unless the category has a built-in list.
    pub fn load(
        alg_lists_dir: &Path,
        categories: &[AlgorithmCategory],
        limits: &ReadLimits,
    ) -> Result<Self> {
        let mut lists = BTreeMap::new();

        for &category in categories {
            let path = alg_lists_dir.join(category.file_name());
            let names = match category.builtin() {
                Some(builtin) if !path.is_file() => {
                    builtin.iter().map(|s| s.to_string()).collect()
                }
                _ => read_algorithm_list(&path, limits)?,
            };
            tracing::debug!(%category, count = names.len(), "loaded algorithm list");
            lists.insert(category, names);
        }

        Ok(Self { lists })
    }

    /// Load the lists used by computational (liboqs) parsing.
    pub fn load_computational(alg_lists_dir: &Path, limits: &ReadLimits) -> Result<Self> {
        Self::load(alg_lists_dir, &AlgorithmCategory::COMPUTATIONAL, limits)
    }

    /// Load the lists used by TLS parsing.
    pub fn load_tls(alg_lists_dir: &Path, limits: &ReadLimits) -> Result<Self> {
        Self::load(alg_lists_dir, &AlgorithmCategory::TLS, limits)
    }

    /// Algorithms of a category, in manifest order. Categories that were not
    /// loaded yield an empty slice.
    pub fn algorithms(&self, category: AlgorithmCategory) -> &[String] {
        self.lists.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of algorithms in a category.
    pub fn count(&self, category: AlgorithmCategory) -> usize {
        self.algorithms(category).len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_parse_skips_blank_lines() {
        let algs = parse_algorithm_list("\nBIKE-L1\n\n   \nHQC-128\r\n");
        assert_eq!(algs, vec!["BIKE-L1", "HQC-128"]);
    }

    #[test]
    fn test_parse_keeps_duplicates_and_order() {
        let algs = parse_algorithm_list("b\na\nb\n");
        assert_eq!(algs, vec!["b", "a", "b"]);
    }

    #[test]
    fn test_load_computational() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("kem_algs.txt"), "ML-KEM-512\nML-KEM-768\n").unwrap();
        fs::write(dir.path().join("sig_algs.txt"), "ML-DSA-44\n").unwrap();

        let manifest =
            AlgorithmManifest::load_computational(dir.path(), &ReadLimits::default()).unwrap();
        assert_eq!(
            manifest.algorithms(AlgorithmCategory::Kem),
            &["ML-KEM-512".to_string(), "ML-KEM-768".to_string()]
        );
        assert_eq!(manifest.count(AlgorithmCategory::Sig), 1);
        assert!(manifest.algorithms(AlgorithmCategory::TlsKem).is_empty());
    }

    #[test]
    fn test_load_missing_list_fails() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("kem_algs.txt"), "ML-KEM-512\n").unwrap();

        let err = AlgorithmManifest::load_computational(dir.path(), &ReadLimits::default())
            .unwrap_err();
        match err {
            CoreError::Manifest { path, .. } => assert!(path.ends_with("sig_algs.txt")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_classic_lists_fall_back_to_builtin() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = AlgorithmManifest::load(
            dir.path(),
            &[AlgorithmCategory::Classic, AlgorithmCategory::Cipher],
            &ReadLimits::default(),
        )
        .unwrap();
        assert_eq!(manifest.count(AlgorithmCategory::Classic), 6);
        assert_eq!(
            manifest.algorithms(AlgorithmCategory::Cipher)[0],
            "TLS_AES_256_GCM_SHA384"
        );
    }

    #[test]
    fn test_classic_list_file_overrides_builtin() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("tls_classic_algs.txt"), "RSA_2048\n").unwrap();
        let manifest = AlgorithmManifest::load(
            dir.path(),
            &[AlgorithmCategory::Classic],
            &ReadLimits::default(),
        )
        .unwrap();
        assert_eq!(manifest.algorithms(AlgorithmCategory::Classic), &["RSA_2048".to_string()]);
    }

    #[test]
    fn test_unloaded_category_is_empty() {
        let manifest =
            AlgorithmManifest::from_lists([(AlgorithmCategory::Kem, vec!["BIKE-L1", "HQC-128"])]);
        assert_eq!(manifest.algorithms(AlgorithmCategory::Kem).len(), 2);
        assert!(manifest.algorithms(AlgorithmCategory::Sig).is_empty());
    }

    #[test]
    fn test_category_display_and_family() {
        assert_eq!(AlgorithmCategory::HybridSpeedSig.to_string(), "tls_speed_hybr_sig_algs");
        assert_eq!(AlgorithmCategory::TlsKem.family(), Some(AlgorithmFamily::Kem));
        assert_eq!(AlgorithmCategory::Cipher.family(), None);
    }
}
