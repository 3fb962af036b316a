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

//! Project root discovery and the per-machine directory layout.
//!
//! Raw (`up_results`) and normalized (`results`) trees live side by side
//! under `<root>/test_data`, split by result category and machine.

use crate::error::{CoreError, Result};
use crate::manifest::AlgorithmCategory;
use crate::operation::AlgorithmFamily;
use std::fmt;
use std::path::{Path, PathBuf};

/// Sentinel file marking the project root.
pub const ROOT_MARKER: &str = ".pqc_eval_dir_marker.tmp";

/// A directory verified to carry [`ROOT_MARKER`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRoot {
    path: PathBuf,
}

impl ProjectRoot {
    /// Walk up from `start` until a directory holding the marker is found.
    pub fn discover(start: &Path) -> Result<Self> {
        start
            .ancestors()
            .find(|dir| dir.join(ROOT_MARKER).is_file())
            .map(|dir| Self {
                path: dir.to_path_buf(),
            })
            .ok_or_else(|| CoreError::RootNotFound {
                marker: ROOT_MARKER,
                start: start.to_path_buf(),
            })
    }

    /// Use `path` as the root, verifying the marker is present.
    pub fn at(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !path.join(ROOT_MARKER).is_file() {
            return Err(CoreError::NotProjectRoot {
                path,
                marker: ROOT_MARKER,
            });
        }
        Ok(Self { path })
    }

    /// Root directory.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `<root>/test_data`.
    pub fn test_data(&self) -> PathBuf {
        self.path.join("test_data")
    }

    /// Directory holding the algorithm list files.
    pub fn alg_lists_dir(&self) -> PathBuf {
        self.test_data().join("alg_lists")
    }

    /// Top-level normalized results directory.
    pub fn results_dir(&self) -> PathBuf {
        self.test_data().join("results")
    }

    /// Top-level raw results directory.
    pub fn up_results_dir(&self) -> PathBuf {
        self.test_data().join("up_results")
    }
}

fn machine_dir_name(machine_id: u32) -> String {
    format!("machine_{}", machine_id)
}

/// Paths of one machine's computational (liboqs) results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComputationalLayout {
    /// Machine identifier.
    pub machine_id: u32,
    /// Raw tree for the machine.
    pub up_machine_dir: PathBuf,
    /// Raw `speed_kem` / `speed_sig` output.
    pub raw_speed_dir: PathBuf,
    /// Cleaned speed tables (intermediate, `|`-delimited).
    pub up_speed_dir: PathBuf,
    /// Massif snapshot files.
    pub up_mem_dir: PathBuf,
    /// Normalized tree for the machine.
    pub results_machine_dir: PathBuf,
    /// Normalized speed tables.
    pub speed_dir: PathBuf,
    /// Normalized memory tables.
    pub mem_dir: PathBuf,
}

impl ComputationalLayout {
    /// Layout under `<root>/test_data/{up_results,results}/computational_performance`.
    pub fn new(root: &ProjectRoot, machine_id: u32) -> Self {
        let machine = machine_dir_name(machine_id);
        let up_machine_dir = root
            .up_results_dir()
            .join("computational_performance")
            .join(&machine);
        let results_machine_dir = root
            .results_dir()
            .join("computational_performance")
            .join(&machine);

        Self {
            machine_id,
            raw_speed_dir: up_machine_dir.join("raw_speed_results"),
            up_speed_dir: up_machine_dir.join("speed_results"),
            up_mem_dir: up_machine_dir.join("mem_results"),
            speed_dir: results_machine_dir.join("speed_results"),
            mem_dir: results_machine_dir.join("mem_results"),
            up_machine_dir,
            results_machine_dir,
        }
    }

    /// Massif output for one algorithm operation and run.
    pub fn memory_artifact(
        &self,
        family: AlgorithmFamily,
        algorithm: &str,
        operation: usize,
        run: u32,
    ) -> PathBuf {
        self.up_mem_dir
            .join(format!("{}_mem_metrics", family.tag()))
            .join(format!("{}-{}-{}.txt", algorithm, operation, run))
    }

    /// Raw liboqs speed output for one family and run.
    pub fn raw_speed_file(&self, family: AlgorithmFamily, run: u32) -> PathBuf {
        self.raw_speed_dir.join(speed_file_name(family, run))
    }

    /// Cleaned liboqs speed table for one family and run.
    pub fn up_speed_file(&self, family: AlgorithmFamily, run: u32) -> PathBuf {
        self.up_speed_dir.join(speed_file_name(family, run))
    }

    /// Normalized liboqs speed table for one family and run.
    pub fn speed_table(&self, family: AlgorithmFamily, run: u32) -> PathBuf {
        self.speed_dir.join(speed_file_name(family, run))
    }

    /// Normalized memory table for one family and run.
    pub fn memory_table(&self, family: AlgorithmFamily, run: u32) -> PathBuf {
        self.mem_dir
            .join(format!("{}-mem-metrics-{}.csv", family.tag(), run))
    }

    /// Output directories created before parsing.
    pub fn output_dirs(&self) -> Vec<PathBuf> {
        vec![self.speed_dir.clone(), self.mem_dir.clone()]
    }
}

fn speed_file_name(family: AlgorithmFamily, run: u32) -> String {
    format!("test-{}-speed-{}.csv", family.tag(), run)
}

/// PQC-only or PQC-hybrid TLS test set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TlsVariant {
    /// Pure post-quantum algorithms.
    Pqc,
    /// Hybrid (classic + post-quantum) algorithms.
    Hybrid,
}

impl TlsVariant {
    /// Both variants, PQC first.
    pub const ALL: [TlsVariant; 2] = [TlsVariant::Pqc, TlsVariant::Hybrid];

    /// Directory and file name prefix.
    pub const fn prefix(self) -> &'static str {
        match self {
            TlsVariant::Pqc => "pqc",
            TlsVariant::Hybrid => "hybrid",
        }
    }

    /// Manifest list of handshake KEM groups.
    pub const fn kem_category(self) -> AlgorithmCategory {
        match self {
            TlsVariant::Pqc => AlgorithmCategory::TlsKem,
            TlsVariant::Hybrid => AlgorithmCategory::HybridKem,
        }
    }

    /// Manifest list of handshake signature algorithms.
    pub const fn sig_category(self) -> AlgorithmCategory {
        match self {
            TlsVariant::Pqc => AlgorithmCategory::TlsSig,
            TlsVariant::Hybrid => AlgorithmCategory::HybridSig,
        }
    }

    /// Manifest list of the speed table for `family`.
    pub const fn speed_category(self, family: AlgorithmFamily) -> AlgorithmCategory {
        match (self, family) {
            (TlsVariant::Pqc, AlgorithmFamily::Kem) => AlgorithmCategory::SpeedKem,
            (TlsVariant::Pqc, AlgorithmFamily::Sig) => AlgorithmCategory::SpeedSig,
            (TlsVariant::Hybrid, AlgorithmFamily::Kem) => AlgorithmCategory::HybridSpeedKem,
            (TlsVariant::Hybrid, AlgorithmFamily::Sig) => AlgorithmCategory::HybridSpeedSig,
        }
    }

    /// Prefix of speed file names.
    pub const fn speed_prefix(self) -> &'static str {
        match self {
            TlsVariant::Pqc => "tls_speed",
            TlsVariant::Hybrid => "tls_speed_hybrid",
        }
    }
}

impl fmt::Display for TlsVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TlsVariant::Pqc => "PQC",
            TlsVariant::Hybrid => "HYBRID",
        })
    }
}

/// Paths of one machine's TLS results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlsLayout {
    /// Machine identifier.
    pub machine_id: u32,
    /// Raw tree for the machine.
    pub up_machine_dir: PathBuf,
    /// Normalized tree for the machine.
    pub results_machine_dir: PathBuf,
    /// Normalized handshake tables.
    pub handshake_dir: PathBuf,
    /// Normalized speed tables.
    pub speed_dir: PathBuf,
}

impl TlsLayout {
    /// Layout under `<root>/test_data/{up_results,results}/tls_performance`.
    pub fn new(root: &ProjectRoot, machine_id: u32) -> Self {
        let machine = machine_dir_name(machine_id);
        let up_machine_dir = root.up_results_dir().join("tls_performance").join(&machine);
        let results_machine_dir = root.results_dir().join("tls_performance").join(&machine);

        Self {
            machine_id,
            handshake_dir: results_machine_dir.join("handshake_results"),
            speed_dir: results_machine_dir.join("speed_results"),
            up_machine_dir,
            results_machine_dir,
        }
    }

    /// Raw handshake directory of a variant.
    pub fn up_handshake_dir(&self, variant: TlsVariant) -> PathBuf {
        self.up_machine_dir
            .join("handshake_results")
            .join(variant.prefix())
    }

    /// Raw classic handshake directory.
    pub fn up_classic_dir(&self) -> PathBuf {
        self.up_machine_dir.join("handshake_results").join("classic")
    }

    /// `s_time` output for one signature/KEM pair.
    pub fn handshake_artifact(&self, variant: TlsVariant, run: u32, sig: &str, kem: &str) -> PathBuf {
        self.up_handshake_dir(variant)
            .join(format!("tls_handshake_{}_{}_{}.txt", run, sig, kem))
    }

    /// `s_time` output for one cipher suite/classic algorithm pair.
    pub fn classic_artifact(&self, run: u32, cipher: &str, alg: &str) -> PathBuf {
        self.up_classic_dir()
            .join(format!("tls_handshake_classic_{}_{}_{}.txt", run, cipher, alg))
    }

    /// Raw `openssl speed` output.
    pub fn speed_artifact(&self, variant: TlsVariant, family: AlgorithmFamily, run: u32) -> PathBuf {
        self.up_machine_dir
            .join("speed_results")
            .join(variant.prefix())
            .join(format!("{}_{}_{}.txt", variant.speed_prefix(), family.tag(), run))
    }

    /// Normalized handshake directory of a variant.
    pub fn handshake_results_dir(&self, variant: TlsVariant) -> PathBuf {
        self.handshake_dir.join(variant.prefix())
    }

    /// Directory of the combined per-run tables of a variant.
    pub fn base_results_dir(&self, variant: TlsVariant) -> PathBuf {
        self.handshake_results_dir(variant).join("base_results")
    }

    /// Combined per-run handshake table.
    pub fn base_table(&self, variant: TlsVariant, run: u32) -> PathBuf {
        self.base_results_dir(variant)
            .join(format!("{}_base_results_run_{}.csv", variant.prefix(), run))
    }

    /// Per-signature handshake table.
    pub fn signature_table(&self, variant: TlsVariant, sig: &str, run: u32) -> PathBuf {
        self.handshake_results_dir(variant)
            .join(sig)
            .join(format!("tls_handshake_{}_run_{}.csv", sig, run))
    }

    /// Normalized classic handshake directory.
    pub fn classic_dir(&self) -> PathBuf {
        self.handshake_dir.join("classic")
    }

    /// Classic handshake table.
    pub fn classic_table(&self, run: u32) -> PathBuf {
        self.classic_dir()
            .join(format!("classic_results_run_{}.csv", run))
    }

    /// Normalized speed table.
    pub fn speed_table(&self, variant: TlsVariant, family: AlgorithmFamily, run: u32) -> PathBuf {
        self.speed_dir
            .join(format!("{}_{}_{}.csv", variant.speed_prefix(), family.tag(), run))
    }

    /// Output directories created before parsing.
    pub fn output_dirs(&self) -> Vec<PathBuf> {
        vec![
            self.base_results_dir(TlsVariant::Pqc),
            self.base_results_dir(TlsVariant::Hybrid),
            self.classic_dir(),
            self.speed_dir.clone(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn temp_root() -> (tempfile::TempDir, ProjectRoot) {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(ROOT_MARKER), "").unwrap();
        let root = ProjectRoot::at(dir.path()).unwrap();
        (dir, root)
    }

    #[test]
    fn test_discover_walks_up() {
        let (dir, _) = temp_root();
        let nested = dir.path().join("scripts").join("parsing_scripts");
        fs::create_dir_all(&nested).unwrap();

        let root = ProjectRoot::discover(&nested).unwrap();
        assert_eq!(root.path(), dir.path());
    }

    #[test]
    fn test_discover_without_marker() {
        let dir = tempfile::tempdir().unwrap();
        let err = ProjectRoot::discover(dir.path()).unwrap_err();
        assert!(matches!(err, CoreError::RootNotFound { .. }));
    }

    #[test]
    fn test_at_requires_marker() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            ProjectRoot::at(dir.path()),
            Err(CoreError::NotProjectRoot { .. })
        ));
    }

    #[test]
    fn test_computational_paths() {
        let (dir, root) = temp_root();
        let layout = ComputationalLayout::new(&root, 2);

        assert_eq!(
            layout.memory_artifact(AlgorithmFamily::Kem, "BIKE-L1", 1, 3),
            dir.path().join(
                "test_data/up_results/computational_performance/machine_2/mem_results/kem_mem_metrics/BIKE-L1-1-3.txt"
            )
        );
        assert_eq!(
            layout.memory_table(AlgorithmFamily::Sig, 1),
            dir.path()
                .join("test_data/results/computational_performance/machine_2/mem_results/sig-mem-metrics-1.csv")
        );
        assert!(layout
            .raw_speed_file(AlgorithmFamily::Kem, 4)
            .ends_with("raw_speed_results/test-kem-speed-4.csv"));
    }

    #[test]
    fn test_tls_paths() {
        let (_dir, root) = temp_root();
        let layout = TlsLayout::new(&root, 1);

        assert!(layout
            .handshake_artifact(TlsVariant::Hybrid, 2, "p256_mldsa44", "p256_mlkem512")
            .ends_with("handshake_results/hybrid/tls_handshake_2_p256_mldsa44_p256_mlkem512.txt"));
        assert!(layout
            .classic_artifact(1, "TLS_AES_128_GCM_SHA256", "RSA_2048")
            .ends_with("classic/tls_handshake_classic_1_TLS_AES_128_GCM_SHA256_RSA_2048.txt"));
        assert!(layout
            .base_table(TlsVariant::Pqc, 3)
            .ends_with("handshake_results/pqc/base_results/pqc_base_results_run_3.csv"));
        assert!(layout
            .signature_table(TlsVariant::Pqc, "mldsa65", 1)
            .ends_with("handshake_results/pqc/mldsa65/tls_handshake_mldsa65_run_1.csv"));
        assert!(layout
            .speed_artifact(TlsVariant::Hybrid, AlgorithmFamily::Sig, 2)
            .ends_with("speed_results/hybrid/tls_speed_hybrid_sig_2.txt"));
        assert!(layout
            .speed_table(TlsVariant::Pqc, AlgorithmFamily::Kem, 2)
            .ends_with("results/tls_performance/machine_1/speed_results/tls_speed_kem_2.csv"));
    }

    #[test]
    fn test_variant_categories() {
        assert_eq!(TlsVariant::Pqc.kem_category(), AlgorithmCategory::TlsKem);
        assert_eq!(TlsVariant::Hybrid.sig_category(), AlgorithmCategory::HybridSig);
        assert_eq!(
            TlsVariant::Hybrid.speed_category(AlgorithmFamily::Kem),
            AlgorithmCategory::HybridSpeedKem
        );
        assert_eq!(TlsVariant::Hybrid.to_string(), "HYBRID");
    }
}
