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

//! Temporary project trees populated with raw benchmark artifacts.

use crate::formats::{
    default_s_time_log, liboqs_speed_output, massif_output, openssl_speed_output, SnapshotRecord,
};
use pqcperf_core::{
    AlgorithmCategory, AlgorithmFamily, ComputationalLayout, ProjectRoot, TlsLayout, TlsVariant,
    OPERATIONS_PER_ALGORITHM, ROOT_MARKER,
};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A project root in a temporary directory, removed on drop.
pub struct TestProject {
    dir: TempDir,
    root: ProjectRoot,
}

impl TestProject {
    /// Create an empty project root carrying the marker file.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        fs::write(dir.path().join(ROOT_MARKER), "").expect("write root marker");
        let root = ProjectRoot::at(dir.path()).expect("marker just written");
        Self { dir, root }
    }

    /// Root directory on disk.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// The verified project root.
    pub fn root(&self) -> &ProjectRoot {
        &self.root
    }

    /// Computational layout of `machine_id`.
    pub fn computational(&self, machine_id: u32) -> ComputationalLayout {
        ComputationalLayout::new(&self.root, machine_id)
    }

    /// TLS layout of `machine_id`.
    pub fn tls(&self, machine_id: u32) -> TlsLayout {
        TlsLayout::new(&self.root, machine_id)
    }

    /// Write `contents` to `path`, creating parent directories.
    pub fn write(&self, path: &Path, contents: &str) -> &Self {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent dirs");
        }
        fs::write(path, contents).expect("write fixture file");
        self
    }

    /// Write an algorithm list file.
    pub fn alg_list<S: AsRef<str>>(&self, category: AlgorithmCategory, names: &[S]) -> &Self {
        let mut text = String::new();
        for name in names {
            text.push_str(name.as_ref());
            text.push('\n');
        }
        self.write(&self.root.alg_lists_dir().join(category.file_name()), &text)
    }

    /// Path of an algorithm list file.
    pub fn alg_list_path(&self, category: AlgorithmCategory) -> PathBuf {
        self.root.alg_lists_dir().join(category.file_name())
    }

    /// Write the KEM and signature lists plus a massif file for every
    /// algorithm operation and a liboqs speed file per family, for
    /// `runs` runs.
    pub fn populate_computational(
        &self,
        machine_id: u32,
        runs: u32,
        kems: &[&str],
        sigs: &[&str],
    ) -> ComputationalLayout {
        self.alg_list(AlgorithmCategory::Kem, kems);
        self.alg_list(AlgorithmCategory::Sig, sigs);
        let layout = self.computational(machine_id);

        for (family, algs) in [(AlgorithmFamily::Kem, kems), (AlgorithmFamily::Sig, sigs)] {
            let owned: Vec<String> = algs.iter().map(|a| a.to_string()).collect();
            for run in 1..=runs {
                for (alg_idx, alg) in algs.iter().enumerate() {
                    for op in 0..OPERATIONS_PER_ALGORITHM {
                        let seed = (alg_idx * OPERATIONS_PER_ALGORITHM + op) as u64 + u64::from(run);
                        let records = [SnapshotRecord::seeded(0), SnapshotRecord::seeded(seed)];
                        let command = format!("./test_{}_mem {} {}", family.tag(), alg, op);
                        self.write(
                            &layout.memory_artifact(family, alg, op, run),
                            &massif_output(&command, &records, 1),
                        );
                    }
                }
                self.write(
                    &layout.raw_speed_file(family, run),
                    &liboqs_speed_output(family, &owned),
                );
            }
        }
        layout
    }

    /// Write every TLS list of `algs` plus all handshake and speed
    /// artifacts for `runs` runs.
    pub fn populate_tls(&self, machine_id: u32, runs: u32, algs: &TlsAlgorithms) -> TlsLayout {
        for category in AlgorithmCategory::TLS {
            self.alg_list(category, algs.list(category));
        }
        let layout = self.tls(machine_id);
        let log = default_s_time_log();

        for run in 1..=runs {
            for variant in TlsVariant::ALL {
                for sig in algs.list(variant.sig_category()) {
                    for kem in algs.list(variant.kem_category()) {
                        self.write(&layout.handshake_artifact(variant, run, sig, kem), &log);
                    }
                }
                for family in AlgorithmFamily::ALL {
                    let listed: Vec<String> = algs
                        .list(variant.speed_category(family))
                        .iter()
                        .map(|a| a.to_string())
                        .collect();
                    self.write(
                        &layout.speed_artifact(variant, family, run),
                        &openssl_speed_output(family, &listed),
                    );
                }
            }
            for cipher in algs.list(AlgorithmCategory::Cipher) {
                for alg in algs.list(AlgorithmCategory::Classic) {
                    self.write(&layout.classic_artifact(run, cipher, alg), &log);
                }
            }
        }
        layout
    }
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

/// Algorithm names for every TLS list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlsAlgorithms {
    pub kems: Vec<&'static str>,
    pub sigs: Vec<&'static str>,
    pub hybrid_kems: Vec<&'static str>,
    pub hybrid_sigs: Vec<&'static str>,
    pub speed_kems: Vec<&'static str>,
    pub speed_sigs: Vec<&'static str>,
    pub hybrid_speed_kems: Vec<&'static str>,
    pub hybrid_speed_sigs: Vec<&'static str>,
    pub classic: Vec<&'static str>,
    pub ciphers: Vec<&'static str>,
}

impl TlsAlgorithms {
    /// A small set that keeps artifact counts low.
    pub fn small() -> Self {
        Self {
            kems: vec!["mlkem512", "mlkem768"],
            sigs: vec!["mldsa44", "falcon512"],
            hybrid_kems: vec!["p256_mlkem512"],
            hybrid_sigs: vec!["p256_mldsa44"],
            speed_kems: vec!["mlkem512", "mlkem768"],
            speed_sigs: vec!["mldsa44"],
            hybrid_speed_kems: vec!["p256_mlkem512"],
            hybrid_speed_sigs: vec!["p256_mldsa44"],
            classic: vec!["RSA_2048", "prime256v1"],
            ciphers: vec!["TLS_AES_256_GCM_SHA384"],
        }
    }

    /// Names of one list.
    pub fn list(&self, category: AlgorithmCategory) -> &[&'static str] {
        match category {
            AlgorithmCategory::TlsKem => &self.kems,
            AlgorithmCategory::TlsSig => &self.sigs,
            AlgorithmCategory::HybridKem => &self.hybrid_kems,
            AlgorithmCategory::HybridSig => &self.hybrid_sigs,
            AlgorithmCategory::SpeedKem => &self.speed_kems,
            AlgorithmCategory::SpeedSig => &self.speed_sigs,
            AlgorithmCategory::HybridSpeedKem => &self.hybrid_speed_kems,
            AlgorithmCategory::HybridSpeedSig => &self.hybrid_speed_sigs,
            AlgorithmCategory::Classic => &self.classic,
            AlgorithmCategory::Cipher => &self.ciphers,
            AlgorithmCategory::Kem | AlgorithmCategory::Sig => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_project_has_marker() {
        let project = TestProject::new();
        assert!(project.path().join(ROOT_MARKER).is_file());
        assert_eq!(project.root().path(), project.path());
    }

    #[test]
    fn test_populate_computational_writes_every_artifact() {
        let project = TestProject::new();
        let layout = project.populate_computational(1, 2, &["HQC-128", "BIKE-L1"], &["Falcon-512"]);

        for run in 1..=2 {
            for op in 0..OPERATIONS_PER_ALGORITHM {
                assert!(layout.memory_artifact(AlgorithmFamily::Kem, "BIKE-L1", op, run).is_file());
                assert!(layout.memory_artifact(AlgorithmFamily::Sig, "Falcon-512", op, run).is_file());
            }
            assert!(layout.raw_speed_file(AlgorithmFamily::Kem, run).is_file());
        }
        assert!(project.alg_list_path(AlgorithmCategory::Kem).is_file());
    }

    #[test]
    fn test_populate_tls_writes_handshake_files() {
        let project = TestProject::new();
        let layout = project.populate_tls(3, 1, &TlsAlgorithms::small());

        let pqc_files = fs::read_dir(layout.up_handshake_dir(TlsVariant::Pqc)).unwrap().count();
        assert_eq!(pqc_files, 4);
        assert!(layout.classic_artifact(1, "TLS_AES_256_GCM_SHA384", "RSA_2048").is_file());
    }
}
