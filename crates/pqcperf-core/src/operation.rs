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

//! Algorithm families and their fixed operation triples.

use std::fmt;

/// Number of benchmarked operations per algorithm, for every family.
pub const OPERATIONS_PER_ALGORITHM: usize = 3;

/// A fixed, ordered triple of operation names.
///
/// The index of an operation is part of the raw artifact file name
/// (`<alg>-<index>-<run>.txt`), so the order here must never change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationSet {
    names: [&'static str; OPERATIONS_PER_ALGORITHM],
}

/// KEM operations: key generation, encapsulation, decapsulation.
pub const KEM_OPERATIONS: OperationSet = OperationSet {
    names: ["keygen", "encaps", "decaps"],
};

/// Signature operations: key pair generation, signing, verification.
pub const SIG_OPERATIONS: OperationSet = OperationSet {
    names: ["keypair", "sign", "verify"],
};

impl OperationSet {
    /// Operation name at `index`, if in range.
    pub fn name(&self, index: usize) -> Option<&'static str> {
        self.names.get(index).copied()
    }

    /// All operation names in benchmark order.
    pub fn names(&self) -> &[&'static str; OPERATIONS_PER_ALGORITHM] {
        &self.names
    }

    /// `(index, name)` pairs in benchmark order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &'static str)> + '_ {
        self.names.iter().copied().enumerate()
    }

    /// Always [`OPERATIONS_PER_ALGORITHM`].
    pub const fn len(&self) -> usize {
        OPERATIONS_PER_ALGORITHM
    }

    /// Never empty.
    pub const fn is_empty(&self) -> bool {
        false
    }
}

/// Algorithm family of a benchmark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum AlgorithmFamily {
    /// Key encapsulation mechanisms.
    Kem,
    /// Digital signatures.
    Sig,
}

impl AlgorithmFamily {
    /// Both families, KEM first.
    pub const ALL: [AlgorithmFamily; 2] = [AlgorithmFamily::Kem, AlgorithmFamily::Sig];

    /// The family's operation triple.
    pub const fn operations(self) -> OperationSet {
        match self {
            AlgorithmFamily::Kem => KEM_OPERATIONS,
            AlgorithmFamily::Sig => SIG_OPERATIONS,
        }
    }

    /// Short tag used in file names (`kem` / `sig`).
    pub const fn tag(self) -> &'static str {
        match self {
            AlgorithmFamily::Kem => "kem",
            AlgorithmFamily::Sig => "sig",
        }
    }

    /// Label used in diagnostics (`KEM` / `Sig`).
    pub const fn display_name(self) -> &'static str {
        match self {
            AlgorithmFamily::Kem => "KEM",
            AlgorithmFamily::Sig => "Sig",
        }
    }
}

impl fmt::Display for AlgorithmFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kem_operation_order() {
        let ops = AlgorithmFamily::Kem.operations();
        assert_eq!(ops.names(), &["keygen", "encaps", "decaps"]);
        assert_eq!(ops.name(1), Some("encaps"));
        assert_eq!(ops.name(3), None);
    }

    #[test]
    fn test_sig_operation_order() {
        let ops: Vec<_> = AlgorithmFamily::Sig.operations().iter().collect();
        assert_eq!(ops, vec![(0, "keypair"), (1, "sign"), (2, "verify")]);
    }

    #[test]
    fn test_family_tags() {
        assert_eq!(AlgorithmFamily::Kem.to_string(), "kem");
        assert_eq!(AlgorithmFamily::Sig.tag(), "sig");
        assert_eq!(AlgorithmFamily::Sig.display_name(), "Sig");
        assert_eq!(KEM_OPERATIONS.len(), OPERATIONS_PER_ALGORITHM);
    }
}
