// Copyright 2022 Aztec
// Copyright 2025 Horizen Labs, Inc.
// SPDX-License-Identifier: Apache-2.0 or MIT

// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// 	http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

// Field elements making up a Groth16 proof in calldata: a (2), b (2x2), c (2).
pub const GROTH16_PROOF_TOKENS: usize = 8;
// Segments of a PLONK calldata export: opaque proof, then the public input vector.
pub const PLONK_CALLDATA_SEGMENTS: usize = 2;

// EVM words are 32 bytes long
pub const EVM_WORD_SIZE: usize = 32;

pub const HEX_PREFIX: &str = "0x";
// Separator between words in an exported calldata string.
pub const WORD_SEPARATOR: &str = ", ";

#[cfg(feature = "std")]
pub const DEFAULT_ARTIFACTS_ROOT: &str = "contracts/circuits";
#[cfg(feature = "std")]
pub const ARTIFACTS_ROOT_ENV: &str = "SNARK_CALLDATA_CIRCUITS";
#[cfg(feature = "std")]
pub const PLONK_ARTIFACTS_SUBDIR: &str = "_plonk";
#[cfg(feature = "std")]
pub const PROVING_KEY_FILE: &str = "circuit_final.zkey";
