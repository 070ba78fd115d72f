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

#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

extern crate alloc;
extern crate core;

pub mod calldata;
mod constants;
pub mod errors;
pub mod groth16;
#[cfg(feature = "std")]
pub mod harness;
pub mod key;
#[cfg(feature = "std")]
pub mod logging;
pub mod normalize;
pub mod plonk;
#[cfg(all(test, feature = "std"))]
mod testing;
mod utils;
pub mod verifier;

use core::fmt;

use errors::CalldataError;

pub use constants::GROTH16_PROOF_TOKENS;
pub use groth16::{Groth16Calldata, Groth16Encoder, Groth16Proof};
pub use key::VerificationKey;
pub use normalize::{normalize, ProofValue};
pub use plonk::{PlonkCalldata, PlonkEncoder, PlonkProof};
pub use verifier::NativeGroth16Verifier;

/// An element of the proving system's field, as an arbitrary-precision integer.
pub type FieldElement = num_bigint::BigUint;

/// Proving schemes with a verifier calling convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scheme {
    Groth16,
    Plonk,
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scheme::Groth16 => write!(f, "groth16"),
            Scheme::Plonk => write!(f, "plonk"),
        }
    }
}

/// Turns the prover's exported calldata into the positional arguments of a
/// scheme's `verifyProof` entry point.
pub trait SchemeEncoder {
    const SCHEME: Scheme;

    /// The argument list passed to the verifier.
    type Arguments: fmt::Debug + Send + Sync;

    fn encode(calldata: &str) -> Result<Self::Arguments, CalldataError>;

    /// A well-formed argument list made of zeros, which no verifier should accept.
    fn degenerate() -> Self::Arguments;

    fn public_inputs(arguments: &Self::Arguments) -> &[FieldElement];
}
