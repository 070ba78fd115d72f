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

//! In-process counterpart of a generated Groth16 verifier contract.

use alloc::vec::Vec;
use ark_bn254::{Bn254, Fr};
use ark_ec::{pairing::Pairing, AffineRepr, CurveGroup};
use ark_ff::One;
use tracing::debug;

use crate::{
    errors::{ProofPoint, VerifyError},
    groth16::Groth16Calldata,
    key::VerificationKey,
    utils::{read_fr, read_g1, read_g2},
};

/// Checks Groth16 argument lists the way the generated verifier contract's
/// `verifyProof(a, b, c, input)` does.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NativeGroth16Verifier {
    vk: VerificationKey,
}

impl NativeGroth16Verifier {
    pub fn new(vk: VerificationKey) -> Self {
        Self { vk }
    }

    pub fn verification_key(&self) -> &VerificationKey {
        &self.vk
    }

    /// Returns `Ok(false)` for a well-formed argument list that does not verify.
    /// Argument lists the contract would revert on are errors: a wrong input
    /// count, an input outside the scalar field or an invalid point.
    pub fn verify_proof(&self, arguments: &Groth16Calldata) -> Result<bool, VerifyError> {
        let (ic_0, ic_inputs) = self
            .vk
            .ic
            .split_first()
            .ok_or(VerifyError::MissingConstantTerm)?;

        let expected = ic_inputs.len();
        if arguments.input.len() != expected {
            return Err(VerifyError::PublicInputCount {
                expected,
                actual: arguments.input.len(),
            });
        }

        let scalars = arguments
            .input
            .iter()
            .enumerate()
            .map(|(position, input)| {
                read_fr(input).ok_or(VerifyError::InputOutsideScalarField { position })
            })
            .collect::<Result<Vec<Fr>, _>>()?;

        let a = read_g1(&arguments.a[0], &arguments.a[1]).map_err(|group| {
            VerifyError::InvalidPoint {
                point: ProofPoint::A,
                group,
            }
        })?;
        // Calldata carries the imaginary part first.
        let [[x_c1, x_c0], [y_c1, y_c0]] = &arguments.b;
        let b = read_g2(x_c0, x_c1, y_c0, y_c1).map_err(|group| VerifyError::InvalidPoint {
            point: ProofPoint::B,
            group,
        })?;
        let c = read_g1(&arguments.c[0], &arguments.c[1]).map_err(|group| {
            VerifyError::InvalidPoint {
                point: ProofPoint::C,
                group,
            }
        })?;

        // vk_x = IC_0 + sum(input_i * IC_{i+1})
        let mut vk_x = ic_0.into_group();
        for (point, scalar) in ic_inputs.iter().zip(&scalars) {
            vk_x += *point * scalar;
        }
        debug!(inputs = scalars.len(), "checking groth16 pairing equation");

        let product = Bn254::multi_pairing(
            [-a, self.vk.alpha, vk_x.into_affine(), c],
            [b, self.vk.beta, self.vk.gamma, self.vk.delta],
        );

        Ok(product.0.is_one())
    }
}
