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

#![allow(non_camel_case_types)]

use alloc::vec::Vec;
use ark_bn254::{G1Affine, G2Affine};
use core::fmt;
use serde_json::Value;
use snafu::Snafu;

use crate::{
    errors::GroupError,
    normalize::{normalize, ProofValue},
    utils::{read_g1, read_g2},
    FieldElement,
};

#[derive(Debug, PartialEq, Snafu)]
pub enum VerificationKeyError {
    #[snafu(display("Missing verification key field '{field}'"))]
    MissingField { field: &'static str },
    #[snafu(display("Field '{field}' does not hold a point"))]
    InvalidShape { field: VkField },
    #[snafu(display("Point for field '{field}' is invalid. Cause: {group}"))]
    InvalidPoint { field: VkField, group: GroupError },
    #[snafu(display("The key declares {declared} public inputs but carries {actual}"))]
    PublicInputMismatch { declared: usize, actual: usize },
}

#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub enum VkField {
    ALPHA_1,
    BETA_2,
    GAMMA_2,
    DELTA_2,
    IC(usize),
    N_PUBLIC,
}

impl fmt::Display for VkField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VkField::ALPHA_1 => write!(f, "vk_alpha_1"),
            VkField::BETA_2 => write!(f, "vk_beta_2"),
            VkField::GAMMA_2 => write!(f, "vk_gamma_2"),
            VkField::DELTA_2 => write!(f, "vk_delta_2"),
            VkField::IC(i) => write!(f, "IC_{i}"),
            VkField::N_PUBLIC => write!(f, "nPublic"),
        }
    }
}

/// A Groth16 verification key over BN254.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct VerificationKey {
    pub alpha: G1Affine,
    pub beta: G2Affine,
    pub gamma: G2Affine,
    pub delta: G2Affine,
    // One point per public input, plus the constant term.
    pub ic: Vec<G1Affine>,
}

impl VerificationKey {
    /// Reads a key from the prover library's `verification_key.json` export.
    pub fn from_json(json: &Value) -> Result<Self, VerificationKeyError> {
        VerificationKey::try_from(&normalize(json))
    }

    pub fn num_public_inputs(&self) -> usize {
        self.ic.len().saturating_sub(1)
    }
}

fn integers<'a>(value: &'a ProofValue, len: usize) -> Option<Vec<&'a FieldElement>> {
    let items = value.as_sequence().filter(|items| items.len() >= len)?;
    items[..len].iter().map(ProofValue::as_integer).collect()
}

fn parse_g1(value: &ProofValue, field: VkField) -> Result<G1Affine, VerificationKeyError> {
    let coords = integers(value, 2).ok_or(VerificationKeyError::InvalidShape { field })?;
    read_g1(coords[0], coords[1])
        .map_err(|group| VerificationKeyError::InvalidPoint { field, group })
}

// The export writes G2 points as [[x_c0, x_c1], [y_c0, y_c1], ["1", "0"]].
fn parse_g2(value: &ProofValue, field: VkField) -> Result<G2Affine, VerificationKeyError> {
    let rows = value
        .as_sequence()
        .filter(|rows| rows.len() >= 2)
        .ok_or(VerificationKeyError::InvalidShape { field })?;
    let x = integers(&rows[0], 2).ok_or(VerificationKeyError::InvalidShape { field })?;
    let y = integers(&rows[1], 2).ok_or(VerificationKeyError::InvalidShape { field })?;
    read_g2(x[0], x[1], y[0], y[1])
        .map_err(|group| VerificationKeyError::InvalidPoint { field, group })
}

fn required<'a>(
    key: &'a ProofValue,
    field: &'static str,
) -> Result<&'a ProofValue, VerificationKeyError> {
    key.get(field).ok_or(VerificationKeyError::MissingField { field })
}

impl TryFrom<&ProofValue> for VerificationKey {
    type Error = VerificationKeyError;

    fn try_from(key: &ProofValue) -> Result<Self, Self::Error> {
        let alpha = parse_g1(required(key, "vk_alpha_1")?, VkField::ALPHA_1)?;
        let beta = parse_g2(required(key, "vk_beta_2")?, VkField::BETA_2)?;
        let gamma = parse_g2(required(key, "vk_gamma_2")?, VkField::GAMMA_2)?;
        let delta = parse_g2(required(key, "vk_delta_2")?, VkField::DELTA_2)?;

        let ic = required(key, "IC")?
            .as_sequence()
            .filter(|points| !points.is_empty())
            .ok_or(VerificationKeyError::InvalidShape {
                field: VkField::IC(0),
            })?
            .iter()
            .enumerate()
            .map(|(i, point)| parse_g1(point, VkField::IC(i)))
            .collect::<Result<Vec<_>, _>>()?;

        let vk = VerificationKey {
            alpha,
            beta,
            gamma,
            delta,
            ic,
        };

        if let Some(declared) = key.get("nPublic") {
            let declared = match declared {
                ProofValue::Number(number) => {
                    number.as_u64().and_then(|n| usize::try_from(n).ok())
                }
                ProofValue::Integer(value) => usize::try_from(value).ok(),
                _ => None,
            }
            .ok_or(VerificationKeyError::InvalidShape {
                field: VkField::N_PUBLIC,
            })?;

            if declared != vk.num_public_inputs() {
                return Err(VerificationKeyError::PublicInputMismatch {
                    declared,
                    actual: vk.num_public_inputs(),
                });
            }
        }

        Ok(vk)
    }
}
