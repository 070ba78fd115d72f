// Copyright 2022 Aztec
// Copyright 2024 Horizen Labs, Inc.
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

use crate::{
    constants::{EVM_WORD_SIZE, HEX_PREFIX},
    errors::GroupError,
    FieldElement,
};
use alloc::{format, string::String};
use ark_bn254::{Fq, Fq2, Fr, G1Affine, G2Affine};
use ark_ec::AffineRepr;
use ark_ff::{PrimeField, Zero};
use num_bigint::BigUint;

/// Parses a field element written either as decimal digits (`^[0-9]+$`) or as
/// `0x`-prefixed hex (`^0x[0-9a-fA-F]+$`). Anything else yields `None`.
pub(crate) fn parse_field_element(text: &str) -> Option<FieldElement> {
    if let Some(digits) = text.strip_prefix(HEX_PREFIX) {
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        return BigUint::parse_bytes(digits.as_bytes(), 16);
    }

    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    BigUint::parse_bytes(text.as_bytes(), 10)
}

/// Big-endian representation of a field element as an EVM word, or `None` if it
/// does not fit in 256 bits.
pub(crate) fn into_be_bytes32(value: &FieldElement) -> Option<[u8; EVM_WORD_SIZE]> {
    let bytes = value.to_bytes_be();
    if bytes.len() > EVM_WORD_SIZE {
        return None;
    }
    let mut word = [0u8; EVM_WORD_SIZE];
    word[EVM_WORD_SIZE - bytes.len()..].copy_from_slice(&bytes);
    Some(word)
}

// Renders a value the way the prover library prints calldata words: `0x` followed
// by 64 zero-padded hex digits.
pub(crate) fn to_word_hex(value: &FieldElement) -> Option<String> {
    into_be_bytes32(value).map(|word| format!("{HEX_PREFIX}{}", hex::encode(word)))
}

// Reduces into the scalar field; `None` when the value is not a canonical member.
pub(crate) fn read_fr(value: &FieldElement) -> Option<Fr> {
    if *value >= BigUint::from(Fr::MODULUS) {
        return None;
    }
    Some(Fr::from(value.clone()))
}

pub(crate) fn read_fq(value: &FieldElement) -> Result<Fq, GroupError> {
    let modulus = BigUint::from(Fq::MODULUS);
    if *value >= modulus {
        return Err(GroupError::CoordinateExceedsModulus {
            coordinate_value: value.clone(),
            modulus,
        });
    }
    Ok(Fq::from(value.clone()))
}

// Parse point in G1.
pub(crate) fn read_g1(x: &FieldElement, y: &FieldElement) -> Result<G1Affine, GroupError> {
    let x = read_fq(x)?;
    let y = read_fq(y)?;

    // (0, 0) is the point at infinity, as in the EVM precompiles.
    if x.is_zero() && y.is_zero() {
        return Ok(G1Affine::zero());
    }

    let point = G1Affine::new_unchecked(x, y);
    if !point.is_on_curve() {
        return Err(GroupError::NotOnCurve);
    }
    // This is always true for G1 with the BN254 curve.
    debug_assert!(point.is_in_correct_subgroup_assuming_on_curve());

    Ok(point)
}

// Parse point in G2. Coordinates are given real part first.
pub(crate) fn read_g2(
    x_c0: &FieldElement,
    x_c1: &FieldElement,
    y_c0: &FieldElement,
    y_c1: &FieldElement,
) -> Result<G2Affine, GroupError> {
    let x = Fq2::new(read_fq(x_c0)?, read_fq(x_c1)?);
    let y = Fq2::new(read_fq(y_c0)?, read_fq(y_c1)?);

    if x.is_zero() && y.is_zero() {
        return Ok(G2Affine::zero());
    }

    let point = G2Affine::new_unchecked(x, y);
    if !point.is_on_curve() {
        return Err(GroupError::NotOnCurve);
    }
    if !point.is_in_correct_subgroup_assuming_on_curve() {
        return Err(GroupError::NotInSubgroup);
    }

    Ok(point)
}
