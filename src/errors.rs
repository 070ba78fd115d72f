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

use alloc::string::String;
use core::fmt;
use snafu::Snafu;

use crate::{utils::to_word_hex, FieldElement};

/// Malformed calldata as exported by the prover library.
///
/// These are encoding failures. A verifier rejecting a well-formed argument list
/// is reported as `false`, never through this type.
#[derive(Debug, PartialEq, Eq, Snafu)]
pub enum CalldataError {
    /// A token was empty once decoration characters were stripped.
    #[snafu(display("Empty calldata token at position {position}"))]
    EmptyToken { position: usize },
    /// A token is neither decimal digits nor `0x` hex.
    #[snafu(display("Calldata token at position {position} is not a field element: {token:?}"))]
    InvalidToken { position: usize, token: String },
    /// Not enough tokens to fill the fixed proof layout.
    #[snafu(display("Too few calldata tokens. Expected at least: {expected}; Got: {actual}"))]
    TooFewTokens { expected: usize, actual: usize },
    /// Wrong number of top-level comma separated segments.
    #[snafu(display("Unexpected number of calldata segments. Expected: {expected}; Got: {actual}"))]
    SegmentCount { expected: usize, actual: usize },
    #[snafu(display("Empty proof segment"))]
    EmptyProofSegment,
    #[snafu(display("Unbalanced brackets at byte offset {offset}"))]
    UnbalancedBrackets { offset: usize },
    #[snafu(display("Unterminated quote"))]
    UnterminatedQuote,
    /// A value cannot be written as a 256-bit calldata word.
    #[snafu(display("Value at position {position} does not fit in a 256-bit word"))]
    WordOverflow { position: usize },
}

/// Proof or public signal data without the shape the prover library produces.
#[derive(Debug, PartialEq, Eq, Snafu)]
pub enum ProofFormatError {
    #[snafu(display("Missing proof field \"{field}\""))]
    MissingField { field: &'static str },
    #[snafu(display("Proof field \"{field}\" is not a sequence of at least {expected} elements"))]
    InvalidShape { field: &'static str, expected: usize },
    #[snafu(display("Proof field \"{field}\" holds a non-integer value at position {position}"))]
    NotAnInteger { field: &'static str, position: usize },
}

/// The verification error type
#[derive(Debug, PartialEq, Snafu)]
pub enum VerifyError {
    /// Provided data has not the number of public inputs the key expects.
    #[snafu(display("Invalid public input count. Expected: {expected}; Got: {actual}"))]
    PublicInputCount { expected: usize, actual: usize },
    /// A public input is not a canonical scalar field element.
    #[snafu(display("Public input at position {position} is not below the scalar field modulus"))]
    InputOutsideScalarField { position: usize },
    /// The verification key has no `IC` points at all.
    #[snafu(display("Verification key has no constant term"))]
    MissingConstantTerm,
    /// Provided data has not a valid proof point.
    #[snafu(display("Invalid proof point \"{point}\". Cause: {group}"))]
    InvalidPoint { point: ProofPoint, group: GroupError },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProofPoint {
    A,
    B,
    C,
}

impl fmt::Display for ProofPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProofPoint::A => write!(f, "a"),
            ProofPoint::B => write!(f, "b"),
            ProofPoint::C => write!(f, "c"),
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum GroupError {
    NotOnCurve,
    NotInSubgroup,
    CoordinateExceedsModulus {
        coordinate_value: FieldElement,
        modulus: FieldElement,
    },
}

impl fmt::Display for GroupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupError::NotOnCurve => {
                write!(f, "Point not on curve")
            }
            GroupError::NotInSubgroup => {
                write!(f, "Point not in the correct subgroup")
            }
            GroupError::CoordinateExceedsModulus {
                coordinate_value,
                modulus,
            } => match to_word_hex(coordinate_value) {
                Some(word) => write!(
                    f,
                    "Coordinate value {word} exceeds base field modulus {modulus}"
                ),
                None => write!(
                    f,
                    "Coordinate value {coordinate_value} exceeds base field modulus {modulus}"
                ),
            },
        }
    }
}
