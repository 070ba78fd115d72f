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

use alloc::{format, string::String, string::ToString, vec, vec::Vec};
use num_traits::Zero;
use serde_json::Value;
use tracing::debug;

use crate::{
    calldata::tokenize,
    constants::{GROTH16_PROOF_TOKENS, WORD_SEPARATOR},
    errors::{CalldataError, ProofFormatError},
    normalize::ProofValue,
    utils::to_word_hex,
    FieldElement, Scheme, SchemeEncoder,
};

/// A Groth16 proof as emitted by the prover, projective coordinates dropped.
///
/// `pi_b` keeps the prover's order, real part first: `[[x_c0, x_c1], [y_c0, y_c1]]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Groth16Proof {
    pub pi_a: [FieldElement; 2],
    pub pi_b: [[FieldElement; 2]; 2],
    pub pi_c: [FieldElement; 2],
}

// Reads the first two integers of a sequence; trailing projective coordinates are ignored.
fn read_pair(
    value: Option<&ProofValue>,
    field: &'static str,
) -> Result<[FieldElement; 2], ProofFormatError> {
    let items = value
        .ok_or(ProofFormatError::MissingField { field })?
        .as_sequence()
        .filter(|items| items.len() >= 2)
        .ok_or(ProofFormatError::InvalidShape { field, expected: 2 })?;

    let read = |position: usize| {
        items[position]
            .as_integer()
            .cloned()
            .ok_or(ProofFormatError::NotAnInteger { field, position })
    };
    Ok([read(0)?, read(1)?])
}

impl TryFrom<&ProofValue> for Groth16Proof {
    type Error = ProofFormatError;

    fn try_from(proof: &ProofValue) -> Result<Self, Self::Error> {
        let pi_a = read_pair(proof.get("pi_a"), "pi_a")?;

        let rows = proof
            .get("pi_b")
            .ok_or(ProofFormatError::MissingField { field: "pi_b" })?
            .as_sequence()
            .filter(|rows| rows.len() >= 2)
            .ok_or(ProofFormatError::InvalidShape {
                field: "pi_b",
                expected: 2,
            })?;
        let pi_b = [
            read_pair(Some(&rows[0]), "pi_b")?,
            read_pair(Some(&rows[1]), "pi_b")?,
        ];

        let pi_c = read_pair(proof.get("pi_c"), "pi_c")?;

        Ok(Groth16Proof { pi_a, pi_b, pi_c })
    }
}

impl Groth16Proof {
    /// Renders the proof and its public signals the way the prover library exports
    /// solidity calldata: `[a],[[b0],[b1]],[c],[input]` with quoted 32-byte hex words.
    ///
    /// Each `pi_b` row is written imaginary part first, the order expected by the
    /// pairing precompile.
    pub fn to_solidity_calldata(
        &self,
        public_signals: &[FieldElement],
    ) -> Result<String, CalldataError> {
        let [[x_c0, x_c1], [y_c0, y_c1]] = &self.pi_b;
        let ordered = [
            &self.pi_a[0],
            &self.pi_a[1],
            x_c1,
            x_c0,
            y_c1,
            y_c0,
            &self.pi_c[0],
            &self.pi_c[1],
        ];

        let words = ordered
            .into_iter()
            .chain(public_signals)
            .enumerate()
            .map(|(position, value)| {
                to_word_hex(value)
                    .map(|word| format!("\"{word}\""))
                    .ok_or(CalldataError::WordOverflow { position })
            })
            .collect::<Result<Vec<String>, _>>()?;

        let (proof_words, input_words) = words.split_at(GROTH16_PROOF_TOKENS);
        Ok(format!(
            "[{}],[[{}],[{}]],[{}],[{}]",
            proof_words[0..2].join(WORD_SEPARATOR),
            proof_words[2..4].join(WORD_SEPARATOR),
            proof_words[4..6].join(WORD_SEPARATOR),
            proof_words[6..8].join(WORD_SEPARATOR),
            input_words.join(WORD_SEPARATOR),
        ))
    }
}

/// Arguments of a Groth16 verifier's `verifyProof(a, b, c, input)`.
///
/// `b` is in calldata order, imaginary part first within each row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Groth16Calldata {
    pub a: [FieldElement; 2],
    pub b: [[FieldElement; 2]; 2],
    pub c: [FieldElement; 2],
    pub input: Vec<FieldElement>,
}

impl Groth16Calldata {
    /// Partitions calldata tokens into the fixed `a`, `b`, `c` layout; everything past
    /// the eighth token is public input.
    pub fn from_tokens(mut tokens: Vec<FieldElement>) -> Result<Self, CalldataError> {
        let actual = tokens.len();
        if actual < GROTH16_PROOF_TOKENS {
            return Err(CalldataError::TooFewTokens {
                expected: GROTH16_PROOF_TOKENS,
                actual,
            });
        }

        let input = tokens.split_off(GROTH16_PROOF_TOKENS);
        let [a0, a1, b00, b01, b10, b11, c0, c1]: [FieldElement; GROTH16_PROOF_TOKENS] = tokens
            .try_into()
            .map_err(|_| CalldataError::TooFewTokens {
                expected: GROTH16_PROOF_TOKENS,
                actual,
            })?;

        Ok(Groth16Calldata {
            a: [a0, a1],
            b: [[b00, b01], [b10, b11]],
            c: [c0, c1],
            input,
        })
    }

    /// Builds the argument list straight from a normalized proof. The result equals
    /// encoding the proof's exported calldata.
    pub fn from_proof(proof: &Groth16Proof, public_signals: &[FieldElement]) -> Self {
        let [[x_c0, x_c1], [y_c0, y_c1]] = proof.pi_b.clone();
        Groth16Calldata {
            a: proof.pi_a.clone(),
            b: [[x_c1, x_c0], [y_c1, y_c0]],
            c: proof.pi_c.clone(),
            input: public_signals.to_vec(),
        }
    }

    /// The argument list with every field element as a decimal string.
    pub fn to_json(&self) -> Value {
        let strings = |values: &[FieldElement]| {
            Value::Array(values.iter().map(|v| Value::String(v.to_string())).collect())
        };
        Value::Array(vec![
            strings(&self.a[..]),
            Value::Array(self.b.iter().map(|row| strings(&row[..])).collect()),
            strings(&self.c[..]),
            strings(&self.input[..]),
        ])
    }
}

/// Encoder for verifiers exposing `verifyProof(a, b, c, input)`.
pub struct Groth16Encoder;

impl SchemeEncoder for Groth16Encoder {
    const SCHEME: Scheme = Scheme::Groth16;

    type Arguments = Groth16Calldata;

    fn encode(calldata: &str) -> Result<Groth16Calldata, CalldataError> {
        let arguments = Groth16Calldata::from_tokens(tokenize(calldata)?)?;
        debug!(
            a = ?arguments.a,
            b = ?arguments.b,
            c = ?arguments.c,
            input = ?arguments.input,
            "encoded groth16 calldata"
        );
        Ok(arguments)
    }

    fn degenerate() -> Groth16Calldata {
        let zero = FieldElement::zero;
        Groth16Calldata {
            a: [zero(), zero()],
            b: [[zero(), zero()], [zero(), zero()]],
            c: [zero(), zero()],
            input: vec![zero()],
        }
    }

    fn public_inputs(arguments: &Groth16Calldata) -> &[FieldElement] {
        &arguments.input
    }
}
