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
    calldata::{split_top_level, tokenize},
    constants::{PLONK_CALLDATA_SEGMENTS, WORD_SEPARATOR},
    errors::CalldataError,
    utils::to_word_hex,
    FieldElement, Scheme, SchemeEncoder,
};

/// The proof argument of a PLONK verifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlonkProof {
    /// The prover's proof segment, passed through verbatim.
    Blob(String),
    /// A bare scalar in place of a proof, as in the all-zero test vector.
    Scalar(FieldElement),
}

impl PlonkProof {
    pub fn as_blob(&self) -> Option<&str> {
        match self {
            PlonkProof::Blob(blob) => Some(blob),
            PlonkProof::Scalar(_) => None,
        }
    }
}

/// Arguments of a PLONK verifier's `verifyProof(proof, input)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlonkCalldata {
    pub proof: PlonkProof,
    pub input: Vec<FieldElement>,
}

impl PlonkCalldata {
    /// The argument list with public inputs as decimal strings.
    pub fn to_json(&self) -> Value {
        let proof = match &self.proof {
            PlonkProof::Blob(blob) => Value::String(blob.clone()),
            PlonkProof::Scalar(value) => Value::String(value.to_string()),
        };
        let input = self
            .input
            .iter()
            .map(|value| Value::String(value.to_string()))
            .collect();
        Value::Array(vec![proof, Value::Array(input)])
    }
}

/// Renders a PLONK proof blob and its public signals the way the prover library
/// exports solidity calldata: `<blob>,["0x..", ...]`.
pub fn to_solidity_calldata(
    proof_blob: &str,
    public_signals: &[FieldElement],
) -> Result<String, CalldataError> {
    let words = public_signals
        .iter()
        .enumerate()
        .map(|(position, value)| {
            to_word_hex(value)
                .map(|word| format!("\"{word}\""))
                .ok_or(CalldataError::WordOverflow { position })
        })
        .collect::<Result<Vec<String>, _>>()?;

    Ok(format!("{proof_blob},[{}]", words.join(WORD_SEPARATOR)))
}

/// Encoder for verifiers exposing `verifyProof(proof, input)`.
pub struct PlonkEncoder;

impl SchemeEncoder for PlonkEncoder {
    const SCHEME: Scheme = Scheme::Plonk;

    type Arguments = PlonkCalldata;

    /// Splits the export at its single top-level comma. The proof segment is kept
    /// as an opaque blob; only the input segment is tokenized.
    fn encode(calldata: &str) -> Result<PlonkCalldata, CalldataError> {
        let segments = split_top_level(calldata)?;
        let [proof_segment, input_segment]: [&str; PLONK_CALLDATA_SEGMENTS] = segments
            .try_into()
            .map_err(|segments: Vec<&str>| CalldataError::SegmentCount {
                expected: PLONK_CALLDATA_SEGMENTS,
                actual: segments.len(),
            })?;

        let proof = proof_segment.trim();
        if proof.is_empty() {
            return Err(CalldataError::EmptyProofSegment);
        }
        let input = tokenize(input_segment)?;

        debug!(proof, input = ?input, "encoded plonk calldata");
        Ok(PlonkCalldata {
            proof: PlonkProof::Blob(proof.to_string()),
            input,
        })
    }

    fn degenerate() -> PlonkCalldata {
        PlonkCalldata {
            proof: PlonkProof::Scalar(FieldElement::zero()),
            input: vec![FieldElement::zero()],
        }
    }

    fn public_inputs(arguments: &PlonkCalldata) -> &[FieldElement] {
        &arguments.input
    }
}
