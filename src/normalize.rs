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

//! Canonicalization of prover output.
//!
//! Proving libraries hand out proofs and public signals as JSON in which field
//! elements are decimal or `0x` hex strings. [`normalize`] rewrites every such
//! string into an arbitrary-precision integer and leaves everything else alone.

use alloc::{collections::BTreeMap, string::String, string::ToString, vec::Vec};
use serde_json::{Map, Number, Value};

use crate::{errors::ProofFormatError, utils::parse_field_element, FieldElement};

/// JSON-like proof data whose numeric strings may have been replaced by integers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProofValue {
    Null,
    Bool(bool),
    /// A value that was already numeric in the source document.
    Number(Number),
    Text(String),
    Integer(FieldElement),
    Sequence(Vec<ProofValue>),
    Mapping(BTreeMap<String, ProofValue>),
}

/// Converts raw prover output into a [`ProofValue`], turning every decimal or
/// `0x` hex string into an [`ProofValue::Integer`].
pub fn normalize(value: &Value) -> ProofValue {
    ProofValue::from(value).normalize()
}

impl ProofValue {
    /// Replaces every numeric text scalar with its integer value. Shape, sequence
    /// order and mapping keys are preserved.
    pub fn normalize(self) -> ProofValue {
        match self {
            ProofValue::Text(text) => match parse_field_element(&text) {
                Some(value) => ProofValue::Integer(value),
                None => ProofValue::Text(text),
            },
            ProofValue::Sequence(items) => {
                ProofValue::Sequence(items.into_iter().map(ProofValue::normalize).collect())
            }
            ProofValue::Mapping(entries) => ProofValue::Mapping(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, value.normalize()))
                    .collect(),
            ),
            other => other,
        }
    }

    /// Inverse direction: integers are written back as decimal strings.
    pub fn to_json(&self) -> Value {
        match self {
            ProofValue::Null => Value::Null,
            ProofValue::Bool(flag) => Value::Bool(*flag),
            ProofValue::Number(number) => Value::Number(number.clone()),
            ProofValue::Text(text) => Value::String(text.clone()),
            ProofValue::Integer(value) => Value::String(value.to_string()),
            ProofValue::Sequence(items) => {
                Value::Array(items.iter().map(ProofValue::to_json).collect())
            }
            ProofValue::Mapping(entries) => Value::Object(
                entries
                    .iter()
                    .map(|(key, value)| (key.clone(), value.to_json()))
                    .collect::<Map<String, Value>>(),
            ),
        }
    }

    pub fn get(&self, key: &str) -> Option<&ProofValue> {
        match self {
            ProofValue::Mapping(entries) => entries.get(key),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<&FieldElement> {
        match self {
            ProofValue::Integer(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[ProofValue]> {
        match self {
            ProofValue::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Reads a sequence of integers, e.g. the public signals of a proof.
    /// `field` names the value in the returned error.
    pub fn field_elements(
        &self,
        field: &'static str,
    ) -> Result<Vec<FieldElement>, ProofFormatError> {
        let items = self
            .as_sequence()
            .ok_or(ProofFormatError::InvalidShape { field, expected: 0 })?;

        items
            .iter()
            .enumerate()
            .map(|(position, item)| {
                item.as_integer()
                    .cloned()
                    .ok_or(ProofFormatError::NotAnInteger { field, position })
            })
            .collect()
    }
}

impl From<&Value> for ProofValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => ProofValue::Null,
            Value::Bool(flag) => ProofValue::Bool(*flag),
            Value::Number(number) => ProofValue::Number(number.clone()),
            Value::String(text) => ProofValue::Text(text.clone()),
            Value::Array(items) => {
                ProofValue::Sequence(items.iter().map(ProofValue::from).collect())
            }
            Value::Object(entries) => ProofValue::Mapping(
                entries
                    .iter()
                    .map(|(key, value)| (key.clone(), ProofValue::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<FieldElement> for ProofValue {
    fn from(value: FieldElement) -> Self {
        ProofValue::Integer(value)
    }
}

impl From<Vec<FieldElement>> for ProofValue {
    fn from(values: Vec<FieldElement>) -> Self {
        ProofValue::Sequence(values.into_iter().map(ProofValue::Integer).collect())
    }
}
