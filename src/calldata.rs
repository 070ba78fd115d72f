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

//! Tokenizer for the calldata strings exported by the prover library.

use alloc::{string::String, string::ToString, vec::Vec};

use crate::{errors::CalldataError, utils::parse_field_element, FieldElement};

fn is_decoration(c: char) -> bool {
    matches!(c, '[' | ']' | '"') || c.is_whitespace()
}

/// Strips brackets, quotes and whitespace from `calldata`, splits it on `,` and
/// parses each token as a field element.
///
/// Every token must be non-empty and written as decimal digits or `0x` hex. Token
/// order is the order of appearance.
pub fn tokenize(calldata: &str) -> Result<Vec<FieldElement>, CalldataError> {
    let stripped: String = calldata.chars().filter(|c| !is_decoration(*c)).collect();

    stripped
        .split(',')
        .enumerate()
        .map(|(position, token)| {
            if token.is_empty() {
                return Err(CalldataError::EmptyToken { position });
            }
            parse_field_element(token).ok_or_else(|| CalldataError::InvalidToken {
                position,
                token: token.to_string(),
            })
        })
        .collect()
}

/// Splits `calldata` on the commas that sit outside any bracket and outside
/// double quotes. Segments are returned untrimmed.
pub fn split_top_level(calldata: &str) -> Result<Vec<&str>, CalldataError> {
    let mut segments = Vec::new();
    let mut depth = 0usize;
    let mut quoted = false;
    let mut start = 0;

    for (offset, c) in calldata.char_indices() {
        match c {
            '"' => quoted = !quoted,
            '[' if !quoted => depth += 1,
            ']' if !quoted => {
                depth = depth
                    .checked_sub(1)
                    .ok_or(CalldataError::UnbalancedBrackets { offset })?;
            }
            ',' if !quoted && depth == 0 => {
                segments.push(&calldata[start..offset]);
                start = offset + 1;
            }
            _ => {}
        }
    }

    if quoted {
        return Err(CalldataError::UnterminatedQuote);
    }
    if depth != 0 {
        return Err(CalldataError::UnbalancedBrackets {
            offset: calldata.len(),
        });
    }
    segments.push(&calldata[start..]);

    Ok(segments)
}
