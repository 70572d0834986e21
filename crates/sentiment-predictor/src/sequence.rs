// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Fixed-length shaping of token sequences

use crate::types::{FixedSequence, PAD_ID, TokenId};

/// Pad or truncate `ids` to exactly `max_len` elements
///
/// Both operations happen at the end of the sequence: excess ids are cut from
/// the tail and [`PAD_ID`] is appended after the existing ids.
pub fn shape(ids: &[TokenId], max_len: usize) -> FixedSequence {
    let mut shaped = Vec::with_capacity(max_len);
    shaped.extend(ids.iter().take(max_len).copied());
    shaped.resize(max_len, PAD_ID);
    FixedSequence::from_shaped(shaped)
}
