// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Raw review text cleanup
//!
//! Normalization reduces any input to lowercase ASCII words separated by
//! single spaces, the same form the vocabulary was built from.

use std::{fmt::Display, sync::LazyLock};

use regex::Regex;

// Compiled on first use
static MARKUP_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<.*?>").expect("markup regex is valid"));
static NON_LETTER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z]+").expect("non-letter regex is valid"));
static WHITESPACE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace regex is valid"));

/// Normalize raw review text
///
/// Lowercases, replaces every shortest `<...>` span with a space, replaces
/// each run of characters outside `a`-`z` with a space, then collapses
/// whitespace and trims. The result is empty when the input has no ASCII
/// letters.
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    let without_markup = MARKUP_REGEX.replace_all(&lowered, " ");
    let letters_only = NON_LETTER_REGEX.replace_all(&without_markup, " ");
    WHITESPACE_REGEX
        .replace_all(&letters_only, " ")
        .trim()
        .to_string()
}

/// Normalize any displayable value by stringifying it first
pub fn normalize_value<T: Display + ?Sized>(value: &T) -> String {
    normalize(&value.to_string())
}
