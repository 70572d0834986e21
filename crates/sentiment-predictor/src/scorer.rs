// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Scoring function abstraction
//!
//! The trained classifier is consumed as an opaque function from a
//! fixed-length token sequence to the probability that the review is
//! positive. Backends implement [`SentimentScorer`]; the predictor only ever
//! talks to the trait.

use serde::{Deserialize, Serialize};

use crate::types::{FixedSequence, TokenId};

/// Trained classifier mapping a shaped token sequence to a probability
///
/// Implementations must be pure given their loaded weights: the same input
/// always yields the same output. The result is expected within `[0, 1]`;
/// the predictor rejects anything else as an integration fault.
#[cfg_attr(test, mockall::automock)]
pub trait SentimentScorer: Send + Sync {
    /// Probability that the review is positive
    fn score(&self, input: &FixedSequence) -> f64;

    /// Static description of the backend and the inputs it accepts
    fn info(&self) -> ScorerInfo;
}

/// Description of a scoring backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScorerInfo {
    /// Backend name
    pub backend: String,
    /// Artifact format version, if the backend has one
    pub version: Option<String>,
    /// Sequence length the model was trained with
    pub input_length: usize,
    /// Ids must be below this bound to have learned parameters
    pub token_capacity: Option<usize>,
}

impl ScorerInfo {
    /// Whether the backend has parameters for `id`
    pub fn covers(&self, id: TokenId) -> bool {
        self.token_capacity
            .is_none_or(|capacity| usize::try_from(id).is_ok_and(|id| id < capacity))
    }
}
