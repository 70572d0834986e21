// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Type-safe domain models for sentiment prediction
//!
//! This module provides strongly-typed wrappers that encode the pipeline's
//! invariants in the type system: probabilities are always within `[0, 1]`
//! and model inputs always have exactly [`MAX_LEN`] token ids.

use std::{fmt, time::Duration};

use serde::{Deserialize, Serialize};

use crate::error::{SentimentPredictorError, SentimentPredictorResult};

/// Length every token sequence is shaped to before scoring.
///
/// The vocabulary and model artifacts are built for this length; callers that
/// need the value should use this constant rather than a copy of it.
pub const MAX_LEN: usize = 200;

/// Token id reserved for padding ("no token")
pub const PAD_ID: TokenId = 0;

/// Probability at or above which a review is labelled positive
pub const DECISION_THRESHOLD: f64 = 0.5;

/// Integer id standing in for a word
pub type TokenId = u32;

/// Variable-length token ids produced by the encoder
pub type TokenSequence = Vec<TokenId>;

/// Token ids of exactly the length the scorer was built for
///
/// Only the sequence shaper constructs values of this type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FixedSequence(Vec<TokenId>);

impl FixedSequence {
    pub(crate) fn from_shaped(ids: Vec<TokenId>) -> Self {
        Self(ids)
    }

    /// Number of ids, always equal to the `max_len` used to shape it
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the sequence holds no ids (only for `max_len == 0`)
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrow the ids
    pub fn as_slice(&self) -> &[TokenId] {
        &self.0
    }

    /// Number of non-padding ids
    pub fn token_count(&self) -> usize {
        self.0.iter().filter(|&&id| id != PAD_ID).count()
    }
}

/// Binary sentiment label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    /// Review expresses positive sentiment
    Positive,
    /// Review expresses negative sentiment
    Negative,
}

impl SentimentLabel {
    /// Label for a probability, using the fixed [`DECISION_THRESHOLD`]
    pub fn from_probability(probability: Probability) -> Self {
        if probability.as_f64() >= DECISION_THRESHOLD {
            SentimentLabel::Positive
        } else {
            SentimentLabel::Negative
        }
    }

    /// Convert to boolean (positive = true)
    pub fn is_positive(&self) -> bool {
        matches!(self, SentimentLabel::Positive)
    }

    /// Get human-readable message
    pub fn message(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "Positive review",
            SentimentLabel::Negative => "Negative review",
        }
    }

    /// Lowercase name, also used as a metrics label
    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "positive",
            SentimentLabel::Negative => "negative",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Probability with validation (0.0 to 1.0)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Probability(f64);

impl Probability {
    /// Create a new probability with validation
    ///
    /// # Errors
    ///
    /// Returns [`SentimentPredictorError::ScoreOutOfRange`] if the value is NaN
    /// or outside `[0, 1]`
    pub fn new(value: f64) -> SentimentPredictorResult<Self> {
        // NaN fails the range check as well
        if !(0.0..=1.0).contains(&value) {
            return Err(SentimentPredictorError::score_out_of_range(value));
        }

        Ok(Self(value))
    }

    /// Get the probability as f64
    pub fn as_f64(&self) -> f64 {
        self.0
    }

    /// Format to three decimal places for display
    pub fn display(&self) -> String {
        format!("{:.3}", self.0)
    }
}

impl fmt::Display for Probability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Prediction result: a label and the raw probability it was derived from
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SentimentPrediction {
    label: SentimentLabel,
    probability: Probability,
}

impl SentimentPrediction {
    /// Package a probability with the label the fixed threshold assigns it
    pub fn from_probability(probability: Probability) -> Self {
        Self {
            label: SentimentLabel::from_probability(probability),
            probability,
        }
    }

    /// Get the label
    pub fn label(&self) -> SentimentLabel {
        self.label
    }

    /// Get the probability, unchanged from the scorer
    pub fn probability(&self) -> Probability {
        self.probability
    }

    /// Check if result is positive
    pub fn is_positive(&self) -> bool {
        self.label.is_positive()
    }

    /// Get human-readable message
    pub fn message(&self) -> &'static str {
        self.label.message()
    }
}

/// Prediction plus the intermediate facts gathered along the pipeline
#[derive(Debug, Clone)]
pub struct SentimentAnalysis {
    prediction: SentimentPrediction,
    cleaned_text: String,
    token_count: usize,
    truncated: bool,
    processing_time: Duration,
}

impl SentimentAnalysis {
    /// Create a new analysis
    pub fn new(
        prediction: SentimentPrediction,
        cleaned_text: String,
        token_count: usize,
        truncated: bool,
        processing_time: Duration,
    ) -> Self {
        Self {
            prediction,
            cleaned_text,
            token_count,
            truncated,
            processing_time,
        }
    }

    /// Get the prediction
    pub fn prediction(&self) -> &SentimentPrediction {
        &self.prediction
    }

    /// Normalized text the encoder saw
    pub fn cleaned_text(&self) -> &str {
        &self.cleaned_text
    }

    /// Number of ids the encoder produced, before shaping
    pub fn token_count(&self) -> usize {
        self.token_count
    }

    /// Whether ids were cut off to fit [`MAX_LEN`]
    pub fn truncated(&self) -> bool {
        self.truncated
    }

    /// Get processing time
    pub fn processing_time(&self) -> Duration {
        self.processing_time
    }

    /// Unwrap into the bare prediction
    pub fn into_prediction(self) -> SentimentPrediction {
        self.prediction
    }
}
