// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Probability to label decision

use crate::{
    error::SentimentPredictorResult,
    types::{Probability, SentimentPrediction},
};

/// Threshold a raw score into a prediction
///
/// The score is passed through unchanged. Positive at or above
/// [`DECISION_THRESHOLD`](crate::types::DECISION_THRESHOLD).
///
/// # Errors
///
/// Returns [`ScoreOutOfRange`](crate::SentimentPredictorError::ScoreOutOfRange)
/// for NaN or values outside `[0, 1]`; they are never clamped.
pub fn decide(score: f64) -> SentimentPredictorResult<SentimentPrediction> {
    let probability = Probability::new(score)?;
    Ok(SentimentPrediction::from_probability(probability))
}
