// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Main sentiment prediction orchestrator
//!
//! This module provides the core `SentimentPredictor` struct that runs raw
//! review text through normalization, encoding, shaping, scoring and the
//! decision threshold.

use std::{fmt, sync::Arc, time::Instant};

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument};

use crate::{
    config::SentimentPredictorConfig,
    decision::decide,
    error::{SentimentPredictorError, SentimentPredictorResult},
    normalizer::normalize,
    scorer::{ScorerInfo, SentimentScorer},
    sequence::shape,
    types::{MAX_LEN, SentimentAnalysis, SentimentPrediction},
    vocabulary::{OovPolicy, Vocabulary},
};

/// Main sentiment prediction orchestrator
///
/// Holds the vocabulary and scoring function behind `Arc`s; both are
/// immutable after construction, so clones share them without locking.
#[derive(Clone)]
pub struct SentimentPredictor {
    vocabulary: Arc<Vocabulary>,
    scorer: Arc<dyn SentimentScorer>,
    scorer_info: ScorerInfo,
}

impl fmt::Debug for SentimentPredictor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SentimentPredictor")
            .field("vocabulary_size", &self.vocabulary.len())
            .field("oov_policy", &self.vocabulary.oov_policy())
            .field("scorer", &self.scorer_info)
            .finish()
    }
}

impl SentimentPredictor {
    /// Create a new sentiment predictor from loaded artifacts
    #[instrument(skip(config), fields(
        vocabulary = %config.vocabulary_path.display(),
        model = %config.model_path.display()
    ))]
    pub fn new(config: SentimentPredictorConfig) -> SentimentPredictorResult<Self> {
        info!("Initializing SentimentPredictor");
        let predictor = Self::with_components(config.vocabulary, config.scorer)?;

        let summary = predictor.summary();
        info!(
            "SentimentPredictor initialized with {} words and {} backend",
            summary.vocabulary_size, summary.model_backend
        );

        Ok(predictor)
    }

    /// Create a predictor from an already built vocabulary and scorer
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the scorer was built for a different
    /// sequence length than [`MAX_LEN`], or if the vocabulary can emit ids the
    /// scorer has no parameters for
    pub fn with_components(
        vocabulary: Arc<Vocabulary>,
        scorer: Arc<dyn SentimentScorer>,
    ) -> SentimentPredictorResult<Self> {
        let scorer_info = scorer.info();

        if scorer_info.input_length != MAX_LEN {
            return Err(SentimentPredictorError::config(format!(
                "{} model expects sequences of length {}, pipeline shapes to {}",
                scorer_info.backend, scorer_info.input_length, MAX_LEN
            )));
        }

        let max_id = vocabulary.max_emitted_id();
        if !scorer_info.covers(max_id) {
            return Err(SentimentPredictorError::config(format!(
                "vocabulary emits ids up to {} but the {} model only covers {:?}",
                max_id, scorer_info.backend, scorer_info.token_capacity
            )));
        }

        Ok(Self {
            vocabulary,
            scorer,
            scorer_info,
        })
    }

    /// Predict the sentiment of raw review text
    ///
    /// Total for any string: empty or garbage text still shapes to an
    /// all-padding sequence and receives a score.
    ///
    /// # Errors
    ///
    /// Returns [`SentimentPredictorError::ScoreOutOfRange`] only if the
    /// scoring backend violates its `[0, 1]` contract
    pub fn predict(&self, raw_text: &str) -> SentimentPredictorResult<SentimentPrediction> {
        self.analyze(raw_text).map(SentimentAnalysis::into_prediction)
    }

    /// Run the pipeline and keep the intermediate facts
    #[instrument(skip(self, raw_text), fields(text_len = raw_text.len()))]
    pub fn analyze(&self, raw_text: &str) -> SentimentPredictorResult<SentimentAnalysis> {
        let start_time = Instant::now();

        let cleaned = normalize(raw_text);
        let ids = self.vocabulary.encode(&cleaned);
        let token_count = ids.len();
        let truncated = token_count > MAX_LEN;
        let shaped = shape(&ids, MAX_LEN);

        debug!(
            token_count,
            truncated, "Encoded review into {} ids", token_count
        );

        let score = self.scorer.score(&shaped);
        let prediction = decide(score).inspect_err(|_| {
            error!(
                score,
                backend = %self.scorer_info.backend,
                "Scoring function returned a value outside [0, 1]"
            );
        })?;

        let processing_time = start_time.elapsed();
        debug!(
            label = %prediction.label(),
            probability = prediction.probability().as_f64(),
            duration_us = processing_time.as_micros(),
            "Sentiment prediction completed"
        );

        Ok(SentimentAnalysis::new(
            prediction,
            cleaned,
            token_count,
            truncated,
            processing_time,
        ))
    }

    /// Predict a batch of reviews, preserving order
    ///
    /// # Errors
    ///
    /// Fails on the first integration fault
    #[instrument(skip(self, texts), fields(batch_size = texts.len()))]
    pub fn predict_batch<S: AsRef<str>>(
        &self,
        texts: &[S],
    ) -> SentimentPredictorResult<Vec<SentimentAnalysis>> {
        let start_time = Instant::now();

        let results = texts
            .iter()
            .map(|text| self.analyze(text.as_ref()))
            .collect::<SentimentPredictorResult<Vec<_>>>()?;

        let positive = results
            .iter()
            .filter(|analysis| analysis.prediction().is_positive())
            .count();
        info!(
            batch_size = results.len(),
            positive,
            duration_ms = start_time.elapsed().as_millis(),
            "Batch sentiment prediction completed"
        );

        Ok(results)
    }

    /// Describe the loaded artifacts
    pub fn summary(&self) -> PredictorSummary {
        PredictorSummary {
            vocabulary_size: self.vocabulary.len(),
            oov_policy: self.vocabulary.oov_policy(),
            max_len: MAX_LEN,
            model_backend: self.scorer_info.backend.clone(),
            model_version: self.scorer_info.version.clone(),
        }
    }

    /// Get the vocabulary
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }
}

/// Loaded state summary for health checks and logs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictorSummary {
    /// Words in the vocabulary
    pub vocabulary_size: usize,
    /// Unknown word convention
    pub oov_policy: OovPolicy,
    /// Sequence length inputs are shaped to
    pub max_len: usize,
    /// Scoring backend name
    pub model_backend: String,
    /// Scoring artifact format version
    pub model_version: Option<String>,
}
