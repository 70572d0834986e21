// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Product review sentiment prediction
//!
//! This crate turns free-text product reviews into a binary sentiment label
//! and the probability behind it. The pipeline is a composition of small pure
//! stages over two pieces of load-once state, a vocabulary and a trained
//! scoring function:
//!
//! ```text
//! raw text -> normalize -> encode -> shape(MAX_LEN) -> score -> decide
//! ```
//!
//! # Architecture
//!
//! - [`normalizer`]: lowercase, markup removal, letters-only cleanup
//! - [`vocabulary`]: word to id table with the artifact's unknown-word convention
//! - [`sequence`]: post padding and post truncation to [`MAX_LEN`]
//! - [`scorer`]: the [`SentimentScorer`] trait the classifier is consumed through
//! - [`embedding_bag`]: the bundled scoring backend
//! - [`decision`]: the fixed 0.5 threshold
//! - [`predictor`]: orchestration of the stages
//! - [`config`]: artifact loading and validation
//! - [`error`]: error types
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use sentiment_predictor::{SentimentPredictor, SentimentPredictorConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = SentimentPredictorConfig::from_files(
//!     "artifacts/tokenizer.json",
//!     "artifacts/sentiment_model.json",
//! )
//! .await?;
//!
//! let predictor = SentimentPredictor::new(config)?;
//!
//! let prediction = predictor.predict("This was an AMAZING product!!! Highly recommend.")?;
//! println!(
//!     "{} ({})",
//!     prediction.message(),
//!     prediction.probability().display()
//! );
//! # Ok(())
//! # }
//! ```

pub mod artifact;
pub mod config;
pub mod decision;
pub mod embedding_bag;
pub mod error;
pub mod normalizer;
pub mod predictor;
pub mod scorer;
pub mod sequence;
pub mod types;
pub mod vocabulary;

// Re-export main types for convenience
pub use config::{ConfigSummary, SentimentPredictorConfig};
pub use decision::decide;
pub use embedding_bag::EmbeddingBagModel;
pub use error::{ArtifactKind, SentimentPredictorError, SentimentPredictorResult};
pub use normalizer::{normalize, normalize_value};
pub use predictor::{PredictorSummary, SentimentPredictor};
pub use scorer::{ScorerInfo, SentimentScorer};
pub use sequence::shape;
pub use types::{
    DECISION_THRESHOLD, FixedSequence, MAX_LEN, PAD_ID, Probability, SentimentAnalysis,
    SentimentLabel, SentimentPrediction, TokenId, TokenSequence,
};
pub use vocabulary::{OovPolicy, Vocabulary, VocabularyArtifact};
