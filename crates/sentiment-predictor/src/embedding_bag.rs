// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Averaged word-embedding classifier
//!
//! The shipped scoring backend. Each token id selects an embedding row; rows
//! are averaged into one vector, optionally passed through a ReLU hidden
//! layer, and reduced by a single output unit followed by a logistic sigmoid.
//!
//! Weight matrices are stored row-major with one row per output unit.

use std::path::Path;

use semver::Version;
use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::{debug, info};

use crate::{
    artifact::ArtifactFormat,
    error::{SentimentPredictorError, SentimentPredictorResult},
    scorer::{ScorerInfo, SentimentScorer},
    types::{FixedSequence, PAD_ID},
};

/// Name reported by [`ScorerInfo::backend`]
pub const BACKEND_NAME: &str = "embedding_bag";

/// Major artifact format version this backend reads
const SUPPORTED_MAJOR_VERSION: u64 = 1;

/// Fully connected layer with ReLU activation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DenseLayer {
    /// One row of input weights per unit
    pub weights: Vec<Vec<f32>>,
    /// One bias per unit
    pub bias: Vec<f32>,
}

/// Single sigmoid output unit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputUnit {
    /// Input weights
    pub weights: Vec<f32>,
    /// Bias
    pub bias: f32,
}

/// Serialized form of the model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingBagArtifact {
    /// Artifact format version
    pub format_version: Version,
    /// Sequence length the model was trained with
    pub input_length: usize,
    /// Width of each embedding row
    pub embedding_dim: usize,
    /// Exclude padding positions from the average
    #[serde(default)]
    pub mask_padding: bool,
    /// Embedding table indexed by token id
    pub embeddings: Vec<Vec<f32>>,
    /// Optional hidden layer between pooling and output
    #[serde(default)]
    pub hidden: Option<DenseLayer>,
    /// Output unit
    pub output: OutputUnit,
}

/// Loaded embedding-bag classifier
#[derive(Debug, Clone)]
pub struct EmbeddingBagModel {
    artifact: EmbeddingBagArtifact,
}

impl EmbeddingBagModel {
    /// Validate an artifact and wrap it as a scorer
    ///
    /// # Errors
    ///
    /// Returns a model error for an unsupported format version, inconsistent
    /// layer shapes, or non-finite weights
    pub fn new(artifact: EmbeddingBagArtifact) -> SentimentPredictorResult<Self> {
        Self::validate(&artifact)?;
        Ok(Self { artifact })
    }

    /// Load a model from a JSON or YAML file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> SentimentPredictorResult<Self> {
        let path = path.as_ref();
        debug!("Loading scoring model from: {}", path.display());

        let content = fs::read_to_string(path).await.map_err(|e| {
            SentimentPredictorError::io(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let artifact: EmbeddingBagArtifact =
            ArtifactFormat::from_path(path).parse(&content, path)?;
        let model = Self::new(artifact)?;

        info!(
            "Loaded {} model v{} with {} embeddings of width {} from {}",
            BACKEND_NAME,
            model.artifact.format_version,
            model.artifact.embeddings.len(),
            model.artifact.embedding_dim,
            path.display()
        );

        Ok(model)
    }

    fn validate(artifact: &EmbeddingBagArtifact) -> SentimentPredictorResult<()> {
        if artifact.format_version.major != SUPPORTED_MAJOR_VERSION {
            return Err(SentimentPredictorError::model(format!(
                "unsupported format version {} (expected {}.x.x)",
                artifact.format_version, SUPPORTED_MAJOR_VERSION
            )));
        }

        if artifact.input_length == 0 {
            return Err(SentimentPredictorError::model(
                "input_length must be greater than 0",
            ));
        }

        let dim = artifact.embedding_dim;
        if dim == 0 {
            return Err(SentimentPredictorError::model(
                "embedding_dim must be greater than 0",
            ));
        }

        if artifact.embeddings.is_empty() {
            return Err(SentimentPredictorError::model("embedding table is empty"));
        }

        if let Some((row, _)) = artifact
            .embeddings
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != dim)
        {
            return Err(SentimentPredictorError::model(format!(
                "embedding row {row} does not have {dim} values"
            )));
        }

        let output_inputs = match &artifact.hidden {
            Some(hidden) => {
                if hidden.weights.is_empty() {
                    return Err(SentimentPredictorError::model("hidden layer has no units"));
                }
                if hidden.weights.iter().any(|row| row.len() != dim) {
                    return Err(SentimentPredictorError::model(format!(
                        "hidden layer rows must have {dim} weights"
                    )));
                }
                if hidden.bias.len() != hidden.weights.len() {
                    return Err(SentimentPredictorError::model(format!(
                        "hidden layer has {} units but {} biases",
                        hidden.weights.len(),
                        hidden.bias.len()
                    )));
                }
                hidden.weights.len()
            }
            None => dim,
        };

        if artifact.output.weights.len() != output_inputs {
            return Err(SentimentPredictorError::model(format!(
                "output unit expects {} inputs but has {} weights",
                output_inputs,
                artifact.output.weights.len()
            )));
        }

        let hidden_values = artifact
            .hidden
            .iter()
            .flat_map(|h| h.weights.iter().flatten().chain(h.bias.iter()));
        let all_finite = artifact
            .embeddings
            .iter()
            .flatten()
            .chain(hidden_values)
            .chain(artifact.output.weights.iter())
            .chain(std::iter::once(&artifact.output.bias))
            .all(|v| v.is_finite());
        if !all_finite {
            return Err(SentimentPredictorError::model(
                "weights must be finite numbers",
            ));
        }

        Ok(())
    }

    /// Average the embedding rows selected by `ids`
    fn pool(&self, ids: &[u32]) -> Vec<f32> {
        let dim = self.artifact.embedding_dim;
        let mut pooled = vec![0.0_f32; dim];
        let mut count = 0_usize;

        for &id in ids {
            if self.artifact.mask_padding && id == PAD_ID {
                continue;
            }
            count += 1;
            // ids without a row contribute a zero vector
            if let Some(row) = self.artifact.embeddings.get(id as usize) {
                for (acc, value) in pooled.iter_mut().zip(row) {
                    *acc += value;
                }
            }
        }

        if count > 0 {
            #[allow(clippy::cast_precision_loss)]
            let divisor = count as f32;
            for value in &mut pooled {
                *value /= divisor;
            }
        }

        pooled
    }

    fn forward(&self, ids: &[u32]) -> f64 {
        let pooled = self.pool(ids);

        let features = match &self.artifact.hidden {
            Some(hidden) => hidden
                .weights
                .iter()
                .zip(&hidden.bias)
                .map(|(row, bias)| (dot(row, &pooled) + bias).max(0.0))
                .collect(),
            None => pooled,
        };

        let logit = f64::from(dot(&self.artifact.output.weights, &features))
            + f64::from(self.artifact.output.bias);
        sigmoid(logit)
    }
}

fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

impl SentimentScorer for EmbeddingBagModel {
    fn score(&self, input: &FixedSequence) -> f64 {
        self.forward(input.as_slice())
    }

    fn info(&self) -> ScorerInfo {
        ScorerInfo {
            backend: BACKEND_NAME.to_string(),
            version: Some(self.artifact.format_version.to_string()),
            input_length: self.artifact.input_length,
            token_capacity: Some(self.artifact.embeddings.len()),
        }
    }
}
