// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Vocabulary loading and word-to-id encoding
//!
//! The vocabulary artifact is a word index produced alongside the trained
//! model. It decides how unknown words are treated: when it names an
//! out-of-vocabulary token, unknown words map to that token's id, otherwise
//! they are dropped. An optional `num_words` limit makes rarer words behave
//! as unknown too.

use std::{collections::HashMap, fmt, path::Path};

use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::{debug, info};

use crate::{
    artifact::ArtifactFormat,
    error::{SentimentPredictorError, SentimentPredictorResult},
    types::{PAD_ID, TokenId, TokenSequence},
};

/// Serialized form of the vocabulary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VocabularyArtifact {
    /// Word to id table, ids start at 1
    pub word_index: HashMap<String, TokenId>,
    /// Word whose id stands in for unknown words
    #[serde(default)]
    pub oov_token: Option<String>,
    /// Only ids below this bound are emitted as themselves
    #[serde(default)]
    pub num_words: Option<usize>,
}

/// How words missing from the vocabulary are encoded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "policy", content = "id")]
pub enum OovPolicy {
    /// Unknown words become this reserved id
    MapToUnknown(TokenId),
    /// Unknown words are silently skipped
    Drop,
}

impl fmt::Display for OovPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OovPolicy::MapToUnknown(id) => write!(f, "map to unknown id {id}"),
            OovPolicy::Drop => write!(f, "drop"),
        }
    }
}

/// Immutable word to token id table
#[derive(Debug, Clone)]
pub struct Vocabulary {
    word_index: HashMap<String, TokenId>,
    oov_policy: OovPolicy,
    num_words: Option<usize>,
}

impl Vocabulary {
    /// Build a vocabulary from a word index
    ///
    /// # Errors
    ///
    /// Returns a vocabulary error if the index is empty, uses the padding id,
    /// names an unknown-word token it does not contain, or sets `num_words`
    /// to zero
    pub fn new(
        word_index: HashMap<String, TokenId>,
        oov_token: Option<&str>,
        num_words: Option<usize>,
    ) -> SentimentPredictorResult<Self> {
        if word_index.is_empty() {
            return Err(SentimentPredictorError::vocabulary(
                "word index cannot be empty",
            ));
        }

        if let Some((word, _)) = word_index.iter().find(|(_, id)| **id == PAD_ID) {
            return Err(SentimentPredictorError::vocabulary(format!(
                "word '{word}' uses id {PAD_ID}, which is reserved for padding"
            )));
        }

        if num_words == Some(0) {
            return Err(SentimentPredictorError::vocabulary(
                "num_words must be greater than 0",
            ));
        }

        let oov_policy = match oov_token {
            Some(token) => {
                let id = word_index.get(token).copied().ok_or_else(|| {
                    SentimentPredictorError::vocabulary(format!(
                        "oov token '{token}' is missing from the word index"
                    ))
                })?;
                OovPolicy::MapToUnknown(id)
            }
            None => OovPolicy::Drop,
        };

        Ok(Self {
            word_index,
            oov_policy,
            num_words,
        })
    }

    /// Build a vocabulary from its deserialized artifact
    pub fn from_artifact(artifact: VocabularyArtifact) -> SentimentPredictorResult<Self> {
        Self::new(
            artifact.word_index,
            artifact.oov_token.as_deref(),
            artifact.num_words,
        )
    }

    /// Load a vocabulary from a JSON or YAML file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> SentimentPredictorResult<Self> {
        let path = path.as_ref();
        debug!("Loading vocabulary from: {}", path.display());

        let content = fs::read_to_string(path).await.map_err(|e| {
            SentimentPredictorError::io(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let artifact: VocabularyArtifact = ArtifactFormat::from_path(path).parse(&content, path)?;
        let vocabulary = Self::from_artifact(artifact)?;

        info!(
            "Loaded vocabulary with {} words ({} unknown words) from {}",
            vocabulary.len(),
            vocabulary.oov_policy,
            path.display()
        );

        Ok(vocabulary)
    }

    /// Encode cleaned text into token ids, preserving word order
    ///
    /// Splits on whitespace; empty text yields an empty sequence.
    pub fn encode(&self, cleaned: &str) -> TokenSequence {
        cleaned
            .split_whitespace()
            .filter_map(|word| self.lookup(word))
            .collect()
    }

    /// Id emitted for a single word, or `None` if it is dropped
    pub fn lookup(&self, word: &str) -> Option<TokenId> {
        match self.word_index.get(word) {
            Some(&id) if self.within_limit(id) => Some(id),
            _ => self.unknown_id(),
        }
    }

    fn within_limit(&self, id: TokenId) -> bool {
        self.num_words
            .is_none_or(|limit| usize::try_from(id).is_ok_and(|id| id < limit))
    }

    /// Id used for unknown words, if the vocabulary defines one
    pub fn unknown_id(&self) -> Option<TokenId> {
        match self.oov_policy {
            OovPolicy::MapToUnknown(id) => Some(id),
            OovPolicy::Drop => None,
        }
    }

    /// Unknown word convention carried by the artifact
    pub fn oov_policy(&self) -> OovPolicy {
        self.oov_policy
    }

    /// Largest id `encode` can produce
    pub fn max_emitted_id(&self) -> TokenId {
        let largest_known = self
            .word_index
            .values()
            .copied()
            .filter(|&id| self.within_limit(id))
            .max()
            .unwrap_or(PAD_ID);

        largest_known.max(self.unknown_id().unwrap_or(PAD_ID))
    }

    /// Number of words in the index
    pub fn len(&self) -> usize {
        self.word_index.len()
    }

    /// Whether the index is empty (never true for a constructed vocabulary)
    pub fn is_empty(&self) -> bool {
        self.word_index.is_empty()
    }

    /// Configured `num_words` limit
    pub fn num_words(&self) -> Option<usize> {
        self.num_words
    }
}
