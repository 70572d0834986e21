// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Artifact configuration for sentiment prediction
//!
//! This module resolves the vocabulary and scoring model artifacts from
//! disk, validates them, and holds them as shared read-only state for the
//! lifetime of the process.

use std::{
    fmt,
    path::{Path, PathBuf},
    sync::Arc,
};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    embedding_bag::EmbeddingBagModel,
    error::{ArtifactKind, SentimentPredictorError, SentimentPredictorResult},
    scorer::SentimentScorer,
    vocabulary::{OovPolicy, Vocabulary},
};

/// Loaded artifacts plus the paths they came from
#[derive(Clone)]
pub struct SentimentPredictorConfig {
    /// Word to id table
    pub vocabulary: Arc<Vocabulary>,
    /// Trained scoring function
    pub scorer: Arc<dyn SentimentScorer>,
    /// Canonical vocabulary artifact path
    pub vocabulary_path: PathBuf,
    /// Canonical model artifact path
    pub model_path: PathBuf,
}

impl fmt::Debug for SentimentPredictorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SentimentPredictorConfig")
            .field("vocabulary_size", &self.vocabulary.len())
            .field("scorer", &self.scorer.info().backend)
            .field("vocabulary_path", &self.vocabulary_path)
            .field("model_path", &self.model_path)
            .finish()
    }
}

impl SentimentPredictorConfig {
    /// Create configuration from artifact file paths
    ///
    /// # Errors
    ///
    /// Returns [`SentimentPredictorError::ArtifactNotFound`] naming the
    /// artifact when a path does not resolve to a file, or
    /// [`SentimentPredictorError::ArtifactLoad`] naming the artifact when it
    /// cannot be read, parsed or validated
    pub async fn from_files<P1, P2>(
        vocabulary_path: P1,
        model_path: P2,
    ) -> SentimentPredictorResult<Self>
    where
        P1: AsRef<Path>,
        P2: AsRef<Path>,
    {
        // Validate file existence and canonicalize paths
        let vocabulary_path =
            Self::validate_and_canonicalize_path(vocabulary_path.as_ref(), ArtifactKind::Vocabulary)?;
        let model_path =
            Self::validate_and_canonicalize_path(model_path.as_ref(), ArtifactKind::ScoringModel)?;

        let vocabulary = Vocabulary::from_file(&vocabulary_path)
            .await
            .map_err(|e| {
                SentimentPredictorError::artifact_load(ArtifactKind::Vocabulary, &vocabulary_path, e)
            })?;
        let model = EmbeddingBagModel::from_file(&model_path)
            .await
            .map_err(|e| {
                SentimentPredictorError::artifact_load(ArtifactKind::ScoringModel, &model_path, e)
            })?;

        info!(
            vocabulary = %vocabulary_path.display(),
            model = %model_path.display(),
            "Loaded sentiment artifacts"
        );

        Ok(Self {
            vocabulary: Arc::new(vocabulary),
            scorer: Arc::new(model),
            vocabulary_path,
            model_path,
        })
    }

    /// Get configuration summary
    pub fn get_summary(&self) -> ConfigSummary {
        let info = self.scorer.info();
        ConfigSummary {
            vocabulary_size: self.vocabulary.len(),
            oov_policy: self.vocabulary.oov_policy(),
            model_backend: info.backend,
            model_version: info.version,
            vocabulary_path: self.vocabulary_path.display().to_string(),
            model_path: self.model_path.display().to_string(),
        }
    }

    /// Validate and canonicalize an artifact path
    fn validate_and_canonicalize_path(
        path: &Path,
        artifact: ArtifactKind,
    ) -> SentimentPredictorResult<PathBuf> {
        // Check if file exists
        if !path.exists() {
            debug!(
                "{} artifact missing at {} (current working directory: {})",
                artifact,
                path.display(),
                std::env::current_dir()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|_| "unknown".to_string())
            );
            return Err(SentimentPredictorError::artifact_not_found(artifact, path));
        }

        // Check if it's actually a file (not a directory)
        if !path.is_file() {
            return Err(SentimentPredictorError::artifact_not_found(artifact, path));
        }

        // Canonicalize the path to get absolute path and resolve symlinks
        path.canonicalize().map_err(|e| {
            SentimentPredictorError::config(format!(
                "Failed to canonicalize {} path {}: {}",
                artifact,
                path.display(),
                e
            ))
        })
    }
}

/// Configuration summary for monitoring and debugging
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigSummary {
    /// Words in the vocabulary
    pub vocabulary_size: usize,
    /// Unknown word convention
    pub oov_policy: OovPolicy,
    /// Scoring backend name
    pub model_backend: String,
    /// Scoring artifact format version
    pub model_version: Option<String>,
    /// Vocabulary artifact path
    pub vocabulary_path: String,
    /// Model artifact path
    pub model_path: String,
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;
    use tokio::fs::write;

    use super::*;

    async fn create_test_artifacts() -> (TempDir, PathBuf, PathBuf) {
        let temp_dir = TempDir::new().unwrap();
        let vocabulary_path = temp_dir.path().join("tokenizer.json");
        let model_path = temp_dir.path().join("sentiment_model.json");

        write(
            &vocabulary_path,
            r#"{"word_index": {"<OOV>": 1, "good": 2, "bad": 3}, "oov_token": "<OOV>"}"#,
        )
        .await
        .unwrap();

        write(
            &model_path,
            r#"{
    "format_version": "1.0.0",
    "input_length": 200,
    "embedding_dim": 1,
    "mask_padding": true,
    "embeddings": [[0.0], [0.0], [1.0], [-1.0]],
    "output": {"weights": [3.0], "bias": 0.0}
}"#,
        )
        .await
        .unwrap();

        (temp_dir, vocabulary_path, model_path)
    }

    #[tokio::test]
    async fn full_configuration() {
        let (_temp_dir, vocabulary_path, model_path) = create_test_artifacts().await;

        let config = SentimentPredictorConfig::from_files(&vocabulary_path, &model_path)
            .await
            .unwrap();

        assert_eq!(config.vocabulary.len(), 3);
        assert!(config.vocabulary_path.is_absolute());

        let summary = config.get_summary();
        assert_eq!(summary.vocabulary_size, 3);
        assert_eq!(summary.oov_policy, OovPolicy::MapToUnknown(1));
        assert_eq!(summary.model_backend, "embedding_bag");
        assert_eq!(summary.model_version.as_deref(), Some("1.0.0"));
    }

    #[tokio::test]
    async fn missing_vocabulary_is_reported_by_name() {
        let (_temp_dir, _vocabulary_path, model_path) = create_test_artifacts().await;

        let err = SentimentPredictorConfig::from_files("/non/existent/tokenizer.json", &model_path)
            .await
            .unwrap_err();

        assert_eq!(err.artifact(), Some(ArtifactKind::Vocabulary));
        assert!(err.to_string().contains("vocabulary artifact not found"));
        assert!(err.to_string().contains("/non/existent/tokenizer.json"));
    }

    #[tokio::test]
    async fn missing_model_is_reported_by_name() {
        let (temp_dir, vocabulary_path, _model_path) = create_test_artifacts().await;
        let missing = temp_dir.path().join("missing_model.json");

        let err = SentimentPredictorConfig::from_files(&vocabulary_path, &missing)
            .await
            .unwrap_err();

        assert_eq!(err.artifact(), Some(ArtifactKind::ScoringModel));
        assert!(err.to_string().contains("missing_model.json"));
    }

    #[tokio::test]
    async fn unreadable_vocabulary_is_reported_by_name() {
        let (_temp_dir, vocabulary_path, model_path) = create_test_artifacts().await;
        write(&vocabulary_path, [0xff_u8, 0xfe, 0x00]).await.unwrap();

        let err = SentimentPredictorConfig::from_files(&vocabulary_path, &model_path)
            .await
            .unwrap_err();

        assert_eq!(err.artifact(), Some(ArtifactKind::Vocabulary));
        assert!(err.is_startup_failure());
        assert!(err.to_string().contains("vocabulary artifact at"));
        assert!(err.to_string().contains("tokenizer.json"));
        assert!(matches!(
            err,
            SentimentPredictorError::ArtifactLoad { ref source, .. }
                if matches!(**source, SentimentPredictorError::Io { .. })
        ));
    }

    #[tokio::test]
    async fn unreadable_model_is_reported_by_name() {
        let (_temp_dir, vocabulary_path, model_path) = create_test_artifacts().await;
        write(&model_path, [0xff_u8, 0xfe, 0x00]).await.unwrap();

        let err = SentimentPredictorConfig::from_files(&vocabulary_path, &model_path)
            .await
            .unwrap_err();

        assert_eq!(err.artifact(), Some(ArtifactKind::ScoringModel));
        assert!(err.to_string().contains("scoring model artifact at"));
        assert!(err.to_string().contains("sentiment_model.json"));
    }

    #[tokio::test]
    async fn malformed_model_is_reported_by_name() {
        let (_temp_dir, vocabulary_path, model_path) = create_test_artifacts().await;
        write(&model_path, r#"{"format_version": "1.0.0""#).await.unwrap();

        let err = SentimentPredictorConfig::from_files(&vocabulary_path, &model_path)
            .await
            .unwrap_err();

        assert_eq!(err.artifact(), Some(ArtifactKind::ScoringModel));
        assert!(matches!(
            err,
            SentimentPredictorError::ArtifactLoad { ref source, .. }
                if matches!(**source, SentimentPredictorError::Json { .. })
        ));
    }

    #[test]
    fn directory_is_not_an_artifact() {
        let temp_dir = TempDir::new().unwrap();

        let result = SentimentPredictorConfig::validate_and_canonicalize_path(
            temp_dir.path(),
            ArtifactKind::ScoringModel,
        );
        assert!(matches!(
            result,
            Err(SentimentPredictorError::ArtifactNotFound { .. })
        ));
    }

    #[test]
    fn existing_file_is_canonicalized() {
        use tempfile::NamedTempFile;

        let temp_file = NamedTempFile::new().unwrap();
        let result = SentimentPredictorConfig::validate_and_canonicalize_path(
            temp_file.path(),
            ArtifactKind::Vocabulary,
        );

        let canonical_path = result.unwrap();
        assert!(canonical_path.is_absolute());
        assert!(canonical_path.exists());
    }
}
