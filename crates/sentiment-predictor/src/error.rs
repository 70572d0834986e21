// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for sentiment prediction operations
//!
//! Startup problems (missing or malformed artifacts) and integration faults
//! (a scoring backend breaking its probability contract) are the only
//! failure modes. Prediction itself is total for any input text.

use std::{fmt, path::PathBuf};

use thiserror::Error;

/// Result type alias for sentiment prediction operations
pub type SentimentPredictorResult<T> = Result<T, SentimentPredictorError>;

/// Artifacts the predictor loads at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    /// Word to token id table
    Vocabulary,
    /// Trained scoring model weights
    ScoringModel,
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactKind::Vocabulary => write!(f, "vocabulary"),
            ArtifactKind::ScoringModel => write!(f, "scoring model"),
        }
    }
}

/// Error types for sentiment prediction operations
#[derive(Debug, Error)]
pub enum SentimentPredictorError {
    /// A required artifact is missing or is not a regular file
    #[error("{artifact} artifact not found: {path}")]
    ArtifactNotFound {
        /// Which artifact could not be resolved
        artifact: ArtifactKind,
        /// Path that was checked
        path: PathBuf,
    },

    /// A resolved artifact could not be read, parsed or validated
    #[error("{artifact} artifact at {path} could not be loaded: {source}")]
    ArtifactLoad {
        /// Which artifact failed to load
        artifact: ArtifactKind,
        /// Canonical path of the artifact
        path: PathBuf,
        /// Underlying read, parse or validation failure
        #[source]
        source: Box<SentimentPredictorError>,
    },

    /// Configuration invalid or inconsistent
    #[error("Configuration error: {message}")]
    Configuration {
        /// Error message
        message: String,
    },

    /// Vocabulary artifact content is invalid
    #[error("Vocabulary error: {message}")]
    Vocabulary {
        /// Error message
        message: String,
    },

    /// Scoring model artifact content is invalid
    #[error("Model error: {message}")]
    Model {
        /// Error message
        message: String,
    },

    /// The scoring backend returned something that is not a probability
    #[error("Scoring function returned {score}, outside of [0, 1]")]
    ScoreOutOfRange {
        /// Value returned by the scoring function
        score: f64,
    },

    /// JSON serialization/deserialization error
    #[error("JSON error: {message}")]
    Json {
        /// Error message
        message: String,
    },

    /// YAML parsing error
    #[error("YAML error: {message}")]
    Yaml {
        /// Error message
        message: String,
    },

    /// I/O error (file operations)
    #[error("I/O error: {message}")]
    Io {
        /// Error message
        message: String,
    },
}

impl SentimentPredictorError {
    /// Create an artifact not found error
    pub fn artifact_not_found(artifact: ArtifactKind, path: impl Into<PathBuf>) -> Self {
        Self::ArtifactNotFound {
            artifact,
            path: path.into(),
        }
    }

    /// Attach the artifact and its path to a load failure
    pub fn artifact_load(artifact: ArtifactKind, path: impl Into<PathBuf>, source: Self) -> Self {
        Self::ArtifactLoad {
            artifact,
            path: path.into(),
            source: Box::new(source),
        }
    }

    /// Create a configuration error
    pub fn config<T: ToString>(message: T) -> Self {
        Self::Configuration {
            message: message.to_string(),
        }
    }

    /// Create a vocabulary error
    pub fn vocabulary<T: ToString>(message: T) -> Self {
        Self::Vocabulary {
            message: message.to_string(),
        }
    }

    /// Create a model error
    pub fn model<T: ToString>(message: T) -> Self {
        Self::Model {
            message: message.to_string(),
        }
    }

    /// Create a score out of range error
    pub fn score_out_of_range(score: f64) -> Self {
        Self::ScoreOutOfRange { score }
    }

    /// Create a JSON error
    pub fn json<T: ToString>(message: T) -> Self {
        Self::Json {
            message: message.to_string(),
        }
    }

    /// Create a YAML error
    pub fn yaml<T: ToString>(message: T) -> Self {
        Self::Yaml {
            message: message.to_string(),
        }
    }

    /// Create an I/O error
    pub fn io<T: ToString>(message: T) -> Self {
        Self::Io {
            message: message.to_string(),
        }
    }

    /// Check if this error should stop the process from serving predictions
    pub fn is_startup_failure(&self) -> bool {
        matches!(
            self,
            SentimentPredictorError::ArtifactNotFound { .. }
                | SentimentPredictorError::ArtifactLoad { .. }
                | SentimentPredictorError::Configuration { .. }
                | SentimentPredictorError::Vocabulary { .. }
                | SentimentPredictorError::Model { .. }
                | SentimentPredictorError::Json { .. }
                | SentimentPredictorError::Yaml { .. }
                | SentimentPredictorError::Io { .. }
        )
    }

    /// Check if this error is a contract violation by the scoring backend
    pub fn is_integration_fault(&self) -> bool {
        matches!(self, SentimentPredictorError::ScoreOutOfRange { .. })
    }

    /// Artifact named by this error, if any
    pub fn artifact(&self) -> Option<ArtifactKind> {
        match self {
            SentimentPredictorError::ArtifactNotFound { artifact, .. }
            | SentimentPredictorError::ArtifactLoad { artifact, .. } => Some(*artifact),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_constructors() {
        let config_err = SentimentPredictorError::config("test message");
        assert!(matches!(
            config_err,
            SentimentPredictorError::Configuration { .. }
        ));

        let score_err = SentimentPredictorError::score_out_of_range(1.5);
        assert!(matches!(
            score_err,
            SentimentPredictorError::ScoreOutOfRange { score } if score == 1.5
        ));
    }

    #[test]
    fn artifact_not_found_names_artifact_and_path() {
        let err = SentimentPredictorError::artifact_not_found(
            ArtifactKind::ScoringModel,
            "/models/sentiment_model.json",
        );
        let display = err.to_string();

        assert!(display.contains("scoring model artifact not found"));
        assert!(display.contains("/models/sentiment_model.json"));
        assert_eq!(err.artifact(), Some(ArtifactKind::ScoringModel));
        assert!(err.is_startup_failure());
        assert!(!err.is_integration_fault());
    }

    #[test]
    fn error_classification() {
        let fault = SentimentPredictorError::score_out_of_range(-0.2);
        assert!(fault.is_integration_fault());
        assert!(!fault.is_startup_failure());
        assert_eq!(fault.artifact(), None);

        let vocab = SentimentPredictorError::vocabulary("empty word index");
        assert!(vocab.is_startup_failure());
        assert!(!vocab.is_integration_fault());
    }

    #[test]
    fn error_display() {
        let error = SentimentPredictorError::model("embedding rows have uneven width");
        let display = format!("{}", error);
        assert!(display.contains("Model error"));
        assert!(display.contains("uneven width"));
    }

    #[test]
    fn load_failure_keeps_artifact_and_cause() {
        let err = SentimentPredictorError::artifact_load(
            ArtifactKind::Vocabulary,
            "/artifacts/tokenizer.json",
            SentimentPredictorError::io("stream did not contain valid UTF-8"),
        );

        assert_eq!(err.artifact(), Some(ArtifactKind::Vocabulary));
        assert!(err.is_startup_failure());
        let display = err.to_string();
        assert!(display.contains("vocabulary artifact at /artifacts/tokenizer.json"));
        assert!(display.contains("valid UTF-8"));

        let source = std::error::Error::source(&err).map(ToString::to_string);
        assert_eq!(
            source.as_deref(),
            Some("I/O error: stream did not contain valid UTF-8")
        );
    }
}
