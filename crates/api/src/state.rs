// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Server state management module
//!
//! This module provides shared application state for the sentiment API
//! server: configuration, the loaded predictor, and coordinated cancellation.

use std::sync::Arc;

use sentiment_predictor::{PredictorSummary, SentimentPredictor};
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use utoipa::ToSchema;

use crate::config::{Environment, ServerConfig};

/// Shared application state with cancellation token support
#[derive(Debug, Clone)]
pub struct ServerState {
    /// Server configuration
    config: ServerConfig,
    /// Predictor built from the startup artifacts, read-only afterwards
    predictor: Arc<SentimentPredictor>,
    /// Cancellation token for coordinated shutdown
    pub cancellation_token: CancellationToken,
}

impl ServerState {
    /// Create new server state
    ///
    /// # Arguments
    ///
    /// * `config` - Server configuration
    /// * `predictor` - Loaded sentiment predictor
    /// * `cancellation_token` - Token for coordinated cancellation
    pub fn new(
        config: ServerConfig,
        predictor: Arc<SentimentPredictor>,
        cancellation_token: CancellationToken,
    ) -> Self {
        Self {
            config,
            predictor,
            cancellation_token,
        }
    }

    /// Server configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Get the sentiment predictor
    pub fn predictor(&self) -> &SentimentPredictor {
        &self.predictor
    }

    /// Report service health
    pub fn health_check(&self) -> HealthCheck {
        let status = if self.cancellation_token.is_cancelled() {
            HealthStatus::Down {
                reason: Box::from("server is shutting down"),
            }
        } else {
            HealthStatus::Up
        };

        HealthCheck {
            status,
            version: Box::from(env!("CARGO_PKG_VERSION")),
            environment: self.config.environment,
            timestamp: chrono::Utc::now().to_rfc3339(),
            predictor: self.predictor.summary(),
        }
    }
}

/// Health status of the service
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub enum HealthStatus {
    /// Artifacts are loaded and predictions are served
    Up,

    /// Service is not accepting new work
    Down {
        /// Human-readable explanation of why the service is down
        reason: Box<str>,
    },
}

/// Health check status
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthCheck {
    /// Service status
    pub status: HealthStatus,
    /// Service version
    pub version: Box<str>,
    /// Environment
    pub environment: Environment,
    /// Timestamp
    pub timestamp: String,
    /// Loaded vocabulary and scoring model
    #[schema(value_type = Object)]
    pub predictor: PredictorSummary,
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use sentiment_predictor::{
        EmbeddingBagModel, MAX_LEN, OovPolicy, Vocabulary, embedding_bag::EmbeddingBagArtifact,
    };

    use super::*;

    fn test_predictor() -> Arc<SentimentPredictor> {
        let words: HashMap<String, u32> = [("<OOV>", 1), ("good", 2), ("bad", 3)]
            .into_iter()
            .map(|(w, id)| (w.to_string(), id))
            .collect();
        let vocabulary = Vocabulary::new(words, Some("<OOV>"), None).unwrap();

        let artifact: EmbeddingBagArtifact = serde_json::from_value(serde_json::json!({
            "format_version": "1.0.0",
            "input_length": MAX_LEN,
            "embedding_dim": 1,
            "mask_padding": true,
            "embeddings": [[0.0], [0.0], [1.0], [-1.0]],
            "output": {"weights": [3.0], "bias": 0.0}
        }))
        .unwrap();
        let model = EmbeddingBagModel::new(artifact).unwrap();

        Arc::new(
            SentimentPredictor::with_components(Arc::new(vocabulary), Arc::new(model)).unwrap(),
        )
    }

    #[test]
    fn server_state_creation() {
        let state = ServerState::new(
            ServerConfig::default(),
            test_predictor(),
            CancellationToken::new(),
        );

        assert!(!state.cancellation_token.is_cancelled());
        assert_eq!(state.predictor().summary().vocabulary_size, 3);
    }

    #[test]
    fn server_state_with_cancellation_token() {
        let token = CancellationToken::new();
        let state = ServerState::new(ServerConfig::default(), test_predictor(), token.clone());

        assert!(!state.cancellation_token.is_cancelled());

        // Cancelling the original token is observed through the state
        token.cancel();
        assert!(state.cancellation_token.is_cancelled());
    }

    #[test]
    fn health_check_reports_predictor() {
        let state = ServerState::new(
            ServerConfig::for_testing(),
            test_predictor(),
            CancellationToken::new(),
        );

        let health = state.health_check();
        assert_eq!(health.status, HealthStatus::Up);
        assert_eq!(health.environment, Environment::Testing);
        assert_eq!(health.predictor.oov_policy, OovPolicy::MapToUnknown(1));
        assert_eq!(health.predictor.max_len, MAX_LEN);
        assert_eq!(health.predictor.model_backend, "embedding_bag");
    }

    #[test]
    fn health_check_reports_shutdown() {
        let token = CancellationToken::new();
        let state = ServerState::new(ServerConfig::for_testing(), test_predictor(), token.clone());

        token.cancel();
        assert!(matches!(state.health_check().status, HealthStatus::Down { .. }));
    }
}
