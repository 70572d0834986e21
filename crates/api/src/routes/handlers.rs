// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! HTTP request handlers module
//!
//! This module provides HTTP request handlers for the sentiment API server:
//! health checks and single or batch review classification.

use axum::{Json, extract::State};
use sentiment_predictor::{SentimentAnalysis, SentimentLabel};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};
use utoipa::ToSchema;

use crate::{
    error::ServerError,
    extractors::JsonExtractor,
    metrics::record_prediction,
    state::{HealthCheck, ServerState},
};

/// Health check endpoint handler
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    summary = "Health check endpoint",
    description = "Returns the current health status of the service including version, environment and a summary of the loaded vocabulary and scoring model.",
    responses(
        (status = 200, description = "Service is healthy", body = HealthCheck)
    )
)]
pub async fn health_handler(State(state): State<ServerState>) -> Json<HealthCheck> {
    Json(state.health_check())
}

/// Single review classification request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SentimentRequest {
    /// Review text; non-string values are classified by their JSON text
    #[schema(value_type = Object, example = json!("This was an AMAZING product!!! Highly recommend."))]
    pub text: Value,
}

/// Batch classification request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BatchSentimentRequest {
    /// Reviews to classify (must not be empty)
    #[schema(value_type = Vec<Object>, example = json!(["Great value, works perfectly", "Broke after two days"]))]
    pub reviews: Vec<Value>,
}

impl BatchSentimentRequest {
    /// Validates that the batch is non-empty and that no review is blank
    pub fn validate(&self) -> Result<Vec<String>, String> {
        if self.reviews.is_empty() {
            return Err("reviews list cannot be empty".to_string());
        }

        self.reviews
            .iter()
            .enumerate()
            .map(|(index, value)| {
                review_text(value).ok_or_else(|| format!("review {index} cannot be empty"))
            })
            .collect()
    }
}

/// Classification of one review
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct SentimentResponse {
    /// Predicted label
    #[schema(value_type = String, example = "positive")]
    pub label: SentimentLabel,
    /// Human-readable verdict
    #[schema(example = "Positive review")]
    pub message: String,
    /// Probability that the review is positive, unrounded
    #[schema(example = 0.82)]
    pub probability: f64,
    /// Probability formatted to three decimals
    #[schema(example = "0.820")]
    pub confidence: String,
    /// Words of the review found in the vocabulary (including unknown-word ids)
    pub token_count: usize,
    /// Whether the review was longer than the model input and was cut
    pub truncated: bool,
}

impl From<&SentimentAnalysis> for SentimentResponse {
    fn from(analysis: &SentimentAnalysis) -> Self {
        let prediction = analysis.prediction();
        Self {
            label: prediction.label(),
            message: prediction.message().to_string(),
            probability: prediction.probability().as_f64(),
            confidence: prediction.probability().display(),
            token_count: analysis.token_count(),
            truncated: analysis.truncated(),
        }
    }
}

/// Batch classification results, in request order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct BatchSentimentResponse {
    /// One result per submitted review
    pub results: Vec<SentimentResponse>,
}

/// Turn a JSON value into review text, `None` when it is blank
///
/// Strings are used as-is; any other value is classified by its JSON text.
fn review_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    };

    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

fn classify(state: &ServerState, text: &str) -> Result<SentimentResponse, ServerError> {
    let analysis = state.predictor().analyze(text)?;
    record_prediction(
        analysis.prediction().label(),
        analysis.processing_time().as_secs_f64(),
    );
    Ok(SentimentResponse::from(&analysis))
}

/// Classify a single review
///
/// Runs the review through normalization, vocabulary encoding, shaping to
/// the model input length, scoring and the fixed 0.5 decision threshold.
///
/// # Errors
///
/// Returns `ServerError` if the review is blank or the scoring model
/// misbehaves.
#[utoipa::path(
    post,
    path = "/v1/sentiment",
    tag = "sentiment",
    summary = "Classify review sentiment",
    description = "Classifies a product review as positive or negative and returns the label together with the model probability.",
    request_body = SentimentRequest,
    responses(
        (status = 200, description = "Review classified", body = SentimentResponse),
        (status = 400, description = "Invalid request - review text cannot be empty", body = String),
        (status = 500, description = "Scoring model returned an invalid probability", body = String)
    )
)]
pub async fn sentiment_handler(
    State(state): State<ServerState>,
    JsonExtractor(request): JsonExtractor<SentimentRequest>,
) -> Result<Json<SentimentResponse>, ServerError> {
    let text = review_text(&request.text)
        .ok_or_else(|| ServerError::ValidationError("review text cannot be empty".to_string()))?;

    let response = classify(&state, &text)?;
    debug!(
        label = %response.label,
        probability = response.probability,
        "review classified"
    );

    Ok(Json(response))
}

/// Classify a batch of reviews
///
/// # Errors
///
/// Returns `ServerError` if the batch is empty, any review is blank, or the
/// scoring model misbehaves.
#[utoipa::path(
    post,
    path = "/v1/sentiment/batch",
    tag = "sentiment",
    summary = "Classify a batch of reviews",
    description = "Classifies each review independently; results are returned in request order.",
    request_body = BatchSentimentRequest,
    responses(
        (status = 200, description = "Reviews classified", body = BatchSentimentResponse),
        (status = 400, description = "Invalid request - empty batch or blank review", body = String),
        (status = 500, description = "Scoring model returned an invalid probability", body = String)
    )
)]
pub async fn batch_sentiment_handler(
    State(state): State<ServerState>,
    JsonExtractor(request): JsonExtractor<BatchSentimentRequest>,
) -> Result<Json<BatchSentimentResponse>, ServerError> {
    let texts = request.validate().map_err(ServerError::ValidationError)?;

    let results = texts
        .iter()
        .map(|text| classify(&state, text))
        .collect::<Result<Vec<_>, _>>()?;

    let positive = results.iter().filter(|r| r.label.is_positive()).count();
    info!(batch_size = results.len(), positive, "batch classified");

    Ok(Json(BatchSentimentResponse { results }))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn string_review_text_is_used_verbatim() {
        assert_eq!(
            review_text(&json!("  Loved it!  ")).as_deref(),
            Some("  Loved it!  ")
        );
    }

    #[test]
    fn non_string_review_text_is_stringified() {
        assert_eq!(review_text(&json!(5)).as_deref(), Some("5"));
        assert_eq!(review_text(&json!(true)).as_deref(), Some("true"));
        assert_eq!(review_text(&json!(null)).as_deref(), Some("null"));
    }

    #[test]
    fn blank_review_text_is_rejected() {
        assert_eq!(review_text(&json!("")), None);
        assert_eq!(review_text(&json!(" \t\n")), None);
    }

    #[test]
    fn batch_validation() {
        let empty = BatchSentimentRequest { reviews: vec![] };
        assert_eq!(
            empty.validate().unwrap_err(),
            "reviews list cannot be empty"
        );

        let blank = BatchSentimentRequest {
            reviews: vec![json!("fine"), json!("   ")],
        };
        assert_eq!(blank.validate().unwrap_err(), "review 1 cannot be empty");

        let ok = BatchSentimentRequest {
            reviews: vec![json!("fine"), json!(10)],
        };
        assert_eq!(ok.validate().unwrap(), vec!["fine", "10"]);
    }
}
