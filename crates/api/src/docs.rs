// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! `OpenAPI` document definition

use utoipa::OpenApi;

use crate::{
    config::Environment,
    routes::handlers::{
        BatchSentimentRequest, BatchSentimentResponse, SentimentRequest, SentimentResponse,
    },
    state::{HealthCheck, HealthStatus},
};

/// `OpenAPI` document for the sentiment API
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "Review Sentiment API",
        description = "Classifies product reviews as positive or negative using a pre-built vocabulary and a trained scoring model."
    ),
    paths(
        crate::routes::handlers::health_handler,
        crate::routes::handlers::sentiment_handler,
        crate::routes::handlers::batch_sentiment_handler,
    ),
    components(schemas(
        HealthCheck,
        HealthStatus,
        Environment,
        SentimentRequest,
        SentimentResponse,
        BatchSentimentRequest,
        BatchSentimentResponse,
    )),
    tags(
        (name = "health", description = "Service health"),
        (name = "sentiment", description = "Review sentiment classification")
    )
)]
pub struct ApiDoc;
