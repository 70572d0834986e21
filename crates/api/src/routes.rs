// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Routes module
//!
//! This module provides route configuration for the sentiment API server.

pub mod handlers;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use handlers::{batch_sentiment_handler, health_handler, sentiment_handler};

use crate::{
    metrics::metrics_handler,
    middleware::http_metrics_middleware,
    openapi::{openapi_spec, swagger_ui},
    state::ServerState,
};

/// Create application routes
pub fn create_routes() -> Router<ServerState> {
    // Monitoring endpoints are not instrumented with HTTP metrics
    let monitoring_routes = Router::new()
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler));

    let docs_routes = Router::new()
        .route("/api-doc/openapi.json", get(openapi_spec))
        .route("/swagger-ui", get(swagger_ui));

    let api_routes = Router::new()
        .route("/sentiment", post(sentiment_handler))
        .route("/sentiment/batch", post(batch_sentiment_handler))
        .route_layer(middleware::from_fn(http_metrics_middleware));

    let v1 = Router::new().nest("/v1", api_routes);

    Router::new()
        .merge(monitoring_routes)
        .merge(docs_routes)
        .merge(v1)
}
