// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Prometheus metrics module
//!
//! Provides global metrics using the default Prometheus registry via macros and
//! an Axum-compatible metrics handler.

use std::sync::LazyLock;

use axum::{
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use prometheus::{
    Histogram, HistogramVec, IntCounterVec, TEXT_FORMAT, TextEncoder, register_histogram,
    register_histogram_vec, register_int_counter_vec,
};
use sentiment_predictor::SentimentLabel;
use tracing::error;

/// Total number of predictions served, labeled by sentiment label.
pub static PREDICTIONS_TOTAL: LazyLock<IntCounterVec> = LazyLock::new(|| {
    register_int_counter_vec!(
        "sentiment_api_predictions_total",
        "Total number of sentiment predictions, labeled by label",
        &["label"]
    )
    .expect("Failed to create sentiment_api_predictions_total counter vec")
});

/// Histogram for single prediction pipeline durations in seconds.
pub static PREDICTION_DURATION: LazyLock<Histogram> = LazyLock::new(|| {
    register_histogram!(
        "sentiment_api_prediction_duration_seconds",
        "Sentiment prediction pipeline durations in seconds",
        vec![0.000_1, 0.000_25, 0.000_5, 0.001, 0.002_5, 0.005, 0.01, 0.025, 0.05, 0.1]
    )
    .expect("Failed to create prediction duration histogram")
});

/// Total number of HTTP requests, labeled by method, route and status.
pub static HTTP_REQUESTS_TOTAL: LazyLock<IntCounterVec> = LazyLock::new(|| {
    register_int_counter_vec!(
        "sentiment_api_http_requests_total",
        "Total number of HTTP requests",
        &["method", "path", "status"]
    )
    .expect("Failed to create sentiment_api_http_requests_total counter vec")
});

/// Histogram for HTTP request durations in seconds.
pub static HTTP_REQUEST_DURATION: LazyLock<HistogramVec> = LazyLock::new(|| {
    register_histogram_vec!(
        "sentiment_api_http_request_duration_seconds",
        "HTTP request durations in seconds",
        &["method", "path"],
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0]
    )
    .expect("Failed to create HTTP request duration histogram")
});

/// Record one served prediction
///
/// # Arguments
/// * `label` - The predicted label
/// * `duration_secs` - Pipeline duration in seconds
pub fn record_prediction(label: SentimentLabel, duration_secs: f64) {
    PREDICTIONS_TOTAL.with_label_values(&[label.as_str()]).inc();
    PREDICTION_DURATION.observe(duration_secs);
}

/// Record one completed HTTP request
///
/// # Arguments
/// * `method` - HTTP method
/// * `path` - Matched route template
/// * `status` - Response status code
/// * `duration_secs` - The duration of the request in seconds
pub fn record_http_request(method: &str, path: &str, status: u16, duration_secs: f64) {
    let status = status.to_string();
    HTTP_REQUESTS_TOTAL
        .with_label_values(&[method, path, status.as_str()])
        .inc();
    HTTP_REQUEST_DURATION
        .with_label_values(&[method, path])
        .observe(duration_secs);
}

/// Axum handler that exports metrics in Prometheus text format
pub async fn metrics_handler() -> Response {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();

    match encoder.encode_to_string(&metric_families) {
        Ok(body) => ([(header::CONTENT_TYPE, TEXT_FORMAT)], body).into_response(),
        Err(e) => {
            error!(error = %e, "failed to encode metrics");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
