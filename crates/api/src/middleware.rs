// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Middleware module for HTTP request processing
//!
//! Records per-route request counts and latencies for the Prometheus
//! endpoint.

use std::time::Instant;

use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use tracing::debug;

use crate::metrics::record_http_request;

/// Label used when a request did not match a route template
const UNMATCHED_PATH: &str = "unmatched";

/// HTTP metrics middleware function
///
/// Labels use the matched route template rather than the raw URI so that
/// label cardinality stays bounded.
pub async fn http_metrics_middleware(req: Request, next: Next) -> Response {
    let method = req.method().to_string();
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| UNMATCHED_PATH.to_string(), |p| p.as_str().to_string());

    let start = Instant::now();
    let response = next.run(req).await;
    let elapsed = start.elapsed();

    let status = response.status().as_u16();
    debug!(%method, %path, status, duration_ms = elapsed.as_millis(), "request completed");
    record_http_request(&method, &path, status, elapsed.as_secs_f64());

    response
}
