// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Review Sentiment API Server Implementation
//!
//! This crate provides the HTTP server exposing the review sentiment
//! predictor, built with Axum and designed for production use with layered
//! configuration, middleware, and graceful shutdown.
//!
//! # Module Structure
//!
//! - [`config`]: Server configuration and environment management with hierarchical loading
//! - [`error`]: Error types and HTTP response handling with proper status codes
//! - [`state`]: Shared application state holding the loaded predictor
//! - [`server`]: Artifact loading, server lifecycle, and coordinated shutdown
//! - [`routes`]: Route configuration and HTTP request handlers
//! - [`extractors`]: JSON body extraction with descriptive rejections
//! - [`middleware`]: HTTP request metrics
//! - [`metrics`]: Prometheus metrics and the `/metrics` handler
//! - [`openapi`]: `OpenAPI` specification and Swagger UI endpoints
//!
//! # Key Features
//!
//! - **Fail-fast startup**: the server refuses to start unless both the vocabulary
//!   and the scoring model artifacts load and agree with each other
//! - **Graceful Shutdown**: Coordinated termination using `CancellationToken` with a timeout
//! - **Observability**: request ids, trace spans and Prometheus metrics

pub mod config;
pub mod docs;
pub mod error;
pub mod extractors;
pub mod metrics;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod server;
pub mod state;

pub use config::{ArtifactsConfig, Environment, ServerConfig};
pub use error::{ServerError, ServerResult};
pub use server::{Server, ShutdownConfig};
pub use state::{HealthCheck, HealthStatus, ServerState};
