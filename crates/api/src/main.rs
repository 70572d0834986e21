// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Review Sentiment API Server
//!
//! Classifies product reviews as positive or negative over HTTP.

use anyhow::Result;
use api::{Server, ServerConfig, ShutdownConfig};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting review sentiment server with coordinated shutdown support");

    let config = ServerConfig::from_env()?;
    info!(
        vocabulary = %config.artifacts.vocabulary_path.display(),
        model = %config.artifacts.model_path.display(),
        "Loading sentiment artifacts"
    );

    let shutdown_config = ShutdownConfig::default();

    // Fails here, before binding, if either artifact is missing or invalid
    let server = Server::new(config, shutdown_config).await?;

    // NOTE: the `#[tokio::main]` task does not run a worker future, we must spawn
    tokio::spawn(async move { server.run().await }).await??;

    Ok(())
}
