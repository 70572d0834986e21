// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Test fixtures for sentiment API integration tests
//!
//! Writes a small vocabulary and scoring model to a temporary directory and
//! starts a server on an OS-assigned port against them.

#![allow(dead_code)]

use std::{
    net::SocketAddr,
    path::{Path, PathBuf},
};

use api::{Server, ServerConfig, ShutdownConfig};
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;

/// Review whose cleaned form is `this was an amazing product highly recommend`
pub const POSITIVE_REVIEW: &str = "This was an AMAZING product!!! <br> Highly recommend.";

/// Review made of negative words and unknown words
pub const NEGATIVE_REVIEW: &str = "Terrible, a waste of money";

pub const VOCABULARY_JSON: &str = r#"{
    "word_index": {
        "<OOV>": 1, "this": 2, "was": 3, "an": 4, "amazing": 5, "product": 6,
        "br": 7, "highly": 8, "recommend": 9, "terrible": 10, "waste": 11
    },
    "oov_token": "<OOV>"
}"#;

/// Mean-pooled single-feature model: positive words +, negative words -
pub const MODEL_JSON: &str = r#"{
    "format_version": "1.0.0",
    "input_length": 200,
    "embedding_dim": 1,
    "mask_padding": true,
    "embeddings": [[0.0], [0.0], [0.0], [0.0], [0.0], [2.0], [0.0], [0.0], [1.0], [1.0], [-2.0], [-2.0]],
    "output": {"weights": [3.0], "bias": 0.0}
}"#;

/// Artifacts on disk for the lifetime of the value
pub struct Artifacts {
    dir: TempDir,
}

impl Artifacts {
    pub fn write() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        std::fs::write(dir.path().join("tokenizer.json"), VOCABULARY_JSON)
            .expect("Failed to write vocabulary");
        std::fs::write(dir.path().join("sentiment_model.json"), MODEL_JSON)
            .expect("Failed to write model");
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn vocabulary_path(&self) -> PathBuf {
        self.dir.path().join("tokenizer.json")
    }

    pub fn model_path(&self) -> PathBuf {
        self.dir.path().join("sentiment_model.json")
    }

    pub fn config(&self) -> ServerConfig {
        ServerConfig::for_testing().with_artifacts(self.vocabulary_path(), self.model_path())
    }
}

/// Running test server; keep it alive for the duration of the test
pub struct TestServer {
    pub addr: SocketAddr,
    pub token: CancellationToken,
    _artifacts: Artifacts,
}

impl TestServer {
    pub async fn start() -> Self {
        let artifacts = Artifacts::write();
        let (addr, token) = Server::new(artifacts.config(), ShutdownConfig::default())
            .await
            .expect("Failed to create server")
            .run_for_testing()
            .await
            .expect("Failed to start test server");

        Self {
            addr,
            token,
            _artifacts: artifacts,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
