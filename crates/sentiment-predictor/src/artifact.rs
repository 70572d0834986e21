// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Serialization formats accepted for artifacts on disk

use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::{SentimentPredictorError, SentimentPredictorResult};

/// Artifact encoding, chosen by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactFormat {
    /// `.json` and anything unrecognized
    Json,
    /// `.yaml` / `.yml`
    Yaml,
}

impl ArtifactFormat {
    /// Pick the format for a path
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("yaml" | "yml") => ArtifactFormat::Yaml,
            _ => ArtifactFormat::Json,
        }
    }

    /// Deserialize artifact content, naming `path` in any error
    pub fn parse<T: DeserializeOwned>(
        self,
        content: &str,
        path: &Path,
    ) -> SentimentPredictorResult<T> {
        match self {
            ArtifactFormat::Json => serde_json::from_str(content).map_err(|e| {
                SentimentPredictorError::json(format!("Failed to parse {}: {}", path.display(), e))
            }),
            ArtifactFormat::Yaml => serde_yaml::from_str(content).map_err(|e| {
                SentimentPredictorError::yaml(format!("Failed to parse {}: {}", path.display(), e))
            }),
        }
    }
}
