// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Custom extractors for improved error handling
//!
//! Review bodies come from hand-written clients and browser forms, so JSON
//! failures are reported with a hint about what to fix instead of the
//! default Axum rejection text.

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::header,
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;

use crate::error::ServerError;

mod error_hints {
    pub const REVIEW_SHAPE: &str =
        "send a review as {\"text\": \"...\"} or a batch as {\"reviews\": [\"...\", ...]}";
    pub const MISSING_COMMA: &str =
        "check for missing or extra commas between object properties or array elements";
    pub const MISSING_BRACE: &str = "check for missing closing brace '}' for JSON object";
    pub const MISSING_BRACKET: &str = "check for missing closing bracket ']' for JSON array";
    pub const MISSING_QUOTES: &str =
        "check for missing or improperly escaped quotes around string values";
    pub const CONTROL_CHARS: &str = "JSON contains invalid control characters that must be escaped";
    pub const EXPECTED_VALUE: &str =
        "expected a valid JSON value (string, number, boolean, null, object, or array)";
    pub const DEFAULT_SYNTAX: &str = "check JSON formatting and structure";
    pub const EMPTY_BODY: &str = "request body is empty, expected valid JSON";
    pub const TRUNCATED_JSON: &str =
        "unexpected end of JSON input, request appears to be truncated";
}

/// Largest accepted request body
pub const MAX_JSON_PAYLOAD_SIZE: usize = 1024 * 1024;

/// JSON extractor with descriptive rejections
#[derive(Debug)]
pub struct JsonExtractor<T>(pub T);

impl<T, S> FromRequest<S> for JsonExtractor<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        check_content_type(&req)?;

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| json_error(format!("failed to read request body: {rejection}")))?;

        if bytes.len() > MAX_JSON_PAYLOAD_SIZE {
            return Err(json_error(format!(
                "request body too large: {} bytes (max: {} bytes)",
                bytes.len(),
                MAX_JSON_PAYLOAD_SIZE
            )));
        }

        if bytes.is_empty() {
            return Err(json_error(error_hints::EMPTY_BODY));
        }

        serde_json::from_slice::<T>(&bytes)
            .map(JsonExtractor)
            .map_err(|err| json_error(describe_parse_error(&err)))
    }
}

impl<T> IntoResponse for JsonExtractor<T>
where
    T: IntoResponse,
{
    fn into_response(self) -> Response {
        self.0.into_response()
    }
}

fn json_error(message: impl Into<String>) -> ServerError {
    ServerError::JsonError {
        message: message.into(),
    }
}

/// Reject bodies explicitly labeled as something other than JSON
///
/// A missing content-type is accepted.
fn check_content_type(req: &Request) -> Result<(), ServerError> {
    match req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
    {
        Some(content_type) if !content_type.starts_with("application/json") => {
            Err(json_error(format!(
                "invalid content-type: expected 'application/json', got '{content_type}'"
            )))
        }
        _ => Ok(()),
    }
}

fn describe_parse_error(err: &serde_json::Error) -> String {
    use serde_json::error::Category;

    match err.classify() {
        Category::Syntax => format!(
            "invalid JSON syntax at line {}, column {}: {}",
            err.line(),
            err.column(),
            syntax_hint(err)
        ),
        Category::Data => format!("JSON data validation failed: {}", data_hint(err)),
        Category::Eof => error_hints::TRUNCATED_JSON.to_string(),
        Category::Io => format!("JSON parsing error: {err}"),
    }
}

fn syntax_hint(err: &serde_json::Error) -> &'static str {
    let err_msg = err.to_string();

    if err_msg.contains("expected ','") || err_msg.contains("trailing comma") {
        error_hints::MISSING_COMMA
    } else if err_msg.contains("expected '}'") {
        error_hints::MISSING_BRACE
    } else if err_msg.contains("expected ']'") {
        error_hints::MISSING_BRACKET
    } else if err_msg.contains("expected '\"'") {
        error_hints::MISSING_QUOTES
    } else if err_msg.contains("control character") {
        error_hints::CONTROL_CHARS
    } else if err_msg.contains("expected value") {
        error_hints::EXPECTED_VALUE
    } else {
        error_hints::DEFAULT_SYNTAX
    }
}

fn data_hint(err: &serde_json::Error) -> String {
    let err_msg = err.to_string();

    if err_msg.contains("missing field") || err_msg.contains("unknown field") {
        format!("{err_msg}; {}", error_hints::REVIEW_SHAPE)
    } else if err_msg.contains("expected a sequence") {
        format!(
            "expected an array, but received a different data type; {}",
            error_hints::REVIEW_SHAPE
        )
    } else if err_msg.contains("invalid type") {
        format!("data type mismatch: {err_msg}")
    } else {
        err_msg
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{HeaderValue, Method},
    };
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    #[serde(deny_unknown_fields)]
    struct Review {
        text: serde_json::Value,
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Batch {
        reviews: Vec<serde_json::Value>,
    }

    fn create_request(body: &str) -> Request {
        let mut req = Request::builder()
            .method(Method::POST)
            .uri("/v1/sentiment")
            .body(Body::from(body.to_string()))
            .unwrap();

        req.headers_mut()
            .insert("content-type", HeaderValue::from_static("application/json"));

        req
    }

    async fn rejection<T: DeserializeOwned + std::fmt::Debug>(body: &str) -> String {
        match JsonExtractor::<T>::from_request(create_request(body), &()).await {
            Err(ServerError::JsonError { message }) => message,
            other => panic!("expected JsonError, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn review_body_is_parsed() {
        let JsonExtractor(review) =
            JsonExtractor::<Review>::from_request(create_request(r#"{"text": "Great 🦀"}"#), &())
                .await
                .unwrap();
        assert_eq!(review.text, serde_json::json!("Great 🦀"));
    }

    #[tokio::test]
    async fn non_string_text_is_accepted() {
        let JsonExtractor(review) =
            JsonExtractor::<Review>::from_request(create_request(r#"{"text": 42}"#), &())
                .await
                .unwrap();
        assert_eq!(review.text, serde_json::json!(42));
    }

    #[tokio::test]
    async fn empty_body_error() {
        let message = rejection::<Review>("").await;
        assert!(message.contains("request body is empty"));
    }

    #[tokio::test]
    async fn truncated_body_error() {
        let message = rejection::<Review>(r#"{"text": "good""#).await;
        assert!(message.contains("unexpected end of JSON input"));
    }

    #[tokio::test]
    async fn syntax_error_reports_position() {
        let message = rejection::<Batch>(r#"{"reviews": ["good",, "bad"]}"#).await;
        assert!(message.contains("invalid JSON syntax"));
        assert!(message.contains("line 1"));
    }

    #[tokio::test]
    async fn missing_field_hints_at_shape() {
        let message = rejection::<Review>(r#"{"review": "good"}"#).await;
        assert!(message.contains("JSON data validation failed"));
        assert!(message.contains("{\"text\": \"...\"}"));
    }

    #[tokio::test]
    async fn reviews_must_be_an_array() {
        let message = rejection::<Batch>(r#"{"reviews": "good"}"#).await;
        assert!(message.contains("JSON data validation failed"));
    }

    #[tokio::test]
    async fn large_payload_rejection() {
        let large_body = format!(r#"{{"text": "{}"}}"#, "x".repeat(MAX_JSON_PAYLOAD_SIZE));
        let message = rejection::<Review>(&large_body).await;
        assert!(message.contains("request body too large"));
    }

    #[tokio::test]
    async fn invalid_content_type() {
        let mut req = Request::builder()
            .method(Method::POST)
            .uri("/v1/sentiment")
            .body(Body::from(r#"{"text": "good"}"#))
            .unwrap();
        req.headers_mut()
            .insert("content-type", HeaderValue::from_static("text/plain"));

        match JsonExtractor::<Review>::from_request(req, &()).await {
            Err(ServerError::JsonError { message }) => {
                assert!(message.contains("expected 'application/json'"));
                assert!(message.contains("text/plain"));
            }
            other => panic!("expected JsonError, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_content_type_is_accepted() {
        let req = Request::builder()
            .method(Method::POST)
            .uri("/v1/sentiment")
            .body(Body::from(r#"{"text": "good"}"#))
            .unwrap();

        assert!(JsonExtractor::<Review>::from_request(req, &()).await.is_ok());
    }
}
