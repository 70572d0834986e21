// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Integration tests for the sentiment endpoints

mod fixtures;

use axum::http::StatusCode;
use fixtures::{NEGATIVE_REVIEW, POSITIVE_REVIEW, TestServer};
use serde_json::{Value, json};

async fn classify(server: &TestServer, body: Value) -> (StatusCode, Value) {
    let response = reqwest::Client::new()
        .post(server.url("/v1/sentiment"))
        .json(&body)
        .send()
        .await
        .expect("Failed to send request");

    let status = StatusCode::from_u16(response.status().as_u16()).unwrap();
    let body = response.json().await.expect("Failed to read body");
    (status, body)
}

#[tokio::test]
async fn positive_review() {
    let server = TestServer::start().await;

    let (status, body) = classify(&server, json!({ "text": POSITIVE_REVIEW })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["label"], "positive");
    assert_eq!(body["message"], "Positive review");
    assert_eq!(body["token_count"], 7);
    assert_eq!(body["truncated"], false);

    let probability = body["probability"].as_f64().unwrap();
    assert!(probability >= 0.5 && probability <= 1.0);
    assert_eq!(
        body["confidence"].as_str().unwrap(),
        format!("{probability:.3}")
    );
}

#[tokio::test]
async fn negative_review() {
    let server = TestServer::start().await;

    let (status, body) = classify(&server, json!({ "text": NEGATIVE_REVIEW })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["label"], "negative");
    assert_eq!(body["message"], "Negative review");
    assert_eq!(body["token_count"], 5);
    assert!(body["probability"].as_f64().unwrap() < 0.5);
}

#[tokio::test]
async fn non_string_text_is_classified() {
    let server = TestServer::start().await;

    // "12345" normalizes to an empty string and is scored as all padding
    let (status, body) = classify(&server, json!({ "text": 12345 })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["token_count"], 0);
    assert_eq!(body["probability"], 0.5);
    assert_eq!(body["label"], "positive");
}

#[tokio::test]
async fn long_review_is_truncated() {
    let server = TestServer::start().await;

    let (status, body) = classify(&server, json!({ "text": "amazing ".repeat(250) })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["token_count"], 250);
    assert_eq!(body["truncated"], true);
}

#[tokio::test]
async fn blank_review_is_rejected() {
    let server = TestServer::start().await;

    let (status, body) = classify(&server, json!({ "text": "   " })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);
    assert!(
        body["error"]
            .as_str()
            .unwrap()
            .contains("review text cannot be empty")
    );
}

#[tokio::test]
async fn malformed_json_is_rejected() {
    let server = TestServer::start().await;

    let response = reqwest::Client::new()
        .post(server.url("/v1/sentiment"))
        .header("content-type", "application/json")
        .body(r#"{"text": "good""#)
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("Invalid JSON request"));
}

#[tokio::test]
async fn batch_preserves_order() {
    let server = TestServer::start().await;

    let response = reqwest::Client::new()
        .post(server.url("/v1/sentiment/batch"))
        .json(&json!({ "reviews": [NEGATIVE_REVIEW, POSITIVE_REVIEW, NEGATIVE_REVIEW] }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    let labels: Vec<_> = body["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["label"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(labels, vec!["negative", "positive", "negative"]);
}

#[tokio::test]
async fn empty_batch_is_rejected() {
    let server = TestServer::start().await;

    let response = reqwest::Client::new()
        .post(server.url("/v1/sentiment/batch"))
        .json(&json!({ "reviews": [] }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn responses_carry_request_id() {
    let server = TestServer::start().await;

    let response = reqwest::Client::new()
        .post(server.url("/v1/sentiment"))
        .json(&json!({ "text": POSITIVE_REVIEW }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.headers().contains_key("x-request-id"));
}
