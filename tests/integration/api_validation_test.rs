// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{http::StatusCode, Extension, Router};
use axum_test::TestServer;
use scoutrs::config::settings::Settings;
use scoutrs::presentation::routes;
use serde_json::json;
use std::sync::Arc;

fn test_app() -> TestServer {
    let settings = Arc::new(Settings::new().unwrap());
    let app = Router::new()
        .merge(routes::routes())
        .layer(Extension(settings));
    TestServer::new(app).unwrap()
}

/// 测试健康检查端点
#[tokio::test]
async fn test_health_check() {
    let server = test_app();
    let response = server.get("/health").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.text(), "OK");
}

/// 测试版本信息端点
#[tokio::test]
async fn test_version() {
    let server = test_app();
    let response = server.get("/v1/version").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.text(), env!("CARGO_PKG_VERSION"));
}

/// 空关键词在启动任何浏览器之前就被拒绝
#[tokio::test]
async fn test_empty_keyword_is_rejected_with_400() {
    let server = test_app();
    let response = server
        .post("/v1/linkedin/jobs")
        .json(&json!({
            "username": "user@example.com",
            "password": "secret",
            "search_keyword": "",
            "numbers": 10
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json();
    assert!(body["error"].is_string());
}

/// 上限为零的请求被拒绝
#[tokio::test]
async fn test_zero_limit_is_rejected_with_400() {
    let server = test_app();
    let response = server
        .post("/v1/google/jobs")
        .json(&json!({
            "username": "user@example.com",
            "password": "secret",
            "search_keyword": "engineer",
            "numbers": 0
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

/// 未知用户的会话查询返回 exists=false
#[tokio::test]
async fn test_session_check_for_unknown_user() {
    let server = test_app();
    let response = server.get("/v1/session/nobody-here").await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert_eq!(body["exists"], false);
}
