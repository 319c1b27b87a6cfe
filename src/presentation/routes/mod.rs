// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::presentation::handlers::{crawl_handler, session_handler};
use axum::{
    routing::{get, post},
    Router,
};

/// 创建应用路由
///
/// # 返回值
///
/// 返回配置好的路由
pub fn routes() -> Router {
    let public_routes = Router::new()
        .route("/health", get(health_check))
        .route("/v1/version", get(version));

    let crawl_routes = Router::new()
        .route("/v1/linkedin/jobs", post(crawl_handler::linkedin_jobs))
        .route(
            "/v1/linkedin/companies",
            post(crawl_handler::linkedin_companies),
        )
        .route("/v1/linkedin/people", post(crawl_handler::linkedin_people))
        .route("/v1/google/jobs", post(crawl_handler::google_jobs))
        .route(
            "/v1/session/{username}",
            get(session_handler::check_session),
        );

    Router::new().merge(public_routes).merge(crawl_routes)
}

/// 健康检查端点
///
/// # 返回值
///
/// 返回"OK"字符串
pub async fn health_check() -> &'static str {
    "OK"
}

/// 版本信息端点
///
/// # 返回值
///
/// 返回应用版本号
pub async fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
