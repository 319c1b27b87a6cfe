// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    extract::{Extension, Json},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;
use std::sync::Arc;
use validator::Validate;

use crate::{
    application::{
        dto::crawl_request::{
            CompanySearchRequestDto, JobSearchRequestDto, PeopleSearchRequestDto,
        },
        use_cases::run_crawl::CrawlRunner,
    },
    config::settings::Settings,
};

/// 处理 LinkedIn 职位搜索请求
///
/// 校验失败返回 400；爬取过程中的致命错误折叠进报告本身，
/// 对调用方始终是 200
pub async fn linkedin_jobs(
    Extension(settings): Extension<Arc<Settings>>,
    Json(payload): Json<JobSearchRequestDto>,
) -> impl IntoResponse {
    if let Err(e) = payload.validate() {
        return (StatusCode::BAD_REQUEST, Json(json!({ "error": e.to_string() })))
            .into_response();
    }
    let report = CrawlRunner::new(settings).linkedin_jobs(payload).await;
    (StatusCode::OK, Json(report)).into_response()
}

/// 处理 LinkedIn 公司搜索请求
pub async fn linkedin_companies(
    Extension(settings): Extension<Arc<Settings>>,
    Json(payload): Json<CompanySearchRequestDto>,
) -> impl IntoResponse {
    if let Err(e) = payload.validate() {
        return (StatusCode::BAD_REQUEST, Json(json!({ "error": e.to_string() })))
            .into_response();
    }
    let report = CrawlRunner::new(settings).linkedin_companies(payload).await;
    (StatusCode::OK, Json(report)).into_response()
}

/// 处理 LinkedIn 人员搜索请求
pub async fn linkedin_people(
    Extension(settings): Extension<Arc<Settings>>,
    Json(payload): Json<PeopleSearchRequestDto>,
) -> impl IntoResponse {
    if let Err(e) = payload.validate() {
        return (StatusCode::BAD_REQUEST, Json(json!({ "error": e.to_string() })))
            .into_response();
    }
    let report = CrawlRunner::new(settings).linkedin_people(payload).await;
    (StatusCode::OK, Json(report)).into_response()
}

/// 处理 Google Jobs 搜索请求
pub async fn google_jobs(
    Extension(settings): Extension<Arc<Settings>>,
    Json(payload): Json<JobSearchRequestDto>,
) -> impl IntoResponse {
    if let Err(e) = payload.validate() {
        return (StatusCode::BAD_REQUEST, Json(json!({ "error": e.to_string() })))
            .into_response();
    }
    let report = CrawlRunner::new(settings).google_jobs(payload).await;
    (StatusCode::OK, Json(report)).into_response()
}
