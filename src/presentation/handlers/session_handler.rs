// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use std::sync::Arc;

use crate::{application::use_cases::run_crawl::CrawlRunner, config::settings::Settings};

/// 查询某个用户是否已有会话目录
pub async fn check_session(
    Extension(settings): Extension<Arc<Settings>>,
    Path(username): Path<String>,
) -> impl IntoResponse {
    let exists = CrawlRunner::new(settings).session_exists(&username);
    (StatusCode::OK, Json(json!({ "exists": exists })))
}
