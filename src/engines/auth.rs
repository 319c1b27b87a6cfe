// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::auth::AuthState;
use crate::engines::behavior::HumanBehavior;
use crate::utils::errors::{AuthFailure, CrawlError};
use chromiumoxide::Page;
use tracing::info;

pub const FEED_URL: &str = "https://www.linkedin.com/feed/";
pub const LOGIN_URL: &str = "https://www.linkedin.com/login";

const EMAIL_SELECTOR: &str = "input[type=email]";
const PASSWORD_SELECTOR: &str = "input[type=password]";
const SUBMIT_SELECTOR: &str = "button[type=submit]";

/// URL 片段标记：仍在登录墙 / 触发了人机校验
const LOGIN_MARKER: &str = "login";
const CHECKPOINT_MARKER: &str = "checkpoint";

/// 登录凭据
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// 根据提交后落地的 URL 判定认证结果
///
/// checkpoint 页面优先于登录页判定：LinkedIn 的校验 URL
/// 同时包含两种片段时按 checkpoint 处理
pub fn classify_landing_url(url: &str) -> AuthState {
    if url.contains(CHECKPOINT_MARKER) {
        AuthState::CheckpointBlocked
    } else if url.contains(LOGIN_MARKER) {
        AuthState::Failed
    } else {
        AuthState::Authenticated
    }
}

/// 确保页面处于已认证状态
///
/// 协议：
/// 1. 导航到 feed 页探测当前状态；
/// 2. 落在登录墙则转到登录页，交替执行表单填写与行为模拟，提交；
/// 3. 按提交后 URL 分类：checkpoint → `CheckpointBlocked`，
///    仍在登录页 → `Failed`，feed → `Authenticated`。
///
/// 每次爬取调用恰好一次认证尝试；两种失败都立即中止爬取，
/// 不做重试
pub async fn ensure_authenticated(
    page: &Page,
    credentials: &Credentials,
    behavior: &HumanBehavior,
) -> Result<AuthState, CrawlError> {
    page.goto(FEED_URL)
        .await
        .map_err(|e| CrawlError::Browser(format!("Error during login: {}", e)))?;
    behavior.pause(page).await;

    let current = current_url(page).await?;
    if !current.contains(LOGIN_MARKER) {
        info!("Session already authenticated");
        return Ok(AuthState::Authenticated);
    }

    info!("User not logged in, attempting login");
    page.goto(LOGIN_URL)
        .await
        .map_err(|e| CrawlError::Browser(format!("Error during login: {}", e)))?;
    behavior.pause(page).await;

    fill(page, EMAIL_SELECTOR, &credentials.username).await?;
    behavior.pause(page).await;
    fill(page, PASSWORD_SELECTOR, &credentials.password).await?;
    behavior.pause(page).await;

    page.find_element(SUBMIT_SELECTOR)
        .await
        .map_err(|e| CrawlError::Browser(format!("Login submit not found: {}", e)))?
        .click()
        .await
        .map_err(|e| CrawlError::Browser(format!("Error during login: {}", e)))?;
    behavior.pause(page).await;
    let _ = page.wait_for_navigation().await;

    let landed = current_url(page).await?;
    match classify_landing_url(&landed) {
        AuthState::CheckpointBlocked => Err(CrawlError::Authentication(
            AuthFailure::CheckpointBlocked,
        )),
        AuthState::Failed => Err(CrawlError::Authentication(AuthFailure::Failed)),
        state => {
            info!("Login completed");
            Ok(state)
        }
    }
}

async fn fill(page: &Page, selector: &str, value: &str) -> Result<(), CrawlError> {
    page.find_element(selector)
        .await
        .map_err(|e| CrawlError::Browser(format!("Login field {} not found: {}", selector, e)))?
        .click()
        .await
        .map_err(|e| CrawlError::Browser(format!("Error during login: {}", e)))?
        .type_str(value)
        .await
        .map_err(|e| CrawlError::Browser(format!("Error during login: {}", e)))?;
    Ok(())
}

async fn current_url(page: &Page) -> Result<String, CrawlError> {
    Ok(page
        .url()
        .await
        .map_err(|e| CrawlError::Browser(e.to_string()))?
        .unwrap_or_default())
}
