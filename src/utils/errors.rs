// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use thiserror::Error;

/// 认证失败类型
///
/// 两种失败都是终态，同一次爬取内绝不重试
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFailure {
    #[error("Login failed. Check username and password.")]
    Failed,

    #[error("Login checkpoint detected. Manual verification may be required.")]
    CheckpointBlocked,
}

/// 爬取致命错误类型
///
/// 这些错误会在爬取循环开始前短路整个调用，
/// 并以 `status = "error"` 的报告返回给调用方
#[derive(Error, Debug)]
pub enum CrawlError {
    #[error("Session storage error: {0}")]
    Storage(String),

    #[error("Error launching browser: {0}")]
    BrowserLaunch(String),

    #[error("{0}")]
    Authentication(AuthFailure),

    #[error("Browser error: {0}")]
    Browser(String),
}

/// 单次迭代内可恢复的导航/选择器错误
///
/// 不会使爬取失败，只计入停滞计数器
#[derive(Error, Debug)]
pub enum NavigationError {
    #[error("Error navigating to {url}: {message}")]
    Goto { url: String, message: String },

    #[error("Timed out waiting for selector {selector} after {waited_ms}ms")]
    SelectorTimeout { selector: String, waited_ms: u64 },

    #[error("Page interaction failed: {0}")]
    Interaction(String),
}

impl From<chromiumoxide::error::CdpError> for CrawlError {
    fn from(e: chromiumoxide::error::CdpError) -> Self {
        CrawlError::Browser(e.to_string())
    }
}
