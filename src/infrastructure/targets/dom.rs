// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::utils::errors::NavigationError;
use chromiumoxide::element::Element;
use chromiumoxide::Page;
use std::time::{Duration, Instant};

const POLL_INTERVAL_MS: u64 = 250;

/// 导航到目标 URL，失败归类为可恢复的迭代错误
pub async fn goto(page: &Page, url: &str) -> Result<(), NavigationError> {
    page.goto(url).await.map_err(|e| NavigationError::Goto {
        url: url.to_string(),
        message: e.to_string(),
    })?;
    Ok(())
}

/// 轮询等待选择器出现，有界超时
pub async fn wait_for_selector(
    page: &Page,
    selector: &str,
    timeout_ms: u64,
) -> Result<(), NavigationError> {
    let deadline = Instant::now() + Duration::from_millis(timeout_ms);
    loop {
        if page.find_element(selector).await.is_ok() {
            return Ok(());
        }
        if Instant::now() >= deadline {
            return Err(NavigationError::SelectorTimeout {
                selector: selector.to_string(),
                waited_ms: timeout_ms,
            });
        }
        tokio::time::sleep(Duration::from_millis(POLL_INTERVAL_MS)).await;
    }
}

/// 查询当前渲染出的全部结果元素，查询失败按零结果处理
pub async fn find_all(page: &Page, selector: &str) -> Vec<Element> {
    page.find_elements(selector).await.unwrap_or_default()
}

/// 在元素范围内定位子元素文本，缺失时取回退值
pub async fn text_or(scope: &Element, selector: &str, fallback: &str) -> String {
    match scope.find_element(selector).await {
        Ok(el) => element_text(&el).await.unwrap_or_else(|| fallback.to_string()),
        Err(_) => fallback.to_string(),
    }
}

/// 同 [`text_or`]，但取匹配集中的最后一个元素
pub async fn last_text_or(scope: &Element, selector: &str, fallback: &str) -> String {
    match scope.find_elements(selector).await {
        Ok(els) => match els.last() {
            Some(el) => element_text(el).await.unwrap_or_else(|| fallback.to_string()),
            None => fallback.to_string(),
        },
        Err(_) => fallback.to_string(),
    }
}

/// 在元素范围内定位子元素属性，缺失时取回退值
pub async fn attr_or(scope: &Element, selector: &str, attr: &str, fallback: &str) -> String {
    match scope.find_element(selector).await {
        Ok(el) => el
            .attribute(attr)
            .await
            .ok()
            .flatten()
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| fallback.to_string()),
        Err(_) => fallback.to_string(),
    }
}

/// 页面级文本查询，缺失时取回退值
pub async fn page_text_or(page: &Page, selector: &str, fallback: &str) -> String {
    match page.find_element(selector).await {
        Ok(el) => element_text(&el).await.unwrap_or_else(|| fallback.to_string()),
        Err(_) => fallback.to_string(),
    }
}

async fn element_text(el: &Element) -> Option<String> {
    el.inner_text()
        .await
        .ok()
        .flatten()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}

/// 当前页面高度，用于无限滚动的到底判定
pub async fn scroll_height(page: &Page) -> Option<i64> {
    page.evaluate("document.body.scrollHeight")
        .await
        .ok()
        .and_then(|v| v.into_value::<i64>().ok())
}

/// 滚动到页面底部
pub async fn scroll_to_bottom(page: &Page) -> Result<(), NavigationError> {
    page.evaluate("window.scrollTo(0, document.body.scrollHeight)")
        .await
        .map_err(|e| NavigationError::Interaction(format!("scroll failed: {}", e)))?;
    Ok(())
}

/// 相对链接补全为绝对 LinkedIn URL
pub fn absolute_linkedin_url(href: &str) -> String {
    if href.starts_with("http") {
        href.to_string()
    } else {
        format!("https://www.linkedin.com{}", href)
    }
}
