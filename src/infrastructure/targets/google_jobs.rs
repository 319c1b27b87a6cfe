// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::CrawlerSettings;
use crate::domain::models::record::Record;
use crate::domain::services::crawl_loop::{BatchOutcome, RecordSource};
use crate::domain::services::posted_age;
use crate::engines::behavior::HumanBehavior;
use crate::infrastructure::targets::dom;
use crate::utils::errors::NavigationError;
use async_trait::async_trait;
use chromiumoxide::element::Element;
use chromiumoxide::Page;
use std::time::Duration;
use tracing::{debug, info};

const MAIN_SELECTOR: &str = r#"div[role="main"]"#;
const ITEM_SELECTOR: &str = r#"div[data-id="jobs-detail-viewer"] div[jscontroller]"#;

const TITLE_SELECTOR: &str = r#"div[class*="tNxQIb"]"#;
const COMPANY_SELECTOR: &str = "div.wHYlTd.MKCbgd.a3jPc";
const LOCATION_SELECTOR: &str = "div.wHYlTd.FqK3wc.MKCbgd";
const AGE_CONTAINER_SELECTOR: &str = "div.ApHyTb.ncqQR";
const AGE_SPAN_SELECTOR: &str = "span[aria-label]";

const DETAIL_PANEL_SELECTOR: &str = r#"div[class*="NgUYpe"]"#;
const DETAIL_DESCRIPTION_SELECTOR: &str = r#"span[class*="hkXmid"]"#;
const DETAIL_APPLY_LINK_SELECTOR: &str =
    r#"a[class*="nNzjpf-cS4Vcb-PvZLI-Ueh9jd-LgbsSe-Jyewjb-tlSJBe"]"#;

/// 滚动后等待新内容渲染的缓冲时间
const SCROLL_SETTLE_MS: u64 = 2000;

/// Google Jobs 搜索查询
#[derive(Debug, Clone)]
pub struct GoogleJobsQuery {
    pub keyword: String,
    pub location: Option<String>,
    pub days_ago: Option<u32>,
}

impl GoogleJobsQuery {
    pub fn search_url(&self) -> String {
        let q = match &self.location {
            Some(location) if !location.is_empty() => {
                format!("{} in {}", self.keyword, location)
            }
            _ => self.keyword.clone(),
        };
        format!(
            "https://www.google.com/search?q={}&ibp=htl;jobs",
            urlencoding::encode(&q)
        )
    }
}

/// 从外部投递链接推导来源站点名
///
/// 取主机名中第一个非 www 的标签，如
/// `https://www.glassdoor.com/...` → `glassdoor`
pub fn source_domain(job_url: &str) -> String {
    url::Url::parse(job_url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .and_then(|host| {
            host.split('.')
                .find(|label| !label.is_empty() && *label != "www")
                .map(str::to_string)
        })
        .unwrap_or_default()
}

/// Google Jobs 数据源
///
/// 无限滚动：每次推进滚动到底并比较前后页面高度，
/// 高度不再变化即到底。批与批之间的重叠元素交给聚合器按键去重。
pub struct GoogleJobsSource {
    page: Page,
    behavior: HumanBehavior,
    crawler: CrawlerSettings,
    query: GoogleJobsQuery,
    opened: bool,
}

impl GoogleJobsSource {
    pub fn new(
        page: Page,
        behavior: HumanBehavior,
        crawler: CrawlerSettings,
        query: GoogleJobsQuery,
    ) -> Self {
        Self {
            page,
            behavior,
            crawler,
            query,
            opened: false,
        }
    }

    async fn open(&mut self) -> Result<(), NavigationError> {
        self.behavior.pause(&self.page).await;
        let url = self.query.search_url();
        info!(url = %url, "Navigating to search URL");
        dom::goto(&self.page, &url).await?;
        dom::wait_for_selector(&self.page, MAIN_SELECTOR, self.crawler.results_wait_ms).await?;
        self.opened = true;
        Ok(())
    }

    /// 卡片上的发布时间 span，缺失或不可解析时取哨兵值
    async fn card_age_days(&self, card: &Element) -> u32 {
        if let Ok(container) = card.find_element(AGE_CONTAINER_SELECTOR).await {
            if let Ok(span) = container.find_element(AGE_SPAN_SELECTOR).await {
                if let Ok(Some(text)) = span.inner_text().await {
                    return posted_age::parse_age_days(&text);
                }
            }
        }
        posted_age::UNKNOWN_AGE_DAYS
    }

    async fn extract_job(&self, card: &Element) -> Option<Record> {
        let title = dom::text_or(card, TITLE_SELECTOR, "").await;
        if title.is_empty() {
            debug!("Title element not found for a job");
            return None;
        }

        let company = dom::text_or(card, COMPANY_SELECTOR, "").await;
        let location = dom::text_or(card, LOCATION_SELECTOR, "").await;

        // Recency filter runs before the expensive detail click-through
        let age_days = self.card_age_days(card).await;
        if !posted_age::within_recency(age_days, self.query.days_ago) {
            debug!(title = %title, age_days, "Job outside recency window");
            return None;
        }

        let mut record = Record::new();
        record.set("JobTitle", self.query.keyword.clone());
        record.set("Location", location);
        record.set("Title", title.clone());
        record.set("URL", "");
        record.set("Source", "");
        record.set("PostedDate", posted_age::posted_date_from_age(age_days));
        record.set("Snippet", "");
        record.set("CompanyName", company);

        // Detail view is a best-effort sub-step: on any failure the record
        // keeps its empty detail fields
        if let Err(e) = self.fill_details(card, &mut record).await {
            debug!(title = %title, error = %e, "Error processing job details");
        }

        Some(record)
    }

    async fn fill_details(&self, card: &Element, record: &mut Record) -> Result<(), String> {
        let company_el = card
            .find_element(COMPANY_SELECTOR)
            .await
            .map_err(|e| e.to_string())?;
        company_el.click().await.map_err(|e| e.to_string())?;
        self.behavior.pause(&self.page).await;
        tokio::time::sleep(Duration::from_millis(1000)).await;

        let panel = self
            .page
            .find_element(DETAIL_PANEL_SELECTOR)
            .await
            .map_err(|e| e.to_string())?;
        let description = dom::text_or(&panel, DETAIL_DESCRIPTION_SELECTOR, "").await;
        record.set("Snippet", description);

        let job_url = match self.page.find_element(DETAIL_APPLY_LINK_SELECTOR).await {
            Ok(link) => link.attribute("href").await.ok().flatten().unwrap_or_default(),
            Err(_) => String::new(),
        };
        if !job_url.is_empty() {
            record.set("Source", source_domain(&job_url));
            record.set("URL", job_url);
        }
        Ok(())
    }
}

#[async_trait]
impl RecordSource for GoogleJobsSource {
    fn name(&self) -> &'static str {
        "google_jobs"
    }

    async fn next_batch(&mut self) -> Result<BatchOutcome, NavigationError> {
        if !self.opened {
            // First batch reads whatever rendered on load, scrolling starts
            // from the second batch onward
            self.open().await?;
        } else {
            let before = dom::scroll_height(&self.page).await;
            dom::scroll_to_bottom(&self.page).await?;
            self.behavior.pause(&self.page).await;
            tokio::time::sleep(Duration::from_millis(SCROLL_SETTLE_MS)).await;
            let after = dom::scroll_height(&self.page).await;

            if before.is_some() && before == after {
                info!("Reached bottom of page - No more content to load");
                return Ok(BatchOutcome::Exhausted);
            }
        }

        dom::wait_for_selector(&self.page, ITEM_SELECTOR, self.crawler.fallback_wait_ms).await?;
        let elements = dom::find_all(&self.page, ITEM_SELECTOR).await;
        debug!(found = elements.len(), "Found job elements on current page");
        if elements.is_empty() {
            return Ok(BatchOutcome::Exhausted);
        }

        let mut records = Vec::new();
        for card in &elements {
            if let Some(record) = self.extract_job(card).await {
                records.push(record);
            }
        }
        Ok(BatchOutcome::Batch(records))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_url_joins_keyword_and_location() {
        let query = GoogleJobsQuery {
            keyword: "data engineer".to_string(),
            location: Some("Ho Chi Minh City".to_string()),
            days_ago: None,
        };
        assert_eq!(
            query.search_url(),
            "https://www.google.com/search?q=data%20engineer%20in%20Ho%20Chi%20Minh%20City&ibp=htl;jobs"
        );
    }

    #[test]
    fn test_search_url_without_location() {
        let query = GoogleJobsQuery {
            keyword: "data engineer".to_string(),
            location: None,
            days_ago: None,
        };
        assert!(query
            .search_url()
            .starts_with("https://www.google.com/search?q=data%20engineer&ibp="));
    }

    #[test]
    fn test_source_domain_skips_www() {
        assert_eq!(
            source_domain("https://www.glassdoor.com/job/123"),
            "glassdoor"
        );
        assert_eq!(source_domain("https://careers.acme.io/openings/1"), "careers");
        assert_eq!(source_domain("not a url"), "");
    }
}
