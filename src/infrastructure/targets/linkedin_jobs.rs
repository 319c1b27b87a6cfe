// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::CrawlerSettings;
use crate::domain::models::record::{Record, FIELD_FALLBACK};
use crate::domain::services::crawl_loop::{BatchOutcome, RecordSource};
use crate::domain::services::posted_age;
use crate::engines::behavior::HumanBehavior;
use crate::infrastructure::targets::dom;
use crate::utils::errors::NavigationError;
use async_trait::async_trait;
use chromiumoxide::element::Element;
use chromiumoxide::Page;
use tracing::{debug, info};

/// 职位列表容器与卡片选择器，针对 LinkedIn 当前渲染的 DOM，
/// 随站点版本漂移，不是本系统可控的契约
const RESULTS_SELECTOR: &str = r#"div[class*="scaffold-layout__list"] li[id*="ember"]"#;
const RESULTS_CONTAINER_FALLBACK: &str = "div.jobs-search-results-list";
const RESULTS_ITEM_FALLBACK: &str = "li.jobs-search-results__list-item";

const TITLE_SELECTOR: &str = r#"div[dir="ltr"] > span[aria-hidden="true"] > strong"#;
const COMPANY_SELECTOR: &str = r#"div[class*="subtitle"] div[dir="ltr"]"#;
const CARD_LOCATION_SELECTOR: &str = "div.artdeco-entity-lockup__caption";
const CARD_LINK_SELECTOR: &str = r#"a[class*="card-wrapper__card-link"]"#;

const DETAIL_WRAPPER_SELECTOR: &str = r#"div[class*="jobs-search__job-details--wrapper"]"#;
const DETAIL_DESCRIPTION_SELECTOR: &str = r#"div[class*="jobs-description__content"]"#;
const DETAIL_TERTIARY_SELECTOR: &str =
    "div.job-details-jobs-unified-top-card__tertiary-description-container";
const DETAIL_TIME_SPAN_SELECTOR: &str = r#"span[class*="tvm__text"]"#;

/// LinkedIn 每页通常渲染的职位数
const PAGE_SIZE_HINT: usize = 25;

/// 职位搜索查询
///
/// 时效过滤走服务端的 `f_TPR` 参数，所有过滤器只在请求里
/// 出现时才追加到 URL
#[derive(Debug, Clone)]
pub struct JobsQuery {
    pub keyword: String,
    pub location: Option<String>,
    pub days_ago: Option<u32>,
    pub sort_by: Option<String>,
    pub experience_levels: Vec<u32>,
    pub company_ids: Vec<String>,
    pub job_types: Vec<String>,
    pub remote: bool,
    pub industry_ids: Vec<String>,
}

impl JobsQuery {
    /// 按 LinkedIn 的查询参数编码组装搜索 URL
    pub fn search_url(&self, start: usize) -> String {
        let mut url = format!(
            "https://www.linkedin.com/jobs/search/?keywords={}&start={}",
            urlencoding::encode(&self.keyword),
            start
        );

        if let Some(location) = &self.location {
            url.push_str(&format!("&location={}", urlencoding::encode(location)));
        }
        if let Some(days) = self.days_ago {
            // f_TPR takes the window in seconds
            url.push_str(&format!("&f_TPR=r{}", u64::from(days) * 86_400));
        }
        if let Some(sort_by) = &self.sort_by {
            url.push_str(&format!("&sortBy={}", sort_by));
        }
        if !self.experience_levels.is_empty() {
            let levels: Vec<String> = self
                .experience_levels
                .iter()
                .map(u32::to_string)
                .collect();
            url.push_str(&format!("&f_E={}", levels.join(",")));
        }
        if !self.company_ids.is_empty() {
            url.push_str(&format!("&f_C={}", self.company_ids.join(",")));
        }
        if !self.job_types.is_empty() {
            url.push_str(&format!("&f_JT={}", self.job_types.join(",")));
        }
        if self.remote {
            // 2 is LinkedIn's code for remote work
            url.push_str("&f_WT=2");
        }
        if !self.industry_ids.is_empty() {
            url.push_str(&format!("&f_I={}", self.industry_ids.join(",")));
        }

        url
    }
}

/// LinkedIn 职位数据源
///
/// 按 `start` 偏移分页；每批先从卡片提取基础字段，再点进
/// 右侧详情面板读取描述与发布时间（尽力而为的子步骤）
pub struct LinkedInJobsSource {
    page: Page,
    behavior: HumanBehavior,
    crawler: CrawlerSettings,
    query: JobsQuery,
    start_offset: usize,
}

impl LinkedInJobsSource {
    pub fn new(
        page: Page,
        behavior: HumanBehavior,
        crawler: CrawlerSettings,
        query: JobsQuery,
    ) -> Self {
        Self {
            page,
            behavior,
            crawler,
            query,
            start_offset: 0,
        }
    }

    async fn extract_job(&self, card: &Element) -> Option<Record> {
        // Title is the required field: a card without one is not a record
        let title = dom::text_or(card, TITLE_SELECTOR, "").await;
        if title.is_empty() {
            return None;
        }

        // Opening the detail panel is part of extraction, not a hard dependency
        if let Ok(el) = card.find_element(TITLE_SELECTOR).await {
            match el.click().await {
                Ok(_) => self.behavior.pause(&self.page).await,
                Err(e) => debug!(error = %e, "Error clicking job card"),
            }
        }

        let company = dom::text_or(card, COMPANY_SELECTOR, FIELD_FALLBACK).await;
        let location = dom::text_or(card, CARD_LOCATION_SELECTOR, FIELD_FALLBACK).await;
        let mut job_url = dom::attr_or(card, CARD_LINK_SELECTOR, "href", "").await;
        if !job_url.is_empty() {
            job_url = dom::absolute_linkedin_url(&job_url);
        }

        let description = self.detail_description().await;
        let posted_date = self.detail_posted_date().await;

        let requested_location = self.query.location.clone().unwrap_or_default();
        let mut record = Record::new();
        record.set("JobTitle", self.query.keyword.clone());
        record.set(
            "LocationDetail",
            if location != FIELD_FALLBACK {
                location
            } else {
                requested_location.clone()
            },
        );
        record.set("Location", requested_location);
        record.set("Title", title);
        record.set("URL", job_url);
        record.set("Source", "linkedin");
        record.set("PostedDate", posted_date);
        record.set("Snippet", description);
        record.set(
            "CompanyName",
            if company != FIELD_FALLBACK {
                company
            } else {
                "Unknown Company".to_string()
            },
        );
        Some(record)
    }

    /// 详情面板的职位描述，失败时保留空字段而不是丢弃记录
    async fn detail_description(&self) -> String {
        match self.page.find_element(DETAIL_WRAPPER_SELECTOR).await {
            Ok(wrapper) => dom::text_or(&wrapper, DETAIL_DESCRIPTION_SELECTOR, "").await,
            Err(_) => {
                debug!("Job description wrapper element not found");
                String::new()
            }
        }
    }

    /// 从详情面板的描述 span 里找出发布时间并折算为日期
    async fn detail_posted_date(&self) -> String {
        let mut texts = Vec::new();
        if let Ok(container) = self.page.find_element(DETAIL_TERTIARY_SELECTOR).await {
            let spans = container
                .find_elements(DETAIL_TIME_SPAN_SELECTOR)
                .await
                .unwrap_or_default();
            for span in spans {
                if let Ok(Some(text)) = span.inner_text().await {
                    texts.push(text);
                }
            }
        }
        posted_date_from_span_texts(texts.iter().map(String::as_str))
    }
}

/// 在描述 span 文本里挑出发布时间并折算为日期
///
/// 没有任何时间样式的文本时返回回退值；找到时间样式但解析
/// 失败时才退到今天的日期
fn posted_date_from_span_texts<'a>(texts: impl IntoIterator<Item = &'a str>) -> String {
    for text in texts {
        let text = text.trim();
        if posted_age::looks_like_age(text) {
            let age = posted_age::parse_age_days(text);
            return posted_age::posted_date_from_age(age);
        }
    }
    FIELD_FALLBACK.to_string()
}

#[async_trait]
impl RecordSource for LinkedInJobsSource {
    fn name(&self) -> &'static str {
        "linkedin_jobs"
    }

    async fn next_batch(&mut self) -> Result<BatchOutcome, NavigationError> {
        let url = self.query.search_url(self.start_offset);
        info!(url = %url, "Searching jobs page");
        dom::goto(&self.page, &url).await?;

        if let Err(primary) =
            dom::wait_for_selector(&self.page, RESULTS_SELECTOR, self.crawler.results_wait_ms)
                .await
        {
            // One fallback container before treating the page as unusable
            dom::wait_for_selector(
                &self.page,
                RESULTS_CONTAINER_FALLBACK,
                self.crawler.fallback_wait_ms,
            )
            .await
            .map_err(|_| primary)?;
        }
        self.behavior.pause(&self.page).await;

        let mut elements = dom::find_all(&self.page, RESULTS_SELECTOR).await;
        if elements.is_empty() {
            elements = dom::find_all(&self.page, RESULTS_ITEM_FALLBACK).await;
        }
        if elements.is_empty() {
            return Ok(BatchOutcome::Exhausted);
        }

        // Advance the offset by what actually rendered, not the nominal page size
        self.start_offset += elements.len().max(1);
        debug!(
            found = elements.len(),
            next_start = self.start_offset,
            hint = PAGE_SIZE_HINT,
            "Found job cards"
        );

        let mut records = Vec::with_capacity(elements.len());
        for element in &elements {
            if let Some(record) = self.extract_job(element).await {
                records.push(record);
            }
        }
        Ok(BatchOutcome::Batch(records))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_query() -> JobsQuery {
        JobsQuery {
            keyword: "rust engineer".to_string(),
            location: None,
            days_ago: None,
            sort_by: None,
            experience_levels: Vec::new(),
            company_ids: Vec::new(),
            job_types: Vec::new(),
            remote: false,
            industry_ids: Vec::new(),
        }
    }

    #[test]
    fn test_minimal_url_has_only_keyword_and_start() {
        let url = base_query().search_url(0);
        assert_eq!(
            url,
            "https://www.linkedin.com/jobs/search/?keywords=rust%20engineer&start=0"
        );
    }

    #[test]
    fn test_days_ago_becomes_seconds_window() {
        let mut query = base_query();
        query.days_ago = Some(7);
        assert!(query.search_url(0).contains("&f_TPR=r604800"));
    }

    #[test]
    fn test_all_filters_are_appended_when_present() {
        let query = JobsQuery {
            keyword: "engineer".to_string(),
            location: Some("Ho Chi Minh City".to_string()),
            days_ago: Some(1),
            sort_by: Some("DD".to_string()),
            experience_levels: vec![2, 3, 4],
            company_ids: vec!["1337".to_string(), "1441".to_string()],
            job_types: vec!["F".to_string(), "C".to_string()],
            remote: true,
            industry_ids: vec!["4".to_string()],
        };
        let url = query.search_url(25);
        assert!(url.contains("keywords=engineer"));
        assert!(url.contains("start=25"));
        assert!(url.contains("&location=Ho%20Chi%20Minh%20City"));
        assert!(url.contains("&f_TPR=r86400"));
        assert!(url.contains("&sortBy=DD"));
        assert!(url.contains("&f_E=2,3,4"));
        assert!(url.contains("&f_C=1337,1441"));
        assert!(url.contains("&f_JT=F,C"));
        assert!(url.contains("&f_WT=2"));
        assert!(url.contains("&f_I=4"));
    }

    #[test]
    fn test_posted_date_resolves_first_time_span() {
        let expected = (chrono::Utc::now() - chrono::Duration::days(3))
            .format("%Y-%m-%d")
            .to_string();
        let date = posted_date_from_span_texts(["51 applicants", "Reposted 3 days ago"]);
        assert_eq!(date, expected);
    }

    #[test]
    fn test_posted_date_without_time_span_is_fallback() {
        assert_eq!(
            posted_date_from_span_texts(["Hybrid", "Full-time", "51 applicants"]),
            FIELD_FALLBACK
        );
        assert_eq!(posted_date_from_span_texts(Vec::<&str>::new()), FIELD_FALLBACK);
    }

    #[test]
    fn test_unparseable_time_span_falls_back_to_today() {
        let today = chrono::Utc::now().format("%Y-%m-%d").to_string();
        assert_eq!(posted_date_from_span_texts(["Posted recently"]), today);
    }

    #[test]
    fn test_absent_filters_are_not_appended() {
        let url = base_query().search_url(0);
        for param in ["location", "f_TPR", "sortBy", "f_E", "f_C", "f_JT", "f_WT", "f_I"] {
            assert!(!url.contains(param), "unexpected param {} in {}", param, url);
        }
    }
}
