// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::CrawlerSettings;
use crate::domain::models::record::{Record, FIELD_FALLBACK};
use crate::domain::services::crawl_loop::{BatchOutcome, RecordSource};
use crate::engines::behavior::HumanBehavior;
use crate::infrastructure::targets::dom;
use crate::utils::errors::NavigationError;
use async_trait::async_trait;
use chromiumoxide::Page;
use tracing::{debug, info};

const RESULTS_LIST_SELECTOR: &str = "ul[role='list'].list-style-none";
const RESULTS_ITEM_SELECTOR: &str = "ul[role='list'].list-style-none > li";

const NAME_SELECTOR: &str = "span.t-16";
const LOCATION_SELECTOR: &str = "div.t-14.t-black";
const INFO_SELECTOR: &str = "div.t-12.t-black";
const LINK_SELECTOR: &str = "a[data-test-app-aware-link]";
const NEXT_BUTTON_SELECTOR: &str = r#"button[aria-label="Next"]"#;

/// 公司搜索查询
#[derive(Debug, Clone)]
pub struct CompaniesQuery {
    pub keyword: String,
}

impl CompaniesQuery {
    pub fn search_url(&self, page_number: u32) -> String {
        format!(
            "https://www.linkedin.com/search/results/companies/?keywords={}&page={}",
            urlencoding::encode(&self.keyword),
            page_number
        )
    }
}

/// LinkedIn 公司数据源
///
/// 页码分页，"下一页"按钮缺失或禁用即视为耗尽
pub struct LinkedInCompaniesSource {
    page: Page,
    behavior: HumanBehavior,
    crawler: CrawlerSettings,
    query: CompaniesQuery,
    page_number: u32,
    exhausted: bool,
}

impl LinkedInCompaniesSource {
    pub fn new(
        page: Page,
        behavior: HumanBehavior,
        crawler: CrawlerSettings,
        query: CompaniesQuery,
    ) -> Self {
        Self {
            page,
            behavior,
            crawler,
            query,
            page_number: 1,
            exhausted: false,
        }
    }

    async fn extract_company(
        &self,
        card: &chromiumoxide::element::Element,
    ) -> Option<Record> {
        // The company name sits in the last t-16 span of the card
        let name = dom::last_text_or(card, NAME_SELECTOR, FIELD_FALLBACK).await;
        if name == FIELD_FALLBACK {
            return None;
        }

        let location = dom::text_or(card, LOCATION_SELECTOR, FIELD_FALLBACK).await;
        let info = dom::text_or(card, INFO_SELECTOR, FIELD_FALLBACK).await;
        let url = dom::attr_or(card, LINK_SELECTOR, "href", FIELD_FALLBACK).await;

        let mut record = Record::new();
        record.set("CompanyName", name);
        record.set("Location", location);
        record.set("Info", info);
        record.set("URL", url);
        record.set("Page", self.page_number.to_string());
        Some(record)
    }

    /// 滚动到底加载"下一页"按钮并检查它是否可用
    async fn has_next_page(&self) -> bool {
        if dom::scroll_to_bottom(&self.page).await.is_err() {
            return false;
        }
        self.behavior.pause(&self.page).await;

        match self.page.find_element(NEXT_BUTTON_SELECTOR).await {
            Ok(button) => {
                let disabled = button
                    .attribute("disabled")
                    .await
                    .ok()
                    .flatten()
                    .is_some();
                !disabled
            }
            Err(_) => false,
        }
    }
}

#[async_trait]
impl RecordSource for LinkedInCompaniesSource {
    fn name(&self) -> &'static str {
        "linkedin_companies"
    }

    async fn next_batch(&mut self) -> Result<BatchOutcome, NavigationError> {
        if self.exhausted {
            return Ok(BatchOutcome::Exhausted);
        }

        let url = self.query.search_url(self.page_number);
        info!(url = %url, page = self.page_number, "Searching companies page");
        dom::goto(&self.page, &url).await?;
        dom::wait_for_selector(&self.page, RESULTS_LIST_SELECTOR, self.crawler.results_wait_ms)
            .await?;
        self.behavior.pause(&self.page).await;

        let elements = dom::find_all(&self.page, RESULTS_ITEM_SELECTOR).await;
        if elements.is_empty() {
            return Ok(BatchOutcome::Exhausted);
        }

        // First and last list items are navigation chrome, not result cards
        let cards = if elements.len() > 2 {
            &elements[1..elements.len() - 1]
        } else {
            &elements[..]
        };

        let mut records = Vec::with_capacity(cards.len());
        for card in cards {
            if let Some(record) = self.extract_company(card).await {
                records.push(record);
            } else {
                debug!("Skipping company card without a name");
            }
        }

        if self.has_next_page().await {
            self.page_number += 1;
        } else {
            debug!(page = self.page_number, "Next button absent or disabled");
            self.exhausted = true;
        }

        Ok(BatchOutcome::Batch(records))
    }
}
