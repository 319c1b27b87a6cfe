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
const TITLE_SELECTOR: &str = "div.t-14.t-black";
const LINK_SELECTOR: &str = "a[data-test-app-aware-link]";

/// 人员搜索的页数上界
const MAX_PEOPLE_PAGES: u32 = 19;

/// 值得保留的职位头衔关键词
const IMPORTANT_POSITIONS: &[&str] = &[
    "CEO", "CTO", "CFO", "COO", "Director", "Manager", "Lead", "Head", "Founder", "President",
];

/// 头衔是否属于重要职位
pub fn is_important_position(title: &str) -> bool {
    let lower = title.to_lowercase();
    IMPORTANT_POSITIONS
        .iter()
        .any(|p| lower.contains(&p.to_lowercase()))
}

/// 人员搜索查询
#[derive(Debug, Clone)]
pub struct PeopleQuery {
    /// 以公司名作为关键词检索其员工
    pub company: String,
}

impl PeopleQuery {
    pub fn search_url(&self, page_number: u32) -> String {
        format!(
            "https://www.linkedin.com/search/results/people/?keywords={}&origin=GLOBAL_SEARCH_HEADER&page={}",
            urlencoding::encode(&self.company),
            page_number
        )
    }
}

/// LinkedIn 人员数据源
///
/// 页码分页，只保留重要职位的人员记录
pub struct LinkedInPeopleSource {
    page: Page,
    behavior: HumanBehavior,
    crawler: CrawlerSettings,
    query: PeopleQuery,
    page_number: u32,
}

impl LinkedInPeopleSource {
    pub fn new(
        page: Page,
        behavior: HumanBehavior,
        crawler: CrawlerSettings,
        query: PeopleQuery,
    ) -> Self {
        Self {
            page,
            behavior,
            crawler,
            query,
            page_number: 1,
        }
    }

    async fn extract_person(
        &self,
        card: &chromiumoxide::element::Element,
    ) -> Option<Record> {
        let raw_name = dom::text_or(card, NAME_SELECTOR, "").await;
        // The span repeats the name with a "View profile" suffix on its own line
        let name = raw_name.lines().next().unwrap_or("").trim().to_string();
        if name.is_empty() {
            return None;
        }
        // Promoted "LinkedIn Member" rows carry no usable profile
        if name.contains("LinkedIn") {
            return None;
        }

        let title = dom::text_or(card, TITLE_SELECTOR, FIELD_FALLBACK).await;
        if !is_important_position(&title) {
            return None;
        }

        let profile_url = dom::attr_or(card, LINK_SELECTOR, "href", FIELD_FALLBACK).await;

        let mut record = Record::new();
        record.set("Name", name);
        record.set("Title", title);
        record.set("Company", self.query.company.clone());
        record.set("ProfileURL", profile_url);
        record.set("Email", FIELD_FALLBACK);
        Some(record)
    }
}

#[async_trait]
impl RecordSource for LinkedInPeopleSource {
    fn name(&self) -> &'static str {
        "linkedin_people"
    }

    async fn next_batch(&mut self) -> Result<BatchOutcome, NavigationError> {
        if self.page_number > MAX_PEOPLE_PAGES {
            return Ok(BatchOutcome::Exhausted);
        }

        let url = self.query.search_url(self.page_number);
        info!(url = %url, page = self.page_number, "Searching people page");
        dom::goto(&self.page, &url).await?;
        dom::wait_for_selector(&self.page, RESULTS_LIST_SELECTOR, self.crawler.results_wait_ms)
            .await?;
        self.behavior.pause(&self.page).await;

        let elements = dom::find_all(&self.page, RESULTS_ITEM_SELECTOR).await;
        if elements.is_empty() {
            return Ok(BatchOutcome::Exhausted);
        }

        let mut records = Vec::new();
        for card in &elements {
            if let Some(record) = self.extract_person(card).await {
                debug!(
                    name = record.get("Name"),
                    title = record.get("Title"),
                    "Found important employee"
                );
                records.push(record);
            }
        }

        self.page_number += 1;
        Ok(BatchOutcome::Batch(records))
    }
}
