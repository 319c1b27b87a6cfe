// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 爬取编排用例
//!
//! 每次调用独立执行：解析会话目录 → 启动浏览器 → （LinkedIn）认证 →
//! 构造数据源 → 运行采集循环。浏览器在所有退出路径上都被关闭，
//! 致命错误统一折叠为错误报告而不是向调用方抛出

use crate::{
    application::dto::crawl_request::{
        CompanySearchRequestDto, JobSearchRequestDto, PeopleSearchRequestDto,
    },
    config::settings::Settings,
    domain::{
        models::report::CrawlReport,
        services::{aggregator::ResultAggregator, crawl_loop::CrawlLoop},
    },
    engines::{
        auth::{ensure_authenticated, Credentials},
        behavior::HumanBehavior,
        session::{SessionBrowser, SessionStore},
    },
    infrastructure::targets::{
        google_jobs::{GoogleJobsQuery, GoogleJobsSource},
        linkedin_companies::{CompaniesQuery, LinkedInCompaniesSource},
        linkedin_jobs::{JobsQuery, LinkedInJobsSource},
        linkedin_people::{LinkedInPeopleSource, PeopleQuery},
    },
    utils::errors::CrawlError,
};
use std::sync::Arc;
use tracing::{error, info, Instrument};
use uuid::Uuid;

/// 爬取运行器
///
/// 持有全局配置，按请求派发到具体目标
#[derive(Clone)]
pub struct CrawlRunner {
    settings: Arc<Settings>,
}

impl CrawlRunner {
    pub fn new(settings: Arc<Settings>) -> Self {
        Self { settings }
    }

    /// 检查某个用户的会话目录是否已存在
    pub fn session_exists(&self, username: &str) -> bool {
        SessionStore::new(&self.settings.session.root).exists(username)
    }

    pub async fn linkedin_jobs(&self, request: JobSearchRequestDto) -> CrawlReport {
        let span = crawl_span("linkedin_jobs");
        async move {
            let browser = match self.launch(&request.username).await {
                Ok(browser) => browser,
                Err(e) => return fatal(e),
            };
            let outcome = self.linkedin_jobs_inner(&browser, &request).await;
            browser.close().await;
            outcome.unwrap_or_else(fatal)
        }
        .instrument(span)
        .await
    }

    pub async fn linkedin_companies(&self, request: CompanySearchRequestDto) -> CrawlReport {
        let span = crawl_span("linkedin_companies");
        async move {
            let browser = match self.launch(&request.username).await {
                Ok(browser) => browser,
                Err(e) => return fatal(e),
            };
            let outcome = self.linkedin_companies_inner(&browser, &request).await;
            browser.close().await;
            outcome.unwrap_or_else(fatal)
        }
        .instrument(span)
        .await
    }

    pub async fn linkedin_people(&self, request: PeopleSearchRequestDto) -> CrawlReport {
        let span = crawl_span("linkedin_people");
        async move {
            let browser = match self.launch(&request.username).await {
                Ok(browser) => browser,
                Err(e) => return fatal(e),
            };
            let outcome = self.linkedin_people_inner(&browser, &request).await;
            browser.close().await;
            outcome.unwrap_or_else(fatal)
        }
        .instrument(span)
        .await
    }

    /// Google Jobs 不需要登录，仅复用会话目录保存浏览器状态
    pub async fn google_jobs(&self, request: JobSearchRequestDto) -> CrawlReport {
        let span = crawl_span("google_jobs");
        async move {
            let browser = match self.launch(&request.username).await {
                Ok(browser) => browser,
                Err(e) => return fatal(e),
            };
            let outcome = self.google_jobs_inner(&browser, &request).await;
            browser.close().await;
            outcome.unwrap_or_else(fatal)
        }
        .instrument(span)
        .await
    }

    async fn launch(&self, identity: &str) -> Result<SessionBrowser, CrawlError> {
        let store = SessionStore::new(&self.settings.session.root);
        let session = store.resolve(identity)?;
        info!(
            profile_dir = %session.profile_dir.display(),
            reused = session.reused,
            "Session profile resolved"
        );
        SessionBrowser::launch(&session, &self.settings.crawler, &self.settings.behavior).await
    }

    /// 在主页面上完成认证，认证失败在任何列表导航之前短路
    async fn authenticate(
        &self,
        browser: &SessionBrowser,
        username: &str,
        password: &str,
        behavior: &HumanBehavior,
    ) -> Result<(), CrawlError> {
        let page = browser.new_page().await?;
        let credentials = Credentials {
            username: username.to_string(),
            password: password.to_string(),
        };
        let state = ensure_authenticated(&page, &credentials, behavior).await?;
        info!(state = ?state, "Authentication completed");
        Ok(())
    }

    async fn linkedin_jobs_inner(
        &self,
        browser: &SessionBrowser,
        request: &JobSearchRequestDto,
    ) -> Result<CrawlReport, CrawlError> {
        let behavior = HumanBehavior::new(self.settings.behavior.clone());
        self.authenticate(browser, &request.username, &request.password, &behavior)
            .await?;

        // The listing runs on its own page so the feed tab stays untouched
        let page = browser.new_page().await?;
        let query = JobsQuery {
            keyword: request.search_keyword.clone(),
            location: request.location.clone(),
            days_ago: request.days_ago,
            sort_by: request.sort_by.clone(),
            experience_levels: request.experience_levels.clone().unwrap_or_default(),
            company_ids: request.company_ids.clone().unwrap_or_default(),
            job_types: request.job_types.clone().unwrap_or_default(),
            remote: request.remote.unwrap_or(false),
            industry_ids: request.industry_ids.clone().unwrap_or_default(),
        };
        let source =
            LinkedInJobsSource::new(page, behavior, self.settings.crawler.clone(), query);
        Ok(self.collect(source, request.numbers).await)
    }

    async fn linkedin_companies_inner(
        &self,
        browser: &SessionBrowser,
        request: &CompanySearchRequestDto,
    ) -> Result<CrawlReport, CrawlError> {
        let behavior = HumanBehavior::new(self.settings.behavior.clone());
        self.authenticate(browser, &request.username, &request.password, &behavior)
            .await?;

        let page = browser.new_page().await?;
        let query = CompaniesQuery {
            keyword: request.search_keyword.clone(),
        };
        let source =
            LinkedInCompaniesSource::new(page, behavior, self.settings.crawler.clone(), query);
        Ok(self.collect(source, request.numbers).await)
    }

    async fn linkedin_people_inner(
        &self,
        browser: &SessionBrowser,
        request: &PeopleSearchRequestDto,
    ) -> Result<CrawlReport, CrawlError> {
        let behavior = HumanBehavior::new(self.settings.behavior.clone());
        self.authenticate(browser, &request.username, &request.password, &behavior)
            .await?;

        let page = browser.new_page().await?;
        let query = PeopleQuery {
            company: request.company_url.clone(),
        };
        let source =
            LinkedInPeopleSource::new(page, behavior, self.settings.crawler.clone(), query);
        Ok(self.collect(source, request.numbers).await)
    }

    async fn google_jobs_inner(
        &self,
        browser: &SessionBrowser,
        request: &JobSearchRequestDto,
    ) -> Result<CrawlReport, CrawlError> {
        let behavior = HumanBehavior::new(self.settings.behavior.clone());
        let page = browser.new_page().await?;
        let query = GoogleJobsQuery {
            keyword: request.search_keyword.clone(),
            location: request.location.clone(),
            days_ago: request.days_ago,
        };
        let source = GoogleJobsSource::new(page, behavior, self.settings.crawler.clone(), query);
        Ok(self.collect(source, request.numbers).await)
    }

    async fn collect<S>(&self, source: S, limit: usize) -> CrawlReport
    where
        S: crate::domain::services::crawl_loop::RecordSource,
    {
        let aggregator = ResultAggregator::new(limit);
        let report = CrawlLoop::new(source, aggregator, self.settings.crawler.stall_threshold)
            .run()
            .await;
        info!(
            total_records = report.total_records,
            total_pages = report.total_pages,
            limit_reached = report.limit_reached,
            "Crawl finished"
        );
        report
    }
}

fn crawl_span(source: &'static str) -> tracing::Span {
    let crawl_id = Uuid::new_v4();
    tracing::info_span!("crawl", source, %crawl_id)
}

fn fatal(e: CrawlError) -> CrawlReport {
    error!(error = %e, "Crawl aborted");
    CrawlReport::failure(e.to_string())
}
