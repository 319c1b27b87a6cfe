// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::report::{CrawlReport, CrawlStatus};
use crate::domain::services::aggregator::ResultAggregator;
use crate::utils::errors::NavigationError;
use async_trait::async_trait;
use tracing::{debug, info, warn};

/// 一次推进的产出
#[derive(Debug)]
pub enum BatchOutcome {
    /// 当前页/滚动窗口内渲染出的一批记录（可能为空）
    Batch(Vec<crate::domain::models::record::Record>),
    /// 数据源自然耗尽：零结果页、滚动到底或无下一页控件
    Exhausted,
}

/// 记录数据源
///
/// 每次 `next_batch` 推进一页或一个滚动窗口并返回其中的记录。
/// 浏览器目标（LinkedIn、Google Jobs）实现该 trait；测试用假源替代。
#[async_trait]
pub trait RecordSource: Send {
    /// 数据源名称，用于日志
    fn name(&self) -> &'static str;

    /// 推进到下一批记录
    ///
    /// # 返回值
    ///
    /// * `Ok(BatchOutcome::Batch)` - 本次迭代提取到的记录
    /// * `Ok(BatchOutcome::Exhausted)` - 没有更多结果，自然终止
    /// * `Err(NavigationError)` - 本次迭代失败，可恢复，计入停滞计数
    async fn next_batch(&mut self) -> Result<BatchOutcome, NavigationError>;
}

/// 爬取循环控制器
///
/// 把原本散落在嵌套异常块里的终止条件统一建模为每批之后
/// 评估的谓词：上限已满、数据源耗尽、停滞阈值。
/// 导航和选择器超时错误被记录并推进循环，而不是致命错误。
pub struct CrawlLoop<S> {
    source: S,
    aggregator: ResultAggregator,
    stall_threshold: u32,
}

impl<S: RecordSource> CrawlLoop<S> {
    pub fn new(source: S, aggregator: ResultAggregator, stall_threshold: u32) -> Self {
        Self {
            source,
            aggregator,
            stall_threshold,
        }
    }

    /// 运行循环直到某个终止谓词成立
    ///
    /// 停滞终止按自然完成处理（`status = "success"`，可能为空或部分结果）
    pub async fn run(mut self) -> CrawlReport {
        let mut total_pages: u32 = 0;
        let mut stall_streak: u32 = 0;

        loop {
            if self.aggregator.is_full() {
                info!(
                    source = self.source.name(),
                    records = self.aggregator.len(),
                    "Reached maximum record limit"
                );
                break;
            }

            match self.source.next_batch().await {
                Ok(BatchOutcome::Exhausted) => {
                    info!(source = self.source.name(), "No more results");
                    break;
                }
                Ok(BatchOutcome::Batch(batch)) => {
                    total_pages += 1;
                    let batch_size = batch.len();
                    let mut accepted = 0usize;
                    for record in batch {
                        if self.aggregator.is_full() {
                            // Remainder of the batch is discarded by contract
                            break;
                        }
                        if self.aggregator.offer(record) {
                            accepted += 1;
                        }
                    }
                    debug!(
                        source = self.source.name(),
                        page = total_pages,
                        batch_size,
                        accepted,
                        total = self.aggregator.len(),
                        "Processed batch"
                    );

                    if accepted == 0 {
                        stall_streak += 1;
                        if stall_streak >= self.stall_threshold {
                            warn!(
                                source = self.source.name(),
                                stall_streak, "Stall threshold reached, terminating crawl"
                            );
                            break;
                        }
                    } else {
                        stall_streak = 0;
                    }
                }
                Err(e) => {
                    // Recoverable: log, count toward the stall guard, try the next iteration
                    warn!(source = self.source.name(), error = %e, "Iteration failed, advancing");
                    total_pages += 1;
                    stall_streak += 1;
                    if stall_streak >= self.stall_threshold {
                        warn!(
                            source = self.source.name(),
                            stall_streak, "Stall threshold reached after repeated failures"
                        );
                        break;
                    }
                }
            }
        }

        self.aggregator
            .finalize(CrawlStatus::Success, total_pages, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::record::Record;

    struct ScriptedSource {
        batches: Vec<Result<BatchOutcome, NavigationError>>,
        calls: usize,
    }

    impl ScriptedSource {
        fn new(batches: Vec<Result<BatchOutcome, NavigationError>>) -> Self {
            Self { batches, calls: 0 }
        }
    }

    #[async_trait]
    impl RecordSource for ScriptedSource {
        fn name(&self) -> &'static str {
            "scripted"
        }

        async fn next_batch(&mut self) -> Result<BatchOutcome, NavigationError> {
            let outcome = if self.batches.is_empty() {
                Ok(BatchOutcome::Exhausted)
            } else {
                self.batches.remove(0)
            };
            self.calls += 1;
            outcome
        }
    }

    fn job(url: &str) -> Record {
        let mut r = Record::new();
        r.set("URL", url.to_string());
        r.set("Title", "Engineer");
        r
    }

    fn page(urls: &[&str]) -> Result<BatchOutcome, NavigationError> {
        Ok(BatchOutcome::Batch(urls.iter().map(|u| job(u)).collect()))
    }

    #[tokio::test]
    async fn test_exhausted_source_is_success_not_error() {
        let source = ScriptedSource::new(vec![Ok(BatchOutcome::Exhausted)]);
        let report = CrawlLoop::new(source, ResultAggregator::new(10), 10)
            .run()
            .await;
        assert_eq!(report.status, CrawlStatus::Success);
        assert_eq!(report.total_records, 0);
        assert!(!report.limit_reached);
    }

    #[tokio::test]
    async fn test_limit_stops_mid_batch_and_discards_remainder() {
        let source = ScriptedSource::new(vec![page(&["a", "b", "c", "d", "e"])]);
        let report = CrawlLoop::new(source, ResultAggregator::new(3), 10)
            .run()
            .await;
        assert_eq!(report.total_records, 3);
        assert!(report.limit_reached);
        assert_eq!(report.status, CrawlStatus::Success);
    }

    #[tokio::test]
    async fn test_stall_guard_terminates_empty_batches() {
        // Source keeps returning the same stable-but-useless empty page forever
        struct EmptyForever;
        #[async_trait]
        impl RecordSource for EmptyForever {
            fn name(&self) -> &'static str {
                "empty"
            }
            async fn next_batch(&mut self) -> Result<BatchOutcome, NavigationError> {
                Ok(BatchOutcome::Batch(Vec::new()))
            }
        }

        let report = CrawlLoop::new(EmptyForever, ResultAggregator::new(10), 4)
            .run()
            .await;
        assert_eq!(report.status, CrawlStatus::Success);
        assert_eq!(report.total_records, 0);
        assert_eq!(report.total_pages, 4);
    }

    #[tokio::test]
    async fn test_duplicate_only_batches_count_toward_stall() {
        let source = ScriptedSource::new(vec![
            page(&["a", "b"]),
            page(&["a", "b"]),
            page(&["a", "b"]),
            page(&["a", "b"]),
        ]);
        let report = CrawlLoop::new(source, ResultAggregator::new(10), 3)
            .run()
            .await;
        // First page accepts 2, the next three accept nothing and trip the guard
        assert_eq!(report.total_records, 2);
        assert_eq!(report.status, CrawlStatus::Success);
    }

    #[tokio::test]
    async fn test_navigation_errors_advance_until_stall() {
        let nav_err = || {
            Err(NavigationError::SelectorTimeout {
                selector: "ul.results".to_string(),
                waited_ms: 5000,
            })
        };
        let source = ScriptedSource::new(vec![page(&["a"]), nav_err(), nav_err(), page(&["b"])]);
        let report = CrawlLoop::new(source, ResultAggregator::new(10), 5)
            .run()
            .await;
        // Errors are recoverable: batches after them are still collected
        assert_eq!(report.total_records, 2);
        assert_eq!(report.status, CrawlStatus::Success);
    }

    #[tokio::test]
    async fn test_fresh_acceptance_resets_stall_streak() {
        let source = ScriptedSource::new(vec![
            page(&[]),
            page(&[]),
            page(&["a"]),
            page(&[]),
            page(&[]),
            page(&["b"]),
        ]);
        let report = CrawlLoop::new(source, ResultAggregator::new(10), 3)
            .run()
            .await;
        assert_eq!(report.total_records, 2);
    }
}
