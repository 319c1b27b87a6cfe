// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use scoutrs::domain::models::record::Record;
use scoutrs::domain::models::report::CrawlStatus;
use scoutrs::domain::services::aggregator::ResultAggregator;
use scoutrs::domain::services::crawl_loop::{BatchOutcome, CrawlLoop, RecordSource};
use scoutrs::utils::errors::NavigationError;

/// 预先编排好批次序列的数据源
struct ScriptedSource {
    batches: Vec<Result<BatchOutcome, NavigationError>>,
}

impl ScriptedSource {
    fn new(batches: Vec<Result<BatchOutcome, NavigationError>>) -> Self {
        let mut batches = batches;
        batches.reverse();
        Self { batches }
    }
}

#[async_trait]
impl RecordSource for ScriptedSource {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn next_batch(&mut self) -> Result<BatchOutcome, NavigationError> {
        Ok(self.batches.pop().unwrap_or(Ok(BatchOutcome::Exhausted))?)
    }
}

fn job_record(index: usize) -> Record {
    let mut record = Record::new();
    record
        .set("Title", format!("Engineer {}", index))
        .set("CompanyName", "Acme")
        .set("Location", "Hanoi")
        .set("URL", format!("https://example.com/jobs/{}", index));
    record
}

fn page(range: std::ops::Range<usize>) -> Result<BatchOutcome, NavigationError> {
    Ok(BatchOutcome::Batch(range.map(job_record).collect()))
}

/// 三页唯一记录、上限 10：两页后到达上限，状态为成功
#[tokio::test]
async fn test_limit_terminates_before_source_exhaustion() {
    let source = ScriptedSource::new(vec![page(0..5), page(5..10), page(10..15)]);
    let report = CrawlLoop::new(source, ResultAggregator::new(10), 10)
        .run()
        .await;

    assert_eq!(report.status, CrawlStatus::Success);
    assert_eq!(report.total_records, 10);
    assert_eq!(report.records.len(), 10);
    assert_eq!(report.total_pages, 2);
    assert!(report.limit_reached);
    assert!(report.error_message.is_none());
}

/// 同一记录在多页重复出现时只保留一份，耗尽后自然完成
#[tokio::test]
async fn test_duplicates_across_pages_are_dropped() {
    let source = ScriptedSource::new(vec![
        page(0..5),
        page(0..5),
        page(3..8),
        Ok(BatchOutcome::Exhausted),
    ]);
    let report = CrawlLoop::new(source, ResultAggregator::new(100), 10)
        .run()
        .await;

    assert_eq!(report.status, CrawlStatus::Success);
    assert_eq!(report.total_records, 8);
    assert_eq!(report.total_pages, 3);
    assert!(!report.limit_reached);

    // Insertion order is preserved
    assert_eq!(report.records[0].get("Title"), "Engineer 0");
    assert_eq!(report.records[7].get("Title"), "Engineer 7");
}

/// 导航错误推进循环而不中止，后续页仍被采集
#[tokio::test]
async fn test_recoverable_errors_do_not_abort() {
    let source = ScriptedSource::new(vec![
        page(0..3),
        Err(NavigationError::SelectorTimeout {
            selector: "div.results".to_string(),
            waited_ms: 10_000,
        }),
        page(3..6),
        Ok(BatchOutcome::Exhausted),
    ]);
    let report = CrawlLoop::new(source, ResultAggregator::new(100), 10)
        .run()
        .await;

    assert_eq!(report.status, CrawlStatus::Success);
    assert_eq!(report.total_records, 6);
    assert_eq!(report.total_pages, 3);
}

/// 成功报告的序列化形状
#[tokio::test]
async fn test_report_serialization_shape() {
    let source = ScriptedSource::new(vec![page(0..2), Ok(BatchOutcome::Exhausted)]);
    let report = CrawlLoop::new(source, ResultAggregator::new(10), 10)
        .run()
        .await;

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["status"], "success");
    assert_eq!(json["total_records"], 2);
    assert_eq!(json["limit_reached"], false);
    assert!(json["records"].is_array());
    assert_eq!(json["records"][0]["Title"], "Engineer 0");
    assert!(json["timing"]["elapsed_secs"].is_number());
    assert!(json.get("error_message").is_none());
}
