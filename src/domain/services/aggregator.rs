// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::record::{Record, RecordKey};
use crate::domain::models::report::{CrawlReport, CrawlStatus, CrawlTiming};
use chrono::Utc;
use std::collections::HashSet;
use std::time::Instant;

/// 结果聚合器
///
/// 按自然键去重并强制执行记录上限，保持插入顺序（即发现顺序）。
/// 不变量：任何观测点上 `len() <= limit`
pub struct ResultAggregator {
    limit: usize,
    records: Vec<Record>,
    seen: HashSet<RecordKey>,
    started_at: Instant,
}

impl ResultAggregator {
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            records: Vec::new(),
            seen: HashSet::new(),
            started_at: Instant::now(),
        }
    }

    /// 尝试接收一条记录
    ///
    /// 键已存在或上限已满时拒绝（返回 `false`，不做任何修改），
    /// 否则追加并返回 `true`
    pub fn offer(&mut self, record: Record) -> bool {
        if self.is_full() {
            return false;
        }
        let key = record.key();
        if self.seen.contains(&key) {
            return false;
        }
        self.seen.insert(key);
        self.records.push(record);
        true
    }

    pub fn is_full(&self) -> bool {
        self.records.len() >= self.limit
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// 结算计数与耗时，产出最终报告
    pub fn finalize(
        self,
        status: CrawlStatus,
        total_pages: u32,
        error_message: Option<String>,
    ) -> CrawlReport {
        let limit_reached = self.records.len() >= self.limit;
        let total_records = self.records.len();
        CrawlReport {
            status,
            records: self.records,
            total_pages,
            total_records,
            limit_reached,
            error_message,
            timing: Some(CrawlTiming {
                elapsed_secs: self.started_at.elapsed().as_secs_f64(),
                finished_at: Utc::now(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(url: &str, title: &str) -> Record {
        let mut r = Record::new();
        r.set("URL", url);
        r.set("Title", title);
        r
    }

    #[test]
    fn test_duplicate_keys_are_rejected() {
        let mut agg = ResultAggregator::new(10);
        assert!(agg.offer(job("https://a/jobs/1", "One")));
        assert!(!agg.offer(job("https://a/jobs/1", "One (repost)")));
        assert!(agg.offer(job("https://a/jobs/2", "Two")));
        assert_eq!(agg.len(), 2);
    }

    #[test]
    fn test_distinct_count_capped_at_limit() {
        let mut agg = ResultAggregator::new(3);
        for i in 0..10 {
            // every other record is a duplicate of the previous one
            agg.offer(job(&format!("https://a/jobs/{}", i / 2), "T"));
        }
        assert_eq!(agg.len(), 3);
        assert!(agg.is_full());
    }

    #[test]
    fn test_full_aggregator_rejects_without_mutation() {
        let mut agg = ResultAggregator::new(1);
        assert!(agg.offer(job("https://a/jobs/1", "One")));
        assert!(!agg.offer(job("https://a/jobs/2", "Two")));
        assert_eq!(agg.len(), 1);
    }

    #[test]
    fn test_finalize_reports_limit_reached_iff_count_equals_limit() {
        let mut agg = ResultAggregator::new(2);
        agg.offer(job("https://a/jobs/1", "One"));
        let report = agg.finalize(CrawlStatus::Success, 1, None);
        assert_eq!(report.total_records, 1);
        assert!(!report.limit_reached);

        let mut agg = ResultAggregator::new(2);
        agg.offer(job("https://a/jobs/1", "One"));
        agg.offer(job("https://a/jobs/2", "Two"));
        let report = agg.finalize(CrawlStatus::Success, 1, None);
        assert_eq!(report.total_records, 2);
        assert!(report.limit_reached);
        assert!(report.timing.is_some());
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut agg = ResultAggregator::new(5);
        agg.offer(job("https://a/jobs/3", "C"));
        agg.offer(job("https://a/jobs/1", "A"));
        agg.offer(job("https://a/jobs/2", "B"));
        let report = agg.finalize(CrawlStatus::Success, 1, None);
        let titles: Vec<&str> = report.records.iter().map(|r| r.get("Title")).collect();
        assert_eq!(titles, vec!["C", "A", "B"]);
    }
}
