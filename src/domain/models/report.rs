// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::record::Record;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// 爬取终态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CrawlStatus {
    Success,
    Error,
}

/// 爬取耗时统计
#[derive(Debug, Clone, Serialize)]
pub struct CrawlTiming {
    /// 从调用开始到结束的秒数
    pub elapsed_secs: f64,
    /// 结束时间戳
    pub finished_at: DateTime<Utc>,
}

/// 爬取报告
///
/// 调用方永远收到一份结构完整的报告：完全失败时为空但合法，
/// 停滞或达到上限时为部分结果，正常完成时为完整结果
#[derive(Debug, Serialize)]
pub struct CrawlReport {
    pub status: CrawlStatus,
    pub records: Vec<Record>,
    pub total_pages: u32,
    pub total_records: usize,
    pub limit_reached: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timing: Option<CrawlTiming>,
}

impl CrawlReport {
    /// 构造致命错误对应的空报告
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            status: CrawlStatus::Error,
            records: Vec::new(),
            total_pages: 0,
            total_records: 0,
            limit_reached: false,
            error_message: Some(message.into()),
            timing: None,
        }
    }
}
