// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::Serialize;
use std::collections::BTreeMap;

/// 缺失字段的默认回退值
pub const FIELD_FALLBACK: &str = "N/A";

/// 提取出的结构化记录
///
/// 字段逐个独立定位，缺失的字段取回退值而不是丢弃整条记录，
/// 部分提取是合法结果而非失败
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Record {
    fields: BTreeMap<String, String>,
}

impl Record {
    pub fn new() -> Self {
        Self {
            fields: BTreeMap::new(),
        }
    }

    pub fn set(&mut self, name: &str, value: impl Into<String>) -> &mut Self {
        self.fields.insert(name.to_string(), value.into());
        self
    }

    /// 返回字段值，缺失字段视为空串
    pub fn get(&self, name: &str) -> &str {
        self.fields.get(name).map(String::as_str).unwrap_or("")
    }

    /// 字段是否携带了真实内容（非空且非回退值）
    pub fn has_value(&self, name: &str) -> bool {
        let v = self.get(name);
        !v.is_empty() && v != FIELD_FALLBACK
    }

    /// 计算记录的自然键
    ///
    /// 优先使用记录自带的 URL 字段；没有可用 URL 时退回
    /// 标题+公司+地点的组合键。对象级相等去重对附带字段的
    /// 抖动过于脆弱，因此统一走键去重。
    pub fn key(&self) -> RecordKey {
        for url_field in ["URL", "ProfileURL"] {
            if self.has_value(url_field) {
                return RecordKey::Url(normalize_url(self.get(url_field)));
            }
        }

        let title = first_value(self, &["Title", "Name", "CompanyName"]);
        let company = first_value(self, &["CompanyName", "Company"]);
        let location = first_value(self, &["LocationDetail", "Location"]);
        RecordKey::Composite(format!(
            "{}|{}|{}",
            title.to_lowercase(),
            company.to_lowercase(),
            location.to_lowercase()
        ))
    }
}

impl Default for Record {
    fn default() -> Self {
        Self::new()
    }
}

fn first_value<'a>(record: &'a Record, names: &[&str]) -> &'a str {
    names
        .iter()
        .find(|n| record.has_value(n))
        .map(|n| record.get(n))
        .unwrap_or("")
}

/// 去掉查询参数和片段，避免跟踪参数导致的重复
fn normalize_url(url: &str) -> String {
    let mut normalized = url.to_string();
    if let Some(pos) = normalized.find('#') {
        normalized.truncate(pos);
    }
    if let Some(pos) = normalized.find('?') {
        normalized.truncate(pos);
    }
    normalized.trim_end_matches('/').to_lowercase()
}

/// 记录的自然键，用于去重
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RecordKey {
    Url(String),
    Composite(String),
}
