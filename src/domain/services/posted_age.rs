// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{Duration, Utc};
use regex::Regex;
use std::sync::OnceLock;

/// 无法解析发布时间时的哨兵天数
///
/// 任何启用了时效过滤的请求都会把哨兵值排除在外，
/// 管线本身不会因为解析失败而崩溃
pub const UNKNOWN_AGE_DAYS: u32 = 9999;

/// 固定的相对时间词表（英语 + 越南语）
const MINUTE_TOKENS: &[&str] = &["minute", "phút"];
const HOUR_TOKENS: &[&str] = &["hour", "giờ"];
const DAY_TOKENS: &[&str] = &["day", "ngày"];
const WEEK_TOKENS: &[&str] = &["week", "tuần"];
const MONTH_TOKENS: &[&str] = &["month", "tháng"];

fn contains_any(text: &str, tokens: &[&str]) -> bool {
    tokens.iter().any(|t| text.contains(t))
}

/// 解析本地化的相对时间文本（如 "3 days ago"、"2 tuần trước"）为天数
///
/// 分钟和小时视为 0 天；周按 7 天、月按 30 天折算；
/// 无法识别的文本返回 [`UNKNOWN_AGE_DAYS`]
pub fn parse_age_days(text: &str) -> u32 {
    static AGE_NUMBER_RE: OnceLock<Regex> = OnceLock::new();
    let number_re = AGE_NUMBER_RE
        .get_or_init(|| Regex::new(r"\d+").expect("Failed to compile age number regex"));

    let lower = text.to_lowercase();
    let quantity = number_re
        .find(&lower)
        .and_then(|m| m.as_str().parse::<u32>().ok());

    if contains_any(&lower, MINUTE_TOKENS) || contains_any(&lower, HOUR_TOKENS) {
        return 0;
    }
    if contains_any(&lower, DAY_TOKENS) {
        return quantity.unwrap_or(UNKNOWN_AGE_DAYS);
    }
    if contains_any(&lower, WEEK_TOKENS) {
        return quantity.map(|n| n * 7).unwrap_or(UNKNOWN_AGE_DAYS);
    }
    if contains_any(&lower, MONTH_TOKENS) {
        return quantity.map(|n| n * 30).unwrap_or(UNKNOWN_AGE_DAYS);
    }

    UNKNOWN_AGE_DAYS
}

/// 记录年龄是否落在请求的时效窗口内
///
/// 未指定窗口时一律通过；指定窗口时哨兵值必然被排除
pub fn within_recency(age_days: u32, days_ago: Option<u32>) -> bool {
    match days_ago {
        Some(threshold) => age_days <= threshold,
        None => true,
    }
}

/// 文本是否看起来包含发布时间信息
///
/// 用于在卡片的多个描述 span 中挑出时间 span
pub fn looks_like_age(text: &str) -> bool {
    let lower = text.to_lowercase();
    lower.contains("ago")
        || lower.contains("posted")
        || lower.contains("trước")
        || contains_any(&lower, MINUTE_TOKENS)
        || contains_any(&lower, HOUR_TOKENS)
        || contains_any(&lower, DAY_TOKENS)
        || contains_any(&lower, WEEK_TOKENS)
        || contains_any(&lower, MONTH_TOKENS)
}

/// 由天数折算出 `%Y-%m-%d` 格式的发布日期
///
/// 哨兵值退回今天的日期，记录仍然保留
pub fn posted_date_from_age(age_days: u32) -> String {
    let days = if age_days == UNKNOWN_AGE_DAYS {
        0
    } else {
        i64::from(age_days)
    };
    (Utc::now() - Duration::days(days)).format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minutes_and_hours_are_zero_days() {
        assert_eq!(parse_age_days("45 minutes ago"), 0);
        assert_eq!(parse_age_days("3 hours ago"), 0);
        assert_eq!(parse_age_days("2 giờ trước"), 0);
        assert_eq!(parse_age_days("15 phút trước"), 0);
    }

    #[test]
    fn test_days_weeks_months_scale() {
        assert_eq!(parse_age_days("5 days ago"), 5);
        assert_eq!(parse_age_days("1 ngày trước"), 1);
        assert_eq!(parse_age_days("2 weeks ago"), 14);
        assert_eq!(parse_age_days("3 tuần trước"), 21);
        assert_eq!(parse_age_days("2 months ago"), 60);
        assert_eq!(parse_age_days("1 tháng trước"), 30);
    }

    #[test]
    fn test_unparseable_maps_to_sentinel() {
        assert_eq!(parse_age_days(""), UNKNOWN_AGE_DAYS);
        assert_eq!(parse_age_days("Promoted"), UNKNOWN_AGE_DAYS);
        assert_eq!(parse_age_days("over 200 applicants"), UNKNOWN_AGE_DAYS);
    }

    #[test]
    fn test_recency_window_boundaries() {
        // 5-day-old record: outside a 3-day window, inside a 7-day one
        assert!(!within_recency(5, Some(3)));
        assert!(within_recency(5, Some(7)));
        // The window is inclusive
        assert!(within_recency(5, Some(5)));
    }

    #[test]
    fn test_no_window_accepts_everything() {
        assert!(within_recency(0, None));
        assert!(within_recency(UNKNOWN_AGE_DAYS, None));
    }

    #[test]
    fn test_sentinel_is_excluded_from_any_window() {
        assert!(!within_recency(UNKNOWN_AGE_DAYS, Some(30)));
        assert!(!within_recency(UNKNOWN_AGE_DAYS, Some(365)));
    }

    #[test]
    fn test_age_detection() {
        assert!(looks_like_age("Posted 3 days ago"));
        assert!(looks_like_age("1 tuần trước"));
        assert!(!looks_like_age("Acme Corporation"));
    }

    #[test]
    fn test_posted_date_format() {
        let today = Utc::now().format("%Y-%m-%d").to_string();
        assert_eq!(posted_date_from_age(0), today);
        assert_eq!(posted_date_from_age(UNKNOWN_AGE_DAYS), today);
        // 10-digit ISO date
        assert_eq!(posted_date_from_age(7).len(), 10);
    }
}
