// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// 职位搜索请求
///
/// 不可变输入，爬取开始前校验（上限 >= 1，关键词非空）
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct JobSearchRequestDto {
    #[validate(length(min = 1, message = "Username cannot be empty"))]
    pub username: String,
    #[validate(length(min = 1, message = "Password cannot be empty"))]
    pub password: String,
    #[validate(length(min = 1, message = "Search keyword cannot be empty"))]
    pub search_keyword: String,
    pub location: Option<String>,
    /// 记录上限
    #[validate(range(min = 1, message = "Limit must be at least 1"))]
    pub numbers: usize,
    /// 只要最近 N 天内发布的职位
    pub days_ago: Option<u32>,
    /// 排序方式："DD" 按日期降序，"R" 按相关度
    pub sort_by: Option<String>,
    /// 经验级别：1 实习 … 6 高管
    pub experience_levels: Option<Vec<u32>>,
    pub company_ids: Option<Vec<String>>,
    /// 合同类型："F" 全职、"C" 合同、"P" 兼职、"T" 临时、"I" 实习、"V" 志愿
    pub job_types: Option<Vec<String>>,
    /// 只看远程职位
    pub remote: Option<bool>,
    pub industry_ids: Option<Vec<String>>,
}

/// 公司搜索请求
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct CompanySearchRequestDto {
    #[validate(length(min = 1, message = "Username cannot be empty"))]
    pub username: String,
    #[validate(length(min = 1, message = "Password cannot be empty"))]
    pub password: String,
    #[validate(length(min = 1, message = "Search keyword cannot be empty"))]
    pub search_keyword: String,
    #[validate(range(min = 1, message = "Limit must be at least 1"))]
    pub numbers: usize,
}

/// 人员搜索请求
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct PeopleSearchRequestDto {
    #[validate(length(min = 1, message = "Username cannot be empty"))]
    pub username: String,
    #[validate(length(min = 1, message = "Password cannot be empty"))]
    pub password: String,
    /// 以公司名作为检索关键词
    #[validate(length(min = 1, message = "Company keyword cannot be empty"))]
    pub company_url: String,
    #[validate(range(min = 1, message = "Limit must be at least 1"))]
    pub numbers: usize,
}
