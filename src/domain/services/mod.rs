// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// 该模块包含爬取引擎的核心业务逻辑服务：
/// - 结果聚合器（aggregator）：键去重与记录上限
/// - 爬取循环（crawl_loop）：分批推进与统一终止谓词
/// - 发布时间解析（posted_age）：本地化相对时间到天数的折算
pub mod aggregator;
pub mod crawl_loop;
pub mod posted_age;
