// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 目标站点模块
///
/// 每个目标一个文件，封装该站点的选择器契约、搜索 URL 组装
/// 和 `RecordSource` 实现。选择器针对站点当前渲染的 DOM，
/// 天然不稳定，随站点版本维护。
pub mod dom;
pub mod google_jobs;
pub mod linkedin_companies;
pub mod linkedin_jobs;
pub mod linkedin_people;
