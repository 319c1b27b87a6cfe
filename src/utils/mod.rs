// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 错误类型模块
///
/// 定义爬取引擎的致命错误与可恢复错误分类
pub mod errors;

/// 遥测模块
///
/// 初始化结构化日志
pub mod telemetry;
