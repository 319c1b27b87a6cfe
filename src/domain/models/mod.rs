// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// 该模块定义了爬取引擎的核心业务实体，包括：
/// - 认证状态（auth）：会话认证生命周期的状态机
/// - 记录（record）：提取出的结构化记录及其自然键
/// - 报告（report）：一次爬取调用的终态输出
pub mod auth;
pub mod record;
pub mod report;
