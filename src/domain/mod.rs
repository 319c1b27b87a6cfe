// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域层模块
///
/// 该模块包含系统的核心业务逻辑，包括：
/// - 领域模型（models）：记录、报告、认证状态
/// - 服务（services）：聚合、循环控制、时间解析
///
/// 领域层不触碰浏览器，所有浏览器耦合都隔离在 engines 与
/// infrastructure 层，核心循环可以用假数据源独立测试。
pub mod models;
pub mod services;
