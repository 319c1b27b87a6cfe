// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 应用程序模块
///
/// 包含应用程序的核心业务逻辑和用例
pub mod application;

/// 配置模块
///
/// 处理应用程序的配置设置和环境变量
pub mod config;

/// 领域模块
///
/// 包含核心业务实体和服务
pub mod domain;

/// 引擎模块
///
/// 浏览器会话、认证与行为模拟引擎
pub mod engines;

/// 基础设施模块
///
/// 各爬取目标的页面交互与抽取实现
pub mod infrastructure;

/// 表示层模块
///
/// 处理HTTP请求和响应，包括路由和处理器
pub mod presentation;

/// 工具模块
///
/// 错误类型与遥测初始化
pub mod utils;
