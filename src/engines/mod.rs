// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 引擎模块
///
/// 浏览器自动化的底座：
/// - 会话浏览器（session）：持久化配置文件目录与浏览器生命周期
/// - 行为模拟（behavior）：动作间随机化的人类行为伪装
/// - 认证驱动（auth）：登录墙检测与凭据提交
pub mod auth;
pub mod behavior;
pub mod session;
