// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 配置模块
///
/// 处理应用程序的配置设置，包括服务器、会话存储和行为模拟配置
pub mod settings;
#[cfg(test)]
mod settings_test;
