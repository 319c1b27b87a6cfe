// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// 应用程序配置设置
///
/// 包含服务器、会话存储、人类行为模拟和爬取循环的所有配置项
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// 服务器配置
    pub server: ServerSettings,
    /// 会话存储配置
    pub session: SessionSettings,
    /// 人类行为模拟配置
    pub behavior: BehaviorSettings,
    /// 爬取循环配置
    pub crawler: CrawlerSettings,
}

/// 服务器配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// 服务器监听主机地址
    pub host: String,
    /// 服务器监听端口
    pub port: u16,
}

/// 会话存储配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct SessionSettings {
    /// 持久化浏览器配置文件的根目录，每个用户一个子目录
    pub root: String,
}

/// 人类行为模拟配置设置
///
/// 显式传入引擎，而不是从进程级全局状态读取
#[derive(Debug, Clone, Deserialize)]
pub struct BehaviorSettings {
    /// 动作间最小延迟（毫秒）
    pub min_delay_ms: u64,
    /// 动作间最大延迟（毫秒）
    pub max_delay_ms: u64,
    /// 滚轮动作触发概率 (0.0-1.0)
    pub wheel_probability: f64,
    /// 视口宽度，鼠标移动坐标的上界
    pub viewport_width: u32,
    /// 视口高度
    pub viewport_height: u32,
}

/// 爬取循环配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerSettings {
    /// 是否以无头模式启动浏览器
    pub headless: bool,
    /// 连续零新增记录迭代的停滞阈值
    pub stall_threshold: u32,
    /// 结果容器选择器的等待超时（毫秒）
    pub results_wait_ms: u64,
    /// 备用选择器的等待超时（毫秒）
    pub fallback_wait_ms: u64,
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 从环境变量加载配置，支持默认值
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        let builder = Config::builder()
            // Start with default settings
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            // Default session storage settings
            .set_default("session.root", "./sessions")?
            // Default human behavior settings
            .set_default("behavior.min_delay_ms", 2500)?
            .set_default("behavior.max_delay_ms", 5000)?
            .set_default("behavior.wheel_probability", 0.5)?
            .set_default("behavior.viewport_width", 1366)?
            .set_default("behavior.viewport_height", 768)?
            // Default crawl loop settings
            .set_default("crawler.headless", true)?
            .set_default("crawler.stall_threshold", 10)?
            .set_default("crawler.results_wait_ms", 10_000)?
            .set_default("crawler.fallback_wait_ms", 5_000)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("SCOUTRS").separator("__"));

        builder.build()?.try_deserialize()
    }
}
