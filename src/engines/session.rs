// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::{BehaviorSettings, CrawlerSettings};
use crate::utils::errors::CrawlError;
use chromiumoxide::{Browser, BrowserConfig, Page};
use futures::StreamExt;
use std::path::PathBuf;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// 与原始流量一致的桌面 Chrome 用户代理
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// 会话存储
///
/// 把用户身份映射到磁盘上的持久化浏览器配置文件目录。
/// 只回答存在/创建问题，不触碰网络或浏览器。
pub struct SessionStore {
    root: PathBuf,
}

/// 某个身份的会话句柄
#[derive(Debug, Clone)]
pub struct SessionHandle {
    /// 浏览器配置文件目录（cookies、local storage 等，对引擎不透明）
    pub profile_dir: PathBuf,
    /// 目录已存在即视为"可能已登录"
    pub reused: bool,
}

impl SessionStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// 某个身份的会话目录是否已存在
    pub fn exists(&self, identity: &str) -> bool {
        self.root.join(identity).is_dir()
    }

    /// 解析身份对应的会话
    ///
    /// 目录存在则复用，不存在则连同祖先目录一并创建。
    /// 引擎自身永远不删除会话目录。
    pub fn resolve(&self, identity: &str) -> Result<SessionHandle, CrawlError> {
        let profile_dir = self.root.join(identity);
        if profile_dir.is_dir() {
            info!(path = %profile_dir.display(), "Using existing session");
            return Ok(SessionHandle {
                profile_dir,
                reused: true,
            });
        }
        std::fs::create_dir_all(&profile_dir).map_err(|e| {
            CrawlError::Storage(format!(
                "cannot create session directory {}: {}",
                profile_dir.display(),
                e
            ))
        })?;
        info!(path = %profile_dir.display(), "Created new session");
        Ok(SessionHandle {
            profile_dir,
            reused: false,
        })
    }
}

/// 会话浏览器
///
/// 绑定到某个会话配置文件目录的浏览器实例。每次爬取调用
/// 启动一个独立实例：配置文件目录属于爬取身份的一部分，
/// 不同身份不能共享进程级浏览器。
pub struct SessionBrowser {
    browser: Browser,
    handler_task: JoinHandle<()>,
}

impl SessionBrowser {
    /// 以持久化配置文件启动浏览器
    ///
    /// 启动失败是致命错误，在任何爬取动作之前短路整个调用
    pub async fn launch(
        session: &SessionHandle,
        crawler: &CrawlerSettings,
        behavior: &BehaviorSettings,
    ) -> Result<Self, CrawlError> {
        let mut builder = BrowserConfig::builder()
            .user_data_dir(&session.profile_dir)
            .no_sandbox()
            .window_size(behavior.viewport_width, behavior.viewport_height)
            .request_timeout(Duration::from_secs(30))
            .args(vec![
                "--disable-blink-features=AutomationControlled",
                "--disable-infobars",
                "--disable-notifications",
                "--disable-popup-blocking",
                "--disable-extensions",
                "--disable-gpu",
                "--disable-dev-shm-usage",
            ]);
        if !crawler.headless {
            builder = builder.with_head();
        }

        let config = builder.build().map_err(CrawlError::BrowserLaunch)?;
        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| CrawlError::BrowserLaunch(e.to_string()))?;

        // Drive CDP events until the browser goes away
        let handler_task = tokio::spawn(async move {
            while let Some(h) = handler.next().await {
                if h.is_err() {
                    break;
                }
            }
        });

        Ok(Self {
            browser,
            handler_task,
        })
    }

    /// 打开一个新页面并设置用户代理
    pub async fn new_page(&self) -> Result<Page, CrawlError> {
        let page = self.browser.new_page("about:blank").await?;
        page.set_user_agent(USER_AGENT).await?;
        Ok(page)
    }

    /// 关闭浏览器
    ///
    /// 每条退出路径（正常完成、停滞终止、致命错误）都要走到这里；
    /// 关闭失败只记录日志，不再向上抛
    pub async fn close(mut self) {
        if let Err(e) = self.browser.close().await {
            warn!(error = %e, "Error closing browser");
        }
        if let Err(e) = self.browser.wait().await {
            warn!(error = %e, "Error waiting for browser shutdown");
        }
        self.handler_task.abort();
        info!("Browser closed");
    }
}
