// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 会话认证状态
///
/// 状态转移：
/// `Unknown` -(探测当前页面)-> `Authenticated` | `Unauthenticated`；
/// `Unauthenticated` -> `Authenticating` -(提交凭据)->
/// `Authenticated` | `CheckpointBlocked` | `Failed`。
///
/// `CheckpointBlocked` 与 `Failed` 都是终态，需要人工介入，
/// 同一次调用内不会自动重试（重试大概率再次触发风控）。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    Unknown,
    Unauthenticated,
    Authenticating,
    Authenticated,
    CheckpointBlocked,
    Failed,
}

impl AuthState {
    /// 是否允许继续爬取
    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthState::Authenticated)
    }
}
