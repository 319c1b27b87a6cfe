// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::BehaviorSettings;
use chromiumoxide::cdp::browser_protocol::input::{
    DispatchMouseEventParams, DispatchMouseEventType,
};
use chromiumoxide::Page;
use std::time::Duration;
use tracing::warn;

/// 人类行为模拟器
///
/// 在每个可被外部观测的自动化动作（导航、表单填写、点击）之间
/// 插入随机化的指针移动、滚轮和停顿，打散脚本固有的固定节奏。
/// 这是尽力而为的伪装，不是正确性路径：任何底层页面交互失败
/// 都会被吞掉并记录日志，绝不向调用方抛错。
#[derive(Clone)]
pub struct HumanBehavior {
    settings: BehaviorSettings,
}

impl HumanBehavior {
    pub fn new(settings: BehaviorSettings) -> Self {
        Self { settings }
    }

    /// 执行一次随机化的停顿序列
    ///
    /// 1-3 次随机坐标的鼠标移动（带随机步数插值）、概率触发的
    /// 滚轮动作，最后是配置窗口内的随机延迟
    pub async fn pause(&self, page: &Page) {
        if let Err(e) = self.wander(page).await {
            warn!(error = %e, "Behavior simulation failed, continuing");
        }

        let delay =
            rand::random_range(self.settings.min_delay_ms..=self.settings.max_delay_ms);
        tokio::time::sleep(Duration::from_millis(delay)).await;
    }

    async fn wander(&self, page: &Page) -> Result<(), String> {
        let width = f64::from(self.settings.viewport_width);
        let height = f64::from(self.settings.viewport_height);

        let moves = rand::random_range(1..=3);
        let mut x = rand::random_range(0.0..width);
        let mut y = rand::random_range(0.0..height);
        for _ in 0..moves {
            let target_x = rand::random_range(0.0..width);
            let target_y = rand::random_range(0.0..height);
            let steps = rand::random_range(5..=15);

            for step in 1..=steps {
                let t = f64::from(step) / f64::from(steps);
                let params = DispatchMouseEventParams::builder()
                    .r#type(DispatchMouseEventType::MouseMoved)
                    .x(x + (target_x - x) * t)
                    .y(y + (target_y - y) * t)
                    .build()
                    .map_err(|e| e.to_string())?;
                page.execute(params).await.map_err(|e| e.to_string())?;
            }
            x = target_x;
            y = target_y;

            tokio::time::sleep(Duration::from_millis(rand::random_range(300..=1200))).await;
        }

        if rand::random::<f64>() < self.settings.wheel_probability {
            let params = DispatchMouseEventParams::builder()
                .r#type(DispatchMouseEventType::MouseWheel)
                .x(x)
                .y(y)
                .delta_x(0.0)
                .delta_y(f64::from(rand::random_range(200..=800)))
                .build()
                .map_err(|e| e.to_string())?;
            page.execute(params).await.map_err(|e| e.to_string())?;

            tokio::time::sleep(Duration::from_millis(rand::random_range(500..=1500))).await;
        }

        Ok(())
    }
}
