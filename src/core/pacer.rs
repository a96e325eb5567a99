//! 模拟延迟：可被取消的等待
//!
//! 所有挂起点都经由 Pacer：sleep 与取消令牌竞争，令牌触发即返回 Cancelled。

use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::core::AppError;

#[derive(Clone, Debug)]
pub struct Pacer {
    token: CancellationToken,
}

impl Pacer {
    pub fn new(token: CancellationToken) -> Self {
        Self { token }
    }

    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// 等待 duration；期间若取消则返回 Err(Cancelled)
    pub async fn pause(&self, duration: Duration) -> Result<(), AppError> {
        if self.token.is_cancelled() {
            return Err(AppError::Cancelled);
        }
        tokio::select! {
            _ = self.token.cancelled() => Err(AppError::Cancelled),
            _ = tokio::time::sleep(duration) => Ok(()),
        }
    }
}

impl Default for Pacer {
    fn default() -> Self {
        Self::new(CancellationToken::new())
    }
}
