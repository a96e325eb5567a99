//! 关闭处理
//!
//! 统一的关闭信号：Ctrl+C / SIGTERM / Quit 命令都会取消同一个 CancellationToken，
//! 进行中的路由与演示在下一个等待点以 Cancelled 结束（相当于页面卸载）。

use std::sync::{Arc, Mutex};

use tokio_util::sync::CancellationToken;

/// 关闭信号管理器
#[derive(Clone)]
pub struct ShutdownManager {
    shutdown_token: CancellationToken,
    /// 第一次触发关闭的原因
    reason: Arc<Mutex<Option<ShutdownReason>>>,
}

/// 关闭原因
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShutdownReason {
    /// 用户发起的退出 (Ctrl+C 或 quit 命令)
    UserInitiated,
    /// SIGTERM 信号
    Signal,
}

impl ShutdownManager {
    pub fn new() -> Self {
        Self {
            shutdown_token: CancellationToken::new(),
            reason: Arc::new(Mutex::new(None)),
        }
    }

    /// 获取关闭 token（传给 Copilot 作为 teardown）
    pub fn token(&self) -> CancellationToken {
        self.shutdown_token.clone()
    }

    /// 重复调用只保留第一次的原因
    pub fn shutdown(&self, reason: ShutdownReason) {
        if let Ok(mut slot) = self.reason.lock() {
            if slot.is_none() {
                *slot = Some(reason);
            }
        }
        self.shutdown_token.cancel();
    }

    pub fn is_shutdown(&self) -> bool {
        self.shutdown_token.is_cancelled()
    }

    pub fn reason(&self) -> Option<ShutdownReason> {
        self.reason.lock().ok().and_then(|slot| slot.clone())
    }

    pub async fn wait_for_shutdown(&self) {
        self.shutdown_token.cancelled().await;
    }

    /// 安装系统信号处理器 (Ctrl+C, SIGTERM)
    pub fn install_signal_handlers(self: &Arc<Self>) {
        let manager = Arc::clone(self);
        tokio::spawn(async move {
            if let Ok(()) = tokio::signal::ctrl_c().await {
                tracing::info!("Received Ctrl+C, initiating graceful shutdown...");
                manager.shutdown(ShutdownReason::UserInitiated);
            }
        });

        #[cfg(unix)]
        {
            let manager = Arc::clone(self);
            tokio::spawn(async move {
                use tokio::signal::unix::{signal, SignalKind};
                if let Ok(mut sigterm) = signal(SignalKind::terminate()) {
                    sigterm.recv().await;
                    tracing::info!("Received SIGTERM, initiating graceful shutdown...");
                    manager.shutdown(ShutdownReason::Signal);
                }
            });
        }
    }
}

impl Default for ShutdownManager {
    fn default() -> Self {
        Self::new()
    }
}
