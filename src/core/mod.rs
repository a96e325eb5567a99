//! 核心层：错误、共享状态、可取消等待、控制器、命令队列与关闭处理

pub mod copilot;
pub mod error;
pub mod orchestrator;
pub mod pacer;
pub mod shutdown;
pub mod state;

pub use copilot::{Copilot, BROWSE_TASK};
pub use error::AppError;
pub use orchestrator::{spawn_copilot, Command};
pub use pacer::Pacer;
pub use shutdown::{ShutdownManager, ShutdownReason};
pub use state::{InputState, StateStore, UiState};
