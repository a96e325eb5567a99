//! Ron AI - 医疗健康助手的编排核心
//!
//! 模块划分：
//! - **agents**: 请求分类、路由状态机、类别处理器与模拟数据
//! - **care_team**: 护理团队（按医生 id 去重）
//! - **computer_agent**: Computer-Use 会话与浏览触发词
//! - **config**: 应用配置加载（TOML + 环境变量）
//! - **core**: 错误、共享状态、可取消等待、Copilot 控制器、命令队列与关闭处理
//! - **cli**: 命令行参数（clap）
//! - **demo**: 首屏演示脚本与执行器
//! - **prompt_builder**: 用户档案与提示词生成
//! - **transcript**: 对话记录
//! - **ui**: Ratatui TUI 界面

pub mod agents;
pub mod care_team;
pub mod cli;
pub mod computer_agent;
pub mod config;
pub mod core;
pub mod demo;
pub mod observability;
pub mod prompt_builder;
pub mod transcript;
pub mod ui;

pub use crate::core::{spawn_copilot, AppError, Command, Copilot, UiState};
