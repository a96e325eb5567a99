//! 应用配置：从 config/default.toml 与环境变量加载
//!
//! 加载顺序：先读 TOML 文件，再用环境变量 `RON__*` 覆盖（双下划线表示嵌套，如 `RON__DEMO__ENABLED=false`）。

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

/// 应用配置根（对应 config/default.toml 的顶层）
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub app: AppSection,
    pub agents: AgentsSection,
    pub demo: DemoSection,
    pub browser: BrowserSection,
}

/// [app] 段：应用名与日志设置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppSection {
    pub name: String,
    /// 未设置 RUST_LOG 时使用的过滤指令
    pub log_filter: String,
    /// TUI 模式下的日志文件
    pub log_file: PathBuf,
}

impl Default for AppSection {
    fn default() -> Self {
        Self {
            name: "Ron AI".to_string(),
            log_filter: "info".to_string(),
            log_file: PathBuf::from("ron-ai.log"),
        }
    }
}

/// [agents] 段：路由各阶段的模拟延迟（毫秒）
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AgentsSection {
    pub analyze_ms: u64,
    pub connect_ms: u64,
    pub provider_search_ms: u64,
    /// 开启 Deep Research 时 provider-search 的延迟
    pub deep_research_ms: u64,
    pub medication_ms: u64,
    pub appointment_ms: u64,
    pub general_ms: u64,
    /// 个性化提示词生成的模拟耗时
    pub prompt_builder_ms: u64,
}

impl Default for AgentsSection {
    fn default() -> Self {
        Self {
            analyze_ms: 1000,
            connect_ms: 800,
            provider_search_ms: 2000,
            deep_research_ms: 3000,
            medication_ms: 1500,
            appointment_ms: 1800,
            general_ms: 1200,
            prompt_builder_ms: 2500,
        }
    }
}

impl AgentsSection {
    pub fn analyze(&self) -> Duration {
        Duration::from_millis(self.analyze_ms)
    }

    pub fn connect(&self) -> Duration {
        Duration::from_millis(self.connect_ms)
    }

    pub fn prompt_builder(&self) -> Duration {
        Duration::from_millis(self.prompt_builder_ms)
    }
}

/// [demo] 段：首屏脚本化演示的节奏
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DemoSection {
    pub enabled: bool,
    pub start_delay_ms: u64,
    pub hero_exit_ms: u64,
    /// 模拟输入时每个字符的间隔
    pub keystroke_ms: u64,
    pub pre_send_ms: u64,
    /// 发送按钮「按下」动画时长
    pub press_ms: u64,
    pub reply_delay_ms: u64,
    /// 助手回复逐字显示的速度
    pub typewriter_per_char_ms: u64,
    pub typewriter_buffer_ms: u64,
    pub panel_delay_ms: u64,
}

impl Default for DemoSection {
    fn default() -> Self {
        Self {
            enabled: true,
            start_delay_ms: 2000,
            hero_exit_ms: 500,
            keystroke_ms: 30,
            pre_send_ms: 500,
            press_ms: 200,
            reply_delay_ms: 2000,
            typewriter_per_char_ms: 15,
            typewriter_buffer_ms: 1000,
            panel_delay_ms: 1500,
        }
    }
}

/// [browser] 段：Computer-Use 面板使用的地址
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BrowserSection {
    /// 浏览按钮与调研触发时打开的地址
    pub home_url: String,
    /// start 未提供 url 时的占位地址
    pub default_url: String,
}

impl Default for BrowserSection {
    fn default() -> Self {
        Self {
            home_url: "https://ron-ai.io".to_string(),
            default_url: "https://example.com".to_string(),
        }
    }
}

/// 从 config 目录加载配置，环境变量 RON__* 可覆盖
///
/// 1. 按顺序查找 config/default.toml、../config/default.toml、default.toml，找到则作为第一源
/// 2. 若传入 config_path 且文件存在，则追加该文件（可覆盖前面的键）
/// 3. 最后叠加环境变量 RON__*（双下划线表示嵌套键）
pub fn load_config(config_path: Option<PathBuf>) -> Result<AppConfig, config::ConfigError> {
    let mut builder = config::Config::builder();

    let default_names = ["config/default", "../config/default", "default"];
    for name in default_names {
        let path = format!("{}.toml", name);
        if std::path::Path::new(&path).exists() {
            builder = builder.add_source(config::File::with_name(name).required(false));
            break;
        }
    }

    if let Some(ref path) = config_path {
        if path.exists() {
            builder = builder.add_source(config::File::from(path.clone()).required(false));
        }
    }

    builder = builder.add_source(
        config::Environment::with_prefix("RON")
            .separator("__")
            .try_parsing(true),
    );

    let c = builder.build()?;
    c.try_deserialize()
}
