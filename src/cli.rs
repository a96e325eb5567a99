//! 命令行参数

use std::path::PathBuf;

use clap::Parser;

/// Ron AI：健康倡导助手演示
#[derive(Parser, Debug)]
#[command(name = "ron-ai")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// 不启动界面：跑完演示与给定消息后把最终状态以 JSON 打印到 stdout
    #[arg(long)]
    pub headless: bool,

    /// 跳过首屏演示
    #[arg(long)]
    pub no_demo: bool,

    /// 额外的配置文件（覆盖 config/default.toml）
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// 无界面模式下依次发送的消息
    #[arg(value_name = "MESSAGE")]
    pub messages: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parse_no_args() {
        let cli = Cli::parse_from(["ron-ai"]);
        assert!(!cli.headless);
        assert!(!cli.no_demo);
        assert!(cli.config.is_none());
        assert!(cli.messages.is_empty());
    }

    #[test]
    fn test_cli_parse_headless_with_messages() {
        let cli = Cli::parse_from([
            "ron-ai",
            "--headless",
            "--no-demo",
            "--config",
            "local.toml",
            "find a doctor",
            "book an appointment",
        ]);
        assert!(cli.headless);
        assert!(cli.no_demo);
        assert_eq!(cli.config, Some(PathBuf::from("local.toml")));
        assert_eq!(cli.messages, ["find a doctor", "book an appointment"]);
    }

    #[test]
    fn test_cli_rejects_unknown_flag() {
        assert!(Cli::try_parse_from(["ron-ai", "--hedless"]).is_err());
    }

    #[test]
    fn test_cli_config_requires_value() {
        assert!(Cli::try_parse_from(["ron-ai", "--config"]).is_err());
    }

    #[test]
    fn test_cli_help() {
        Cli::command().debug_assert();
    }
}
