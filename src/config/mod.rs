pub mod channel;
pub mod cli;
pub mod toml_config;

pub use channel::{AnchorStyle, ChannelSettings};
pub use cli::CliConfig;
pub use toml_config::TomlConfig;

pub const DEFAULT_REPOSITORY_DIR: &str = "claude-code";
pub const DEFAULT_CHANGELOG_FILE: &str = "CHANGELOG.md";
pub const DEFAULT_OUTPUT_PATH: &str = "public/claude-code-changelog.xml";
pub const DEFAULT_HISTORY_TIMEOUT_SECS: u64 = 10;
