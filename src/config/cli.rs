use crate::config::channel::ChannelSettings;
use crate::config::{
    DEFAULT_CHANGELOG_FILE, DEFAULT_HISTORY_TIMEOUT_SECS, DEFAULT_OUTPUT_PATH,
    DEFAULT_REPOSITORY_DIR,
};
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, validate_positive_number, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "changelog-rss")]
#[command(version)]
#[command(about = "Generate an RSS feed from a project's CHANGELOG.md")]
pub struct CliConfig {
    /// Directory that holds the changelog repository and receives the output
    #[arg(long, default_value = ".")]
    pub working_dir: String,

    /// Repository directory, relative to the working directory
    #[arg(long, default_value = DEFAULT_REPOSITORY_DIR)]
    pub repository_dir: String,

    /// Changelog file inside the repository
    #[arg(long, default_value = DEFAULT_CHANGELOG_FILE)]
    pub changelog_file: String,

    /// Feed output path, relative to the working directory
    #[arg(long, default_value = DEFAULT_OUTPUT_PATH)]
    pub output_path: String,

    /// Upper bound for one history lookup, in seconds
    #[arg(long, default_value_t = DEFAULT_HISTORY_TIMEOUT_SECS)]
    pub history_timeout_secs: u64,

    /// Load settings from a TOML file instead of the flags above
    #[arg(long)]
    pub config: Option<String>,

    #[command(flatten)]
    pub channel: ChannelSettings,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,
}

impl ConfigProvider for CliConfig {
    fn repository_dir(&self) -> &str {
        &self.repository_dir
    }

    fn changelog_file(&self) -> &str {
        &self.changelog_file
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn history_timeout(&self) -> Duration {
        Duration::from_secs(self.history_timeout_secs)
    }

    fn channel(&self) -> &ChannelSettings {
        &self.channel
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("working_dir", &self.working_dir)?;
        validate_path("repository_dir", &self.repository_dir)?;
        validate_path("changelog_file", &self.changelog_file)?;
        validate_path("output_path", &self.output_path)?;
        validate_positive_number("history_timeout_secs", self.history_timeout_secs, 1)?;
        self.channel.validate()
    }
}
