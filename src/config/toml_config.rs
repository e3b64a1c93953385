use crate::config::channel::ChannelSettings;
use crate::config::{
    DEFAULT_CHANGELOG_FILE, DEFAULT_HISTORY_TIMEOUT_SECS, DEFAULT_OUTPUT_PATH,
    DEFAULT_REPOSITORY_DIR,
};
use crate::core::ConfigProvider;
use crate::utils::error::{FeedError, Result};
use crate::utils::validation::{validate_path, validate_positive_number, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;
use std::time::Duration;

static ENV_VAR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is a valid regex")
});

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub source: SourceConfig,
    pub history: HistoryConfig,
    pub channel: ChannelSettings,
    pub load: LoadConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub repository_dir: String,
    pub changelog_file: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            repository_dir: DEFAULT_REPOSITORY_DIR.to_string(),
            changelog_file: DEFAULT_CHANGELOG_FILE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    pub timeout_seconds: u64,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: DEFAULT_HISTORY_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadConfig {
    pub output_path: String,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            output_path: DEFAULT_OUTPUT_PATH.to_string(),
        }
    }
}

impl TomlConfig {
    /// Loads the configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| FeedError::ConfigError {
            message: format!("cannot read {}: {}", path.display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses the configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| FeedError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Expands `${VAR}` from the environment; unset variables are left as written.
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR_PATTERN
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }
}

impl ConfigProvider for TomlConfig {
    fn repository_dir(&self) -> &str {
        &self.source.repository_dir
    }

    fn changelog_file(&self) -> &str {
        &self.source.changelog_file
    }

    fn output_path(&self) -> &str {
        &self.load.output_path
    }

    fn history_timeout(&self) -> Duration {
        Duration::from_secs(self.history.timeout_seconds)
    }

    fn channel(&self) -> &ChannelSettings {
        &self.channel
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_path("source.repository_dir", &self.source.repository_dir)?;
        validate_path("source.changelog_file", &self.source.changelog_file)?;
        validate_path("load.output_path", &self.load.output_path)?;
        validate_positive_number("history.timeout_seconds", self.history.timeout_seconds, 1)?;
        self.channel.validate()
    }
}
