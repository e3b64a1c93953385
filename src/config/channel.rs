use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_range, validate_url, Validate,
};
use clap::{Args, ValueEnum};
use serde::{Deserialize, Serialize};

pub const DEFAULT_TITLE: &str = "Claude Code Changelog";
pub const DEFAULT_DESCRIPTION: &str = "Latest updates and changes to Claude Code";
pub const DEFAULT_FEED_URL: &str =
    "https://anthropics.github.io/claude-code-changelog-rss/claude-code-changelog.xml";
pub const DEFAULT_SITE_URL: &str = "https://github.com/anthropics/claude-code";
pub const DEFAULT_LANGUAGE: &str = "en";
pub const DEFAULT_TTL_MINUTES: u32 = 60 * 24;
pub const DEFAULT_PRODUCT_NAME: &str = "Claude Code";
pub const DEFAULT_CHANGELOG_URL: &str =
    "https://github.com/anthropics/claude-code/blob/main/CHANGELOG.md";
pub const DEFAULT_GUID_PREFIX: &str = "claude-code-";

const MAX_TTL_MINUTES: u32 = 365 * 24 * 60;

/// How a version is turned into the anchor fragment of its link.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum AnchorStyle {
    /// `1.0.2` -> `#1.0.2`
    #[default]
    Verbatim,
    /// `1.0.2` -> `#102`, the slug GitHub generates for a `## 1.0.2` heading.
    Github,
}

impl AnchorStyle {
    pub fn fragment(self, version: &str) -> String {
        match self {
            AnchorStyle::Verbatim => version.to_string(),
            AnchorStyle::Github => version.replace('.', ""),
        }
    }
}

/// Fixed channel metadata plus the rules for per-item titles, links and guids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Args)]
#[serde(default)]
pub struct ChannelSettings {
    /// Feed title
    #[arg(long, default_value = DEFAULT_TITLE)]
    pub title: String,

    /// Feed description
    #[arg(long, default_value = DEFAULT_DESCRIPTION)]
    pub description: String,

    /// Canonical URL the feed is published at
    #[arg(long, default_value = DEFAULT_FEED_URL)]
    pub feed_url: String,

    /// Site the feed describes
    #[arg(long, default_value = DEFAULT_SITE_URL)]
    pub site_url: String,

    #[arg(long, default_value = DEFAULT_LANGUAGE)]
    pub language: String,

    /// Cache lifetime hint for readers, in minutes
    #[arg(long, default_value_t = DEFAULT_TTL_MINUTES)]
    pub ttl_minutes: u32,

    /// Prefix of every item title
    #[arg(long, default_value = DEFAULT_PRODUCT_NAME)]
    pub product_name: String,

    /// Hosted changelog; item links point at anchors in it
    #[arg(long, default_value = DEFAULT_CHANGELOG_URL)]
    pub changelog_url: String,

    #[arg(long, default_value = DEFAULT_GUID_PREFIX)]
    pub guid_prefix: String,

    #[arg(long, value_enum, default_value_t = AnchorStyle::Verbatim)]
    pub anchor_style: AnchorStyle,
}

impl Default for ChannelSettings {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            description: DEFAULT_DESCRIPTION.to_string(),
            feed_url: DEFAULT_FEED_URL.to_string(),
            site_url: DEFAULT_SITE_URL.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            ttl_minutes: DEFAULT_TTL_MINUTES,
            product_name: DEFAULT_PRODUCT_NAME.to_string(),
            changelog_url: DEFAULT_CHANGELOG_URL.to_string(),
            guid_prefix: DEFAULT_GUID_PREFIX.to_string(),
            anchor_style: AnchorStyle::default(),
        }
    }
}

impl Validate for ChannelSettings {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("channel.title", &self.title)?;
        validate_non_empty_string("channel.description", &self.description)?;
        validate_non_empty_string("channel.language", &self.language)?;
        validate_non_empty_string("channel.product_name", &self.product_name)?;
        validate_non_empty_string("channel.guid_prefix", &self.guid_prefix)?;
        validate_url("channel.feed_url", &self.feed_url)?;
        validate_url("channel.site_url", &self.site_url)?;
        validate_url("channel.changelog_url", &self.changelog_url)?;
        validate_range("channel.ttl_minutes", self.ttl_minutes, 1, MAX_TTL_MINUTES)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchor_fragments() {
        assert_eq!(AnchorStyle::Verbatim.fragment("1.0.54"), "1.0.54");
        assert_eq!(AnchorStyle::Github.fragment("1.0.54"), "1054");
    }

    #[test]
    fn test_default_channel_is_valid() {
        assert!(ChannelSettings::default().validate().is_ok());
    }

    #[test]
    fn test_zero_ttl_rejected() {
        let channel = ChannelSettings {
            ttl_minutes: 0,
            ..ChannelSettings::default()
        };
        assert!(channel.validate().is_err());
    }
}
