//! Changelog to RSS converter.
//!
//! Reads a `CHANGELOG.md` made of `## x.y.z` sections, dates each section from
//! the file's git history, and writes an RSS 2.0 feed with one item per version.

pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::{GitBlame, LocalStorage};
pub use config::{ChannelSettings, CliConfig, TomlConfig};
pub use self::core::{
    changelog::parse, dates::DateResolver, engine::FeedEngine, feed::FeedRenderer,
    pipeline::ChangelogFeedPipeline,
};
pub use utils::error::{DateResolutionError, FeedError, Result};
