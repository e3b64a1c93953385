use crate::domain::model::{LineAttribution, RenderedFeed, VersionRecord};
use crate::config::channel::ChannelSettings;
use crate::utils::error::{DateResolutionError, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use std::time::Duration;

pub trait Storage: Send + Sync {
    fn exists(&self, path: &str) -> impl std::future::Future<Output = bool> + Send;
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Line-level history of a tracked file.
pub trait HistoryStore: Send + Sync {
    fn line_attributions(
        &self,
        file: &str,
    ) -> impl std::future::Future<
        Output = std::result::Result<Vec<LineAttribution>, DateResolutionError>,
    > + Send;
}

pub trait ConfigProvider: Send + Sync {
    /// Directory holding the changelog's repository, relative to the working directory.
    fn repository_dir(&self) -> &str;
    /// Changelog file name inside [`ConfigProvider::repository_dir`].
    fn changelog_file(&self) -> &str;
    fn output_path(&self) -> &str;
    fn history_timeout(&self) -> Duration;
    fn channel(&self) -> &ChannelSettings;

    fn changelog_path(&self) -> String {
        PathBuf::from(self.repository_dir())
            .join(self.changelog_file())
            .to_string_lossy()
            .into_owned()
    }
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<VersionRecord>>;
    async fn transform(&self, records: Vec<VersionRecord>) -> Result<RenderedFeed>;
    async fn load(&self, feed: RenderedFeed) -> Result<String>;
}
