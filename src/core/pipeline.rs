use crate::core::changelog;
use crate::core::dates::DateResolver;
use crate::core::feed::FeedRenderer;
use crate::core::{ConfigProvider, HistoryStore, Pipeline, RenderedFeed, Storage, VersionRecord};
use crate::utils::error::{FeedError, Result};
use chrono::Utc;

/// Changelog to RSS pipeline.
///
/// * extract: read and parse the changelog
/// * transform: resolve one date per version, render the feed
/// * load: write the document
pub struct ChangelogFeedPipeline<S: Storage, C: ConfigProvider, H: HistoryStore> {
    storage: S,
    config: C,
    resolver: DateResolver<H>,
}

impl<S: Storage, C: ConfigProvider, H: HistoryStore> ChangelogFeedPipeline<S, C, H> {
    pub fn new(storage: S, config: C, history: H) -> Self {
        let resolver = DateResolver::new(history, config.changelog_file());
        Self {
            storage,
            config,
            resolver,
        }
    }

    pub fn config(&self) -> &C {
        &self.config
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider, H: HistoryStore> Pipeline for ChangelogFeedPipeline<S, C, H> {
    async fn extract(&self) -> Result<Vec<VersionRecord>> {
        let path = self.config.changelog_path();

        if !self.storage.exists(&path).await {
            return Err(FeedError::MissingInput { path });
        }

        tracing::debug!("Reading changelog from {}", path);
        let bytes = self.storage.read_file(&path).await?;
        let text = String::from_utf8(bytes).map_err(|e| {
            FeedError::IoError(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
        })?;

        Ok(changelog::parse(&text))
    }

    async fn transform(&self, records: Vec<VersionRecord>) -> Result<RenderedFeed> {
        // one history query per version, strictly in document order
        let mut dates = Vec::with_capacity(records.len());
        let mut unresolved_versions = Vec::new();
        for record in &records {
            let resolution = self.resolver.resolve_or_now(&record.version).await;
            if resolution.is_fallback() {
                unresolved_versions.push(record.version.clone());
            }
            dates.push(resolution.published_at);
        }

        let mut item_dates = dates.iter().copied();
        let document = FeedRenderer::new(self.config.channel()).render(
            &records,
            |_| item_dates.next().unwrap_or_else(Utc::now),
            Utc::now(),
        )?;

        Ok(RenderedFeed {
            document,
            published_at: dates,
            unresolved_versions,
        })
    }

    async fn load(&self, feed: RenderedFeed) -> Result<String> {
        let output_path = self.config.output_path().to_string();

        tracing::debug!(
            "Writing feed ({} bytes, {} items) to {}",
            feed.document.len(),
            feed.published_at.len(),
            output_path
        );
        self.storage
            .write_file(&output_path, feed.document.as_bytes())
            .await?;

        Ok(output_path)
    }
}
