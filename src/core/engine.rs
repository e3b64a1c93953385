use crate::core::Pipeline;
use crate::utils::error::Result;

/// Summary of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub output_path: String,
    pub versions: usize,
    pub unresolved_versions: Vec<String>,
}

pub struct FeedEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> FeedEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<RunReport> {
        tracing::info!("Generating RSS feed for changelog...");

        let records = self.pipeline.extract().await?;
        tracing::info!("Found {} versions in changelog", records.len());

        let versions = records.len();
        let feed = self.pipeline.transform(records).await?;
        if !feed.unresolved_versions.is_empty() {
            tracing::warn!(
                "{} of {} versions use the generation time as their date",
                feed.unresolved_versions.len(),
                versions
            );
        }
        let unresolved_versions = feed.unresolved_versions.clone();

        let output_path = self.pipeline.load(feed).await?;
        tracing::info!("RSS feed generated: {}", output_path);

        Ok(RunReport {
            output_path,
            versions,
            unresolved_versions,
        })
    }
}
