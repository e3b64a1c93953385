use crate::core::changelog::heading_version;
use crate::domain::ports::HistoryStore;
use crate::utils::error::DateResolutionError;
use chrono::{DateTime, Utc};

/// Outcome of [`DateResolver::resolve_or_now`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub published_at: DateTime<Utc>,
    /// Set when `published_at` is the fallback rather than a history date.
    pub fallback_reason: Option<DateResolutionError>,
}

impl Resolution {
    pub fn is_fallback(&self) -> bool {
        self.fallback_reason.is_some()
    }
}

/// Infers when a version heading was introduced from the changelog's line history.
///
/// History attribution reflects the last edit of the heading line, so a later
/// touch-up of that line moves the date forward. Good enough for a feed.
pub struct DateResolver<H: HistoryStore> {
    history: H,
    changelog_file: String,
}

impl<H: HistoryStore> DateResolver<H> {
    pub fn new(history: H, changelog_file: impl Into<String>) -> Self {
        Self {
            history,
            changelog_file: changelog_file.into(),
        }
    }

    pub async fn resolve(&self, version: &str) -> Result<DateTime<Utc>, DateResolutionError> {
        let attributions = self.history.line_attributions(&self.changelog_file).await?;

        let mut matches = attributions
            .iter()
            .filter(|a| heading_version(&a.content) == Some(version));

        let attribution = match (matches.next(), matches.next()) {
            (None, _) => {
                return Err(DateResolutionError::NoMatch {
                    version: version.to_string(),
                })
            }
            (Some(only), None) => only,
            (Some(_), Some(_)) => {
                return Err(DateResolutionError::Ambiguous {
                    version: version.to_string(),
                    count: 2 + matches.count(),
                })
            }
        };

        tracing::debug!(
            "Version {} heading is line {} (commit {})",
            version,
            attribution.line_number,
            attribution.commit
        );

        Ok(attribution.attributed_at()?.with_timezone(&Utc))
    }

    /// Like [`DateResolver::resolve`], but falls back to the current time and
    /// logs a warning instead of failing.
    pub async fn resolve_or_now(&self, version: &str) -> Resolution {
        match self.resolve(version).await {
            Ok(published_at) => Resolution {
                published_at,
                fallback_reason: None,
            },
            Err(reason) => {
                tracing::warn!(
                    "Could not determine date for version {}, using current date: {}",
                    version,
                    reason
                );
                Resolution {
                    published_at: Utc::now(),
                    fallback_reason: Some(reason),
                }
            }
        }
    }
}
