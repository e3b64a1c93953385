use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::error::DateResolutionError;

/// One `## major.minor.patch` section of the changelog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionRecord {
    pub version: String,
    pub body: String,
}

impl VersionRecord {
    pub fn new(version: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            body: body.into(),
        }
    }
}

/// A rendered feed item, built from a [`VersionRecord`] and its resolved date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedEntry {
    pub title: String,
    pub html_body: String,
    pub link: String,
    pub guid: String,
    pub published_at: DateTime<Utc>,
}

/// Per-line attribution reported by the history store.
///
/// The time fields are kept raw so that a malformed value is reported by the
/// date resolver rather than dropping the whole query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineAttribution {
    pub commit: String,
    pub line_number: usize,
    pub author_time: String,
    pub author_tz: String,
    pub content: String,
}

impl LineAttribution {
    /// Parses `author-time` (unix seconds) and `author-tz` (`+HHMM`).
    pub fn attributed_at(&self) -> Result<DateTime<FixedOffset>, DateResolutionError> {
        let invalid = || DateResolutionError::InvalidTimestamp {
            raw: format!("{} {}", self.author_time, self.author_tz),
        };

        let seconds: i64 = self.author_time.trim().parse().map_err(|_| invalid())?;
        let offset = parse_tz_offset(self.author_tz.trim()).ok_or_else(invalid)?;
        let utc = DateTime::<Utc>::from_timestamp(seconds, 0).ok_or_else(invalid)?;

        Ok(utc.with_timezone(&offset))
    }
}

fn parse_tz_offset(tz: &str) -> Option<FixedOffset> {
    if tz.len() != 5 || !tz.is_ascii() {
        return None;
    }
    let sign = match &tz[..1] {
        "+" => 1,
        "-" => -1,
        _ => return None,
    };
    let hours: i32 = tz[1..3].parse().ok()?;
    let minutes: i32 = tz[3..5].parse().ok()?;
    if minutes >= 60 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

/// Output of the transform stage.
#[derive(Debug, Clone)]
pub struct RenderedFeed {
    pub document: String,
    /// Publication date of each item, in document order.
    pub published_at: Vec<DateTime<Utc>>,
    /// Versions whose publication date fell back to the generation time.
    pub unresolved_versions: Vec<String>,
}
