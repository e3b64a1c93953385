//! Splits a changelog into per-version sections.
//!
//! A section starts at a line of the form `## <major>.<minor>.<patch>`;
//! anything after the version on the heading line is ignored. Lines before
//! the first heading are dropped.

use crate::domain::model::VersionRecord;
use regex::Regex;
use std::sync::LazyLock;

static VERSION_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^## ([0-9]+\.[0-9]+\.[0-9]+)").expect("version heading pattern is a valid regex")
});

/// Returns the version captured from a `## x.y.z` heading line.
pub fn heading_version(line: &str) -> Option<&str> {
    VERSION_HEADING
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

enum ParserState<'a> {
    NoOpenVersion,
    Accumulating {
        version: &'a str,
        lines: Vec<&'a str>,
    },
}

impl<'a> ParserState<'a> {
    /// Closes the open version, if any, into `records`.
    fn close(self, records: &mut Vec<VersionRecord>) {
        if let ParserState::Accumulating { version, lines } = self {
            records.push(VersionRecord::new(version, lines.join("\n").trim()));
        }
    }
}

/// Parses changelog text into version records in document order.
pub fn parse(text: &str) -> Vec<VersionRecord> {
    let mut records = Vec::new();
    let mut state = ParserState::NoOpenVersion;

    for line in text.lines() {
        if let Some(version) = heading_version(line) {
            let previous = std::mem::replace(
                &mut state,
                ParserState::Accumulating {
                    version,
                    lines: Vec::new(),
                },
            );
            previous.close(&mut records);
            continue;
        }

        if let ParserState::Accumulating { lines, .. } = &mut state {
            // blank lines only count once the body has started
            if !lines.is_empty() || !line.trim().is_empty() {
                lines.push(line);
            }
        }
    }

    state.close(&mut records);

    tracing::debug!("Parsed {} version sections", records.len());
    records
}
