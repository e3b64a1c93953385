use crate::domain::model::LineAttribution;
use crate::domain::ports::HistoryStore;
use crate::utils::error::DateResolutionError;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

/// [`HistoryStore`] backed by `git blame --line-porcelain`.
#[derive(Debug, Clone)]
pub struct GitBlame {
    repository_dir: PathBuf,
    timeout: Duration,
}

impl GitBlame {
    pub fn new(repository_dir: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            repository_dir: repository_dir.into(),
            timeout,
        }
    }
}

impl HistoryStore for GitBlame {
    async fn line_attributions(
        &self,
        file: &str,
    ) -> Result<Vec<LineAttribution>, DateResolutionError> {
        tracing::debug!(
            "Running git blame on {} in {}",
            file,
            self.repository_dir.display()
        );

        let child = Command::new("git")
            .arg("blame")
            .arg("--line-porcelain")
            .arg("--")
            .arg(file)
            .current_dir(&self.repository_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output();

        let output = match tokio::time::timeout(self.timeout, child).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                return Err(DateResolutionError::HistoryUnavailable {
                    reason: format!("failed to run git: {}", e),
                })
            }
            Err(_) => return Err(DateResolutionError::Timeout(self.timeout)),
        };

        if !output.status.success() {
            return Err(DateResolutionError::QueryFailed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stdout =
            String::from_utf8(output.stdout).map_err(|_| DateResolutionError::HistoryUnavailable {
                reason: "git blame output is not UTF-8".to_string(),
            })?;

        let attributions = parse_line_porcelain(&stdout);
        if attributions.is_empty() {
            return Err(DateResolutionError::HistoryUnavailable {
                reason: format!("git blame returned no lines for {}", file),
            });
        }
        Ok(attributions)
    }
}

#[derive(Default)]
struct PendingLine {
    commit: String,
    line_number: usize,
    author_time: String,
    author_tz: String,
}

/// Parses `git blame --line-porcelain` output.
///
/// Every blamed line is a header (`<sha> <orig-line> <final-line> [<count>]`),
/// a run of `key value` lines, and the content prefixed by a tab.
pub fn parse_line_porcelain(output: &str) -> Vec<LineAttribution> {
    let mut attributions = Vec::new();
    let mut pending: Option<PendingLine> = None;

    for line in output.lines() {
        if let Some(content) = line.strip_prefix('\t') {
            if let Some(p) = pending.take() {
                attributions.push(LineAttribution {
                    commit: p.commit,
                    line_number: p.line_number,
                    author_time: p.author_time,
                    author_tz: p.author_tz,
                    content: content.to_string(),
                });
            }
            continue;
        }

        match pending.as_mut() {
            None => {
                let mut parts = line.split_whitespace();
                let (Some(commit), Some(_orig), Some(final_line)) =
                    (parts.next(), parts.next(), parts.next())
                else {
                    continue;
                };
                if !commit.chars().all(|c| c.is_ascii_hexdigit()) {
                    continue;
                }
                pending = Some(PendingLine {
                    commit: commit.to_string(),
                    line_number: final_line.parse().unwrap_or(0),
                    ..PendingLine::default()
                });
            }
            Some(p) => match line.split_once(' ') {
                Some(("author-time", value)) => p.author_time = value.to_string(),
                Some(("author-tz", value)) => p.author_tz = value.to_string(),
                _ => {}
            },
        }
    }

    attributions
}
