//! Shared helpers for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

pub const EXAMPLE_CHANGELOG: &str = "\
# Changelog

## 1.0.2
- Fixed a bug

## 1.0.1
- Initial release
";

/// Working directory laid out the way the binary expects it.
pub struct Workspace {
    temp_dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self { temp_dir }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn repository(&self) -> std::path::PathBuf {
        self.path().join("claude-code")
    }

    pub fn output(&self) -> std::path::PathBuf {
        self.path().join("public").join("claude-code-changelog.xml")
    }

    /// Writes `claude-code/CHANGELOG.md`.
    pub fn with_changelog(self, content: &str) -> Self {
        fs::create_dir_all(self.repository()).expect("Failed to create repository dir");
        fs::write(self.repository().join("CHANGELOG.md"), content)
            .expect("Failed to write CHANGELOG.md");
        self
    }

    pub fn read_output(&self) -> String {
        fs::read_to_string(self.output()).expect("Failed to read feed")
    }
}

pub fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

fn git(dir: &Path, args: &[&str], date: Option<&str>) {
    let mut cmd = Command::new("git");
    cmd.args(["-c", "user.email=test@example.com", "-c", "user.name=Test"])
        .args(["-c", "commit.gpgsign=false"])
        .args(args)
        .current_dir(dir);
    if let Some(date) = date {
        cmd.env("GIT_AUTHOR_DATE", date).env("GIT_COMMITTER_DATE", date);
    }
    let status = cmd.status().expect("git not found");
    assert!(status.success(), "git {args:?} failed");
}

pub fn git_init(dir: &Path) {
    git(dir, &["init", "-q"], None);
}

/// Writes the changelog and commits it with the given ISO-8601 date.
pub fn commit_changelog(dir: &Path, content: &str, date: &str) {
    fs::write(dir.join("CHANGELOG.md"), content).expect("Failed to write CHANGELOG.md");
    git(dir, &["add", "CHANGELOG.md"], None);
    git(dir, &["commit", "-q", "-m", "Update changelog"], Some(date));
}
