/// Binary tests using assert_cmd
///
/// Each test runs the real executable inside a throwaway working directory.
mod common;

use std::process::Command;

use assert_cmd::prelude::*;
use common::{commit_changelog, git_available, git_init, Workspace, EXAMPLE_CHANGELOG};
use predicates::prelude::*;

fn changelog_rss() -> Command {
    Command::new(env!("CARGO_BIN_EXE_changelog-rss"))
}

#[test]
fn test_missing_changelog_exits_with_one() {
    let workspace = Workspace::new();

    changelog_rss()
        .current_dir(workspace.path())
        .env("RUST_LOG", "off")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("claude-code/CHANGELOG.md"));

    assert!(!workspace.output().exists());
    assert!(!workspace.path().join("public").exists());
}

#[test]
fn test_missing_changelog_leaves_existing_output_untouched() {
    let workspace = Workspace::new();
    std::fs::create_dir_all(workspace.output().parent().unwrap()).unwrap();
    std::fs::write(workspace.output(), "previous feed").unwrap();

    changelog_rss()
        .arg("--working-dir")
        .arg(workspace.path())
        .assert()
        .code(1);

    assert_eq!(workspace.read_output(), "previous feed");
}

#[test]
fn test_generates_feed_without_history() {
    // no git repository: every date falls back, the run still succeeds
    let workspace = Workspace::new().with_changelog(EXAMPLE_CHANGELOG);

    changelog_rss()
        .current_dir(workspace.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 2 versions in changelog"))
        .stdout(predicate::str::contains("Could not determine date for version 1.0.2"))
        .stdout(predicate::str::contains("Could not determine date for version 1.0.1"))
        .stdout(predicate::str::contains("public/claude-code-changelog.xml"));

    let xml = workspace.read_output();
    let first = xml.find("Claude Code 1.0.2").unwrap();
    let second = xml.find("Claude Code 1.0.1").unwrap();
    assert!(first < second);
    assert_eq!(xml.matches("<item>").count(), 2);
    assert!(xml.contains("<guid isPermaLink=\"false\">claude-code-1.0.2</guid>"));
    assert!(xml.contains("<li>Fixed a bug</li>"));
}

#[test]
fn test_completion_is_reported_once() {
    let workspace = Workspace::new().with_changelog(EXAMPLE_CHANGELOG);

    let assert = changelog_rss()
        .current_dir(workspace.path())
        .env_remove("RUST_LOG")
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).into_owned();
    assert_eq!(stdout.matches("RSS feed generated").count(), 1);
    assert!(stdout.contains("RSS feed generated: public/claude-code-changelog.xml"));
}

#[test]
fn test_dates_come_from_git_history() {
    if !git_available() {
        eprintln!("git not installed, skipping");
        return;
    }

    let workspace = Workspace::new();
    let repo = workspace.repository();
    std::fs::create_dir_all(&repo).unwrap();
    git_init(&repo);
    commit_changelog(
        &repo,
        "# Changelog\n\n## 1.0.1\n- Initial release\n",
        "2025-06-01T09:30:00+00:00",
    );
    commit_changelog(&repo, EXAMPLE_CHANGELOG, "2025-07-01T12:00:00+02:00");

    changelog_rss()
        .current_dir(workspace.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Could not determine date").not());

    let xml = workspace.read_output();
    assert!(xml.contains("<pubDate>Tue, 01 Jul 2025 10:00:00 GMT</pubDate>"));
    assert!(xml.contains("<pubDate>Sun, 01 Jun 2025 09:30:00 GMT</pubDate>"));
}

#[test]
fn test_toml_config_overrides_channel() {
    let workspace = Workspace::new().with_changelog(EXAMPLE_CHANGELOG);
    let config_path = workspace.path().join("feed.toml");
    std::fs::write(
        &config_path,
        "[channel]\nproduct_name = \"Widget\"\nguid_prefix = \"widget-\"\n\n[load]\noutput_path = \"out/widget.xml\"\n",
    )
    .unwrap();

    changelog_rss()
        .current_dir(workspace.path())
        .arg("--config")
        .arg(&config_path)
        .env("RUST_LOG", "off")
        .assert()
        .success();

    let xml = std::fs::read_to_string(workspace.path().join("out/widget.xml")).unwrap();
    assert!(xml.contains("Widget 1.0.2"));
    assert!(xml.contains("widget-1.0.1"));
    assert!(!workspace.output().exists());
}

#[test]
fn test_invalid_flag_value_is_rejected() {
    let workspace = Workspace::new().with_changelog(EXAMPLE_CHANGELOG);

    changelog_rss()
        .current_dir(workspace.path())
        .args(["--feed-url", "ftp://example.com/feed.xml"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("feed_url"));

    assert!(!workspace.output().exists());
}

#[test]
fn test_help_flag() {
    changelog_rss()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--output-path"))
        .stdout(predicate::str::contains("--anchor-style"));
}
