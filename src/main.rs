use changelog_rss::core::ConfigProvider;
use changelog_rss::utils::{logger, validation::Validate};
use changelog_rss::{
    ChangelogFeedPipeline, CliConfig, FeedEngine, FeedError, GitBlame, LocalStorage, TomlConfig,
};
use clap::Parser;
use std::path::Path;

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    let working_dir = cli.working_dir.clone();
    let result = match cli.config.clone() {
        Some(path) => match TomlConfig::from_file(&path) {
            Ok(config) => {
                tracing::info!("Loaded configuration from {}", path);
                run(config, &working_dir).await
            }
            Err(e) => Err(e),
        },
        None => run(cli, &working_dir).await,
    };

    if let Err(e) = result {
        report_failure(&e);
        std::process::exit(e.exit_code());
    }
}

async fn run<C: ConfigProvider + Validate>(config: C, working_dir: &str) -> Result<(), FeedError> {
    config.validate()?;

    let storage = LocalStorage::new(working_dir);
    let history = GitBlame::new(
        Path::new(working_dir).join(config.repository_dir()),
        config.history_timeout(),
    );
    let pipeline = ChangelogFeedPipeline::new(storage, config, history);

    let report = FeedEngine::new(pipeline).run().await?;
    if !report.unresolved_versions.is_empty() {
        tracing::debug!("Undated versions: {}", report.unresolved_versions.join(", "));
    }

    Ok(())
}

fn report_failure(e: &FeedError) {
    tracing::error!(
        "Feed generation failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );

    eprintln!("{}", e.user_friendly_message());
    eprintln!("{}", e.recovery_suggestion());
}
