// src/main.rs

use anyhow::Context;
use clap::Parser;
use log::LevelFilter;
use log4rs::{
    append::console::{ConsoleAppender, Target},
    append::file::FileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use notion2gutenberg::{
    CommandLineInput, DocumentAssembler, DocumentRecord, DocumentSource, JsonPublisher,
    NotionHttpClient, NotionRepository, PublishReport, PublishTarget, RecordPublisher, SyncConfig,
};
use std::fs;
use std::sync::Arc;

/// Sets up logging configuration.
///
/// Console output goes to stderr so stdout stays free for records.
fn setup_logging(verbose: bool) -> anyhow::Result<()> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let log_file_path = std::env::temp_dir().join("notion2gutenberg.log");
    if let Some(parent) = log_file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let pattern = if verbose {
        "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}"
    } else {
        "{m}{n}"
    };

    let console_appender = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}",
        )))
        .build(&log_file_path)?;

    // The root level admits Debug so the file always gets it; the console
    // threshold follows --verbose.
    let config = Config::builder()
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(log_level)))
                .build("console", Box::new(console_appender)),
        )
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(LevelFilter::Debug)))
                .build("file", Box::new(file_appender)),
        )
        .build(
            Root::builder()
                .appender("console")
                .appender("file")
                .build(LevelFilter::Debug),
        )?;

    log4rs::init_config(config)?;
    log::info!("Logging initialized. Log file: {}", log_file_path.display());
    Ok(())
}

/// Runs one sync: query or single page, then publish.
async fn execute_sync(config: &SyncConfig) -> anyhow::Result<()> {
    let client = NotionHttpClient::new(&config.api_key, config.request_timeout)
        .context("failed to build the Notion HTTP client")?;
    let repository: Arc<dyn NotionRepository> = Arc::new(client);
    let assembler = DocumentAssembler::from_config(repository, config);

    let records = fetch(&assembler, config).await?;
    let publisher = JsonPublisher::for_output(config.output_file.as_deref());
    let report = publisher
        .publish(&records)
        .with_context(|| format!("failed to publish records to {}", publisher.target()))?;

    report_completion(&report);
    Ok(())
}

async fn fetch(
    assembler: &DocumentAssembler,
    config: &SyncConfig,
) -> anyhow::Result<Vec<DocumentRecord>> {
    match &config.page {
        Some(page) => {
            let record = assembler
                .get_document_record(page)
                .await
                .with_context(|| format!("failed to sync page {}", page))?;
            Ok(vec![record])
        }
        None => assembler
            .fetch_records(config.query.clone())
            .await
            .with_context(|| format!("failed to sync database {}", config.database_id)),
    }
}

fn report_completion(report: &PublishReport) {
    let noun = if report.records_published == 1 {
        "post"
    } else {
        "posts"
    };
    eprintln!("Found {} {}.", report.records_published, noun);

    if let PublishTarget::File(path) = &report.target {
        eprintln!("Records saved to {}", path.display());
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CommandLineInput::parse();

    setup_logging(cli.verbose)?;

    let config = SyncConfig::resolve(cli)?;
    log::debug!(
        "Syncing database {} with key {} ({} concurrent, {:?} timeout)",
        config.database_id,
        config.api_key,
        config.concurrency,
        config.request_timeout
    );

    execute_sync(&config).await
}
