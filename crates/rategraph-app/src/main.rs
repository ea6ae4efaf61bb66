//! rategraph - historical FX rates compiled into a PDF of trend charts

use anyhow::Result;
use clap::Parser;
use rategraph_charts::{ChartsPdfBuilder, DocumentMeta};
use rategraph_common::utils::window_dates;
use rategraph_common::{init_logging, ApiConfig, CurrencyApiClient, LoggingConfig};
use rategraph_config::{Config, ConfigLoader};
use rategraph_store::RatesStorage;
use std::path::PathBuf;
use tracing::{error, info};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<String>,

    /// Log level override
    #[arg(short, long)]
    log_level: Option<String>,

    /// Output file path override
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => ConfigLoader::load_from_file(path)?,
        None => ConfigLoader::load()?,
    };

    init_logging(LoggingConfig {
        level: args
            .log_level
            .clone()
            .unwrap_or_else(|| config.logging.level.clone()),
        compact: config.logging.compact,
        file_path: config.logging.file.clone(),
    })
    .map_err(|e| anyhow::anyhow!("failed to initialize logging: {e}"))?;

    info!("starting rategraph");

    // Any failure here is final: log with full context and exit non-zero
    if let Err(error) = run(&config, args.output).await {
        error!(error = %error, "run failed, no report produced");
        return Err(error.into());
    }

    Ok(())
}

async fn run(config: &Config, output_override: Option<PathBuf>) -> rategraph_common::Result<()> {
    let api_config = ApiConfig::new(
        config.api.base_url.as_str(),
        config.api.version.as_str(),
    )
    .with_timeout(config.api.timeout_seconds)
    .with_max_retries(config.api.max_retries as usize);
    let client = CurrencyApiClient::new(api_config)?;
    let mut storage = RatesStorage::new(client);

    let dates = window_dates(config.report.interval_days);
    info!(
        days = dates.len(),
        currencies = config.report.base_currencies.len(),
        "updating rates store"
    );
    storage.update(&dates, &config.report.base_currencies).await?;

    let output_path =
        output_override.unwrap_or_else(|| PathBuf::from(&config.report.output_path));
    let builder = ChartsPdfBuilder::new(
        &config.report.style,
        config.chart.width,
        config.chart.height,
        config.report.base_currencies.clone(),
        config.report.quote_currencies.clone(),
        DocumentMeta {
            title: config.metadata.title.clone(),
            author: config.metadata.author.clone(),
            subject: config.metadata.subject.clone(),
            creator: config.metadata.creator.clone(),
        },
    );
    builder.compose_pdf(storage.rates(), &output_path)?;

    Ok(())
}
