mod api;
mod application;
mod cli;
mod domain;
mod logging;
mod utils;

use clap::Parser;
use tracing::{info, warn};

use crate::{
    api::{CommandDecompressor, FetchConfig, FileClient},
    application::{load_filenames, BatchCoordinator},
    cli::{Cli, Command},
    domain::{AppError, DownloadStatus},
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let cli = Cli::parse();
    logging::init(cli.verbose, &cli.log_file)?;

    info!("initializing downloader");
    let config = cli.fetch_config();

    match &cli.command {
        Command::UseList { filepath } => {
            let filenames = load_filenames(filepath).await?;
            run(&config, &filenames).await
        }
    }
}

async fn run(config: &FetchConfig, filenames: &[String]) -> Result<(), AppError> {
    if let Some(program) = &config.decompress_program {
        if CommandDecompressor::new(program.clone(), Vec::new()).locate().is_none() {
            warn!(%program, "decompression program not found on PATH, downloads will be reported as decompress errors");
        }
    }

    let client = FileClient::new(config.decompressor())?;
    let mut coordinator = BatchCoordinator::new(client);
    info!("downloader initialized");

    let result = coordinator
        .run_batch(filenames, &config.base_url, &config.save_dir, config.pool_size)
        .await;

    for outcome in result.failures() {
        warn!(
            filename = %outcome.filename,
            status = %outcome.status,
            detail = outcome.detail.as_deref().unwrap_or(""),
            "not retrieved"
        );
    }

    let fetched = result.count(DownloadStatus::Fetched);
    info!(state = %coordinator.state(), total = result.len(), fetched, "batch finished");

    Ok(())
}
