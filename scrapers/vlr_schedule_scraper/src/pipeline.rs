use anyhow::{Context, Result};
use tracing::info;

use crate::{
    aggregator::{Aggregator, SessionOutcome},
    archive::{ArchivePaths, ArchiveWriter},
    config::ScraperConfig,
    fetcher::{Fetcher, HttpTransport},
    page_parser::PageParser,
    sync::{SyncAgent, SyncOutcome, SystemGit},
};

#[derive(Debug)]
pub struct PipelineReport {
    pub outcome: SessionOutcome,
    pub paths: ArchivePaths,
    pub sync: Option<SyncOutcome>,
}

/// Scrapes `pages` listing pages, writes the CSV files and optionally syncs
/// them. Nothing is written unless every page was scraped.
pub fn run_pipeline(config: &ScraperConfig, pages: u32, sync: bool, show_progress: bool) -> Result<PipelineReport> {
    let transport = HttpTransport::new(&config.scraping)?;
    let mut aggregator = Aggregator::new(
        Fetcher::new(transport),
        PageParser::new()?,
        config.scraping.base_url.clone(),
    )
    .with_progress(show_progress);

    let outcome = aggregator
        .run(pages)
        .with_context(|| format!("Scraping {} page(s) failed", pages))?;
    outcome.log_summary();

    let writer = ArchiveWriter::new(&config.storage.data_dir);
    let paths = writer.write(&outcome.dataset)?;

    let sync = if sync && config.sync.enabled {
        Some(sync_archive(config)?)
    } else {
        info!("Sync disabled, leaving changes uncommitted");
        None
    };

    Ok(PipelineReport { outcome, paths, sync })
}

pub fn sync_archive(config: &ScraperConfig) -> Result<SyncOutcome> {
    let writer = ArchiveWriter::new(&config.storage.data_dir);
    let mut agent = SyncAgent::new(
        SystemGit::new(&config.sync.repo_dir),
        config.sync.identity.clone(),
        &config.storage.data_dir,
        writer.archive_dir(),
    );
    agent.sync()
}
