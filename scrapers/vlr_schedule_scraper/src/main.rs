use anyhow::Result;
use clap::{Parser, Subcommand};
use std::io::{self, IsTerminal};
use tracing::info;

use vlr_schedule_scraper::{
    config::ScraperConfig,
    menu::{Menu, MenuAction},
    pipeline::{run_pipeline, sync_archive},
};

#[derive(Debug, Parser)]
#[command(author, version, about = "Scrape the vlr.gg match schedule into CSV", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Interactive menu (the default)
    Menu,
    /// Scrape a number of listing pages, archive them and sync
    Scrape {
        /// Number of listing pages to scrape, starting at page 1
        #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        pages: u32,

        /// Write the CSV files but skip the git sync
        #[arg(long)]
        no_sync: bool,
    },
    /// Commit and push the most recent archive without scraping
    Sync,
}

fn main() -> Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = ScraperConfig::from_env();
    let show_progress = io::stderr().is_terminal();

    match cli.command.unwrap_or(Commands::Menu) {
        Commands::Menu => {
            let stdin = io::stdin();
            let mut menu = Menu::new(stdin.lock(), io::stdout());
            while let MenuAction::Scrape { pages } = menu.next_action()? {
                let report = run_pipeline(&config, pages, true, show_progress)?;
                info!(
                    "Saved {} records to {:?}",
                    report.outcome.dataset.len(),
                    report.paths.primary
                );
            }
        }
        Commands::Scrape { pages, no_sync } => {
            let report = run_pipeline(&config, pages, !no_sync, show_progress)?;
            info!(
                "Saved {} records to {:?} (archive {:?})",
                report.outcome.dataset.len(),
                report.paths.primary,
                report.paths.archive
            );
        }
        Commands::Sync => {
            let outcome = sync_archive(&config)?;
            info!("Sync finished: {:?}", outcome);
        }
    }

    Ok(())
}
