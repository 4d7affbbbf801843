use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use crate::{
    error::Result,
    fetcher::{Fetcher, Transport},
    normalize::RecordNormalizer,
    page_parser::PageParser,
    types::{PageSummary, SessionCounters, SessionDataset},
};

/// Listing address for a page number.
pub fn page_address(base_url: &str, page: u32) -> String {
    format!("{}/matches/?page={}", base_url.trim_end_matches('/'), page)
}

/// State accumulated over one run. Created with zeroed counters when a run
/// starts and consumed into a [`SessionOutcome`] when it finishes.
struct ScrapeSession {
    dataset: SessionDataset,
    counters: SessionCounters,
    pages: Vec<PageSummary>,
}

impl ScrapeSession {
    fn new(pages_requested: u32) -> Self {
        Self {
            dataset: SessionDataset::default(),
            counters: SessionCounters::new(pages_requested),
            pages: Vec::with_capacity(pages_requested as usize),
        }
    }

    fn finish(self) -> SessionOutcome {
        SessionOutcome {
            dataset: self.dataset,
            counters: self.counters,
            pages: self.pages,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOutcome {
    pub dataset: SessionDataset,
    pub counters: SessionCounters,
    pub pages: Vec<PageSummary>,
}

impl SessionOutcome {
    pub fn log_summary(&self) {
        for page in &self.pages {
            info!("Page {} summary:", page.page);
            info!("  - URL: {}", page.address);
            info!("  - Matches scraped: {}", page.entry_count);
        }
        info!("Overall summary:");
        info!("  - Total pages scraped: {}", self.counters.pages_requested);
        info!("  - Total matches seen: {}", self.counters.total_entries_seen());
        info!("  - Total matches scraped: {}", self.counters.total_accepted);
    }
}

pub struct Aggregator<T: Transport> {
    fetcher: Fetcher<T>,
    parser: PageParser,
    normalizer: RecordNormalizer,
    base_url: String,
    show_progress: bool,
}

impl<T: Transport> Aggregator<T> {
    pub fn new(fetcher: Fetcher<T>, parser: PageParser, base_url: impl Into<String>) -> Self {
        Self {
            fetcher,
            parser,
            normalizer: RecordNormalizer::new(),
            base_url: base_url.into(),
            show_progress: false,
        }
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn fetcher(&self) -> &Fetcher<T> {
        &self.fetcher
    }

    /// Scrapes pages `1..=page_count` in order. The first error aborts the
    /// run and everything collected so far is dropped.
    pub fn run(&mut self, page_count: u32) -> Result<SessionOutcome> {
        let mut session = ScrapeSession::new(page_count);
        let progress = self.progress_bar(page_count);

        for page in 1..=page_count {
            let address = page_address(&self.base_url, page);
            progress.set_message(address.clone());

            let content = self.fetcher.fetch(&address)?;
            let parsed = self.parser.parse_page(content)?;

            session.counters.record_page(page, parsed.entry_count);
            session.dataset.reserve(parsed.entries.len());

            let mut accepted = 0;
            for (date, raw) in parsed.entries {
                let record = self.normalizer.normalize(raw, date)?;
                session.dataset.push(record);
                session.counters.record_accepted();
                accepted += 1;
            }

            session.pages.push(PageSummary {
                page,
                address,
                entry_count: parsed.entry_count,
                accepted,
            });
            progress.inc(1);
        }

        progress.finish_and_clear();
        Ok(session.finish())
    }

    fn progress_bar(&self, page_count: u32) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(page_count as u64);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} pages {msg}")
        {
            pb.set_style(style);
        }
        pb
    }
}
