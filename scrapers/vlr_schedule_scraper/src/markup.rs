//! Markup traversal for the match listing.
//!
//! Parsing is expressed against the [`ScheduleDocument`] family of traits so
//! the page parser never touches selectors directly. [`VlrPage`] is the
//! `scraper` backed implementation for vlr.gg listing markup.

use scraper::{ElementRef, Html, Selector};

use crate::{
    error::{Result, ScrapeError},
    types::TeamFragment,
};

/// Field accessors for a single listing entry.
pub trait EntryFields {
    fn time_label(&self) -> Result<String>;
    fn teams(&self) -> Result<(TeamFragment, TeamFragment)>;
    fn live_status(&self) -> Option<String>;
    fn event_series(&self) -> Result<String>;
    fn event_label(&self) -> Result<String>;
}

/// A date-labelled group of entries.
pub trait ScheduleSection {
    type Entry: EntryFields;

    fn date_label(&self) -> Result<String>;
    fn entries(&self) -> Vec<Self::Entry>;
}

pub trait ScheduleDocument {
    type Section: ScheduleSection;

    fn sections(&self) -> Vec<Self::Section>;
}

// The label's class attribute must be exactly this string, extra classes
// mark other headings.
const DATE_LABEL: &str = r#"div[class="wf-label mod-large"]"#;
const CARD: &str = r#"div.wf-card[style="margin-bottom: 30px;"]"#;
const ENTRY: &str = "a.wf-module-item";
const TIME: &str = "div.match-item-time";
const TEAM: &str = "div.match-item-vs-team";
const TEAM_NAME: &str = "div.text-of";
const TEAM_SCORE: &str = "div.match-item-vs-team-score";
const STATUS: &str = "div.ml-status";
const EVENT_SERIES: &str = "div.match-item-event-series";
const EVENT: &str = "div.match-item-event";

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| ScrapeError::Selector {
        selector: css.to_string(),
        reason: e.to_string(),
    })
}

/// Compiled selectors for vlr.gg listing pages.
#[derive(Debug)]
pub struct VlrSelectors {
    label_or_card: Selector,
    date_label: Selector,
    entry: Selector,
    time: Selector,
    team: Selector,
    team_name: Selector,
    team_score: Selector,
    status: Selector,
    event_series: Selector,
    event: Selector,
}

impl VlrSelectors {
    pub fn new() -> Result<Self> {
        Ok(Self {
            label_or_card: selector(&format!("{DATE_LABEL}, {CARD}"))?,
            date_label: selector(DATE_LABEL)?,
            entry: selector(ENTRY)?,
            time: selector(TIME)?,
            team: selector(TEAM)?,
            team_name: selector(TEAM_NAME)?,
            team_score: selector(TEAM_SCORE)?,
            status: selector(STATUS)?,
            event_series: selector(EVENT_SERIES)?,
            event: selector(EVENT)?,
        })
    }
}

/// Concatenates the trimmed text nodes of an element.
pub fn stripped_text(element: &ElementRef) -> String {
    element.text().map(str::trim).collect()
}

fn first_text(
    element: &ElementRef,
    selector: &Selector,
    context: &'static str,
) -> Result<String> {
    element
        .select(selector)
        .next()
        .map(|el| stripped_text(&el))
        .ok_or(ScrapeError::ElementNotFound { context })
}

pub struct VlrPage<'a> {
    html: &'a Html,
    selectors: &'a VlrSelectors,
}

impl<'a> VlrPage<'a> {
    pub fn new(html: &'a Html, selectors: &'a VlrSelectors) -> Self {
        Self { html, selectors }
    }
}

impl<'a> ScheduleDocument for VlrPage<'a> {
    type Section = VlrSection<'a>;

    /// Walks labels and cards in document order so every card is paired
    /// with the closest label that precedes it.
    fn sections(&self) -> Vec<VlrSection<'a>> {
        let mut sections = Vec::new();
        let mut current_label = None;

        for element in self.html.select(&self.selectors.label_or_card) {
            if self.selectors.date_label.matches(&element) {
                current_label = Some(element);
            } else {
                sections.push(VlrSection {
                    card: element,
                    date_label: current_label,
                    selectors: self.selectors,
                });
            }
        }

        sections
    }
}

pub struct VlrSection<'a> {
    card: ElementRef<'a>,
    date_label: Option<ElementRef<'a>>,
    selectors: &'a VlrSelectors,
}

impl<'a> ScheduleSection for VlrSection<'a> {
    type Entry = VlrEntry<'a>;

    fn date_label(&self) -> Result<String> {
        self.date_label
            .as_ref()
            .map(stripped_text)
            .ok_or(ScrapeError::ElementNotFound {
                context: "date label (div.wf-label mod-large) before match card",
            })
    }

    fn entries(&self) -> Vec<VlrEntry<'a>> {
        self.card
            .select(&self.selectors.entry)
            .map(|element| VlrEntry {
                element,
                selectors: self.selectors,
            })
            .collect()
    }
}

pub struct VlrEntry<'a> {
    element: ElementRef<'a>,
    selectors: &'a VlrSelectors,
}

impl VlrEntry<'_> {
    fn team(&self, block: Option<ElementRef>) -> Result<TeamFragment> {
        let block = block.ok_or(ScrapeError::ElementNotFound {
            context: "team block (div.match-item-vs-team)",
        })?;

        Ok(TeamFragment {
            name: first_text(&block, &self.selectors.team_name, "team name (div.text-of)")?,
            score: first_text(
                &block,
                &self.selectors.team_score,
                "team score (div.match-item-vs-team-score)",
            )?,
        })
    }
}

impl EntryFields for VlrEntry<'_> {
    fn time_label(&self) -> Result<String> {
        first_text(&self.element, &self.selectors.time, "match time (div.match-item-time)")
    }

    fn teams(&self) -> Result<(TeamFragment, TeamFragment)> {
        let mut blocks = self.element.select(&self.selectors.team);
        let first = self.team(blocks.next())?;
        let second = self.team(blocks.next())?;
        Ok((first, second))
    }

    fn live_status(&self) -> Option<String> {
        self.element
            .select(&self.selectors.status)
            .next()
            .map(|el| stripped_text(&el))
    }

    fn event_series(&self) -> Result<String> {
        first_text(
            &self.element,
            &self.selectors.event_series,
            "event series (div.match-item-event-series)",
        )
    }

    fn event_label(&self) -> Result<String> {
        first_text(&self.element, &self.selectors.event, "event (div.match-item-event)")
    }
}
