use chrono::NaiveDate;
use scraper::Html;
use tracing::debug;

use crate::{
    error::Result,
    markup::{EntryFields, ScheduleDocument, ScheduleSection, VlrPage, VlrSelectors},
    normalize::normalize_date,
    types::RawEntry,
};

/// Time label of entries whose start has not been scheduled yet.
pub const TBD: &str = "TBD";

#[derive(Debug, Default, PartialEq, Eq)]
pub struct ParsedPage {
    /// Accepted entries with the date of the section they were found in.
    pub entries: Vec<(NaiveDate, RawEntry)>,
    /// Every entry seen on the page, TBD placeholders included.
    pub entry_count: usize,
}

pub struct PageParser {
    selectors: VlrSelectors,
}

impl PageParser {
    pub fn new() -> Result<Self> {
        Ok(Self {
            selectors: VlrSelectors::new()?,
        })
    }

    pub fn parse_page(&self, content: &str) -> Result<ParsedPage> {
        let html = Html::parse_document(content);
        parse_document(&VlrPage::new(&html, &self.selectors))
    }
}

/// Extracts entries from any markup that exposes the schedule capability.
///
/// Only the TBD placeholder is tolerated: it is counted and then skipped
/// before any other field is read. Every other missing element or bad
/// date is returned as an error.
pub fn parse_document<D: ScheduleDocument>(document: &D) -> Result<ParsedPage> {
    let mut page = ParsedPage::default();

    for section in document.sections() {
        let date = normalize_date(&section.date_label()?)?;

        for entry in section.entries() {
            page.entry_count += 1;

            let time = entry.time_label()?;
            if time.trim() == TBD {
                debug!("Skipping TBD entry on {}", date);
                continue;
            }

            let (team_1, team_2) = entry.teams()?;
            let raw = RawEntry {
                time,
                team_1,
                team_2,
                live_status: entry.live_status(),
                event_series: entry.event_series()?,
                event_label: entry.event_label()?,
            };
            page.entries.push((date, raw));
        }
    }

    Ok(page)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::ScrapeError, types::TeamFragment};
    use pretty_assertions::assert_eq;

    /// In-memory markup used to check the parser does not depend on HTML.
    struct FakeDocument(Vec<FakeSection>);

    #[derive(Clone)]
    struct FakeSection {
        label: &'static str,
        entries: Vec<FakeEntry>,
    }

    #[derive(Clone)]
    struct FakeEntry {
        time: &'static str,
        teams: Option<(&'static str, &'static str)>,
    }

    impl ScheduleDocument for FakeDocument {
        type Section = FakeSection;

        fn sections(&self) -> Vec<FakeSection> {
            self.0.clone()
        }
    }

    impl ScheduleSection for FakeSection {
        type Entry = FakeEntry;

        fn date_label(&self) -> Result<String> {
            Ok(self.label.to_string())
        }

        fn entries(&self) -> Vec<FakeEntry> {
            self.entries.clone()
        }
    }

    impl EntryFields for FakeEntry {
        fn time_label(&self) -> Result<String> {
            Ok(self.time.to_string())
        }

        fn teams(&self) -> Result<(TeamFragment, TeamFragment)> {
            let (a, b) = self.teams.ok_or(ScrapeError::ElementNotFound { context: "teams" })?;
            Ok((
                TeamFragment { name: a.to_string(), score: "0".to_string() },
                TeamFragment { name: b.to_string(), score: "0".to_string() },
            ))
        }

        fn live_status(&self) -> Option<String> {
            None
        }

        fn event_series(&self) -> Result<String> {
            Ok("Series".to_string())
        }

        fn event_label(&self) -> Result<String> {
            Ok("SeriesEvent".to_string())
        }
    }

    fn entry(time: &'static str, teams: Option<(&'static str, &'static str)>) -> FakeEntry {
        FakeEntry { time, teams }
    }

    #[test]
    fn test_tbd_entries_counted_but_skipped() {
        let document = FakeDocument(vec![FakeSection {
            label: "Fri, January 5, 2024",
            entries: vec![
                entry("1:00 PM", Some(("Alpha", "Beta"))),
                // a TBD entry is skipped before its teams are looked at
                entry(" TBD ", None),
            ],
        }]);

        let page = parse_document(&document).unwrap();

        assert_eq!(page.entry_count, 2);
        assert_eq!(page.entries.len(), 1);
        assert_eq!(page.entries[0].0, NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
        assert_eq!(page.entries[0].1.team_1.name, "Alpha");
    }

    #[test]
    fn test_tbd_match_is_case_sensitive() {
        let document = FakeDocument(vec![FakeSection {
            label: "Fri, January 5, 2024",
            entries: vec![entry("tbd", Some(("Alpha", "Beta")))],
        }]);

        // accepted here, rejected later by time normalization
        let page = parse_document(&document).unwrap();
        assert_eq!(page.entries.len(), 1);
        assert_eq!(page.entries[0].1.time, "tbd");
    }

    #[test]
    fn test_missing_teams_propagate() {
        let document = FakeDocument(vec![FakeSection {
            label: "Fri, January 5, 2024",
            entries: vec![entry("1:00 PM", None)],
        }]);

        assert!(matches!(
            parse_document(&document),
            Err(ScrapeError::ElementNotFound { context: "teams" })
        ));
    }

    #[test]
    fn test_bad_section_date_propagates() {
        let document = FakeDocument(vec![FakeSection {
            label: "sometime soon",
            entries: vec![],
        }]);

        assert!(matches!(
            parse_document(&document),
            Err(ScrapeError::DateFormat { .. })
        ));
    }

    #[test]
    fn test_parse_page_over_html() {
        let html = r#"
            <div class="wf-label mod-large">Fri, January 5, 2024 <span>Today</span></div>
            <div class="wf-card" style="margin-bottom: 30px;">
                <a class="wf-module-item">
                    <div class="match-item-time">1:00 PM</div>
                    <div class="match-item-vs-team">
                        <div class="text-of">Alpha</div>
                        <div class="match-item-vs-team-score">2</div>
                    </div>
                    <div class="match-item-vs-team">
                        <div class="text-of">Beta</div>
                        <div class="match-item-vs-team-score">1</div>
                    </div>
                    <div class="match-item-event">
                        <div class="match-item-event-series">Stage 1</div>
                        Stage 1 Finals
                    </div>
                </a>
                <a class="wf-module-item">
                    <div class="match-item-time">TBD</div>
                    <div class="match-item-vs-team"><div class="text-of">Gamma</div></div>
                    <div class="match-item-vs-team"><div class="text-of">Delta</div></div>
                </a>
            </div>
        "#;

        let page = PageParser::new().unwrap().parse_page(html).unwrap();

        assert_eq!(page.entry_count, 2);
        assert_eq!(
            page.entries,
            vec![(
                NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
                RawEntry {
                    time: "1:00 PM".to_string(),
                    team_1: TeamFragment { name: "Alpha".to_string(), score: "2".to_string() },
                    team_2: TeamFragment { name: "Beta".to_string(), score: "1".to_string() },
                    live_status: None,
                    event_series: "Stage 1".to_string(),
                    event_label: "Stage 1Stage 1 Finals".to_string(),
                },
            )]
        );
    }

    #[test]
    fn test_page_without_cards_is_empty() {
        let page = PageParser::new()
            .unwrap()
            .parse_page("<html><body><p>No matches</p></body></html>")
            .unwrap();
        assert_eq!(page, ParsedPage::default());
    }
}
