use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const NOT_LIVE: &str = "Not live";
pub const DATE_FORMAT: &str = "%m/%d/%Y";
pub const TIME_FORMAT: &str = "%H:%M";

/// Column order of every CSV the scraper writes.
pub const CSV_HEADER: [&str; 9] = [
    "date",
    "match_time",
    "team_1",
    "team_1_score",
    "team_2",
    "team_2_score",
    "live_status",
    "event_name",
    "event_series",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub date: NaiveDate,
    pub match_time: Option<NaiveTime>,
    pub team_1: String,
    pub team_1_score: String,
    pub team_2: String,
    pub team_2_score: String,
    pub live_status: String,
    pub event_name: String,
    pub event_series: String,
}

impl MatchRecord {
    pub fn date_string(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }

    pub fn match_time_string(&self) -> String {
        self.match_time
            .map(|t| t.format(TIME_FORMAT).to_string())
            .unwrap_or_default()
    }

    /// Row in `CSV_HEADER` order.
    pub fn to_row(&self) -> [String; 9] {
        [
            self.date_string(),
            self.match_time_string(),
            self.team_1.clone(),
            self.team_1_score.clone(),
            self.team_2.clone(),
            self.team_2_score.clone(),
            self.live_status.clone(),
            self.event_name.clone(),
            self.event_series.clone(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamFragment {
    pub name: String,
    pub score: String,
}

/// Text pulled out of one listing entry that is not a TBD placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEntry {
    pub time: String,
    pub team_1: TeamFragment,
    pub team_2: TeamFragment,
    pub live_status: Option<String>,
    pub event_series: String,
    pub event_label: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionDataset {
    records: Vec<MatchRecord>,
}

impl SessionDataset {
    pub(crate) fn push(&mut self, record: MatchRecord) {
        self.records.push(record);
    }

    pub(crate) fn reserve(&mut self, additional: usize) {
        self.records.reserve(additional);
    }

    pub fn records(&self) -> &[MatchRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn into_records(self) -> Vec<MatchRecord> {
        self.records
    }
}

impl From<Vec<MatchRecord>> for SessionDataset {
    fn from(records: Vec<MatchRecord>) -> Self {
        Self { records }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionCounters {
    pub pages_requested: u32,
    pub entries_seen_per_page: BTreeMap<u32, usize>,
    pub total_accepted: usize,
}

impl SessionCounters {
    pub fn new(pages_requested: u32) -> Self {
        Self {
            pages_requested,
            ..Self::default()
        }
    }

    pub(crate) fn record_page(&mut self, page: u32, entry_count: usize) {
        self.entries_seen_per_page.insert(page, entry_count);
    }

    pub(crate) fn record_accepted(&mut self) {
        self.total_accepted += 1;
    }

    pub fn total_entries_seen(&self) -> usize {
        self.entries_seen_per_page.values().sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSummary {
    pub page: u32,
    pub address: String,
    pub entry_count: usize,
    pub accepted: usize,
}
