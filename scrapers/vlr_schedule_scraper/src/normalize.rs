use chrono::{NaiveDate, NaiveTime, Weekday};

use crate::{
    error::{Result, ScrapeError},
    types::{MatchRecord, RawEntry, NOT_LIVE},
};

const TODAY_MARKER: &str = "Today";

/// Normalizes a section date label such as `"Wed, April 24, 2024Today"`.
///
/// Only the last four space separated tokens are considered. The `Today`
/// marker is removed wherever it appears. A leading weekday is checked to
/// be a weekday name and then dropped, so it need not agree with the date.
/// Labels that carry no weekday (`"Today, January 5, 2024"`) are accepted
/// as well.
pub fn normalize_date(label: &str) -> Result<NaiveDate> {
    let tokens: Vec<&str> = label.split(' ').collect();
    let tail = tokens[tokens.len().saturating_sub(4)..].join(" ");
    let candidate = tail.replace(TODAY_MARKER, "");
    let candidate = candidate.trim().trim_start_matches([',', ' ']);

    let date_part = match candidate.split_once(", ") {
        Some((head, rest)) if head.parse::<Weekday>().is_ok() => rest,
        _ => candidate,
    };

    NaiveDate::parse_from_str(date_part, "%B %d, %Y").map_err(|source| ScrapeError::DateFormat {
        input: label.to_string(),
        source,
    })
}

/// 12-hour `H:MM AM/PM` into a time of day.
pub fn normalize_time(label: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(label.trim(), "%I:%M %p").map_err(|source| ScrapeError::TimeFormat {
        input: label.to_string(),
        source,
    })
}

/// Removes the series text from the event label, which on the listing
/// renders both inside the same element.
pub fn strip_series(event_label: &str, series: &str) -> String {
    if series.is_empty() {
        return event_label.trim().to_string();
    }
    event_label.replace(series, "").trim().to_string()
}

pub struct RecordNormalizer;

impl RecordNormalizer {
    pub fn new() -> Self {
        Self
    }

    pub fn normalize(&self, raw: RawEntry, date: NaiveDate) -> Result<MatchRecord> {
        let match_time = normalize_time(&raw.time)?;
        let event_series = raw.event_series.trim().to_string();
        let event_name = strip_series(&raw.event_label, &event_series);

        Ok(MatchRecord {
            date,
            match_time: Some(match_time),
            team_1: raw.team_1.name.trim().to_string(),
            team_1_score: raw.team_1.score.trim().to_string(),
            team_2: raw.team_2.name.trim().to_string(),
            team_2_score: raw.team_2.score.trim().to_string(),
            live_status: raw
                .live_status
                .map(|s| s.trim().to_string())
                .unwrap_or_else(|| NOT_LIVE.to_string()),
            event_name,
            event_series,
        })
    }
}

impl Default for RecordNormalizer {
    fn default() -> Self {
        Self::new()
    }
}
