use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::info;

use crate::types::{SessionDataset, CSV_HEADER};

pub const PRIMARY_FILE: &str = "vlr_matches.csv";
pub const SECONDARY_FILE: &str = "vlr_matches_with_vods.csv";
pub const ARCHIVE_DIR: &str = "archive";
pub const ARCHIVE_PREFIX: &str = "vlr_matches_";
pub const ARCHIVE_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchivePaths {
    pub primary: PathBuf,
    pub secondary: PathBuf,
    pub archive: PathBuf,
}

pub struct ArchiveWriter {
    data_dir: PathBuf,
}

impl ArchiveWriter {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn archive_dir(&self) -> PathBuf {
        self.data_dir.join(ARCHIVE_DIR)
    }

    pub fn write(&self, dataset: &SessionDataset) -> Result<ArchivePaths> {
        self.write_at(dataset, Local::now())
    }

    /// Writes the dataset to the primary, secondary and archive files. The
    /// archive file name carries `timestamp` as its session marker.
    pub fn write_at(&self, dataset: &SessionDataset, timestamp: DateTime<Local>) -> Result<ArchivePaths> {
        let archive_dir = self.archive_dir();
        fs::create_dir_all(&archive_dir)
            .with_context(|| format!("Failed to create archive directory {:?}", archive_dir))?;

        let paths = ArchivePaths {
            primary: self.data_dir.join(PRIMARY_FILE),
            secondary: self.data_dir.join(SECONDARY_FILE),
            archive: archive_dir.join(format!(
                "{}{}.csv",
                ARCHIVE_PREFIX,
                timestamp.format(ARCHIVE_TIMESTAMP_FORMAT)
            )),
        };

        for path in [&paths.primary, &paths.secondary, &paths.archive] {
            write_csv(path, dataset)?;
            info!("Wrote {} records to {:?}", dataset.len(), path);
        }

        Ok(paths)
    }
}

fn write_csv(path: &Path, dataset: &SessionDataset) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to open {:?} for writing", path))?;

    wtr.write_record(CSV_HEADER)?;
    for record in dataset.records() {
        wtr.write_record(record.to_row())?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MatchRecord;
    use chrono::{NaiveDate, NaiveTime, TimeZone};

    fn dataset() -> SessionDataset {
        SessionDataset::from(vec![MatchRecord {
            date: NaiveDate::from_ymd_opt(2024, 4, 24).unwrap(),
            match_time: NaiveTime::from_hms_opt(19, 0, 0),
            team_1: "Sentinels".to_string(),
            team_1_score: "2".to_string(),
            team_2: "NRG, Inc".to_string(),
            team_2_score: "0".to_string(),
            live_status: "Not live".to_string(),
            event_name: "Champions Tour 2024: Americas Stage 1".to_string(),
            event_series: "Regular Season".to_string(),
        }])
    }

    #[test]
    fn test_writes_three_identical_files() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ArchiveWriter::new(dir.path());
        let timestamp = Local.with_ymd_and_hms(2024, 4, 24, 18, 5, 9).unwrap();

        let paths = writer.write_at(&dataset(), timestamp).unwrap();

        assert_eq!(paths.archive, dir.path().join("archive/vlr_matches_20240424_180509.csv"));
        let primary = fs::read_to_string(&paths.primary).unwrap();
        assert_eq!(primary, fs::read_to_string(&paths.secondary).unwrap());
        assert_eq!(primary, fs::read_to_string(&paths.archive).unwrap());
        assert_eq!(
            primary,
            "date,match_time,team_1,team_1_score,team_2,team_2_score,live_status,event_name,event_series\n\
             04/24/2024,19:00,Sentinels,2,\"NRG, Inc\",0,Not live,Champions Tour 2024: Americas Stage 1,Regular Season\n"
        );
    }

    #[test]
    fn test_empty_dataset_writes_header_only() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ArchiveWriter::new(dir.path().join("nested"));

        let paths = writer.write(&SessionDataset::default()).unwrap();

        let contents = fs::read_to_string(&paths.primary).unwrap();
        assert_eq!(contents.lines().count(), 1);
        assert!(contents.starts_with("date,match_time,"));
        assert!(paths.archive.starts_with(writer.archive_dir()));
    }
}
