use anyhow::{Context, Result};
use regex::Regex;
use std::{
    fs,
    path::{Path, PathBuf},
    process::Command,
    time::SystemTime,
};
use tracing::{info, warn};

use crate::config::GitIdentity;

/// Finds the newest `vlr_matches_<YYYYMMDD_HHMMSS>.csv` in `archive_dir`
/// by modification time and returns its marker.
pub fn latest_session_marker(archive_dir: &Path) -> Result<Option<String>> {
    if !archive_dir.is_dir() {
        return Ok(None);
    }

    let pattern = Regex::new(r"^vlr_matches_(\d{8}_\d{6})\.csv$")?;
    let mut candidates: Vec<(SystemTime, String)> = Vec::new();

    for entry in fs::read_dir(archive_dir)
        .with_context(|| format!("Failed to list {:?}", archive_dir))?
    {
        let entry = entry?;
        let file_name = entry.file_name();
        let Some(captures) = file_name.to_str().and_then(|name| pattern.captures(name)) else {
            continue;
        };
        let modified = entry.metadata()?.modified()?;
        candidates.push((modified, captures[1].to_string()));
    }

    Ok(candidates.into_iter().max().map(|(_, marker)| marker))
}

/// Runs a git subcommand. `Ok(false)` means git ran but exited non-zero.
pub trait GitRunner {
    fn run(&mut self, args: &[&str]) -> Result<bool>;
}

pub struct SystemGit {
    repo_dir: PathBuf,
}

impl SystemGit {
    pub fn new(repo_dir: impl Into<PathBuf>) -> Self {
        Self {
            repo_dir: repo_dir.into(),
        }
    }
}

impl GitRunner for SystemGit {
    fn run(&mut self, args: &[&str]) -> Result<bool> {
        let status = Command::new("git")
            .args(args)
            .current_dir(&self.repo_dir)
            .status()
            .with_context(|| format!("Failed to run git {}", args.join(" ")))?;
        Ok(status.success())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    Skipped,
    Pushed { marker: String },
}

pub struct SyncAgent<G: GitRunner> {
    git: G,
    identity: Option<GitIdentity>,
    data_dir: PathBuf,
    archive_dir: PathBuf,
}

impl<G: GitRunner> SyncAgent<G> {
    pub fn new(git: G, identity: Option<GitIdentity>, data_dir: impl Into<PathBuf>, archive_dir: impl Into<PathBuf>) -> Self {
        Self {
            git,
            identity,
            data_dir: data_dir.into(),
            archive_dir: archive_dir.into(),
        }
    }

    pub fn sync(&mut self) -> Result<SyncOutcome> {
        let Some(marker) = latest_session_marker(&self.archive_dir)? else {
            info!("No archived files found.");
            return Ok(SyncOutcome::Skipped);
        };

        if let Some(identity) = self.identity.clone() {
            self.step(&["config", "user.name", identity.name.as_str()])?;
            self.step(&["config", "user.email", identity.email.as_str()])?;
        }

        let data_dir = self.data_dir.to_string_lossy().into_owned();
        let message = format!("Data update for session {}", marker);
        self.step(&["add", data_dir.as_str()])?;
        self.step(&["commit", "-m", message.as_str()])?;
        self.step(&["push"])?;

        info!("Synced session {}", marker);
        Ok(SyncOutcome::Pushed { marker })
    }

    fn step(&mut self, args: &[&str]) -> Result<()> {
        info!("git {}", args.join(" "));
        if !self.git.run(args)? {
            warn!("git {} exited with a non-zero status", args[0]);
        }
        Ok(())
    }
}
