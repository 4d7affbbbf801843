use serde::{Deserialize, Serialize};
use std::{env, path::PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScrapingConfig {
    pub base_url: String,
    pub user_agent: String,
    pub request_timeout_secs: u64,
}

impl Default for ScrapingConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.vlr.gg".to_string(),
            user_agent: "Mozilla/5.0 (compatible; VlrScheduleScraper/1.0)".to_string(),
            request_timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
        }
    }
}

/// Author recorded on the sync commit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GitIdentity {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SyncConfig {
    pub enabled: bool,
    pub repo_dir: PathBuf,
    pub identity: Option<GitIdentity>,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            repo_dir: PathBuf::from("."),
            identity: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScraperConfig {
    pub scraping: ScrapingConfig,
    pub storage: StorageConfig,
    pub sync: SyncConfig,
}

impl ScraperConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup. Values that fail to
    /// parse leave the default in place.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(base_url) = lookup("VLR_BASE_URL") {
            config.scraping.base_url = base_url.trim_end_matches('/').to_string();
        }
        if let Some(user_agent) = lookup("SCRAPER_USER_AGENT") {
            config.scraping.user_agent = user_agent;
        }
        if let Some(timeout) = lookup("SCRAPER_TIMEOUT_SECS").and_then(|t| t.parse::<u64>().ok()) {
            config.scraping.request_timeout_secs = timeout;
        }
        if let Some(data_dir) = lookup("VLR_DATA_DIR") {
            config.storage.data_dir = PathBuf::from(data_dir);
        }
        if let Some(enabled) = lookup("VLR_SYNC_ENABLED").and_then(|v| parse_flag(&v)) {
            config.sync.enabled = enabled;
        }
        if let Some(repo_dir) = lookup("VLR_REPO_DIR") {
            config.sync.repo_dir = PathBuf::from(repo_dir);
        }
        if let (Some(name), Some(email)) = (lookup("GIT_USER_NAME"), lookup("GIT_USER_EMAIL")) {
            config.sync.identity = Some(GitIdentity { name, email });
        }

        config
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}
