use std::{collections::HashMap, time::Duration};
use tracing::info;

use crate::{
    config::ScrapingConfig,
    error::{Result, ScrapeError},
};

/// Something that can retrieve the body behind an address.
pub trait Transport {
    fn get(&self, url: &str) -> Result<String>;
}

pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new(config: &ScrapingConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(ScrapeError::Client)?;

        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str) -> Result<String> {
        let fetch_error = |source| ScrapeError::Fetch {
            url: url.to_string(),
            source,
        };

        let response = self.client.get(url).send().map_err(fetch_error)?;
        if !response.status().is_success() {
            return Err(ScrapeError::HttpStatus {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        response.text().map_err(fetch_error)
    }
}

/// Memoizing front for a [`Transport`]. Each address is retrieved at most
/// once for the lifetime of the fetcher.
pub struct Fetcher<T = HttpTransport> {
    transport: T,
    cache: HashMap<String, String>,
    network_calls: usize,
}

impl<T: Transport> Fetcher<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            cache: HashMap::new(),
            network_calls: 0,
        }
    }

    pub fn fetch(&mut self, url: &str) -> Result<&str> {
        if self.cache.contains_key(url) {
            info!("Using cached content for {}", url);
        } else {
            info!("Fetching content for {}", url);
            let body = self.transport.get(url)?;
            self.network_calls += 1;
            self.cache.insert(url.to_string(), body);
        }

        Ok(self.cache[url].as_str())
    }

    /// Number of successful retrievals made through the transport.
    pub fn network_calls(&self) -> usize {
        self.network_calls
    }

    pub fn is_cached(&self, url: &str) -> bool {
        self.cache.contains_key(url)
    }
}
