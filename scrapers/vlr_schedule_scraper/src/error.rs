use thiserror::Error;

/// Failures raised while extracting the schedule. Every variant is fatal
/// to the current scrape session.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request to {url} failed: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("request to {url} returned HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("invalid selector `{selector}`: {reason}")]
    Selector { selector: String, reason: String },

    #[error("element not found: {context}")]
    ElementNotFound { context: &'static str },

    #[error("unrecognised date `{input}`: {source}")]
    DateFormat {
        input: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("unrecognised match time `{input}`: {source}")]
    TimeFormat {
        input: String,
        #[source]
        source: chrono::ParseError,
    },
}

pub type Result<T> = std::result::Result<T, ScrapeError>;
