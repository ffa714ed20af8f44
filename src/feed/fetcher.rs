use futures::StreamExt;
use thiserror::Error;

use super::normalize::{normalize_entry, FeedEntry, NormalizeOptions};
use super::parser::parse_feed;
use super::query::{build_search_url, Locale, DEFAULT_ENDPOINT};

const MAX_FEED_SIZE: usize = 10 * 1024 * 1024; // 10MB

/// Upper bound on entries handed to the shell.
pub const MAX_ENTRIES: usize = 20;

/// Errors that can occur while retrieving a feed.
///
/// Never returned by [`fetch_entries`]; they are logged and the fetch
/// degrades to an empty result.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network-level error (DNS, connection, TLS, etc.)
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),
    /// HTTP response with non-2xx status code
    #[error("HTTP error: status {0}")]
    HttpStatus(u16),
    /// Response body exceeded the 10MB size limit
    #[error("Response too large")]
    ResponseTooLarge,
    /// Body could not be parsed as RSS or Atom
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Everything needed to turn a query into normalized entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSettings {
    pub endpoint: String,
    pub locale: Locale,
    /// Clamped to `1..=MAX_ENTRIES` when applied.
    pub max_entries: usize,
    pub normalize: NormalizeOptions,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            locale: Locale::default(),
            max_entries: MAX_ENTRIES,
            normalize: NormalizeOptions::default(),
        }
    }
}

impl SearchSettings {
    pub fn url_for(&self, query: &str) -> String {
        build_search_url(&self.endpoint, query, &self.locale)
    }

    fn entry_limit(&self) -> usize {
        self.max_entries.clamp(1, MAX_ENTRIES)
    }
}

/// What the shell renders: entries, or the "no results" notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Entries(Vec<FeedEntry>),
    NoResults,
}

impl FetchOutcome {
    pub fn from_entries(entries: Vec<FeedEntry>) -> Self {
        if entries.is_empty() {
            FetchOutcome::NoResults
        } else {
            FetchOutcome::Entries(entries)
        }
    }

    pub fn entries(&self) -> &[FeedEntry] {
        match self {
            FetchOutcome::Entries(entries) => entries,
            FetchOutcome::NoResults => &[],
        }
    }

    pub fn into_entries(self) -> Vec<FeedEntry> {
        match self {
            FetchOutcome::Entries(entries) => entries,
            FetchOutcome::NoResults => Vec::new(),
        }
    }

    pub fn is_no_results(&self) -> bool {
        matches!(self, FetchOutcome::NoResults)
    }
}

/// Searches the provider for `query` and returns the outcome for display.
pub async fn search(
    client: &reqwest::Client,
    settings: &SearchSettings,
    query: &str,
) -> FetchOutcome {
    let url = settings.url_for(query);
    tracing::debug!(query = %query, url = %url, "Searching news feed");
    FetchOutcome::from_entries(fetch_entries(client, &url, settings).await)
}

/// Fetches `url`, parses it and normalizes up to `max_entries` entries.
///
/// # Behavior
///
/// - One GET, no retries, HTTP client default timeout
/// - Entries keep provider order
/// - Any failure (transport, non-2xx status, body over 10MB, unparseable
///   document) is logged at `warn` and yields an empty `Vec`
pub async fn fetch_entries(
    client: &reqwest::Client,
    url: &str,
    settings: &SearchSettings,
) -> Vec<FeedEntry> {
    match try_fetch(client, url, settings).await {
        Ok(entries) => {
            tracing::info!(url = %url, entries = entries.len(), "Fetched news feed");
            entries
        }
        Err(e) => {
            tracing::warn!(url = %url, error = %e, "Feed fetch failed, treating as no results");
            Vec::new()
        }
    }
}

async fn try_fetch(
    client: &reqwest::Client,
    url: &str,
    settings: &SearchSettings,
) -> Result<Vec<FeedEntry>, FetchError> {
    let response = client.get(url).send().await?;

    if !response.status().is_success() {
        return Err(FetchError::HttpStatus(response.status().as_u16()));
    }

    let bytes = read_limited_bytes(response, MAX_FEED_SIZE).await?;

    let parsed =
        parse_feed(&bytes, settings.entry_limit()).map_err(|e| FetchError::Parse(e.to_string()))?;

    Ok(parsed
        .into_iter()
        .map(|entry| normalize_entry(entry, &settings.normalize))
        .collect())
}

async fn read_limited_bytes(
    response: reqwest::Response,
    limit: usize,
) -> Result<Vec<u8>, FetchError> {
    // Fast path: check Content-Length header
    if let Some(len) = response.content_length() {
        if len as usize > limit {
            return Err(FetchError::ResponseTooLarge);
        }
    }

    let mut bytes = Vec::new();
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        if bytes.len().saturating_add(chunk.len()) > limit {
            return Err(FetchError::ResponseTooLarge);
        }
        bytes.extend_from_slice(&chunk);
    }

    Ok(bytes)
}
