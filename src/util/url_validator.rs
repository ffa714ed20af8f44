use thiserror::Error;
use url::Url;

/// Reasons an entry link is refused before being handed to the browser.
#[derive(Error, Debug)]
pub enum UrlValidationError {
    /// The entry has no link at all.
    #[error("Article has no link")]
    Empty,
    /// The URL string could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    /// The URL uses a scheme other than http or https.
    #[error("Unsupported scheme: {0} (only http/https allowed)")]
    UnsupportedScheme(String),
    /// The URL contains whitespace or control characters.
    #[error("URL contains whitespace or control characters")]
    UnsafeCharacters,
}

/// SEC: Validates a feed-supplied link before `open::that()`.
///
/// Links come from the provider and end up as an argument to the platform
/// opener (`xdg-open`, `open`, `start`), so only well-formed http(s) URLs
/// without whitespace or control characters are accepted.
///
/// # Examples
///
/// ```
/// use newsdash::util::validate_url_for_open;
///
/// assert!(validate_url_for_open("https://news.google.com/rss/articles/abc?oc=5").is_ok());
/// assert!(validate_url_for_open("file:///etc/passwd").is_err());
/// assert!(validate_url_for_open("").is_err());
/// ```
pub fn validate_url_for_open(link: &str) -> Result<Url, UrlValidationError> {
    if link.is_empty() {
        return Err(UrlValidationError::Empty);
    }
    if link.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(UrlValidationError::UnsafeCharacters);
    }

    let url = Url::parse(link)?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(UrlValidationError::UnsupportedScheme(scheme.to_owned())),
    }
}
