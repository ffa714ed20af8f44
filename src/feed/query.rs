use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Google News RSS search endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://news.google.com/rss/search";

/// Everything except the RFC 3986 unreserved set is encoded, so a space
/// becomes `%20` and `/`, `&`, `=`, `+` never leak into the query string.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Locale values keep `:` so the edition id reads `ceid=JP:ja`.
const LOCALE_VALUE: &AsciiSet = &QUERY_VALUE.remove(b':');

/// Locale parameters appended to every search URL.
///
/// Google News selects the edition from all three: `hl` is the interface
/// language, `gl` the country, `ceid` the combined edition id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locale {
    pub hl: String,
    pub gl: String,
    pub ceid: String,
}

impl Default for Locale {
    fn default() -> Self {
        Self {
            hl: "ja".to_string(),
            gl: "JP".to_string(),
            ceid: "JP:ja".to_string(),
        }
    }
}

/// Percent-encodes a free-text query for use as a URL query value.
pub fn encode_query(query: &str) -> String {
    utf8_percent_encode(query, QUERY_VALUE).to_string()
}

/// Builds the feed URL for a search query.
///
/// The query is encoded with [`encode_query`]. Locale values use the same
/// set minus `:`. An empty query is passed through as `q=` and left to the provider.
///
/// # Examples
///
/// ```
/// use newsdash::feed::{build_search_url, Locale, DEFAULT_ENDPOINT};
///
/// let url = build_search_url(DEFAULT_ENDPOINT, "rust lang", &Locale::default());
/// assert!(url.starts_with("https://news.google.com/rss/search?q=rust%20lang&hl=ja"));
/// ```
pub fn build_search_url(endpoint: &str, query: &str, locale: &Locale) -> String {
    format!(
        "{}?q={}&hl={}&gl={}&ceid={}",
        endpoint.trim_end_matches('?'),
        encode_query(query),
        utf8_percent_encode(&locale.hl, LOCALE_VALUE),
        utf8_percent_encode(&locale.gl, LOCALE_VALUE),
        utf8_percent_encode(&locale.ceid, LOCALE_VALUE),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use percent_encoding::percent_decode_str;
    use proptest::prelude::*;

    #[test]
    fn test_default_url_matches_provider_format() {
        let url = build_search_url(DEFAULT_ENDPOINT, "Artificial Intelligence", &Locale::default());
        assert_eq!(
            url,
            "https://news.google.com/rss/search?q=Artificial%20Intelligence&hl=ja&gl=JP&ceid=JP:ja"
        );
    }

    #[test]
    fn test_empty_query_passed_through() {
        let url = build_search_url(DEFAULT_ENDPOINT, "", &Locale::default());
        assert!(url.contains("?q=&hl=ja"));
    }

    #[test]
    fn test_reserved_characters_encoded() {
        assert_eq!(encode_query("a&b=c"), "a%26b%3Dc");
        assert_eq!(encode_query("c++ / rust"), "c%2B%2B%20%2F%20rust");
        assert_eq!(encode_query("safe-._~"), "safe-._~");
    }

    #[test]
    fn test_japanese_query_encoded_as_utf8() {
        assert_eq!(encode_query("人工知能"), "%E4%BA%BA%E5%B7%A5%E7%9F%A5%E8%83%BD");
    }

    #[test]
    fn test_custom_locale() {
        let locale = Locale {
            hl: "en-US".into(),
            gl: "US".into(),
            ceid: "US:en".into(),
        };
        let url = build_search_url("https://example.com/rss/search", "ai", &locale);
        assert_eq!(
            url,
            "https://example.com/rss/search?q=ai&hl=en-US&gl=US&ceid=US:en"
        );
    }

    proptest! {
        #[test]
        fn prop_encoded_url_has_no_literal_spaces(query in ".*") {
            let url = build_search_url(DEFAULT_ENDPOINT, &query, &Locale::default());
            prop_assert!(!url.contains(' '));
            prop_assert!(url.is_ascii());
        }

        #[test]
        fn prop_encoding_is_lossless(query in ".*") {
            let encoded = encode_query(&query);
            let decoded = percent_decode_str(&encoded).decode_utf8().unwrap();
            prop_assert_eq!(decoded, query);
        }
    }
}
