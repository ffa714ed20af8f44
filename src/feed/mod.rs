//! News search pipeline: query encoding, feed retrieval and normalization.
//!
//! - [`query`] - Builds the Google News RSS search URL for a free-text query
//! - [`parser`] - Typed RSS/Atom parsing using the `feed-rs` crate
//! - [`normalize`] - Date reformatting and plain-text summary extraction
//! - [`fetcher`] - Single HTTP GET that degrades to "no results" on failure
//!
//! # Example
//!
//! ```ignore
//! use newsdash::feed::{search, SearchSettings};
//!
//! let outcome = search(&client, &SearchSettings::default(), "Artificial Intelligence").await;
//! for entry in outcome.entries() {
//!     println!("{} ({})", entry.title, entry.published_display);
//! }
//! ```

mod fetcher;
mod normalize;
mod parser;
mod query;

pub use fetcher::{fetch_entries, search, FetchError, FetchOutcome, SearchSettings, MAX_ENTRIES};
pub use normalize::{
    format_published, normalize_entry, parse_provider_timestamp, plain_summary, FeedEntry,
    NormalizeOptions, DEFAULT_DISPLAY_FORMAT, SUMMARY_PLACEHOLDER,
};
pub use parser::{parse_feed, ParsedEntry};
pub use query::{build_search_url, encode_query, Locale, DEFAULT_ENDPOINT};
