//! Display normalization for parsed feed entries.
//!
//! Two fields are rewritten for display:
//!
//! - **Dates**: the provider's RFC 822 style timestamp
//!   (`Mon, 06 Jan 2025 08:00:00 GMT`) is reformatted with the display format.
//!   The wall-clock value is kept as written. The zone must be `GMT` or `UTC`
//!   and is never converted; the weekday must be a weekday name but is not
//!   checked against the date. Anything else is shown unchanged.
//! - **Summaries**: Google News wraps summaries in markup whose leading text,
//!   if any, is the useful part. The plain-text rule is: keep everything
//!   before the first `<`, and if that is blank use the placeholder. There is
//!   no entity decoding beyond what the XML parser already performed, and no
//!   attempt to recover text from inside tags.

use std::fmt::Write;

use chrono::{NaiveDateTime, Weekday};
use serde::Serialize;

use super::parser::ParsedEntry;

/// Provider timestamp pattern, minus the leading weekday and trailing zone.
pub const PROVIDER_TIMESTAMP_FORMAT: &str = "%d %b %Y %H:%M:%S";

/// Zone names accepted after the time.
const PROVIDER_ZONES: [&str; 2] = ["GMT", "UTC"];

/// Default `strftime` pattern for displayed dates.
pub const DEFAULT_DISPLAY_FORMAT: &str = "%Y年%m月%d日 %H:%M";

/// Shown when an entry has no usable summary text.
pub const SUMMARY_PLACEHOLDER: &str = "この記事の概要は、リンク先の元記事にてご確認ください。";

/// A feed entry ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedEntry {
    pub title: String,
    pub link: String,
    /// Provider-formatted timestamp text (empty when the entry had none).
    pub published_raw: String,
    /// Reformatted timestamp, or `published_raw` when it did not match.
    pub published_display: String,
    /// Plain-text summary, never blank.
    pub summary: String,
}

/// Display settings applied to every entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizeOptions {
    pub date_format: String,
    pub summary_placeholder: String,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            date_format: DEFAULT_DISPLAY_FORMAT.to_string(),
            summary_placeholder: SUMMARY_PLACEHOLDER.to_string(),
        }
    }
}

/// Parses `Mon, 06 Jan 2025 08:00:00 GMT` style timestamps.
///
/// Only `GMT` and `UTC` are accepted as zones; numeric offsets (`+0900`)
/// and other names (`JST`) are rejected. The weekday has to be a valid name
/// (`Mon` or `Monday`, any case) but is not required to agree with the date.
pub fn parse_provider_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let (weekday, rest) = raw.trim().split_once(',')?;
    weekday.trim().parse::<Weekday>().ok()?;

    let (stamp, zone) = rest.trim().rsplit_once(' ')?;
    if !PROVIDER_ZONES.iter().any(|z| z.eq_ignore_ascii_case(zone)) {
        return None;
    }
    NaiveDateTime::parse_from_str(stamp.trim(), PROVIDER_TIMESTAMP_FORMAT).ok()
}

/// Formats a provider timestamp for display, falling back to the raw text.
pub fn format_published(raw: &str, date_format: &str) -> String {
    let Some(dt) = parse_provider_timestamp(raw) else {
        if !raw.is_empty() {
            tracing::debug!(raw = %raw, "Unrecognized timestamp, showing raw text");
        }
        return raw.to_string();
    };

    // An invalid user-supplied format makes `Display` fail; writing into a
    // String surfaces that as an error instead of a panic.
    let mut out = String::new();
    if write!(out, "{}", dt.format(date_format)).is_err() {
        tracing::warn!(format = %date_format, "Invalid date format, showing raw text");
        return raw.to_string();
    }
    out
}

/// Reduces a summary to the text before the first `<`, or the placeholder.
pub fn plain_summary(summary: Option<&str>, placeholder: &str) -> String {
    let text = summary.unwrap_or_default();
    let text = match text.find('<') {
        Some(idx) => &text[..idx],
        None => text,
    };
    if text.trim().is_empty() {
        placeholder.to_string()
    } else {
        text.to_string()
    }
}

/// Converts a parsed entry into its display form.
pub fn normalize_entry(entry: ParsedEntry, options: &NormalizeOptions) -> FeedEntry {
    let published_raw = entry
        .published_raw
        .or_else(|| entry.published.map(|dt| dt.to_rfc2822()))
        .unwrap_or_default();
    let published_display = format_published(&published_raw, &options.date_format);
    let summary = plain_summary(entry.summary.as_deref(), &options.summary_placeholder);

    FeedEntry {
        title: entry.title,
        link: entry.link,
        published_raw,
        published_display,
        summary,
    }
}
