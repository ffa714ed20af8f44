use anyhow::Result;
use chrono::{DateTime, Utc};
use feed_rs::parser;
use quick_xml::events::Event;
use quick_xml::Reader;

/// One entry as delivered by the provider, before display normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedEntry {
    pub title: String,
    pub link: String,
    /// Timestamp text exactly as it appeared in the document.
    pub published_raw: Option<String>,
    /// Timestamp as understood by `feed-rs`, used when no raw text was found.
    pub published: Option<DateTime<Utc>>,
    pub summary: Option<String>,
}

/// Parses an RSS or Atom document and returns at most `limit` entries in
/// document order.
pub fn parse_feed(bytes: &[u8], limit: usize) -> Result<Vec<ParsedEntry>> {
    let feed = parser::parse(bytes)?;
    let raw_dates = scan_raw_dates(bytes);

    let entries = feed
        .entries
        .into_iter()
        .take(limit)
        .enumerate()
        .map(|(idx, entry)| {
            let link = entry
                .links
                .first()
                .map(|l| l.href.clone())
                .unwrap_or_default();
            let published = entry.published.or(entry.updated);
            let summary = entry
                .summary
                .map(|s| s.content)
                .or_else(|| entry.content.and_then(|c| c.body));
            let title = entry.title.map(|t| t.content).unwrap_or_default();

            ParsedEntry {
                title,
                link,
                published_raw: raw_dates.get(idx).cloned().flatten(),
                published,
                summary,
            }
        })
        .collect();

    Ok(entries)
}

/// Rank of a date element inside an item; lower wins.
fn date_rank(local_name: &[u8]) -> Option<u8> {
    match local_name {
        b"pubDate" | b"published" | b"issued" => Some(0),
        b"date" => Some(1),
        b"updated" | b"modified" => Some(2),
        _ => None,
    }
}

/// Collects the raw timestamp text of every `<item>`/`<entry>`, in order.
///
/// `feed-rs` only exposes parsed dates, so the original text is recovered
/// with a separate event pass. Only direct children of the item count, which
/// keeps an Atom `<source><updated>` from shadowing the entry's own date.
/// A scan error ends the pass early; entries past that point get `None`.
fn scan_raw_dates(bytes: &[u8]) -> Vec<Option<String>> {
    // SEC-002: quick-xml (0.37) never expands <!ENTITY> declarations, only the
    // five XML builtins, so the scan is not exposed to XXE.
    let mut reader = Reader::from_reader(bytes);
    reader.config_mut().trim_text(true);

    let mut dates = Vec::new();
    let mut buf = Vec::new();
    let mut depth: usize = 0;
    // Depth of the currently open item, if any.
    let mut item_depth: Option<usize> = None;
    // Best (rank, text) seen so far in the current item.
    let mut best: Option<(u8, String)> = None;
    // Rank of the date element whose text we are reading.
    let mut capturing: Option<u8> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                depth += 1;
                let name = e.local_name();
                match item_depth {
                    None if matches!(name.as_ref(), b"item" | b"entry") => {
                        item_depth = Some(depth);
                        best = None;
                    }
                    Some(d) if depth == d + 1 => {
                        capturing = date_rank(name.as_ref());
                    }
                    _ => {}
                }
            }
            Ok(Event::Empty(e))
                if item_depth.is_none() && matches!(e.local_name().as_ref(), b"item" | b"entry") =>
            {
                dates.push(None);
            }
            Ok(Event::Text(t)) => {
                if let Some(rank) = capturing {
                    if let Ok(text) = t.unescape() {
                        offer(&mut best, rank, text.into_owned());
                    }
                }
            }
            Ok(Event::CData(c)) => {
                if let Some(rank) = capturing {
                    let text = String::from_utf8_lossy(&c.into_inner()).into_owned();
                    offer(&mut best, rank, text);
                }
            }
            Ok(Event::End(_)) => {
                if item_depth == Some(depth) {
                    dates.push(best.take().map(|(_, text)| text));
                    item_depth = None;
                }
                capturing = None;
                depth = depth.saturating_sub(1);
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                tracing::debug!(error = %e, scanned = dates.len(), "Raw date scan stopped early");
                break;
            }
            _ => {}
        }
        buf.clear();
    }

    dates
}

fn offer(best: &mut Option<(u8, String)>, rank: u8, text: String) {
    let text = text.trim();
    if text.is_empty() {
        return;
    }
    match best {
        Some((current, _)) if *current <= rank => {}
        _ => *best = Some((rank, text.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const GOOGLE_NEWS_RSS: &str = r##"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:media="http://search.yahoo.com/mrss/"><channel>
<title>"AI" - Google ニュース</title>
<link>https://news.google.com/search?q=AI&amp;hl=ja&amp;gl=JP&amp;ceid=JP:ja</link>
<lastBuildDate>Mon, 06 Jan 2025 09:00:00 GMT</lastBuildDate>
<item>
  <title>生成AIの最新動向 - 日経新聞</title>
  <link>https://news.google.com/rss/articles/abc?oc=5</link>
  <guid isPermaLink="false">abc</guid>
  <pubDate>Mon, 06 Jan 2025 08:00:00 GMT</pubDate>
  <description>&lt;a href="https://news.google.com/rss/articles/abc?oc=5"&gt;生成AIの最新動向&lt;/a&gt;&amp;nbsp;&amp;nbsp;&lt;font color="#6f6f6f"&gt;日経新聞&lt;/font&gt;</description>
  <source url="https://www.nikkei.com">日経新聞</source>
</item>
<item>
  <title>Second</title>
  <link>https://example.com/2</link>
  <pubDate>yesterday-ish</pubDate>
  <description>Plain summary text</description>
</item>
</channel></rss>"##;

    #[test]
    fn test_parse_google_news_items() {
        let entries = parse_feed(GOOGLE_NEWS_RSS.as_bytes(), 20).unwrap();
        assert_eq!(entries.len(), 2);

        assert_eq!(entries[0].title, "生成AIの最新動向 - 日経新聞");
        assert_eq!(entries[0].link, "https://news.google.com/rss/articles/abc?oc=5");
        assert_eq!(
            entries[0].published_raw.as_deref(),
            Some("Mon, 06 Jan 2025 08:00:00 GMT")
        );
        assert!(entries[0].published.is_some());
        assert!(entries[0]
            .summary
            .as_deref()
            .is_some_and(|s| s.starts_with("<a href=")));

        assert_eq!(entries[1].published_raw.as_deref(), Some("yesterday-ish"));
        assert_eq!(entries[1].summary.as_deref(), Some("Plain summary text"));
    }

    #[test]
    fn test_channel_date_not_attributed_to_items() {
        let xml = r#"<?xml version="1.0"?>
<rss version="2.0"><channel>
    <pubDate>Sun, 05 Jan 2025 00:00:00 GMT</pubDate>
    <item><title>No date</title><link>https://example.com/a</link></item>
</channel></rss>"#;
        let entries = parse_feed(xml.as_bytes(), 20).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].published_raw, None);
    }

    #[test]
    fn test_parse_atom_prefers_published_over_updated() {
        let xml = r#"<?xml version="1.0" encoding="utf-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>Atom</title>
  <id>urn:feed</id>
  <updated>2025-01-07T00:00:00Z</updated>
  <entry>
    <id>urn:1</id>
    <title>Atom entry</title>
    <link href="https://example.com/atom/1"/>
    <updated>2025-01-06T10:00:00Z</updated>
    <published>2025-01-05T10:00:00Z</published>
    <source><updated>2020-01-01T00:00:00Z</updated></source>
    <summary>Atom summary</summary>
  </entry>
</feed>"#;
        let entries = parse_feed(xml.as_bytes(), 20).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title, "Atom entry");
        assert_eq!(entries[0].link, "https://example.com/atom/1");
        assert_eq!(
            entries[0].published_raw.as_deref(),
            Some("2025-01-05T10:00:00Z")
        );
        assert_eq!(entries[0].summary.as_deref(), Some("Atom summary"));
    }

    #[test]
    fn test_limit_keeps_document_order() {
        let items: String = (0..25)
            .map(|i| {
                format!(
                    "<item><title>Item {i}</title><link>https://example.com/{i}</link>\
                     <pubDate>Mon, 06 Jan 2025 08:{i:02}:00 GMT</pubDate></item>"
                )
            })
            .collect();
        let xml = format!(r#"<?xml version="1.0"?><rss version="2.0"><channel>{items}</channel></rss>"#);

        let entries = parse_feed(xml.as_bytes(), 20).unwrap();
        assert_eq!(entries.len(), 20);
        for (i, entry) in entries.iter().enumerate() {
            assert_eq!(entry.title, format!("Item {i}"));
            assert_eq!(
                entry.published_raw.as_deref(),
                Some(format!("Mon, 06 Jan 2025 08:{i:02}:00 GMT").as_str())
            );
        }
    }

    #[test]
    fn test_missing_title_and_link_become_empty() {
        let xml = r#"<?xml version="1.0"?>
<rss version="2.0"><channel><item><description>only a summary</description></item></channel></rss>"#;
        let entries = parse_feed(xml.as_bytes(), 20).unwrap();
        assert_eq!(entries[0].title, "");
        assert_eq!(entries[0].link, "");
    }

    #[test]
    fn test_invalid_document_is_error() {
        assert!(parse_feed(b"<not valid xml", 20).is_err());
        assert!(parse_feed(b"", 20).is_err());
    }

    #[test]
    fn test_cdata_date_captured() {
        let xml = r#"<?xml version="1.0"?>
<rss version="2.0"><channel><item><title>t</title>
<pubDate><![CDATA[Tue, 15 Oct 2024 09:30:00 GMT]]></pubDate></item></channel></rss>"#;
        let entries = parse_feed(xml.as_bytes(), 20).unwrap();
        assert_eq!(
            entries[0].published_raw.as_deref(),
            Some("Tue, 15 Oct 2024 09:30:00 GMT")
        );
    }
}
