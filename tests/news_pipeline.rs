//! Integration tests for the search pipeline: config → URL → fetch → entries.
//!
//! Each test starts its own mock provider so the real Google News endpoint is
//! never contacted.

use newsdash::config::Config;
use newsdash::feed::{search, FetchOutcome, SearchSettings, SUMMARY_PLACEHOLDER};
use newsdash::output;
use pretty_assertions::assert_eq;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn rss_with_items(items: &[(&str, &str, &str)]) -> String {
    let body: String = items
        .iter()
        .enumerate()
        .map(|(i, (title, date, description))| {
            format!(
                "<item><title>{title}</title><link>https://example.com/{i}</link>\
                 <pubDate>{date}</pubDate><description>{description}</description></item>"
            )
        })
        .collect();
    format!(r#"<?xml version="1.0" encoding="UTF-8"?><rss version="2.0"><channel><title>t</title>{body}</channel></rss>"#)
}

async fn provider(body: String) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rss/search"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("Content-Type", "application/rss+xml; charset=utf-8"),
        )
        .mount(&server)
        .await;
    server
}

fn settings_for(server: &MockServer) -> SearchSettings {
    SearchSettings {
        endpoint: format!("{}/rss/search", server.uri()),
        ..SearchSettings::default()
    }
}

// ============================================================================
// Normalization through the full pipeline
// ============================================================================

#[tokio::test]
async fn test_entries_normalized_for_display() {
    let body = rss_with_items(&[
        (
            "生成AIの最新動向 - 日経新聞",
            "Mon, 06 Jan 2025 08:00:00 GMT",
            "&lt;a href=\"https://example.com\"&gt;生成AIの最新動向&lt;/a&gt;",
        ),
        ("Second", "not a date", "Lead text &lt;b&gt;rest&lt;/b&gt;"),
        ("Third", "Tue, 15 Oct 2024 09:30:00 GMT", "   "),
    ]);
    let server = provider(body).await;
    let client = reqwest::Client::new();

    let outcome = search(&client, &settings_for(&server), "生成AI").await;
    let entries = outcome.entries();
    assert_eq!(entries.len(), 3);

    assert_eq!(entries[0].title, "生成AIの最新動向 - 日経新聞");
    assert_eq!(entries[0].published_display, "2025年01月06日 08:00");
    assert_eq!(entries[0].summary, SUMMARY_PLACEHOLDER);

    assert_eq!(entries[1].published_raw, "not a date");
    assert_eq!(entries[1].published_display, "not a date");
    assert_eq!(entries[1].summary, "Lead text ");

    assert_eq!(entries[2].link, "https://example.com/2");
    assert_eq!(entries[2].published_display, "2024年10月15日 09:30");
    assert_eq!(entries[2].summary, SUMMARY_PLACEHOLDER);
}

#[tokio::test]
async fn test_at_most_twenty_entries_in_provider_order() {
    let titles: Vec<String> = (0..30).map(|i| format!("Story {i:02}")).collect();
    let items: Vec<(&str, &str, &str)> = titles
        .iter()
        .map(|t| (t.as_str(), "Mon, 06 Jan 2025 08:00:00 GMT", "s"))
        .collect();
    let server = provider(rss_with_items(&items)).await;
    let client = reqwest::Client::new();

    let outcome = search(&client, &settings_for(&server), "many").await;
    let got: Vec<&str> = outcome.entries().iter().map(|e| e.title.as_str()).collect();
    let expected: Vec<&str> = titles.iter().take(20).map(String::as_str).collect();
    assert_eq!(got, expected);
}

#[tokio::test]
async fn test_fewer_than_twenty_entries_returned_as_is() {
    let server = provider(rss_with_items(&[
        ("A", "x", "a"),
        ("B", "y", "b"),
    ]))
    .await;
    let client = reqwest::Client::new();

    let outcome = search(&client, &settings_for(&server), "two").await;
    assert_eq!(outcome.entries().len(), 2);
    assert_eq!(outcome.entries()[0].title, "A");
    assert_eq!(outcome.entries()[1].title, "B");
}

#[tokio::test]
async fn test_zero_entries_reports_no_results() {
    let server = provider(rss_with_items(&[])).await;
    let client = reqwest::Client::new();

    let outcome = search(&client, &settings_for(&server), "nothing").await;
    assert_eq!(outcome, FetchOutcome::NoResults);

    let mut buf = Vec::new();
    output::write_cards(&mut buf, "nothing", &outcome).unwrap();
    assert!(String::from_utf8(buf).unwrap().contains("ニュースが見つかりませんでした"));
}

#[tokio::test]
async fn test_server_error_reports_no_results() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;
    let client = reqwest::Client::new();

    let outcome = search(&client, &settings_for(&server), "down").await;
    assert!(outcome.is_no_results());
}

// ============================================================================
// Config-driven settings
// ============================================================================

#[tokio::test]
async fn test_config_controls_locale_limit_and_format() {
    let server = MockServer::start().await;
    let items: Vec<(String, &str, &str)> = (0..10)
        .map(|i| (format!("Item {i}"), "Mon, 06 Jan 2025 08:00:00 GMT", ""))
        .collect();
    let items: Vec<(&str, &str, &str)> =
        items.iter().map(|(t, d, s)| (t.as_str(), *d, *s)).collect();
    Mock::given(method("GET"))
        .and(path("/rss/search"))
        .and(query_param("q", "rust"))
        .and(query_param("hl", "en-US"))
        .and(query_param("gl", "US"))
        .and(query_param("ceid", "US:en"))
        .respond_with(ResponseTemplate::new(200).set_body_string(rss_with_items(&items)))
        .expect(1)
        .mount(&server)
        .await;

    let dir = std::env::temp_dir().join("newsdash_pipeline_test_config");
    std::fs::create_dir_all(&dir).unwrap();
    let config_path = dir.join("config.toml");
    std::fs::write(
        &config_path,
        format!(
            r#"
endpoint = "{}/rss/search"
hl = "en-US"
gl = "US"
ceid = "US:en"
max_entries = 3
date_format = "%d/%m/%Y"
summary_placeholder = "(no summary)"
"#,
            server.uri()
        ),
    )
    .unwrap();

    let config = Config::load(&config_path).unwrap();
    let client = reqwest::Client::new();
    let outcome = search(&client, &config.search_settings(), "rust").await;

    let entries = outcome.entries();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0].published_display, "06/01/2025");
    assert_eq!(entries[0].summary, "(no summary)");

    std::fs::remove_dir_all(&dir).ok();
}
