//! Shared helpers for the UI modules.

use crate::app::{App, AppEvent};
use crate::feed::search;
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use tokio::sync::mpsc;

/// Run a future and convert a panic into an error message.
///
/// Spawned tasks report panics through `AppEvent::TaskPanicked` instead of
/// dying silently and leaving the UI stuck in a loading state.
pub(super) async fn catch_task_panic<F, T>(future: F) -> Result<T, String>
where
    F: std::future::Future<Output = T>,
{
    AssertUnwindSafe(future)
        .catch_unwind()
        .await
        .map_err(|panic| {
            if let Some(s) = panic.downcast_ref::<&'static str>() {
                s.to_string()
            } else if let Some(s) = panic.downcast_ref::<String>() {
                s.clone()
            } else {
                "Unknown panic".to_string()
            }
        })
}

/// Start a search for `query` in the background.
///
/// Any search still in flight is aborted; its result would be stale anyway.
pub fn spawn_search(app: &mut App, query: String, event_tx: &mpsc::Sender<AppEvent>) {
    let generation = app.begin_search(query.clone());

    let client = app.http_client.clone();
    let settings = app.settings.clone();
    let tx = event_tx.clone();

    tracing::debug!(query = %query, generation, "Spawning search task");

    app.search_handle = Some(tokio::spawn(async move {
        let event = match catch_task_panic(search(&client, &settings, &query)).await {
            Ok(outcome) => AppEvent::SearchCompleted {
                generation,
                query,
                outcome,
            },
            Err(error) => AppEvent::TaskPanicked {
                task: "search",
                error,
            },
        };

        if let Err(e) = tx.send(event).await {
            tracing::warn!(error = %e, "Failed to send search results (receiver dropped)");
        }
    }));
}

/// Open the selected entry's link in the system browser.
pub(super) fn open_selected(app: &mut App) {
    let Some(entry) = app.selected_entry() else {
        return;
    };
    // SEC: Validate URL before open::that() to prevent command injection
    match crate::util::validate_url_for_open(&entry.link) {
        Ok(url) => {
            if let Err(e) = open::that(url.as_str()) {
                app.set_status(format!("Failed to open browser: {}", e));
            } else {
                app.set_status("Opening article in browser...");
            }
        }
        Err(e) => app.set_status(e.to_string()),
    }
}
