//! Background task event processing.

use crate::app::{App, AppEvent};

/// Apply an event from a background task to the application state.
pub(super) fn handle_app_event(app: &mut App, event: AppEvent) {
    match event {
        AppEvent::SearchCompleted {
            generation,
            query,
            outcome,
        } => {
            let count = outcome.entries().len();
            if app.finish_search(generation, &query, outcome) {
                tracing::debug!(query = %query, entries = count, "Search results applied");
            }
        }
        AppEvent::TaskPanicked { task, error } => {
            tracing::error!(task, error, "Background task panicked");
            app.search_handle = None;
            app.results = crate::app::ResultsState::NoResults;
            app.set_status(format!("Internal error in {} task", task));
        }
    }
}
