//! Input handling for the TUI.
//!
//! Two modes: browsing the result cards, and editing the search box.

use crate::app::{App, AppEvent};
use crate::util::MAX_SEARCH_QUERY_LENGTH;
use crossterm::event::{KeyCode, KeyModifiers};
use tokio::sync::mpsc;

use super::helpers::{open_selected, spawn_search};
use super::Action;

/// Main input dispatch function.
pub(super) fn handle_input(
    app: &mut App,
    code: KeyCode,
    modifiers: KeyModifiers,
    event_tx: &mpsc::Sender<AppEvent>,
) -> Action {
    // Ctrl+C quits from any mode (raw mode swallows SIGINT)
    if modifiers.contains(KeyModifiers::CONTROL) && code == KeyCode::Char('c') {
        return Action::Quit;
    }

    if app.search_mode {
        handle_search_input(app, code, event_tx);
        return Action::Continue;
    }

    handle_browse_input(app, code, event_tx)
}

fn handle_browse_input(
    app: &mut App,
    code: KeyCode,
    event_tx: &mpsc::Sender<AppEvent>,
) -> Action {
    match code {
        KeyCode::Char('q') => return Action::Quit,
        KeyCode::Char('j') | KeyCode::Down => app.select_next(),
        KeyCode::Char('k') | KeyCode::Up => app.select_prev(),
        KeyCode::Char('g') | KeyCode::Home => app.select_first(),
        KeyCode::Char('G') | KeyCode::End => app.select_last(),
        KeyCode::Char('o') | KeyCode::Enter => open_selected(app),
        KeyCode::Char('/') | KeyCode::Char('s') => {
            app.search_mode = true;
            app.search_input = app.query.clone();
        }
        KeyCode::Char('r') => {
            let query = app.query.clone();
            spawn_search(app, query, event_tx);
        }
        _ => {}
    }
    Action::Continue
}

fn handle_search_input(app: &mut App, code: KeyCode, event_tx: &mpsc::Sender<AppEvent>) {
    match code {
        KeyCode::Esc => {
            app.search_mode = false;
            app.search_input = app.query.clone();
        }
        KeyCode::Enter => {
            app.search_mode = false;
            let query = app.search_input.trim().to_string();
            spawn_search(app, query, event_tx);
        }
        KeyCode::Backspace => {
            app.search_input.pop();
        }
        KeyCode::Char(c) => {
            if app.search_input.chars().count() >= MAX_SEARCH_QUERY_LENGTH {
                app.set_status(format!(
                    "Search query at max length ({} chars)",
                    MAX_SEARCH_QUERY_LENGTH
                ));
                return;
            }
            app.search_input.push(c);
        }
        _ => {}
    }
}
