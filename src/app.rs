use std::borrow::Cow;
use std::time::Instant;

use tokio::task::JoinHandle;

use crate::feed::{FeedEntry, FetchOutcome, SearchSettings};

// ============================================================================
// Events
// ============================================================================

/// Events sent from background tasks to the UI loop.
#[derive(Debug)]
pub enum AppEvent {
    /// A search finished.
    ///
    /// Fields:
    /// - `generation`: The generation counter when this search was spawned
    /// - `query`: The query that was searched
    /// - `outcome`: Entries or "no results"
    SearchCompleted {
        generation: u64,
        query: String,
        outcome: FetchOutcome,
    },
    /// A background task panicked.
    TaskPanicked { task: &'static str, error: String },
}

/// What the results area currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultsState {
    /// No search has completed yet.
    Idle,
    /// A search is in flight.
    Loading,
    /// The last search returned entries.
    Loaded,
    /// The last search returned nothing (or failed).
    NoResults,
}

// ============================================================================
// Application State
// ============================================================================

/// Central application state
pub struct App {
    pub http_client: reqwest::Client,
    pub settings: SearchSettings,

    // Data
    /// Query whose results are on screen (or being fetched).
    pub query: String,
    /// Entries from the last completed search, discarded on the next one.
    pub entries: Vec<FeedEntry>,
    pub results: ResultsState,

    // UI State
    pub selected: usize,
    pub search_mode: bool,
    pub search_input: String,
    pub spinner_frame: usize,
    pub status_message: Option<(Cow<'static, str>, Instant)>,
    pub needs_redraw: bool,

    // Background search
    /// Incremented per search; results from older generations are dropped.
    pub search_generation: u64,
    pub search_handle: Option<JoinHandle<()>>,
}

impl App {
    pub fn new(http_client: reqwest::Client, settings: SearchSettings, query: String) -> Self {
        Self {
            http_client,
            settings,
            search_input: query.clone(),
            query,
            entries: Vec::new(),
            results: ResultsState::Idle,
            selected: 0,
            search_mode: false,
            spinner_frame: 0,
            status_message: None,
            needs_redraw: true,
            search_generation: 0,
            search_handle: None,
        }
    }

    pub fn set_status(&mut self, msg: impl Into<Cow<'static, str>>) {
        self.status_message = Some((msg.into(), Instant::now()));
    }

    /// Clear status message if expired (older than 3 seconds)
    /// Returns true if a message was actually cleared
    pub fn clear_expired_status(&mut self) -> bool {
        if let Some((_, time)) = &self.status_message {
            if time.elapsed().as_secs() >= 3 {
                self.status_message = None;
                return true;
            }
        }
        false
    }

    pub fn selected_entry(&self) -> Option<&FeedEntry> {
        self.entries.get(self.selected)
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.entries.len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.entries.len().saturating_sub(1);
    }

    /// Marks a new search for `query` as in flight and returns its generation.
    ///
    /// Previous entries are dropped immediately; nothing survives between
    /// searches.
    pub fn begin_search(&mut self, query: String) -> u64 {
        if let Some(handle) = self.search_handle.take() {
            handle.abort();
            tracing::debug!("Aborted previous search task");
        }
        self.search_generation = self.search_generation.wrapping_add(1);
        self.query = query;
        self.entries.clear();
        self.selected = 0;
        self.results = ResultsState::Loading;
        self.spinner_frame = 0;
        self.search_generation
    }

    /// Applies a finished search. Returns false if it was stale.
    pub fn finish_search(&mut self, generation: u64, query: &str, outcome: FetchOutcome) -> bool {
        if generation != self.search_generation {
            tracing::debug!(
                generation,
                current = self.search_generation,
                query = %query,
                "Discarding stale search result"
            );
            return false;
        }

        self.search_handle = None;
        self.selected = 0;
        self.results = if outcome.is_no_results() {
            ResultsState::NoResults
        } else {
            ResultsState::Loaded
        };
        self.entries = outcome.into_entries();
        true
    }
}
