//! Search Google News RSS for a query and show the results as cards.
//!
//! The [`feed`] module is the pipeline (query URL, fetch, parse, normalize);
//! [`ui`] and [`output`] are the two shells that render its results.

pub mod app;
pub mod config;
pub mod feed;
pub mod output;
pub mod ui;
pub mod util;
