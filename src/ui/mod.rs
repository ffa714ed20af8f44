//! Terminal dashboard for news search results.
//!
//! # Module Structure
//!
//! - `loop_runner` - Main event loop and terminal management
//! - `input` - Keyboard input handling
//! - `events` - Background task event processing
//! - `render` - Layout and render dispatch
//! - `helpers` - Search spawning and link opening
//! - `header` - Title header and search box widgets
//! - `cards` - Result card list, spinner and "no results" notice
//! - `status` - Status bar widget

mod cards;
mod events;
mod header;
mod helpers;
mod input;
mod loop_runner;
mod render;
mod status;

pub use helpers::spawn_search;
pub use loop_runner::{run, Action};
