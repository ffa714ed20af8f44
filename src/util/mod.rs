//! Utility functions shared by the dashboard views.
//!
//! - **Text processing**: Unicode-aware width, truncation and wrapping, plus
//!   stripping of terminal control sequences from feed-supplied text
//! - **URL validation**: Checks entry links before opening them in a browser

mod text;
mod url_validator;

pub use text::{display_width, strip_control_chars, truncate_to_width, wrap_to_width};
pub use url_validator::{validate_url_for_open, UrlValidationError};

/// Maximum query length accepted by the search box.
pub const MAX_SEARCH_QUERY_LENGTH: usize = 256;
