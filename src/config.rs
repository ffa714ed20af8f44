//! Configuration file parser for ~/.config/newsdash/config.toml.
//!
//! The config file is optional: a missing file yields `Config::default()`.
//! Unknown keys are silently ignored by serde (with `deny_unknown_fields` off),
//! though we log a warning when the file contains potential typos.
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use crate::feed::{
    Locale, NormalizeOptions, SearchSettings, DEFAULT_DISPLAY_FORMAT, DEFAULT_ENDPOINT,
    MAX_ENTRIES, SUMMARY_PLACEHOLDER,
};

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML in config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// SEC-014: Config file exceeds maximum allowed size.
    #[error("Config file too large: {0}")]
    TooLarge(String),
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Top-level application configuration.
///
/// All fields use `#[serde(default)]` so any subset of keys can be specified.
/// Missing keys fall back to `Default::default()`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Query searched on startup when none is given on the command line.
    pub default_query: String,

    /// RSS search endpoint; the query and locale are appended to it.
    pub endpoint: String,

    /// Interface language (`hl`).
    pub hl: String,

    /// Country (`gl`).
    pub gl: String,

    /// Edition id (`ceid`).
    pub ceid: String,

    /// Entries shown per search, clamped to 1..=20.
    pub max_entries: usize,

    /// `strftime` pattern for displayed dates.
    pub date_format: String,

    /// Text shown for entries without a usable summary.
    pub summary_placeholder: String,
}

impl Default for Config {
    fn default() -> Self {
        let locale = Locale::default();
        Self {
            default_query: "Artificial Intelligence".to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            hl: locale.hl,
            gl: locale.gl,
            ceid: locale.ceid,
            max_entries: MAX_ENTRIES,
            date_format: DEFAULT_DISPLAY_FORMAT.to_string(),
            summary_placeholder: SUMMARY_PLACEHOLDER.to_string(),
        }
    }
}

impl Config {
    /// SEC-014: Maximum config file size (1 MB).
    const MAX_FILE_SIZE: u64 = 1_048_576;

    /// Load configuration from a TOML file.
    ///
    /// - Missing file → `Ok(Config::default())`
    /// - Empty file → `Ok(Config::default())`
    /// - Invalid TOML → `Err(ConfigError::Parse)` with line number info
    /// - Unknown keys → silently accepted (serde default behavior), logged as warning
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        // SEC-014: Check file size before reading to prevent memory exhaustion
        // from a maliciously large or corrupted config file.
        match std::fs::metadata(path) {
            Ok(meta) if meta.len() > Self::MAX_FILE_SIZE => {
                return Err(ConfigError::TooLarge(format!(
                    "Config file is {} bytes (max {} bytes)",
                    meta.len(),
                    Self::MAX_FILE_SIZE
                )));
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file found, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
            Ok(_) => {}
        }

        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                // Race condition: file deleted between metadata and read
                tracing::debug!(path = %path.display(), "Config file disappeared, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
        };

        if content.trim().is_empty() {
            tracing::debug!(path = %path.display(), "Config file is empty, using defaults");
            return Ok(Self::default());
        }

        // Parse the TOML content first as a raw table to detect unknown keys
        if let Ok(raw) = content.parse::<toml::Table>() {
            let known_keys = [
                "default_query",
                "endpoint",
                "hl",
                "gl",
                "ceid",
                "max_entries",
                "date_format",
                "summary_placeholder",
            ];
            for key in raw.keys() {
                if !known_keys.contains(&key.as_str()) {
                    tracing::warn!(key = %key, "Unknown key in config file, ignoring");
                }
            }
        }

        let config: Config = toml::from_str(&content)?;
        tracing::info!(
            path = %path.display(),
            endpoint = %config.endpoint,
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Settings for the search pipeline.
    pub fn search_settings(&self) -> SearchSettings {
        if self.max_entries == 0 || self.max_entries > MAX_ENTRIES {
            tracing::warn!(
                max_entries = self.max_entries,
                "max_entries outside 1..={}, clamping",
                MAX_ENTRIES
            );
        }
        SearchSettings {
            endpoint: self.endpoint.clone(),
            locale: Locale {
                hl: self.hl.clone(),
                gl: self.gl.clone(),
                ceid: self.ceid.clone(),
            },
            max_entries: self.max_entries.clamp(1, MAX_ENTRIES),
            normalize: NormalizeOptions {
                date_format: self.date_format.clone(),
                summary_placeholder: self.summary_placeholder.clone(),
            },
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
