//! Noun-Harvest: a dictionary crawler that collects confirmed nouns
//!
//! This crate crawls a dictionary index site letter by letter, filters every
//! word page through a chain of markup rules, confirms the survivors against a
//! second dictionary, and stores the accepted words. A separate entry point
//! compacts the stored words into a prefix tree for autocomplete.

pub mod alphabet;
pub mod config;
pub mod crawler;
pub mod output;
pub mod trie;

use thiserror::Error;

/// Main error type for Noun-Harvest operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    /// A verification page came back without its grammar block for a reason
    /// other than a temporary outage
    #[error("{status} | {url} | {word}")]
    MissingGrammar {
        status: u16,
        url: String,
        word: String,
    },

    #[error("Verification of '{word}' still unavailable after {attempts} attempts ({url})")]
    RetriesExhausted {
        word: String,
        url: String,
        attempts: u32,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid CSS selector: {0}")]
    InvalidSelector(String),
}

/// Result type alias for Noun-Harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use alphabet::{Alphabet, AlphabetUnit};
pub use config::Config;
pub use crawler::{Candidate, Verdict};
pub use output::WordSet;
pub use trie::{build_trie, TrieNode};
