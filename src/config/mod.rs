//! Configuration module for Noun-Harvest
//!
//! This module handles loading, parsing, and validating the optional TOML
//! configuration file. Without a file, `Config::default()` targets the Russian
//! Wiktionary index and gramota.ru.
//!
//! # Example
//!
//! ```no_run
//! use noun_harvest::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("harvest.toml")).unwrap();
//! println!("Words will be written to: {}", config.output.words_path);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, HttpConfig, LoggingConfig, MarkerConfig, OutputConfig, SourceConfig, VerifierConfig,
    LETTER_PLACEHOLDER,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use validation::validate;
