//! Output module for crawl results
//!
//! This module handles:
//! - The shared set of accepted words and its JSON file
//! - Per-letter and whole-run crawl statistics
//! - Atomic JSON writes used by both the word list and the trie

pub mod stats;
mod words;

pub use stats::{CrawlStatistics, UnitReport};
pub use words::{load_words, save_words, WordSet};

use crate::Result;
use serde::Serialize;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Serializes `value` as UTF-8 JSON into `path`
///
/// The data goes to a temporary file in the target directory first and is
/// renamed into place, so readers never see a half-written file.
pub fn write_json_atomic<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let parent_dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent_dir)?;

    let temp_file = NamedTempFile::new_in(parent_dir)?;
    {
        let mut writer = BufWriter::new(temp_file.as_file());
        serde_json::to_writer(&mut writer, value)?;
        writer.flush()?;
    }

    temp_file.persist(path).map_err(|e| e.error)?;
    Ok(())
}
