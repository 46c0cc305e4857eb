//! The accepted-word set and its JSON file
//!
//! The crawl writes `{"words": [...], "count": N, "generated_at": ...}`. The
//! loader is lenient: it also takes a bare array, ignores extra keys, and
//! turns any unreadable input into an empty list with a warning.

use crate::output::write_json_atomic;
use crate::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};

/// Shared set of accepted words
///
/// Clones share the same underlying set, so one handle can be given to every
/// crawl task. Inserting a word that is already present is a no-op.
#[derive(Debug, Clone, Default)]
pub struct WordSet {
    inner: Arc<Mutex<BTreeSet<String>>>,
}

impl WordSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a word; returns false if it was already present
    pub fn insert(&self, word: impl Into<String>) -> bool {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(word.into())
    }

    pub fn contains(&self, word: &str) -> bool {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(word)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of the words in lexicographic order
    pub fn to_vec(&self) -> Vec<String> {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .cloned()
            .collect()
    }
}

/// On-disk shape written by [`save_words`]
#[derive(Debug, Serialize)]
struct WordsFile<'a> {
    words: &'a [String],
    count: usize,
    generated_at: DateTime<Utc>,
}

/// Shapes accepted by [`load_words`]
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WordsInput {
    List(Vec<String>),
    Object { words: Vec<String> },
}

impl WordsInput {
    fn into_words(self) -> Vec<String> {
        match self {
            Self::List(words) | Self::Object { words } => words,
        }
    }
}

/// Writes the word set to `path` as UTF-8 JSON
pub fn save_words(path: &Path, words: &WordSet) -> Result<()> {
    let words = words.to_vec();
    let file = WordsFile {
        words: &words,
        count: words.len(),
        generated_at: Utc::now(),
    };
    write_json_atomic(path, &file)?;
    tracing::info!(path = %path.display(), count = words.len(), "saved word list");
    Ok(())
}

/// Loads a word list, returning an empty list if the file is unusable
pub fn load_words(path: &Path) -> Vec<String> {
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    if !is_json {
        tracing::warn!(path = %path.display(), "word list must be a .json file");
        return Vec::new();
    }

    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "failed to read word list");
            return Vec::new();
        }
    };

    match serde_json::from_str::<WordsInput>(&content) {
        Ok(input) => {
            let words = input.into_words();
            tracing::info!(path = %path.display(), count = words.len(), "loaded word list");
            words
        }
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "word list must be a JSON array of strings or an object with a 'words' array"
            );
            Vec::new()
        }
    }
}
