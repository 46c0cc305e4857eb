//! Prefix tree over the harvested words
//!
//! The trie is the autocomplete index built from a word list in a separate
//! run. Only plain lowercase words go in; anything else is skipped quietly so
//! a hand-edited or foreign word list never aborts the build.

use crate::output::{load_words, write_json_atomic};
use crate::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// One node of the prefix tree; the root has no character of its own
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrieNode {
    /// A word ends at this node
    pub complete: bool,
    pub children: BTreeMap<char, TrieNode>,
}

impl TrieNode {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a word; words that are not plain lowercase are ignored
    ///
    /// Returns true if the word was accepted.
    pub fn insert(&mut self, word: &str) -> bool {
        if !is_trie_word(word) {
            return false;
        }

        let mut node = self;
        for c in word.chars() {
            node = node.children.entry(c).or_default();
        }
        node.complete = true;
        true
    }

    /// Node reached by following `prefix` from this node
    pub fn find(&self, prefix: &str) -> Option<&TrieNode> {
        let mut node = self;
        for c in prefix.chars() {
            node = node.children.get(&c)?;
        }
        Some(node)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.find(word).map(|node| node.complete).unwrap_or(false)
    }

    /// Number of complete words at or below this node
    pub fn word_count(&self) -> usize {
        usize::from(self.complete)
            + self
                .children
                .values()
                .map(TrieNode::word_count)
                .sum::<usize>()
    }

    /// All words starting with `prefix`, in lexicographic order
    pub fn words_with_prefix(&self, prefix: &str) -> Vec<String> {
        let mut words = Vec::new();
        if let Some(node) = self.find(prefix) {
            let mut current = prefix.to_string();
            node.collect_words(&mut current, &mut words);
        }
        words
    }

    fn collect_words(&self, current: &mut String, out: &mut Vec<String>) {
        if self.complete {
            out.push(current.clone());
        }
        for (c, child) in &self.children {
            current.push(*c);
            child.collect_words(current, out);
            current.pop();
        }
    }
}

/// True for non-empty words made only of letters, with no uppercase letter
/// and at least one lowercase letter
pub fn is_trie_word(word: &str) -> bool {
    !word.is_empty()
        && word.chars().all(|c| c.is_alphabetic() && !c.is_uppercase())
        && word.chars().any(char::is_lowercase)
}

/// Builds a trie from `words`, skipping the ones [`is_trie_word`] rejects
pub fn build_trie<I, S>(words: I) -> TrieNode
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut root = TrieNode::new();
    let mut skipped = 0usize;
    for word in words {
        if !root.insert(word.as_ref()) {
            skipped += 1;
        }
    }
    if skipped > 0 {
        tracing::debug!(skipped, "skipped words that are not plain lowercase");
    }
    root
}

/// Loads a word list, builds its trie, and writes the trie as JSON
///
/// An unusable word list produces an empty trie rather than an error.
pub fn build_trie_file(input: &Path, output: &Path) -> Result<TrieNode> {
    let words = load_words(input);
    let trie = build_trie(&words);
    write_json_atomic(output, &trie)?;
    tracing::info!(
        input = %input.display(),
        output = %output.display(),
        words = trie.word_count(),
        "trie written"
    );
    Ok(trie)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    /// Every complete word in the trie
    fn members(trie: &TrieNode) -> Vec<String> {
        trie.words_with_prefix("")
    }

    #[test]
    fn test_single_word() {
        for word in ["a", "cat", "тест", "ёж"] {
            let trie = build_trie([word]);
            assert!(trie.contains(word));
            assert_eq!(members(&trie), vec![word.to_string()]);
            assert_eq!(trie.word_count(), 1);
        }
    }

    #[test]
    fn test_prefixes_are_not_words() {
        let trie = build_trie(["cat"]);
        assert!(!trie.complete);
        assert!(!trie.contains("c"));
        assert!(!trie.contains("ca"));
        assert!(trie.find("ca").is_some());
    }

    #[test]
    fn test_malformed_words_skipped() {
        let trie = build_trie(["cat", "Dog", "a1", "", "dog"]);
        assert_eq!(members(&trie), vec!["cat".to_string(), "dog".to_string()]);
    }

    #[test]
    fn test_is_trie_word() {
        assert!(is_trie_word("дом"));
        assert!(!is_trie_word(""));
        assert!(!is_trie_word("Дом"));
        assert!(!is_trie_word("кое-что"));
        assert!(!is_trie_word("два слова"));
        assert!(!is_trie_word("漢字"));
    }

    #[test]
    fn test_word_and_its_extension() {
        let trie = build_trie(["car", "cart", "car"]);
        assert!(trie.contains("car"));
        assert!(trie.contains("cart"));
        assert_eq!(trie.word_count(), 2);
        assert_eq!(trie.words_with_prefix("car"), vec!["car", "cart"]);
        assert!(trie.words_with_prefix("dog").is_empty());
    }

    #[test]
    fn test_json_shape() {
        let trie = build_trie(["ab"]);
        let value = serde_json::to_value(&trie).unwrap();
        assert_eq!(value["complete"], false);
        assert_eq!(value["children"]["a"]["complete"], false);
        assert_eq!(value["children"]["a"]["children"]["b"]["complete"], true);
    }

    #[test]
    fn test_build_trie_file() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("ru.json");
        let output = dir.path().join("ru_trie.json");
        std::fs::write(&input, r#"{"words": ["кот", "Кит", "кит"]}"#).unwrap();

        let trie = build_trie_file(&input, &output).unwrap();
        assert_eq!(members(&trie), vec!["кит".to_string(), "кот".to_string()]);
        assert!(output.exists());
    }

    #[test]
    fn test_build_trie_file_with_bad_input() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("trie.json");

        let trie = build_trie_file(&dir.path().join("missing.json"), &output).unwrap();
        assert_eq!(trie, TrieNode::new());
        assert_eq!(
            std::fs::read_to_string(&output).unwrap(),
            r#"{"complete":false,"children":{}}"#
        );
    }
}
