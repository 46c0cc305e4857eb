//! Alphabet partitioning for the crawl
//!
//! Each letter of the source alphabet is one crawl partition. Ordered letter
//! pairs double as the link texts that mark nested sub-index pages.

use std::collections::HashSet;
use std::fmt;

/// Lowercase Russian alphabet, including `ё`
pub const CYRILLIC_ALPHABET: &str = "абвгдеёжзийклмнопрстуфхцчшщъыьэюя";

/// One letter of the source alphabet
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AlphabetUnit(char);

impl AlphabetUnit {
    pub fn new(letter: char) -> Self {
        Self(letter)
    }

    pub fn letter(&self) -> char {
        self.0
    }

    /// Uppercase form used as the key of the unit's root index page
    pub fn index_key(&self) -> String {
        self.0.to_uppercase().collect()
    }
}

impl fmt::Display for AlphabetUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The full set of crawl partitions plus the derived sub-index tokens
#[derive(Debug, Clone)]
pub struct Alphabet {
    units: Vec<AlphabetUnit>,
    pair_tokens: HashSet<String>,
}

impl Alphabet {
    /// Builds an alphabet from its letters, in order, dropping duplicates
    pub fn new(letters: &str) -> Self {
        let mut units: Vec<AlphabetUnit> = Vec::new();
        for c in letters.chars().filter(|c| !c.is_whitespace()) {
            let unit = AlphabetUnit::new(c);
            if !units.contains(&unit) {
                units.push(unit);
            }
        }

        let pair_tokens = units
            .iter()
            .flat_map(|first| {
                units
                    .iter()
                    .map(move |second| format!("{}{}", first.letter(), second.letter()))
            })
            .collect();

        Self { units, pair_tokens }
    }

    pub fn cyrillic() -> Self {
        Self::new(CYRILLIC_ALPHABET)
    }

    pub fn units(&self) -> &[AlphabetUnit] {
        &self.units
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Returns true if `text` is exactly one of the two-letter sub-index tokens
    pub fn is_pair_token(&self, text: &str) -> bool {
        self.pair_tokens.contains(text)
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::cyrillic()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cyrillic_has_33_letters() {
        let alphabet = Alphabet::cyrillic();
        assert_eq!(alphabet.len(), 33);
        assert_eq!(alphabet.units()[0].letter(), 'а');
        assert_eq!(alphabet.units()[6].letter(), 'ё');
    }

    #[test]
    fn test_pair_tokens() {
        let alphabet = Alphabet::cyrillic();
        assert!(alphabet.is_pair_token("аб"));
        assert!(alphabet.is_pair_token("яя"));
        assert!(!alphabet.is_pair_token("а"));
        assert!(!alphabet.is_pair_token("абв"));
        assert!(!alphabet.is_pair_token("Аб"));
    }

    #[test]
    fn test_index_key_is_uppercase() {
        assert_eq!(AlphabetUnit::new('ё').index_key(), "Ё");
        assert_eq!(AlphabetUnit::new('т').index_key(), "Т");
    }

    #[test]
    fn test_duplicates_and_whitespace_dropped() {
        let alphabet = Alphabet::new("ab a c");
        assert_eq!(alphabet.len(), 3);
        assert!(alphabet.is_pair_token("ca"));
    }
}
