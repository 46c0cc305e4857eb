//! Markup rules that reject a candidate without a network round-trip

use crate::config::MarkerConfig;
use crate::crawler::parser::WordPage;
use std::fmt;

/// Log tag for a candidate whose page could not be fetched or parsed
pub const MISSING_PAGE_TAG: &str = "SKIP NONE";

/// Outcome of classifying and verifying one candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Verdict {
    /// Passed every rule and was confirmed a noun
    Accept,
    /// The page describes a letter of the alphabet
    RejectLetterEntry,
    /// The page describes a proper name
    RejectProperName,
    RejectHasSpace,
    RejectHasHyphen,
    /// The verification source does not list the word as a noun
    RejectNotNoun,
}

impl Verdict {
    /// Short tag carried by the log event for this verdict
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Accept => "FOUND WORD",
            Self::RejectLetterEntry => "SKIP LETTER",
            Self::RejectProperName => "SKIP NAME",
            Self::RejectHasSpace => "SKIP WORD WITH SPACE",
            Self::RejectHasHyphen => "SKIP WORD WITH SIGNS",
            Self::RejectNotNoun => "SKIP NOT NOUN",
        }
    }

    pub fn is_accept(&self) -> bool {
        matches!(self, Self::Accept)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

type Rule = fn(&str, &WordPage, &MarkerConfig) -> bool;

/// Rejection rules, in evaluation order
const RULES: [(Verdict, Rule); 4] = [
    (Verdict::RejectLetterEntry, is_letter_entry),
    (Verdict::RejectProperName, is_proper_name),
    (Verdict::RejectHasSpace, has_space),
    (Verdict::RejectHasHyphen, has_hyphen),
];

fn any_paragraph_contains(page: &WordPage, marker: &str) -> bool {
    page.paragraphs
        .iter()
        .any(|text| text.to_lowercase().contains(marker))
}

fn is_letter_entry(_word: &str, page: &WordPage, markers: &MarkerConfig) -> bool {
    any_paragraph_contains(page, &markers.letter_entry)
}

fn is_proper_name(_word: &str, page: &WordPage, markers: &MarkerConfig) -> bool {
    any_paragraph_contains(page, &markers.proper_name)
}

fn has_space(word: &str, _page: &WordPage, _markers: &MarkerConfig) -> bool {
    word.contains(' ')
}

fn has_hyphen(word: &str, _page: &WordPage, _markers: &MarkerConfig) -> bool {
    word.contains('-')
}

/// Every rejection that applies to the candidate, in rule order
pub fn classify_rejects(word: &str, page: &WordPage, markers: &MarkerConfig) -> Vec<Verdict> {
    RULES
        .iter()
        .filter(|(_, rule)| rule(word, page, markers))
        .map(|(verdict, _)| *verdict)
        .collect()
}

/// The first rejection that applies, stopping at the first match
pub fn first_rejection(word: &str, page: &WordPage, markers: &MarkerConfig) -> Option<Verdict> {
    RULES
        .iter()
        .find(|(_, rule)| rule(word, page, markers))
        .map(|(verdict, _)| *verdict)
}
