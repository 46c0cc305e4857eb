//! Noun confirmation against the secondary dictionary
//!
//! A check searches the dictionary for the word and walks the result entries
//! until one lists the word as a noun. An entry page without its grammar
//! block is either a temporary outage (HTTP 503), which restarts the whole
//! check after a fixed delay, or an inconsistency that aborts the crawl unit.
//!
//! # Retry Logic
//!
//! | Condition | Action |
//! |-----------|--------|
//! | No results container | Not a noun |
//! | Grammar block mentions the noun marker | Noun, stop |
//! | No grammar block, HTTP 503 | Sleep `backoff`, restart check |
//! | Retries exhausted | `RetriesExhausted` |
//! | No grammar block, other status | `MissingGrammar` |

use crate::config::VerifierConfig;
use crate::crawler::fetcher::Fetcher;
use crate::crawler::parser::{parse_grammar, parse_search_results, resolve_link, Selectors};
use crate::{HarvestError, Result};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Result of a completed noun check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NounCheck {
    pub is_noun: bool,
    /// Number of 503 restarts before the check completed
    pub retries: u32,
}

/// Outcome of a single pass over the search results
enum Attempt {
    Done(bool),
    Unavailable { url: String },
}

/// Confirms candidate words against the verification site
pub struct NounVerifier {
    fetcher: Arc<dyn Fetcher>,
    selectors: Selectors,
    base_url: Url,
    noun_marker: String,
    max_retries: u32,
    backoff: Duration,
}

impl NounVerifier {
    pub fn new(
        fetcher: Arc<dyn Fetcher>,
        selectors: Selectors,
        config: &VerifierConfig,
        noun_marker: &str,
    ) -> Result<Self> {
        Ok(Self {
            fetcher,
            selectors,
            base_url: Url::parse(&config.base_url)?,
            noun_marker: noun_marker.to_lowercase(),
            max_retries: config.max_retries,
            backoff: Duration::from_millis(config.backoff_ms),
        })
    }

    /// Search page URL for `word`
    pub fn search_url(&self, word: &str) -> Result<Url> {
        let mut url = self.base_url.join("poisk")?;
        url.query_pairs_mut()
            .append_pair("query", word)
            .append_pair("mode", "slovari")
            .append_pair("simple", "1");
        Ok(url)
    }

    /// Returns true if the verification site lists `word` as a noun
    pub async fn is_noun(&self, word: &str) -> Result<bool> {
        Ok(self.check(word).await?.is_noun)
    }

    /// Runs the full check, restarting it after every 503 until it completes
    /// or `max_retries` restarts have been spent
    pub async fn check(&self, word: &str) -> Result<NounCheck> {
        let mut retries = 0;
        loop {
            match self.attempt(word).await? {
                Attempt::Done(is_noun) => return Ok(NounCheck { is_noun, retries }),
                Attempt::Unavailable { url } => {
                    if retries >= self.max_retries {
                        return Err(HarvestError::RetriesExhausted {
                            word: word.to_string(),
                            url,
                            attempts: retries + 1,
                        });
                    }
                    retries += 1;
                    tracing::info!(
                        tag = "RETRY",
                        word,
                        url = %url,
                        retry = retries,
                        "verification source unavailable, backing off"
                    );
                    tokio::time::sleep(self.backoff).await;
                }
            }
        }
    }

    async fn attempt(&self, word: &str) -> Result<Attempt> {
        let search_url = self.search_url(word)?;
        tracing::info!(tag = "SEARCH", url = %search_url);

        let search = self.fetcher.fetch(search_url.as_str()).await?;
        let results = match parse_search_results(&search.body, &self.selectors) {
            Some(results) => results,
            None => return Ok(Attempt::Done(false)),
        };

        for href in results {
            let entry_url = match resolve_link(&href, &self.base_url) {
                Some(url) => url,
                None => {
                    tracing::debug!(href = %href, word, "skipping unusable result link");
                    continue;
                }
            };

            let entry = self.fetcher.fetch(entry_url.as_str()).await?;
            match parse_grammar(&entry.body, &self.selectors) {
                Some(text) => {
                    if text.to_lowercase().contains(&self.noun_marker) {
                        return Ok(Attempt::Done(true));
                    }
                }
                None if entry.is_unavailable() => {
                    return Ok(Attempt::Unavailable {
                        url: entry_url.to_string(),
                    });
                }
                None => {
                    return Err(HarvestError::MissingGrammar {
                        status: entry.status_code,
                        url: entry_url.to_string(),
                        word: word.to_string(),
                    });
                }
            }
        }

        Ok(Attempt::Done(false))
    }
}
