//! Shared, read-only state for every crawl task

use crate::alphabet::{Alphabet, AlphabetUnit};
use crate::config::{Config, MarkerConfig, LETTER_PLACEHOLDER};
use crate::crawler::fetcher::Fetcher;
use crate::crawler::parser::Selectors;
use crate::crawler::verifier::NounVerifier;
use crate::Result;
use std::sync::Arc;

/// Everything a crawl unit needs besides the word set it writes to
pub struct CrawlContext {
    pub fetcher: Arc<dyn Fetcher>,
    pub selectors: Selectors,
    pub alphabet: Alphabet,
    pub markers: MarkerConfig,
    pub verifier: NounVerifier,
    index_url_template: String,
}

impl CrawlContext {
    pub fn new(config: &Config, fetcher: Arc<dyn Fetcher>) -> Result<Self> {
        let selectors = Selectors::new(&config.source.content_selector)?;
        let verifier = NounVerifier::new(
            fetcher.clone(),
            selectors.clone(),
            &config.verifier,
            &config.markers.noun,
        )?;

        Ok(Self {
            fetcher,
            selectors,
            alphabet: config.alphabet(),
            markers: config.markers.clone(),
            verifier,
            index_url_template: config.source.index_url_template.clone(),
        })
    }

    /// Root index URL for one crawl partition
    pub fn index_url(&self, unit: &AlphabetUnit) -> String {
        self.index_url_template
            .replace(LETTER_PLACEHOLDER, &unit.index_key())
    }
}
