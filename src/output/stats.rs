//! Crawl statistics
//!
//! Each letter crawl returns a [`UnitReport`]; the coordinator folds them into
//! a [`CrawlStatistics`] summary that is logged at the end of the run.

use crate::alphabet::AlphabetUnit;
use crate::crawler::Verdict;
use std::collections::BTreeMap;

/// Counters for one letter crawl
#[derive(Debug, Clone)]
pub struct UnitReport {
    pub unit: AlphabetUnit,

    /// Word entries pulled from the index tree
    pub candidates: u64,

    /// Candidates whose article could not be fetched or parsed
    pub missing_pages: u64,

    /// Index pages opened, including the root
    pub index_pages: u64,

    verdicts: BTreeMap<Verdict, u64>,
}

impl UnitReport {
    pub fn new(unit: AlphabetUnit) -> Self {
        Self {
            unit,
            candidates: 0,
            missing_pages: 0,
            index_pages: 0,
            verdicts: BTreeMap::new(),
        }
    }

    pub fn record(&mut self, verdict: Verdict) {
        *self.verdicts.entry(verdict).or_insert(0) += 1;
    }

    pub fn count(&self, verdict: Verdict) -> u64 {
        self.verdicts.get(&verdict).copied().unwrap_or(0)
    }

    pub fn accepted(&self) -> u64 {
        self.count(Verdict::Accept)
    }
}

/// Whole-run summary
#[derive(Debug, Clone, Default)]
pub struct CrawlStatistics {
    pub units_completed: usize,
    pub units_failed: usize,
    pub candidates: u64,
    pub missing_pages: u64,
    pub index_pages: u64,
    pub verdicts: BTreeMap<Verdict, u64>,

    /// Distinct words in the final set; lower than the accepted count when
    /// several letters found the same word
    pub unique_words: usize,
}

impl CrawlStatistics {
    pub fn from_reports(reports: &[UnitReport], units_failed: usize, unique_words: usize) -> Self {
        let mut stats = Self {
            units_completed: reports.len(),
            units_failed,
            unique_words,
            ..Self::default()
        };

        for report in reports {
            stats.candidates += report.candidates;
            stats.missing_pages += report.missing_pages;
            stats.index_pages += report.index_pages;
            for (verdict, count) in &report.verdicts {
                *stats.verdicts.entry(*verdict).or_insert(0) += count;
            }
        }

        stats
    }

    /// Share of classified candidates that were accepted, as a percentage
    pub fn acceptance_rate(&self) -> f64 {
        let classified: u64 = self.verdicts.values().sum();
        if classified == 0 {
            return 0.0;
        }
        let accepted = self.verdicts.get(&Verdict::Accept).copied().unwrap_or(0);
        (accepted as f64 / classified as f64) * 100.0
    }

    /// Logs the summary, one event per verdict
    pub fn log(&self) {
        tracing::info!(
            units_completed = self.units_completed,
            units_failed = self.units_failed,
            index_pages = self.index_pages,
            candidates = self.candidates,
            missing_pages = self.missing_pages,
            unique_words = self.unique_words,
            "crawl summary (acceptance {:.1}%)",
            self.acceptance_rate()
        );
        for (verdict, count) in &self.verdicts {
            tracing::info!(tag = verdict.tag(), count, "verdict total");
        }
    }
}
