//! Crawler coordinator - runs every letter crawl concurrently
//!
//! The coordinator owns the shared context and the word set. It spawns one
//! task per letter, waits for all of them, and writes the words to disk.
//! A failed letter is logged and left as is; the other letters and the words
//! already collected are unaffected.

use crate::alphabet::AlphabetUnit;
use crate::config::Config;
use crate::crawler::context::CrawlContext;
use crate::crawler::fetcher::{Fetcher, HttpFetcher};
use crate::crawler::orchestrator::crawl_unit;
use crate::output::{save_words, CrawlStatistics, UnitReport, WordSet};
use crate::Result;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinSet;

/// What a finished crawl produced
#[derive(Debug, Clone)]
pub struct CrawlOutcome {
    pub words: WordSet,
    pub reports: Vec<UnitReport>,
    /// Letters whose crawl ended with an error, with the error message
    pub failed_units: Vec<(AlphabetUnit, String)>,
    pub statistics: CrawlStatistics,
}

/// Main crawler coordinator structure
pub struct Coordinator {
    ctx: Arc<CrawlContext>,
    units: Vec<AlphabetUnit>,
    words_path: PathBuf,
}

impl Coordinator {
    /// Creates a coordinator that fetches over HTTP
    pub fn new(config: Config) -> Result<Self> {
        let fetcher = HttpFetcher::from_config(&config.http)?;
        Self::with_fetcher(config, Arc::new(fetcher))
    }

    /// Creates a coordinator on top of any page source
    pub fn with_fetcher(config: Config, fetcher: Arc<dyn Fetcher>) -> Result<Self> {
        let ctx = CrawlContext::new(&config, fetcher)?;
        let units = ctx.alphabet.units().to_vec();

        Ok(Self {
            ctx: Arc::new(ctx),
            units,
            words_path: PathBuf::from(&config.output.words_path),
        })
    }

    /// Crawls every letter concurrently without writing anything to disk
    pub async fn crawl(&self) -> CrawlOutcome {
        let words = WordSet::new();
        let start_time = Instant::now();

        tracing::info!(letters = self.units.len(), "starting crawl");

        let mut tasks = JoinSet::new();
        for unit in &self.units {
            let ctx = Arc::clone(&self.ctx);
            let words = words.clone();
            let unit = unit.clone();
            tasks.spawn(async move {
                let result = crawl_unit(&ctx, &unit, &words).await;
                (unit, result)
            });
        }

        let mut reports = Vec::new();
        let mut failed_units = Vec::new();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((_, Ok(report))) => reports.push(report),
                Ok((unit, Err(e))) => {
                    tracing::error!(tag = "FATAL", letter = %unit, error = %e, "letter crawl aborted");
                    failed_units.push((unit, e.to_string()));
                }
                Err(e) => {
                    tracing::error!(tag = "FATAL", error = %e, "letter crawl task panicked");
                }
            }
        }

        reports.sort_by(|a, b| a.unit.cmp(&b.unit));
        failed_units.sort_by(|a, b| a.0.cmp(&b.0));

        let statistics = CrawlStatistics::from_reports(
            &reports,
            self.units.len() - reports.len(),
            words.len(),
        );

        tracing::info!(
            "Crawl completed: {} words from {} letters in {:?}",
            words.len(),
            reports.len(),
            start_time.elapsed()
        );
        statistics.log();

        CrawlOutcome {
            words,
            reports,
            failed_units,
            statistics,
        }
    }

    /// Crawls every letter and writes the accepted words to the configured path
    pub async fn run(&self) -> Result<CrawlOutcome> {
        let outcome = self.crawl().await;
        save_words(&self.words_path, &outcome.words)?;
        Ok(outcome)
    }
}

/// Runs a complete crawl with the given configuration
///
/// # Example
///
/// ```no_run
/// use noun_harvest::config::Config;
/// use noun_harvest::crawler::run_crawl;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let outcome = run_crawl(Config::default()).await?;
/// println!("{} nouns", outcome.words.len());
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(config: Config) -> Result<CrawlOutcome> {
    let coordinator = Coordinator::new(config)?;
    coordinator.run().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawler::verifier::tests::ScriptedFetcher;
    use tempfile::TempDir;

    const NOUN_ENTRY: &str = r#"<div class="gram">существительное</div>"#;

    fn create_test_config(words_path: &str) -> Config {
        let mut config = Config::default();
        config.source.index_url_template = "https://dict.example/index/{letter}".to_string();
        config.source.content_selector = "div.content".to_string();
        config.source.alphabet = "ab".to_string();
        config.verifier.base_url = "https://verify.example/".to_string();
        config.output.words_path = words_path.to_string();
        config
    }

    fn script_shared_word(fetcher: &ScriptedFetcher) {
        let index = r#"<div class="content"><ul><li><a href="/wiki/shared">shared</a></li></ul></div>"#;
        fetcher.respond("https://dict.example/index/A", 200, index);
        fetcher.respond("https://dict.example/index/B", 200, index);
        fetcher.respond(
            "https://dict.example/wiki/shared",
            200,
            r#"<div class="content"><p>plain</p></div>"#,
        );
        fetcher.respond(
            "https://verify.example/poisk?query=shared&mode=slovari&simple=1",
            200,
            r#"<div class="snippets"><a class="title" href="/entry/shared">shared</a></div>"#,
        );
        fetcher.respond("https://verify.example/entry/shared", 200, NOUN_ENTRY);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_same_word_from_two_letters_stored_once() {
        for _ in 0..20 {
            let fetcher = Arc::new(ScriptedFetcher::default());
            script_shared_word(&fetcher);

            let coordinator =
                Coordinator::with_fetcher(create_test_config("unused.json"), fetcher).unwrap();
            let outcome = coordinator.crawl().await;

            assert_eq!(outcome.words.to_vec(), vec!["shared".to_string()]);
            assert_eq!(outcome.reports.len(), 2);
            assert!(outcome.reports.iter().all(|r| r.accepted() == 1));
            assert_eq!(outcome.statistics.unique_words, 1);
        }
    }

    #[tokio::test]
    async fn test_failed_letter_does_not_stop_others() {
        let fetcher = Arc::new(ScriptedFetcher::default());
        fetcher.respond(
            "https://dict.example/index/A",
            200,
            r#"<div class="content"><ul><li><a href="/wiki/good">good</a></li></ul></div>"#,
        );
        fetcher.respond(
            "https://dict.example/index/B",
            200,
            r#"<div class="content"><ul><li><a href="/wiki/bad">bad</a></li></ul></div>"#,
        );
        for word in ["good", "bad"] {
            fetcher.respond(
                &format!("https://dict.example/wiki/{}", word),
                200,
                r#"<div class="content"><p>plain</p></div>"#,
            );
            fetcher.respond(
                &format!(
                    "https://verify.example/poisk?query={}&mode=slovari&simple=1",
                    word
                ),
                200,
                &format!(
                    r#"<div class="snippets"><a class="title" href="/entry/{}">x</a></div>"#,
                    word
                ),
            );
        }
        fetcher.respond("https://verify.example/entry/good", 200, NOUN_ENTRY);
        fetcher.respond("https://verify.example/entry/bad", 500, "error");

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("words.json");
        let coordinator = Coordinator::with_fetcher(
            create_test_config(path.to_str().unwrap()),
            fetcher,
        )
        .unwrap();
        let outcome = coordinator.run().await.unwrap();

        assert_eq!(outcome.words.to_vec(), vec!["good".to_string()]);
        assert_eq!(outcome.failed_units.len(), 1);
        assert_eq!(outcome.failed_units[0].0, AlphabetUnit::new('b'));
        assert!(outcome.failed_units[0].1.contains("500"));
        assert_eq!(outcome.statistics.units_failed, 1);
        assert_eq!(crate::output::load_words(&path), vec!["good".to_string()]);
    }
}
