use serde::Deserialize;

use crate::alphabet::{Alphabet, AlphabetUnit, CYRILLIC_ALPHABET};

/// Placeholder replaced by the uppercase letter in `index-url-template`
pub const LETTER_PLACEHOLDER: &str = "{letter}";

/// Main configuration structure for Noun-Harvest
///
/// Every section is optional; missing sections fall back to the built-in
/// Russian Wiktionary / gramota.ru setup.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub source: SourceConfig,
    pub verifier: VerifierConfig,
    pub markers: MarkerConfig,
    pub http: HttpConfig,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Parsed alphabet built from `source.alphabet`
    pub fn alphabet(&self) -> Alphabet {
        Alphabet::new(&self.source.alphabet)
    }

    /// Root index URL for one crawl partition
    pub fn index_url(&self, unit: &AlphabetUnit) -> String {
        self.source
            .index_url_template
            .replace(LETTER_PLACEHOLDER, &unit.index_key())
    }
}

/// Dictionary index site configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Root index URL per letter; `{letter}` is replaced by the uppercase letter
    #[serde(rename = "index-url-template")]
    pub index_url_template: String,

    /// CSS selector of the article body on index and word pages
    #[serde(rename = "content-selector")]
    pub content_selector: String,

    /// Letters to partition the crawl by
    pub alphabet: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            index_url_template: "https://ru.wiktionary.org/wiki/Индекс:Русский_язык/{letter}"
                .to_string(),
            content_selector: "div.mw-content-ltr.mw-parser-output".to_string(),
            alphabet: CYRILLIC_ALPHABET.to_string(),
        }
    }
}

/// Secondary dictionary used to confirm nouns
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct VerifierConfig {
    /// Base URL of the verification site; search and result links resolve against it
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Retries after a 503 before the check is abandoned
    #[serde(rename = "max-retries")]
    pub max_retries: u32,

    /// Delay before each retry (milliseconds)
    #[serde(rename = "backoff-ms")]
    pub backoff_ms: u64,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            base_url: "https://gramota.ru/".to_string(),
            max_retries: 5,
            backoff_ms: 5_000,
        }
    }
}

/// Marker phrases searched for in lowercased page text
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MarkerConfig {
    #[serde(rename = "letter-entry")]
    pub letter_entry: String,

    #[serde(rename = "proper-name")]
    pub proper_name: String,

    pub noun: String,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            letter_entry: "буква кириллицы".to_string(),
            proper_name: "имя собственное".to_string(),
            noun: "существительное".to_string(),
        }
    }
}

/// HTTP client configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Whole-request timeout (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: format!("NounHarvest/{}", env!("CARGO_PKG_VERSION")),
            timeout_secs: 30,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// JSON file receiving the accepted words
    #[serde(rename = "words-path")]
    pub words_path: String,

    /// JSON file receiving the prefix tree
    #[serde(rename = "trie-path")]
    pub trie_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            words_path: "ru.json".to_string(),
            trie_path: "ru_trie.json".to_string(),
        }
    }
}

/// Logging configuration; CLI verbosity flags take precedence over `level`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `"noun_harvest=debug"`
    pub level: Option<String>,

    /// Extra log file written next to stdout
    pub file: Option<String>,
}
