use crate::config::types::{
    Config, HttpConfig, MarkerConfig, OutputConfig, SourceConfig, VerifierConfig,
    LETTER_PLACEHOLDER,
};
use crate::ConfigError;
use scraper::Selector;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_source_config(&config.source)?;
    validate_verifier_config(&config.verifier)?;
    validate_marker_config(&config.markers)?;
    validate_http_config(&config.http)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates the index site configuration
fn validate_source_config(config: &SourceConfig) -> Result<(), ConfigError> {
    if !config.index_url_template.contains(LETTER_PLACEHOLDER) {
        return Err(ConfigError::Validation(format!(
            "index-url-template must contain '{}', got '{}'",
            LETTER_PLACEHOLDER, config.index_url_template
        )));
    }

    let sample = config.index_url_template.replace(LETTER_PLACEHOLDER, "A");
    validate_http_url("index-url-template", &sample)?;

    Selector::parse(&config.content_selector).map_err(|e| {
        ConfigError::InvalidSelector(format!("'{}': {:?}", config.content_selector, e))
    })?;

    if config.alphabet.trim().is_empty() {
        return Err(ConfigError::Validation(
            "alphabet cannot be empty".to_string(),
        ));
    }

    if config.alphabet.chars().any(|c| c.is_uppercase()) {
        return Err(ConfigError::Validation(format!(
            "alphabet must be lowercase, got '{}'",
            config.alphabet
        )));
    }

    Ok(())
}

/// Validates the verification site configuration
fn validate_verifier_config(config: &VerifierConfig) -> Result<(), ConfigError> {
    validate_http_url("verifier base-url", &config.base_url)?;

    if config.max_retries > 100 {
        return Err(ConfigError::Validation(format!(
            "max-retries must be <= 100, got {}",
            config.max_retries
        )));
    }

    Ok(())
}

fn validate_marker_config(config: &MarkerConfig) -> Result<(), ConfigError> {
    for (name, marker) in [
        ("letter-entry", &config.letter_entry),
        ("proper-name", &config.proper_name),
        ("noun", &config.noun),
    ] {
        if marker.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "marker '{}' cannot be empty",
                name
            )));
        }
        if marker.chars().any(|c| c.is_uppercase()) {
            return Err(ConfigError::Validation(format!(
                "marker '{}' is matched against lowercased text and must be lowercase",
                name
            )));
        }
    }
    Ok(())
}

fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    if config.user_agent.is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout-secs must be >= 1, got {}",
            config.timeout_secs
        )));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.words_path.is_empty() {
        return Err(ConfigError::Validation(
            "words-path cannot be empty".to_string(),
        ));
    }

    if config.trie_path.is_empty() {
        return Err(ConfigError::Validation(
            "trie-path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Checks that `value` is an absolute http(s) URL
fn validate_http_url(field: &str, value: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {} '{}': {}", field, value, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "{} '{}' must use http or https",
            field, value
        )));
    }

    Ok(())
}
