//! Integration tests for the crawler
//!
//! These tests use wiremock to stand in for both the dictionary index and the
//! verification site, and run the full crawl over real HTTP.

use noun_harvest::config::Config;
use noun_harvest::crawler::{Coordinator, HttpFetcher, NounVerifier, Selectors};
use noun_harvest::output::load_words;
use noun_harvest::trie::build_trie_file;
use std::sync::Arc;
use tempfile::TempDir;
use wiremock::matchers::{method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointing both sites at the mock server
fn create_test_config(base_url: &str, alphabet: &str, words_path: &str) -> Config {
    let mut config = Config::default();
    config.source.index_url_template = format!("{}/index/{{letter}}", base_url);
    config.source.alphabet = alphabet.to_string();
    config.verifier.base_url = format!("{}/", base_url);
    config.verifier.backoff_ms = 10;
    config.output.words_path = words_path.to_string();
    config
}

fn html(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(format!("<html><body>{}</body></html>", body))
        .insert_header("content-type", "text/html; charset=utf-8")
}

fn content(inner: &str) -> ResponseTemplate {
    html(&format!(
        r#"<div class="mw-content-ltr mw-parser-output">{}</div>"#,
        inner
    ))
}

async fn mount_search(server: &MockServer, word: &str, entry_path: &str) {
    Mock::given(method("GET"))
        .and(path("/poisk"))
        .and(query_param("query", word))
        .respond_with(html(&format!(
            r#"<div class="snippets"><a class="title" href="{}">{}</a></div>"#,
            entry_path, word
        )))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_crawl_single_noun() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    // Root index: one sub-index link and one direct word entry
    Mock::given(method("GET"))
        .and(path_regex("^/index/"))
        .respond_with(content(
            r#"<p><a href="/sub/tt">тт</a></p>
               <ul><li><a href="/wiki/test">тест</a></li></ul>"#,
        ))
        .mount(&mock_server)
        .await;

    // Sub-index holds only a letter article
    Mock::given(method("GET"))
        .and(path("/sub/tt"))
        .respond_with(content(r#"<ul><li><a href="/wiki/letter">Т</a></li></ul>"#))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/wiki/letter"))
        .respond_with(content("<p>Т, т — девятнадцатая буква кириллицы.</p>"))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/wiki/test"))
        .respond_with(content("<p>Морфологические и синтаксические свойства</p>"))
        .mount(&mock_server)
        .await;

    mount_search(&mock_server, "тест", "/slovari/test").await;
    Mock::given(method("GET"))
        .and(path("/slovari/test"))
        .respond_with(html(r#"<div class="gram">Существительное, мужской род</div>"#))
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().expect("Failed to create temp dir");
    let words_path = dir.path().join("ru.json");
    let config = create_test_config(&base_url, "т", words_path.to_str().unwrap());

    let coordinator = Coordinator::new(config).expect("Failed to create coordinator");
    let outcome = coordinator.run().await.expect("Crawl failed");

    assert_eq!(outcome.words.to_vec(), vec!["тест".to_string()]);
    assert!(outcome.failed_units.is_empty());
    assert_eq!(outcome.reports[0].index_pages, 2);
    assert_eq!(outcome.reports[0].candidates, 2);

    // The persisted list feeds the trie builder
    assert_eq!(load_words(&words_path), vec!["тест".to_string()]);
    let trie_path = dir.path().join("ru_trie.json");
    let trie = build_trie_file(&words_path, &trie_path).expect("Failed to build trie");
    assert!(trie.contains("тест"));
    assert_eq!(trie.word_count(), 1);
}

#[tokio::test]
async fn test_verifier_retries_unavailable_entry() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_search(&mock_server, "дом", "/slovari/dom").await;

    Mock::given(method("GET"))
        .and(path("/slovari/dom"))
        .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
        .up_to_n_times(2)
        .expect(2)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/slovari/dom"))
        .respond_with(html(r#"<div class="gram">существительное</div>"#))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&base_url, "д", "unused.json");
    let fetcher = HttpFetcher::from_config(&config.http).expect("Failed to build fetcher");
    let verifier = NounVerifier::new(
        Arc::new(fetcher),
        Selectors::new(&config.source.content_selector).unwrap(),
        &config.verifier,
        &config.markers.noun,
    )
    .expect("Failed to build verifier");

    let check = verifier.check("дом").await.expect("Check failed");
    assert!(check.is_noun);
    assert_eq!(check.retries, 2);
}

#[tokio::test]
async fn test_unknown_word_is_not_a_noun() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/poisk"))
        .respond_with(html("<p>По запросу ничего не найдено</p>"))
        .mount(&mock_server)
        .await;

    let config = create_test_config(&base_url, "д", "unused.json");
    let fetcher = HttpFetcher::from_config(&config.http).unwrap();
    let verifier = NounVerifier::new(
        Arc::new(fetcher),
        Selectors::new(&config.source.content_selector).unwrap(),
        &config.verifier,
        &config.markers.noun,
    )
    .unwrap();

    assert!(!verifier.is_noun("абвгд").await.unwrap());
}

#[tokio::test]
async fn test_missing_index_pages_give_empty_list() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    // Nothing mounted: every request is a 404 without a content area

    let dir = TempDir::new().unwrap();
    let words_path = dir.path().join("ru.json");
    let config = create_test_config(&base_url, "аб", words_path.to_str().unwrap());

    let coordinator = Coordinator::new(config).unwrap();
    let outcome = coordinator.run().await.unwrap();

    assert!(outcome.words.is_empty());
    assert!(outcome.failed_units.is_empty());
    assert_eq!(outcome.reports.len(), 2);
    assert!(words_path.exists());
    assert!(load_words(&words_path).is_empty());
}

#[tokio::test]
async fn test_fatal_verification_stops_only_its_letter() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    // Letter А links "кот", letter Б links "бег"; paths are percent-encoded
    Mock::given(method("GET"))
        .and(path_regex("^/index/%D0%90$"))
        .respond_with(content(r#"<ul><li><a href="/wiki/kot">кот</a></li></ul>"#))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path_regex("^/index/%D0%91$"))
        .respond_with(content(r#"<ul><li><a href="/wiki/beg">бег</a></li></ul>"#))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path_regex("^/wiki/"))
        .respond_with(content("<p>статья</p>"))
        .mount(&mock_server)
        .await;

    mount_search(&mock_server, "кот", "/slovari/kot").await;
    Mock::given(method("GET"))
        .and(path("/slovari/kot"))
        .respond_with(html(r#"<div class="gram">существительное</div>"#))
        .mount(&mock_server)
        .await;

    mount_search(&mock_server, "бег", "/slovari/beg").await;
    Mock::given(method("GET"))
        .and(path("/slovari/beg"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let words_path = dir.path().join("ru.json");
    let config = create_test_config(&base_url, "аб", words_path.to_str().unwrap());

    let outcome = Coordinator::new(config).unwrap().run().await.unwrap();

    assert_eq!(outcome.words.to_vec(), vec!["кот".to_string()]);
    assert_eq!(outcome.failed_units.len(), 1);
    assert_eq!(outcome.failed_units[0].0.letter(), 'б');
    assert_eq!(load_words(&words_path), vec!["кот".to_string()]);
}
