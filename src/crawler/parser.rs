//! HTML parsing for index, word, and verification pages
//!
//! Each parse function takes a raw body and returns a small owned view of the
//! parts the crawl needs. The `scraper::Html` tree never outlives the call, so
//! the views can be held across await points inside spawned tasks.

use crate::ConfigError;
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// A link with its visible text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub href: String,
    pub text: String,
}

/// Links found in the content area of an index page
#[derive(Debug, Clone, Default)]
pub struct IndexPage {
    /// First link of every paragraph, in document order (sub-index candidates)
    pub paragraph_links: Vec<Link>,

    /// First link of every list item, in document order (word entries)
    pub item_links: Vec<Link>,
}

/// Text of a word article's content area
#[derive(Debug, Clone, Default)]
pub struct WordPage {
    /// Text of every paragraph in the article body
    pub paragraphs: Vec<String>,
}

/// Compiled selectors shared by every parse call
#[derive(Debug, Clone)]
pub struct Selectors {
    content: Selector,
    paragraph: Selector,
    list_item: Selector,
    link: Selector,
    snippets: Selector,
    result_link: Selector,
    grammar: Selector,
}

impl Selectors {
    /// Compiles the selectors; only the content area selector is configurable
    pub fn new(content_selector: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            content: compile(content_selector)?,
            paragraph: compile("p")?,
            list_item: compile("li")?,
            link: compile("a")?,
            snippets: compile("div.snippets")?,
            result_link: compile("a.title")?,
            grammar: compile("div.gram")?,
        })
    }
}

fn compile(selector: &str) -> Result<Selector, ConfigError> {
    Selector::parse(selector)
        .map_err(|e| ConfigError::InvalidSelector(format!("'{}': {:?}", selector, e)))
}

fn element_text(element: &ElementRef<'_>) -> String {
    element.text().collect::<String>()
}

/// First link inside `element`, if it has one with an href
fn first_link(element: &ElementRef<'_>, selectors: &Selectors) -> Option<Link> {
    let anchor = element.select(&selectors.link).next()?;
    let href = anchor.value().attr("href")?;
    Some(Link {
        href: href.to_string(),
        text: element_text(&anchor).trim().to_string(),
    })
}

/// Parses an index page
///
/// Returns `None` when the page has no content area (missing or error page).
pub fn parse_index_page(html: &str, selectors: &Selectors) -> Option<IndexPage> {
    let document = Html::parse_document(html);
    let content = document.select(&selectors.content).next()?;

    let paragraph_links = content
        .select(&selectors.paragraph)
        .filter_map(|p| first_link(&p, selectors))
        .collect();

    let item_links = content
        .select(&selectors.list_item)
        .filter_map(|li| first_link(&li, selectors))
        .collect();

    Some(IndexPage {
        paragraph_links,
        item_links,
    })
}

/// Parses a word article
///
/// Returns `None` when the page has no content area.
pub fn parse_word_page(html: &str, selectors: &Selectors) -> Option<WordPage> {
    let document = Html::parse_document(html);
    let content = document.select(&selectors.content).next()?;

    let paragraphs = content
        .select(&selectors.paragraph)
        .map(|p| element_text(&p))
        .collect();

    Some(WordPage { paragraphs })
}

/// Extracts result link hrefs from a verification search page
///
/// `None` means the page has no results container at all; `Some(vec![])` is
/// a container without result links.
pub fn parse_search_results(html: &str, selectors: &Selectors) -> Option<Vec<String>> {
    let document = Html::parse_document(html);
    let snippets = document.select(&selectors.snippets).next()?;

    Some(
        snippets
            .select(&selectors.result_link)
            .filter_map(|a| a.value().attr("href"))
            .map(str::to_string)
            .collect(),
    )
}

/// Text of the grammatical-category block of a verification entry page
pub fn parse_grammar(html: &str, selectors: &Selectors) -> Option<String> {
    let document = Html::parse_document(html);
    document
        .select(&selectors.grammar)
        .next()
        .map(|element| element_text(&element))
}

/// Resolves a link href against the page it was found on
///
/// Returns None for empty, fragment-only, and non-HTTP(S) links.
pub fn resolve_link(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    match base_url.join(href) {
        Ok(absolute_url) => {
            if absolute_url.scheme() == "http" || absolute_url.scheme() == "https" {
                Some(absolute_url)
            } else {
                None
            }
        }
        Err(_) => None,
    }
}
