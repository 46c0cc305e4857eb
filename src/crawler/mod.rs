//! Crawler module for harvesting nouns from a dictionary index
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching behind the `Fetcher` trait
//! - HTML parsing of index, article, and verification pages
//! - Depth-first traversal of nested index pages
//! - Markup rules and noun verification with retry
//! - Per-letter crawl tasks and their coordination

mod classifier;
mod context;
mod coordinator;
mod fetcher;
mod orchestrator;
mod parser;
mod traverser;
mod verifier;

pub use classifier::{classify_rejects, first_rejection, Verdict, MISSING_PAGE_TAG};
pub use context::CrawlContext;
pub use coordinator::{run_crawl, Coordinator, CrawlOutcome};
pub use fetcher::{build_http_client, FetchedPage, Fetcher, HttpFetcher};
pub use orchestrator::crawl_unit;
pub use parser::{
    parse_grammar, parse_index_page, parse_search_results, parse_word_page, resolve_link,
    IndexPage, Link, Selectors, WordPage,
};
pub use traverser::{Candidate, Traverser};
pub use verifier::{NounCheck, NounVerifier};
