//! Depth-first walk over a letter's index tree
//!
//! An index page holds two kinds of links in its content area: paragraph
//! links whose text is a two-letter token lead to nested sub-indices, and
//! list-item links lead to word articles. Sub-indices are expanded before the
//! word entries of the page that links them, so candidates come out in the
//! same order a recursive walk would produce. The walk is driven by an
//! explicit stack of frames and is pulled one candidate at a time.

use crate::crawler::context::CrawlContext;
use crate::crawler::parser::{parse_index_page, parse_word_page, resolve_link, Link, WordPage};
use std::collections::{HashSet, VecDeque};
use url::Url;

/// A word and its article, pending classification
#[derive(Debug, Clone)]
pub struct Candidate {
    /// Lowercased link text
    pub word: String,
    /// Article URL, if the link could be resolved
    pub url: Option<String>,
    /// Parsed article; `None` if it could not be fetched or has no content area
    pub page: Option<WordPage>,
}

/// Pending work for one opened index page
struct Frame {
    url: Url,
    sub_indices: VecDeque<Url>,
    entries: VecDeque<Link>,
}

/// Pull-based iterator over the candidates below one root index page
pub struct Traverser<'a> {
    ctx: &'a CrawlContext,
    root: Option<String>,
    stack: Vec<Frame>,
    visited: HashSet<String>,
    pages_opened: u64,
}

impl<'a> Traverser<'a> {
    pub fn new(ctx: &'a CrawlContext, root_url: impl Into<String>) -> Self {
        Self {
            ctx,
            root: Some(root_url.into()),
            stack: Vec::new(),
            visited: HashSet::new(),
            pages_opened: 0,
        }
    }

    /// Number of index pages fetched and parsed so far
    pub fn pages_opened(&self) -> u64 {
        self.pages_opened
    }

    /// Returns the next candidate, or `None` once the tree is exhausted
    pub async fn next_candidate(&mut self) -> Option<Candidate> {
        let ctx = self.ctx;

        if let Some(root) = self.root.take() {
            if let Some(frame) = self.open_index(&root).await {
                self.stack.push(frame);
            }
        }

        loop {
            let frame = self.stack.last_mut()?;

            if let Some(sub_index) = frame.sub_indices.pop_front() {
                if let Some(child) = self.open_index(sub_index.as_str()).await {
                    self.stack.push(child);
                }
                continue;
            }

            if let Some(link) = frame.entries.pop_front() {
                let base = frame.url.clone();
                return Some(fetch_candidate(ctx, &base, link).await);
            }

            self.stack.pop();
        }
    }

    /// Drains the traverser into a vector
    pub async fn collect_all(mut self) -> Vec<Candidate> {
        let mut candidates = Vec::new();
        while let Some(candidate) = self.next_candidate().await {
            candidates.push(candidate);
        }
        candidates
    }

    /// Fetches and parses an index page into a new frame
    async fn open_index(&mut self, url: &str) -> Option<Frame> {
        if !self.visited.insert(url.to_string()) {
            tracing::debug!(url, "index page already expanded, skipping");
            return None;
        }

        let ctx = self.ctx;
        let fetched = match ctx.fetcher.fetch(url).await {
            Ok(page) => page,
            Err(e) => {
                tracing::info!(tag = "SKIP INDEX", url, error = %e, "index page fetch failed");
                return None;
            }
        };

        let index = match parse_index_page(&fetched.body, &ctx.selectors) {
            Some(index) => index,
            None => {
                tracing::info!(
                    tag = "SKIP INDEX",
                    url,
                    status = fetched.status_code,
                    "index page has no content area"
                );
                return None;
            }
        };

        let page_url = match Url::parse(&fetched.url).or_else(|_| Url::parse(url)) {
            Ok(page_url) => page_url,
            Err(e) => {
                tracing::info!(tag = "SKIP INDEX", url, error = %e, "index page URL unusable");
                return None;
            }
        };

        self.pages_opened += 1;

        let mut expanded = HashSet::new();
        let mut sub_indices = VecDeque::new();
        for link in &index.paragraph_links {
            if !ctx.alphabet.is_pair_token(&link.text) || !expanded.insert(link.text.as_str()) {
                continue;
            }
            match resolve_link(&link.href, &page_url) {
                Some(target) => sub_indices.push_back(target),
                None => tracing::debug!(href = %link.href, "unusable sub-index link"),
            }
        }

        tracing::debug!(
            url,
            sub_indices = sub_indices.len(),
            entries = index.item_links.len(),
            "opened index page"
        );

        Some(Frame {
            url: page_url,
            sub_indices,
            entries: index.item_links.into_iter().collect(),
        })
    }
}

/// Fetches the article behind a word entry
async fn fetch_candidate(ctx: &CrawlContext, base: &Url, link: Link) -> Candidate {
    let word = link.text.to_lowercase();

    let target = match resolve_link(&link.href, base) {
        Some(target) => target,
        None => {
            return Candidate {
                word,
                url: None,
                page: None,
            }
        }
    };

    let page = match ctx.fetcher.fetch(target.as_str()).await {
        Ok(fetched) => parse_word_page(&fetched.body, &ctx.selectors),
        Err(e) => {
            tracing::debug!(url = %target, error = %e, "word page fetch failed");
            None
        }
    };

    Candidate {
        word,
        url: Some(target.to_string()),
        page,
    }
}
