//! Per-letter crawl: traverse, classify, verify, collect

use crate::alphabet::AlphabetUnit;
use crate::crawler::classifier::{first_rejection, Verdict, MISSING_PAGE_TAG};
use crate::crawler::context::CrawlContext;
use crate::crawler::traverser::Traverser;
use crate::output::{UnitReport, WordSet};
use crate::Result;

/// Crawls one letter's index tree and inserts every confirmed noun into `words`
///
/// Words are only ever added. A verification error ends the unit and is
/// returned; words accepted before it stay in the set.
pub async fn crawl_unit(
    ctx: &CrawlContext,
    unit: &AlphabetUnit,
    words: &WordSet,
) -> Result<UnitReport> {
    let root_url = ctx.index_url(unit);
    tracing::info!(letter = %unit, url = %root_url, "starting letter crawl");

    let mut report = UnitReport::new(unit.clone());
    let mut traverser = Traverser::new(ctx, root_url);

    while let Some(candidate) = traverser.next_candidate().await {
        report.candidates += 1;
        let word = candidate.word;

        let page = match candidate.page {
            Some(page) => page,
            None => {
                report.missing_pages += 1;
                tracing::info!(
                    tag = MISSING_PAGE_TAG,
                    word = %word,
                    url = candidate.url.as_deref().unwrap_or("-")
                );
                continue;
            }
        };

        if let Some(rejection) = first_rejection(&word, &page, &ctx.markers) {
            report.record(rejection);
            tracing::info!(tag = rejection.tag(), word = %word);
            continue;
        }

        if !ctx.verifier.is_noun(&word).await? {
            report.record(Verdict::RejectNotNoun);
            tracing::info!(tag = Verdict::RejectNotNoun.tag(), word = %word);
            continue;
        }

        words.insert(word.as_str());
        report.record(Verdict::Accept);
        tracing::info!(tag = Verdict::Accept.tag(), word = %word);
    }

    report.index_pages = traverser.pages_opened();
    tracing::info!(
        letter = %unit,
        candidates = report.candidates,
        accepted = report.accepted(),
        "letter crawl finished"
    );

    Ok(report)
}
