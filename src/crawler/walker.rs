//! Page walker
//!
//! Follows next-page locators from a start page, extracting records from
//! every page it visits, until one of these happens:
//! - a page has no next locator
//! - the caller's stop condition holds for the page just read
//! - the page ceiling is reached
//! - a next locator points back to a page already visited
//!
//! Records of the page that triggered a stop are kept. Pages are fetched
//! strictly one after another with a pacing pause in between.

use crate::catalog::CatalogRecord;
use crate::crawler::extractor::Extractor;
use crate::crawler::fetcher::PageSource;
use crate::crawler::pacing::{self, Pacer};
use crate::RegcatError;
use std::collections::HashSet;
use std::fmt;
use url::Url;

/// Why a walk ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The last page had no next-page control
    Exhausted,
    /// The stop condition held
    Condition,
    /// The page ceiling was reached
    PageLimit,
    /// The next locator had already been visited
    Cycle,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            StopReason::Exhausted => "last page reached",
            StopReason::Condition => "reached known records",
            StopReason::PageLimit => "page limit reached",
            StopReason::Cycle => "pagination cycle detected",
        };
        f.write_str(text)
    }
}

/// Everything a walk produced
#[derive(Debug, Clone)]
pub struct WalkOutcome {
    /// Records of all visited pages in fetch order
    pub records: Vec<CatalogRecord>,
    pub pages: usize,
    pub stop: StopReason,
}

/// Walks a paginated listing
pub struct PageWalker<'a, S: PageSource, P: Pacer> {
    source: &'a mut S,
    pacer: &'a mut P,
    extractor: &'a Extractor,
    max_pages: usize,
}

impl<'a, S: PageSource, P: Pacer> PageWalker<'a, S, P> {
    pub fn new(
        source: &'a mut S,
        pacer: &'a mut P,
        extractor: &'a Extractor,
        max_pages: usize,
    ) -> Self {
        Self {
            source,
            pacer,
            extractor,
            max_pages: max_pages.max(1),
        }
    }

    /// Walks until pagination ends
    pub async fn walk(&mut self, start: Url) -> Result<WalkOutcome, RegcatError> {
        self.walk_until(start, |_| false).await
    }

    /// Walks until pagination ends or `should_stop` holds for a page
    ///
    /// `should_stop` sees the records of the page just extracted.
    ///
    /// # Returns
    ///
    /// * `Ok(WalkOutcome)` - Accumulated records and why the walk ended
    /// * `Err(RegcatError)` - A page could not be fetched; nothing is kept
    pub async fn walk_until<F>(
        &mut self,
        start: Url,
        mut should_stop: F,
    ) -> Result<WalkOutcome, RegcatError>
    where
        F: FnMut(&[CatalogRecord]) -> bool,
    {
        let mut records = Vec::new();
        let mut visited = HashSet::new();
        let mut current = start;
        let mut pages = 0;

        let stop = loop {
            let body = self.source.fetch(&current).await?;
            let page = self.extractor.extract(&body, &current);
            pages += 1;

            let halt = should_stop(&page.records);
            let page_records = page.records.len();
            records.extend(page.records);
            tracing::info!(
                "Page {}: {} records ({} total) from {}",
                pages,
                page_records,
                records.len(),
                current
            );
            visited.insert(current);

            if halt {
                break StopReason::Condition;
            }

            let Some(next) = page.next else {
                break StopReason::Exhausted;
            };

            if visited.contains(&next) {
                tracing::warn!("Next page {} was already visited; stopping", next);
                break StopReason::Cycle;
            }

            if pages >= self.max_pages {
                tracing::warn!("Stopping after {} pages (page limit)", pages);
                break StopReason::PageLimit;
            }

            pacing::wait(&mut *self.pacer).await;
            current = next;
        };

        Ok(WalkOutcome {
            records,
            pages,
            stop,
        })
    }
}
