//! Record extraction from listing pages
//!
//! A listing page holds a results container with one block per document and
//! a pagination control. Each block yields a [`CatalogRecord`]:
//! - title and link come from the block's first anchor
//! - issuing body, document number and issue date come from the block's
//!   metadata text, e.g. `发文单位：财政部文号：财税〔2018〕32号发文日期：2018-04-04`
//!
//! The metadata clauses are matched in order (body, number, date) and only
//! the date clause is mandatory. When the text does not match, the three
//! fields are left empty and the record is kept.
//!
//! The next page is the pager anchor whose text equals the configured label.
//! Whitespace around the anchor text is ignored, since the site pads its
//! pager markup; anything else must match exactly. Numbered page anchors are
//! never followed, whatever their position.

use crate::catalog::{CatalogRecord, IssueDate};
use crate::config::MarkupConfig;
use crate::ConfigError;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Records and pagination found on one listing page
#[derive(Debug, Clone, Default)]
pub struct ExtractedPage {
    pub records: Vec<CatalogRecord>,

    /// Absolute location of the next page; `None` on the last page
    pub next: Option<Url>,
}

/// Metadata parsed from a record block
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Metadata {
    issuing_org: String,
    doc_number: String,
    issue_date: IssueDate,
}

/// Compiled selectors and patterns for one site's listing markup
#[derive(Debug, Clone)]
pub struct Extractor {
    results: Selector,
    item: Selector,
    anchor: Selector,
    meta: Selector,
    pager: Selector,
    meta_pattern: Regex,
    next_label: String,
}

impl Extractor {
    /// Compiles the markup description
    ///
    /// # Returns
    ///
    /// * `Ok(Extractor)` - All selectors compiled
    /// * `Err(ConfigError)` - A selector or clause label is unusable
    pub fn new(markup: &MarkupConfig) -> Result<Self, ConfigError> {
        let pattern = format!(
            "(?s)({}.+?)?({}.+?)?({}.+)",
            regex::escape(&markup.org_label),
            regex::escape(&markup.number_label),
            regex::escape(&markup.date_label)
        );
        let meta_pattern = Regex::new(&pattern)
            .map_err(|e| ConfigError::Validation(format!("Invalid metadata labels: {}", e)))?;

        Ok(Self {
            results: compile(&markup.results_selector)?,
            item: compile(&markup.item_selector)?,
            anchor: compile("a[href]")?,
            meta: compile(&markup.meta_selector)?,
            pager: compile(&markup.pager_selector)?,
            meta_pattern,
            next_label: markup.next_label.trim().to_string(),
        })
    }

    /// Extracts records and the next-page locator from a listing page
    ///
    /// Relative links are resolved against `page_url`. The function has no
    /// side effects beyond logging.
    pub fn extract(&self, html: &str, page_url: &Url) -> ExtractedPage {
        let document = Html::parse_document(html);

        let records = match document.select(&self.results).next() {
            Some(container) => container
                .select(&self.item)
                .filter_map(|item| self.extract_record(item, page_url))
                .collect(),
            None => {
                tracing::warn!("No results container on {}", page_url);
                Vec::new()
            }
        };

        ExtractedPage {
            records,
            next: self.find_next(&document, page_url),
        }
    }

    fn extract_record(&self, item: ElementRef<'_>, page_url: &Url) -> Option<CatalogRecord> {
        let anchor = item.select(&self.anchor).next()?;

        let href = anchor.value().attr("href")?.trim();
        if href.is_empty() {
            return None;
        }
        let link = match page_url.join(href) {
            Ok(link) => link,
            Err(e) => {
                tracing::warn!("Skipping record with bad link '{}': {}", href, e);
                return None;
            }
        };

        let title = anchor
            .value()
            .attr("title")
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| stripped_text(anchor));
        if title.is_empty() {
            tracing::warn!("Skipping untitled record linking to {}", link);
            return None;
        }

        let meta_text = item.select(&self.meta).next().map(stripped_text);
        let metadata = match meta_text.as_deref().and_then(|text| self.parse_metadata(text)) {
            Some(metadata) => metadata,
            None => {
                tracing::debug!(
                    "Metadata for '{}' did not parse ({:?}); leaving it empty",
                    title,
                    meta_text
                );
                Metadata::default()
            }
        };

        Some(CatalogRecord {
            title,
            issuing_org: metadata.issuing_org,
            doc_number: metadata.doc_number,
            issue_date: metadata.issue_date,
            link: link.to_string(),
        })
    }

    /// Splits the metadata text into its three clauses
    ///
    /// Any clause present without a `label：value` shape invalidates the
    /// whole block.
    fn parse_metadata(&self, text: &str) -> Option<Metadata> {
        let captures = self.meta_pattern.captures(text)?;
        let clause = |index: usize| -> Option<String> {
            match captures.get(index) {
                Some(m) => clause_value(m.as_str()).map(str::to_string),
                None => Some(String::new()),
            }
        };

        Some(Metadata {
            issuing_org: clause(1)?,
            doc_number: clause(2)?,
            issue_date: IssueDate::parse(&clause(3)?),
        })
    }

    /// Finds the pager anchor labelled exactly as the next-page marker
    fn find_next(&self, document: &Html, page_url: &Url) -> Option<Url> {
        let anchor = document
            .select(&self.pager)
            .find(|a| a.text().collect::<String>().trim() == self.next_label)?;
        let href = anchor.value().attr("href")?.trim();
        if href.is_empty() {
            return None;
        }

        match page_url.join(href) {
            Ok(mut next) => {
                next.set_fragment(None);
                Some(next)
            }
            Err(e) => {
                tracing::warn!("Ignoring unusable next-page link '{}': {}", href, e);
                None
            }
        }
    }
}

fn compile(selector: &str) -> Result<Selector, ConfigError> {
    Selector::parse(selector)
        .map_err(|e| ConfigError::InvalidSelector(format!("'{}': {:?}", selector, e)))
}

/// Concatenates an element's text nodes, each trimmed, skipping blanks
fn stripped_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Value part of a `label：value` clause
fn clause_value(clause: &str) -> Option<&str> {
    clause
        .split_once(|c| c == '：' || c == ':')
        .map(|(_, value)| value.trim())
}
