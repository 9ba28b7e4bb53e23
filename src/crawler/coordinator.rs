//! Crawler coordinator - run orchestration
//!
//! This module drives the two operations end to end:
//! - full crawl: resolve the filtered start page, walk every page,
//!   collapse identical records, write a new dataset
//! - update: check the category against the dataset file, load it, walk
//!   until pages fall below the watermark, merge, write back
//!
//! Nothing is written unless the walk and the merge both succeed.

use crate::catalog::Dataset;
use crate::config::Config;
use crate::crawler::extractor::Extractor;
use crate::crawler::fetcher::{HttpSource, PageSource};
use crate::crawler::filter::{parse_filter_directory, FilterDirectory, SearchFilter};
use crate::crawler::pacing::{Pacer, RandomPacer};
use crate::crawler::walker::PageWalker;
use crate::output::{RunMode, RunReport};
use crate::reconcile::{ensure_same_category, merge_full_crawl, reconcile_update, Watermark};
use crate::storage::{DatasetStore, XlsxStore};
use crate::RegcatError;
use std::path::PathBuf;
use std::time::Instant;
use url::Url;

/// Parameters of an incremental update
#[derive(Debug, Clone)]
pub struct UpdateRequest {
    /// Category whose dataset is being updated
    pub category: String,

    /// Existing dataset file
    pub dataset_path: PathBuf,

    /// Where to write the result; the dataset file itself when `None`
    pub save_path: Option<PathBuf>,
}

/// Main run coordinator
pub struct Coordinator<S: PageSource, P: Pacer, D: DatasetStore> {
    config: Config,
    extractor: Extractor,
    source: S,
    pacer: P,
    store: D,
}

impl Coordinator<HttpSource, RandomPacer, XlsxStore> {
    /// Creates a coordinator talking to the configured site over HTTP
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Successfully created coordinator
    /// * `Err(RegcatError)` - The markup or HTTP client could not be set up
    pub fn from_config(config: Config) -> Result<Self, RegcatError> {
        let source = HttpSource::from_config(&config.fetch)?;
        let pacer = RandomPacer::between_pages(&config.crawler);
        let store = XlsxStore::new(&config.site.sheet_name);
        Self::new(config, source, pacer, store)
    }
}

impl<S: PageSource, P: Pacer, D: DatasetStore> Coordinator<S, P, D> {
    pub fn new(config: Config, source: S, pacer: P, store: D) -> Result<Self, RegcatError> {
        let extractor = Extractor::new(&config.markup)?;
        Ok(Self {
            config,
            extractor,
            source,
            pacer,
            store,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Crawls every page of a filtered search into a new dataset
    ///
    /// # Arguments
    ///
    /// * `filter` - Category, region and year to search for
    /// * `destination` - Output file; `<category><region>-<year>.xlsx` when `None`
    pub async fn crawl_all(
        &mut self,
        filter: &SearchFilter,
        destination: Option<PathBuf>,
    ) -> Result<RunReport, RegcatError> {
        let started = Instant::now();
        let destination = destination
            .unwrap_or_else(|| PathBuf::from(filter.file_name(&self.config.site.all_years_label)));

        let start = self.start_url(filter).await?;
        tracing::info!("Starting full crawl at {}", start);

        let outcome = self.walker().walk(start).await?;
        let records_fetched = outcome.records.len();
        let dataset = merge_full_crawl(outcome.records);
        let records_written = dataset.len();

        tracing::info!(
            "Writing {} records to {}",
            records_written,
            destination.display()
        );
        self.store.save(dataset, &destination)?;

        Ok(RunReport {
            mode: RunMode::FullCrawl,
            pages_visited: outcome.pages,
            stop_reason: outcome.stop,
            records_fetched,
            records_written,
            records_added: records_written as i64,
            watermark: None,
            destination,
            elapsed: started.elapsed(),
        })
    }

    /// Brings an existing dataset up to date with newly published records
    ///
    /// Refuses to run, before touching any file or page, when the category
    /// is not part of the dataset's file name.
    pub async fn update(&mut self, request: &UpdateRequest) -> Result<RunReport, RegcatError> {
        let started = Instant::now();
        ensure_same_category(&request.category, &request.dataset_path)?;

        let existing: Dataset = self.store.load(&request.dataset_path)?;
        let watermark = Watermark::of(&existing);
        match &watermark {
            Some(w) => tracing::info!(
                "Dataset {} holds {} records, watermark {}",
                request.dataset_path.display(),
                existing.len(),
                w
            ),
            None => tracing::warn!(
                "Dataset {} has no dated records; walking every page",
                request.dataset_path.display()
            ),
        }

        let filter = SearchFilter::category_only(&request.category);
        let start = self.start_url(&filter).await?;
        tracing::info!("Starting update at {}", start);

        let outcome = {
            let watermark = watermark.clone();
            self.walker()
                .walk_until(start, move |page| {
                    watermark.as_ref().is_some_and(|w| w.page_is_stale(page))
                })
                .await?
        };

        let reconciliation = reconcile_update(&existing, &outcome.records);
        let records_written = reconciliation.dataset.len();
        tracing::info!(
            "{} new records, {} boundary records refreshed",
            reconciliation.added,
            reconciliation.superseded
        );

        let destination = request
            .save_path
            .clone()
            .unwrap_or_else(|| request.dataset_path.clone());
        self.store.save(reconciliation.dataset, &destination)?;

        Ok(RunReport {
            mode: RunMode::Update,
            pages_visited: outcome.pages,
            stop_reason: outcome.stop,
            records_fetched: outcome.records.len(),
            records_written,
            records_added: reconciliation.added,
            watermark: watermark.map(|w| w.date().to_string()),
            destination,
            elapsed: started.elapsed(),
        })
    }

    /// First listing page for a filter
    ///
    /// The search page doubles as the filter directory; it is only fetched
    /// when the filter has names to translate. Unlisted names fail here,
    /// before any listing page is walked.
    async fn start_url(&mut self, filter: &SearchFilter) -> Result<Url, RegcatError> {
        let search_url = Url::parse(&self.config.site.search_url)?;

        let directory = if filter.needs_directory() {
            let html = self.source.fetch(&search_url).await?;
            let directory = parse_filter_directory(&html, &self.config.markup)?;
            tracing::debug!(
                "Filter directory lists {} categories and {} regions",
                directory.categories.len(),
                directory.regions.len()
            );
            directory
        } else {
            FilterDirectory::default()
        };

        filter.start_url(&search_url, &directory)
    }

    fn walker(&mut self) -> PageWalker<'_, S, P> {
        PageWalker::new(
            &mut self.source,
            &mut self.pacer,
            &self.extractor,
            self.config.crawler.max_pages,
        )
    }
}
