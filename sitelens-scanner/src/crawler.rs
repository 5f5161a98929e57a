use crate::analyzer::{ContentAnalyzer, HtmlAnalyzer};
use crate::config::CrawlConfig;
use crate::error::{Result, ScanError};
use crate::explorer::Explorer;
use crate::http_page::HttpPage;
use crate::page::PageDriver;
use crate::record::CrawlLog;
use crate::session::{CrawlSession, RecordCallback};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info};
use url::Url;

/// Called with the number of pages loaded so far and the URL about to be explored.
pub type ProgressCallback = Arc<dyn Fn(usize, &str) + Send + Sync>;

pub struct Crawler<D, A> {
    driver: D,
    analyzer: A,
    config: CrawlConfig,
    progress_callback: Option<ProgressCallback>,
    record_callback: Option<RecordCallback>,
    cancel: Option<Arc<AtomicBool>>,
}

impl Crawler<HttpPage, HtmlAnalyzer> {
    pub fn new() -> Result<Self> {
        Self::with_timeout(10)
    }

    /// HTTP-backed crawler. Fails if the HTTP client cannot be built.
    pub fn with_timeout(timeout_secs: u64) -> Result<Self> {
        Ok(Self::with_driver(
            HttpPage::new(timeout_secs)?,
            HtmlAnalyzer::new(),
        ))
    }
}

impl<D, A> Crawler<D, A>
where
    D: PageDriver,
    A: ContentAnalyzer,
{
    pub fn with_driver(driver: D, analyzer: A) -> Self {
        Self {
            driver,
            analyzer,
            config: CrawlConfig::default(),
            progress_callback: None,
            record_callback: None,
            cancel: None,
        }
    }

    pub fn with_config(mut self, config: CrawlConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.config.max_depth = depth;
        self
    }

    pub fn with_max_pages(mut self, pages: usize) -> Self {
        self.config.max_pages = pages;
        self
    }

    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    pub fn with_record_callback(mut self, callback: RecordCallback) -> Self {
        self.record_callback = Some(callback);
        self
    }

    /// Shared flag checked before each target is dequeued.
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Crawls from `seed` until the frontier drains, the page budget is spent or the
    /// cancel flag is raised. Per-target failures end up in the log. An invalid seed or
    /// configuration, or a page driver that cannot start, is returned as an error.
    pub async fn crawl(&mut self, seed: &str) -> Result<CrawlLog> {
        self.config.validate()?;
        let seed = Url::parse(seed)
            .map_err(|e| ScanError::InvalidUrl(format!("{}: {}", seed, e)))?
            .to_string();

        info!(
            "Starting crawl of {} (max depth {}, max pages {})",
            seed, self.config.max_depth, self.config.max_pages
        );

        let mut session = CrawlSession::new(seed, self.config.clone())
            .with_record_callback(self.record_callback.clone());
        let mut explorer = Explorer::new(&mut self.driver, &self.analyzer, self.config.delay);
        let mut cancelled = false;

        loop {
            if is_raised(&self.cancel) {
                info!("Crawl cancelled");
                cancelled = true;
                break;
            }
            if session.budget_exhausted() {
                debug!("Page budget of {} reached", session.config.max_pages);
                break;
            }
            let Some(target) = session.frontier.next_eligible(&session.dedup) else {
                break;
            };
            session.dedup.mark_visited(&target.url);

            if let Some(callback) = &self.progress_callback {
                callback(session.pages_loaded, &target.url);
            }

            if explorer.explore(&mut session, &target).await? {
                session.pages_loaded += 1;
            }
        }

        let log = session.finish(cancelled);
        info!(
            "Crawl complete. Loaded {} pages, {} records, {} targets left unvisited",
            log.pages_loaded,
            log.records.len(),
            log.discarded_targets
        );
        Ok(log)
    }
}

fn is_raised(flag: &Option<Arc<AtomicBool>>) -> bool {
    flag.as_ref().is_some_and(|f| f.load(Ordering::Relaxed))
}
