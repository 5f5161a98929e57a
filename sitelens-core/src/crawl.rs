use crate::compare::{ComparisonResult, compare};
use crate::dataset::SiteDataset;
use crate::error::Result;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use serde::Serialize;
use sitelens_scanner::{
    ContentAnalyzer, CrawlConfig, CrawlLog, Crawler, PageDriver, ProgressCallback,
};
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::time::Duration;
use tracing::info;

/// Options for a single-site crawl
#[derive(Debug, Clone)]
pub struct CrawlOptions {
    pub url: String,
    pub config: CrawlConfig,
    pub timeout_secs: u64,
    pub show_progress_bars: bool,
}

/// Options for crawling and comparing two sites
#[derive(Debug, Clone)]
pub struct CompareOptions {
    pub first_url: String,
    pub second_url: String,
    pub config: CrawlConfig,
    pub timeout_secs: u64,
    pub show_progress_bars: bool,
}

/// A finished crawl together with its aggregated view.
#[derive(Debug, Clone)]
pub struct CrawlOutcome {
    pub log: CrawlLog,
    pub dataset: SiteDataset,
}

impl CrawlOutcome {
    pub fn from_log(log: CrawlLog) -> Self {
        let dataset = SiteDataset::from_log(&log);
        Self { log, dataset }
    }
}

/// Both sides of a comparison. Only the datasets and the result go into
/// `comparison_data.json`; the raw logs are written separately.
#[derive(Debug, Clone, Serialize)]
pub struct SiteComparison {
    pub website1: SiteDataset,
    pub website2: SiteDataset,
    pub comparison: ComparisonResult,
    #[serde(skip)]
    pub website1_logs: CrawlLog,
    #[serde(skip)]
    pub website2_logs: CrawlLog,
}

impl SiteComparison {
    pub fn new(first: CrawlOutcome, second: CrawlOutcome) -> Self {
        let comparison = compare(&first.dataset, &second.dataset);
        Self {
            website1: first.dataset,
            website2: second.dataset,
            comparison,
            website1_logs: first.log,
            website2_logs: second.log,
        }
    }
}

fn spinner(label: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .template("{spinner:.cyan} {prefix:.bold} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    pb.set_style(style);
    pb.set_prefix(label.to_string());
    pb.set_message("Starting crawl...");
    pb.enable_steady_tick(Duration::from_millis(120));
    pb
}

fn spinner_callback(pb: &ProgressBar) -> ProgressCallback {
    let pb = pb.clone();
    Arc::new(move |loaded: usize, url: &str| {
        pb.set_message(format!("{} pages loaded, exploring {}", loaded, url));
    })
}

/// Runs one crawl to completion and aggregates it.
pub async fn crawl_site<D, A>(crawler: &mut Crawler<D, A>, seed: &str) -> Result<CrawlOutcome>
where
    D: PageDriver,
    A: ContentAnalyzer,
{
    let log = crawler.crawl(seed).await?;
    Ok(CrawlOutcome::from_log(log))
}

/// Crawls two sites concurrently on the current task and compares them.
pub async fn compare_sites<D1, A1, D2, A2>(
    first: &mut Crawler<D1, A1>,
    first_url: &str,
    second: &mut Crawler<D2, A2>,
    second_url: &str,
) -> Result<SiteComparison>
where
    D1: PageDriver,
    A1: ContentAnalyzer,
    D2: PageDriver,
    A2: ContentAnalyzer,
{
    let (first, second) = futures::try_join!(
        crawl_site(first, first_url),
        crawl_site(second, second_url)
    )?;
    Ok(SiteComparison::new(first, second))
}

/// Execute a single-site crawl with the given options
pub async fn execute_crawl(
    options: CrawlOptions,
    cancel: Option<Arc<AtomicBool>>,
) -> Result<CrawlOutcome> {
    let CrawlOptions {
        url,
        config,
        timeout_secs,
        show_progress_bars,
    } = options;

    let mut crawler = Crawler::with_timeout(timeout_secs)?.with_config(config);
    if let Some(flag) = cancel {
        crawler = crawler.with_cancel_flag(flag);
    }

    let progress_bar = show_progress_bars.then(|| spinner("crawl"));
    if let Some(pb) = &progress_bar {
        crawler = crawler.with_progress_callback(spinner_callback(pb));
    }

    let outcome = crawl_site(&mut crawler, &url).await;

    if let Some(pb) = &progress_bar {
        match &outcome {
            Ok(o) => pb.finish_with_message(format!(
                "Crawl complete! {} pages loaded, {} actions recorded",
                o.log.pages_loaded,
                o.log.records.len()
            )),
            Err(e) => pb.abandon_with_message(format!("Crawl failed: {}", e)),
        }
    }

    outcome
}

/// Crawl both sites with the same budgets and compare them
pub async fn execute_comparison(
    options: CompareOptions,
    cancel: Option<Arc<AtomicBool>>,
) -> Result<SiteComparison> {
    let CompareOptions {
        first_url,
        second_url,
        config,
        timeout_secs,
        show_progress_bars,
    } = options;

    info!("Comparing {} with {}", first_url, second_url);

    let mut first = Crawler::with_timeout(timeout_secs)?.with_config(config.clone());
    let mut second = Crawler::with_timeout(timeout_secs)?.with_config(config);
    if let Some(flag) = cancel {
        first = first.with_cancel_flag(flag.clone());
        second = second.with_cancel_flag(flag);
    }

    let bars = show_progress_bars.then(|| {
        let multi = MultiProgress::new();
        let first_pb = multi.add(spinner("website 1"));
        let second_pb = multi.add(spinner("website 2"));
        (multi, first_pb, second_pb)
    });
    if let Some((_, first_pb, second_pb)) = &bars {
        first = first.with_progress_callback(spinner_callback(first_pb));
        second = second.with_progress_callback(spinner_callback(second_pb));
    }

    let result = compare_sites(&mut first, &first_url, &mut second, &second_url).await;

    if let Some((_, first_pb, second_pb)) = &bars {
        match &result {
            Ok(r) => {
                first_pb.finish_with_message(format!(
                    "{} pages loaded",
                    r.website1_logs.pages_loaded
                ));
                second_pb.finish_with_message(format!(
                    "{} pages loaded",
                    r.website2_logs.pages_loaded
                ));
            }
            Err(e) => {
                first_pb.abandon_with_message(format!("Comparison failed: {}", e));
                second_pb.abandon();
            }
        }
    }

    result
}
