//! Per-target exploration: load, analyze, discover links, then sweep interactive
//! controls and classify what each activation did.

use crate::analyzer::ContentAnalyzer;
use crate::content::PageData;
use crate::error::{Result, ScanError};
use crate::model::{CrawlTarget, ElementSignature};
use crate::page::{Lookup, PageDriver};
use crate::record::VisitRecord;
use crate::session::CrawlSession;
use crate::urls::{domain_of, is_same_domain, resolve_link};
use std::time::Duration;
use tracing::{debug, info, warn};

/// What activating one control turned out to do.
#[derive(Debug)]
pub enum InteractionOutcome {
    Navigated { from: String, to: String },
    Mutated { url: String },
    Failed(ScanError),
    NotFound(String),
}

/// Compares the page URL before and after an activation.
pub fn classify(before: &str, after: &str) -> InteractionOutcome {
    if before == after {
        InteractionOutcome::Mutated {
            url: after.to_string(),
        }
    } else {
        InteractionOutcome::Navigated {
            from: before.to_string(),
            to: after.to_string(),
        }
    }
}

pub struct Explorer<'a, D, A> {
    driver: &'a mut D,
    analyzer: &'a A,
    delay: Duration,
}

impl<'a, D, A> Explorer<'a, D, A>
where
    D: PageDriver,
    A: ContentAnalyzer,
{
    pub fn new(driver: &'a mut D, analyzer: &'a A, delay: Duration) -> Self {
        Self {
            driver,
            analyzer,
            delay,
        }
    }

    /// Runs one target to completion. Returns whether the page loaded.
    /// Errors that are not scoped to this target abort the crawl.
    pub async fn explore(
        &mut self,
        session: &mut CrawlSession,
        target: &CrawlTarget,
    ) -> Result<bool> {
        debug!("Loading {} (depth {})", target.url, target.depth);

        let content = match self.driver.load(&target.url).await {
            Ok(content) => content,
            Err(e) if !e.is_recoverable() => return Err(e),
            Err(e) => {
                warn!("Failed to load {}: {}", target.url, e);
                session.record(VisitRecord::load_failed(&target.url, target.depth, e));
                return Ok(false);
            }
        };
        self.pause().await;

        match self.analyze(&content) {
            Ok(data) => session.record(VisitRecord::loaded(&target.url, target.depth, data)),
            Err(e) => {
                warn!("Analysis of {} failed: {}", target.url, e);
                session.record(VisitRecord::analysis_failed(
                    &target.url,
                    target.depth,
                    None,
                    e,
                ));
            }
        }

        self.discover_links(session, target).await;
        self.sweep(session, target).await;
        Ok(true)
    }

    fn analyze(&self, content: &str) -> Result<PageData> {
        self.analyzer.analyze(content).map(PageData::normalized)
    }

    async fn analyze_current(&mut self) -> Result<PageData> {
        let content = self.driver.content().await?;
        self.analyze(&content)
    }

    async fn pause(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }

    async fn discover_links(&mut self, session: &mut CrawlSession, target: &CrawlTarget) {
        if !session.frontier.accepts_child_of(target.depth) {
            debug!("{} is at the depth limit; not following links", target.url);
            return;
        }

        let hrefs = match self.driver.links().await {
            Ok(hrefs) => hrefs,
            Err(e) => {
                warn!("Could not read links on {}: {}", target.url, e);
                return;
            }
        };

        let base = self.driver.current_url();
        let domain = domain_of(&target.url);
        let mut queued = 0;

        for href in hrefs {
            let Some(link) = resolve_link(&base, &href) else {
                continue;
            };
            if !is_same_domain(&domain, &link) {
                debug!("Skipping off-domain link {}", link);
                continue;
            }
            if session.dedup.is_visited(&link) {
                continue;
            }
            session
                .frontier
                .enqueue(CrawlTarget::new(link, target.depth + 1));
            queued += 1;
        }

        debug!("Queued {} links from {}", queued, target.url);
    }

    async fn sweep(&mut self, session: &mut CrawlSession, target: &CrawlTarget) {
        let controls = match self.driver.interactive_elements().await {
            Ok(controls) => controls,
            Err(e) => {
                warn!("Could not enumerate controls on {}: {}", target.url, e);
                return;
            }
        };
        debug!("{} interactive elements on {}", controls.len(), target.url);

        for signature in controls {
            if !session.dedup.mark_signature_visited(&signature) {
                continue;
            }

            let before = self.driver.current_url();
            let outcome = self.interact(&signature, &before).await;
            self.apply(session, target, signature, before, outcome).await;
        }
    }

    async fn interact(&mut self, signature: &ElementSignature, before: &str) -> InteractionOutcome {
        let handle = match self.driver.find_element(signature).await {
            Ok(Lookup::Found(handle)) => handle,
            Ok(Lookup::NotFound) => {
                return InteractionOutcome::NotFound(format!("no element matches {}", signature));
            }
            Err(e) => return InteractionOutcome::NotFound(e.to_string()),
        };

        if let Err(e) = self.driver.activate(&handle).await {
            return InteractionOutcome::Failed(e);
        }
        self.pause().await;

        classify(before, &self.driver.current_url())
    }

    async fn apply(
        &mut self,
        session: &mut CrawlSession,
        target: &CrawlTarget,
        signature: ElementSignature,
        before: String,
        outcome: InteractionOutcome,
    ) {
        let depth = target.depth;

        match outcome {
            InteractionOutcome::NotFound(reason) => {
                debug!("{} not found on {}: {}", signature, before, reason);
                session.record(VisitRecord::not_found(before, depth, signature, reason));
            }
            InteractionOutcome::Failed(e) => {
                warn!("Activating {} on {} failed: {}", signature, before, e);
                session.record(VisitRecord::interaction_failed(before, depth, signature, e));
            }
            InteractionOutcome::Navigated { from, to } => {
                info!("{} navigated {} -> {}", signature, from, to);

                let record = match self.analyze_current().await {
                    Ok(data) => VisitRecord::navigated(&to, &from, depth, signature, data),
                    Err(e) => VisitRecord::analysis_failed(&to, depth, Some(signature), e),
                };
                session.record(record);

                if !session.dedup.is_visited(&to) && session.frontier.accepts_child_of(depth) {
                    session.frontier.enqueue(CrawlTarget::new(to, depth + 1));
                }

                if let Err(e) = self.driver.restore(&from).await {
                    warn!("Could not return to {}: {}", from, e);
                }
            }
            InteractionOutcome::Mutated { url } => {
                debug!("{} changed {} in place", signature, url);
                let record = match self.analyze_current().await {
                    Ok(data) => VisitRecord::mutated(url, depth, signature, data),
                    Err(e) => VisitRecord::analysis_failed(url, depth, Some(signature), e),
                };
                session.record(record);
            }
        }
    }
}
