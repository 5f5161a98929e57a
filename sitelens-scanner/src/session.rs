use crate::config::CrawlConfig;
use crate::frontier::{DedupTracker, Frontier};
use crate::model::CrawlTarget;
use crate::record::{CrawlLog, VisitRecord};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

pub type RecordCallback = Arc<dyn Fn(&VisitRecord) + Send + Sync>;

/// All mutable state of one crawl. Owned by a single `crawl` call and never shared,
/// so two sessions can run side by side without coordination.
pub struct CrawlSession {
    pub id: String,
    pub seed: String,
    pub config: CrawlConfig,
    pub frontier: Frontier,
    pub dedup: DedupTracker,
    pub pages_loaded: usize,
    started_at: DateTime<Utc>,
    records: Vec<VisitRecord>,
    on_record: Option<RecordCallback>,
}

impl CrawlSession {
    pub fn new(seed: impl Into<String>, config: CrawlConfig) -> Self {
        let seed = seed.into();
        let mut frontier = Frontier::new(config.max_depth);
        frontier.enqueue(CrawlTarget::seed(seed.clone()));

        Self {
            id: Uuid::new_v4().to_string(),
            seed,
            config,
            frontier,
            dedup: DedupTracker::new(),
            pages_loaded: 0,
            started_at: Utc::now(),
            records: Vec::new(),
            on_record: None,
        }
    }

    pub fn with_record_callback(mut self, callback: Option<RecordCallback>) -> Self {
        self.on_record = callback;
        self
    }

    /// Appends to the log. Records are never edited after this.
    pub fn record(&mut self, record: VisitRecord) {
        if let Some(callback) = &self.on_record {
            callback(&record);
        }
        self.records.push(record);
    }

    pub fn records(&self) -> &[VisitRecord] {
        &self.records
    }

    pub fn budget_exhausted(&self) -> bool {
        self.pages_loaded >= self.config.max_pages
    }

    /// Closes the session, dropping whatever is still queued.
    pub fn finish(mut self, cancelled: bool) -> CrawlLog {
        let discarded_targets = self.frontier.discard_remaining();
        CrawlLog {
            session_id: self.id,
            seed: self.seed,
            started_at: self.started_at,
            finished_at: Utc::now(),
            pages_loaded: self.pages_loaded,
            discarded_targets,
            cancelled,
            records: self.records,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::PageData;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_new_session_queues_seed() {
        let mut session = CrawlSession::new("http://a.test/", CrawlConfig::default());
        let target = session.frontier.dequeue().unwrap();
        assert_eq!(target, CrawlTarget::seed("http://a.test/"));
        assert!(session.frontier.is_empty());
    }

    #[test]
    fn test_sessions_have_distinct_ids() {
        let a = CrawlSession::new("http://a.test/", CrawlConfig::default());
        let b = CrawlSession::new("http://a.test/", CrawlConfig::default());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_record_callback_sees_every_record() {
        let seen = Arc::new(AtomicUsize::new(0));
        let counter = seen.clone();
        let mut session = CrawlSession::new("http://a.test/", CrawlConfig::default())
            .with_record_callback(Some(Arc::new(move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
            })));

        session.record(VisitRecord::loaded("http://a.test/", 0, PageData::default()));
        session.record(VisitRecord::load_failed("http://a.test/x", 1, "boom"));

        assert_eq!(seen.load(Ordering::SeqCst), 2);
        assert_eq!(session.records().len(), 2);
    }

    #[test]
    fn test_finish_counts_discarded_targets() {
        let mut session = CrawlSession::new("http://a.test/", CrawlConfig::default());
        session.frontier.enqueue(CrawlTarget::new("http://a.test/x", 1));
        let log = session.finish(false);
        assert_eq!(log.discarded_targets, 2);
        assert!(!log.cancelled);
        assert!(log.finished_at >= log.started_at);
    }
}
