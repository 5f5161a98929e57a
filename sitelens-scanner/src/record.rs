use crate::content::PageData;
use crate::model::ElementSignature;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActionKind {
    Load,
    LoadFailed,
    AnalysisFailed,
    InteractionNotFound,
    InteractionFailed,
    InteractionNavigated,
    InteractionMutated,
}

impl ActionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::Load => "load",
            ActionKind::LoadFailed => "load-failed",
            ActionKind::AnalysisFailed => "analysis-failed",
            ActionKind::InteractionNotFound => "interaction-not-found",
            ActionKind::InteractionFailed => "interaction-failed",
            ActionKind::InteractionNavigated => "interaction-navigated",
            ActionKind::InteractionMutated => "interaction-mutated",
        }
    }

    /// Records describing a distinct page: the initial load and a click that navigated.
    pub fn is_page(&self) -> bool {
        matches!(self, ActionKind::Load | ActionKind::InteractionNavigated)
    }
}

/// One immutable event in a session's append-only log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisitRecord {
    pub action: ActionKind,
    pub url: String,
    pub depth: usize,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub element: Option<ElementSignature>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<PageData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl VisitRecord {
    fn new(action: ActionKind, url: impl Into<String>, depth: usize) -> Self {
        Self {
            action,
            url: url.into(),
            depth,
            timestamp: Utc::now(),
            previous_url: None,
            element: None,
            data: None,
            error: None,
        }
    }

    pub fn loaded(url: impl Into<String>, depth: usize, data: PageData) -> Self {
        Self {
            data: Some(data),
            ..Self::new(ActionKind::Load, url, depth)
        }
    }

    pub fn load_failed(url: impl Into<String>, depth: usize, error: impl ToString) -> Self {
        Self {
            error: Some(error.to_string()),
            ..Self::new(ActionKind::LoadFailed, url, depth)
        }
    }

    pub fn analysis_failed(
        url: impl Into<String>,
        depth: usize,
        element: Option<ElementSignature>,
        error: impl ToString,
    ) -> Self {
        Self {
            element,
            error: Some(error.to_string()),
            ..Self::new(ActionKind::AnalysisFailed, url, depth)
        }
    }

    pub fn not_found(
        url: impl Into<String>,
        depth: usize,
        element: ElementSignature,
        error: impl ToString,
    ) -> Self {
        Self {
            element: Some(element),
            error: Some(error.to_string()),
            ..Self::new(ActionKind::InteractionNotFound, url, depth)
        }
    }

    pub fn interaction_failed(
        url: impl Into<String>,
        depth: usize,
        element: ElementSignature,
        error: impl ToString,
    ) -> Self {
        Self {
            element: Some(element),
            error: Some(error.to_string()),
            ..Self::new(ActionKind::InteractionFailed, url, depth)
        }
    }

    pub fn navigated(
        url: impl Into<String>,
        previous_url: impl Into<String>,
        depth: usize,
        element: ElementSignature,
        data: PageData,
    ) -> Self {
        Self {
            previous_url: Some(previous_url.into()),
            element: Some(element),
            data: Some(data),
            ..Self::new(ActionKind::InteractionNavigated, url, depth)
        }
    }

    pub fn mutated(
        url: impl Into<String>,
        depth: usize,
        element: ElementSignature,
        data: PageData,
    ) -> Self {
        Self {
            element: Some(element),
            data: Some(data),
            ..Self::new(ActionKind::InteractionMutated, url, depth)
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Everything a finished session hands back to its caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlLog {
    pub session_id: String,
    pub seed: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub pages_loaded: usize,
    /// Targets still queued when the crawl stopped; they are dropped, not resumed.
    pub discarded_targets: usize,
    pub cancelled: bool,
    pub records: Vec<VisitRecord>,
}

impl CrawlLog {
    pub fn records_of(&self, action: ActionKind) -> impl Iterator<Item = &VisitRecord> {
        self.records.iter().filter(move |r| r.action == action)
    }

    pub fn successful_actions(&self) -> usize {
        self.records.iter().filter(|r| !r.is_error()).count()
    }

    pub fn interaction_count(&self) -> usize {
        self.records.iter().filter(|r| r.element.is_some()).count()
    }
}
