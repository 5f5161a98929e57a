pub mod analyzer;
pub mod config;
pub mod content;
pub mod crawler;
pub mod error;
pub mod explorer;
pub mod frontier;
mod html;
pub mod http_page;
pub mod model;
pub mod page;
pub mod record;
pub mod session;
pub mod urls;

pub use analyzer::{ContentAnalyzer, HtmlAnalyzer};
pub use config::CrawlConfig;
pub use content::PageData;
pub use crawler::{Crawler, ProgressCallback};
pub use error::{Result, ScanError};
pub use explorer::InteractionOutcome;
pub use http_page::HttpPage;
pub use model::{CrawlTarget, ElementSignature};
pub use page::{Lookup, PageDriver};
pub use record::{ActionKind, CrawlLog, VisitRecord};
pub use session::RecordCallback;
