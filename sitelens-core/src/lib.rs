pub mod compare;
pub mod crawl;
pub mod dataset;
pub mod error;
pub mod report;
pub mod similarity;
pub mod tech;

pub use compare::{ComparisonResult, SimilarityLevel, SimilarityScores, Winner, compare};
pub use crawl::{
    CompareOptions, CrawlOptions, CrawlOutcome, SiteComparison, execute_comparison,
    execute_crawl,
};
pub use dataset::{ErrorEntry, PageSummary, SiteDataset};
pub use error::{CoreError, Result};
