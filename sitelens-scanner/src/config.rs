use crate::error::{Result, ScanError};
use std::time::Duration;

/// Budgets and pacing for a single crawl session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlConfig {
    /// Deepest target depth that will be consumed. The seed is depth 0.
    pub max_depth: usize,
    /// Page budget: the crawl stops dequeuing once this many pages have loaded.
    pub max_pages: usize,
    /// Pause applied after every page load and every activation.
    pub delay: Duration,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            max_depth: 3,
            max_pages: 50,
            delay: Duration::ZERO,
        }
    }
}

impl CrawlConfig {
    /// Smaller budgets used for each side of a comparison.
    pub fn for_comparison() -> Self {
        Self {
            max_depth: 2,
            max_pages: 30,
            delay: Duration::ZERO,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_pages == 0 {
            return Err(ScanError::InvalidConfig(
                "max_pages must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CrawlConfig::default();
        assert_eq!(config.max_depth, 3);
        assert_eq!(config.max_pages, 50);
        assert_eq!(config.delay, Duration::ZERO);

        let comparison = CrawlConfig::for_comparison();
        assert_eq!(comparison.max_depth, 2);
        assert_eq!(comparison.max_pages, 30);
    }

    #[test]
    fn test_zero_page_budget_is_rejected() {
        let config = CrawlConfig {
            max_pages: 0,
            ..CrawlConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ScanError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_zero_depth_is_valid() {
        let config = CrawlConfig {
            max_depth: 0,
            ..CrawlConfig::default()
        };
        assert!(config.validate().is_ok());
    }
}
