use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Navigation to {url} failed: {reason}")]
    Navigation { url: String, reason: String },

    #[error("Content analysis failed: {0}")]
    Analysis(String),

    #[error("Element not found: {0}")]
    InteractionNotFound(String),

    #[error("Interaction failed: {0}")]
    Interaction(String),

    #[error("Page driver could not be initialized: {0}")]
    DriverInit(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ScanError {
    /// Whether this failure is scoped to a single target or interaction.
    /// Recoverable errors are recorded in the visit log; everything else aborts the crawl.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ScanError::Navigation { .. }
                | ScanError::Analysis(_)
                | ScanError::InteractionNotFound(_)
                | ScanError::Interaction(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, ScanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_scoped_errors_are_recoverable() {
        let navigation = ScanError::Navigation {
            url: "http://a.test/".to_string(),
            reason: "HTTP 500".to_string(),
        };
        assert!(navigation.is_recoverable());
        assert!(ScanError::Interaction("detached".to_string()).is_recoverable());
    }

    #[test]
    fn test_setup_errors_are_fatal() {
        assert!(!ScanError::DriverInit("no browser".to_string()).is_recoverable());
        assert!(!ScanError::InvalidUrl("::".to_string()).is_recoverable());
        assert!(!ScanError::InvalidConfig("max_pages".to_string()).is_recoverable());
    }
}
