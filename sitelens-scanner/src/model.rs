use serde::{Deserialize, Serialize};
use std::fmt;

/// A pending unit of crawl work. Never mutated once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlTarget {
    pub url: String,
    pub depth: usize,
}

impl CrawlTarget {
    pub fn new(url: impl Into<String>, depth: usize) -> Self {
        Self {
            url: url.into(),
            depth,
        }
    }

    pub fn seed(url: impl Into<String>) -> Self {
        Self::new(url, 0)
    }
}

/// Identity of an interactive control for dedup purposes.
///
/// Deliberately coarse: two distinct controls with the same tag, visible text and
/// control type collapse into one, and only the first one encountered is activated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ElementSignature {
    pub tag: String,
    pub text: String,
    #[serde(rename = "type")]
    pub control_type: String,
}

impl ElementSignature {
    pub fn new(
        tag: impl Into<String>,
        text: impl Into<String>,
        control_type: impl Into<String>,
    ) -> Self {
        Self {
            tag: tag.into().to_uppercase(),
            text: text.into(),
            control_type: control_type.into(),
        }
    }
}

impl fmt::Display for ElementSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}_{}", self.tag, self.text, self.control_type)
    }
}
