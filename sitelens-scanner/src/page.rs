//! The page capability the explorer drives.
//!
//! The explorer only depends on this contract. Implementations own a single live page
//! and are used by one session at a time; every async method is a suspension point.

use crate::error::Result;
use crate::model::ElementSignature;
use async_trait::async_trait;

/// Result of resolving a signature against the live page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<H> {
    Found(H),
    NotFound,
}

#[async_trait]
pub trait PageDriver: Send {
    /// Driver-specific reference to a located element.
    type Handle: Send + Sync;

    /// Navigates to `url` and returns the loaded content.
    async fn load(&mut self, url: &str) -> Result<String>;

    /// URL of the page as it currently stands (after redirects or client routing).
    fn current_url(&self) -> String;

    /// Current content of the page, which may differ from what `load` returned.
    async fn content(&mut self) -> Result<String>;

    /// Raw `href` values of every hyperlink on the current page.
    async fn links(&mut self) -> Result<Vec<String>>;

    /// Visible, enabled interactive controls in document order.
    async fn interactive_elements(&mut self) -> Result<Vec<ElementSignature>>;

    async fn find_element(&mut self, signature: &ElementSignature) -> Result<Lookup<Self::Handle>>;

    async fn activate(&mut self, handle: &Self::Handle) -> Result<()>;

    /// Returns to `url` after an activation navigated away from it.
    async fn restore(&mut self, url: &str) -> Result<()> {
        self.load(url).await.map(|_| ())
    }
}
