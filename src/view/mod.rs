//! The interactive view the crawler drives.
//!
//! Every capability is fallible. The core never assumes that a lookup,
//! gesture or wait succeeds; it decides per call site how a failure degrades.

#[cfg(test)]
pub mod mock;

use std::time::Duration;

use async_trait::async_trait;

use crate::app::Result;
use crate::domain::Locator;

/// Capabilities of a single-focus interactive view (one browser tab).
#[async_trait]
pub trait View: Send + Sync {
    /// Opaque reference to a rendered element, valid while it stays mounted.
    type Handle: Send + Sync;

    async fn navigate_to(&self, url: &str) -> Result<()>;

    async fn fill_field(&self, locator: &Locator, text: &str) -> Result<()>;

    /// Send a key press to whatever currently has focus.
    async fn press_key(&self, key: &str) -> Result<()>;

    async fn count(&self, locator: &Locator) -> Result<usize>;

    /// Handles for matching elements in document order, at most `limit`.
    async fn list_handles(&self, locator: &Locator, limit: usize) -> Result<Vec<Self::Handle>>;

    /// Rendered text of the first match; fails if nothing matches.
    async fn inner_text(&self, locator: &Locator) -> Result<String>;

    /// Rendered text of `handle`, or of the first match of `locator`
    /// searched relative to it.
    async fn text_within(&self, handle: &Self::Handle, locator: Option<&Locator>)
        -> Result<String>;

    async fn scroll_by(&self, dx: f64, dy: f64) -> Result<()>;

    /// Resolves once `locator` matches, or fails with a timeout error.
    async fn wait_for_selector(&self, locator: &Locator, timeout: Duration) -> Result<()>;

    async fn wait_fixed(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }

    async fn click(&self, handle: &Self::Handle) -> Result<()>;

    async fn hover(&self, locator: &Locator) -> Result<()>;

    async fn current_url(&self) -> Result<String>;
}
