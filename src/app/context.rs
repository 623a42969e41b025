use std::path::Path;

use tracing::warn;

use crate::app::error::{CartographError, Result};
use crate::browser::{open_search, ChromeView};
use crate::config::Config;
use crate::crawl::{Deduplicator, ScrapeOrchestrator, ScrapeReport};
use crate::view::View;

pub struct AppContext {
    pub config: Config,
}

impl AppContext {
    pub fn new(config_path: Option<&Path>) -> Result<Self> {
        let config = Config::load(config_path).map_err(|e| CartographError::Config(e.to_string()))?;
        Ok(Self { config })
    }

    pub fn with_config(config: Config) -> Self {
        Self { config }
    }

    /// Launch a browser, search for `query` and collect up to `target`
    /// unique businesses. The browser is closed whatever the outcome.
    pub async fn scrape(&self, query: &str, target: usize) -> Result<ScrapeReport> {
        let view = ChromeView::launch(&self.config.browser).await?;
        let result = self.scrape_with(&view, query, target).await;
        if let Err(e) = view.close().await {
            warn!(error = %e, "Failed to close browser");
        }
        result
    }

    /// Run the search and traversal on an already open view.
    pub async fn scrape_with<V: View>(
        &self,
        view: &V,
        query: &str,
        target: usize,
    ) -> Result<ScrapeReport> {
        open_search(view, &self.config.session, query).await?;

        let mut dedup = Deduplicator::new();
        let report = ScrapeOrchestrator::new(view, &self.config, &mut dedup)
            .run(query, target)
            .await;
        Ok(report)
    }
}
