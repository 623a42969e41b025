use std::time::Duration;

use rand::Rng;
use tracing::{debug, info};

use crate::config::LoaderConfig;
use crate::domain::Locator;
use crate::view::View;

/// How the loader stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    /// The list revealed at least the requested number of entries.
    Reached,
    /// The count stopped growing; the list is probably exhausted.
    Stagnant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    /// Entries visible at the final measurement
    pub count: usize,
    pub state: LoadState,
    pub iterations: usize,
    /// Consecutive unchanged measurements at the end of the run
    pub unchanged: usize,
}

/// Scrolls the result list until it shows `target` entries or stops growing.
///
/// No total is ever known up front, so exhaustion is inferred: after
/// `stagnation_threshold` consecutive measurements without growth the list
/// is treated as done.
pub struct ListLoader<'a> {
    config: &'a LoaderConfig,
    listing: &'a Locator,
}

impl<'a> ListLoader<'a> {
    pub fn new(config: &'a LoaderConfig, listing: &'a Locator) -> Self {
        Self { config, listing }
    }

    pub async fn load_until<V: View>(&self, view: &V, target: usize) -> LoadReport {
        let threshold = self.config.stagnation_threshold.max(1);
        let mut previous = 0;
        let mut unchanged = 0;
        let mut iterations = 0;

        loop {
            iterations += 1;
            self.scroll_burst(view).await;

            let mut count = self.measure(view, previous).await;
            if count < target {
                count = self.nudge(view, count).await;
            }
            info!(count, target, "Currently found");

            if count >= target {
                info!(target, "Reached target");
                return LoadReport {
                    count,
                    state: LoadState::Reached,
                    iterations,
                    unchanged,
                };
            }

            if count == previous {
                unchanged += 1;
                if unchanged >= threshold {
                    info!(count, unchanged, "No new results after repeated attempts, stopping scroll");
                    return LoadReport {
                        count,
                        state: LoadState::Stagnant,
                        iterations,
                        unchanged,
                    };
                }
            } else {
                unchanged = 0;
            }
            previous = count;

            let pause = rand::rng().random_range(self.config.jitter_range());
            view.wait_fixed(Duration::from_millis(pause)).await;
        }
    }

    async fn scroll_burst<V: View>(&self, view: &V) {
        for _ in 0..self.config.burst_size {
            let dy = rand::rng().random_range(self.config.burst_scroll_range());
            if let Err(e) = view.scroll_by(0.0, f64::from(dy)).await {
                debug!(error = %e, "scroll failed");
            }
            view.wait_fixed(self.config.burst_settle()).await;
        }
    }

    /// Some lists only keep rendering after a hover/focus event.
    async fn nudge<V: View>(&self, view: &V, count: usize) -> usize {
        view.wait_fixed(self.config.corrective_settle()).await;
        if let Err(e) = view.hover(self.listing).await {
            debug!(error = %e, "hover failed");
        }
        if let Err(e) = view
            .scroll_by(0.0, f64::from(self.config.corrective_scroll))
            .await
        {
            debug!(error = %e, "corrective scroll failed");
        }
        self.measure(view, count).await
    }

    /// A failed measurement reads as `fallback`, i.e. as no growth.
    async fn measure<V: View>(&self, view: &V, fallback: usize) -> usize {
        if let Err(e) = view
            .wait_for_selector(self.listing, self.config.measure_timeout())
            .await
        {
            debug!(error = %e, "listing not visible");
        }
        match view.count(self.listing).await {
            Ok(count) => count,
            Err(e) => {
                debug!(error = %e, "count failed");
                fallback
            }
        }
    }
}
