use tracing::debug;

use crate::config::ReviewsConfig;
use crate::domain::{Locator, NO_REVIEWS};
use crate::view::View;

/// Collect up to `config.limit` recent reviews as
/// `Review 1: ... | Review 2: ...`, or the "No reviews found" sentinel.
///
/// Reviews render lazily, so the view is scrolled and given time to settle
/// first. If the container lookup yields nothing, the broader fallback
/// lookup is tried.
pub async fn collect_reviews<V: View>(view: &V, config: &ReviewsConfig) -> String {
    if let Err(e) = view.scroll_by(0.0, config.scroll_dy).await {
        debug!(error = %e, "review scroll failed");
    }
    view.wait_fixed(config.settle()).await;

    let mut excerpts = collect(view, &config.container, Some(&config.body), config).await;
    if excerpts.is_empty() {
        excerpts = collect(view, &config.fallback, None, config).await;
    }

    if excerpts.is_empty() {
        NO_REVIEWS.to_string()
    } else {
        excerpts.join(" | ")
    }
}

async fn collect<V: View>(
    view: &V,
    locator: &Locator,
    inner: Option<&Locator>,
    config: &ReviewsConfig,
) -> Vec<String> {
    let handles = match view.list_handles(locator, config.limit).await {
        Ok(handles) => handles,
        Err(e) => {
            debug!(locator = %locator, error = %e, "review lookup failed");
            return Vec::new();
        }
    };

    let mut excerpts = Vec::new();
    for (i, handle) in handles.iter().enumerate() {
        match view.text_within(handle, inner).await {
            Ok(text) => {
                let flat = text.replace('\r', "").replace('\n', " ");
                let flat = flat.trim();
                if !flat.is_empty() {
                    excerpts.push(format!(
                        "Review {}: {}",
                        i + 1,
                        excerpt(flat, config.excerpt_chars)
                    ));
                }
            }
            Err(e) => debug!(index = i, error = %e, "review text unavailable"),
        }
    }
    excerpts
}

/// Cut `text` to `max_chars` characters, appending `...` when it was longer.
pub fn excerpt(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
