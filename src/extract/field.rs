use tracing::debug;

use crate::domain::StrategyChain;
use crate::view::View;

/// Reads one logical field through an ordered chain of lookups.
pub struct FieldExtractor<'a, V: View> {
    view: &'a V,
}

impl<'a, V: View> FieldExtractor<'a, V> {
    pub fn new(view: &'a V) -> Self {
        Self { view }
    }

    /// First non-empty text produced by the chain, trimmed.
    pub async fn lookup(&self, chain: &StrategyChain) -> Option<String> {
        self.lookup_where(chain, |_| true).await
    }

    /// Like [`lookup`](Self::lookup), but only accepts text for which
    /// `accept` holds; rejected matches fall through to the next strategy.
    pub async fn lookup_where<F>(&self, chain: &StrategyChain, accept: F) -> Option<String>
    where
        F: Fn(&str) -> bool,
    {
        for strategy in chain.iter() {
            match self.view.inner_text(&strategy.locator).await {
                Ok(text) => {
                    let text = text.trim();
                    if !text.is_empty() && accept(text) {
                        return Some(text.to_string());
                    }
                    debug!(strategy = %strategy.name, "lookup produced no usable text");
                }
                Err(e) => {
                    debug!(strategy = %strategy.name, error = %e, "lookup failed");
                }
            }
        }
        None
    }

    /// Total variant of [`lookup`](Self::lookup): empty string when the
    /// chain is exhausted.
    pub async fn extract(&self, chain: &StrategyChain) -> String {
        self.lookup(chain).await.unwrap_or_default()
    }
}
