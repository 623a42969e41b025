use std::ops::RangeInclusive;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::Locator;

/// Tuning for the scroll-and-measure loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Scroll gestures per iteration (default: 3)
    pub burst_size: usize,
    pub burst_settle_ms: u64,
    /// Wheel delta of a burst gesture is drawn from this range
    pub burst_scroll_min: u32,
    pub burst_scroll_max: u32,

    pub corrective_settle_ms: u64,
    pub corrective_scroll: u32,

    /// Consecutive unchanged measurements before giving up (default: 5)
    pub stagnation_threshold: usize,

    /// Randomized pause between iterations, in milliseconds
    pub jitter_min_ms: u64,
    pub jitter_max_ms: u64,

    /// Bound on waiting for the listing before each measurement
    pub measure_timeout_ms: u64,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            burst_size: 3,
            burst_settle_ms: 1000,
            burst_scroll_min: 8000,
            burst_scroll_max: 15_000,
            corrective_settle_ms: 2000,
            corrective_scroll: 10_000,
            stagnation_threshold: 5,
            jitter_min_ms: 1000,
            jitter_max_ms: 2000,
            measure_timeout_ms: 30_000,
        }
    }
}

impl LoaderConfig {
    pub fn burst_settle(&self) -> Duration {
        Duration::from_millis(self.burst_settle_ms)
    }

    pub fn corrective_settle(&self) -> Duration {
        Duration::from_millis(self.corrective_settle_ms)
    }

    pub fn measure_timeout(&self) -> Duration {
        Duration::from_millis(self.measure_timeout_ms)
    }

    pub fn burst_scroll_range(&self) -> RangeInclusive<u32> {
        let (lo, hi) = ordered(self.burst_scroll_min, self.burst_scroll_max);
        lo..=hi
    }

    pub fn jitter_range(&self) -> RangeInclusive<u64> {
        let (lo, hi) = ordered(self.jitter_min_ms, self.jitter_max_ms);
        lo..=hi
    }
}

fn ordered<T: PartialOrd>(a: T, b: T) -> (T, T) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// One step of the detail-readiness cascade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadinessCheck {
    pub name: String,
    pub locator: Locator,
    pub timeout_ms: u64,
}

impl ReadinessCheck {
    pub fn new(name: &str, locator: Locator, timeout_ms: u64) -> Self {
        Self {
            name: name.to_string(),
            locator,
            timeout_ms,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Per-item traversal timings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TraversalConfig {
    /// Pause after clicking an entry before probing the detail view
    pub detail_settle_ms: u64,
    /// Tried in order; the first match means the detail view is ready
    pub readiness: Vec<ReadinessCheck>,
    pub dismiss_key: String,
    pub dismiss_settle_ms: u64,
}

impl Default for TraversalConfig {
    fn default() -> Self {
        Self {
            detail_settle_ms: 3000,
            readiness: vec![
                ReadinessCheck::new(
                    "header-title",
                    Locator::xpath(r#"//div[@class="TIHn2 "]//h1[@class="DUwDvf lfPIob"]"#),
                    8000,
                ),
                ReadinessCheck::new(
                    "any-title",
                    Locator::xpath(r#"//h1[contains(@class, "DUwDvf")]"#),
                    3000,
                ),
                ReadinessCheck::new(
                    "address-button",
                    Locator::xpath(r#"//button[@data-item-id="address"]"#),
                    3000,
                ),
            ],
            dismiss_key: "Escape".to_string(),
            dismiss_settle_ms: 2000,
        }
    }
}

impl TraversalConfig {
    pub fn detail_settle(&self) -> Duration {
        Duration::from_millis(self.detail_settle_ms)
    }

    pub fn dismiss_settle(&self) -> Duration {
        Duration::from_millis(self.dismiss_settle_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_loader_values() {
        let config = LoaderConfig::default();
        assert_eq!(config.burst_size, 3);
        assert_eq!(config.stagnation_threshold, 5);
        assert_eq!(config.burst_scroll_range(), 8000..=15_000);
        assert_eq!(config.jitter_range(), 1000..=2000);
    }

    #[test]
    fn test_inverted_ranges_are_reordered() {
        let config = LoaderConfig {
            jitter_min_ms: 900,
            jitter_max_ms: 100,
            ..Default::default()
        };
        assert_eq!(config.jitter_range(), 100..=900);
    }

    #[test]
    fn test_default_readiness_cascade() {
        let config = TraversalConfig::default();
        let timeouts: Vec<_> = config.readiness.iter().map(|c| c.timeout_ms).collect();
        assert_eq!(timeouts, vec![8000, 3000, 3000]);
        assert_eq!(config.dismiss_key, "Escape");
        assert_eq!(config.detail_settle(), Duration::from_secs(3));
    }
}
