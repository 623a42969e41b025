use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::{Locator, Strategy, StrategyChain};

/// Lookup strategies for every extracted field.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    pub name: StrategyChain,
    pub address: StrategyChain,
    pub website: StrategyChain,
    pub phone: StrategyChain,
    pub business_type: StrategyChain,
    pub reviews_count: StrategyChain,
    pub reviews_average: StrategyChain,
    pub opening_hours: StrategyChain,
    /// Shorter open/closed line used when no full schedule is found
    pub hours_status: StrategyChain,
    /// Opening-hours candidates must be longer than this many characters
    pub hours_min_length: usize,
    pub description: StrategyChain,
    pub reviews: ReviewsConfig,
}

const HEADER: &str = r#"//div[@class="TIHn2 "]"#;

fn chain(entries: &[(&str, &str)]) -> StrategyChain {
    entries
        .iter()
        .map(|(name, expr)| Strategy::xpath(*name, *expr))
        .collect()
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        let header_title = format!(r#"{HEADER}//h1[@class="DUwDvf lfPIob"]"#);
        let header_count = format!(
            r#"{HEADER}//div[@class="fontBodyMedium dmRWX"]//div//span//span//span[@aria-label]"#
        );
        let header_rating =
            format!(r#"{HEADER}//div[@class="fontBodyMedium dmRWX"]//div//span[@aria-hidden]"#);

        Self {
            name: chain(&[
                ("header-title", header_title.as_str()),
                ("any-title", r#"//h1[contains(@class, "DUwDvf")]"#),
            ]),
            address: chain(&[(
                "address-button",
                r#"//button[@data-item-id="address"]//div[contains(@class, "fontBodyMedium")]"#,
            )]),
            website: chain(&[(
                "authority-link",
                r#"//a[@data-item-id="authority"]//div[contains(@class, "fontBodyMedium")]"#,
            )]),
            phone: chain(&[(
                "phone-button",
                r#"//button[contains(@data-item-id, "phone:tel:")]//div[contains(@class, "fontBodyMedium")]"#,
            )]),
            business_type: chain(&[(
                "category-button",
                r#"//div[@class="LBgpqf"]//button[@class="DkEaL "]"#,
            )]),
            reviews_count: chain(&[("header-review-count", header_count.as_str())]),
            reviews_average: chain(&[("header-rating", header_rating.as_str())]),
            opening_hours: chain(&[
                ("hours-table", r#"//div[contains(@class, "t39EBf")]"#),
                ("hours-panel", r#"//div[@class="OMl5r"]"#),
                ("hours-summary", r#"//div[contains(@class, "y0skZc")]"#),
                ("hours-popup", r#"//div[contains(@class, "WgFkxc")]"#),
                ("hours-inline", r#"//div[contains(@class, "mxowUb")]"#),
            ]),
            hours_status: chain(&[("open-status", r#"//div[contains(@class, "o0Svhf")]"#)]),
            hours_min_length: 10,
            description: chain(&[(
                "editorial-summary",
                r#"//div[@class="WeS02d fontBodyMedium"]//div[@class="PYvSYb "]"#,
            )]),
            reviews: ReviewsConfig::default(),
        }
    }
}

/// How recent reviews are collected from the detail view.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewsConfig {
    /// Scroll applied before collecting, to trigger lazy review rendering
    pub scroll_dy: f64,
    pub settle_ms: u64,
    /// Maximum number of reviews kept (default: 3)
    pub limit: usize,
    /// Excerpts longer than this many characters are cut and marked
    pub excerpt_chars: usize,
    /// One element per review
    pub container: Locator,
    /// Review body, searched inside a container
    pub body: Locator,
    /// Broader lookup used when no container yields text
    pub fallback: Locator,
}

impl Default for ReviewsConfig {
    fn default() -> Self {
        Self {
            scroll_dy: 1500.0,
            settle_ms: 2000,
            limit: 3,
            excerpt_chars: 150,
            container: Locator::xpath(r#"//div[contains(@class, "jftiEf")]"#),
            body: Locator::xpath(r#".//span[contains(@class, "wiI7pd")]"#),
            fallback: Locator::xpath(r#"//span[contains(@class, "wiI7pd")]"#),
        }
    }
}

impl ReviewsConfig {
    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }
}
