use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::Locator;

/// How the browser is launched.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserSettings {
    /// Whether to run the browser in headless mode (default: true)
    pub headless: bool,

    /// Chrome/Chromium executable; autodetected when unset
    pub executable: Option<PathBuf>,

    /// User agent string to use
    pub user_agent: Option<String>,

    pub window_width: u32,
    pub window_height: u32,

    /// Viewport point where wheel gestures are dispatched. Should sit over
    /// the scrollable result list.
    pub wheel_x: f64,
    pub wheel_y: f64,

    /// Timeout for launching the browser and for page navigation, in seconds
    pub timeout_secs: u64,
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            headless: true,
            executable: None,
            user_agent: Some(
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36"
                    .to_string(),
            ),
            window_width: 1366,
            window_height: 900,
            wheel_x: 300.0,
            wheel_y: 450.0,
            timeout_secs: 60,
        }
    }
}

impl BrowserSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Where the search starts and how the result list is recognised.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub start_url: String,
    pub search_box: Locator,
    /// Matches one element per result entry
    pub listing: Locator,
    pub after_navigate_ms: u64,
    pub after_search_ms: u64,
    pub list_ready_timeout_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            start_url: "https://www.google.com/maps".to_string(),
            search_box: Locator::xpath(r#"//input[@id="searchboxinput"]"#),
            listing: Locator::xpath(r#"//a[contains(@href, "https://www.google.com/maps/place")]"#),
            after_navigate_ms: 2000,
            after_search_ms: 5000,
            list_ready_timeout_ms: 30_000,
        }
    }
}

impl SessionConfig {
    pub fn after_navigate(&self) -> Duration {
        Duration::from_millis(self.after_navigate_ms)
    }

    pub fn after_search(&self) -> Duration {
        Duration::from_millis(self.after_search_ms)
    }

    pub fn list_ready_timeout(&self) -> Duration {
        Duration::from_millis(self.list_ready_timeout_ms)
    }
}
