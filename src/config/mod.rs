//! Configuration management for cartograph.
//!
//! Configuration is read from `~/.config/cartograph/config.toml` unless a path
//! is given on the command line. If the default file doesn't exist, a default
//! configuration with comments is created.

pub mod browser;
pub mod crawl;
pub mod selectors;

pub use browser::{BrowserSettings, SessionConfig};
pub use crawl::{LoaderConfig, ReadinessCheck, TraversalConfig};
pub use selectors::{ExtractionConfig, ReviewsConfig};

use serde::Deserialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Main configuration struct.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub browser: BrowserSettings,
    pub session: SessionConfig,
    pub loader: LoaderConfig,
    pub traversal: TraversalConfig,
    pub extraction: ExtractionConfig,
}

impl Config {
    /// Load configuration from `path`, or from the default location.
    ///
    /// An explicit path must exist. The default file is created with
    /// comments on first use. Missing fields use default values.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load_from(path),
            None => {
                let config_path = Self::default_config_path()?;
                if !config_path.exists() {
                    Self::create_default_config(&config_path)?;
                    return Ok(Self::default());
                }
                Self::load_from(&config_path)
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the default config file path: `~/.config/cartograph/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("cartograph").join("config.toml"))
    }

    fn create_default_config(path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        file.write_all(Self::default_config_content().as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }

    /// Generate the default config file content with comments.
    fn default_config_content() -> String {
        r##"# cartograph configuration
#
# Durations ending in _ms are milliseconds. Locators are written as
# { xpath = '...' } or { css = '...' }.
#
# Field lookup strategies live under [extraction] and default to the
# built-in chains; override one by listing its strategies in order, e.g.
#
# [extraction]
# name = [
#     { name = "header-title", locator = { xpath = '//h1[@class="DUwDvf lfPIob"]' } },
#     { name = "any-title", locator = { xpath = '//h1' } },
# ]

[browser]
# Run browser in headless mode (no visible window)
headless = true

# Browser launch and navigation timeout in seconds
timeout_secs = 60

window_width = 1366
window_height = 900

# Point in the viewport where scroll gestures are dispatched
wheel_x = 300.0
wheel_y = 450.0

[session]
start_url = "https://www.google.com/maps"
search_box = { xpath = '//input[@id="searchboxinput"]' }
listing = { xpath = '//a[contains(@href, "https://www.google.com/maps/place")]' }
after_navigate_ms = 2000
after_search_ms = 5000
list_ready_timeout_ms = 30000

[loader]
# Scroll gestures per measurement
burst_size = 3
burst_settle_ms = 1000
burst_scroll_min = 8000
burst_scroll_max = 15000

# Hover + scroll applied when below target
corrective_settle_ms = 2000
corrective_scroll = 10000

# Unchanged measurements before the list is considered exhausted
stagnation_threshold = 5

jitter_min_ms = 1000
jitter_max_ms = 2000
measure_timeout_ms = 30000

[traversal]
detail_settle_ms = 3000
dismiss_key = "Escape"
dismiss_settle_ms = 2000
"##
        .to_string()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}
