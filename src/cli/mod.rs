pub mod commands;

use std::path::PathBuf;

use clap::Parser;

use crate::config::Config;

pub const DEFAULT_TOTAL: usize = 20;
pub const DEFAULT_OUTPUT: &str = "all_business.csv";

#[derive(Parser, Debug)]
#[command(name = "cartograph")]
#[command(about = "Collect business listings from a map search into CSV", long_about = None)]
pub struct Cli {
    /// Search query, e.g. "coffee shops in Galway"
    #[arg(short, long)]
    pub search: String,

    /// Number of listings to visit
    #[arg(short, long, default_value_t = DEFAULT_TOTAL)]
    pub total: usize,

    /// CSV file to append results to
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Config file (default: ~/.config/cartograph/config.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Show the browser window
    #[arg(long)]
    pub headed: bool,

    /// Path to the Chrome/Chromium executable
    #[arg(long)]
    pub chrome: Option<PathBuf>,
}

impl Cli {
    /// Apply browser flags on top of the loaded configuration.
    pub fn apply_overrides(&self, config: &mut Config) {
        if self.headed {
            config.browser.headless = false;
        }
        if let Some(ref chrome) = self.chrome {
            config.browser.executable = Some(chrome.clone());
        }
    }
}
