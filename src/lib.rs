//! # Cartograph
//!
//! Crawls a lazily loaded map search result list and turns each business
//! detail view into a CSV row.
//!
//! ## Architecture
//!
//! ```text
//! Session → ListLoader → ScrapeOrchestrator → RecordExtractor → Deduplicator → Store
//! ```
//!
//! - [`browser`]: Chrome session and search bootstrap
//! - [`crawl`]: Scroll-and-measure loading and the per-item traversal
//! - [`extract`]: Field and record extraction with fallback strategies
//! - [`store`]: CSV persistence
//!
//! ## Quick Start
//!
//! ```bash
//! # 20 results into all_business.csv
//! cartograph --search "coffee shops in Galway"
//!
//! # 50 results, visible browser, custom output
//! cartograph --search "dentists in Cork" --total 50 --output dentists.csv --headed
//! ```
//!
//! ## Modules
//!
//! - [`app`]: Application context and error types
//! - [`cli`]: Command-line interface definitions
//! - [`config`]: TOML configuration
//! - [`domain`]: Core domain models (BusinessRecord, Locator, StrategyChain)
//! - [`view`]: The page capabilities the crawler is written against

/// Application context and error handling.
///
/// [`AppContext`](app::AppContext) owns the loaded configuration and runs a
/// whole scrape: launch, search, traverse, close.
pub mod app;

/// Chrome-backed view and search bootstrap.
///
/// - [`ChromeView`](browser::ChromeView): chromiumoxide implementation of [`View`](view::View)
/// - [`open_search`](browser::open_search): navigate, search, wait for results
pub mod browser;

/// Command-line interface using clap.
pub mod cli;

/// Configuration management.
///
/// Loads from `~/.config/cartograph/config.toml`, supporting:
/// - Browser launch settings
/// - Timing of every wait and scroll
/// - Per-field lookup strategies
pub mod config;

/// List loading and traversal.
///
/// - [`ListLoader`](crawl::ListLoader): scroll until the target count or stagnation
/// - [`ScrapeOrchestrator`](crawl::ScrapeOrchestrator): open, extract, rank, dedup, dismiss
/// - [`Deduplicator`](crawl::Deduplicator): run-scoped `(name, address)` identity set
pub mod crawl;

/// Core domain models.
///
/// - [`BusinessRecord`](domain::BusinessRecord): one extracted business
/// - [`Rating`](domain::Rating): star average checked to `[0, 5]`
/// - [`Locator`](domain::Locator): XPath or CSS lookup
pub mod domain;

/// Extraction from an open detail view.
pub mod extract;

/// CSV persistence.
///
/// - [`RecordSink`](store::RecordSink): Trait for appending records
/// - [`CsvStore`](store::CsvStore): header-harmonizing CSV implementation
pub mod store;

/// Page capabilities the crawler needs from a browser.
pub mod view;
