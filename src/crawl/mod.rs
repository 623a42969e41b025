//! Traversal of a lazily loaded result list.
//!
//! ```text
//! ListLoader → handles → (click → ready? → RecordExtractor → Deduplicator) → dismiss
//! ```

mod dedup;
mod loader;
mod orchestrator;

pub use dedup::{Deduplicator, Verdict};
pub use loader::{ListLoader, LoadReport, LoadState};
pub use orchestrator::{ItemOutcome, ScrapeOrchestrator, ScrapeReport, Tally};
