use tracing::{debug, info, warn};

use crate::app::Result;
use crate::config::Config;
use crate::crawl::{Deduplicator, ListLoader, LoadReport, Verdict};
use crate::domain::BusinessRecord;
use crate::extract::RecordExtractor;
use crate::view::View;

/// What happened to one listing entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemOutcome {
    Accepted,
    Duplicate,
    Invalid,
    /// The detail view never became ready; nothing was extracted.
    TimedOut,
    /// Clicking or reading the entry failed.
    Failed(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tally {
    pub accepted: usize,
    pub duplicates: usize,
    pub invalid: usize,
    pub timed_out: usize,
    pub failed: usize,
}

impl Tally {
    fn add(&mut self, outcome: &ItemOutcome) {
        match outcome {
            ItemOutcome::Accepted => self.accepted += 1,
            ItemOutcome::Duplicate => self.duplicates += 1,
            ItemOutcome::Invalid => self.invalid += 1,
            ItemOutcome::TimedOut => self.timed_out += 1,
            ItemOutcome::Failed(_) => self.failed += 1,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScrapeReport {
    /// Accepted records in listing order
    pub records: Vec<BusinessRecord>,
    pub load: LoadReport,
    /// Entries visited
    pub listed: usize,
    pub tally: Tally,
}

enum Visit {
    TimedOut,
    Extracted(BusinessRecord),
}

/// Walks the revealed entries one at a time: open, wait, extract, rank,
/// deduplicate, dismiss.
///
/// A failure inside one entry is logged and costs only that entry. The
/// dismiss gesture runs after every entry so the next one starts from the
/// list.
pub struct ScrapeOrchestrator<'a, V: View> {
    view: &'a V,
    config: &'a Config,
    dedup: &'a mut Deduplicator,
}

impl<'a, V: View> ScrapeOrchestrator<'a, V> {
    pub fn new(view: &'a V, config: &'a Config, dedup: &'a mut Deduplicator) -> Self {
        Self {
            view,
            config,
            dedup,
        }
    }

    pub async fn run(&mut self, query: &str, target: usize) -> ScrapeReport {
        let listing = &self.config.session.listing;
        let load = ListLoader::new(&self.config.loader, listing)
            .load_until(self.view, target)
            .await;

        let handles = match self.view.list_handles(listing, target).await {
            Ok(handles) => handles,
            Err(e) => {
                warn!(error = %e, "Could not collect listings");
                Vec::new()
            }
        };
        let total = handles.len();
        info!(total, "Total listings to process");

        let mut records = Vec::new();
        let mut tally = Tally::default();

        for (i, handle) in handles.iter().enumerate() {
            let rank = i + 1;
            info!("Processing {}/{}", rank, total);

            let outcome = match self.visit(handle, query, rank).await {
                Ok(Visit::TimedOut) => {
                    info!(rank, "Business details didn't load, skipping");
                    ItemOutcome::TimedOut
                }
                Ok(Visit::Extracted(record)) => match self.dedup.evaluate(&record) {
                    Verdict::Accepted => {
                        info!(
                            rank,
                            name = %record.name,
                            kind = %record.business_type,
                            area = %record.location_area,
                            rating = %record.display_rating().unwrap_or_default(),
                            "Extracted"
                        );
                        records.push(record);
                        ItemOutcome::Accepted
                    }
                    Verdict::Duplicate => ItemOutcome::Duplicate,
                    Verdict::Invalid => ItemOutcome::Invalid,
                },
                Err(e) => {
                    warn!(rank, error = %e, "Failed to process listing");
                    ItemOutcome::Failed(e.to_string())
                }
            };
            tally.add(&outcome);

            self.recover().await;
        }

        info!(count = records.len(), "Successfully extracted unique businesses");

        ScrapeReport {
            records,
            load,
            listed: total,
            tally,
        }
    }

    async fn visit(&self, handle: &V::Handle, query: &str, rank: usize) -> Result<Visit> {
        self.view.click(handle).await?;
        self.view
            .wait_fixed(self.config.traversal.detail_settle())
            .await;

        if !self.wait_for_detail().await {
            return Ok(Visit::TimedOut);
        }

        let mut record = RecordExtractor::new(&self.config.extraction)
            .extract_record(self.view)
            .await;
        record.search_keyword = query.to_string();
        record.rank = rank;
        Ok(Visit::Extracted(record))
    }

    /// Readiness cascade; the first check that matches wins.
    async fn wait_for_detail(&self) -> bool {
        for check in &self.config.traversal.readiness {
            match self
                .view
                .wait_for_selector(&check.locator, check.timeout())
                .await
            {
                Ok(()) => {
                    debug!(check = %check.name, "detail view ready");
                    return true;
                }
                Err(e) => debug!(check = %check.name, error = %e, "readiness check missed"),
            }
        }
        false
    }

    /// Return to the list. Failure here is tolerated.
    async fn recover(&self) {
        let traversal = &self.config.traversal;
        if let Err(e) = self.view.press_key(&traversal.dismiss_key).await {
            debug!(error = %e, "dismiss failed");
        }
        self.view.wait_fixed(traversal.dismiss_settle()).await;
    }
}
