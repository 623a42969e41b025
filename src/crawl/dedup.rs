use std::collections::HashSet;

use tracing::info;

use crate::domain::BusinessRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Accepted,
    /// Same `(name, address)` as an earlier record.
    Duplicate,
    /// Name missing or the extraction-failure placeholder.
    Invalid,
}

/// Tracks the identities accepted during one run.
#[derive(Debug, Default)]
pub struct Deduplicator {
    seen: HashSet<(String, String)>,
}

impl Deduplicator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn evaluate(&mut self, record: &BusinessRecord) -> Verdict {
        if !record.has_valid_name() {
            info!(rank = record.rank, "Invalid business data, skipping");
            return Verdict::Invalid;
        }

        let (name, address) = record.identity_key();
        if self.seen.insert((name.to_string(), address.to_string())) {
            Verdict::Accepted
        } else {
            info!(rank = record.rank, name = %record.name, "Duplicate, skipping");
            Verdict::Duplicate
        }
    }

    pub fn accept(&mut self, record: &BusinessRecord) -> bool {
        self.evaluate(record) == Verdict::Accepted
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
