pub mod csv;

use crate::app::Result;
use crate::domain::BusinessRecord;

pub use self::csv::CsvStore;

pub trait RecordSink {
    /// Persist `records` after anything already stored. Returns how many rows
    /// were written.
    fn append(&self, records: &[BusinessRecord]) -> Result<usize>;
}

/// Non-empty value count per column, in column order.
pub fn coverage(records: &[BusinessRecord]) -> Vec<(&'static str, usize)> {
    let mut counts: Vec<(&'static str, usize)> = Vec::new();
    for record in records {
        for (i, (column, value)) in record.fields().into_iter().enumerate() {
            if counts.len() <= i {
                counts.push((column, 0));
            }
            if !value.trim().is_empty() {
                counts[i].1 += 1;
            }
        }
    }
    counts
}
