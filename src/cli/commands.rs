use std::path::Path;
use std::time::Instant;

use tracing::error;

use crate::app::{AppContext, Result};
use crate::domain::BusinessRecord;
use crate::store::{coverage, CsvStore, RecordSink};

pub async fn scrape(ctx: &AppContext, search: &str, total: usize, output: &Path) -> Result<()> {
    println!("Starting scrape for: '{}'", search);
    println!("Target: {} results", total);
    println!("Output: {}", output.display());

    let started = Instant::now();
    let records = match ctx.scrape(search, total).await {
        Ok(report) => {
            let tally = &report.tally;
            println!(
                "Visited {} listings ({} duplicates, {} invalid, {} not loaded, {} failed)",
                report.listed, tally.duplicates, tally.invalid, tally.timed_out, tally.failed
            );
            report.records
        }
        Err(e) => {
            error!(error = %e, "Scrape aborted");
            println!("Error during scraping: {}", e);
            Vec::new()
        }
    };

    println!("Successfully extracted {} unique businesses", records.len());
    println!(
        "Total scraping time: {:.2} seconds",
        started.elapsed().as_secs_f64()
    );

    save(&CsvStore::new(output), &records)
}

pub fn save(store: &CsvStore, records: &[BusinessRecord]) -> Result<()> {
    if records.is_empty() {
        println!("No data to save");
        return Ok(());
    }

    let written = store.append(records)?;
    println!("Saved {} records to {}", written, store.path().display());

    println!("Data coverage:");
    for (column, filled) in coverage(records) {
        println!("  {}: {}/{}", column, filled, records.len());
    }
    Ok(())
}
