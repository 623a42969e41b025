use std::fs::{self, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::app::Result;
use crate::domain::{BusinessRecord, DEFAULT_COLUMNS};
use crate::store::RecordSink;

/// Appends records to a CSV file.
///
/// A new (or empty) file gets a header in the preferred column order. An
/// existing file keeps its own header: rows are written in that order, columns
/// the record doesn't know are left empty, and record fields the file has no
/// column for are dropped.
pub struct CsvStore {
    path: PathBuf,
}

impl CsvStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn existing_header(&self) -> Result<Option<Vec<String>>> {
        match fs::metadata(&self.path) {
            Ok(meta) if meta.len() == 0 => return Ok(None),
            Ok(_) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        }

        let mut reader = ::csv::ReaderBuilder::new()
            .has_headers(true)
            .from_path(&self.path)?;
        let header = reader.headers()?.iter().map(str::to_string).collect();
        Ok(Some(header))
    }
}

fn row_for(record: &BusinessRecord, columns: &[String]) -> Vec<String> {
    let fields = record.fields();
    columns
        .iter()
        .map(|column| {
            fields
                .iter()
                .find(|(field, _)| field == column)
                .map(|(_, value)| value.clone())
                .unwrap_or_default()
        })
        .collect()
}

impl RecordSink for CsvStore {
    fn append(&self, records: &[BusinessRecord]) -> Result<usize> {
        let Some(first) = records.first() else {
            return Ok(0);
        };

        let (columns, write_header) = match self.existing_header()? {
            Some(columns) => {
                let dropped: Vec<&str> = first
                    .fields()
                    .into_iter()
                    .map(|(field, _)| field)
                    .filter(|field| !columns.iter().any(|c| c == field))
                    .collect();
                if !dropped.is_empty() {
                    warn!(
                        path = %self.path.display(),
                        columns = ?dropped,
                        "Existing file has no column for these fields; they are not saved"
                    );
                }
                (columns, false)
            }
            None => (DEFAULT_COLUMNS.iter().map(|c| c.to_string()).collect(), true),
        };

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let mut writer = ::csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        if write_header {
            writer.write_record(&columns)?;
        }
        for record in records {
            writer.write_record(row_for(record, &columns))?;
        }
        writer.flush()?;

        debug!(path = %self.path.display(), rows = records.len(), write_header, "csv append");
        Ok(records.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Rating;
    use tempfile::TempDir;

    fn record(name: &str, rank: usize) -> BusinessRecord {
        let mut record = BusinessRecord::new();
        record.name = name.to_string();
        record.address = format!("{} Main St, Galway", rank);
        record.detail_url = format!("https://maps.example/place/{}", rank);
        record.reviews_average = Rating::new(4.5);
        record.reviews_count = Some(12);
        record.search_keyword = "cafes".to_string();
        record.rank = rank;
        record
    }

    fn read_rows(path: &Path) -> Vec<Vec<String>> {
        let mut reader = ::csv::ReaderBuilder::new()
            .has_headers(false)
            .from_path(path)
            .unwrap();
        reader
            .records()
            .map(|r| r.unwrap().iter().map(str::to_string).collect())
            .collect()
    }

    fn store() -> (TempDir, CsvStore) {
        let dir = TempDir::new().unwrap();
        let store = CsvStore::new(dir.path().join("out.csv"));
        (dir, store)
    }

    #[test]
    fn test_new_file_gets_header_and_rows() {
        let (_dir, store) = store();
        let written = store.append(&[record("Alpha", 1), record("Beta", 3)]).unwrap();
        assert_eq!(written, 2);

        let rows = read_rows(store.path());
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], DEFAULT_COLUMNS.iter().map(|c| c.to_string()).collect::<Vec<_>>());
        assert_eq!(rows[1][0], "Alpha");
        assert_eq!(rows[1][4], "https://maps.example/place/1");
        assert_eq!(rows[1][7], "4.5");
        assert_eq!(rows[1][8], "12");
        assert_eq!(rows[2][13], "3");
    }

    #[test]
    fn test_second_append_has_no_second_header() {
        let (_dir, store) = store();
        store.append(&[record("Alpha", 1)]).unwrap();
        store.append(&[record("Beta", 1)]).unwrap();

        let rows = read_rows(store.path());
        assert_eq!(rows.len(), 3);
        assert_eq!(rows.iter().filter(|r| r[0] == "name").count(), 1);
        assert_eq!(rows[2][0], "Beta");
    }

    #[test]
    fn test_existing_header_order_is_kept() {
        let (_dir, store) = store();
        fs::write(store.path(), "rank,name,notes\n7,Old Shop,kept\n").unwrap();

        store.append(&[record("Alpha", 2)]).unwrap();

        let rows = read_rows(store.path());
        assert_eq!(rows[0], vec!["rank", "name", "notes"]);
        assert_eq!(rows[1], vec!["7", "Old Shop", "kept"]);
        assert_eq!(rows[2], vec!["2", "Alpha", ""]);
    }

    #[test]
    fn test_empty_file_is_treated_as_new() {
        let (_dir, store) = store();
        fs::write(store.path(), "").unwrap();

        store.append(&[record("Alpha", 1)]).unwrap();

        let rows = read_rows(store.path());
        assert_eq!(rows[0][0], "name");
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_nothing_to_append_leaves_no_file() {
        let (_dir, store) = store();
        assert_eq!(store.append(&[]).unwrap(), 0);
        assert!(!store.path().exists());
    }

    #[test]
    fn test_text_with_commas_and_quotes_survives() {
        let (_dir, store) = store();
        let mut tricky = record("Bob's \"Best\" Bar, Grill", 1);
        tricky.recent_reviews = "Review 1: great | Review 2: loud, fun".to_string();
        store.append(&[tricky.clone()]).unwrap();

        let rows = read_rows(store.path());
        assert_eq!(rows[1][0], tricky.name);
        assert_eq!(rows[1][9], tricky.recent_reviews);
    }

    #[test]
    fn test_whole_number_rating_keeps_decimal() {
        let (_dir, store) = store();
        let mut whole = record("Alpha", 1);
        whole.reviews_average = Rating::new(4.0);
        store.append(&[whole]).unwrap();

        let rows = read_rows(store.path());
        assert_eq!(rows[1][7], "4.0");
    }

    #[test]
    fn test_new_file_header_is_exactly_the_default_columns() {
        let (_dir, store) = store();
        store.append(&[record("Alpha", 1)]).unwrap();

        let rows = read_rows(store.path());
        assert_eq!(rows[0].len(), DEFAULT_COLUMNS.len());
        assert_eq!(rows[1].len(), DEFAULT_COLUMNS.len());
    }
}
