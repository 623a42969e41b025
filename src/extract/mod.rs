//! Field and record extraction from an open detail view.
//!
//! Extraction is total: every step degrades to an empty value or a fixed
//! sentinel instead of failing, so one odd listing never costs the run.

mod area;
mod field;
mod numeric;
mod record;
mod reviews;

pub use area::location_area;
pub use field::FieldExtractor;
pub use numeric::{parse_reviews_average, parse_reviews_count};
pub use record::RecordExtractor;
pub use reviews::{collect_reviews, excerpt};
