use std::fmt;

use serde::{Deserialize, Serialize};

/// Placeholder name given to a record whose name could not be extracted.
pub const UNKNOWN_NAME: &str = "Unknown Business";
pub const NO_HOURS: &str = "Not available";
pub const NO_DESCRIPTION: &str = "None Found";
pub const NO_REVIEWS: &str = "No reviews found";

/// Preferred column order for persisted records.
pub const DEFAULT_COLUMNS: [&str; 14] = [
    "name",
    "business_type",
    "location_area",
    "address",
    "google_maps_url",
    "website",
    "phone_number",
    "reviews_average",
    "reviews_count",
    "last_3_reviews",
    "opening_hours",
    "description",
    "keyword",
    "rank",
];

/// Average star rating, always within `[0, 5]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Rating(f64);

impl Rating {
    pub const MAX: f64 = 5.0;

    /// Returns `None` for non-finite or out-of-range values.
    pub fn new(value: f64) -> Option<Self> {
        (value.is_finite() && (0.0..=Self::MAX).contains(&value)).then_some(Self(value))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Rating {
    type Error = String;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("rating out of range: {}", value))
    }
}

impl From<Rating> for f64 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Always at least one decimal place: 4 is written as "4.0".
        write!(f, "{:?}", self.0)
    }
}

/// One business as shown in a detail view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BusinessRecord {
    pub name: String,
    pub address: String,
    pub website: String,
    pub phone_number: String,
    pub detail_url: String,
    pub location_area: String,
    pub reviews_count: Option<u64>,
    pub reviews_average: Option<Rating>,
    pub recent_reviews: String,
    pub business_type: String,
    pub opening_hours: String,
    pub description: String,
    pub search_keyword: String,
    /// 1-based listing position; 0 until the orchestrator assigns it.
    pub rank: usize,
}

impl BusinessRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Identity used for deduplication: raw `(name, address)`.
    pub fn identity_key(&self) -> (&str, &str) {
        (&self.name, &self.address)
    }

    pub fn has_valid_name(&self) -> bool {
        !self.name.is_empty() && self.name != UNKNOWN_NAME
    }

    /// Field values keyed by column name, in [`DEFAULT_COLUMNS`] order.
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        let opt = |v: Option<String>| v.unwrap_or_default();
        vec![
            ("name", self.name.clone()),
            ("business_type", self.business_type.clone()),
            ("location_area", self.location_area.clone()),
            ("address", self.address.clone()),
            ("google_maps_url", self.detail_url.clone()),
            ("website", self.website.clone()),
            ("phone_number", self.phone_number.clone()),
            ("reviews_average", opt(self.reviews_average.map(|r| r.to_string()))),
            ("reviews_count", opt(self.reviews_count.map(|c| c.to_string()))),
            ("last_3_reviews", self.recent_reviews.clone()),
            ("opening_hours", self.opening_hours.clone()),
            ("description", self.description.clone()),
            ("keyword", self.search_keyword.clone()),
            ("rank", self.rank.to_string()),
        ]
    }

    pub fn display_rating(&self) -> Option<String> {
        let avg = self.reviews_average?;
        Some(match self.reviews_count {
            Some(count) => format!("{} ({} reviews)", avg, count),
            None => avg.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_range() {
        assert!(Rating::new(0.0).is_some());
        assert!(Rating::new(4.7).is_some());
        assert!(Rating::new(5.0).is_some());
        assert!(Rating::new(5.1).is_none());
        assert!(Rating::new(-0.5).is_none());
        assert!(Rating::new(f64::NAN).is_none());
        assert!(Rating::new(f64::INFINITY).is_none());
    }

    #[test]
    fn test_rating_display_keeps_a_decimal() {
        assert_eq!(Rating::new(4.0).unwrap().to_string(), "4.0");
        assert_eq!(Rating::new(4.7).unwrap().to_string(), "4.7");
        assert_eq!(Rating::new(0.0).unwrap().to_string(), "0.0");
    }

    #[test]
    fn test_valid_name() {
        let mut record = BusinessRecord::new();
        assert!(!record.has_valid_name());

        record.name = UNKNOWN_NAME.into();
        assert!(!record.has_valid_name());

        record.name = "Cafe Uno".into();
        assert!(record.has_valid_name());
    }

    #[test]
    fn test_fields_follow_default_columns() {
        let record = BusinessRecord::new();
        let names: Vec<_> = record.fields().into_iter().map(|(k, _)| k).collect();
        assert_eq!(names, DEFAULT_COLUMNS.to_vec());
    }

    #[test]
    fn test_fields_render_absent_numbers_empty() {
        let mut record = BusinessRecord::new();
        record.rank = 3;
        let fields = record.fields();
        let get = |key: &str| fields.iter().find(|(k, _)| *k == key).unwrap().1.clone();
        assert_eq!(get("reviews_average"), "");
        assert_eq!(get("reviews_count"), "");
        assert_eq!(get("rank"), "3");

        record.reviews_average = Rating::new(4.5);
        record.reviews_count = Some(1234);
        let fields = record.fields();
        let get = |key: &str| fields.iter().find(|(k, _)| *k == key).unwrap().1.clone();
        assert_eq!(get("reviews_average"), "4.5");
        assert_eq!(get("reviews_count"), "1234");
    }

    #[test]
    fn test_display_rating() {
        let mut record = BusinessRecord::new();
        assert_eq!(record.display_rating(), None);

        record.reviews_average = Rating::new(4.2);
        assert_eq!(record.display_rating().as_deref(), Some("4.2"));

        record.reviews_count = Some(87);
        assert_eq!(record.display_rating().as_deref(), Some("4.2 (87 reviews)"));
    }
}
