use tracing::debug;

use crate::config::ExtractionConfig;
use crate::domain::{BusinessRecord, NO_DESCRIPTION, NO_HOURS, UNKNOWN_NAME};
use crate::extract::{
    collect_reviews, location_area, parse_reviews_average, parse_reviews_count, FieldExtractor,
};
use crate::view::View;

/// Builds a [`BusinessRecord`] from the detail view currently open.
pub struct RecordExtractor<'a> {
    config: &'a ExtractionConfig,
}

impl<'a> RecordExtractor<'a> {
    pub fn new(config: &'a ExtractionConfig) -> Self {
        Self { config }
    }

    /// Always produces a record. Fields that cannot be read are left empty,
    /// absent, or set to their sentinel; `search_keyword` and `rank` are left
    /// for the caller.
    pub async fn extract_record<V: View>(&self, view: &V) -> BusinessRecord {
        let config = self.config;
        let fields = FieldExtractor::new(view);
        let mut record = BusinessRecord::new();

        record.name = fields
            .lookup(&config.name)
            .await
            .unwrap_or_else(|| UNKNOWN_NAME.to_string());
        record.address = fields.extract(&config.address).await;
        record.website = fields.extract(&config.website).await;
        record.phone_number = fields.extract(&config.phone).await;
        record.business_type = fields.extract(&config.business_type).await;
        record.location_area = location_area(&record.address);

        record.reviews_count = fields
            .lookup(&config.reviews_count)
            .await
            .and_then(|raw| parse_reviews_count(&raw));
        record.reviews_average = fields
            .lookup(&config.reviews_average)
            .await
            .and_then(|raw| parse_reviews_average(&raw));

        record.opening_hours = self.opening_hours(&fields).await;
        record.description = fields
            .lookup(&config.description)
            .await
            .unwrap_or_else(|| NO_DESCRIPTION.to_string());

        record.detail_url = match view.current_url().await {
            Ok(url) => url,
            Err(e) => {
                debug!(error = %e, "detail url unavailable");
                String::new()
            }
        };

        record.recent_reviews = collect_reviews(view, &config.reviews).await;

        record
    }

    async fn opening_hours<V: View>(&self, fields: &FieldExtractor<'_, V>) -> String {
        let min_len = self.config.hours_min_length;
        if let Some(hours) = fields
            .lookup_where(&self.config.opening_hours, |text| text.chars().count() > min_len)
            .await
        {
            return hours;
        }

        fields
            .lookup(&self.config.hours_status)
            .await
            .unwrap_or_else(|| NO_HOURS.to_string())
    }
}
