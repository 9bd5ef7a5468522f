//! Projection of reconciled rows onto the review-collector import schema.

use crate::models::{OutputRecord, ReconciledRecord};
use crate::placeholder::PlaceholderSource;

/// Build one [`OutputRecord`] per reconciled row.
///
/// Identity and transaction columns come from `source`, one call per column
/// per row. Product columns pass through; null values become empty strings.
pub fn prepare_output(
    records: &[ReconciledRecord],
    source: &mut dyn PlaceholderSource,
) -> Vec<OutputRecord> {
    records
        .iter()
        .map(|record| OutputRecord {
            email: source.email(),
            reference: source.reference(),
            first_name: source.first_name(),
            last_name: source.last_name(),
            transaction_date: source.transaction_date(),
            product_name: text(&record.name),
            product_sku: text(&record.sku),
            product_url: text(&record.url),
            product_image_url: text(&record.image_url),
            product_brand: text(&record.brand),
            product_gtin: text(&record.final_gtin),
            product_mpn: text(&record.mpn),
        })
        .collect()
}

fn text(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}
