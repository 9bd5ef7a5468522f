//! Required-column validation for input tables.
//!
//! Column names are compared case-insensitively. The table is only read,
//! never modified; lower-casing happens afterwards via
//! [`Table::with_lowercase_headers`].

use std::collections::BTreeSet;
use std::path::Path;

use crate::error::ValidationError;
use crate::models::Table;

/// Check that every required column is present in `table`.
///
/// # Returns
/// * `Ok(())` if all columns are present
/// * `Err(ValidationError::MissingColumns)` listing the missing names,
///   lower-cased and sorted, together with `file`
///
/// # Example
/// ```ignore
/// let table = parse_csv("GTIN,product_code\n123,A1\n", b',')?;
/// let err = validate_columns(&table, &["gtin", "sku"], Path::new("customer.csv")).unwrap_err();
/// assert_eq!(err.to_string(), "Missing columns in 'customer.csv': sku");
/// ```
pub fn validate_columns(
    table: &Table,
    required: &[&str],
    file: &Path,
) -> Result<(), ValidationError> {
    let missing = missing_columns(table, required);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::MissingColumns {
            file: file.display().to_string(),
            missing,
        })
    }
}

/// Required columns absent from `table`, lower-cased and sorted.
pub fn missing_columns(table: &Table, required: &[&str]) -> Vec<String> {
    let present: BTreeSet<String> = table.headers.iter().map(|h| h.to_lowercase()).collect();

    required
        .iter()
        .map(|c| c.to_lowercase())
        .filter(|c| !present.contains(c))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Quick check: are all required columns present?
pub fn has_columns(table: &Table, required: &[&str]) -> bool {
    missing_columns(table, required).is_empty()
}
