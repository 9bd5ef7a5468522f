//! Catalog / customer GTIN reconciliation.
//!
//! The catalog export is left-joined to the customer file on `sku`. Every
//! catalog row survives; a catalog row whose SKU appears several times in the
//! customer file fans out into one row per match, in customer file order.
//! A null SKU is a key like any other: catalog rows without a SKU join the
//! customer rows without a SKU.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::logs::{log_info_indent, log_warning};
use crate::models::{CatalogRecord, CustomerGtinRecord, ReconciledRecord};

/// What `final_gtin` becomes when a row has no customer GTIN.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingGtinPolicy {
    /// Keep the catalog's own GTIN
    #[default]
    Catalog,
    /// Leave the GTIN empty
    Empty,
}

impl fmt::Display for MissingGtinPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MissingGtinPolicy::Catalog => f.write_str("catalog"),
            MissingGtinPolicy::Empty => f.write_str("empty"),
        }
    }
}

impl FromStr for MissingGtinPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "catalog" | "fallback" => Ok(MissingGtinPolicy::Catalog),
            "empty" => Ok(MissingGtinPolicy::Empty),
            other => Err(format!(
                "unknown missing-GTIN policy '{}' (expected catalog or empty)",
                other
            )),
        }
    }
}

/// Left join of catalog rows to customer rows on `sku`.
///
/// `final_gtin` is left unset; see [`replace_gtin`].
pub fn merge_catalogs(
    catalog: &[CatalogRecord],
    customer: &[CustomerGtinRecord],
) -> Vec<ReconciledRecord> {
    let mut by_sku: HashMap<Option<&str>, Vec<Option<&str>>> = HashMap::new();
    for row in customer {
        by_sku.entry(row.sku.as_deref()).or_default().push(row.gtin.as_deref());
    }

    let mut merged = Vec::with_capacity(catalog.len());
    for row in catalog {
        let joined = |gtin_customer: Option<&str>| ReconciledRecord {
            sku: row.sku.clone(),
            name: row.name.clone(),
            url: row.url.clone(),
            image_url: row.image_url.clone(),
            mpn: row.mpn.clone(),
            brand: row.brand.clone(),
            gtin_metabase: row.gtin.clone(),
            gtin_customer: gtin_customer.map(str::to_string),
            final_gtin: None,
        };

        match by_sku.get(&row.sku.as_deref()) {
            Some(matches) => merged.extend(matches.iter().map(|gtin| joined(*gtin))),
            None => merged.push(joined(None)),
        }
    }

    merged
}

/// Set `final_gtin` on every row: the customer GTIN when present, otherwise
/// whatever `policy` dictates.
pub fn replace_gtin(
    records: Vec<ReconciledRecord>,
    policy: MissingGtinPolicy,
) -> Vec<ReconciledRecord> {
    records
        .into_iter()
        .map(|record| {
            let final_gtin = match (&record.gtin_customer, policy) {
                (Some(customer), _) => Some(customer.clone()),
                (None, MissingGtinPolicy::Catalog) => record.gtin_metabase.clone(),
                (None, MissingGtinPolicy::Empty) => None,
            };
            ReconciledRecord { final_gtin, ..record }
        })
        .collect()
}

/// Join and resolve GTINs in one step.
pub fn reconcile(
    catalog: &[CatalogRecord],
    customer: &[CustomerGtinRecord],
    policy: MissingGtinPolicy,
) -> Vec<ReconciledRecord> {
    replace_gtin(merge_catalogs(catalog, customer), policy)
}

// =============================================================================
// Unmatched SKUs
// =============================================================================

/// A catalog row that got no GTIN from the customer file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnmatchedSku {
    pub sku: String,
    pub name: String,
}

/// Rows without a customer GTIN, in catalog order.
pub fn find_unmatched(records: &[ReconciledRecord]) -> Vec<UnmatchedSku> {
    records
        .iter()
        .filter(|r| r.gtin_customer.is_none())
        .map(|r| UnmatchedSku {
            sku: r.sku.clone().unwrap_or_default(),
            name: r.name.clone().unwrap_or_default(),
        })
        .collect()
}

/// Receives the unmatched-SKU report. Reporting never fails the run.
pub trait WarningSink {
    fn unmatched_skus(&self, rows: &[UnmatchedSku], catalog_file: &Path, customer_file: &Path);
}

/// Writes the report to the pipeline log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogWarningSink;

impl WarningSink for LogWarningSink {
    fn unmatched_skus(&self, rows: &[UnmatchedSku], catalog_file: &Path, customer_file: &Path) {
        if rows.is_empty() {
            return;
        }
        log_warning(format!(
            "The following {} SKUs from '{}' do not have corresponding GTINs in '{}':",
            rows.len(),
            catalog_file.display(),
            customer_file.display()
        ));
        for row in rows {
            log_info_indent(format!("{}  {}", row.sku, row.name), 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog_row(sku: &str, gtin: &str, name: &str) -> CatalogRecord {
        CatalogRecord {
            sku: Some(sku.into()),
            gtin: Some(gtin.into()),
            name: Some(name.into()),
            ..Default::default()
        }
    }

    fn customer_row(sku: &str, gtin: &str) -> CustomerGtinRecord {
        CustomerGtinRecord {
            sku: Some(sku.into()),
            gtin: if gtin.is_empty() { None } else { Some(gtin.into()) },
        }
    }

    fn catalog() -> Vec<CatalogRecord> {
        vec![
            catalog_row("SKU123", "0123456789123", "Product A"),
            catalog_row("SKU456", "9876543210987", "Product B"),
            catalog_row("SKU789", "5555555555555", "Product C"),
        ]
    }

    #[test]
    fn test_merge_keeps_every_catalog_row() {
        let customer = vec![
            customer_row("SKU123", "0123456789123"),
            customer_row("SKU456", "9876543210987"),
        ];
        let merged = merge_catalogs(&catalog(), &customer);

        assert_eq!(merged.len(), 3);
        assert_eq!(merged[2].sku.as_deref(), Some("SKU789"));
        assert_eq!(merged[2].gtin_customer, None);
        assert_eq!(merged[2].gtin_metabase.as_deref(), Some("5555555555555"));
    }

    #[test]
    fn test_customer_gtin_wins() {
        let customer = vec![customer_row("SKU456", "4006381333931")];
        let records = reconcile(&catalog(), &customer, MissingGtinPolicy::Catalog);

        assert_eq!(records[1].final_gtin.as_deref(), Some("4006381333931"));
        assert_eq!(records[1].gtin_metabase.as_deref(), Some("9876543210987"));
        assert_eq!(records[0].final_gtin.as_deref(), Some("0123456789123"));
    }

    #[test]
    fn test_replace_gtin_coalesces() {
        let merged = vec![
            ReconciledRecord {
                gtin_metabase: Some("0123456789123".into()),
                gtin_customer: Some("0123456789123".into()),
                ..Default::default()
            },
            ReconciledRecord {
                gtin_metabase: Some("5555555555555".into()),
                gtin_customer: None,
                ..Default::default()
            },
        ];
        let resolved = replace_gtin(merged, MissingGtinPolicy::Catalog);
        let finals: Vec<_> = resolved.iter().map(|r| r.final_gtin.as_deref()).collect();
        assert_eq!(finals, vec![Some("0123456789123"), Some("5555555555555")]);
    }

    #[test]
    fn test_empty_policy_leaves_gtin_blank() {
        let records = reconcile(&catalog(), &[], MissingGtinPolicy::Empty);
        assert!(records.iter().all(|r| r.final_gtin.is_none()));
    }

    #[test]
    fn test_empty_customer_gtin_falls_back() {
        let customer = vec![customer_row("SKU123", "")];
        let records = reconcile(&catalog(), &customer, MissingGtinPolicy::Catalog);

        assert_eq!(records[0].gtin_customer, None);
        assert_eq!(records[0].final_gtin.as_deref(), Some("0123456789123"));
    }

    #[test]
    fn test_duplicate_customer_skus_fan_out() {
        let customer = vec![
            customer_row("SKU123", "1111111111111"),
            customer_row("SKU123", "2222222222222"),
        ];
        let merged = merge_catalogs(&catalog(), &customer);

        assert_eq!(merged.len(), 4);
        assert_eq!(merged[0].gtin_customer.as_deref(), Some("1111111111111"));
        assert_eq!(merged[1].gtin_customer.as_deref(), Some("2222222222222"));
        assert_eq!(merged[2].sku.as_deref(), Some("SKU456"));
    }

    #[test]
    fn test_duplicate_catalog_skus_each_join() {
        let mut rows = catalog();
        rows.push(catalog_row("SKU123", "0123456789123", "Product A (copy)"));
        let customer = vec![customer_row("SKU123", "7777777777777")];
        let records = reconcile(&rows, &customer, MissingGtinPolicy::Catalog);

        assert_eq!(records.len(), 4);
        assert_eq!(records[0].final_gtin.as_deref(), Some("7777777777777"));
        assert_eq!(records[3].final_gtin.as_deref(), Some("7777777777777"));
    }

    #[test]
    fn test_null_skus_join_each_other() {
        let mut rows = catalog();
        rows.push(CatalogRecord { gtin: Some("1".into()), ..Default::default() });
        let customer = vec![CustomerGtinRecord { sku: None, gtin: Some("2".into()) }];
        let records = reconcile(&rows, &customer, MissingGtinPolicy::Catalog);

        assert_eq!(records.len(), 4);
        assert_eq!(records[3].sku, None);
        assert_eq!(records[3].gtin_customer.as_deref(), Some("2"));
        assert_eq!(records[3].final_gtin.as_deref(), Some("2"));
        assert!(records[..3].iter().all(|r| r.gtin_customer.is_none()));
    }

    #[test]
    fn test_null_sku_without_customer_counterpart() {
        let rows = vec![CatalogRecord { gtin: Some("1".into()), ..Default::default() }];
        let customer = vec![customer_row("SKU123", "0123456789123")];
        let records = reconcile(&rows, &customer, MissingGtinPolicy::Catalog);

        assert_eq!(records[0].final_gtin.as_deref(), Some("1"));
        assert_eq!(find_unmatched(&records).len(), 1);
    }

    #[test]
    fn test_find_unmatched() {
        let customer = vec![customer_row("SKU123", "0123456789123")];
        let records = merge_catalogs(&catalog(), &customer);
        let unmatched = find_unmatched(&records);

        assert_eq!(
            unmatched,
            vec![
                UnmatchedSku { sku: "SKU456".into(), name: "Product B".into() },
                UnmatchedSku { sku: "SKU789".into(), name: "Product C".into() },
            ]
        );
    }

    #[test]
    fn test_missing_gtin_policy_from_str() {
        assert_eq!("catalog".parse::<MissingGtinPolicy>().unwrap(), MissingGtinPolicy::Catalog);
        assert_eq!("EMPTY".parse::<MissingGtinPolicy>().unwrap(), MissingGtinPolicy::Empty);
        assert!("drop".parse::<MissingGtinPolicy>().is_err());
    }
}
