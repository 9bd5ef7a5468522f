//! Run configuration.
//!
//! File paths default to the names the export tooling produces in the
//! working directory; the CLI overrides them from flags or environment.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Customer SKU/GTIN override file.
pub const DEFAULT_CUSTOMER_FILE: &str = "gtin_sku_from_customer.csv";

/// Catalog (metabase) product export.
pub const DEFAULT_CATALOG_FILE: &str = "metabase_product_export.csv";

/// Review-collector import file.
pub const DEFAULT_OUTPUT_FILE: &str = "ready-to-review-collector.csv";

/// Environment variables read by the CLI (also from a `.env` file).
pub const ENV_CUSTOMER_FILE: &str = "GTIN_CUSTOMER_FILE";
pub const ENV_CATALOG_FILE: &str = "GTIN_CATALOG_FILE";
pub const ENV_OUTPUT_FILE: &str = "GTIN_OUTPUT_FILE";

/// The three files of one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GtinFiles {
    pub customer: PathBuf,
    pub catalog: PathBuf,
    pub output: PathBuf,
}

impl GtinFiles {
    pub fn new(
        customer: impl Into<PathBuf>,
        catalog: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
    ) -> Self {
        Self {
            customer: customer.into(),
            catalog: catalog.into(),
            output: output.into(),
        }
    }
}

impl Default for GtinFiles {
    fn default() -> Self {
        Self::new(DEFAULT_CUSTOMER_FILE, DEFAULT_CATALOG_FILE, DEFAULT_OUTPUT_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_files() {
        let files = GtinFiles::default();
        assert_eq!(files.customer, PathBuf::from("gtin_sku_from_customer.csv"));
        assert_eq!(files.catalog, PathBuf::from("metabase_product_export.csv"));
        assert_eq!(files.output, PathBuf::from("ready-to-review-collector.csv"));
    }
}
