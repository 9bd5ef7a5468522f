//! Domain models for the GTIN collector pipeline.
//!
//! - [`Table`] - An all-text table as read from a CSV file
//! - [`CatalogRecord`] - One row of the catalog (metabase) product export
//! - [`CustomerGtinRecord`] - One row of the customer SKU/GTIN override file
//! - [`ReconciledRecord`] - A catalog row joined with its customer GTIN
//! - [`OutputRecord`] - One row of the review-collector import file
//!
//! Empty cells and the usual missing-value markers ([`NULL_TOKENS`]) are
//! treated as null (`None`) throughout.

use serde::Serialize;

// =============================================================================
// Table
// =============================================================================

/// Cell values read as null, compared exactly (no trimming, case-sensitive).
///
/// This is the default missing-value set of dataframe CSV readers, so a
/// customer GTIN of `N/A` counts as "no GTIN" instead of replacing the
/// catalog value.
pub const NULL_TOKENS: [&str; 19] = [
    "",
    "#N/A",
    "#N/A N/A",
    "#NA",
    "-1.#IND",
    "-1.#QNAN",
    "-NaN",
    "-nan",
    "1.#IND",
    "1.#QNAN",
    "<NA>",
    "N/A",
    "NA",
    "NULL",
    "NaN",
    "None",
    "n/a",
    "nan",
    "null",
];

pub fn is_null_cell(value: &str) -> bool {
    NULL_TOKENS.contains(&value)
}

/// An in-memory table where every cell is text.
///
/// Rows are always as wide as the header; short rows are padded with empty
/// cells by the parser.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of the first column named exactly `name`.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Cell value, or `None` when the column is absent or the cell is null.
    pub fn value(&self, row: usize, column: &str) -> Option<&str> {
        let idx = self.column_index(column)?;
        self.rows
            .get(row)
            .and_then(|r| r.get(idx))
            .map(String::as_str)
            .filter(|v| !is_null_cell(v))
    }

    /// A copy of this table with every column name lower-cased.
    pub fn with_lowercase_headers(&self) -> Table {
        Table {
            headers: self.headers.iter().map(|h| h.to_lowercase()).collect(),
            rows: self.rows.clone(),
        }
    }
}

// =============================================================================
// Input Records
// =============================================================================

/// One row of the catalog product export.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogRecord {
    pub sku: Option<String>,
    pub gtin: Option<String>,
    pub name: Option<String>,
    pub url: Option<String>,
    pub image_url: Option<String>,
    pub mpn: Option<String>,
    pub brand: Option<String>,
}

impl CatalogRecord {
    /// Columns the catalog export must provide.
    pub const REQUIRED_COLUMNS: [&'static str; 7] =
        ["sku", "gtin", "name", "url", "image_url", "mpn", "brand"];

    /// Read records from a table whose headers are already lower-cased.
    pub fn from_table(table: &Table) -> Vec<CatalogRecord> {
        (0..table.len())
            .map(|row| {
                let get = |col: &str| table.value(row, col).map(str::to_string);
                CatalogRecord {
                    sku: get("sku"),
                    gtin: get("gtin"),
                    name: get("name"),
                    url: get("url"),
                    image_url: get("image_url"),
                    mpn: get("mpn"),
                    brand: get("brand"),
                }
            })
            .collect()
    }
}

/// One row of the customer override file. Extra columns are ignored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomerGtinRecord {
    pub sku: Option<String>,
    pub gtin: Option<String>,
}

impl CustomerGtinRecord {
    /// Columns the customer file must provide.
    pub const REQUIRED_COLUMNS: [&'static str; 2] = ["gtin", "sku"];

    /// Read records from a table whose headers are already lower-cased.
    pub fn from_table(table: &Table) -> Vec<CustomerGtinRecord> {
        (0..table.len())
            .map(|row| CustomerGtinRecord {
                sku: table.value(row, "sku").map(str::to_string),
                gtin: table.value(row, "gtin").map(str::to_string),
            })
            .collect()
    }
}

// =============================================================================
// Reconciled Record
// =============================================================================

/// A catalog row after the left join with the customer file.
///
/// The catalog GTIN and customer GTIN collide on name in the join, so they are
/// kept as `gtin_metabase` and `gtin_customer`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReconciledRecord {
    pub sku: Option<String>,
    pub name: Option<String>,
    pub url: Option<String>,
    pub image_url: Option<String>,
    pub mpn: Option<String>,
    pub brand: Option<String>,
    pub gtin_metabase: Option<String>,
    /// `None` when no customer row matched (or the matched GTIN was empty)
    pub gtin_customer: Option<String>,
    pub final_gtin: Option<String>,
}

// =============================================================================
// Output Record
// =============================================================================

/// Output column names, in file order.
pub const OUTPUT_COLUMNS: [&str; 12] = [
    "email",
    "reference",
    "firstName",
    "lastName",
    "transactionDate",
    "productName",
    "productSku",
    "productUrl",
    "productImageUrl",
    "productBrand",
    "productGtin",
    "productMpn",
];

/// One row of the review-collector import file.
///
/// Field order matches [`OUTPUT_COLUMNS`]; the CSV writer relies on it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputRecord {
    pub email: String,
    pub reference: String,
    pub first_name: String,
    pub last_name: String,
    pub transaction_date: String,
    pub product_name: String,
    pub product_sku: String,
    pub product_url: String,
    pub product_image_url: String,
    pub product_brand: String,
    pub product_gtin: String,
    pub product_mpn: String,
}

impl OutputRecord {
    /// Values in [`OUTPUT_COLUMNS`] order.
    pub fn fields(&self) -> [&str; 12] {
        [
            &self.email,
            &self.reference,
            &self.first_name,
            &self.last_name,
            &self.transaction_date,
            &self.product_name,
            &self.product_sku,
            &self.product_url,
            &self.product_image_url,
            &self.product_brand,
            &self.product_gtin,
            &self.product_mpn,
        ]
    }
}
