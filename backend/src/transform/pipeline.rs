//! End-to-end GTIN collector pipeline.
//!
//! ```text
//! check files → load customer → validate → lower-case
//!             → load catalog  → validate → lower-case
//!             → join + replace GTIN → project → write
//! ```
//!
//! Every stage fails fast and aborts the run before the output is written.
//!
//! # Example
//!
//! ```rust,ignore
//! use gtin_collector::{process_gtin_files, ProcessOptions};
//! use std::path::Path;
//!
//! let summary = process_gtin_files(
//!     Path::new("gtin_sku_from_customer.csv"),
//!     Path::new("metabase_product_export.csv"),
//!     Path::new("ready-to-review-collector.csv"),
//!     &ProcessOptions::default(),
//! )?;
//! println!("{} rows written", summary.row_count);
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::project::prepare_output;
use super::reconcile::{
    find_unmatched, reconcile, LogWarningSink, MissingGtinPolicy, UnmatchedSku, WarningSink,
};
use crate::config::GtinFiles;
use crate::error::{PipelineError, PipelineResult};
use crate::export::save_to_csv;
use crate::logs::{log_info, log_success};
use crate::models::{CatalogRecord, CustomerGtinRecord, OutputRecord, Table};
use crate::parser::{read_csv_file, TextEncoding};
use crate::placeholder::{placeholder_source, IdentityMode, PlaceholderSource};
use crate::validation::validate_columns;

/// Options for the pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessOptions {
    /// Encoding of the customer file
    pub customer_encoding: TextEncoding,

    /// Encoding of the catalog export
    pub catalog_encoding: TextEncoding,

    /// How email, reference, names and date are filled
    pub identity_mode: IdentityMode,

    /// GTIN for catalog rows without a customer GTIN
    pub missing_gtin: MissingGtinPolicy,

    /// Run every stage except writing the output file
    pub dry_run: bool,
}

impl Default for ProcessOptions {
    fn default() -> Self {
        Self {
            customer_encoding: TextEncoding::Utf8,
            catalog_encoding: TextEncoding::Latin1,
            identity_mode: IdentityMode::Random,
            missing_gtin: MissingGtinPolicy::Catalog,
            dry_run: false,
        }
    }
}

/// Result of a pipeline run
#[derive(Debug, Clone)]
pub struct ProcessSummary {
    pub output: PathBuf,
    /// Rows in the output (one per reconciled row)
    pub row_count: usize,
    /// Catalog rows that got no customer GTIN
    pub unmatched: Vec<UnmatchedSku>,
    pub customer_encoding: TextEncoding,
    pub catalog_encoding: TextEncoding,
    /// False for a dry run
    pub written: bool,
    pub records: Vec<OutputRecord>,
}

/// Process the customer and catalog files into the import file.
///
/// Placeholders come from `options.identity_mode`; unmatched SKUs are
/// reported to the pipeline log.
pub fn process_gtin_files(
    customer_file: &Path,
    catalog_file: &Path,
    output_file: &Path,
    options: &ProcessOptions,
) -> PipelineResult<ProcessSummary> {
    let files = GtinFiles::new(customer_file, catalog_file, output_file);
    let mut source = placeholder_source(options.identity_mode);
    run_pipeline(&files, options, source.as_mut(), &LogWarningSink)
}

/// Run the pipeline with explicit placeholder source and warning sink.
pub fn run_pipeline(
    files: &GtinFiles,
    options: &ProcessOptions,
    source: &mut dyn PlaceholderSource,
    sink: &dyn WarningSink,
) -> PipelineResult<ProcessSummary> {
    check_file_exists(&files.customer)?;
    check_file_exists(&files.catalog)?;

    log_info(format!("📖 Reading customer GTINs: {}", files.customer.display()));
    let (customer_table, customer_encoding) = load_table(
        &files.customer,
        options.customer_encoding,
        &CustomerGtinRecord::REQUIRED_COLUMNS,
    )?;
    let customer = CustomerGtinRecord::from_table(&customer_table);
    log_success(format!("Read {} customer rows ({})", customer.len(), customer_encoding));

    log_info(format!("📖 Reading catalog export: {}", files.catalog.display()));
    let (catalog_table, catalog_encoding) = load_table(
        &files.catalog,
        options.catalog_encoding,
        &CatalogRecord::REQUIRED_COLUMNS,
    )?;
    let catalog = CatalogRecord::from_table(&catalog_table);
    log_success(format!("Read {} catalog rows ({})", catalog.len(), catalog_encoding));

    log_info(format!("🔗 Merging on SKU (missing GTIN policy: {})...", options.missing_gtin));
    let reconciled = reconcile(&catalog, &customer, options.missing_gtin);
    let unmatched = find_unmatched(&reconciled);
    sink.unmatched_skus(&unmatched, &files.catalog, &files.customer);
    log_success(format!(
        "{} rows, {} with customer GTIN",
        reconciled.len(),
        reconciled.len() - unmatched.len()
    ));

    log_info(format!("⚙️  Preparing output ({} placeholders)...", options.identity_mode));
    let records = prepare_output(&reconciled, source);

    let written = if options.dry_run {
        log_info(format!("Dry run: {} not written", files.output.display()));
        false
    } else {
        save_to_csv(&records, &files.output).map_err(|err| PipelineError::FileWrite {
            path: files.output.clone(),
            source: err,
        })?;
        log_success(format!("💾 Wrote {} rows to {}", records.len(), files.output.display()));
        true
    };

    Ok(ProcessSummary {
        output: files.output.clone(),
        row_count: records.len(),
        unmatched,
        customer_encoding,
        catalog_encoding,
        written,
        records,
    })
}

/// Fail with [`PipelineError::MissingFile`] if `path` does not exist.
pub fn check_file_exists(path: &Path) -> PipelineResult<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(PipelineError::MissingFile { path: path.to_path_buf() })
    }
}

/// Read, validate and lower-case one input file.
fn load_table(
    path: &Path,
    encoding: TextEncoding,
    required: &[&str],
) -> PipelineResult<(Table, TextEncoding)> {
    let parsed = read_csv_file(path, encoding).map_err(|source| PipelineError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    validate_columns(&parsed.table, required, path)?;

    Ok((parsed.table.with_lowercase_headers(), parsed.encoding))
}
