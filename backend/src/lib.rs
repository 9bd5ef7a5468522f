//! # GTIN Collector - customer GTIN reconciliation for catalog exports
//!
//! Merges a customer-supplied SKU/GTIN list into a catalog (metabase) product
//! export and writes a semicolon-delimited import file for the review
//! collector, filling the transactional columns with placeholders.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────┐   ┌───────────┐   ┌───────────┐   ┌──────────────┐
//! │ customer CSV │──▶│  Parser  │──▶│ Validate  │──▶│ Reconcile │──▶│   Project    │──▶ import CSV
//! │ catalog CSV  │   │ (enc.)   │   │ (columns) │   │ (join)    │   │ (+ placeh.)  │    (`;`)
//! └──────────────┘   └──────────┘   └───────────┘   └───────────┘   └──────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use gtin_collector::{process_gtin_files, ProcessOptions};
//! use std::path::Path;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let summary = process_gtin_files(
//!         Path::new("gtin_sku_from_customer.csv"),
//!         Path::new("metabase_product_export.csv"),
//!         Path::new("ready-to-review-collector.csv"),
//!         &ProcessOptions::default(),
//!     )?;
//!     println!("Wrote {} rows", summary.row_count);
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Error types
//! - [`models`] - Tables and record types
//! - [`parser`] - CSV loading and text encodings
//! - [`validation`] - Required-column checks
//! - [`transform`] - Join, projection and pipeline
//! - [`placeholder`] - Synthesized email/reference/date values
//! - [`export`] - Import file writer
//! - [`config`] - Default paths and environment keys
//! - [`logs`] - Run log output and capture

// Core modules
pub mod config;
pub mod error;
pub mod logs;
pub mod models;

// Input
pub mod parser;
pub mod validation;

// Transformation
pub mod placeholder;
pub mod transform;

// Output
pub mod export;

// =============================================================================
// Re-exports - Errors
// =============================================================================

pub use error::{CsvError, CsvResult, PipelineError, PipelineResult, ValidationError};

// =============================================================================
// Re-exports - Models and configuration
// =============================================================================

pub use config::GtinFiles;
pub use logs::{LogCapture, LogLevel, LogLine};
pub use models::{
    is_null_cell,
    CatalogRecord,
    CustomerGtinRecord,
    OutputRecord,
    ReconciledRecord,
    Table,
    NULL_TOKENS,
    OUTPUT_COLUMNS,
};

// =============================================================================
// Re-exports - Parsing and validation
// =============================================================================

pub use parser::{
    decode_content,
    detect_encoding,
    parse_bytes,
    parse_csv,
    read_csv_file,
    ParseResult,
    TextEncoding,
};
pub use validation::{has_columns, missing_columns, validate_columns};

// =============================================================================
// Re-exports - Transformation
// =============================================================================

pub use placeholder::{
    placeholder_source,
    FixedPlaceholders,
    IdentityMode,
    PlaceholderSource,
    RandomPlaceholders,
};
pub use transform::{
    check_file_exists,
    find_unmatched,
    merge_catalogs,
    prepare_output,
    process_gtin_files,
    reconcile,
    replace_gtin,
    run_pipeline,
    LogWarningSink,
    MissingGtinPolicy,
    ProcessOptions,
    ProcessSummary,
    UnmatchedSku,
    WarningSink,
};

// =============================================================================
// Re-exports - Output
// =============================================================================

pub use export::{render_csv, save_to_csv};
