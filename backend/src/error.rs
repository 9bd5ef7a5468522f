//! Error types for the GTIN collector pipeline.
//!
//! - [`CsvError`] - CSV reading, decoding and writing errors
//! - [`ValidationError`] - Input schema errors
//! - [`PipelineError`] - Top-level orchestration errors, one variant per stage
//!
//! Error conversion is automatic via `From` implementations where a stage has
//! no file context to add, so `?` works across error boundaries.

use std::path::PathBuf;
use thiserror::Error;

// =============================================================================
// CSV Errors
// =============================================================================

/// Errors while reading or writing CSV content.
#[derive(Debug, Error)]
pub enum CsvError {
    /// Failed to read or write the file.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Content is not valid in the requested encoding.
    #[error("Failed to decode content as {encoding}: {message}")]
    EncodingError { encoding: String, message: String },

    /// Invalid CSV format.
    #[error("Invalid CSV format: {0}")]
    ParseError(String),

    /// Empty file.
    #[error("CSV file is empty")]
    EmptyFile,

    /// No headers found.
    #[error("No headers found in CSV")]
    NoHeaders,
}

impl From<csv::Error> for CsvError {
    fn from(err: csv::Error) -> Self {
        if err.is_io_error() {
            if let csv::ErrorKind::Io(io) = err.into_kind() {
                return CsvError::IoError(io);
            }
            return CsvError::ParseError("unknown I/O failure".to_string());
        }
        CsvError::ParseError(err.to_string())
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors while checking an input table against its required columns.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// Required columns are absent (names are lower-cased and sorted).
    #[error("Missing columns in '{file}': {}", .missing.join(", "))]
    MissingColumns { file: String, missing: Vec<String> },
}

// =============================================================================
// Pipeline Errors (top-level)
// =============================================================================

/// Top-level pipeline errors.
///
/// This is the error type returned by [`crate::process_gtin_files`]. Every
/// variant is fatal for the run and no output file is produced.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// An input file does not exist.
    #[error("The file '{}' does not exist.", .path.display())]
    MissingFile { path: PathBuf },

    /// An input file exists but could not be read, decoded or parsed.
    #[error("Error reading '{}': {source}", .path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: CsvError,
    },

    /// An input file lacks required columns.
    #[error("{0}")]
    Schema(#[from] ValidationError),

    /// The output file could not be written.
    #[error("Error writing to '{}': {source}", .path.display())]
    FileWrite {
        path: PathBuf,
        #[source]
        source: CsvError,
    },
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for CSV operations.
pub type CsvResult<T> = Result<T, CsvError>;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;
