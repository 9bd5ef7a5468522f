//! Writer for the review-collector import file.
//!
//! Output is `;`-delimited UTF-8 with a header row in [`OUTPUT_COLUMNS`]
//! order. The file is rendered in memory, written to a sibling temporary
//! file and renamed into place, so a failed write leaves no output behind.

use csv::WriterBuilder;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{CsvError, CsvResult};
use crate::models::{OutputRecord, OUTPUT_COLUMNS};

/// Field delimiter of the import file.
pub const OUTPUT_DELIMITER: u8 = b';';

/// Render records as CSV bytes, header included even with no rows.
pub fn render_csv(records: &[OutputRecord]) -> CsvResult<Vec<u8>> {
    let mut writer = WriterBuilder::new()
        .delimiter(OUTPUT_DELIMITER)
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(OUTPUT_COLUMNS)?;
    for record in records {
        writer.serialize(record)?;
    }

    writer.into_inner().map_err(|e| CsvError::IoError(e.into_error()))
}

/// Write records to `path`, replacing any existing file.
pub fn save_to_csv(records: &[OutputRecord], path: &Path) -> CsvResult<()> {
    let bytes = render_csv(records)?;
    let tmp = temp_path(path);

    if let Err(e) = fs::write(&tmp, &bytes).and_then(|_| fs::rename(&tmp, path)) {
        let _ = fs::remove_file(&tmp);
        return Err(CsvError::IoError(e));
    }
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
