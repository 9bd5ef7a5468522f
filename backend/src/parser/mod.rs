//! CSV loading with explicit or detected text encoding.
//!
//! Every cell is kept as text: GTINs such as `0123456789123` must never be
//! coerced to numbers. Column names are trimmed, cell values are not.

use csv::{ReaderBuilder, Trim};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::{CsvError, CsvResult};
use crate::models::Table;

/// Field delimiter of both input files.
pub const INPUT_DELIMITER: u8 = b',';

/// Text encoding of an input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextEncoding {
    #[serde(rename = "utf-8", alias = "utf8")]
    Utf8,
    /// ISO-8859-1
    #[serde(rename = "iso-8859-1", alias = "latin-1", alias = "latin1")]
    Latin1,
    #[serde(rename = "windows-1252", alias = "cp1252")]
    Windows1252,
    /// Detect from the file content
    #[serde(rename = "auto")]
    Auto,
}

impl TextEncoding {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextEncoding::Utf8 => "utf-8",
            TextEncoding::Latin1 => "iso-8859-1",
            TextEncoding::Windows1252 => "windows-1252",
            TextEncoding::Auto => "auto",
        }
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TextEncoding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "utf-8" | "utf8" => Ok(TextEncoding::Utf8),
            "iso-8859-1" | "latin-1" | "latin1" => Ok(TextEncoding::Latin1),
            "windows-1252" | "cp1252" => Ok(TextEncoding::Windows1252),
            "auto" => Ok(TextEncoding::Auto),
            other => Err(format!(
                "unsupported encoding '{}' (expected utf-8, iso-8859-1, windows-1252 or auto)",
                other
            )),
        }
    }
}

/// A loaded table with the encoding actually used to decode it
#[derive(Debug, Clone)]
pub struct ParseResult {
    pub table: Table,
    /// Never [`TextEncoding::Auto`]
    pub encoding: TextEncoding,
}

/// Detect the encoding of raw bytes using chardet
pub fn detect_encoding(bytes: &[u8]) -> TextEncoding {
    let (charset, _confidence, _language) = chardet::detect(bytes);

    match charset.to_lowercase().as_str() {
        "ascii" | "utf-8" | "utf8" => TextEncoding::Utf8,
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => TextEncoding::Latin1,
        "windows-1252" | "cp1252" => TextEncoding::Windows1252,
        _ if std::str::from_utf8(bytes).is_ok() => TextEncoding::Utf8,
        _ => TextEncoding::Windows1252,
    }
}

/// Decode bytes to a string using the given encoding.
///
/// UTF-8 decoding is strict and strips a leading byte order mark.
/// Latin-1 and Windows-1252 accept any input.
pub fn decode_content(bytes: &[u8], encoding: TextEncoding) -> CsvResult<String> {
    match encoding {
        TextEncoding::Utf8 => {
            let (text, had_errors) = encoding_rs::UTF_8.decode_with_bom_removal(bytes);
            if had_errors {
                return Err(CsvError::EncodingError {
                    encoding: encoding.to_string(),
                    message: "invalid byte sequence".to_string(),
                });
            }
            Ok(text.into_owned())
        }
        TextEncoding::Latin1 => Ok(encoding_rs::mem::decode_latin1(bytes).into_owned()),
        TextEncoding::Windows1252 => Ok(encoding_rs::WINDOWS_1252
            .decode_without_bom_handling(bytes)
            .0
            .into_owned()),
        TextEncoding::Auto => decode_content(bytes, detect_encoding(bytes)),
    }
}

/// Parse CSV text into an all-text [`Table`].
///
/// Blank lines are skipped. Rows shorter than the header are padded with
/// empty cells; longer rows are rejected.
pub fn parse_csv(content: &str, delimiter: u8) -> CsvResult<Table> {
    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .trim(Trim::None)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    if headers.is_empty() {
        return Err(CsvError::EmptyFile);
    }
    if headers.iter().all(|h| h.is_empty()) {
        return Err(CsvError::NoHeaders);
    }

    let mut rows = Vec::new();
    for (row_idx, result) in reader.records().enumerate() {
        let record = result?;
        let line = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(row_idx + 2);

        if record.len() > headers.len() {
            return Err(CsvError::ParseError(format!(
                "Line {}: expected {} fields, found {}",
                line,
                headers.len(),
                record.len()
            )));
        }

        let mut row: Vec<String> = record.iter().map(str::to_string).collect();
        row.resize(headers.len(), String::new());
        rows.push(row);
    }

    Ok(Table::new(headers, rows))
}

/// Decode and parse comma-delimited CSV bytes.
pub fn parse_bytes(bytes: &[u8], encoding: TextEncoding) -> CsvResult<ParseResult> {
    let encoding = match encoding {
        TextEncoding::Auto => detect_encoding(bytes),
        explicit => explicit,
    };
    let content = decode_content(bytes, encoding)?;
    let table = parse_csv(&content, INPUT_DELIMITER)?;

    Ok(ParseResult { table, encoding })
}

/// Read a comma-delimited CSV file under the given encoding.
///
/// The file is read in one go and the handle closed before parsing.
pub fn read_csv_file<P: AsRef<Path>>(path: P, encoding: TextEncoding) -> CsvResult<ParseResult> {
    let bytes = std::fs::read(path.as_ref())?;
    parse_bytes(&bytes, encoding)
}

#[cfg(test)]
mod tests {
    use super::*;

    const GTIN_SKU_CSV: &str = "gtin,sku\n0123456789123,SKU123\n9876543210987,SKU456\n";

    #[test]
    fn test_read_customer_csv() {
        let result = parse_bytes(GTIN_SKU_CSV.as_bytes(), TextEncoding::Utf8).unwrap();

        assert_eq!(result.table.headers, vec!["gtin", "sku"]);
        assert_eq!(result.table.len(), 2);
        assert_eq!(result.table.rows[0][0], "0123456789123");
        assert_eq!(result.encoding, TextEncoding::Utf8);
    }

    #[test]
    fn test_header_whitespace_trimmed_values_untouched() {
        let csv = " sku , GTIN \n SKU1 ,0042\n";
        let table = parse_csv(csv, b',').unwrap();

        assert_eq!(table.headers, vec!["sku", "GTIN"]);
        assert_eq!(table.rows[0], vec![" SKU1 ", "0042"]);
    }

    #[test]
    fn test_missing_value_markers_load_as_null() {
        let csv = "gtin,sku\nN/A,SKU1\nNULL,SKU2\n,SKU3\n0042,NA\n";
        let table = parse_csv(csv, b',').unwrap();

        assert_eq!(table.rows[0][0], "N/A");
        assert_eq!(table.value(0, "gtin"), None);
        assert_eq!(table.value(1, "gtin"), None);
        assert_eq!(table.value(2, "gtin"), None);
        assert_eq!(table.value(3, "gtin"), Some("0042"));
        assert_eq!(table.value(3, "sku"), None);
    }

    #[test]
    fn test_quoted_values() {
        let csv = "sku,name\nSKU1,\"Chair, oak\"\n";
        let table = parse_csv(csv, b',').unwrap();
        assert_eq!(table.rows[0][1], "Chair, oak");
    }

    #[test]
    fn test_short_rows_padded() {
        let csv = "a,b,c\n1\n";
        let table = parse_csv(csv, b',').unwrap();
        assert_eq!(table.rows[0], vec!["1", "", ""]);
    }

    #[test]
    fn test_long_rows_rejected() {
        let csv = "a,b\n1,2\n1,2,3\n";
        let err = parse_csv(csv, b',').unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("Line 3"));
        assert!(msg.contains("expected 2 fields, found 3"));
    }

    #[test]
    fn test_empty_lines_skipped() {
        let csv = "a,b\n1,2\n\n3,4\n";
        let table = parse_csv(csv, b',').unwrap();
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_header_only_file() {
        let table = parse_csv("sku,gtin\n", b',').unwrap();
        assert!(table.is_empty());
        assert_eq!(table.headers.len(), 2);
    }

    #[test]
    fn test_empty_csv_error() {
        let err = parse_csv("", b',').unwrap_err();
        assert!(matches!(err, CsvError::EmptyFile));
    }

    #[test]
    fn test_latin1_decoding() {
        // "Société" in ISO-8859-1
        let bytes: &[u8] = &[0x53, 0x6F, 0x63, 0x69, 0xE9, 0x74, 0xE9];
        let decoded = decode_content(bytes, TextEncoding::Latin1).unwrap();
        assert_eq!(decoded, "Société");
    }

    #[test]
    fn test_invalid_utf8_rejected() {
        let bytes: &[u8] = &[b's', b'k', b'u', 0xE9, b'\n'];
        let err = decode_content(bytes, TextEncoding::Utf8).unwrap_err();
        assert!(matches!(err, CsvError::EncodingError { .. }));
    }

    #[test]
    fn test_utf8_bom_removed() {
        let mut bytes = vec![0xEF, 0xBB, 0xBF];
        bytes.extend_from_slice(GTIN_SKU_CSV.as_bytes());
        let result = parse_bytes(&bytes, TextEncoding::Utf8).unwrap();
        assert_eq!(result.table.headers[0], "gtin");
    }

    #[test]
    fn test_auto_detects_plain_ascii_as_utf8() {
        let result = parse_bytes(GTIN_SKU_CSV.as_bytes(), TextEncoding::Auto).unwrap();
        assert_eq!(result.encoding, TextEncoding::Utf8);
    }

    #[test]
    fn test_encoding_from_str() {
        assert_eq!("UTF-8".parse::<TextEncoding>().unwrap(), TextEncoding::Utf8);
        assert_eq!("latin-1".parse::<TextEncoding>().unwrap(), TextEncoding::Latin1);
        assert_eq!("ISO-8859-1".parse::<TextEncoding>().unwrap(), TextEncoding::Latin1);
        assert_eq!("cp1252".parse::<TextEncoding>().unwrap(), TextEncoding::Windows1252);
        assert!("ebcdic".parse::<TextEncoding>().is_err());
    }

    #[test]
    fn test_read_missing_file_is_io_error() {
        let err = read_csv_file("definitely/not/here.csv", TextEncoding::Utf8).unwrap_err();
        assert!(matches!(err, CsvError::IoError(_)));
    }
}
