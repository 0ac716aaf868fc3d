//! Loader for analytics channel exports.
//!
//! Exports start with a block of `#` comment lines (report name, property,
//! date range) before the real header. The loader locates the header, drops
//! the known summary row and keeps the first report columns of every record.
//! No report semantics live here; see [`crate::transform`] for that.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// CSV loading error with context
#[derive(Debug, Clone)]
pub struct CsvError {
    pub line: usize,
    pub column: Option<String>,
    pub value: Option<String>,
    pub message: String,
}

impl std::fmt::Display for CsvError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.column, &self.value) {
            (Some(col), Some(val)) => {
                write!(f, "Line {}, column '{}' (value '{}'): {}", self.line, col, val, self.message)
            }
            (Some(col), None) => {
                write!(f, "Line {}, column '{}': {}", self.line, col, self.message)
            }
            _ => {
                write!(f, "Line {}: {}", self.line, self.message)
            }
        }
    }
}

impl std::error::Error for CsvError {}

impl CsvError {
    pub fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            column: None,
            value: None,
            message: message.into(),
        }
    }

    pub fn with_column(mut self, column: impl Into<String>) -> Self {
        self.column = Some(column.into());
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }
}

/// Where the report sits inside the export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadOptions {
    /// Zero-based index of the header among the non-blank lines.
    pub header_line: usize,
    /// Zero-based data row holding the export's summary, dropped when present.
    pub summary_row: Option<usize>,
    /// Number of leading columns kept from each record.
    pub column_count: usize,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            header_line: 7,
            summary_row: Some(8),
            column_count: 9,
        }
    }
}

/// One data record as it appeared in the file.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    /// 1-based line number in the uploaded file
    pub line: usize,
    /// Exactly `column_count` cells, padded with empty strings when short
    pub fields: Vec<String>,
}

/// Result of loading with metadata
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// Data records, summary row removed
    pub records: Vec<RawRecord>,
    /// Encoding guessed from the raw bytes (the content is always decoded as UTF-8)
    pub encoding: String,
    /// Header cells as found in the file, truncated to `column_count`
    pub headers: Vec<String>,
    /// 1-based line number of the header row
    pub header_line_number: usize,
    /// Whether the summary row existed and was removed
    pub summary_dropped: bool,
}

/// Detect the encoding of raw bytes using chardet
pub fn detect_encoding(bytes: &[u8]) -> String {
    let result = chardet::detect(bytes);
    let charset = result.0;

    match charset.to_lowercase().as_str() {
        "ascii" | "utf-8" | "utf8" | "utf-8-sig" | "" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        other => other.to_string(),
    }
}

/// Decode bytes as UTF-8, dropping a leading BOM and any undecodable bytes.
pub fn decode_content(bytes: &[u8]) -> String {
    let (text, had_errors) = encoding_rs::UTF_8.decode_with_bom_removal(bytes);
    if had_errors {
        text.chars()
            .filter(|c| *c != char::REPLACEMENT_CHARACTER)
            .collect()
    } else {
        text.into_owned()
    }
}

/// Load an export from disk.
pub fn load_report_file<P: AsRef<Path>>(path: P, options: &LoadOptions) -> Result<ParseResult, CsvError> {
    let bytes = std::fs::read(path.as_ref())
        .map_err(|e| CsvError::new(0, format!("Cannot read file '{}': {}", path.as_ref().display(), e)))?;

    load_report_bytes(&bytes, options)
}

/// Load an export from raw upload bytes.
pub fn load_report_bytes(bytes: &[u8], options: &LoadOptions) -> Result<ParseResult, CsvError> {
    let encoding = detect_encoding(bytes);
    let content = decode_content(bytes);

    let mut result = load_report_str(&content, options)?;
    result.encoding = encoding;
    Ok(result)
}

/// Load an already decoded export.
pub fn load_report_str(content: &str, options: &LoadOptions) -> Result<ParseResult, CsvError> {
    if content.trim().is_empty() {
        return Err(CsvError::new(1, "Empty CSV file"));
    }

    let (header_offset, header_line_number) = locate_header(content, options.header_line)
        .ok_or_else(|| {
            CsvError::new(
                0,
                format!(
                    "No header row found: expected at least {} non-blank lines",
                    options.header_line + 1
                ),
            )
        })?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(content[header_offset..].as_bytes());

    let header_record = reader
        .headers()
        .map_err(|e| CsvError::new(header_line_number, format!("Cannot read header: {}", e)))?
        .clone();

    if header_record.len() < options.column_count {
        return Err(CsvError::new(
            header_line_number,
            format!(
                "Expected at least {} columns, found {}",
                options.column_count,
                header_record.len()
            ),
        ));
    }

    let headers: Vec<String> = header_record
        .iter()
        .take(options.column_count)
        .map(|s| s.to_string())
        .collect();

    let mut records = Vec::new();
    let mut data_index = 0usize;
    let mut summary_dropped = false;

    for result in reader.records() {
        let record = result.map_err(|e| {
            let line = e
                .position()
                .map(|p| header_line_number + p.line() as usize - 1)
                .unwrap_or(header_line_number);
            CsvError::new(line, format!("Invalid CSV format: {}", e))
        })?;

        // Whitespace-only line. A row of empty cells is still a data row.
        if record.len() == 1 && record[0].trim().is_empty() {
            continue;
        }

        let line = record
            .position()
            .map(|p| header_line_number + p.line() as usize - 1)
            .unwrap_or(header_line_number);

        let index = data_index;
        data_index += 1;

        if options.summary_row == Some(index) {
            summary_dropped = true;
            continue;
        }

        let mut fields: Vec<String> = record
            .iter()
            .take(options.column_count)
            .map(|s| s.to_string())
            .collect();
        fields.resize(options.column_count, String::new());

        records.push(RawRecord { line, fields });
    }

    Ok(ParseResult {
        records,
        encoding: "utf-8".to_string(),
        headers,
        header_line_number,
        summary_dropped,
    })
}

/// Byte offset and 1-based line number of the `header_line`-th non-blank line.
fn locate_header(content: &str, header_line: usize) -> Option<(usize, usize)> {
    let mut offset = 0;
    let mut non_blank = 0;

    for (idx, line) in content.split_inclusive('\n').enumerate() {
        if !line.trim().is_empty() {
            if non_blank == header_line {
                return Some((offset, idx + 1));
            }
            non_blank += 1;
        }
        offset += line.len();
    }

    None
}
