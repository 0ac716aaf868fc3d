//! Cleaned CSV export.
//!
//! Output is UTF-8 with a byte-order mark so spreadsheet tools pick the right
//! encoding, one header row with the canonical column names, no index column.

use std::io::Write;
use std::path::Path;

use crate::error::{ReportError, ReportResult};
use crate::models::{report_columns, ReportRow};

/// File name offered for download.
pub const CLEANED_FILE_NAME: &str = "cleaned_data.csv";

/// UTF-8 byte-order mark.
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Write the cleaned table, BOM first.
pub fn write_cleaned_csv<W: Write>(mut writer: W, rows: &[ReportRow]) -> ReportResult<()> {
    writer.write_all(UTF8_BOM)?;

    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    csv_writer.write_record(report_columns())?;
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;

    Ok(())
}

/// Cleaned table as bytes.
pub fn cleaned_csv_bytes(rows: &[ReportRow]) -> ReportResult<Vec<u8>> {
    let mut buf = Vec::new();
    write_cleaned_csv(&mut buf, rows)?;
    Ok(buf)
}

/// Cleaned table as text (BOM included).
pub fn cleaned_csv_string(rows: &[ReportRow]) -> ReportResult<String> {
    String::from_utf8(cleaned_csv_bytes(rows)?).map_err(|e| ReportError::Export(e.to_string()))
}

/// Render rows as an aligned plain-text table for terminal output.
pub fn format_table(columns: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = columns.iter().map(|c| c.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate().take(widths.len()) {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let render = |cells: Vec<&str>| -> String {
        cells
            .iter()
            .zip(widths.iter())
            .map(|(cell, w)| format!("{:<width$}", cell, width = *w))
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    };

    let mut lines = vec![render(columns.to_vec())];
    lines.push(widths.iter().map(|w| "-".repeat(*w)).collect::<Vec<_>>().join("-+-"));
    for row in rows {
        lines.push(render(row.iter().map(|s| s.as_str()).collect()));
    }
    lines.join("\n")
}

/// Write the cleaned table to `path`.
pub fn save_cleaned_csv(path: &Path, rows: &[ReportRow]) -> ReportResult<()> {
    let file = std::fs::File::create(path)?;
    write_cleaned_csv(std::io::BufWriter::new(file), rows)
}
