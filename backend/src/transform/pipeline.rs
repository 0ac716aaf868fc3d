//! High-level pipeline API: export file in, cleaned report out.
//!
//! Combines every stage: loading, normalizing, splitting, classifying and
//! aggregating.
//!
//! # Example
//!
//! ```rust,ignore
//! use revflow::transform::pipeline::{process_file, ReportOptions};
//! use std::path::Path;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let outcome = process_file(Path::new("traffic_acquisition.csv"), &ReportOptions::default())?;
//!
//!     for slice in &outcome.channel_revenue {
//!         println!("{}: {:.2}", slice.label, slice.value);
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::aggregate::{allocate_paid_revenue, paid_split, ChartSlice};
use super::classify::{classify, PaidKeywords};
use super::split::split_source_medium;
use crate::api::logs::{log_info, log_info_indent, log_success, log_warning};
use crate::error::ReportResult;
use crate::models::{PaidStatus, ReportRow, INPUT_COLUMNS};
use crate::parser::{load_report_bytes, load_report_file, CsvError, LoadOptions, ParseResult, RawRecord};

/// Warning shown when no paid revenue could be attributed to a channel.
pub const NO_PAID_ALLOCATION_WARNING: &str = "No paid revenue could be allocated to an ad channel";

/// Options for the report pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportOptions {
    /// Zero-based index of the header among non-blank lines
    pub header_line: usize,

    /// Data row dropped as the export's summary
    pub summary_row: Option<usize>,

    /// Number of leading columns kept
    pub column_count: usize,

    /// Rows included in the preview
    pub preview_rows: usize,

    /// Substrings marking a medium as paid
    pub paid_keywords: PaidKeywords,
}

impl Default for ReportOptions {
    fn default() -> Self {
        let load = LoadOptions::default();
        Self {
            header_line: load.header_line,
            summary_row: load.summary_row,
            column_count: load.column_count,
            preview_rows: 20,
            paid_keywords: PaidKeywords::default(),
        }
    }
}

impl ReportOptions {
    /// Defaults overridden by `REVFLOW_PAID_KEYWORDS`, `REVFLOW_HEADER_LINE`
    /// and `REVFLOW_PREVIEW_ROWS` when set.
    pub fn from_env() -> Self {
        let mut options = Self::default();

        if let Ok(list) = std::env::var("REVFLOW_PAID_KEYWORDS") {
            let keywords = PaidKeywords::parse_list(&list);
            if !keywords.is_empty() {
                options.paid_keywords = keywords;
            }
        }
        if let Some(line) = env_usize("REVFLOW_HEADER_LINE") {
            options.header_line = line;
        }
        if let Some(rows) = env_usize("REVFLOW_PREVIEW_ROWS") {
            options.preview_rows = rows;
        }

        options
    }

    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            header_line: self.header_line,
            summary_row: self.summary_row,
            // Row construction reads the nine canonical columns.
            column_count: self.column_count.max(INPUT_COLUMNS.len()),
        }
    }
}

fn env_usize(key: &str) -> Option<usize> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

/// CSV file information
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CsvInfo {
    pub encoding: String,
    /// Header cells as they appeared in the file
    pub original_headers: Vec<String>,
    pub header_line: usize,
    pub row_count: usize,
    pub summary_dropped: bool,
}

/// Row counts per traffic class
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCounts {
    pub paid: usize,
    pub non_paid: usize,
    pub unrecognized: usize,
}

/// Result of a complete pipeline run
#[derive(Debug, Clone, Serialize)]
pub struct ReportOutcome {
    /// Cleaned rows, file order
    pub rows: Vec<ReportRow>,

    /// Revenue per traffic class ("Paid vs Non-paid")
    pub paid_split: Vec<ChartSlice>,

    /// Paid revenue per ad channel, largest first
    pub channel_revenue: Vec<ChartSlice>,

    /// Set when no paid revenue was allocated
    pub warning: Option<String>,

    pub status_counts: StatusCounts,

    pub csv_info: CsvInfo,

    /// Rows shown in previews
    pub preview_rows: usize,
}

impl ReportOutcome {
    /// First rows of the cleaned table.
    pub fn preview(&self) -> &[ReportRow] {
        &self.rows[..self.preview_rows.min(self.rows.len())]
    }

    /// Revenue of all Paid rows.
    pub fn paid_revenue(&self) -> f64 {
        self.rows
            .iter()
            .filter(|r| r.paid_status == PaidStatus::Paid)
            .map(|r| r.revenue)
            .sum()
    }

    /// Revenue credited to ad channels.
    pub fn allocated_revenue(&self) -> f64 {
        self.channel_revenue.iter().map(|s| s.value).sum()
    }
}

/// Process an export file.
pub fn process_file(path: &Path, options: &ReportOptions) -> ReportResult<ReportOutcome> {
    log_info(format!("📖 Reading {}...", path.display()));
    let parse_result = load_report_file(path, &options.load_options())?;
    process_parsed(parse_result, options)
}

/// Process an uploaded export.
///
/// Same as [`process_file`] but accepts raw bytes instead of a file path.
pub fn process_bytes(bytes: &[u8], options: &ReportOptions) -> ReportResult<ReportOutcome> {
    log_info(format!("📖 Reading upload ({} bytes)...", bytes.len()));
    let parse_result = load_report_bytes(bytes, &options.load_options())?;
    process_parsed(parse_result, options)
}

/// Internal: run the transform stages on a loaded export
fn process_parsed(parse_result: ParseResult, options: &ReportOptions) -> ReportResult<ReportOutcome> {
    if parse_result.encoding != "utf-8" {
        log_warning(format!(
            "File looks like {}, decoding as UTF-8 and dropping invalid bytes",
            parse_result.encoding
        ));
    }
    log_success(format!("Header found on line {}", parse_result.header_line_number));
    if parse_result.summary_dropped {
        log_info("Summary row dropped");
    }
    log_success(format!("Read {} rows", parse_result.records.len()));

    print_column_mapping(&parse_result.headers);

    log_info("🔀 Splitting source / medium and classifying traffic...");
    let rows = build_rows(&parse_result.records, &options.paid_keywords)?;

    let status_counts = count_statuses(&rows);
    log_success(format!(
        "Paid: {}, Non-paid: {}, Unrecognized: {}",
        status_counts.paid, status_counts.non_paid, status_counts.unrecognized
    ));

    log_info("📊 Aggregating revenue...");
    let paid_split = paid_split(&rows);
    let channel_revenue = allocate_paid_revenue(&rows, &options.paid_keywords);

    let warning = if channel_revenue.is_empty() {
        log_warning(NO_PAID_ALLOCATION_WARNING);
        Some(NO_PAID_ALLOCATION_WARNING.to_string())
    } else {
        log_success(format!("{} ad channels with paid revenue", channel_revenue.len()));
        None
    };

    Ok(ReportOutcome {
        csv_info: CsvInfo {
            encoding: parse_result.encoding,
            original_headers: parse_result.headers,
            header_line: parse_result.header_line_number,
            row_count: rows.len(),
            summary_dropped: parse_result.summary_dropped,
        },
        rows,
        paid_split,
        channel_revenue,
        warning,
        status_counts,
        preview_rows: options.preview_rows,
    })
}

/// Build cleaned rows from loaded records.
pub fn build_rows(records: &[RawRecord], keywords: &PaidKeywords) -> Result<Vec<ReportRow>, CsvError> {
    records.iter().map(|r| build_row(r, keywords)).collect()
}

fn build_row(record: &RawRecord, keywords: &PaidKeywords) -> Result<ReportRow, CsvError> {
    let cell = |i: usize| record.fields.get(i).cloned().unwrap_or_default();

    let session = cell(1);
    let first_user = cell(2);
    let sm1 = split_source_medium(&session);
    let sm2 = split_source_medium(&first_user);
    let paid_status = classify(&sm1.medium, &sm2.medium, keywords);

    let revenue_text = cell(8);
    let revenue = parse_revenue(&revenue_text).ok_or_else(|| {
        CsvError::new(record.line, "Not a number")
            .with_column(INPUT_COLUMNS[8])
            .with_value(revenue_text.clone())
    })?;

    Ok(ReportRow {
        channel_group: cell(0),
        session_source_medium: session,
        first_user_source_medium: first_user,
        sessions: cell(3),
        total_users: cell(4),
        add_to_carts: cell(5),
        checkouts: cell(6),
        purchases: cell(7),
        total_revenue: revenue_text,
        revenue,
        source1: sm1.source,
        medium1: sm1.medium,
        source2: sm2.source,
        medium2: sm2.medium,
        paid_status,
    })
}

/// Parse a revenue cell; blanks count as zero, `,` thousands separators are ignored.
pub fn parse_revenue(text: &str) -> Option<f64> {
    let cleaned: String = text.trim().chars().filter(|c| *c != ',').collect();
    if cleaned.is_empty() {
        return Some(0.0);
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn count_statuses(rows: &[ReportRow]) -> StatusCounts {
    let mut counts = StatusCounts::default();
    for row in rows {
        match row.paid_status {
            PaidStatus::Paid => counts.paid += 1,
            PaidStatus::NonPaid => counts.non_paid += 1,
            PaidStatus::Unrecognized => counts.unrecognized += 1,
        }
    }
    counts
}

/// Print how file columns map onto report columns
fn print_column_mapping(headers: &[String]) {
    log_info(format!("📋 Report has {} columns:", headers.len()));
    for (i, (found, canonical)) in headers.iter().zip(INPUT_COLUMNS.iter()).enumerate() {
        if found == canonical {
            log_info_indent(format!("[{:2}] {}", i + 1, canonical), 1);
        } else {
            log_info_indent(format!("[{:2}] {} → {}", i + 1, found, canonical), 1);
        }
    }
}
