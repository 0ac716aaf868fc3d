//! # RevFlow - channel revenue attribution
//!
//! RevFlow cleans a marketing-analytics channel export, tags every row as
//! Paid, Non-paid or Unrecognized traffic and attributes paid revenue to the
//! ad channels that earned it.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  CSV export │────▶│   Parser    │────▶│  Transform  │────▶│ Charts/CSV  │
//! │ (# preamble)│     │ (header@8)  │     │ (split+tag) │     │ (UI or CLI) │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use revflow::{process_file, ReportOptions};
//!
//! fn main() {
//!     let outcome = process_file("export.csv".as_ref(), &ReportOptions::default()).unwrap();
//!     println!("{} rows, {:.2} paid revenue", outcome.rows.len(), outcome.paid_revenue());
//! }
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Error types
//! - [`models`] - Report rows and traffic classes
//! - [`parser`] - Export loading
//! - [`transform`] - Normalize, split, classify, aggregate, pipeline
//! - [`charts`] - Plotly pie charts
//! - [`export`] - Cleaned CSV writer
//! - [`api`] - HTTP API server

// Core modules
pub mod error;
pub mod models;

// Loading
pub mod parser;

// Transformation
pub mod transform;

// Output
pub mod charts;
pub mod export;

// HTTP API
pub mod api;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{ReportError, ReportResult, ServerError, ServerResult};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{report_columns, PaidStatus, ReportRow, DERIVED_COLUMNS, INPUT_COLUMNS};

// =============================================================================
// Re-exports - Loading
// =============================================================================

pub use parser::{
    decode_content,
    detect_encoding,
    load_report_bytes,
    load_report_file,
    load_report_str,
    CsvError,
    LoadOptions,
    ParseResult,
    RawRecord,
};

// =============================================================================
// Re-exports - Transform
// =============================================================================

pub use transform::{
    allocate_paid_revenue,
    allocate_row,
    classify,
    normalize_space,
    paid_split,
    split_source_medium,
    ChartSlice,
    PaidKeywords,
    SourceMedium,
    DEFAULT_PAID_KEYWORDS,
    UNRECOGNIZED,
};

// =============================================================================
// Re-exports - Pipeline
// =============================================================================

pub use transform::pipeline::{
    process_bytes,
    process_file,
    CsvInfo,
    ReportOptions,
    ReportOutcome,
    StatusCounts,
    NO_PAID_ALLOCATION_WARNING,
};

// =============================================================================
// Re-exports - Export
// =============================================================================

pub use export::{cleaned_csv_bytes, format_table, save_cleaned_csv, write_cleaned_csv, CLEANED_FILE_NAME};

// =============================================================================
// Re-exports - Charts
// =============================================================================

pub use charts::{pie_plot, ReportCharts, SET2};

// =============================================================================
// Re-exports - API
// =============================================================================

pub use api::types::{error_response, ChartPages, PreviewTable, ReportResponse, ResponseMetadata};

// Server
pub mod server {
    pub use crate::api::server::{router, start_server};
}
