//! Error types for the RevFlow report pipeline.
//!
//! - [`CsvError`] - loading errors with line/column context (re-exported from [`crate::parser`])
//! - [`ReportError`] - pipeline errors (load, export, IO)
//! - [`ServerError`] - HTTP boundary errors
//!
//! Conversions are implemented with `From` so `?` works across layers.

use axum::http::StatusCode;
use thiserror::Error;

pub use crate::parser::CsvError;

// =============================================================================
// Pipeline Errors
// =============================================================================

/// Errors raised while turning an uploaded export into a report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The file could not be loaded as a channel report.
    #[error("CSV error: {0}")]
    Csv(#[from] CsvError),

    /// Reading the input or writing the output failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The cleaned table could not be serialized.
    #[error("Export error: {0}")]
    Export(String),
}

impl From<csv::Error> for ReportError {
    fn from(err: csv::Error) -> Self {
        ReportError::Export(err.to_string())
    }
}

// =============================================================================
// Server Errors
// =============================================================================

/// HTTP server errors.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Malformed request (missing file, broken multipart body).
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// The upload was received but could not be processed.
    #[error("Processing failed: {0}")]
    Report(#[from] ReportError),
}

impl ServerError {
    /// HTTP status to answer with.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::Report(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for pipeline operations.
pub type ReportResult<T> = Result<T, ReportError>;

/// Result type for server operations.
pub type ServerResult<T> = Result<T, ServerError>;
