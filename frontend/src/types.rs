//! Common types used across the frontend application.
//!
//! # Categories
//!
//! - **Report Types** - mirror of the backend's `/api/upload` response
//! - **Log Types** - real-time log streaming
//! - **UI State** - the upload state machine
//! - **Error Types** - frontend error handling

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Report Types
// =============================================================================

/// One slice of a proportion chart.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSlice {
    pub label: String,
    pub value: f64,
    /// Share of the chart total, 0-100
    pub percent: f64,
}

/// First rows of the cleaned table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Row counts per traffic class.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCounts {
    pub paid: usize,
    pub non_paid: usize,
    pub unrecognized: usize,
}

/// Plotly chart pages rendered by the backend.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPages {
    pub paid_split: Option<String>,
    /// None when no paid revenue was allocated
    pub channel_revenue: Option<String>,
}

/// Metadata about the processed file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseMetadata {
    pub row_count: usize,
    pub encoding: String,
    pub header_line: usize,
    pub summary_dropped: bool,
    pub original_columns: Vec<String>,
    pub status_counts: StatusCounts,
    pub paid_revenue: f64,
    pub allocated_revenue: f64,
}

/// Response from the backend upload endpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportResponse {
    pub job_id: String,
    /// "success" or "warning"
    pub status: String,
    pub generated_at: String,
    pub preview: PreviewTable,
    pub paid_split: Vec<ChartSlice>,
    pub channel_revenue: Vec<ChartSlice>,
    pub warning: Option<String>,
    pub charts: ChartPages,
    pub file_name: String,
    /// Cleaned CSV, BOM included
    pub cleaned_csv: String,
    pub metadata: ResponseMetadata,
}

// =============================================================================
// Log Types
// =============================================================================

/// Log severity level.
///
/// Matches the backend's log levels for SSE streaming.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum LogLevel {
    Info,
    Success,
    Error,
    Warning,
}

impl LogLevel {
    /// Get CSS class for styling.
    pub fn css_class(&self) -> &'static str {
        match self {
            LogLevel::Info => "log-info",
            LogLevel::Success => "log-success",
            LogLevel::Error => "log-error",
            LogLevel::Warning => "log-warning",
        }
    }
}

/// A single log entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
    /// HH:MM:SS
    pub timestamp: String,
    /// Nesting depth
    pub indent: u8,
}

// =============================================================================
// UI State
// =============================================================================

/// Where the page is in the upload flow.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum ReportState {
    /// Nothing uploaded yet
    #[default]
    NoFile,
    /// Upload sent, waiting for the backend
    Processing,
    /// Report received
    Success(Box<ReportResponse>),
    /// Upload or processing failed
    Failed(String),
}

impl ReportState {
    pub fn is_processing(&self) -> bool {
        matches!(self, ReportState::Processing)
    }
}

// =============================================================================
// Error Types
// =============================================================================

/// Frontend application errors.
#[derive(Clone, Debug, PartialEq)]
pub enum AppError {
    /// File selection or upload rejected before sending.
    Upload(String),
    /// Network/HTTP error.
    Network(String),
    /// The backend answered with an error.
    Server(String),
    /// Browser API failure (Blob, object URL, DOM).
    Browser(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Upload(msg) => write!(f, "Upload error: {}", msg),
            AppError::Network(msg) => write!(f, "Network error: {}", msg),
            AppError::Server(msg) => write!(f, "Processing failed: {}", msg),
            AppError::Browser(msg) => write!(f, "Browser error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

/// Result type alias for frontend operations.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_state_default() {
        assert_eq!(ReportState::default(), ReportState::NoFile);
        assert!(ReportState::Processing.is_processing());
        assert!(!ReportState::Failed("x".into()).is_processing());
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::Server("Line 10: Not a number".into());
        assert_eq!(err.to_string(), "Processing failed: Line 10: Not a number");
    }
}
