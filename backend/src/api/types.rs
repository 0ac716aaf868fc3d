//! REST API types shared with the web UI.
//!
//! Field names are camelCase on the wire.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::charts::ReportCharts;
use crate::error::ReportError;
use crate::export::{cleaned_csv_string, CLEANED_FILE_NAME};
use crate::models::report_columns;
use crate::transform::aggregate::ChartSlice;
use crate::transform::pipeline::{ReportOutcome, StatusCounts};

/// Response sent to the UI after an upload was processed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportResponse {
    /// Unique job identifier
    pub job_id: String,

    /// "success" or "warning"
    pub status: String,

    /// RFC 3339 processing time
    pub generated_at: String,

    /// First rows of the cleaned table
    pub preview: PreviewTable,

    /// "Paid vs Non-paid" chart
    pub paid_split: Vec<ChartSlice>,

    /// "Paid revenue by ad channel" chart
    pub channel_revenue: Vec<ChartSlice>,

    /// Set when no paid revenue was allocated
    pub warning: Option<String>,

    /// Both charts as standalone plotly pages
    pub charts: ChartPages,

    /// Suggested download name
    pub file_name: String,

    /// Full cleaned CSV, BOM included
    pub cleaned_csv: String,

    pub metadata: ResponseMetadata,
}

/// A table preview
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Plotly HTML pages, absent when a chart has no data
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPages {
    pub paid_split: Option<String>,
    pub channel_revenue: Option<String>,
}

/// Metadata about the processed file
#[derive(Debug, Clone, Serialize, Deserialize)]
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

impl TryFrom<ReportOutcome> for ReportResponse {
    type Error = ReportError;

    fn try_from(outcome: ReportOutcome) -> Result<Self, Self::Error> {
        let cleaned_csv = cleaned_csv_string(&outcome.rows)?;
        let (paid_split_html, channel_revenue_html) = ReportCharts::from_outcome(&outcome).to_html();

        let preview = PreviewTable {
            columns: report_columns().into_iter().map(String::from).collect(),
            rows: outcome.preview().iter().map(|r| r.to_cells()).collect(),
        };

        let metadata = ResponseMetadata {
            row_count: outcome.rows.len(),
            paid_revenue: outcome.paid_revenue(),
            allocated_revenue: outcome.allocated_revenue(),
            encoding: outcome.csv_info.encoding,
            header_line: outcome.csv_info.header_line,
            summary_dropped: outcome.csv_info.summary_dropped,
            original_columns: outcome.csv_info.original_headers,
            status_counts: outcome.status_counts,
        };

        Ok(ReportResponse {
            job_id: Uuid::new_v4().to_string(),
            status: if outcome.warning.is_some() { "warning" } else { "success" }.to_string(),
            generated_at: Utc::now().to_rfc3339(),
            preview,
            paid_split: outcome.paid_split,
            channel_revenue: outcome.channel_revenue,
            warning: outcome.warning,
            charts: ChartPages {
                paid_split: paid_split_html,
                channel_revenue: channel_revenue_html,
            },
            file_name: CLEANED_FILE_NAME.to_string(),
            cleaned_csv,
            metadata,
        })
    }
}

/// Create an error response
pub fn error_response(error: &str) -> Value {
    json!({
        "jobId": Uuid::new_v4().to_string(),
        "status": "error",
        "error": error,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::pipeline::{process_bytes, ReportOptions};

    const SAMPLE: &str = "#\n#\n#\n#\n#\n#\n#\n\
Channel,Session,First user,Sessions,Users,Carts,Checkouts,Purchases,Revenue\n\
Paid Search,google / cpc,google / organic,10,9,1,1,1,100\n\
Organic,google / organic,google / organic,5,5,0,0,0,40\n";

    #[test]
    fn test_response_from_outcome() {
        let outcome = process_bytes(SAMPLE.as_bytes(), &ReportOptions::default()).unwrap();
        let response = ReportResponse::try_from(outcome).unwrap();

        assert_eq!(response.status, "success");
        assert_eq!(response.file_name, "cleaned_data.csv");
        assert_eq!(response.preview.columns.len(), 14);
        assert_eq!(response.preview.rows.len(), 2);
        assert_eq!(response.preview.rows[0][13], "Paid");
        assert!(response.cleaned_csv.starts_with('\u{feff}'));
        assert_eq!(response.metadata.paid_revenue, 100.0);
        assert_eq!(response.metadata.allocated_revenue, 100.0);

        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("paidSplit").is_some());
        assert!(json["metadata"].get("statusCounts").is_some());
        assert!(json["charts"]["paidSplit"].is_string());
        assert!(json["charts"]["channelRevenue"].is_string());
    }

    #[test]
    fn test_warning_status() {
        let csv = SAMPLE.replace("google / cpc", "google / organic");
        let outcome = process_bytes(csv.as_bytes(), &ReportOptions::default()).unwrap();
        let response = ReportResponse::try_from(outcome).unwrap();

        assert_eq!(response.status, "warning");
        assert!(response.warning.is_some());
        assert!(response.channel_revenue.is_empty());
        assert!(response.charts.channel_revenue.is_none());
        assert!(response.charts.paid_split.is_some());
    }

    #[test]
    fn test_error_response_shape() {
        let value = error_response("Processing failed: boom");
        assert_eq!(value["status"], "error");
        assert_eq!(value["error"], "Processing failed: boom");
    }
}
