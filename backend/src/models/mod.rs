//! Domain models for a cleaned channel report.
//!
//! A [`ReportRow`] is one line of the export after renaming, splitting and
//! classification. Serialized field names are the column names of the
//! cleaned CSV.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical names of the input columns, in file order.
pub const INPUT_COLUMNS: [&str; 9] = [
    "Session default channel group",
    "Session source / medium",
    "First user source / medium",
    "Sessions",
    "Total users",
    "Add to carts",
    "Checkouts",
    "Purchases",
    "Total revenue",
];

/// Names of the columns derived by the pipeline.
pub const DERIVED_COLUMNS: [&str; 5] = [
    "source1",
    "medium1",
    "source2",
    "medium2",
    "Paid or Non-paid",
];

/// All columns of the cleaned table.
pub fn report_columns() -> Vec<&'static str> {
    INPUT_COLUMNS.iter().chain(DERIVED_COLUMNS.iter()).copied().collect()
}

// =============================================================================
// PaidStatus
// =============================================================================

/// Traffic classification of a report row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PaidStatus {
    #[serde(rename = "Non-paid")]
    NonPaid,
    Paid,
    Unrecognized,
}

impl PaidStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaidStatus::Paid => "Paid",
            PaidStatus::NonPaid => "Non-paid",
            PaidStatus::Unrecognized => "Unrecognized",
        }
    }
}

impl fmt::Display for PaidStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// ReportRow
// =============================================================================

/// One cleaned row of the channel report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    #[serde(rename = "Session default channel group")]
    pub channel_group: String,
    #[serde(rename = "Session source / medium")]
    pub session_source_medium: String,
    #[serde(rename = "First user source / medium")]
    pub first_user_source_medium: String,
    #[serde(rename = "Sessions")]
    pub sessions: String,
    #[serde(rename = "Total users")]
    pub total_users: String,
    #[serde(rename = "Add to carts")]
    pub add_to_carts: String,
    #[serde(rename = "Checkouts")]
    pub checkouts: String,
    #[serde(rename = "Purchases")]
    pub purchases: String,
    /// Revenue cell as written in the export
    #[serde(rename = "Total revenue")]
    pub total_revenue: String,
    /// Parsed revenue used for aggregation; blank cells count as zero
    #[serde(skip)]
    pub revenue: f64,
    pub source1: String,
    pub medium1: String,
    pub source2: String,
    pub medium2: String,
    #[serde(rename = "Paid or Non-paid")]
    pub paid_status: PaidStatus,
}

impl ReportRow {
    /// Cell texts in [`report_columns`] order, for table previews.
    pub fn to_cells(&self) -> Vec<String> {
        vec![
            self.channel_group.clone(),
            self.session_source_medium.clone(),
            self.first_user_source_medium.clone(),
            self.sessions.clone(),
            self.total_users.clone(),
            self.add_to_carts.clone(),
            self.checkouts.clone(),
            self.purchases.clone(),
            self.total_revenue.clone(),
            self.source1.clone(),
            self.medium1.clone(),
            self.source2.clone(),
            self.medium2.clone(),
            self.paid_status.to_string(),
        ]
    }
}
