//! Revenue aggregation for the two report charts.
//!
//! - [`paid_split`] - revenue per traffic class, `Unrecognized` excluded
//! - [`allocate_paid_revenue`] - paid revenue per ad channel (source)

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::classify::PaidKeywords;
use crate::models::{PaidStatus, ReportRow};

/// One slice of a proportion chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSlice {
    pub label: String,
    pub value: f64,
    /// Share of the chart total, 0-100
    pub percent: f64,
}

/// Turn `(label, value)` pairs into slices carrying their share of the total.
pub fn to_slices(entries: Vec<(String, f64)>) -> Vec<ChartSlice> {
    let total: f64 = entries.iter().map(|(_, v)| v).sum();

    entries
        .into_iter()
        .map(|(label, value)| ChartSlice {
            percent: if total == 0.0 { 0.0 } else { value / total * 100.0 },
            label,
            value,
        })
        .collect()
}

/// Revenue summed per traffic class, ordered by class name.
///
/// Only classes present in `rows` appear; `Unrecognized` never does.
pub fn paid_split(rows: &[ReportRow]) -> Vec<ChartSlice> {
    let mut totals: BTreeMap<&'static str, f64> = BTreeMap::new();

    for row in rows {
        if row.paid_status == PaidStatus::Unrecognized {
            continue;
        }
        *totals.entry(row.paid_status.as_str()).or_insert(0.0) += row.revenue;
    }

    to_slices(totals.into_iter().map(|(k, v)| (k.to_string(), v)).collect())
}

/// Sources credited with a paid row's revenue, with their share.
///
/// Both mediums paid splits 50/50 across both sources; otherwise the source
/// whose medium matched gets everything. Non-paid rows credit nobody.
pub fn allocate_row<'a>(row: &'a ReportRow, keywords: &PaidKeywords) -> Vec<(&'a str, f64)> {
    if row.paid_status != PaidStatus::Paid {
        return Vec::new();
    }

    let revenue = row.revenue;
    match (keywords.matches(&row.medium1), keywords.matches(&row.medium2)) {
        (true, true) => vec![(row.source1.as_str(), revenue / 2.0), (row.source2.as_str(), revenue / 2.0)],
        (true, false) => vec![(row.source1.as_str(), revenue)],
        (false, true) => vec![(row.source2.as_str(), revenue)],
        (false, false) => Vec::new(),
    }
}

/// Paid revenue per ad channel, largest first (ties by channel name).
pub fn allocate_paid_revenue(rows: &[ReportRow], keywords: &PaidKeywords) -> Vec<ChartSlice> {
    let mut by_channel: BTreeMap<String, f64> = BTreeMap::new();

    for row in rows {
        for (source, amount) in allocate_row(row, keywords) {
            *by_channel.entry(source.to_string()).or_insert(0.0) += amount;
        }
    }

    let mut entries: Vec<(String, f64)> = by_channel.into_iter().collect();
    entries.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    to_slices(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::classify::classify;

    fn row(source1: &str, medium1: &str, source2: &str, medium2: &str, revenue: f64) -> ReportRow {
        let kw = PaidKeywords::default();
        ReportRow {
            channel_group: "Test".into(),
            session_source_medium: format!("{} / {}", source1, medium1),
            first_user_source_medium: format!("{} / {}", source2, medium2),
            sessions: "1".into(),
            total_users: "1".into(),
            add_to_carts: "0".into(),
            checkouts: "0".into(),
            purchases: "0".into(),
            total_revenue: revenue.to_string(),
            revenue,
            source1: source1.into(),
            medium1: medium1.into(),
            source2: source2.into(),
            medium2: medium2.into(),
            paid_status: classify(medium1, medium2, &kw),
        }
    }

    #[test]
    fn test_both_paid_splits_half() {
        let r = row("google", "cpc", "facebook", "paid_social", 100.0);
        let alloc = allocate_row(&r, &PaidKeywords::default());
        assert_eq!(alloc, vec![("google", 50.0), ("facebook", 50.0)]);
    }

    #[test]
    fn test_single_match_gets_everything() {
        let kw = PaidKeywords::default();
        let first = row("google", "cpc", "newsletter", "email", 80.0);
        assert_eq!(allocate_row(&first, &kw), vec![("google", 80.0)]);

        let second = row("blog", "referral", "bing", "cpc", 40.0);
        assert_eq!(allocate_row(&second, &kw), vec![("bing", 40.0)]);
    }

    #[test]
    fn test_non_paid_rows_not_allocated() {
        let r = row("google", "organic", "google", "organic", 500.0);
        assert!(allocate_row(&r, &PaidKeywords::default()).is_empty());
    }

    #[test]
    fn test_allocation_sorted_descending() {
        let rows = vec![
            row("google", "cpc", "google", "cpc", 100.0),
            row("bing", "cpc", "blog", "referral", 30.0),
            row("facebook", "paid_social", "google", "cpc", 300.0),
        ];
        let slices = allocate_paid_revenue(&rows, &PaidKeywords::default());

        let labels: Vec<&str> = slices.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["google", "facebook", "bing"]);
        assert_eq!(slices[0].value, 250.0);
        assert_eq!(slices[1].value, 150.0);
        assert_eq!(slices[2].value, 30.0);

        let total: f64 = slices.iter().map(|s| s.value).sum();
        assert_eq!(total, 430.0);
        let pct: f64 = slices.iter().map(|s| s.percent).sum();
        assert!((pct - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_paid_split_excludes_unrecognized() {
        let rows = vec![
            row("google", "cpc", "google", "organic", 100.0),
            row("google", "organic", "google", "organic", 300.0),
            row("Unrecognized", "Unrecognized", "Unrecognized", "Unrecognized", 1000.0),
        ];
        let slices = paid_split(&rows);

        assert_eq!(slices.len(), 2);
        assert_eq!(slices[0].label, "Non-paid");
        assert_eq!(slices[0].value, 300.0);
        assert_eq!(slices[0].percent, 75.0);
        assert_eq!(slices[1].label, "Paid");
        assert_eq!(slices[1].value, 100.0);
    }

    #[test]
    fn test_empty_inputs() {
        assert!(paid_split(&[]).is_empty());
        assert!(allocate_paid_revenue(&[], &PaidKeywords::default()).is_empty());
    }

    #[test]
    fn test_zero_total_percent() {
        let slices = to_slices(vec![("a".into(), 0.0)]);
        assert_eq!(slices[0].percent, 0.0);
    }
}
