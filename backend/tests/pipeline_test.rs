//! End-to-end tests: export file on disk -> cleaned report.

use revflow::{
    process_bytes, process_file, save_cleaned_csv, PaidStatus, ReportOptions, NO_PAID_ALLOCATION_WARNING,
};
use std::io::Write;

const PREAMBLE: &str = "# ----------------------------------------\n\
# Traffic acquisition: Session source / medium\n\
# Account: Demo Store\n\
# Property: Demo Store - GA4\n\
# ----------------------------------------\n\
# Start date: 20240601\n\
# End date: 20240630\n\
\n";

const HEADER: &str = "Session default channel group,Session source / medium,First user source / medium,Sessions,Total users,Add to carts,Checkouts,Purchases,Total revenue\n";

fn write_export(rows: &[&str]) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(PREAMBLE.as_bytes()).unwrap();
    file.write_all(HEADER.as_bytes()).unwrap();
    for row in rows {
        writeln!(file, "{}", row).unwrap();
    }
    file.flush().unwrap();
    file
}

#[test]
fn test_three_row_sample_allocates_all_paid_revenue() {
    let file = write_export(&[
        "Paid Search,google / cpc,facebook / paid_social,120,100,10,5,3,300",
        "Paid Search,bing / cpc,(direct) / (none),40,38,2,1,1,80.5",
        "Organic Search,google / organic,google / organic,500,450,20,10,6,900",
    ]);

    let outcome = process_file(file.path(), &ReportOptions::default()).unwrap();

    assert_eq!(outcome.rows.len(), 3);
    assert_eq!(outcome.rows[0].paid_status, PaidStatus::Paid);
    assert_eq!(outcome.rows[1].paid_status, PaidStatus::Paid);
    assert_eq!(outcome.rows[2].paid_status, PaidStatus::NonPaid);

    // No leakage or double counting
    assert_eq!(outcome.paid_revenue(), 380.5);
    assert!((outcome.allocated_revenue() - outcome.paid_revenue()).abs() < 1e-9);

    let channels: Vec<(&str, f64)> = outcome
        .channel_revenue
        .iter()
        .map(|s| (s.label.as_str(), s.value))
        .collect();
    assert_eq!(channels, vec![("facebook", 150.0), ("google", 150.0), ("bing", 80.5)]);

    let split: Vec<(&str, f64)> = outcome
        .paid_split
        .iter()
        .map(|s| (s.label.as_str(), s.value))
        .collect();
    assert_eq!(split, vec![("Non-paid", 900.0), ("Paid", 380.5)]);
    assert!(outcome.warning.is_none());
}

#[test]
fn test_summary_row_and_unrecognized_rows() {
    let mut rows: Vec<String> = (0..8)
        .map(|i| format!("Organic Search,google / organic,google / organic,{i},{i},0,0,0,10"))
        .collect();
    rows.push("Total,,,9999,9999,0,0,0,99999".to_string());
    rows.push("Unassigned,(not set),(not set),3,3,0,0,0,25".to_string());
    let refs: Vec<&str> = rows.iter().map(|s| s.as_str()).collect();
    let file = write_export(&refs);

    let outcome = process_file(file.path(), &ReportOptions::default()).unwrap();

    assert!(outcome.csv_info.summary_dropped);
    assert_eq!(outcome.rows.len(), 9);
    assert!(outcome.rows.iter().all(|r| r.channel_group != "Total"));

    let unassigned = &outcome.rows[8];
    assert_eq!(unassigned.source1, "Unrecognized");
    assert_eq!(unassigned.medium2, "Unrecognized");
    assert_eq!(unassigned.paid_status, PaidStatus::Unrecognized);

    // Unrecognized revenue stays out of the class chart
    assert_eq!(outcome.paid_split.len(), 1);
    assert_eq!(outcome.paid_split[0].value, 80.0);
    assert_eq!(outcome.warning.as_deref(), Some(NO_PAID_ALLOCATION_WARNING));
}

#[test]
fn test_preview_limited() {
    let rows: Vec<String> = (0..30)
        .map(|i| format!("Direct,(direct) / (none),(direct) / (none),{i},{i},0,0,0,1"))
        .collect();
    let refs: Vec<&str> = rows.iter().map(|s| s.as_str()).collect();
    let file = write_export(&refs);

    let outcome = process_file(file.path(), &ReportOptions::default()).unwrap();
    assert_eq!(outcome.rows.len(), 29);
    assert_eq!(outcome.preview().len(), 20);
}

#[test]
fn test_custom_keywords() {
    let file = write_export(&["Display,criteo / display,criteo / display,1,1,0,0,0,50"]);

    let default_outcome = process_file(file.path(), &ReportOptions::default()).unwrap();
    assert_eq!(default_outcome.rows[0].paid_status, PaidStatus::NonPaid);

    let options = ReportOptions {
        paid_keywords: revflow::PaidKeywords::parse_list("display"),
        ..ReportOptions::default()
    };
    let outcome = process_file(file.path(), &options).unwrap();
    assert_eq!(outcome.rows[0].paid_status, PaidStatus::Paid);
    assert_eq!(outcome.channel_revenue[0].label, "criteo");
    assert_eq!(outcome.channel_revenue[0].value, 50.0);
}

#[test]
fn test_bad_revenue_is_an_error() {
    let file = write_export(&["Direct,(direct) / (none),(direct) / (none),1,1,0,0,0,lots"]);

    let err = process_file(file.path(), &ReportOptions::default()).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("Line 10"));
    assert!(msg.contains("Total revenue"));
}

#[test]
fn test_missing_file_is_an_error() {
    let err = process_file("/nonexistent/export.csv".as_ref(), &ReportOptions::default()).unwrap_err();
    assert!(err.to_string().contains("Cannot read file"));
}

#[test]
fn test_invalid_utf8_bytes_ignored() {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(PREAMBLE.as_bytes());
    bytes.extend_from_slice(HEADER.as_bytes());
    bytes.extend_from_slice(b"Paid Search,goo\xFFgle / cpc,google / cpc,1,1,0,0,0,10\n");

    let outcome = process_bytes(&bytes, &ReportOptions::default()).unwrap();
    assert_eq!(outcome.rows[0].source1, "google");
}

#[test]
fn test_cleaned_csv_written_with_bom() {
    let file = write_export(&["Paid Search,google / cpc,google / cpc,1,1,0,0,0,10"]);
    let outcome = process_file(file.path(), &ReportOptions::default()).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("cleaned_data.csv");
    save_cleaned_csv(&out, &outcome.rows).unwrap();

    let bytes = std::fs::read(&out).unwrap();
    assert_eq!(&bytes[..3], b"\xEF\xBB\xBF");
    let text = String::from_utf8(bytes[3..].to_vec()).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[1].ends_with(",google,cpc,google,cpc,Paid"));
}

#[test]
fn test_header_without_rows_is_an_empty_report() {
    let file = write_export(&[]);
    let outcome = process_file(file.path(), &ReportOptions::default()).unwrap();

    assert!(outcome.rows.is_empty());
    assert!(outcome.paid_split.is_empty());
    assert_eq!(outcome.warning.as_deref(), Some(NO_PAID_ALLOCATION_WARNING));
}

#[test]
fn test_empty_cell_row_kept_and_summary_still_at_index_eight() {
    let mut rows: Vec<String> = (0..3)
        .map(|i| format!("Organic Search,google / organic,google / organic,{i},{i},0,0,0,10"))
        .collect();
    rows.push(",,,,,,,,".to_string());
    rows.extend((4..10).map(|i| format!("Organic Search,google / organic,google / organic,{i},{i},0,0,0,10")));
    let refs: Vec<&str> = rows.iter().map(|s| s.as_str()).collect();
    let file = write_export(&refs);

    let outcome = process_file(file.path(), &ReportOptions::default()).unwrap();

    let sessions: Vec<&str> = outcome.rows.iter().map(|r| r.sessions.as_str()).collect();
    assert_eq!(sessions, vec!["0", "1", "2", "", "4", "5", "6", "7", "9"]);
    assert_eq!(outcome.rows[3].paid_status, PaidStatus::Unrecognized);
    assert_eq!(outcome.rows[3].revenue, 0.0);
}

#[test]
fn test_revenue_cells_exported_as_written() {
    let file = write_export(&[
        "Paid Search,google / cpc,google / cpc,1,1,0,0,0,300",
        "Direct,(direct) / (none),(direct) / (none),1,1,0,0,0,",
    ]);
    let outcome = process_file(file.path(), &ReportOptions::default()).unwrap();
    assert_eq!(outcome.paid_revenue(), 300.0);

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("cleaned_data.csv");
    save_cleaned_csv(&out, &outcome.rows).unwrap();

    let text = String::from_utf8(std::fs::read(&out).unwrap()[3..].to_vec()).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert!(lines[1].contains(",0,0,0,300,google,"));
    assert!(lines[2].contains(",0,0,0,,(direct),"));
}
