//! Report view shown once the backend has processed an upload.

use leptos::*;

use crate::{ChartsSection, DownloadButton, PreviewSection, ReportResponse};

#[component]
pub fn ReportView(report: ReportResponse) -> impl IntoView {
    let meta = report.metadata;
    let counts = meta.status_counts;
    let summary = format!(
        "{} rows ({} paid, {} non-paid, {} unrecognized) • encoding {}",
        meta.row_count, counts.paid, counts.non_paid, counts.unrecognized, meta.encoding
    );
    let allocation = format!(
        "Paid revenue {:.2} • allocated {:.2}",
        meta.paid_revenue, meta.allocated_revenue
    );

    view! {
        <div class="report-view">
            <div class="success-banner">
                <span>"✅ Processed"</span>
                <span class="report-summary">{summary}</span>
                <span class="report-summary">{allocation}</span>
            </div>
            <PreviewSection table=report.preview total_rows=meta.row_count/>
            <ChartsSection charts=report.charts warning=report.warning/>
            <DownloadButton file_name=report.file_name content=report.cleaned_csv/>
        </div>
    }
}
