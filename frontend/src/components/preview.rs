//! Table preview of the first cleaned rows.

use leptos::*;

use crate::PreviewTable;

/// Cleaned table preview (the backend sends at most the first 20 rows).
#[component]
pub fn PreviewSection(table: PreviewTable, total_rows: usize) -> impl IntoView {
    let shown = table.rows.len();
    let caption = if shown < total_rows {
        format!("First {} of {} rows", shown, total_rows)
    } else {
        format!("{} rows", total_rows)
    };

    let header = table
        .columns
        .into_iter()
        .map(|col| view! { <th>{col}</th> })
        .collect_view();

    let body = table
        .rows
        .into_iter()
        .map(|row| {
            let cells = row.into_iter().map(|cell| view! { <td>{cell}</td> }).collect_view();
            view! { <tr>{cells}</tr> }
        })
        .collect_view();

    view! {
        <div class="preview-section">
            <div class="preview-header">
                <h2>"🧹 Cleaned data"</h2>
                <span class="preview-count">{caption}</span>
            </div>
            <div class="preview-table-wrapper">
                <table class="preview-table">
                    <thead><tr>{header}</tr></thead>
                    <tbody>{body}</tbody>
                </table>
            </div>
        </div>
    }
}
