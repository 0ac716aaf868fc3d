//! Export upload component.
//!
//! Handles file selection, upload to the backend and the processing state.

use leptos::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlInputElement};

use super::logs::push_log;
use crate::services::upload_report;
use crate::{AppError, LogEntry, LogLevel, ReportState, BACKEND_URL, MAX_FILE_SIZE};

#[component]
pub fn UploadSection(
    report: ReadSignal<ReportState>,
    set_report: WriteSignal<ReportState>,
    set_logs: WriteSignal<Vec<LogEntry>>,
) -> impl IntoView {
    let on_file_change = move |ev: Event| {
        let input: HtmlInputElement = event_target(&ev);

        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            return;
        };

        // Allow picking the same file again
        input.set_value("");

        set_logs.set(Vec::new());

        let name = file.name();
        if !name.to_lowercase().ends_with(".csv") {
            let err = AppError::Upload(format!("{} is not a CSV file", name));
            add_log(set_logs, LogLevel::Error, &err.to_string());
            set_report.set(ReportState::Failed(err.to_string()));
            return;
        }
        if file.size() as usize > MAX_FILE_SIZE {
            let err = AppError::Upload(format!("{} is larger than {} MB", name, MAX_FILE_SIZE / (1024 * 1024)));
            add_log(set_logs, LogLevel::Error, &err.to_string());
            set_report.set(ReportState::Failed(err.to_string()));
            return;
        }

        set_report.set(ReportState::Processing);

        spawn_local(async move {
            add_log(set_logs, LogLevel::Info, &format!("📤 Uploading {}...", name));

            match upload_report(file, BACKEND_URL).await {
                Ok(response) => {
                    add_log(
                        set_logs,
                        LogLevel::Success,
                        &format!("✅ Report ready: {} rows", response.metadata.row_count),
                    );
                    if let Some(ref warning) = response.warning {
                        add_log(set_logs, LogLevel::Warning, warning);
                    }
                    set_report.set(ReportState::Success(Box::new(response)));
                }
                Err(e) => {
                    add_log(set_logs, LogLevel::Error, &format!("❌ {}", e));
                    set_report.set(ReportState::Failed(e.to_string()));
                }
            }
        });
    };

    let trigger_file_input = move |_| {
        if report.get_untracked().is_processing() {
            return;
        }
        if let Some(input) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("fileInput"))
        {
            if let Some(html_input) = input.dyn_ref::<HtmlInputElement>() {
                html_input.click();
            }
        }
    };

    view! {
        <div
            class="upload-section"
            class:busy=move || report.get().is_processing()
            id="uploadZone"
            on:click=trigger_file_input
        >
            <div class="upload-icon">"📤"</div>
            <div class="upload-text">
                {move || if report.get().is_processing() {
                    "⏳ Processing..."
                } else {
                    "Upload original CSV file"
                }}
            </div>

            <Show
                when=move || !report.get().is_processing()
                fallback=|| view! { }
            >
                <div class="upload-hint">"Traffic acquisition export, header on line 8"</div>
            </Show>

            <input
                type="file"
                id="fileInput"
                accept=".csv"
                style="display:none"
                on:change=on_file_change
                on:click=|ev| ev.stop_propagation()
            />
        </div>
    }
}

/// Append a locally generated entry to the log panel.
pub fn add_log(set_logs: WriteSignal<Vec<LogEntry>>, level: LogLevel, message: &str) {
    push_log(
        set_logs,
        LogEntry {
            level,
            message: message.to_string(),
            timestamp: chrono::Local::now().format("%H:%M:%S").to_string(),
            indent: 0,
        },
    );

    log::info!("{}", message);
}
