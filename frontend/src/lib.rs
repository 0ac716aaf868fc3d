//! RevFlow - Frontend Rust/Leptos Application
//!
//! A WebAssembly frontend for uploading a channel export and viewing the
//! cleaned table, the paid split and the channel revenue allocation.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        App                                   │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Header (backend status)                                     │
//! ├─────────────────────────────────────────────────────────────┤
//! │  MainContent                                                 │
//! │  ├── Hero (title, description)                              │
//! │  ├── UploadSection + LogsPanel                              │
//! │  └── ReportView (preview, charts, download)                 │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Footer                                                      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`types`] - Common types (ReportResponse, LogEntry, ReportState, etc.)
//! - [`components`] - UI components (Header, Upload, Report, etc.)
//! - [`services`] - Backend communication and file download

use leptos::*;
use leptos_meta::*;
use leptos_router::*;
use wasm_bindgen::prelude::*;

// =============================================================================
// Module declarations
// =============================================================================

pub mod components;
pub mod config;
pub mod services;
pub mod types;

// =============================================================================
// Re-exports
// =============================================================================

// Configuration
pub use config::*;

// Types
pub use types::{
    // Report
    ChartPages, ChartSlice, PreviewTable, ReportResponse, ResponseMetadata, StatusCounts,
    // Logs
    LogEntry, LogLevel,
    // UI state
    ReportState,
    // Errors
    AppError, AppResult,
};

// Components
pub use components::*;

// =============================================================================
// Application Entry Point
// =============================================================================

/// WASM entry point - called automatically by trunk.
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    _ = console_log::init_with_level(log::Level::Debug);

    log::info!("🦀 RevFlow - Starting Leptos App");

    mount_to_body(|| view! { <App/> });
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text=APP_NAME/>
        <Router>
            <main>
                <Routes>
                    <Route path="/" view=MainContent/>
                </Routes>
            </main>
        </Router>
    }
}

#[component]
fn MainContent() -> impl IntoView {
    let (report, set_report) = create_signal(ReportState::default());
    let (logs, set_logs) = create_signal(Vec::<LogEntry>::new());

    // Initialize SSE connection ONCE at app startup
    init_sse_logs(set_logs);

    view! {
        <Header/>

        <div class="container">
            <Hero/>

            <UploadSection report=report set_report=set_report set_logs=set_logs/>

            <Show
                when=move || !logs.get().is_empty()
                fallback=|| view! { }
            >
                <LogsPanel logs=logs set_logs=set_logs/>
            </Show>

            {move || match report.get() {
                ReportState::Success(response) => view! { <ReportView report=*response/> }.into_view(),
                ReportState::Failed(message) => {
                    view! { <div class="error-banner">"❌ " {message}</div> }.into_view()
                }
                ReportState::NoFile | ReportState::Processing => ().into_view(),
            }}
        </div>

        <Footer/>
    }
}
