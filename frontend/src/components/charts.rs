//! The two report charts, side by side.
//!
//! The backend renders each chart as a standalone plotly page; it is shown
//! in a sandboxed frame so its scripts stay out of the app.

use leptos::*;

use crate::{ChartPages, CHART_HEIGHT};

#[component]
fn ChartFrame(title: &'static str, page: Option<String>) -> impl IntoView {
    view! {
        <div class="chart-card">
            {match page {
                Some(html) => view! {
                    <iframe
                        class="chart-frame"
                        title=title
                        srcdoc=html
                        sandbox="allow-scripts"
                        height=CHART_HEIGHT.to_string()
                    ></iframe>
                }
                .into_view(),
                None => view! {
                    <h3>{title}</h3>
                    <p class="chart-empty">"Nothing to chart"</p>
                }
                .into_view(),
            }}
        </div>
    }
}

/// Both charts, with the allocation warning above them.
#[component]
pub fn ChartsSection(charts: ChartPages, warning: Option<String>) -> impl IntoView {
    view! {
        <div class="charts-section">
            {warning.map(|msg| view! { <div class="warning-banner">"⚠️ " {msg}</div> })}
            <div class="charts-row">
                <ChartFrame title="Paid vs Non-paid Total revenue" page=charts.paid_split/>
                <ChartFrame title="Paid revenue allocation by channel" page=charts.channel_revenue/>
            </div>
        </div>
    }
}
