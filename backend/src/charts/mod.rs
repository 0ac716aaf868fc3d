//! Pie charts for a processed report.
//!
//! Both charts are plotly figures. The web UI embeds the standalone HTML
//! pages, the CLI writes them next to the cleaned CSV.

use plotly::common::Title;
use plotly::{Layout, Pie, Plot};
use std::path::{Path, PathBuf};

use crate::error::ReportResult;
use crate::transform::aggregate::ChartSlice;
use crate::transform::pipeline::ReportOutcome;

/// ColorBrewer "Set2".
pub const SET2: [&str; 8] = [
    "#66c2a5", "#fc8d62", "#8da0cb", "#e78ac3", "#a6d854", "#ffd92f", "#e5c494", "#b3b3b3",
];

pub const PAID_SPLIT_TITLE: &str = "Paid vs Non-paid Total revenue";
pub const CHANNEL_REVENUE_TITLE: &str = "Paid revenue allocation by channel";

/// Build a pie figure, `None` when there is nothing to show.
pub fn pie_plot(title: &str, slices: &[ChartSlice]) -> Option<Plot> {
    if slices.is_empty() {
        return None;
    }

    let values: Vec<f64> = slices.iter().map(|s| s.value).collect();
    let labels: Vec<&str> = slices.iter().map(|s| s.label.as_str()).collect();

    let mut plot = Plot::new();
    plot.add_trace(Pie::new(values).labels(labels));
    plot.set_layout(Layout::new().title(Title::from(title)).colorway(SET2.to_vec()));

    Some(plot)
}

/// The two figures of a report.
pub struct ReportCharts {
    pub paid_split: Option<Plot>,
    /// Absent when no paid revenue was allocated
    pub channel_revenue: Option<Plot>,
}

impl ReportCharts {
    pub fn from_outcome(outcome: &ReportOutcome) -> Self {
        Self {
            paid_split: pie_plot(PAID_SPLIT_TITLE, &outcome.paid_split),
            channel_revenue: pie_plot(CHANNEL_REVENUE_TITLE, &outcome.channel_revenue),
        }
    }

    /// Standalone HTML pages, `(paid_split, channel_revenue)`.
    pub fn to_html(&self) -> (Option<String>, Option<String>) {
        (
            self.paid_split.as_ref().map(|p| p.to_html()),
            self.channel_revenue.as_ref().map(|p| p.to_html()),
        )
    }

    /// Write each figure as `<name>.html` into `dir`.
    pub fn save_html(&self, dir: &Path) -> ReportResult<Vec<PathBuf>> {
        std::fs::create_dir_all(dir)?;

        let mut written = Vec::new();
        for (name, plot) in [("paid_split", &self.paid_split), ("channel_revenue", &self.channel_revenue)] {
            if let Some(plot) = plot {
                let path = dir.join(format!("{}.html", name));
                std::fs::write(&path, plot.to_html())?;
                written.push(path);
            }
        }
        Ok(written)
    }
}
