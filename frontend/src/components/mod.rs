//! UI Components for the RevFlow application.
//!
//! # Layout Components
//! - [`Header`] - Navigation bar with backend status
//! - [`Hero`] - Main title and description
//! - [`Footer`] - Page footer
//!
//! # Feature Components
//! - [`UploadSection`] - CSV file upload with drag & drop
//! - [`LogsPanel`] - Real-time processing logs (SSE)
//! - [`ReportView`] - Preview table, charts and download of a processed report

mod charts;
mod download;
mod footer;
mod header;
mod hero;
mod logs;
mod preview;
mod report;
mod upload;

pub use charts::*;
pub use download::*;
pub use footer::*;
pub use header::*;
pub use hero::*;
pub use logs::*;
pub use preview::*;
pub use report::*;
pub use upload::*;
