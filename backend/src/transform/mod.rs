//! Transformation module.
//!
//! Report stages after loading:
//! - Normalize: whitespace cleanup
//! - Split: "source / medium" into two fields
//! - Classify: Paid / Non-paid / Unrecognized
//! - Aggregate: chart data
//! - Pipeline: all of the above in one pass

pub mod aggregate;
pub mod classify;
pub mod normalize;
pub mod pipeline;
pub mod split;

pub use aggregate::{allocate_paid_revenue, allocate_row, paid_split, ChartSlice};
pub use classify::{classify, PaidKeywords, DEFAULT_PAID_KEYWORDS};
pub use normalize::normalize_space;
pub use pipeline::*;
pub use split::{split_source_medium, SourceMedium, UNRECOGNIZED};
