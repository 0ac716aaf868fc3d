//! Splitting of "source / medium" attribution strings.

use once_cell::sync::Lazy;
use regex::Regex;

use super::normalize::normalize_space;

/// Placeholder for a source or medium that could not be read.
pub const UNRECOGNIZED: &str = "Unrecognized";

/// ASCII or fullwidth slash, absorbing the spaces around it.
static SEPARATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*[/／]\s*").expect("static regex"));

/// A split attribution string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceMedium {
    pub source: String,
    pub medium: String,
}

impl SourceMedium {
    pub fn new(source: impl Into<String>, medium: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            medium: medium.into(),
        }
    }

    /// Both halves set to [`UNRECOGNIZED`].
    pub fn unrecognized() -> Self {
        Self::new(UNRECOGNIZED, UNRECOGNIZED)
    }
}

/// Normalize `raw` and split it on the first slash.
///
/// Without a separator both halves are [`UNRECOGNIZED`]. A separator with
/// nothing on one side yields an empty half.
pub fn split_source_medium(raw: &str) -> SourceMedium {
    let normalized = normalize_space(raw);

    match SEPARATOR.find(&normalized) {
        Some(sep) => SourceMedium::new(&normalized[..sep.start()], &normalized[sep.end()..]),
        None => SourceMedium::unrecognized(),
    }
}
